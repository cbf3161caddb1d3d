use std::io::{Error, ErrorKind, Read, Result, Write};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::varint::{
    read::{async_read_varint, read_varint},
    write::{async_write_varint, write_varint},
};

// The declared length is untrusted, so the buffer grows with what is actually read.
fn check_len(buffer: Vec<u8>, len: usize) -> Result<Vec<u8>> {
    if buffer.len() != len {
        return Err(Error::new(ErrorKind::UnexpectedEof, "truncated byte string"));
    }
    Ok(buffer)
}

fn into_string(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|err| Error::new(ErrorKind::InvalidData, err))
}

pub fn write_bytes<W: Write>(value: &[u8], writer: &mut W) -> Result<()> {
    write_varint(value.len(), writer)?;
    writer.write_all(value)?;
    Ok(())
}

pub fn write_string<W: Write>(value: &str, writer: &mut W) -> Result<()> {
    write_bytes(value.as_bytes(), writer)
}

pub fn read_bytes<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let len: usize = read_varint(reader)?;
    let mut buffer = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut buffer)?;
    check_len(buffer, len)
}

pub fn read_string<R: Read>(reader: &mut R) -> Result<String> {
    into_string(read_bytes(reader)?)
}

pub async fn async_write_bytes<W: AsyncWrite + Unpin>(value: &[u8], writer: &mut W) -> Result<()> {
    async_write_varint(value.len(), writer).await?;
    writer.write_all(value).await?;
    Ok(())
}

pub async fn async_write_string<W: AsyncWrite + Unpin>(value: &str, writer: &mut W) -> Result<()> {
    async_write_bytes(value.as_bytes(), writer).await
}

pub async fn async_read_bytes<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>> {
    let len: usize = async_read_varint(reader).await?;
    let mut buffer = Vec::new();
    (&mut *reader).take(len as u64).read_to_end(&mut buffer).await?;
    check_len(buffer, len)
}

pub async fn async_read_string<R: AsyncRead + Unpin>(reader: &mut R) -> Result<String> {
    into_string(async_read_bytes(reader).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn string_layout() {
        let mut buffer = Vec::new();
        write_string("cfs", &mut buffer).unwrap();
        assert_eq!(buffer, vec![3, b'c', b'f', b's']);
        assert_eq!(read_string(&mut Cursor::new(buffer)).unwrap(), "cfs");
    }

    #[test]
    fn invalid_utf8_is_invalid_data() {
        let err = read_string(&mut Cursor::new(vec![2, 0xff, 0xfe])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn short_payload_is_eof() {
        let err = read_string(&mut Cursor::new(vec![4, b'a'])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }

    #[tokio::test]
    async fn async_string_matches_sync() {
        let mut buffer = Vec::new();
        async_write_string("segments_5", &mut buffer).await.unwrap();
        let mut sync_buffer = Vec::new();
        write_string("segments_5", &mut sync_buffer).unwrap();
        assert_eq!(buffer, sync_buffer);

        let mut reader = buffer.as_slice();
        assert_eq!(async_read_string(&mut reader).await.unwrap(), "segments_5");
    }
}
