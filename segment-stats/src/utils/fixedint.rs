// Fixed-width integers, big-endian (network order).

use std::io::{Read, Result, Write};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub fn write_fixed_i64<W: Write>(value: i64, writer: &mut W) -> Result<()> {
    let buff = value.to_be_bytes();
    writer.write_all(buff.as_ref())?;
    Ok(())
}

pub fn read_fixed_i64<R: Read>(reader: &mut R) -> Result<i64> {
    let mut buffer = [0u8; 8];
    reader.read_exact(&mut buffer)?;
    Ok(i64::from_be_bytes(buffer))
}

pub async fn async_write_fixed_i64<W: AsyncWrite + Unpin>(value: i64, writer: &mut W) -> Result<()> {
    writer.write_i64(value).await
}

pub async fn async_read_fixed_i64<R: AsyncRead + Unpin>(reader: &mut R) -> Result<i64> {
    reader.read_i64().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, ErrorKind};

    #[test]
    fn fixed_i64_is_big_endian() {
        let mut buffer = Vec::new();
        write_fixed_i64(0x0102030405060708, &mut buffer).unwrap();
        assert_eq!(buffer, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn fixed_i64_min_value() {
        let mut buffer = Vec::new();
        write_fixed_i64(i64::MIN, &mut buffer).unwrap();
        assert_eq!(buffer, vec![0x80, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(read_fixed_i64(&mut Cursor::new(buffer)).unwrap(), i64::MIN);
    }

    #[test]
    fn fixed_i64_truncated() {
        let err = read_fixed_i64(&mut Cursor::new(vec![0u8; 5])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }

    #[tokio::test]
    async fn async_fixed_i64_matches_sync() {
        let mut sync_buffer = Vec::new();
        write_fixed_i64(-42, &mut sync_buffer).unwrap();
        let mut async_buffer = Vec::new();
        async_write_fixed_i64(-42, &mut async_buffer).await.unwrap();
        assert_eq!(sync_buffer, async_buffer);

        let mut reader = async_buffer.as_slice();
        assert_eq!(async_read_fixed_i64(&mut reader).await.unwrap(), -42);
    }
}
