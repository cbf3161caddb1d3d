//! Unsigned LEB128-style integers: 7 bits per byte, low group first,
//! high bit set on every byte but the last.

pub mod len;
pub mod read;
pub mod write;

const CONTINUATION: u8 = 0b10000000;
const PAYLOAD: u8 = 0b01111111;

#[cfg(test)]
mod tests {
    use super::len::len_varint;
    use super::read::read_varint;
    use super::write::write_varint;
    use std::io::Cursor;

    #[test]
    fn varint_width_boundaries() {
        for value in [0u64, 127, 128, 16_383, 16_384, u32::MAX as u64, u64::MAX] {
            let mut buffer = Vec::new();
            write_varint(value, &mut buffer).unwrap();
            assert_eq!(buffer.len(), len_varint(value));
            let res: u64 = read_varint(&mut Cursor::new(buffer)).unwrap();
            assert_eq!(res, value);
        }
    }
}
