use std::{
    io::{Error, ErrorKind, Read, Result},
    mem::size_of,
    ops::{BitOrAssign, Shl},
};

use num_traits::{FromPrimitive, Unsigned};
use tokio::io::{AsyncRead, AsyncReadExt};

use super::{CONTINUATION, PAYLOAD};

/// Folds one encoded byte into `value`. Returns `true` once the last byte
/// of the varint has been consumed.
fn accumulate<N: Unsigned + FromPrimitive + Shl<i32, Output = N> + BitOrAssign + Copy>(
    value: &mut N,
    shift: &mut i32,
    byte: u8,
) -> Result<bool> {
    let width = (size_of::<N>() * 8) as i32;
    if *shift >= width {
        return Err(Error::new(ErrorKind::InvalidData, "varint too long"));
    }
    let remaining = width - *shift;
    if remaining < 7 && (byte & CONTINUATION != 0 || (byte & PAYLOAD) >> remaining != 0) {
        return Err(Error::new(ErrorKind::InvalidData, "varint overflows its type"));
    }
    let group = N::from_u8(byte & PAYLOAD)
        .ok_or_else(|| Error::new(ErrorKind::InvalidData, "varint group out of range"))?;
    *value |= group << *shift;
    *shift += 7;
    Ok(byte & CONTINUATION == 0)
}

pub fn read_varint<
    N: Unsigned + FromPrimitive + Shl<i32, Output = N> + BitOrAssign + Copy,
    R: Read,
>(
    reader: &mut R,
) -> Result<N> {
    let mut value = N::zero();
    let mut shift = 0;
    loop {
        let mut byte = [0u8];
        reader.read_exact(&mut byte)?;
        if accumulate(&mut value, &mut shift, byte[0])? {
            break;
        }
    }
    Ok(value)
}

pub async fn async_read_varint<
    N: Unsigned + FromPrimitive + Shl<i32, Output = N> + BitOrAssign + Copy,
    R: AsyncRead + Unpin,
>(
    reader: &mut R,
) -> Result<N> {
    let mut value = N::zero();
    let mut shift = 0;
    loop {
        let byte = reader.read_u8().await?;
        if accumulate(&mut value, &mut shift, byte)? {
            break;
        }
    }
    Ok(value)
}
