//! Bounds-checked little-endian field readers over a header buffer.

use ab_core::error::ParseError;

/// Read one byte at `offset`.
///
/// # Errors
/// [`ParseError::Truncated`] if `offset` is past the buffer.
#[inline]
pub fn read_u8(buf: &[u8], offset: usize) -> Result<u8, ParseError> {
    buf.get(offset).copied().ok_or(ParseError::Truncated)
}

/// Read a little-endian `u32` at `offset`.
///
/// # Errors
/// [`ParseError::Truncated`] if the four bytes are not all inside `buf`.
///
/// # Example
/// ```
/// use ab_bmp::bytes::read_u32_le;
/// assert_eq!(read_u32_le(&[0, 0x36, 0, 0, 0], 1).unwrap(), 54);
/// assert!(read_u32_le(&[1, 2, 3], 0).is_err());
/// ```
#[inline]
pub fn read_u32_le(buf: &[u8], offset: usize) -> Result<u32, ParseError> {
    Ok(u32::from_le_bytes(read_array(buf, offset)?))
}

/// Read a little-endian `i32` at `offset`.
///
/// # Errors
/// [`ParseError::Truncated`] if the four bytes are not all inside `buf`.
///
/// # Example
/// ```
/// use ab_bmp::bytes::read_i32_le;
/// assert_eq!(read_i32_le(&(-100i32).to_le_bytes(), 0).unwrap(), -100);
/// ```
#[inline]
pub fn read_i32_le(buf: &[u8], offset: usize) -> Result<i32, ParseError> {
    Ok(i32::from_le_bytes(read_array(buf, offset)?))
}

fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N], ParseError> {
    let end = offset.checked_add(N).ok_or(ParseError::Truncated)?;
    buf.get(offset..end)
        .and_then(|s| s.try_into().ok())
        .ok_or(ParseError::Truncated)
}
