use std::io::Read;

use ab_core::error::{ConvertError, ParseError, UnsupportedReason};

use crate::header::BitmapHeader;

/// Bytes per 24-bit pixel.
pub const BYTES_PER_PIXEL: usize = 3;

/// Padded byte length of one 24-bit row: `ceil(width * 3 / 4) * 4`.
///
/// # Example
/// ```
/// use ab_bmp::pixels::row_stride;
/// assert_eq!(row_stride(1), 4);
/// assert_eq!(row_stride(4), 12);
/// assert_eq!(row_stride(5), 16);
/// ```
#[inline]
#[must_use]
pub fn row_stride(width: u32) -> usize {
    (width as usize * BYTES_PER_PIXEL).div_ceil(4) * 4
}

/// Byte length of the whole pixel region (`row_stride * |height|`).
///
/// # Errors
/// [`UnsupportedReason::InvalidWidth`] / [`UnsupportedReason::InvalidHeight`]
/// for non-positive width or zero height, [`ConvertError::AllocationError`]
/// if the size does not fit in `usize`.
pub fn region_len(header: &BitmapHeader) -> Result<usize, ConvertError> {
    let width = u32::try_from(header.width)
        .ok()
        .filter(|&w| w > 0)
        .ok_or(UnsupportedReason::InvalidWidth(header.width))?;
    if header.height == 0 {
        return Err(UnsupportedReason::InvalidHeight.into());
    }
    row_stride(width)
        .checked_mul(header.abs_height() as usize)
        .ok_or(ConvertError::AllocationError { bytes: usize::MAX })
}

/// Région de pixels brute, padding de ligne inclus, dans l'ordre de stockage.
pub struct PixelBuffer {
    data: Vec<u8>,
    stride: usize,
}

impl PixelBuffer {
    /// Raw bytes, `stride * rows` long.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Padded bytes per stored row.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of stored rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.data.len().checked_div(self.stride).unwrap_or(0)
    }
}

/// Read the pixel region that follows the header.
///
/// The reader must be positioned at `pixel_data_offset`, which is where
/// [`crate::header::parse`] leaves it. The declared `pixel_data_size` is
/// ignored; the length is derived from the dimensions.
///
/// # Errors
/// - [`ConvertError::AllocationError`] if the buffer cannot be reserved.
/// - [`ParseError::Truncated`] if the input ends before the region does.
/// - [`ParseError::Io`] for other reader failures.
///
/// # Example
/// ```
/// use ab_bmp::header::BitmapHeader;
/// use ab_bmp::pixels::read_pixels;
/// let header = BitmapHeader { width: 1, height: 2, bits_per_pixel: 24, ..Default::default() };
/// let bytes = [0u8; 8];
/// let pixels = read_pixels(&mut &bytes[..], &header).unwrap();
/// assert_eq!(pixels.rows(), 2);
/// ```
pub fn read_pixels<R: Read>(
    reader: &mut R,
    header: &BitmapHeader,
) -> Result<PixelBuffer, ConvertError> {
    let len = region_len(header)?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| ConvertError::AllocationError { bytes: len })?;

    let read = reader
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut data)
        .map_err(ParseError::Io)?;
    if read < len {
        log::debug!("Région de pixels tronquée : {read}/{len} octets");
        return Err(ParseError::Truncated.into());
    }

    Ok(PixelBuffer {
        data,
        stride: row_stride(header.width.unsigned_abs()),
    })
}
