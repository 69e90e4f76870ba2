use ab_core::config::SizeLimits;
use ab_core::error::UnsupportedReason;

use crate::header::BitmapHeader;

/// Seule profondeur supportée.
pub const SUPPORTED_BPP: u8 = 24;
/// Seule compression supportée (BI_RGB).
pub const SUPPORTED_COMPRESSION: u32 = 0;

/// Validate against the default 2000×2000 limits.
///
/// # Errors
/// See [`validate_with`].
///
/// # Example
/// ```
/// use ab_bmp::header::BitmapHeader;
/// use ab_bmp::validate::validate;
/// use ab_core::error::UnsupportedReason;
///
/// let header = BitmapHeader { width: 100, height: 100, bits_per_pixel: 8, ..Default::default() };
/// assert_eq!(validate(&header), Err(UnsupportedReason::UnsupportedBitDepth(8)));
/// ```
pub fn validate(header: &BitmapHeader) -> Result<(), UnsupportedReason> {
    validate_with(header, &SizeLimits::default())
}

/// Decide whether `header` describes an image this converter accepts.
///
/// Checks run in a fixed order and the first failure wins: bit depth,
/// compression, width limit, height limit (signed, so top-down images with
/// a negative height always pass it), non-positive width, zero height.
///
/// # Errors
/// The [`UnsupportedReason`] of the first failing check.
pub fn validate_with(header: &BitmapHeader, limits: &SizeLimits) -> Result<(), UnsupportedReason> {
    if header.bits_per_pixel != SUPPORTED_BPP {
        return Err(UnsupportedReason::UnsupportedBitDepth(header.bits_per_pixel));
    }
    if header.compression != SUPPORTED_COMPRESSION {
        return Err(UnsupportedReason::UnsupportedCompression(header.compression));
    }
    if header.width > limits.max_width {
        return Err(UnsupportedReason::WidthTooLarge {
            width: header.width,
            max: limits.max_width,
        });
    }
    if header.height > limits.max_height {
        return Err(UnsupportedReason::HeightTooLarge {
            height: header.height,
            max: limits.max_height,
        });
    }
    if header.width <= 0 {
        return Err(UnsupportedReason::InvalidWidth(header.width));
    }
    if header.height == 0 {
        return Err(UnsupportedReason::InvalidHeight);
    }
    Ok(())
}
