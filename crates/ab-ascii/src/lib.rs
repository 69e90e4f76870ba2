//! ASCII conversion engine for bmpscii.
//!
//! Resamples a validated 24-bit BMP pixel region to a bounded grid and
//! quantizes its greyscale into glyph rows.

pub mod rasterize;
pub mod resample;

use ab_bmp::header::BitmapHeader;
use ab_bmp::pixels::region_len;
use ab_core::charset::GlyphRamp;
use ab_core::config::RenderConfig;
use ab_core::error::ConvertError;
use ab_core::frame::AsciiCanvas;

pub use rasterize::rasterize;
pub use resample::{Geometry, resample, target_geometry};

/// Render a BMP pixel region as ASCII art.
///
/// `header` must have passed [`ab_bmp::validate::validate`]; `pixels` is
/// the raw region as stored in the file (row padding included). The result
/// depends only on its inputs, so rendering twice gives identical canvases.
///
/// # Errors
/// - zero height or non-positive width;
/// - truncated pixel region;
/// - allocation failure of the resampled frame.
///
/// # Example
/// ```
/// use ab_bmp::header::BitmapHeader;
/// use ab_core::config::RenderConfig;
/// use ab_ascii::render;
///
/// let header = BitmapHeader { width: 4, height: 4, bits_per_pixel: 24, ..Default::default() };
/// let pixels = vec![255u8; 12 * 4];
/// let canvas = render(&header, &pixels, &RenderConfig::default()).unwrap();
/// assert_eq!(canvas.len(), 100);
/// assert!(canvas.rows().iter().all(|row| row == &" ".repeat(200)));
/// ```
pub fn render(
    header: &BitmapHeader,
    pixels: &[u8],
    config: &RenderConfig,
) -> Result<AsciiCanvas, ConvertError> {
    region_len(header)?;

    let geometry = target_geometry(
        header.width.unsigned_abs(),
        header.abs_height(),
        config.target_width,
        config.target_height,
    );
    log::debug!(
        "Nouvelle taille : {}×{} (échelle {})",
        geometry.width,
        geometry.height,
        geometry.scale
    );

    let frame = resample(header, pixels, geometry)?;
    let ramp = GlyphRamp::new(&config.ramp);
    Ok(rasterize(&frame, &ramp, config.row_decimation))
}
