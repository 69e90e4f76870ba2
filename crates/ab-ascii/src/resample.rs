use ab_bmp::header::BitmapHeader;
use ab_bmp::pixels::{BYTES_PER_PIXEL, region_len, row_stride};
use ab_core::error::{ConvertError, ParseError};
use ab_core::frame::GreyFrame;

/// Dimensions de sortie après mise à l'échelle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Uniform scale factor applied to both axes.
    pub scale: f32,
    /// Resampled width in pixels.
    pub width: usize,
    /// Resampled height in pixels, before row decimation.
    pub height: usize,
}

/// Fit `width × height` into `target_width × target_height` keeping the
/// aspect ratio: the more restrictive axis sets the scale.
///
/// # Example
/// ```
/// use ab_ascii::resample::target_geometry;
/// let g = target_geometry(400, 100, 200, 200);
/// assert_eq!((g.width, g.height), (200, 50));
/// let g = target_geometry(4, 4, 200, 200);
/// assert_eq!((g.scale, g.width, g.height), (50.0, 200, 200));
/// ```
#[must_use]
pub fn target_geometry(width: u32, height: u32, target_width: u32, target_height: u32) -> Geometry {
    let sw = target_width as f32 / width.max(1) as f32;
    let sh = target_height as f32 / height.max(1) as f32;
    let scale = sw.min(sh);
    log::debug!("scale w: {sw}  scale h: {sh}  best scale: {scale}");
    Geometry {
        scale,
        width: (width as f32 * scale) as usize,
        height: (height as f32 * scale) as usize,
    }
}

/// Nearest-neighbor resample of a 24-bit pixel region into a greyscale
/// frame of `geometry` size.
///
/// Output row 0 is the top of the image whatever the storage order: for
/// bottom-up images (positive height) the source row is mirrored. Each
/// sample is the truncating mean of its three channel bytes.
///
/// # Errors
/// - invalid width/height (see [`region_len`]);
/// - [`ParseError::Truncated`] if `pixels` is shorter than the region;
/// - [`ConvertError::AllocationError`] if the frame cannot be allocated.
pub fn resample(
    header: &BitmapHeader,
    pixels: &[u8],
    geometry: Geometry,
) -> Result<GreyFrame, ConvertError> {
    let needed = region_len(header)?;
    if pixels.len() < needed {
        return Err(ParseError::Truncated.into());
    }

    let src_width = header.width.unsigned_abs() as usize;
    let src_height = header.abs_height() as usize;
    let stride = row_stride(header.width.unsigned_abs());
    let bottom_up = header.is_bottom_up();
    let scale = geometry.scale;

    let mut frame = GreyFrame::try_new(geometry.width, geometry.height)?;

    for i in 0..geometry.height {
        let src_row = if bottom_up {
            (geometry.height - i - 1) as f32 / scale
        } else {
            i as f32 / scale
        };
        let y_src = (src_row as usize).min(src_height - 1);

        for j in 0..geometry.width {
            let x_src = ((j as f32 / scale) as usize).min(src_width - 1);
            let base = stride * y_src + x_src * BYTES_PER_PIXEL;
            let px = &pixels[base..base + BYTES_PER_PIXEL];
            let sum = u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2]);
            frame.set(j, i, (sum / 3) as u8);
        }
    }

    Ok(frame)
}
