use ab_core::charset::GlyphRamp;
use ab_core::config::RowDecimation;
use ab_core::frame::{AsciiCanvas, GreyFrame};

/// Convert a greyscale frame into text rows.
///
/// Every sample is mapped through `ramp`; only rows kept by `decimation`
/// are emitted, in top-to-bottom order.
///
/// # Example
/// ```
/// use ab_core::charset::GlyphRamp;
/// use ab_core::config::RowDecimation;
/// use ab_core::frame::GreyFrame;
/// use ab_ascii::rasterize::rasterize;
///
/// let frame = GreyFrame::try_new(3, 4).unwrap();
/// let canvas = rasterize(&frame, &GlyphRamp::default(), RowDecimation::Odd);
/// assert_eq!(canvas.len(), 2);
/// assert_eq!(canvas.rows()[0], "@@@");
/// ```
#[must_use]
pub fn rasterize(frame: &GreyFrame, ramp: &GlyphRamp, decimation: RowDecimation) -> AsciiCanvas {
    let mut canvas = AsciiCanvas::new(frame.width);
    for y in (0..frame.height).filter(|&y| decimation.keeps(y)) {
        let row: String = frame.row(y).iter().map(|&g| ramp.map(g)).collect();
        canvas.push_row(row);
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> GreyFrame {
        let mut frame = GreyFrame::try_new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                frame.set(x, y, (y * 255 / (height - 1).max(1)) as u8);
            }
        }
        frame
    }

    #[test]
    fn odd_rows_only() {
        let frame = gradient(2, 5);
        let canvas = rasterize(&frame, &GlyphRamp::default(), RowDecimation::Odd);
        assert_eq!(canvas.len(), 2);
        // rows 1 and 3: grey 63 and 191
        assert_eq!(canvas.rows(), &["##".to_string(), "--".to_string()]);
    }

    #[test]
    fn all_rows_when_decimation_disabled() {
        let frame = gradient(1, 5);
        let canvas = rasterize(&frame, &GlyphRamp::default(), RowDecimation::None);
        let text: Vec<&str> = canvas.rows().iter().map(String::as_str).collect();
        assert_eq!(text, vec!["@", "#", "+", "-", " "]);
    }

    #[test]
    fn single_row_frame_emits_nothing() {
        let frame = gradient(4, 1);
        let canvas = rasterize(&frame, &GlyphRamp::default(), RowDecimation::Odd);
        assert!(canvas.is_empty());
        assert_eq!(canvas.width(), 4);
    }

    #[test]
    fn custom_ramp_is_used() {
        let frame = gradient(1, 2);
        let canvas = rasterize(&frame, &GlyphRamp::new("XO"), RowDecimation::None);
        assert_eq!(canvas.to_string(), "X\nO\n");
    }
}
