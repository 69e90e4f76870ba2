use std::fmt;
use std::io::{self, Write};

use crate::error::ConvertError;

/// Buffer greyscale issu du rééchantillonnage. Un octet par pixel, row-major,
/// sans padding.
///
/// # Example
/// ```
/// use ab_core::frame::GreyFrame;
/// let frame = GreyFrame::try_new(10, 4).unwrap();
/// assert_eq!(frame.data.len(), 40);
/// ```
pub struct GreyFrame {
    /// Greyscale samples, row-major, top row first.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl GreyFrame {
    /// Allocate a zeroed frame, reporting allocation failure instead of
    /// aborting.
    ///
    /// # Errors
    /// Returns [`ConvertError::AllocationError`] if the size overflows or
    /// the allocator refuses the request.
    pub fn try_new(width: usize, height: usize) -> Result<Self, ConvertError> {
        let bytes = width
            .checked_mul(height)
            .ok_or(ConvertError::AllocationError { bytes: usize::MAX })?;
        let mut data = Vec::new();
        data.try_reserve_exact(bytes)
            .map_err(|_| ConvertError::AllocationError { bytes })?;
        data.resize(bytes, 0);
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Set greyscale at (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, grey: u8) {
        self.data[y * self.width + x] = grey;
    }

    /// One row of samples.
    #[must_use]
    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.width..(y + 1) * self.width]
    }
}

/// Grille de sortie ASCII : lignes de glyphes de largeur fixe.
///
/// Rows are stored without terminator; [`AsciiCanvas::write_to`] and the
/// `Display` impl append `\n` after every row.
///
/// # Example
/// ```
/// use ab_core::frame::AsciiCanvas;
/// let mut canvas = AsciiCanvas::new(3);
/// canvas.push_row("@. ".to_string());
/// assert_eq!(canvas.to_string(), "@. \n");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AsciiCanvas {
    rows: Vec<String>,
    width: usize,
}

impl AsciiCanvas {
    /// Empty canvas whose rows will be `width` glyphs wide.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            rows: Vec::new(),
            width,
        }
    }

    /// Append a row. The row must hold exactly `width` glyphs.
    pub fn push_row(&mut self, row: String) {
        debug_assert_eq!(row.chars().count(), self.width, "row width mismatch");
        self.rows.push(row);
    }

    /// Glyphs per row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of emitted rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` if no row was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in display order, without terminator.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Write every row followed by `\n`.
    ///
    /// # Errors
    /// Propagates any error from the writer.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in &self.rows {
            out.write_all(row.as_bytes())?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
