/// 10 caractères — du plus dense au plus clair.
pub const CHARSET_DEFAULT: &str = "@%#*+=-:. ";

/// Lookup table mapping greyscale [0..255] → glyph.
///
/// Pre-computed once per conversion for O(1) per-pixel cost. The ramp is
/// ordered darkest (densest glyph) → lightest, so greyscale 0 maps to the
/// first glyph and 255 to the last.
///
/// # Example
/// ```
/// use ab_core::charset::GlyphRamp;
/// let ramp = GlyphRamp::new("@%#*+=-:. ");
/// assert_eq!(ramp.map(0), '@');
/// assert_eq!(ramp.map(255), ' ');
/// ```
#[derive(Clone)]
pub struct GlyphRamp {
    lut: [char; 256],
}

impl GlyphRamp {
    /// Build a LUT from a ramp ordered darkest→lightest.
    ///
    /// Index is `floor(grey * (len - 1) / 255)`, computed in integers so
    /// the boundaries are exact. A ramp shorter than 2 glyphs falls back to
    /// [`CHARSET_DEFAULT`].
    #[must_use]
    pub fn new(ramp: &str) -> Self {
        let chars: Vec<char> = ramp.chars().collect();
        if chars.len() < 2 {
            log::warn!("Rampe trop courte ({ramp:?}), utilisation du défaut.");
            return Self::new(CHARSET_DEFAULT);
        }
        let last = chars.len() - 1;
        let mut lut = [' '; 256];
        for (grey, slot) in lut.iter_mut().enumerate() {
            *slot = chars[(grey * last / 255).min(last)];
        }
        Self { lut }
    }

    /// Map a greyscale value [0..255] to a glyph.
    ///
    /// # Example
    /// ```
    /// use ab_core::charset::GlyphRamp;
    /// let ramp = GlyphRamp::default();
    /// assert_eq!(ramp.map(128), '+');
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn map(&self, grey: u8) -> char {
        self.lut[grey as usize]
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self::new(CHARSET_DEFAULT)
    }
}
