use thiserror::Error;

/// Errors raised while reading the BMP byte stream.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Input is shorter than the current read step requires, or the
    /// declared pixel data offset cannot hold the file header.
    #[error("Fichier tronqué : données insuffisantes pour l'en-tête ou les pixels")]
    Truncated,

    /// Underlying reader failure other than end of input.
    #[error("Erreur de lecture : {0}")]
    Io(#[from] std::io::Error),
}

/// Reason a parsed header is rejected by the validator.
///
/// Variants are listed in the order the validator checks them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// Only 24 bits per pixel are supported.
    #[error("Profondeur non supportée : {0} bpp (24 requis)")]
    UnsupportedBitDepth(u8),

    /// Only uncompressed (BI_RGB) pixel data is supported.
    #[error("Compression non supportée : type {0}")]
    UnsupportedCompression(u32),

    /// Width exceeds the configured maximum.
    #[error("Largeur trop grande : {width} > {max}")]
    WidthTooLarge {
        /// Declared width.
        width: i32,
        /// Configured maximum.
        max: i32,
    },

    /// Height exceeds the configured maximum (signed comparison).
    #[error("Hauteur trop grande : {height} > {max}")]
    HeightTooLarge {
        /// Declared height.
        height: i32,
        /// Configured maximum.
        max: i32,
    },

    /// Width is zero or negative.
    #[error("Largeur invalide : {0}")]
    InvalidWidth(i32),

    /// Height is zero, so row order is undefined.
    #[error("Hauteur invalide : 0")]
    InvalidHeight,
}

/// Any failure of a single BMP → ASCII conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Header or pixel region could not be read.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Header describes an image this converter rejects.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedReason),

    /// A working buffer could not be allocated.
    #[error("Échec d'allocation : {bytes} octets")]
    AllocationError {
        /// Requested size in bytes.
        bytes: usize,
    },
}

impl ConvertError {
    /// Process exit code for this error.
    ///
    /// Validation codes 1–4 keep the historical numbering of the
    /// converter (compression, bit depth, width, height).
    ///
    /// # Example
    /// ```
    /// use ab_core::error::{ConvertError, UnsupportedReason};
    /// let err = ConvertError::from(UnsupportedReason::UnsupportedBitDepth(8));
    /// assert_eq!(err.exit_code(), 2);
    /// ```
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Unsupported(reason) => match reason {
                UnsupportedReason::UnsupportedCompression(_) => 1,
                UnsupportedReason::UnsupportedBitDepth(_) => 2,
                UnsupportedReason::WidthTooLarge { .. } => 3,
                UnsupportedReason::HeightTooLarge { .. } => 4,
                UnsupportedReason::InvalidHeight => 5,
                UnsupportedReason::InvalidWidth(_) => 6,
            },
            Self::Parse(ParseError::Truncated) => 7,
            Self::AllocationError { .. } => 8,
            Self::Parse(ParseError::Io(_)) => 9,
        }
    }

    /// `true` if the input was cut short.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Parse(ParseError::Truncated))
    }
}
