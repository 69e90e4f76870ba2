//! BMP input for bmpscii: header parsing, validation, pixel region reading.

pub mod bytes;
pub mod header;
pub mod pixels;
pub mod validate;

pub use header::{BitmapHeader, describe, parse};
pub use pixels::{PixelBuffer, read_pixels, row_stride};
pub use validate::{validate, validate_with};
