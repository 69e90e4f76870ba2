//! Configuration, types, and shared structures for bmpscii.
//!
//! This crate contains the error taxonomy, the conversion configuration,
//! the glyph ramp and the frame/canvas types shared across the workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;

pub use charset::GlyphRamp;
pub use config::{RenderConfig, RowDecimation, SizeLimits};
pub use error::{ConvertError, ParseError, UnsupportedReason};
pub use frame::{AsciiCanvas, GreyFrame};
