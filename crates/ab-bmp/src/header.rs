use std::io::{ErrorKind, Read};

use ab_core::error::ParseError;

use crate::bytes::{read_i32_le, read_u8, read_u32_le};

/// Taille fixe du file header BMP.
pub const FILE_HEADER_SIZE: usize = 14;

// Offsets depuis le début du fichier.
const FILE_SIZE_OFFSET: usize = 2;
const PIXEL_DATA_OFFSET_OFFSET: usize = 10;
const WIDTH_OFFSET: usize = 18;
const HEIGHT_OFFSET: usize = 22;
const BPP_OFFSET: usize = 28;
const COMPRESSION_OFFSET: usize = 30;
const PIXEL_DATA_SIZE_OFFSET: usize = 34;

/// Champs utiles du file header et du DIB header.
///
/// # Example
/// ```
/// use ab_bmp::header::BitmapHeader;
/// let header = BitmapHeader { height: -4, ..BitmapHeader::default() };
/// assert_eq!(header.abs_height(), 4);
/// assert!(!header.is_bottom_up());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BitmapHeader {
    /// Declared total file size in bytes.
    pub file_size: u32,
    /// Offset of the first pixel byte from file start.
    pub pixel_data_offset: u32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels. Positive: rows stored bottom-up. Negative: top-down.
    pub height: i32,
    /// Bits per pixel.
    pub bits_per_pixel: u8,
    /// Compression method (0 = none).
    pub compression: u32,
    /// Declared pixel array size, padding included.
    pub pixel_data_size: u32,
}

impl BitmapHeader {
    /// Height without its row-order sign.
    #[inline]
    #[must_use]
    pub fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// `true` for the standard BMP layout (last row stored first).
    #[inline]
    #[must_use]
    pub fn is_bottom_up(&self) -> bool {
        self.height > 0
    }
}

/// Lit le file header puis le DIB header jusqu'à `pixel_data_offset`.
///
/// On success the reader is positioned exactly at `pixel_data_offset`, so
/// the pixel region can be read next without seeking.
///
/// # Errors
/// - [`ParseError::Truncated`] if the input ends early, if
///   `pixel_data_offset < 14`, or if a DIB field lies past `pixel_data_offset`.
/// - [`ParseError::Io`] for any other reader failure.
///
/// # Example
/// ```
/// use ab_bmp::header::parse;
/// use ab_core::error::ParseError;
/// let short = [b'B', b'M', 0, 0, 0, 0, 0, 0, 0, 0];
/// assert!(matches!(parse(&mut &short[..]), Err(ParseError::Truncated)));
/// ```
pub fn parse<R: Read>(reader: &mut R) -> Result<BitmapHeader, ParseError> {
    let mut buf = vec![0u8; FILE_HEADER_SIZE];
    reader.read_exact(&mut buf).map_err(eof_as_truncated)?;

    let file_size = read_u32_le(&buf, FILE_SIZE_OFFSET)?;
    let pixel_data_offset = read_u32_le(&buf, PIXEL_DATA_OFFSET_OFFSET)?;

    let remaining = u64::from(pixel_data_offset)
        .checked_sub(FILE_HEADER_SIZE as u64)
        .ok_or(ParseError::Truncated)?;
    let read = reader.by_ref().take(remaining).read_to_end(&mut buf)?;
    if (read as u64) < remaining {
        return Err(ParseError::Truncated);
    }

    let header = BitmapHeader {
        file_size,
        pixel_data_offset,
        width: read_i32_le(&buf, WIDTH_OFFSET)?,
        height: read_i32_le(&buf, HEIGHT_OFFSET)?,
        bits_per_pixel: read_u8(&buf, BPP_OFFSET)?,
        compression: read_u32_le(&buf, COMPRESSION_OFFSET)?,
        pixel_data_size: read_u32_le(&buf, PIXEL_DATA_SIZE_OFFSET)?,
    };
    log::debug!("En-tête BMP : {header:?}");
    Ok(header)
}

fn eof_as_truncated(e: std::io::Error) -> ParseError {
    if e.kind() == ErrorKind::UnexpectedEof {
        ParseError::Truncated
    } else {
        ParseError::Io(e)
    }
}

/// Human-readable header fields, in display order.
///
/// # Example
/// ```
/// use ab_bmp::header::{describe, BitmapHeader};
/// let fields = describe(&BitmapHeader { width: 4, ..BitmapHeader::default() });
/// assert_eq!(fields[2], ("Width", "4".to_string()));
/// ```
#[must_use]
pub fn describe(header: &BitmapHeader) -> Vec<(&'static str, String)> {
    vec![
        ("BMP size (bytes)", header.file_size.to_string()),
        ("Pixel data offset", header.pixel_data_offset.to_string()),
        ("Width", header.width.to_string()),
        ("Height", header.height.to_string()),
        ("Bits per pixel", header.bits_per_pixel.to_string()),
        ("Compression", header.compression.to_string()),
        ("Pixel data size with padding (bytes)", header.pixel_data_size.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 14-byte file header + 40-byte BITMAPINFOHEADER.
    fn header_bytes(width: i32, height: i32, bpp: u16, compression: u32) -> Vec<u8> {
        let mut b = Vec::with_capacity(54);
        b.extend_from_slice(b"BM");
        b.extend_from_slice(&1234u32.to_le_bytes());
        b.extend_from_slice(&[0; 4]);
        b.extend_from_slice(&54u32.to_le_bytes());
        b.extend_from_slice(&40u32.to_le_bytes());
        b.extend_from_slice(&width.to_le_bytes());
        b.extend_from_slice(&height.to_le_bytes());
        b.extend_from_slice(&1u16.to_le_bytes());
        b.extend_from_slice(&bpp.to_le_bytes());
        b.extend_from_slice(&compression.to_le_bytes());
        b.extend_from_slice(&96u32.to_le_bytes());
        b.extend_from_slice(&[0; 16]);
        b
    }

    #[test]
    fn parses_info_header_fields() {
        let bytes = header_bytes(640, -480, 24, 0);
        let header = parse(&mut bytes.as_slice()).unwrap();
        assert_eq!(
            header,
            BitmapHeader {
                file_size: 1234,
                pixel_data_offset: 54,
                width: 640,
                height: -480,
                bits_per_pixel: 24,
                compression: 0,
                pixel_data_size: 96,
            }
        );
    }

    #[test]
    fn leaves_reader_at_pixel_offset() {
        let mut bytes = header_bytes(1, 1, 24, 0);
        bytes.extend_from_slice(&[9, 8, 7, 0]);
        let mut reader = bytes.as_slice();
        parse(&mut reader).unwrap();
        assert_eq!(reader, &[9, 8, 7, 0]);
    }

    #[test]
    fn ten_byte_file_is_truncated() {
        let bytes = header_bytes(4, 4, 24, 0);
        assert!(matches!(
            parse(&mut &bytes[..10]),
            Err(ParseError::Truncated)
        ));
    }

    #[test]
    fn dib_shorter_than_offset_is_truncated() {
        let bytes = header_bytes(4, 4, 24, 0);
        assert!(matches!(
            parse(&mut &bytes[..40]),
            Err(ParseError::Truncated)
        ));
    }

    #[test]
    fn offset_below_file_header_is_truncated() {
        let mut bytes = header_bytes(4, 4, 24, 0);
        bytes[10..14].copy_from_slice(&10u32.to_le_bytes());
        assert!(matches!(
            parse(&mut bytes.as_slice()),
            Err(ParseError::Truncated)
        ));
    }

    #[test]
    fn offset_inside_dib_fields_is_truncated() {
        // Offset 30 is >= 14 but does not cover compression/size fields.
        let mut bytes = header_bytes(4, 4, 24, 0);
        bytes[10..14].copy_from_slice(&30u32.to_le_bytes());
        assert!(matches!(
            parse(&mut bytes.as_slice()),
            Err(ParseError::Truncated)
        ));
    }

    #[test]
    fn describe_lists_all_fields() {
        let header = parse(&mut header_bytes(3, 2, 24, 0).as_slice()).unwrap();
        let fields = describe(&header);
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[1], ("Pixel data offset", "54".to_string()));
        assert_eq!(fields[4], ("Bits per pixel", "24".to_string()));
    }
}
