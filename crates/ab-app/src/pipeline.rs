use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use ab_bmp::header::{BitmapHeader, describe};
use ab_core::config::{RenderConfig, RowDecimation};
use ab_core::error::ConvertError;
use ab_core::frame::AsciiCanvas;
use anyhow::{Context, Result};
use thiserror::Error;

use crate::cli::Cli;

/// Successful conversion: the parsed header and its rendering.
pub struct Conversion {
    /// Parsed header.
    pub header: BitmapHeader,
    /// Rendered art.
    pub canvas: AsciiCanvas,
}

/// Failed conversion, with whatever header was parsed before the failure.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct Rejected {
    /// `None` if the header itself could not be parsed.
    pub header: Option<BitmapHeader>,
    /// Cause.
    #[source]
    pub source: ConvertError,
}

impl Rejected {
    fn new(header: Option<BitmapHeader>, source: impl Into<ConvertError>) -> Self {
        Self {
            header,
            source: source.into(),
        }
    }
}

/// Parse → validate → read pixels → render, for one input.
///
/// # Errors
/// Returns [`Rejected`] at the first failing stage.
pub fn convert<R: Read>(reader: &mut R, config: &RenderConfig) -> Result<Conversion, Rejected> {
    let header = ab_bmp::header::parse(reader).map_err(|e| Rejected::new(None, e))?;
    ab_bmp::validate::validate_with(&header, &config.limits)
        .map_err(|e| Rejected::new(Some(header), e))?;
    let pixels =
        ab_bmp::pixels::read_pixels(reader, &header).map_err(|e| Rejected::new(Some(header), e))?;
    log::debug!(
        "{} lignes de pixels lues ({} octets par ligne)",
        pixels.rows(),
        pixels.stride()
    );
    let canvas = ab_ascii::render(&header, pixels.as_bytes(), config)
        .map_err(|e| Rejected::new(Some(header), e))?;
    Ok(Conversion { header, canvas })
}

/// Resolve config: `--config` file if present, defaults otherwise, then CLI overrides.
///
/// # Errors
/// Returns an error if the config file exists but cannot be loaded.
pub fn resolve_config(cli: &Cli) -> Result<RenderConfig> {
    let mut config = if cli.config.exists() {
        ab_core::config::load_config(&cli.config)?
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        RenderConfig::default()
    };

    if let Some(w) = cli.width {
        config.target_width = w;
    }
    if let Some(h) = cli.height {
        config.target_height = h;
    }
    if let Some(ref ramp) = cli.ramp {
        config.ramp.clone_from(ramp);
    }
    if cli.all_rows {
        config.row_decimation = RowDecimation::None;
    }
    config.clamp_all();
    Ok(config)
}

/// Write the canvas to `path`, creating or truncating it.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_canvas(path: &Path, canvas: &AsciiCanvas) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Impossible de créer {}", path.display()))?;
    let mut out = BufWriter::new(file);
    canvas
        .write_to(&mut out)
        .and_then(|()| out.flush())
        .with_context(|| format!("Impossible d'écrire {}", path.display()))
}

/// Write header diagnostics, one `name: value` line per field.
///
/// # Errors
/// Propagates any error from the writer.
pub fn print_header<W: Write>(out: &mut W, header: &BitmapHeader) -> io::Result<()> {
    for (name, value) in describe(header) {
        writeln!(out, "{name}: {value}")?;
    }
    Ok(())
}

fn print_header_to_stderr(header: &BitmapHeader) {
    if let Err(e) = print_header(&mut io::stderr().lock(), header) {
        log::warn!("Diagnostics d'en-tête non écrits : {e}");
    }
}

/// Run one CLI invocation end to end.
///
/// The output file is only touched after a successful render.
///
/// # Errors
/// [`Rejected`] (wrapped in `anyhow`) for conversion failures, plain
/// `anyhow` errors for config and file problems.
pub fn run(cli: &Cli) -> Result<()> {
    cli.validate_paths()?;
    let config = resolve_config(cli)?;
    let input = open_input(&cli.input)?;

    if cli.header_only {
        return inspect(input, &config);
    }

    let conversion = match convert(&mut BufReader::new(input), &config) {
        Ok(c) => c,
        Err(rejected) => {
            if let Some(ref header) = rejected.header {
                print_header_to_stderr(header);
            }
            return Err(rejected).with_context(|| format!("Conversion de {}", cli.input.display()));
        }
    };

    print_header_to_stderr(&conversion.header);
    log::info!(
        "{} lignes de {} glyphes",
        conversion.canvas.len(),
        conversion.canvas.width()
    );

    write_canvas(&cli.output, &conversion.canvas)?;
    if !cli.no_echo {
        let stdout = io::stdout();
        conversion
            .canvas
            .write_to(&mut stdout.lock())
            .context("Écriture sur la sortie standard")?;
    }
    Ok(())
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Impossible d'ouvrir {}", path.display()))
}

fn inspect(input: File, config: &RenderConfig) -> Result<()> {
    let header = ab_bmp::header::parse(&mut BufReader::new(input))
        .map_err(|e| Rejected::new(None, e))?;
    print_header_to_stderr(&header);
    match ab_bmp::validate::validate_with(&header, &config.limits) {
        Ok(()) => {
            eprintln!("Supporté");
            Ok(())
        }
        Err(reason) => Err(Rejected::new(Some(header), reason).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_core::error::{ParseError, UnsupportedReason};
    use clap::Parser;

    /// Minimal BITMAPINFOHEADER file with a solid grey image.
    fn bmp(width: i32, height: i32, bpp: u16, grey: u8) -> Vec<u8> {
        let stride = ab_bmp::pixels::row_stride(width.unsigned_abs());
        let pixel_len = stride * height.unsigned_abs() as usize;
        let mut b = Vec::new();
        b.extend_from_slice(b"BM");
        b.extend_from_slice(&((54 + pixel_len) as u32).to_le_bytes());
        b.extend_from_slice(&[0; 4]);
        b.extend_from_slice(&54u32.to_le_bytes());
        b.extend_from_slice(&40u32.to_le_bytes());
        b.extend_from_slice(&width.to_le_bytes());
        b.extend_from_slice(&height.to_le_bytes());
        b.extend_from_slice(&1u16.to_le_bytes());
        b.extend_from_slice(&bpp.to_le_bytes());
        b.extend_from_slice(&0u32.to_le_bytes());
        b.extend_from_slice(&(pixel_len as u32).to_le_bytes());
        b.extend_from_slice(&[0; 16]);
        for _ in 0..height.unsigned_abs() {
            let start = b.len();
            b.resize(start + width as usize * 3, grey);
            b.resize(start + stride, 0);
        }
        b
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bmpscii").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn converts_white_square() {
        let bytes = bmp(4, 4, 24, 255);
        let conv = convert(&mut bytes.as_slice(), &RenderConfig::default()).unwrap();
        assert_eq!(conv.header.width, 4);
        assert_eq!(conv.canvas.len(), 100);
        assert!(conv.canvas.rows().iter().all(|r| r == &" ".repeat(200)));
    }

    #[test]
    fn header_diagnostics_list_every_field() {
        let bytes = bmp(4, 4, 24, 255);
        let conv = convert(&mut bytes.as_slice(), &RenderConfig::default()).unwrap();
        let mut out = Vec::new();
        print_header(&mut out, &conv.header).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "BMP size (bytes): 102");
        assert_eq!(lines[1], "Pixel data offset: 54");
        assert_eq!(lines[2], "Width: 4");
        assert_eq!(lines[3], "Height: 4");
        assert_eq!(lines[4], "Bits per pixel: 24");
        assert_eq!(lines[5], "Compression: 0");
        assert_eq!(lines[6], "Pixel data size with padding (bytes): 48");
    }

    #[test]
    fn rejection_keeps_parsed_header() {
        let bytes = bmp(4, 4, 8, 0);
        let rejected = convert(&mut bytes.as_slice(), &RenderConfig::default())
            .err()
            .unwrap();
        assert_eq!(rejected.header.map(|h| h.bits_per_pixel), Some(8));
        assert!(matches!(
            rejected.source,
            ConvertError::Unsupported(UnsupportedReason::UnsupportedBitDepth(8))
        ));
    }

    #[test]
    fn truncated_file_has_no_header() {
        let bytes = bmp(4, 4, 24, 0);
        let rejected = convert(&mut &bytes[..10], &RenderConfig::default())
            .err()
            .unwrap();
        assert!(rejected.header.is_none());
        assert!(matches!(rejected.source, ConvertError::Parse(ParseError::Truncated)));
    }

    #[test]
    fn truncated_pixels_are_reported_after_header() {
        let bytes = bmp(4, 4, 24, 0);
        let rejected = convert(&mut &bytes[..60], &RenderConfig::default())
            .err()
            .unwrap();
        assert!(rejected.header.is_some());
        assert!(rejected.source.is_truncated());
    }

    #[test]
    fn run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bmp");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, bmp(8, -4, 24, 0)).unwrap();

        let cli = cli(&[
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-c",
            dir.path().join("none.toml").to_str().unwrap(),
            "--no-echo",
        ]);
        run(&cli).unwrap();

        // 8x4 at scale 25 -> 200x100, 50 odd rows of '@'
        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 50);
        assert!(lines.iter().all(|l| *l == "@".repeat(200)));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn run_does_not_create_output_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bmp");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, bmp(2500, 1, 24, 0)).unwrap();

        let cli = cli(&[
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-c",
            dir.path().join("none.toml").to_str().unwrap(),
            "--no-echo",
        ]);
        let err = run(&cli).unwrap_err();
        let rejected = err.downcast_ref::<Rejected>().unwrap();
        assert_eq!(rejected.source.exit_code(), 3);
        assert!(!output.exists());
    }

    #[test]
    fn config_file_and_cli_overrides_combine() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("bmpscii.toml");
        std::fs::write(&config_path, "[render]\ntarget_width = 40\nramp = \"#.\"\n").unwrap();

        let cli = cli(&["-c", config_path.to_str().unwrap(), "--height", "30", "--all-rows"]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.target_width, 40);
        assert_eq!(config.target_height, 30);
        assert_eq!(config.ramp, "#.");
        assert_eq!(config.row_decimation, RowDecimation::None);
    }

    #[test]
    fn header_only_reports_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bmp");
        std::fs::write(&input, bmp(2, 2, 32, 0)).unwrap();
        let cli = cli(&[input.to_str().unwrap(), "--header-only"]);
        let err = run(&cli).unwrap_err();
        assert_eq!(err.downcast_ref::<Rejected>().unwrap().source.exit_code(), 2);
    }
}
