use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Largeur cible par défaut (glyphes).
pub const DEFAULT_TARGET_WIDTH: u32 = 200;
/// Hauteur cible par défaut (lignes avant décimation).
pub const DEFAULT_TARGET_HEIGHT: u32 = 200;
/// Largeur source maximale acceptée.
pub const DEFAULT_MAX_WIDTH: i32 = 2000;
/// Hauteur source maximale acceptée.
pub const DEFAULT_MAX_HEIGHT: i32 = 2000;

/// Configuration complète d'une conversion.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use ab_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!(config.target_width, 200);
/// assert_eq!(config.limits.max_width, 2000);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RenderConfig {
    /// Bounding box width of the resampled image.
    pub target_width: u32,
    /// Bounding box height of the resampled image.
    pub target_height: u32,
    /// Glyph ramp, darkest → lightest.
    pub ramp: String,
    /// Which resampled rows end up in the canvas.
    pub row_decimation: RowDecimation,
    /// Source dimension limits enforced by the validator.
    pub limits: SizeLimits,
}

/// Row emission policy.
///
/// Terminal cells are roughly twice as tall as wide, so by default only
/// every other resampled row is emitted. This is an aesthetic policy, not a
/// property of the image; fonts with square cells want [`RowDecimation::None`].
///
/// # Example
/// ```
/// use ab_core::config::RowDecimation;
/// assert!(RowDecimation::Odd.keeps(1));
/// assert!(!RowDecimation::Odd.keeps(2));
/// assert!(RowDecimation::None.keeps(2));
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum RowDecimation {
    /// Keep odd-indexed rows only (1, 3, 5, …).
    #[default]
    Odd,
    /// Keep every row.
    None,
}

impl RowDecimation {
    /// Whether destination row `i` is emitted.
    #[inline(always)]
    #[must_use]
    pub fn keeps(self, i: usize) -> bool {
        match self {
            Self::Odd => i & 1 == 1,
            Self::None => true,
        }
    }
}

/// Source dimension limits.
///
/// # Example
/// ```
/// use ab_core::config::SizeLimits;
/// let limits = SizeLimits::default();
/// assert_eq!((limits.max_width, limits.max_height), (2000, 2000));
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SizeLimits {
    /// Maximum accepted width.
    pub max_width: i32,
    /// Maximum accepted height (compared signed).
    pub max_height: i32,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            target_height: DEFAULT_TARGET_HEIGHT,
            ramp: crate::charset::CHARSET_DEFAULT.to_string(),
            row_decimation: RowDecimation::Odd,
            limits: SizeLimits::default(),
        }
    }
}

impl RenderConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.target_width = self.target_width.clamp(1, 2000);
        self.target_height = self.target_height.clamp(1, 2000);
        self.limits.max_width = self.limits.max_width.clamp(1, 65535);
        self.limits.max_height = self.limits.max_height.clamp(1, 65535);
        if self.ramp.chars().count() < 2 {
            log::warn!("Rampe '{}' trop courte, utilisation du défaut.", self.ramp);
            self.ramp = crate::charset::CHARSET_DEFAULT.to_string();
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
    limits: Option<LimitsSection>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    target_width: Option<u32>,
    target_height: Option<u32>,
    ramp: Option<String>,
    row_decimation: Option<RowDecimation>,
}

/// Limits section of the TOML config, all fields optional.
#[derive(Deserialize)]
struct LimitsSection {
    max_width: Option<i32>,
    max_height: Option<i32>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ab_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use ab_core::config::parse_config;
/// let config = parse_config("[render]\ntarget_width = 80\n").unwrap();
/// assert_eq!(config.target_width, 80);
/// assert_eq!(config.target_height, 200);
/// ```
pub fn parse_config(content: &str) -> Result<RenderConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = RenderConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.target_width {
            config.target_width = v;
        }
        if let Some(v) = r.target_height {
            config.target_height = v;
        }
        if let Some(v) = r.ramp {
            config.ramp = v;
        }
        if let Some(v) = r.row_decimation {
            config.row_decimation = v;
        }
    }

    if let Some(l) = file.limits {
        if let Some(v) = l.max_width {
            config.limits.max_width = v;
        }
        if let Some(v) = l.max_height {
            config.limits.max_height = v;
        }
    }

    config.clamp_all();
    Ok(config)
}
