use std::path::PathBuf;

use clap::Parser;

/// bmpscii — convertit un BMP 24 bits en art ASCII.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image d'entrée : BMP 24 bits non compressé, 2000×2000 max.
    #[arg(default_value = "input_image.bmp")]
    pub input: PathBuf,

    /// Fichier texte de sortie (créé seulement si la conversion réussit).
    #[arg(short, long, default_value = "ascii_art_out.txt")]
    pub output: PathBuf,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Largeur cible (remplace la config).
    #[arg(long)]
    pub width: Option<u32>,

    /// Hauteur cible avant décimation (remplace la config).
    #[arg(long)]
    pub height: Option<u32>,

    /// Rampe de glyphes, du plus sombre au plus clair (remplace la config).
    #[arg(long)]
    pub ramp: Option<String>,

    /// Émettre toutes les lignes au lieu d'une sur deux.
    #[arg(long, default_value_t = false)]
    pub all_rows: bool,

    /// Ne pas afficher l'art ASCII sur la sortie standard.
    #[arg(long, default_value_t = false)]
    pub no_echo: bool,

    /// Afficher uniquement l'en-tête et le verdict de validation.
    #[arg(long, default_value_t = false)]
    pub header_only: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Refuse an output path that would overwrite the input image.
    ///
    /// # Errors
    /// Returns an error if input and output name the same path.
    pub fn validate_paths(&self) -> anyhow::Result<()> {
        if self.input == self.output {
            anyhow::bail!(
                "La sortie écraserait l'image d'entrée : {}",
                self.input.display()
            );
        }
        Ok(())
    }
}
