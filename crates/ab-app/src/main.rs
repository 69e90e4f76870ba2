use std::process::ExitCode;

use clap::Parser;

pub mod cli;
pub mod pipeline;

/// Exit code for failures outside the conversion itself (config, files, CLI).
const EXIT_APP_ERROR: u8 = 10;

fn main() -> ExitCode {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Convertir
    match pipeline::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Erreur : {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Map a pipeline error to the process exit code.
fn exit_code(e: &anyhow::Error) -> u8 {
    e.downcast_ref::<pipeline::Rejected>()
        .map_or(EXIT_APP_ERROR, |r| r.source.exit_code())
}
