//! Interactive patron registry entry point.
//!
//! # Responsibility
//! - Parse command-line configuration and start logging.
//! - Optionally preload patrons from an import file.
//! - Run the interactive menu over stdin/stdout.

mod menu;
mod render;
mod shell;

use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_LOG_SUBDIR: &str = "patron-registry/logs";

#[derive(Debug, Parser)]
#[command(name = "patron-registry", version, about = "Interactive library patron registry")]
struct Cli {
    /// Log level: trace|debug|info|warn|error.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
    /// `id-name-address-fine` file imported before the menu starts.
    #[arg(long, value_name = "FILE")]
    import: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or_else(|| patron_core::default_log_level());
    let log_dir = cli
        .log_dir
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_SUBDIR));
    if let Err(err) = patron_core::init_logging(level, &log_dir.to_string_lossy()) {
        eprintln!("Warning! Logging disabled: {err}");
    }
    info!("event=cli_start module=cli status=ok version={}", patron_core::core_version());

    let mut controller = patron_core::new_registry();
    if let Some(path) = cli.import {
        let count = controller.import_from_file(&path);
        println!("{count} patrons imported from {}.", path.display());
    }

    let stdin = std::io::stdin();
    match shell::run(&mut controller, stdin.lock(), std::io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            warn!("event=cli_exit module=cli status=error error=\"{}\"", err);
            eprintln!("I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
