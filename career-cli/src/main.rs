//! make-career
//!
//! Scans a song library and writes `_generated_career_.json` at its root.

mod config;
mod export;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use career_core::ScanOptions;
use config::Config;

/// Exit status for missing or invalid arguments
const USAGE_EXIT_CODE: i32 = 5;

#[derive(Parser, Debug)]
#[command(name = "make-career")]
#[command(about = "Build a career file for a song library")]
#[command(version)]
struct Cli {
    /// Library root folder
    root: PathBuf,

    /// Also write the legacy _generated_career_.ini
    #[arg(long)]
    legacy: bool,

    /// Career name (default: library folder name)
    #[arg(long)]
    name: Option<String>,

    /// Career subtitle
    #[arg(long)]
    subtitle: Option<String>,

    /// Career icon reference
    #[arg(long)]
    icon: Option<String>,

    /// Career theme reference
    #[arg(long)]
    theme: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(USAGE_EXIT_CODE);
            }
        },
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let root = fs::canonicalize(&cli.root)
        .with_context(|| format!("Cannot open library root {:?}", cli.root))?;

    let config = Config {
        root,
        legacy: cli.legacy,
        scan: ScanOptions {
            name: cli.name,
            subtitle: cli.subtitle,
            icon: cli.icon,
            theme: cli.theme,
        },
    };

    info!("Scanning library {:?}", config.root);
    let career = career_core::load_folder(&config.root, &config.scan)
        .with_context(|| format!("Scan of {:?} failed", config.root))?;

    let written = export::export_career(&career, &config)?;
    info!(
        "Career complete: {} tiers, {} songs, {} file(s) written",
        career.tiers.len(),
        career.song_count(),
        written.len()
    );

    Ok(())
}
