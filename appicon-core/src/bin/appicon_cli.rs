//! AppIcon CLI
//!
//! Commands: sizes, validate, generate, render
//! `sizes` and `validate` output JSON to stdout
//! `generate` prints one `Created: <file>` line per file written

use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use appicon_core::{logging, ExportPipeline, IconSetConfig};

#[derive(Parser)]
#[command(name = "appicon-cli")]
#[command(about = "AppIcon CLI - render the app icon and export an iOS AppIcon.appiconset")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Icon-set config (JSON); the built-in iOS table is used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug detail to stderr (overrides APPICON_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the size table with idiom and filename per entry
    Sizes,

    /// Validate the size table
    Validate,

    /// Write every icon plus Contents.json into an existing directory
    Generate {
        /// Output directory (must already exist)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write a single unscaled render
    Render {
        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Side length in pixels
        #[arg(short, long, default_value_t = 1024)]
        size: u32,
    },
}

fn print_json<T: Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{}", s);
            true
        }
        Err(e) => {
            eprintln!("error: {}", e);
            false
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        logging::level_from_env(LevelFilter::Warn)
    };
    logging::init(level);

    let config = match &cli.config {
        Some(path) => match IconSetConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: failed to load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => IconSetConfig::default(),
    };

    let pipeline = ExportPipeline::with_config(config);

    match cli.command {
        Commands::Sizes => {
            let sizes: Vec<_> = pipeline
                .table()
                .specs()
                .iter()
                .map(|spec| {
                    serde_json::json!({
                        "size": spec.size_label(),
                        "scale": spec.scale_label(),
                        "idiom": spec.idiom(),
                        "filename": spec.filename(),
                        "pixels": spec.pixel_size(),
                    })
                })
                .collect();

            if print_json(&sizes) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }

        Commands::Validate => match pipeline.validate() {
            Ok(result) => {
                if !print_json(&result) {
                    return ExitCode::FAILURE;
                }
                if result.valid {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(2) // Validation failure
                }
            }
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::FAILURE
            }
        },

        Commands::Generate { output } => {
            match pipeline.export(&output, |name| println!("Created: {}", name)) {
                Ok(report) => {
                    log::debug!(
                        "wrote {} files from a {}px master, manifest sha256 {}",
                        report.files.len(),
                        report.master_size,
                        report.manifest_hash
                    );
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Render { output, size } => match pipeline.render_master(&output, size) {
            Ok(()) => {
                println!("Created: {}", output.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}
