//! Touchless CLI: drive the OS pointer with hand or face gestures.
//!
//! Usage:
//!   touchless run [OPTIONS]       Apply gestures from a landmark stream
//!   touchless replay <PATH>       Print the actions a recorded stream produces
//!   touchless check               Check pointer backend availability
//!   touchless config [--init]     Show or initialize the configuration

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use touchless_common::config::{config_file_path, AppConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "touchless",
    about = "Hands-free pointer control from hand and face landmarks",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the standard location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Which gesture engine interprets the landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GestureMode {
    /// Two hands: right moves, pinches, drags; left scrolls and pauses
    Hand,
    /// Face: nose steers, blink clicks
    Face,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive the pointer from a live landmark stream
    ///
    /// Ctrl+C stops after the next frame arrives; press it again to exit
    /// immediately when the stream is idle.
    Run {
        /// Gesture engine
        #[arg(short, long, value_enum, default_value = "hand")]
        mode: GestureMode,

        /// JSONL landmark stream, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Record the incoming frames to a JSONL file
        #[arg(long)]
        record: Option<PathBuf>,

        /// Log pointer actions instead of performing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the action stream of a recorded session as JSONL
    Replay {
        /// Path to the recorded stream
        path: PathBuf,

        /// Gesture engine
        #[arg(short, long, value_enum, default_value = "hand")]
        mode: GestureMode,
    },

    /// Check pointer backend availability
    Check,

    /// Print the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => Ok(AppConfig::load_from(path)?),
        None => Ok(AppConfig::load()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.command {
        // `config --init` must work even when the current file is broken.
        Commands::Config { init: true, .. } => AppConfig::default(),
        _ => load_config(cli.config.as_deref())?,
    };

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    touchless_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Run {
            mode,
            input,
            record,
            dry_run,
        } => commands::run::run(config, mode, input, record, dry_run).await,
        Commands::Replay { path, mode } => commands::replay::run(&config, path, mode),
        Commands::Check => commands::check::run(&config, cli.config.as_deref()),
        Commands::Config { init, force } => {
            let path = cli.config.unwrap_or_else(config_file_path);
            commands::config::run(&config, &path, init, force)
        }
    }
}
