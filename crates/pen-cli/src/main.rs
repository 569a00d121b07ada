mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::Level;

use crate::config::{Config, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "pen")]
#[command(version, about = "Pen - file-based route compiler", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// App directory to scan (overrides pen.toml)
    #[arg(long, global = true)]
    app_dir: Option<PathBuf>,

    /// Output directory (overrides pen.toml)
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    /// Config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the route manifest and generated routes module
    Build,

    /// List every route with its resolved layouts and boundaries
    Routes,

    /// Match a URL and print its composed element tree
    Match {
        /// URL to match, e.g. /blog or /blog/
        url: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.global.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            commands::report_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(&cli.global.config)?
        .with_overrides(cli.global.app_dir, cli.global.out_dir);

    match cli.command {
        Commands::Build => commands::build::execute(&config.build),
        Commands::Routes => commands::routes::execute(&config.build),
        Commands::Match { url } => commands::match_url::execute(&config.build, &url),
    }
}
