mod commands;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use sitemap_kit_validator::RecordKind;
use std::io;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "sitemap-kit")]
#[command(version, about = "Sitemap and robots.txt generator for the villa booking site", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Write a starter site.toml
    Init {
        /// Site directory to write site.toml into (must exist)
        path: PathBuf,

        /// Public site origin, e.g. https://example.com
        #[arg(long)]
        site_url: Option<String>,

        /// Backend API origin, e.g. https://api.example.com
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Validate site configuration
    Validate {
        /// Path to site directory
        path: PathBuf,
    },

    /// Check villa or user records (JSON) against their schema
    Check {
        /// JSON file with one record or an array of records
        file: PathBuf,

        /// Schema to check against
        #[arg(short, long, value_enum)]
        kind: Kind,
    },

    /// Fetch villas and posts and write sitemap files
    Generate {
        /// Path to site directory
        path: PathBuf,

        /// Output directory for sitemap files
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Serve generated files locally together with the booking proxy
    Serve {
        /// Path to site directory
        path: PathBuf,

        /// Directory holding generated files
        #[arg(short, long)]
        output: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Villa,
    User,
}

impl From<Kind> for RecordKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Villa => RecordKind::Villa,
            Kind::User => RecordKind::User,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .compact()
        .init();

    match cli.command {
        Command::Init {
            path,
            site_url,
            api_url,
        } => commands::init::run(path, site_url, api_url).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Check { file, kind } => commands::check::run(file, kind.into()).await,
        Command::Generate { path, output } => commands::generate::run(path, output).await,
        Command::Serve { path, output, port } => commands::serve::run(path, output, port).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "sitemap-kit", &mut io::stdout());
            Ok(())
        }
    }
}
