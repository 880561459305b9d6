use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ledgerlens_finance::{AdvisoryClient, compute_metrics};
use ledgerlens_ingest::{Source, extract};

mod config;
mod report;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "ledgerlens",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LEDGERLENS_BUILD_SHA"), ")"),
    about = "Normalize financial records and summarize income, spending and outliers"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.ledgerlens/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from a file or sentence and print the financial summary
    Analyze {
        /// CSV, Excel (.xlsx/.xls/.ods), PDF, or .txt file
        #[arg(conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Free text, e.g. "I spent $120 on flight tickets and $80 on hotel."
        #[arg(long)]
        text: Option<String>,

        /// Print the metrics as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Rows of parsed data to show (default from config)
        #[arg(long)]
        preview: Option<usize>,

        /// Ask the configured advisory backend for suggestions
        #[arg(long)]
        advise: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config to ~/.ledgerlens/config.toml
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Command::Analyze {
            file,
            text,
            json,
            preview,
            advise,
        } => {
            let cfg = config::load_config(cli.config.as_deref())?;

            let source = match (file, text) {
                (Some(path), _) => Source::from_path(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                (None, Some(text)) if !text.trim().is_empty() => Source::FreeText(text),
                _ => bail!("Provide a file or --text \"I spent $20 on coffee.\""),
            };

            let txns = extract(&source)?;
            let metrics = compute_metrics(&txns);
            info!(kind = %source.kind(), rows = txns.len(), anomalies = metrics.anomalies.len(), "analysis complete");

            if json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            } else {
                let cur = &cfg.display.currency;
                println!("{}", report::preview(&txns, preview.unwrap_or(cfg.display.preview_rows), cur));
                println!("{}", report::summary(&metrics, cur));
            }

            if advise {
                // Advisory failures are reported but never invalidate the metrics above.
                let advice = match AdvisoryClient::from_settings(&cfg.advisory) {
                    Ok(client) => client.advise(&metrics).await,
                    Err(e) => Err(e),
                };
                match advice {
                    Ok(text) => println!("## AI financial advice\n\n{text}\n"),
                    Err(e) => eprintln!("Advice unavailable: {e}"),
                }
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config(cli.config.as_deref())?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}
