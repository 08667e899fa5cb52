//! kbgauge CLI entry point.
//!
//! Commands:
//! - `score`     Score a knowledge-base snapshot against a vertical catalog
//! - `truncate`  Fit a snapshot into a plan's prompt budget
//! - `classify`  Check text for placeholder or generic content
//! - `plans`     List plans and their knowledge-base budgets
//! - `catalog`   Show the fields scored for a vertical
//! - `config`    Show, validate or initialise configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "kbgauge",
    about = "Knowledge-base quality scoring and prompt budget truncation",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.kbgauge/config.toml
    #[arg(short, long, global = true, env = "KBGAUGE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a snapshot (JSON file, or `-` for stdin)
    Score {
        snapshot: PathBuf,

        /// Business vertical (general, restaurant, clinic, retail)
        #[arg(long)]
        vertical: Option<String>,

        /// Custom field catalog (TOML) instead of a built-in vertical
        #[arg(long, conflicts_with = "vertical")]
        catalog: Option<PathBuf>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Truncate a snapshot to a plan's token budget
    Truncate {
        snapshot: PathBuf,

        /// Plan id (defaults to the configured default plan)
        #[arg(short, long)]
        plan: Option<String>,

        /// Print the prompt sections that survive
        #[arg(long)]
        render: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify one or more texts
    Classify {
        #[arg(required = true)]
        texts: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// List plans and budgets
    Plans,

    /// Show the field catalog of a vertical
    Catalog {
        #[arg(long)]
        vertical: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Validate the configuration
    Validate,
    /// Print the config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Score {
            snapshot,
            vertical,
            catalog,
            json,
        } => {
            commands::score::run(config_path, &snapshot, vertical, catalog.as_deref(), json).await?
        }
        Commands::Truncate {
            snapshot,
            plan,
            render,
            json,
        } => commands::truncate::run(config_path, &snapshot, plan, render, json).await?,
        Commands::Classify { texts, json } => commands::classify::run(config_path, &texts, json)?,
        Commands::Plans => commands::plans::run(config_path)?,
        Commands::Catalog { vertical, json } => commands::catalog::run(config_path, vertical, json)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(config_path)?,
            ConfigAction::Validate => commands::config_cmd::validate(config_path)?,
            ConfigAction::Path => commands::config_cmd::path(config_path)?,
            ConfigAction::Init { force } => commands::config_cmd::init(config_path, force).await?,
        },
    }

    Ok(())
}
