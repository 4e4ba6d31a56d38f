use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use recommender::config::{Config, MAX_TOP_K, MIN_TOP_K};

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Recommend assessments for a job description or skill", long_about = None)]
struct Cli {
    /// Config file (default: ./recommender.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend assessments for a single query
    Query {
        /// Job description, skill, or role
        text: String,

        /// Number of recommendations (1-10, default from config)
        #[arg(short = 'k', long = "top-k", value_parser = top_k_in_range)]
        top_k: Option<usize>,

        /// Export results as CSV (optionally to PATH)
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        export: Option<Option<PathBuf>>,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Query repeatedly from an interactive prompt
    Interactive {
        /// Initial number of recommendations (1-10, default from config)
        #[arg(short = 'k', long = "top-k", value_parser = top_k_in_range)]
        top_k: Option<usize>,
    },

    /// Show a catalog record by row id
    Show {
        /// 0-based catalog row
        id: usize,
    },

    /// List test-type codes and their labels
    Types {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Load catalog, index and model and report on them
    Check {
        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn top_k_in_range(raw: &str) -> Result<usize, String> {
    let k: usize = raw.parse().map_err(|_| format!("not a number: {}", raw))?;
    if (MIN_TOP_K..=MAX_TOP_K).contains(&k) {
        Ok(k)
    } else {
        Err(format!("must be between {} and {}", MIN_TOP_K, MAX_TOP_K))
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = match verbose {
        0 => "warn,recommender=info,recommend=info",
        1 => "info,recommender=debug,recommend=debug",
        _ => "debug,recommender=trace,recommend=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // One line: the outermost context followed by its causes
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load(path).context("Failed to load")
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Query {
            text,
            top_k,
            export,
            json,
        } => {
            let config = load_config(config_path)?;
            commands::query::execute(&config, &text, top_k, export, json)?;
        }
        Commands::Interactive { top_k } => {
            let config = load_config(config_path)?;
            commands::interactive::execute(&config, top_k)?;
        }
        Commands::Show { id } => {
            let config = load_config(config_path)?;
            commands::show::execute(&config, id)?;
        }
        // Listing codes needs no config or artifacts
        Commands::Types { json } => {
            commands::types::execute(json)?;
        }
        Commands::Check { json } => {
            let config = load_config(config_path)?;
            commands::check::execute(&config, json)?;
        }
    }

    Ok(())
}
