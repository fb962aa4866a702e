//! # enrich-find CLI
//!
//! Wraps the skill search command and prints each hit with a description.
//!
//! ## Usage
//!
//! ```bash
//! enrich-find "<query>" [--max N] [--timeout N] [--concurrency N] [--no-fetch]
//! ```
//!
//! ## Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Report printed (including `No skills found.` and undescribed hits) |
//! | 1 | Search command missing or failed, or invalid config file |
//! | 2 | Invalid command-line options |
//!
//! Logs go to stderr; `-v` enables debug output and `RUST_LOG` overrides it.

use clap::Parser;
use enrich_find::config::{self, Config, EnrichmentConfig};
use enrich_find::enrich_cmd::{run_enrich, OutputFormat};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Search for skills and fetch a short description for each result.
#[derive(Parser)]
#[command(name = "enrich-find", version)]
struct Cli {
    /// The search query passed to the skill search command.
    query: String,

    /// Maximum number of search hits to enrich (default 10).
    #[arg(long = "max", value_parser = parse_positive::<usize>)]
    max_results: Option<usize>,

    /// Per-fetch timeout in seconds, covering all redirect hops (default 10).
    #[arg(long, value_parser = parse_positive::<u64>)]
    timeout: Option<u64>,

    /// Maximum number of descriptions fetched at the same time (default 5).
    #[arg(long, value_parser = parse_positive::<usize>)]
    concurrency: Option<usize>,

    /// Skip fetching descriptions and print the raw matches only.
    #[arg(long)]
    no_fetch: bool,

    /// Print results as a JSON array instead of text.
    #[arg(long)]
    json: bool,

    /// Path to an optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

/// Parse a strictly positive number for count and timeout flags.
fn parse_positive<T>(s: &str) -> Result<T, String>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let value: T = s
        .parse()
        .map_err(|e| format!("invalid number '{}': {}", s, e))?;
    if value == T::default() {
        return Err("must be greater than zero".to_string());
    }
    Ok(value)
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };

    let enrichment = EnrichmentConfig::from_overrides(
        &cfg.enrich,
        cli.max_results,
        cli.timeout,
        cli.concurrency,
        cli.no_fetch,
    );
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let bold = !cli.json && atty::is(atty::Stream::Stdout);

    let report = run_enrich(&cfg, &cli.query, &enrichment, format, bold).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(report.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
