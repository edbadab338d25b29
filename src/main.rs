//! Pin-Harvest main entry point
//!
//! This is the command-line interface for the Pin-Harvest crawler.

use anyhow::Context;
use clap::Parser;
use pin_harvest::config::{load_config, validate, Config};
use pin_harvest::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pin-Harvest: a resumable board and pin crawler
///
/// Starts from a board or a single pin, records the primary image of every
/// pin it visits and follows recommended pins up to a depth budget. Progress
/// is kept in SQLite, so running the same command again resumes the crawl.
#[derive(Parser, Debug)]
#[command(name = "pin-harvest")]
#[command(version)]
#[command(about = "A resumable board and pin crawler", long_about = None)]
struct Cli {
    /// Board or pin URL to start from
    #[arg(long, required_unless_present = "stats")]
    url: Option<String>,

    /// Netscape cookie file with session cookies [default: cookies.txt]
    #[arg(long, value_name = "PATH")]
    cookies: Option<PathBuf>,

    /// SQLite database holding crawl progress [default: pinterest.db]
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Requests per second, floored at 0.1 [default: 1]
    #[arg(long)]
    rps: Option<f64>,

    /// Number of processed pins after which recommendations stop being followed [default: 1]
    #[arg(long)]
    depth: Option<u32>,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "url")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    if cli.stats {
        handle_stats(&config)
    } else if let Some(url) = cli.url.as_deref() {
        handle_crawl(&config, url).await
    } else {
        anyhow::bail!("--url is required unless --stats is given")
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pin_harvest=info,warn"),
            1 => EnvFilter::new("pin_harvest=debug,info"),
            2 => EnvFilter::new("pin_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if given and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(cookies) = &cli.cookies {
        config.output.cookies_path = cookies.display().to_string();
    }
    if let Some(db) = &cli.db {
        config.output.database_path = db.display().to_string();
    }
    if let Some(rps) = cli.rps {
        config.crawler.requests_per_second = rps;
    }
    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    use pin_harvest::output::{load_statistics, print_statistics};
    use pin_harvest::storage::open_storage;
    use std::path::Path;

    println!("Database: {}\n", config.output.database_path);

    let storage = open_storage(Path::new(&config.output.database_path))
        .with_context(|| format!("Failed to open {}", config.output.database_path))?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, url: &str) -> anyhow::Result<()> {
    use pin_harvest::output::print_report;

    tracing::info!(
        "Depth budget: {}, rate: {:.2} requests/sec, database: {}",
        config.crawler.max_depth,
        config.crawler.effective_rps(),
        config.output.database_path
    );

    match crawl(config, url).await {
        Ok(report) => {
            if report.pins_processed + report.pins_failed == 0 {
                tracing::warn!("No pins were processed");
            }
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
