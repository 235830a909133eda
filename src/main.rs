//! Weibo-Harvest main entry point

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use weibo_harvest::config::{load_config_with_hash, Config};
use weibo_harvest::crawler::crawl;

/// Weibo-Harvest: a mobile-weibo record harvester
///
/// Starts from the configured seed user ids and harvests profiles, posts,
/// comments and follow/fan edges into a SQLite database.
#[derive(Parser, Debug)]
#[command(name = "weibo-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A mobile-weibo record harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the crawl plan without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        print_plan(&config);
        return Ok(());
    }

    let stats = crawl(config).await?;
    println!(
        "Crawl finished: {} pages fetched ({} failed), {} records emitted, {} tasks scheduled",
        stats.pages_fetched, stats.pages_failed, stats.records_emitted, stats.tasks_scheduled
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("weibo_harvest=info,warn"),
            1 => EnvFilter::new("weibo_harvest=debug,info"),
            2 => EnvFilter::new("weibo_harvest=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn print_plan(config: &Config) {
    println!("=== Weibo-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!("\nSeed users ({}):", config.crawler.seeds.len());
    for seed in &config.crawler.seeds {
        println!("  - {}/{}/info", config.crawler.base_url, seed);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling from {} seed users",
        config.crawler.seeds.len()
    );
}
