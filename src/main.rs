//! Nhadat-Harvest command-line entry point
//!
//! Two-stage harvester: `--links` discovers item URLs from paginated
//! listing pages, `--details` extracts property records from those
//! URLs. With neither flag both stages run in sequence.

use anyhow::bail;
use clap::Parser;
use nhadat_harvest::config::load_config_with_hash;
use nhadat_harvest::run::{
    install_interrupt_handler, run_detail_extraction, run_link_discovery, Shutdown,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// A polite two-stage real-estate listing harvester
#[derive(Parser, Debug)]
#[command(name = "nhadat-harvest")]
#[command(version)]
#[command(about = "Polite two-stage harvester for real-estate listings", long_about = None)]
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

    /// Run only link discovery (stage one)
    #[arg(long, conflicts_with = "details")]
    links: bool,

    /// Run only detail extraction (stage two)
    #[arg(long, conflicts_with = "links")]
    details: bool,

    /// Override the configured first listing page
    #[arg(long, value_name = "N")]
    start_page: Option<u32>,

    /// Override the configured last listing page
    #[arg(long, value_name = "N")]
    end_page: Option<u32>,

    /// Override the configured retry budget per fetch cycle
    #[arg(long, value_name = "N")]
    max_retries: Option<u32>,

    /// Validate config and show what would be harvested without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // CLI overrides on top of the file
    if let Some(start) = cli.start_page {
        config.crawl.start_page = start;
    }
    if let Some(end) = cli.end_page {
        config.crawl.end_page = end;
    }
    if let Some(retries) = cli.max_retries {
        config.fetch.max_retries = retries;
    }
    if config.crawl.start_page < 1 || config.crawl.end_page < config.crawl.start_page {
        bail!(
            "invalid page range {}..{}",
            config.crawl.start_page,
            config.crawl.end_page
        );
    }

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    let shutdown = Shutdown::new();
    install_interrupt_handler(shutdown.clone());

    let run_links = cli.links || !cli.details;
    let run_details = cli.details || !cli.links;

    if run_links {
        let outcome = run_link_discovery(&config, shutdown.clone()).await?;
        println!(
            "Discovery {}: {} page(s) visited, {} link(s) saved to {}",
            if outcome.interrupted {
                "interrupted"
            } else {
                "complete"
            },
            outcome.pages_visited,
            outcome.links_appended,
            config.output.links_path
        );
        if outcome.interrupted {
            return Ok(());
        }
    }

    if run_details {
        let outcome = run_detail_extraction(&config, shutdown).await?;
        println!(
            "Extraction {}: {} record(s) saved to {}",
            if outcome.interrupted {
                "interrupted"
            } else {
                "complete"
            },
            outcome.records_persisted,
            config.output.details_path
        );
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("nhadat_harvest=info,warn"),
            1 => EnvFilter::new("nhadat_harvest=debug,info"),
            2 => EnvFilter::new("nhadat_harvest=trace,debug"),
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

/// Shows what a run would do, without touching the network
fn print_dry_run(config: &nhadat_harvest::Config) {
    println!("=== Nhadat-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Listing template: {}", config.site.listing_url_template);
    println!("  Item marker: {}", config.site.item_marker);
    println!("  First page URL: {}", config.listing_url(config.crawl.start_page));

    println!("\nCrawl:");
    println!(
        "  Pages: {}..={} (inclusive)",
        config.crawl.start_page, config.crawl.end_page
    );
    println!("  Empty-page threshold: {}", config.crawl.empty_page_threshold);

    println!("\nFetch:");
    println!("  Max retries per cycle: {}", config.fetch.max_retries);
    println!("  Readiness timeout: {}s", config.fetch.ready_timeout_secs);

    println!("\nPacing (seconds):");
    println!(
        "  Listing fetch: {}..{}",
        config.pacing.listing_fetch.min_secs, config.pacing.listing_fetch.max_secs
    );
    println!(
        "  Item fetch: {}..{}",
        config.pacing.item_fetch.min_secs, config.pacing.item_fetch.max_secs
    );
    println!(
        "  Page pause: {}..{}",
        config.pacing.page_pause.min_secs, config.pacing.page_pause.max_secs
    );

    println!("\nOutput:");
    println!("  Links: {}", config.output.links_path);
    println!("  Details: {}", config.output.details_path);

    println!("\n✓ Configuration is valid");
}
