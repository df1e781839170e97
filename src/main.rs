//! seo-crawl main entry point
//!
//! This is the command-line interface for the seo-crawl site auditor.

use anyhow::Context;
use clap::Parser;
use seo_crawl::config::{load_config, validate, Config};
use seo_crawl::crawler::{Coordinator, HttpFetcher, SitemapSeeder};
use seo_crawl::output::{generate_markdown_summary, CrawlStatistics, Report};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// seo-crawl: a site crawler for SEO audits
///
/// seo-crawl walks every same-site page reachable from a seed URL, counts
/// visible words, reads titles and meta descriptions, and reports pages
/// that serve identical content. The JSON report is written to stdout.
#[derive(Parser, Debug)]
#[command(name = "seo-crawl")]
#[command(version)]
#[command(about = "A site crawler for SEO audits", long_about = None)]
struct Cli {
    /// Seed URL; its host defines the site being audited
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Additional seed URL (repeatable; off-site seeds are ignored)
    #[arg(long = "seed", value_name = "URL")]
    seeds: Vec<String>,

    /// Sitemap whose <loc> entries are added as seeds
    #[arg(long, value_name = "URL")]
    sitemap: Option<String>,

    /// Stop after this many pages
    #[arg(long)]
    max_pages: Option<usize>,

    /// Do not follow links deeper than this many hops from a seed
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum pages analyzed at once
    #[arg(long)]
    concurrency: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Analyze the seeds only
    #[arg(long)]
    no_follow: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Also write a markdown summary to this file
    #[arg(long, value_name = "FILE")]
    markdown: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let started = Instant::now();

    let fetcher = Arc::new(HttpFetcher::new(&config).context("Failed to build HTTP client")?);

    let mut seeds = cli.seeds.clone();
    if let Some(sitemap) = &cli.sitemap {
        let seeder = SitemapSeeder::new(fetcher.clone());
        seeds.extend(seeder.seed(sitemap).await);
    }

    let coordinator = match Coordinator::new(config, fetcher, &cli.url) {
        Ok(c) => c.with_extra_seeds(&seeds),
        Err(e) => {
            tracing::error!("Cannot crawl {}: {}", cli.url, e);
            let report = Report::failed(e.to_string(), started.elapsed());
            print_report(&report, cli.pretty)?;
            return Err(e.into());
        }
    };

    let outcome = coordinator.run().await;
    let report = Report::build(&outcome.pages, &outcome.fingerprint_index, started.elapsed());

    CrawlStatistics::from_outcome(&outcome).log();

    if let Some(path) = &cli.markdown {
        generate_markdown_summary(&outcome, &report, path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        tracing::info!("Summary written to {}", path.display());
    }

    print_report(&report, cli.pretty)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_crawl=info,warn"),
            1 => EnvFilter::new("seo_crawl=debug,info"),
            2 => EnvFilter::new("seo_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let crawler = &mut config.crawler;
    if cli.max_pages.is_some() {
        crawler.max_pages = cli.max_pages;
    }
    if cli.max_depth.is_some() {
        crawler.max_depth = cli.max_depth;
    }
    if let Some(concurrency) = cli.concurrency {
        crawler.max_concurrent_pages_open = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        crawler.request_timeout_secs = timeout;
    }
    if cli.no_follow {
        crawler.follow_links = false;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

fn print_report(report: &Report, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };
    println!("{}", json);
    Ok(())
}
