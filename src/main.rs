//! CheckLink CLI entry point

use anyhow::Context;
use checklink::config::ClassifierConfig;
use checklink::report::{write_reports, ReportSet};
use checklink::{ContentClassifier, Coordinator, CrawlOptions};
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "checklink",
    version,
    about = "Multi-language website link checker with per-language PDF reports"
)]
struct Cli {
    /// Website URL to analyze
    url: String,

    /// Maximum crawl depth from each language's entry page
    #[arg(long, default_value_t = 2)]
    depth: u32,

    /// Delay between requests, in seconds
    #[arg(long, default_value_t = 1.0)]
    delay: f64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Directory where PDF reports are written
    #[arg(short, long, default_value = "reports")]
    output_dir: PathBuf,

    /// API key enabling AI-backed content analysis
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_key: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("off")
    } else {
        let level = match verbose {
            0 => "checklink=info,warn",
            1 => "checklink=debug,info",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let mut options = CrawlOptions::new(&cli.url);
    options.max_depth = cli.depth;
    options.delay_ms = (cli.delay * 1000.0).max(0.0) as u64;
    options.timeout_secs = cli.timeout;
    options.output_dir = cli.output_dir;

    let classifier =
        ContentClassifier::from_credentials(cli.openai_key, ClassifierConfig::default());
    tracing::info!("Content analysis strategy: {}", classifier.strategy_name());

    let output_dir = options.output_dir.clone();
    let site_url = options.base_url.clone();

    let coordinator =
        Coordinator::new(options, classifier).context("failed to set up the crawl")?;
    let outcome = coordinator.run().await.context("analysis failed")?;

    let set = ReportSet {
        site_url,
        site_goal: outcome.site_goal.summary,
        generated_at: Local::now(),
        languages: outcome.languages,
    };

    let paths = write_reports(&set, &output_dir).context("failed to write reports")?;

    println!("\nAnalysis complete");
    println!("  Site: {}", set.site_url);
    println!(
        "  Checked {} links across {} language version(s)",
        set.total_checked(),
        set.languages.len()
    );
    for language in &set.languages {
        println!(
            "  {} ({}): {} issues",
            language.label,
            language.code,
            language.issues.len()
        );
        for issue in language.issues.iter().take(3) {
            println!("    [{}] {} - {}", issue.kind, issue.url, issue.detail);
        }
        if language.issues.len() > 3 {
            println!("    ... and {} more", language.issues.len() - 3);
        }
    }
    println!("\nReports:");
    for path in &paths {
        println!("  {}", path.display());
    }

    Ok(())
}
