//! Review-Harvest main entry point
//!
//! This is the command-line interface for the Review-Harvest exporter.

use anyhow::Context;
use clap::Parser;
use review_harvest::config::{load_config, load_headers, load_payload_template, Config};
use review_harvest::extract::{CellValue, ReviewRow};
use review_harvest::fetch::{fetch_reviews, ReviewClient};
use review_harvest::output::{output_file_name, write_xlsx, DEFAULT_FILE_NAME, XLSX_MIME_TYPE};
use review_harvest::request::StarFilter;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Number of rows shown after a successful run
const PREVIEW_ROWS: usize = 10;

/// Review-Harvest: export product reviews to a spreadsheet
///
/// Pages through a product's reviews, flattens every review into a fixed
/// set of columns, and writes them to an xlsx workbook.
#[derive(Parser, Debug)]
#[command(name = "review-harvest")]
#[command(version)]
#[command(about = "Export product reviews to a spreadsheet", long_about = None)]
struct Cli {
    /// Product page URL (must end with the numeric item id)
    #[arg(long)]
    url: String,

    /// Number of review pages to fetch
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=10))]
    pages: u32,

    /// Star ratings to include, comma separated (default: all)
    #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(u8).range(1..=5))]
    stars: Vec<u8>,

    /// Output workbook name (".xlsx" is appended when missing)
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    output: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

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

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let headers_path = Path::new(&config.inputs.headers_path);
    let headers = load_headers(headers_path)
        .with_context(|| format!("loading request headers from {}", headers_path.display()))?;

    let payload_path = Path::new(&config.inputs.payload_path);
    let template = load_payload_template(payload_path)
        .with_context(|| format!("loading payload template from {}", payload_path.display()))?;

    let stars = if cli.stars.is_empty() {
        StarFilter::all()
    } else {
        StarFilter::new(cli.stars.iter().copied())?
    };

    let client = ReviewClient::new(&config.api, headers)?;

    let rows = fetch_reviews(&client, &cli.url, cli.pages, &template, &stars).await?;

    if rows.is_empty() {
        tracing::warn!("Endpoint returned no reviews");
        println!("No reviews found.");
        return Ok(());
    }

    print_preview(&rows);

    let file_name = output_file_name(&cli.output);
    write_xlsx(&rows, Path::new(&file_name))
        .with_context(|| format!("writing workbook {}", file_name))?;

    println!("\n✓ Exported {} review(s) to: {} ({})", rows.len(), file_name, XLSX_MIME_TYPE);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("review_harvest=info,warn"),
            1 => EnvFilter::new("review_harvest=debug,info"),
            2 => EnvFilter::new("review_harvest=trace,debug"),
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

/// Prints the first rows as a short table
fn print_preview(rows: &[ReviewRow]) {
    println!("=== Reviews ({} total) ===\n", rows.len());
    println!("{:<6} {:<30} {:<50}", "Rating", "Submitted", "Title");

    for row in rows.iter().take(PREVIEW_ROWS) {
        println!(
            "{:<6} {:<30} {:<50}",
            display(row.rating.as_ref()),
            display(row.submission_time.as_ref()),
            truncate(&display(row.title.as_ref()), 50)
        );
    }

    if rows.len() > PREVIEW_ROWS {
        println!("... and {} more", rows.len() - PREVIEW_ROWS);
    }
}

fn display(cell: Option<&CellValue>) -> String {
    cell.map(ToString::to_string).unwrap_or_default()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
