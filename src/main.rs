//! Lorekeeper main entry point
//!
//! This is the command-line interface for the Lorekeeper book archive crawler.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use lorekeeper::config::{load_config, select_collections, Config};
use lorekeeper::crawler::{HttpSource, Traverser};
use lorekeeper::output::{write_books, OutputFormat, RecordCollector, SnapshotWriter};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Lorekeeper: a book archive crawler
///
/// Lorekeeper walks a book archive's series index pages down to every book
/// and extracts title, author, annotation, tags and text from each one.
#[derive(Parser, Debug)]
#[command(name = "lorekeeper")]
#[command(version)]
#[command(about = "A book archive crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults to the built-in Imperial Library setup)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract every book of the selected collections
    Download {
        /// Collections to crawl, comma separated ("all" or empty for every collection)
        #[arg(long, value_delimiter = ',')]
        collections: Vec<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write records to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Extract every book below a single page
    Bookpage {
        /// Page to start from: a series index or a single book
        #[arg(long)]
        url: Url,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write records to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Save the main content of every book as HTML files
    Snapshot {
        /// Collections to crawl, comma separated ("all" or empty for every collection)
        #[arg(long, value_delimiter = ',')]
        collections: Vec<String>,

        /// Base directory (overrides the configured snapshot-dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// List the configured collections and exit
    Collections,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
        }
        None => Config::builtin(),
    };
    let config = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let result = match cli.command {
        Command::Download {
            collections,
            format,
            out,
        } => handle_download(&config, &collections, format, out.as_deref()).await,
        Command::Bookpage { url, format, out } => {
            handle_bookpage(&config, &url, format, out.as_deref()).await
        }
        Command::Snapshot {
            collections,
            out_dir,
        } => handle_snapshot(&config, &collections, out_dir).await,
        Command::Collections => {
            handle_collections(&config);
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!("Crawl failed: {:#}", e);
    }
    result
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries the records.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lorekeeper=info,warn"),
            1 => EnvFilter::new("lorekeeper=debug,info"),
            2 => EnvFilter::new("lorekeeper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn build_traverser(config: &Config) -> anyhow::Result<Traverser<HttpSource>> {
    let source = HttpSource::new().context("build HTTP client")?;
    Ok(Traverser::from_config(source, config)?)
}

/// Handles `download`: crawls the selected collections and writes all records at the end
async fn handle_download(
    config: &Config,
    names: &[String],
    format: OutputFormat,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let selected = select_collections(&config.collections, names)?;
    let traverser = build_traverser(config)?;
    let mut collector = RecordCollector::new();

    for entry in selected {
        let listing = entry.listing_url()?;
        traverser
            .crawl_collection(&entry.name, &listing, &mut collector)
            .await
            .with_context(|| format!("crawl collection '{}'", entry.name))?;
    }

    let books = collector.into_books();
    tracing::info!("Extracted {} books", books.len());
    emit(&books, format, out)
}

/// Handles `bookpage`: crawls one tree and writes its records
async fn handle_bookpage(
    config: &Config,
    url: &Url,
    format: OutputFormat,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let traverser = build_traverser(config)?;
    let mut collector = RecordCollector::new();

    let summary = traverser
        .traverse(url, &mut collector)
        .await
        .with_context(|| format!("crawl {}", url))?;
    tracing::info!(
        "Extracted {} books from {} pages",
        summary.leaf_pages,
        summary.pages_fetched()
    );

    emit(&collector.into_books(), format, out)
}

/// Handles `snapshot`: stores every book's main content under `<base>/<collection>/`
async fn handle_snapshot(
    config: &Config,
    names: &[String],
    out_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let selected = select_collections(&config.collections, names)?;
    let base_dir = out_dir.unwrap_or_else(|| PathBuf::from(&config.output.snapshot_dir));
    let traverser = build_traverser(config)?;

    tracing::info!("Writing snapshots to {}", base_dir.display());

    for entry in selected {
        let listing = entry.listing_url()?;
        let mut writer = SnapshotWriter::new(&base_dir, &entry.name);
        traverser
            .crawl_collection(&entry.name, &listing, &mut writer)
            .await
            .with_context(|| format!("snapshot collection '{}'", entry.name))?;
        tracing::info!(
            "Wrote {} snapshots for '{}'",
            writer.written().len(),
            entry.name
        );
    }

    Ok(())
}

/// Handles `collections`: prints the configured name to URL table
fn handle_collections(config: &Config) {
    println!("Site root: {}", config.site.root);
    println!("Snapshot directory: {}", config.output.snapshot_dir);
    println!("\nCollections ({}):", config.collections.len());
    for entry in &config.collections {
        println!("  - {:<12} {}", entry.name, entry.url);
    }
}

/// Writes records to `out`, or stdout when no file is given
fn emit(
    books: &[lorekeeper::Book],
    format: OutputFormat,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create output file: {}", path.display()))?;
            write_books(books, format, BufWriter::new(file))?;
            tracing::info!("Wrote {} records to {}", books.len(), path.display());
        }
        None => write_books(books, format, io::stdout().lock())?,
    }

    Ok(())
}
