//! files-to-tables - load a folder of delimited text files into DuckDB tables

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use files_to_tables::{IngestConfig, IngestError, Ingestor};

const WELCOME: &str = "\
Welcome to FtT - Files to Tables

In order to use this tool you need to specify a source folder and a destination database
Options:
-s  / --source:  define the path to the folder you want to dump to db
-d  / --destination:  define the database file you want to dump to
-f  / --filter:  Optionally filter for file extensions you want to consider (e.g. txt, csv, ...)";

/// Dump every delimited text file of a folder into its own database table
#[derive(Parser, Debug)]
#[command(name = "files-to-tables", version, about)]
struct Cli {
    /// Folder holding the files to convert
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Database file to create (an existing file is replaced)
    #[arg(short, long)]
    destination: Option<PathBuf>,

    /// Only consider files with this extension (without the dot, e.g. csv)
    #[arg(short, long)]
    filter: Option<String>,
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    if cli.source.is_none() && cli.destination.is_none() && cli.filter.is_none() {
        println!("{WELCOME}");
        return ExitCode::SUCCESS;
    }
    let Some(source) = cli.source else {
        println!("No source defined");
        return ExitCode::FAILURE;
    };
    let Some(destination) = cli.destination else {
        println!("No destination db defined");
        return ExitCode::FAILURE;
    };

    match run(source, destination, cli.filter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<IngestError>() {
                Some(ingest_err) => eprintln!("Error: {}", ingest_err.user_message()),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(source: PathBuf, destination: PathBuf, filter: Option<String>) -> anyhow::Result<()> {
    let mut builder = IngestConfig::builder()
        .source(source)
        .destination(destination);
    if let Some(filter) = &filter {
        builder = builder.filter(filter);
    }
    let config = builder
        .build()
        .map_err(IngestError::InvalidConfig)
        .context("Invalid arguments")?;

    let report = Ingestor::import_folder(&config)?;

    // Per-file failures are reported but do not change the exit code
    for outcome in &report.outcomes {
        println!("{}", outcome.status_line());
    }
    tracing::info!("{}", report.summary());

    Ok(())
}

/// Log to stderr so stdout only carries status lines
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
