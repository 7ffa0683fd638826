//! oapi-diff command-line interface.
//!
//! Parses two OpenAPI/Swagger documents, compares them, and renders a report
//! in the requested format. The exit code tells scripts whether anything (or
//! anything breaking) changed.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use oapi_diff::{
    build_heatmap, compare, filter_records, format_report, parse_file, validate_document,
    FilterConfig, OutputError, OutputFormat, OutputOptions, RecordFilter, Report,
};
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// oapi-diff - Semantic diff for OpenAPI/Swagger documents
///
/// Compares two API descriptions construct by construct, flags breaking
/// changes, and suggests a semantic version bump.
#[derive(Parser)]
#[command(name = "oapi-diff")]
#[command(version)]
#[command(about = "Semantic diff for OpenAPI/Swagger documents", long_about = None)]
struct Cli {
    /// Old (base) document
    #[arg(value_name = "FILE1")]
    file1: PathBuf,

    /// New (revised) document
    #[arg(value_name = "FILE2")]
    file2: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "terminal")]
    format: OutputFormatArg,

    /// Show only records of this kind
    #[arg(long, value_enum, default_value = "all")]
    filter: RecordFilterArg,

    /// Ignore records whose locator matches PATTERN (repeatable)
    #[arg(long, value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Keep only records whose locator matches PATTERN (repeatable)
    #[arg(long, value_name = "PATTERN")]
    only: Vec<String>,

    /// One line per record, no details
    #[arg(short, long)]
    compact: bool,

    /// Maximum length for displayed values
    #[arg(long, default_value = "80")]
    max_value_length: usize,

    /// Write the report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Exit with 1 only when a breaking change is found
    #[arg(long)]
    fail_on_breaking: bool,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress summary and version lines)
    #[arg(short, long)]
    quiet: bool,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// Plain text (no colors)
    Plain,
    /// Markdown report
    Markdown,
    /// JSON report
    Json,
    /// Standalone HTML page
    Html,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Plain => OutputFormat::Plain,
            OutputFormatArg::Markdown => OutputFormat::Markdown,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Html => OutputFormat::Html,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum RecordFilterArg {
    All,
    Breaking,
    Added,
    Removed,
    Modified,
}

impl From<RecordFilterArg> for RecordFilter {
    fn from(arg: RecordFilterArg) -> Self {
        match arg {
            RecordFilterArg::All => RecordFilter::All,
            RecordFilterArg::Breaking => RecordFilter::Breaking,
            RecordFilterArg::Added => RecordFilter::Added,
            RecordFilterArg::Removed => RecordFilter::Removed,
            RecordFilterArg::Modified => RecordFilter::Modified,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let old = parse_file(&cli.file1)
        .with_context(|| format!("Failed to parse first file: {}", cli.file1.display()))?;
    validate_document(&old, "old")
        .with_context(|| format!("Invalid API document: {}", cli.file1.display()))?;

    let new = parse_file(&cli.file2)
        .with_context(|| format!("Failed to parse second file: {}", cli.file2.display()))?;
    validate_document(&new, "new")
        .with_context(|| format!("Invalid API document: {}", cli.file2.display()))?;

    let comparison = compare(&old, &new).context("Failed to compare documents")?;

    let mut filter = FilterConfig::new().with_record_filter(cli.filter.into());
    for pattern in &cli.ignore {
        filter = filter.ignore(pattern);
    }
    for pattern in &cli.only {
        filter = filter.only(pattern);
    }
    let records = filter_records(&comparison.records, &filter);

    let heatmap = build_heatmap(&records, &old, &new);
    let report = Report::new(records, heatmap);

    let output_format: OutputFormat = cli.format.into();
    let output_options = OutputOptions {
        compact: cli.compact,
        max_value_length: cli.max_value_length,
        include_summary: !cli.quiet,
        include_heatmap: !cli.quiet,
        include_version: !cli.quiet,
    };

    if cli.output.is_some() {
        colored::control::set_override(false);
    }

    let output = format_report(&report, output_format, &output_options)
        .context("Failed to format report")?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &output)
                .map_err(|e| OutputError::write_error(path.display().to_string(), e))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{}", output),
    }

    let changed = if cli.fail_on_breaking {
        report.stats.breaking > 0
    } else {
        !report.is_empty()
    };
    Ok(if changed { 1 } else { 0 })
}
