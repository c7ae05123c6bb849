//! Command-line interface module

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::analysis::config::parse_size_limit;
use crate::analysis::{
    AnalysisConfig, AnalysisEngine, AnalysisResult, ArrayPolicy, ScanReport, ShapeMode,
};
use crate::error::AnalysisError;
use crate::report::{GroupTable, OutputWriter, ReportFormat, WrittenFiles};

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "jsonshape")]
#[command(about = "Infer, group and report the structural shape of a directory of JSON files")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Directory containing the JSON files
    #[arg()]
    pub input: PathBuf,

    /// Directory receiving the report and tables
    #[arg(short, long, default_value = "reports")]
    pub output: PathBuf,

    /// Recursively process directories
    #[arg(long)]
    pub recursive: bool,

    /// Only use the keys of top-level objects as the shape
    #[arg(long)]
    pub top_level: bool,

    /// Collapse every nested array to an Array[N] placeholder
    #[arg(long)]
    pub summarize_arrays: bool,

    /// Export one CSV table per shape group
    #[arg(long)]
    pub tables: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Name the report without a timestamp prefix
    #[arg(long)]
    pub no_timestamp: bool,

    /// Keep filesystem listing order instead of sorting paths
    #[arg(long)]
    pub unsorted: bool,

    /// Maximum size of a single JSON file (e.g., 100MB, default: 100MB)
    #[arg(long)]
    pub max_file_size: Option<String>,

    /// Maximum nesting depth (default: 1000)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Number of file names shown per group (default: 5)
    #[arg(long)]
    pub preview: Option<usize>,

    /// Output analysis statistics
    #[arg(long)]
    pub stats: bool,

    /// Skip unreadable or malformed files instead of aborting
    #[arg(long)]
    pub continue_on_error: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,
}

/// Report formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum Format {
    Text,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Json => ReportFormat::Json,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub analysis_config: AnalysisConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> AnalysisResult<Self> {
        let analysis_config = Self::create_analysis_config(&args)?;

        Ok(Self {
            args,
            analysis_config,
        })
    }

    /// Create analysis configuration from CLI arguments
    fn create_analysis_config(args: &Args) -> AnalysisResult<AnalysisConfig> {
        let defaults = AnalysisConfig::default();
        let max_file_size = match &args.max_file_size {
            Some(limit) => parse_size_limit(limit)?,
            None => defaults.max_file_size,
        };

        let config = AnalysisConfig {
            shape_mode: if args.top_level {
                ShapeMode::TopLevel
            } else {
                ShapeMode::Flattened
            },
            array_policy: if args.summarize_arrays {
                ArrayPolicy::Summarize
            } else {
                ArrayPolicy::ExpandRecords
            },
            max_depth: args.max_depth.or(defaults.max_depth),
            max_file_size,
            recursive: args.recursive,
            sort_files: !args.unsorted,
            retain_records: args.tables,
            continue_on_error: args.continue_on_error,
            preview_limit: args.preview.unwrap_or(defaults.preview_limit),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn report_format(&self) -> ReportFormat {
        self.args.format.into()
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.args.verbose
    }
}

/// Install the tracing subscriber; `RUST_LOG` overrides the flag-derived level
pub fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when running under tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run a full analysis as described by the CLI configuration
pub fn run(config: &CliConfig) -> AnalysisResult<WrittenFiles> {
    let args = &config.args;
    let engine = AnalysisEngine::new(config.analysis_config.clone())?;

    let paths = engine.discover(&args.input)?;
    if paths.is_empty() {
        CliUtils::show_warning(
            &format!("No JSON files found in {}", args.input.display()),
            config.is_quiet(),
        );
    } else if !config.is_quiet() {
        println!("Found {} JSON files", paths.len());
    }

    let progress = (!config.is_quiet() && CliUtils::is_interactive())
        .then(|| CliUtils::create_progress_bar(paths.len() as u64));
    let report = engine.scan_paths(&args.input, &paths, |path| {
        if let Some(pb) = &progress {
            pb.set_message(path.display().to_string());
            pb.inc(1);
        }
    });
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    let report = report?;

    for failure in &report.analysis.failures {
        CliUtils::show_error(&format!("Skipped {}: {}", failure.path.display(), failure.message));
    }

    let format = config.report_format();
    let rendered = format.render(&report, config.analysis_config.preview_limit)?;
    if !config.is_quiet() {
        println!("{}", rendered);
    }

    let writer = OutputWriter::new(&args.output, !args.no_timestamp);
    let mut written = WrittenFiles {
        report: Some(writer.write_report(format, &rendered)?),
        tables: Vec::new(),
    };
    if let Some(path) = &written.report {
        CliUtils::show_success(&format!("Report saved to: {}", path.display()), config.is_quiet());
    }

    if args.tables {
        written.tables = export_tables(&engine, &report, &writer, config.is_quiet())?;
    }

    if args.stats && !config.is_quiet() {
        output_statistics(&report);
    }

    Ok(written)
}

/// Write one CSV table per shape group
fn export_tables(
    engine: &AnalysisEngine,
    report: &ScanReport,
    writer: &OutputWriter,
    quiet: bool,
) -> AnalysisResult<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(report.analysis.groups.len());
    for group in &report.analysis.groups {
        let table = GroupTable::build(group, |member| engine.reload_record(&member.path))?;
        let path = writer.write_table(&table)?;
        CliUtils::show_success(
            &format!("Group {} table saved to: {}", group.id, path.display()),
            quiet,
        );
        paths.push(path);
    }
    info!(tables = paths.len(), "tables exported");
    Ok(paths)
}

fn output_statistics(report: &ScanReport) {
    let stats = &report.statistics;
    println!("\nAnalysis Statistics:");
    println!("Files discovered: {}", stats.files_discovered);
    println!("Documents analyzed: {}", stats.documents_analyzed);
    if stats.documents_failed > 0 {
        println!("Documents skipped: {}", stats.documents_failed);
    }
    println!("Distinct shapes: {}", stats.group_count);
    println!(
        "Fields: {} distinct, {} common",
        stats.distinct_fields, stats.common_fields
    );
    println!(
        "Largest shape covers: {}",
        CliUtils::format_percentage(stats.consistency_percent(&report.analysis))
    );
    println!(
        "Processing time: {}",
        CliUtils::format_duration(Duration::from_millis(stats.processing_time_ms))
    );
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Format a percentage
    pub fn format_percentage(value: f32) -> String {
        format!("{:.1}%", value)
    }

    /// Create a progress bar for file processing
    pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new(total);
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("{} {}", Self::mark("✓", console::Color::Green), message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("{} {}", Self::mark("✗", console::Color::Red), message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            warn!("{}", message);
            eprintln!("{} {}", Self::mark("⚠", console::Color::Yellow), message);
        }
    }

    fn mark(symbol: &str, color: console::Color) -> String {
        if Self::should_use_color() {
            console::style(symbol).fg(color).bold().to_string()
        } else {
            symbol.to_string()
        }
    }

    /// Check if output should be colored
    pub fn should_use_color() -> bool {
        atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err()
    }

    /// Progress bars only make sense on a terminal
    pub fn is_interactive() -> bool {
        atty::is(atty::Stream::Stderr)
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &AnalysisError) {
    CliUtils::show_error(&error.user_message());

    // Provide helpful suggestions
    match error {
        AnalysisError::Parse(_) | AnalysisError::Io { .. } if error.path().is_some() => {
            eprintln!("\nTip: Use --continue-on-error to skip files that cannot be read");
        }
        AnalysisError::FileTooLarge { .. } => {
            eprintln!("\nTip: Use --max-file-size to increase the per-file limit");
        }
        AnalysisError::DepthExceeded { .. } => {
            eprintln!("\nTip: Use --max-depth to allow deeper nesting");
        }
        _ => {}
    }

    eprintln!("\nTry 'jsonshape --help' for usage information.");
}
