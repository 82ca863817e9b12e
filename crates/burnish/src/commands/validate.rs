//! Validate command - Check SCSS files against the style guide

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use burnish_patina::{
    format_report, format_summary, lint_batch, CancelToken, ConfigError, LintConfig, Linter,
    OutputFormat,
};
use clap::Args;
use glob::glob;
use ignore::Walk;

use super::{EXIT_FINDINGS, EXIT_OK, EXIT_USAGE};

#[derive(Args)]
pub struct ValidateArgs {
    /// Files, directories or glob patterns to validate
    #[arg(default_value = ".")]
    pub paths: Vec<String>,

    /// Config file path (defaults to burnish.config.json or burnish.config.toml in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Override the maximum line length
    #[arg(long)]
    pub max_line_length: Option<usize>,

    /// Quiet mode - only show the summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Maximum number of warnings before failing
    #[arg(long)]
    pub max_warnings: Option<usize>,
}

pub fn run(args: ValidateArgs) -> i32 {
    let start = Instant::now();

    let mut linter = match load_linter(args.config.as_deref()) {
        Ok(linter) => linter,
        Err(error) => {
            eprintln!("error: {}", error);
            return EXIT_USAGE;
        }
    };
    if let Some(max) = args.max_line_length {
        linter.config_mut().max_line_length = max;
    }

    let files = collect_files(&args.paths);
    if files.is_empty() {
        eprintln!("No .scss files found matching: {:?}", args.paths);
        return EXIT_USAGE;
    }
    tracing::debug!(files = files.len(), "validating");

    let outcome = lint_batch(&linter, &files, &CancelToken::new());
    let report = &outcome.report;

    let format = match args.format.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Text,
    };

    match format {
        OutputFormat::Json => println!("{}", format_report(report, &outcome.results, format)),
        OutputFormat::Text => {
            if !args.quiet {
                let output = format_report(report, &outcome.results, format);
                if !output.trim().is_empty() {
                    print!("{}", output);
                }
            }
            println!("\n{}", format_summary(&report.summary));
            println!("Validated {} files in {:.4?}", files.len(), start.elapsed());
        }
    }

    if report.cancelled {
        eprintln!("\nValidation was cancelled before every file was checked");
    }

    if report.exit_code() != EXIT_OK {
        return EXIT_FINDINGS;
    }

    if let Some(max) = args.max_warnings {
        let warnings = report.summary.warning_count;
        if warnings > max {
            eprintln!("\nToo many warnings ({} > max {})", warnings, max);
            return EXIT_FINDINGS;
        }
    }

    EXIT_OK
}

/// Build the linter from an explicit or discovered config file
fn load_linter(explicit: Option<&Path>) -> Result<Linter, ConfigError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => std::env::current_dir()
            .ok()
            .and_then(|dir| LintConfig::discover(&dir)),
    };

    match path {
        Some(path) => {
            tracing::debug!(config = %path.display(), "loading config");
            Linter::from_config(&LintConfig::load(&path)?)
        }
        None => Ok(Linter::new()),
    }
}

/// Expand the command-line paths into a sorted, deduplicated file list.
///
/// Explicit file paths are kept even when they do not exist, so an
/// unreadable file shows up as a fatal finding instead of vanishing.
fn collect_files(paths: &[String]) -> Vec<PathBuf> {
    let mut files = BTreeSet::new();

    for pattern in paths {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            files.extend(
                glob(pattern)
                    .ok()
                    .into_iter()
                    .flatten()
                    .filter_map(Result::ok)
                    .filter(|p| is_scss(p) && !in_node_modules(p)),
            );
        } else if Path::new(pattern).is_dir() {
            // Respects .gitignore
            files.extend(
                Walk::new(pattern)
                    .filter_map(Result::ok)
                    .filter(|e| e.file_type().is_some_and(|t| t.is_file()))
                    .map(|e| e.into_path())
                    .filter(|p| is_scss(p)),
            );
        } else {
            files.insert(PathBuf::from(pattern));
        }
    }

    files.into_iter().collect()
}

fn is_scss(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "scss")
}

fn in_node_modules(path: &Path) -> bool {
    path.components().any(|c| c.as_os_str() == "node_modules")
}
