//! # burnish
//!
//! Burnish - Style guide checker for component-oriented SCSS.
//!
//! ## Name Origin
//!
//! **Burnish** is the finisher's last pass: rubbing a surface until it is
//! smooth and even. This binary runs that pass over a stylesheet tree and
//! reports every spot that still needs work.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "burnish")]
#[command(about = "Style guide checker for component-oriented SCSS", long_about = None)]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', short_alias = 'V', long, action = clap::ArgAction::Version)]
    version: (),

    /// Log per-file progress to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate SCSS files against the style guide
    #[command(visible_alias = "check")]
    Validate(commands::validate::ValidateArgs),

    /// List the built-in rules
    Rules(commands::rules::RulesArgs),
}

/// Log to stderr, filtered by `BURNISH_LOG`
fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "burnish=debug,burnish_patina=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("BURNISH_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match cli.command {
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Rules(args) => commands::rules::run(args),
    };
    std::process::exit(code);
}
