//! Command-line interface for pyloc.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{self, Config, OutputFormat};
use crate::count::{self, Runner};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Count lines of Python code, separating code from comments, docstrings
/// and blank lines.
///
/// A line holding code and a trailing comment counts as a comment.
/// Files that fail to decode or parse are reported and skipped.
#[derive(Parser)]
#[command(name = "pyloc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Show per-file debug logs
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The default log filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count lines in a Python file or directory
    Count(CountArgs),
    /// Write a default pyloc.yaml config file
    Init(InitArgs),
}

/// Arguments for the count command.
#[derive(Args)]
pub struct CountArgs {
    /// File or directory to count
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    pub json: bool,

    /// Analyze files in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Do not follow symbolic links while walking directories
    #[arg(long)]
    pub no_follow_links: bool,
}

impl CountArgs {
    /// Output format after applying flags over the config file.
    pub fn resolve_format(&self, config: &Config) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format.unwrap_or_else(|| config.format())
        }
    }
}

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "pyloc.yaml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Run the count command.
pub fn run_count(args: &CountArgs) -> anyhow::Result<i32> {
    let config = match Config::load(args.config.as_deref(), Path::new(".")) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error parsing config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if !args.path.exists() {
        eprintln!("Error: path not found: {}", args.path.display());
        return Ok(EXIT_ERROR);
    }

    let follow_links = !args.no_follow_links && config.follow_links();
    let files = count::collect_files(&args.path, follow_links)?;

    if files.is_empty() {
        tracing::warn!("no Python files found under {}", args.path.display());
    }

    let runner = Runner::new().parallel(args.parallel || config.parallel());
    let result = runner.run(&files);

    let path_str = args.path.to_string_lossy().to_string();
    match args.resolve_format(&config) {
        OutputFormat::Json => report::write_json(&result)?,
        OutputFormat::Pretty => report::write_pretty(&path_str, &result)?,
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() && !args.force {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Use --force to overwrite it or --output to pick another path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, config::DEFAULT_CONFIG) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to pick an output format", args.output.display());
    println!("  2. Run: pyloc count . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
