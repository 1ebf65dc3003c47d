//! Configuration file schema for pyloc.
//!
//! Every key is optional; command-line flags take precedence over the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file names to search for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["pyloc.yaml", ".pyloc.yaml"];

/// Commented template written by `pyloc init`.
pub const DEFAULT_CONFIG: &str = include_str!("templates/default.yaml");

/// Output format for a counting run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Top-level config definition.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// "pretty" (default) or "json"
    #[serde(default)]
    pub format: Option<OutputFormat>,
    /// Analyze files on a thread pool (default: false)
    #[serde(default)]
    pub parallel: Option<bool>,
    /// Follow symbolic links while walking directories (default: true)
    #[serde(default)]
    pub follow_links: Option<bool>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a config from YAML text. An empty document is the default config.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load the config named on the command line, or the first default
    /// file found in `dir`, or the built-in defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::parse_file(path),
            None => match discover(dir) {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "using discovered config");
                    Self::parse_file(path)
                }
                None => Ok(Self::default()),
            },
        }
    }

    /// Returns the output format (defaults to pretty).
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Returns whether to run in parallel (defaults to false).
    pub fn parallel(&self) -> bool {
        self.parallel.unwrap_or(false)
    }

    /// Returns whether to follow symlinks (defaults to true).
    pub fn follow_links(&self) -> bool {
        self.follow_links.unwrap_or(true)
    }
}

/// Find a default config file in `dir`.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}
