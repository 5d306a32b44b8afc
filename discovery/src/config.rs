//! Tool configuration.
//!
//! Controls which management utility binary is used, where it is looked up
//! and how long a single invocation may take. Loaded from YAML; every field
//! has a default, so a partial file is valid.
//!
//! # Example YAML
//!
//! ```yaml
//! binary: megacli
//! search_dirs:
//!   - /opt/MegaRAID/MegaCli
//!   - /usr/sbin
//! timeout_ms: 30000
//! verbose: false
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::ParseOptions;

/// Name of the management utility binary.
pub const DEFAULT_BINARY: &str = "megacli";

/// Directories searched, in order, for the utility and for `lspci`.
pub const DEFAULT_SEARCH_DIRS: &[&str] = &[
    "/bin",
    "/sbin",
    "/usr/bin",
    "/usr/sbin",
    "/usr/local/bin",
    "/usr/local/sbin",
];

/// Upper bound on one utility invocation (milliseconds).
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration for locating and running the management utility.
///
/// # Examples
///
/// ```
/// use megaraid_discovery::config::ToolConfig;
///
/// let config: ToolConfig = serde_yaml::from_str("timeout_ms: 500").unwrap();
/// assert_eq!(config.binary, "megacli");
/// assert_eq!(config.timeout().as_millis(), 500);
/// assert_eq!(config.search_dirs.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Binary name looked up in `search_dirs`.
    pub binary: String,
    /// Directories searched in order; no `$PATH` lookup is performed.
    pub search_dirs: Vec<PathBuf>,
    /// Invocation timeout in milliseconds.
    pub timeout_ms: u64,
    /// Emit diagnostics for malformed report lines.
    pub verbose: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            search_dirs: DEFAULT_SEARCH_DIRS.iter().map(PathBuf::from).collect(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            verbose: false,
        }
    }
}

impl ToolConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::DiscoveryError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::DiscoveryError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::DiscoveryError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::DiscoveryError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            verbose: self.verbose,
        }
    }
}
