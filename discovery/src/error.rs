//! Error types for report retrieval and device lookup.
//!
//! Parsing itself never fails: malformed fields degrade to defaults. Only
//! locating or running the management utility, reading a captured report,
//! looking up a device and serializing output can produce a
//! [`DiscoveryError`].

use std::path::PathBuf;
use std::time::Duration;

use megaraid_core::EntityKind;
use thiserror::Error;

/// Errors that abort a single invocation.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The utility binary is not present in any search directory.
    #[error("Not found: '{name}'")]
    BinaryNotFound { name: String },

    /// The utility exists but could not be started.
    #[error("failed to run '{}': {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The utility did not exit within the configured timeout and was killed.
    #[error("'{}' did not finish within {}ms", path.display(), timeout.as_millis())]
    Timeout { path: PathBuf, timeout: Duration },

    /// The utility exited unsuccessfully.
    #[error("'{}' exited with {status}: {stderr}", path.display())]
    ToolFailed {
        path: PathBuf,
        status: String,
        stderr: String,
    },

    /// A lookup-by-name request matched no parsed device.
    #[error("{} not exist {name}", kind.label())]
    EntityNotFound { kind: EntityKind, name: String },

    /// The device type selector is not one of `raid`, `ld`, `pd`.
    #[error(transparent)]
    UnknownKind(#[from] megaraid_core::ParseKindError),

    /// File or pipe I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`DiscoveryError`].
pub type Result<T> = std::result::Result<T, DiscoveryError>;
