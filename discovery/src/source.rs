//! Where raw reports come from.
//!
//! [`MegacliSource`] runs the management utility; [`FileSource`] replays a
//! previously captured report so the engine can run offline.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use megaraid_core::EntityKind;
use tracing::debug;

use crate::config::ToolConfig;
use crate::error::Result;
use crate::extractor::{locate_binary, run_tool};

/// Produces the raw report text for one entity kind.
pub trait ReportSource {
    fn fetch(&self, kind: EntityKind) -> Result<String>;
}

/// Runs the located management utility with the kind's report arguments.
#[derive(Debug, Clone)]
pub struct MegacliSource {
    binary: PathBuf,
    timeout: Duration,
    verbose: bool,
}

impl MegacliSource {
    pub fn new(binary: PathBuf, timeout: Duration) -> Self {
        Self {
            binary,
            timeout,
            verbose: false,
        }
    }

    /// Logs the utility's standard error output when set.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Locates the configured binary in the configured search directories.
    ///
    /// # Errors
    ///
    /// Returns [`BinaryNotFound`](crate::DiscoveryError::BinaryNotFound) when
    /// the binary is in none of them.
    pub fn from_config(config: &ToolConfig) -> Result<Self> {
        let binary = locate_binary(&config.binary, config.search_dirs.as_slice())?;
        Ok(Self::new(binary, config.timeout()).with_verbose(config.verbose))
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl ReportSource for MegacliSource {
    fn fetch(&self, kind: EntityKind) -> Result<String> {
        run_tool(&self.binary, kind.report_args(), self.timeout, self.verbose)
    }
}

/// Reads a captured report from a file, or from stdin when the path is `-`.
///
/// The same text is returned for every kind; the caller is responsible for
/// pairing the capture with the right kind.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

impl ReportSource for FileSource {
    fn fetch(&self, kind: EntityKind) -> Result<String> {
        debug!(kind = %kind, input = %self.path.display(), "Reading captured report");
        if self.is_stdin() {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            return Ok(text);
        }
        let bytes = std::fs::read(&self.path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Fixed report text, mainly for tests and embedding.
impl ReportSource for str {
    fn fetch(&self, _kind: EntityKind) -> Result<String> {
        Ok(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source_reads_capture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdlist.txt");
        std::fs::write(&path, "Enclosure Device ID: 32\n").unwrap();

        let source = FileSource::new(&path);
        let text = source.fetch(EntityKind::PhysicalDrive).unwrap();
        assert_eq!(text, "Enclosure Device ID: 32\n");
    }

    #[test]
    fn test_file_source_missing_file_is_io_error() {
        let source = FileSource::new("/nonexistent/ldinfo.txt");
        let err = source.fetch(EntityKind::LogicalDrive).unwrap_err();
        assert!(matches!(err, crate::DiscoveryError::IoError(_)));
    }

    #[test]
    fn test_megacli_source_requires_binary() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToolConfig {
            search_dirs: vec![dir.path().to_path_buf()],
            ..ToolConfig::default()
        };
        let err = MegacliSource::from_config(&config).unwrap_err();
        assert!(matches!(err, crate::DiscoveryError::BinaryNotFound { .. }));
    }

    #[test]
    fn test_megacli_source_from_config_locates_binary() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("megacli"), b"").unwrap();
        let config = ToolConfig {
            search_dirs: vec![dir.path().to_path_buf()],
            verbose: true,
            ..ToolConfig::default()
        };
        let source = MegacliSource::from_config(&config).unwrap();
        assert_eq!(source.binary(), dir.path().join("megacli"));
        assert!(source.verbose);
    }

    #[cfg(unix)]
    #[test]
    fn test_megacli_source_passes_report_args() {
        // `echo` prints its arguments, standing in for the utility.
        let source = MegacliSource::new(PathBuf::from("/bin/echo"), Duration::from_secs(10));
        let text = source.fetch(EntityKind::LogicalDrive).unwrap();
        assert_eq!(text, "-LDInfo -Lall -aAll\n");
    }

    #[test]
    fn test_str_source_returns_text() {
        let report: &str = "Adapter #0\n";
        assert_eq!(report.fetch(EntityKind::Controller).unwrap(), "Adapter #0\n");
    }
}
