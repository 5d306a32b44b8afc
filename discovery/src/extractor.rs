//! Locating and running the management utility.
//!
//! The utility is looked up in a fixed, ordered list of directories (no
//! `$PATH` lookup) and run synchronously with a bounded timeout. Its standard
//! output is the raw report handed to the parser.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use megaraid_discovery::config::DEFAULT_SEARCH_DIRS;
//! use megaraid_discovery::extractor::{locate_binary, run_tool};
//!
//! let bin = locate_binary("megacli", DEFAULT_SEARCH_DIRS).unwrap();
//! let report = run_tool(&bin, &["-PDList", "-aAll"], Duration::from_secs(30), false).unwrap();
//! println!("{} bytes of report", report.len());
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};
use wait_timeout::ChildExt;

use crate::error::{DiscoveryError, Result};

/// Returns the first `dir/name` that exists and is not a directory.
///
/// # Errors
///
/// Returns [`DiscoveryError::BinaryNotFound`] when no directory holds a match.
pub fn locate_binary<P: AsRef<Path>>(name: &str, dirs: &[P]) -> Result<PathBuf> {
    for dir in dirs {
        let candidate = dir.as_ref().join(name);
        match std::fs::metadata(&candidate) {
            Ok(meta) if !meta.is_dir() => {
                debug!(binary = %candidate.display(), "Located binary");
                return Ok(candidate);
            }
            _ => continue,
        }
    }
    Err(DiscoveryError::BinaryNotFound {
        name: name.to_string(),
    })
}

/// Runs `path` with `args` and returns its standard output.
///
/// Standard input is closed. Both output pipes are drained on helper
/// threads so a chatty child cannot block on a full pipe. A child still
/// running after `timeout` is killed. With `verbose`, anything a successful
/// run writes to standard error is logged as a warning.
///
/// # Errors
///
/// - [`DiscoveryError::Spawn`] if the process cannot be started.
/// - [`DiscoveryError::Timeout`] if it does not exit in time.
/// - [`DiscoveryError::ToolFailed`] if it exits unsuccessfully.
pub fn run_tool(path: &Path, args: &[&str], timeout: Duration, verbose: bool) -> Result<String> {
    debug!(
        binary = %path.display(),
        ?args,
        timeout_ms = timeout.as_millis() as u64,
        "Running tool"
    );
    let mut child = Command::new(path)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| DiscoveryError::Spawn {
            path: path.to_path_buf(),
            source,
        })?;

    let stdout_thread = child.stdout.take().map(drain);
    let stderr_thread = child.stderr.take().map(drain);

    let status = match child.wait_timeout(timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            debug!(binary = %path.display(), "Tool timed out, killing process");
            let _ = child.kill();
            let _ = child.wait();
            return Err(DiscoveryError::Timeout {
                path: path.to_path_buf(),
                timeout,
            });
        }
        Err(err) => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(err.into());
        }
    };

    let stdout = collect(stdout_thread)?;
    let stderr = collect(stderr_thread)?;

    if !status.success() {
        return Err(DiscoveryError::ToolFailed {
            path: path.to_path_buf(),
            status: status.to_string(),
            stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
        });
    }

    if verbose && !stderr.is_empty() {
        warn!(
            binary = %path.display(),
            stderr = %String::from_utf8_lossy(&stderr).trim(),
            "Tool wrote to stderr"
        );
    }
    debug!(binary = %path.display(), bytes = stdout.len(), "Tool finished");
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

type DrainHandle = JoinHandle<std::io::Result<Vec<u8>>>;

fn drain<R: Read + Send + 'static>(mut pipe: R) -> DrainHandle {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn collect(handle: Option<DrainHandle>) -> Result<Vec<u8>> {
    match handle {
        Some(handle) => match handle.join() {
            Ok(result) => Ok(result?),
            Err(_) => Err(std::io::Error::other("output reader thread panicked").into()),
        },
        None => Ok(Vec::new()),
    }
}
