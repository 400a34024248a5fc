//! Uniform access to evaluation logs regardless of their physical format.

pub mod codec;
mod error;
mod format;
mod model;
pub mod nonfinite;

pub use error::LogError;
pub use format::LogFormat;
pub use model::*;

use crate::notify;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Reads a log, optionally skipping its samples.
///
/// With `header_only` the returned log has `samples: None`.
pub fn read_log(path: &Path, header_only: bool) -> Result<EvalLog, LogError> {
    let codec = LogFormat::from_path(path)?.codec();
    if header_only {
        codec.read_header(path).map(EvalLog::header_only)
    } else {
        codec.read(path)
    }
}

/// Strict header-only read.
pub fn read_log_header(path: &Path) -> Result<LogHeader, LogError> {
    LogFormat::from_path(path)?.codec().read_header(path)
}

/// Reads a log like [`read_log`], but when a header-only read trips over
/// non-finite numbers it retries with a full read instead of failing.
pub fn read_log_with_fallback(path: &Path, header_only: bool) -> Result<EvalLog, LogError> {
    if header_only {
        match read_log(path, true) {
            Err(err) if err.is_non_finite() => {
                tracing::info!(
                    path = %path.display(),
                    "unable to read headers from log file (it may include NaN or Inf values); falling back to reading the entire file"
                );
            }
            other => return other,
        }
    }

    read_log(path, false)
}

/// Writes a log in the format implied by `path`, replacing any existing file
/// atomically, and advances the change watermark.
pub fn write_log(log: &EvalLog, path: &Path) -> Result<(), LogError> {
    let format = LogFormat::from_path(path)?;
    let bytes = format.codec().encode(log, path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| LogError::io(dir, e))?;
    tmp.write_all(&bytes).map_err(|e| LogError::io(path, e))?;
    tmp.persist(path).map_err(|e| LogError::io(path, e.error))?;

    let watermark = notify::notify_log_written();
    tracing::debug!(path = %path.display(), %format, watermark, "log written");

    Ok(())
}

/// Pretty JSON rendering of a log (or header) in the wire format.
pub fn eval_log_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn size_in_mb(size: u64) -> f64 {
    size as f64 / BYTES_PER_MB
}

/// Decides whether a read should be header-only given an optional size
/// threshold in megabytes. A threshold of `0` always means header-only.
pub fn resolve_header_only(path: &Path, threshold_mb: Option<u64>) -> Result<bool, LogError> {
    match threshold_mb {
        None => Ok(false),
        Some(0) => Ok(true),
        Some(threshold) => {
            let size = fs::metadata(path).map_err(|e| LogError::io(path, e))?.len();
            Ok(size_in_mb(size) > threshold as f64)
        }
    }
}
