use crate::eval_log::{LogError, LogStatus, read_log_with_fallback};
use crate::index::paths::parse_log_file_name;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Identity and summary of one log file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogInfo {
    /// Absolute path, unless rewritten by [`crate::index::normalize_names`].
    pub name: String,
    pub size: u64,
    /// Seconds since the Unix epoch, millisecond precision.
    pub mtime: f64,
    pub task: Option<String>,
    pub task_id: Option<String>,
    /// `None` when the header could not be read.
    pub status: Option<LogStatus>,
}

impl LogInfo {
    /// Builds the record from filesystem metadata and a header-only read.
    ///
    /// A header that cannot be read does not fail the call: task and task id
    /// are then recovered from the file name and `status` stays `None`.
    pub fn from_path(path: &Path) -> Result<Self, LogError> {
        let meta = fs::metadata(path).map_err(|e| LogError::io(path, e))?;

        let mtime = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as f64 / 1000.0)
            .unwrap_or_default();

        let (task, task_id, status) = match read_log_with_fallback(path, true) {
            Ok(log) => (
                Some(log.header.eval.task),
                Some(log.header.eval.task_id),
                Some(log.header.status),
            ),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unable to read log header");
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy())
                    .unwrap_or_default();
                let (task, task_id) = parse_log_file_name(&stem);
                (task, task_id, None)
            }
        };

        Ok(Self {
            name: path.to_string_lossy().into_owned(),
            size: meta.len(),
            mtime,
            task,
            task_id,
            status,
        })
    }
}
