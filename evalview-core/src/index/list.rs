use crate::eval_log::{LogError, LogStatus};
use crate::index::{LogInfo, discover};
use std::fs;
use std::path::Path;

/// Lists the logs under `root`, optionally keeping only those with `status`.
///
/// `root` is canonicalized first so every `LogInfo::name` is absolute. Files
/// that disappear between discovery and inspection are skipped.
pub fn list_logs(
    root: &Path,
    recursive: bool,
    status: Option<LogStatus>,
) -> Result<Vec<LogInfo>, LogError> {
    let root = fs::canonicalize(root).map_err(|e| LogError::io(root, e))?;

    let mut logs = Vec::new();
    for path in discover(&root, recursive)? {
        let info = match LogInfo::from_path(&path) {
            Ok(info) => info,
            Err(err) if err.is_not_found() => {
                tracing::debug!(path = %path.display(), "log file vanished during listing");
                continue;
            }
            Err(err) => return Err(err),
        };

        if status.is_none() || info.status == status {
            logs.push(info);
        }
    }

    tracing::debug!(root = %root.display(), count = logs.len(), "listed logs");
    Ok(logs)
}
