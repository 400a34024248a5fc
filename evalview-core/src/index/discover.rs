use crate::eval_log::{LogError, LogFormat};
use glob::{Pattern, glob};
use std::fs;
use std::path::{Path, PathBuf};

/// Discovers log files under `root`.
///
/// Matches every known log extension, either directly under `root` or at any
/// depth when `recursive` is set. Only regular files are returned, sorted by
/// path. A `root` that is itself a log file is returned as the single entry.
///
/// # Errors
///
/// Returns `LogError::NotFound` if `root` does not exist and `LogError::Glob`
/// if a pattern cannot be parsed. Entries that cannot be read during the walk
/// (e.g. a directory without read permission) are skipped with a warning.
pub fn discover(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, LogError> {
    walk(root, recursive, false)
}

/// Like [`discover`], but an unreadable entry fails the walk with
/// `LogError::Io` naming that entry.
pub fn discover_all(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, LogError> {
    walk(root, recursive, true)
}

fn walk(root: &Path, recursive: bool, strict: bool) -> Result<Vec<PathBuf>, LogError> {
    let meta = fs::metadata(root).map_err(|e| LogError::io(root, e))?;
    if meta.is_file() {
        LogFormat::from_path(root)?;
        return Ok(vec![root.to_path_buf()]);
    }

    let mut paths = Vec::new();
    for format in LogFormat::ALL {
        let pattern = resolve_glob(root, &file_pattern(format, recursive));
        let matches = glob(&pattern).map_err(|e| LogError::Glob {
            pattern: pattern.clone(),
            source: e,
        })?;

        for entry in matches {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(err) if strict => {
                    let path = err.path().to_path_buf();
                    return Err(LogError::io(path, err.into_error()));
                }
                Err(err) => {
                    tracing::warn!(
                        path = %err.path().display(),
                        error = %err.error(),
                        "skipping unreadable entry"
                    );
                }
            }
        }
    }

    paths.sort();
    paths.dedup();
    Ok(paths)
}

/// Joins `pattern` onto `root`, escaping any glob metacharacters in `root`.
pub fn resolve_glob(root: &Path, pattern: &str) -> String {
    let root = Pattern::escape(&root.to_string_lossy());
    Path::new(&root).join(pattern).to_string_lossy().into_owned()
}

fn file_pattern(format: LogFormat, recursive: bool) -> String {
    if recursive {
        format!("**/*.{}", format.extension())
    } else {
        format!("*.{}", format.extension())
    }
}
