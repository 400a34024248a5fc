use crate::index::LogInfo;
use std::ffi::OsString;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// How listed log names are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathMode {
    /// Relative to the working directory.
    #[default]
    Relative,
    Absolute,
}

/// Rewrites each `LogInfo::name` according to `mode`.
pub fn normalize_names(logs: &mut [LogInfo], mode: PathMode, cwd: &Path) {
    if mode == PathMode::Absolute {
        return;
    }

    for log in logs {
        let relative = relative_to(Path::new(&log.name), cwd);
        log.name = relative.to_string_lossy().into_owned();
    }
}

/// Expresses `path` relative to `base`, climbing with `..` where needed.
///
/// Both paths are expected to be absolute. When they share no root (different
/// drive prefixes) `path` is returned unchanged.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    if path_parts.first() != base_parts.first() {
        return path.to_path_buf();
    }

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push(Component::ParentDir);
    }
    for part in &path_parts[common..] {
        relative.push(part);
    }

    if relative.as_os_str().is_empty() {
        relative.push(Component::CurDir);
    }
    relative
}

/// Replaces a leading `home` directory with `~` for display.
pub fn aliased_path(path: &Path, home: Option<&Path>) -> String {
    let Some(home) = home.filter(|h| !h.as_os_str().is_empty()) else {
        return path.to_string_lossy().into_owned();
    };

    match path.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~{MAIN_SEPARATOR}{}", rest.to_string_lossy()),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h: &OsString| !h.is_empty())
        .map(PathBuf::from)
}

/// Recovers `(task, task_id)` from a log file stem shaped like
/// `<timestamp>_<task>_<task_id>`.
///
/// The task itself may contain underscores; the task id is the last segment.
pub fn parse_log_file_name(stem: &str) -> (Option<String>, Option<String>) {
    let Some((_timestamp, rest)) = stem.split_once('_') else {
        return (None, None);
    };

    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());

    match rest.rsplit_once('_') {
        Some((task, task_id)) => (non_empty(task), non_empty(task_id)),
        None => (non_empty(rest), None),
    }
}
