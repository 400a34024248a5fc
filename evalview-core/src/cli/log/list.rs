use crate::eval_log::LogStatus;
use crate::index::{LogInfo, PathMode, list_logs, normalize_names};
use anyhow::Result;
use std::path::Path;

pub fn list(
    log_dir: &Path,
    status: Option<LogStatus>,
    absolute: bool,
    json: bool,
    recursive: bool,
) -> Result<()> {
    let mut logs = list_logs(log_dir, recursive, status)?;

    // Newest first.
    logs.sort_by(|a, b| b.mtime.total_cmp(&a.mtime));

    let mode = if absolute {
        PathMode::Absolute
    } else {
        PathMode::Relative
    };
    let cwd = std::env::current_dir()?.canonicalize()?;
    normalize_names(&mut logs, mode, &cwd);

    if json {
        println!("{}", serde_json::to_string_pretty(&logs)?);
    } else {
        print!("{}", render_listing(&logs));
    }

    Ok(())
}

/// One log name per line.
pub fn render_listing(logs: &[LogInfo]) -> String {
    logs.iter().map(|log| format!("{}\n", log.name)).collect()
}
