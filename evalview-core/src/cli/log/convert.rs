use crate::convert::{BarProgress, convert_logs};
use crate::eval_log::LogFormat;
use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn convert(path: &Path, to: LogFormat, output_dir: &Path, overwrite: bool) -> Result<()> {
    let mut progress = BarProgress::new();
    let summary = convert_logs(path, to, output_dir, overwrite, &mut progress)?;

    println!(
        "{} {} log files written to {} ({} converted, {} copied)",
        "✔".green(),
        summary.total(),
        output_dir.display(),
        summary.converted,
        summary.copied
    );
    Ok(())
}
