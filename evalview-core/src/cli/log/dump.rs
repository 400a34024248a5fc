use crate::eval_log::{eval_log_json, read_log_with_fallback, resolve_header_only};
use anyhow::Result;
use std::path::Path;

pub fn dump(path: &Path, header_only: Option<u64>) -> Result<()> {
    let header_only = resolve_header_only(path, header_only)?;
    let log = read_log_with_fallback(path, header_only)?;

    println!("{}", eval_log_json(&log)?);
    Ok(())
}
