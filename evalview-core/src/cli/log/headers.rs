use crate::headers::read_log_headers;
use anyhow::Result;
use std::path::PathBuf;

pub fn headers(files: &[PathBuf]) -> Result<()> {
    let headers = read_log_headers(files)?;

    println!("{}", serde_json::to_string_pretty(&headers)?);
    Ok(())
}
