use crate::server::embedded_text;
use anyhow::{Context, Result};

pub fn schema() -> Result<()> {
    println!("{}", resource("log-schema.json")?);
    Ok(())
}

pub fn types() -> Result<()> {
    println!("{}", resource("log.d.ts")?);
    Ok(())
}

fn resource(name: &str) -> Result<String> {
    embedded_text(name).with_context(|| format!("embedded resource {name} is missing"))
}
