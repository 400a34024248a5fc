use crate::conf::ServerConfig;
use crate::server::ApiError;
use std::path::{Component, PathBuf};

/// Checks the `Authorization` header against the configured token.
///
/// Without a configured token every request passes.
pub fn authorize(config: &ServerConfig, header: Option<&str>) -> Result<(), ApiError> {
    match config.authorization() {
        Some(token) if header != Some(token) => Err(ApiError::Unauthorized),
        _ => Ok(()),
    }
}

/// Resolves a requested log file, refusing paths outside the log directory.
///
/// Containment is only enforced when no token is configured; an authorized
/// client may read any path. Runs before any filesystem access.
pub fn validate_log_file_request(config: &ServerConfig, file: &str) -> Result<PathBuf, ApiError> {
    let path = PathBuf::from(file);

    if config.authorization().is_none() {
        let traverses = path
            .components()
            .any(|component| matches!(component, Component::ParentDir));

        if traverses || !path.starts_with(&config.log_dir) {
            tracing::warn!(file, "rejected log file request outside the log directory");
            return Err(ApiError::Unauthorized);
        }
    }

    Ok(path)
}
