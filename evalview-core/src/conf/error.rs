use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("log directory {path} is not accessible: {source}")]
    LogDirMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("log directory {path} is not a directory")]
    LogDirNotDirectory { path: PathBuf },

    #[error("invalid port {port}: must be between 1 and 65535")]
    InvalidPort { port: u16 },

    #[error("invalid filesystem option '{option}': expected key=value")]
    InvalidFsOption { option: String },
}

impl ConfigError {
    pub fn log_dir_missing(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LogDirMissing {
            path: path.into(),
            source,
        }
    }
}
