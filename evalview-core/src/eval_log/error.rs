use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("log file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to access log file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported log file {} (expected a .eval or .json extension)", path.display())]
    UnknownFormat { path: PathBuf },

    #[error("malformed log file {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    /// The strict header-only decoder met a bare `NaN` / `Infinity` token.
    #[error(
        "log file {} contains non-finite numbers (NaN or Infinity) that the header-only reader cannot decode",
        path.display()
    )]
    NonFinite { path: PathBuf },

    #[error("failed to encode log file {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },

    #[error("glob pattern error: {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl LogError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, reason: impl Display) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn encode(path: impl Into<PathBuf>, reason: impl Display) -> Self {
        Self::Encode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// The only error kind that warrants retrying a header-only read as a full read.
    pub fn is_non_finite(&self) -> bool {
        matches!(self, Self::NonFinite { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::UnknownFormat { path }
            | Self::Malformed { path, .. }
            | Self::NonFinite { path }
            | Self::Encode { path, .. } => Some(path),
            Self::Glob { .. } => None,
        }
    }
}
