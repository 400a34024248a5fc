use crate::eval_log::LogError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("path '{}' does not exist", path.display())]
    SourceMissing { path: PathBuf },

    #[error(
        "output file {} already exists (use --overwrite to overwrite existing files)",
        path.display()
    )]
    FileExists { path: PathBuf },

    #[error("{} would be converted onto itself", path.display())]
    SameFile { path: PathBuf },

    #[error(transparent)]
    Log(#[from] LogError),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
