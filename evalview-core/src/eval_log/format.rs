use crate::eval_log::LogError;
use crate::eval_log::codec::{BinaryCodec, JsonCodec, LogCodec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// On-disk log format, selected by file extension.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact binary container.
    #[default]
    Eval,
    /// Single JSON document.
    Json,
}

static BINARY: BinaryCodec = BinaryCodec;
static JSON: JsonCodec = JsonCodec;

impl LogFormat {
    pub const ALL: [LogFormat; 2] = [LogFormat::Eval, LogFormat::Json];

    pub fn extension(self) -> &'static str {
        match self {
            LogFormat::Eval => "eval",
            LogFormat::Json => "json",
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, LogError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .ok_or_else(|| LogError::UnknownFormat {
                path: path.to_path_buf(),
            })
    }

    pub fn codec(self) -> &'static dyn LogCodec {
        match self {
            LogFormat::Eval => &BINARY,
            LogFormat::Json => &JSON,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eval" => Ok(Self::Eval),
            "json" => Ok(Self::Json),
            other => Err(format!("invalid log format: {other}")),
        }
    }
}
