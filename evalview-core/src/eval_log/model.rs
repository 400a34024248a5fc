use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

fn default_version() -> u32 {
    2
}

/// Lifecycle status recorded in a log header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Started,
    Success,
    Cancelled,
    Error,
}

impl LogStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LogStatus::Started => "started",
            LogStatus::Success => "success",
            LogStatus::Cancelled => "cancelled",
            LogStatus::Error => "error",
        }
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "started" => Ok(Self::Started),
            "success" => Ok(Self::Success),
            "cancelled" => Ok(Self::Cancelled),
            "error" => Ok(Self::Error),
            other => Err(format!("invalid log status: {other}")),
        }
    }
}

/// Everything in a log except the per-sample records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogHeader {
    #[serde(default = "default_version")]
    pub version: u32,

    pub status: LogStatus,

    pub eval: EvalSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<EvalResults>,

    #[serde(default)]
    pub stats: EvalStats,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<EvalError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalSpec {
    pub run_id: String,

    /// ISO-8601 creation timestamp.
    pub created: String,

    pub task: String,

    pub task_id: String,

    #[serde(default)]
    pub task_version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_file: Option<String>,

    pub model: String,

    #[serde(default)]
    pub dataset: EvalDataset,

    #[serde(default)]
    pub config: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalDataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalResults {
    #[serde(default)]
    pub total_samples: u64,

    #[serde(default)]
    pub completed_samples: u64,

    #[serde(default)]
    pub scores: Vec<EvalScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalScore {
    pub name: String,

    pub scorer: String,

    #[serde(default)]
    pub metrics: BTreeMap<String, EvalMetric>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalMetric {
    pub name: String,

    /// May be non-finite (e.g. the stderr of a single sample).
    #[serde(with = "crate::eval_log::nonfinite")]
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalStats {
    #[serde(default)]
    pub started_at: String,

    #[serde(default)]
    pub completed_at: String,

    #[serde(default)]
    pub model_usage: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalError {
    pub message: String,

    #[serde(default)]
    pub traceback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalSample {
    pub id: Value,

    #[serde(default = "default_epoch")]
    pub epoch: u32,

    pub input: Value,

    #[serde(default)]
    pub target: Value,

    #[serde(default)]
    pub messages: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    #[serde(default)]
    pub scores: BTreeMap<String, Score>,

    #[serde(default)]
    pub metadata: Map<String, Value>,

    #[serde(default)]
    pub events: Vec<Value>,
}

fn default_epoch() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub value: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A complete log: the header plus its samples.
///
/// `samples` is `None` only when the log was read header-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalLog {
    #[serde(flatten)]
    pub header: LogHeader,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<EvalSample>>,
}

impl EvalLog {
    pub fn header_only(header: LogHeader) -> Self {
        Self {
            header,
            samples: None,
        }
    }

    pub fn status(&self) -> LogStatus {
        self.header.status
    }
}
