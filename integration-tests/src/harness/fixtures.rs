use evalview_core::eval_log::{EvalLog, write_log};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// A small but complete log with `samples` samples.
pub fn sample_log(task: &str, status: &str, samples: usize) -> EvalLog {
    let samples: Vec<_> = (0..samples)
        .map(|i| {
            json!({
                "id": i + 1,
                "epoch": 1,
                "input": format!("What is {i} + {i}?"),
                "target": format!("{}", i * 2),
                "scores": { "match": { "value": "C" } }
            })
        })
        .collect();

    serde_json::from_value(json!({
        "version": 2,
        "status": status,
        "eval": {
            "run_id": "run-1",
            "created": "2024-05-29T12:38:43+00:00",
            "task": task,
            "task_id": format!("{task}-id"),
            "model": "openai/gpt-4o"
        },
        "results": {
            "total_samples": samples.len(),
            "completed_samples": samples.len(),
            "scores": [{
                "name": "match",
                "scorer": "match",
                "metrics": { "accuracy": { "name": "accuracy", "value": 0.5 } }
            }]
        },
        "samples": samples
    }))
    .expect("fixture log must deserialize")
}

/// Writes `log` to `dir/name`, creating parent directories.
pub fn write_log_fixture(dir: &Path, name: &str, log: &EvalLog) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create fixture directory");
    }
    write_log(log, &path).expect("failed to write fixture log");
    path
}

/// Percent-encodes a path for use as a single URL segment.
pub fn encode_path(path: &Path) -> String {
    utf8_percent_encode(&path.to_string_lossy(), NON_ALPHANUMERIC).to_string()
}
