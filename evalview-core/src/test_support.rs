use crate::eval_log::{
    EvalDataset, EvalLog, EvalMetric, EvalResults, EvalSample, EvalScore, EvalSpec, EvalStats,
    LogHeader, LogStatus, Score, write_log,
};
use serde_json::{Map, json};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub(crate) fn sample_header(task: &str, status: LogStatus) -> LogHeader {
    let mut metrics = BTreeMap::new();
    metrics.insert(
        "accuracy".to_string(),
        EvalMetric {
            name: "accuracy".to_string(),
            value: 0.75,
        },
    );

    LogHeader {
        version: 2,
        status,
        eval: EvalSpec {
            run_id: "run-1".to_string(),
            created: "2024-05-29T12:38:43+00:00".to_string(),
            task: task.to_string(),
            task_id: format!("{task}-id"),
            task_version: 0,
            task_file: Some(format!("{task}.py")),
            model: "openai/gpt-4o".to_string(),
            dataset: EvalDataset {
                name: Some(task.to_string()),
                location: None,
                samples: Some(4),
            },
            config: Map::new(),
            metadata: None,
        },
        plan: Some(json!({ "name": "plan", "steps": [{ "solver": "generate" }] })),
        results: Some(EvalResults {
            total_samples: 4,
            completed_samples: 4,
            scores: vec![EvalScore {
                name: "match".to_string(),
                scorer: "match".to_string(),
                metrics,
            }],
        }),
        stats: EvalStats {
            started_at: "2024-05-29T12:38:43+00:00".to_string(),
            completed_at: "2024-05-29T12:39:10+00:00".to_string(),
            model_usage: Map::new(),
        },
        error: None,
    }
}

pub(crate) fn sample_log(task: &str, status: LogStatus, samples: usize) -> EvalLog {
    let samples = (0..samples)
        .map(|i| {
            let mut scores = BTreeMap::new();
            scores.insert(
                "match".to_string(),
                Score {
                    value: json!("C"),
                    answer: Some(format!("{i}")),
                    explanation: None,
                },
            );

            EvalSample {
                id: json!(i + 1),
                epoch: 1,
                input: json!(format!("What is {i} + {i}?")),
                target: json!(format!("{}", i * 2)),
                messages: vec![json!({ "role": "user", "content": format!("What is {i} + {i}?") })],
                output: Some(json!({ "completion": format!("{}", i * 2) })),
                scores,
                metadata: Map::new(),
                events: Vec::new(),
            }
        })
        .collect();

    EvalLog {
        header: sample_header(task, status),
        samples: Some(samples),
    }
}

/// Writes `log` under `dir` and returns the full path.
pub(crate) fn write_fixture(dir: &Path, name: &str, log: &EvalLog) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    write_log(log, &path).unwrap();
    path
}
