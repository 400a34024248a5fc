use super::{config, encode, get, json_body};
use crate::eval_log::LogStatus;
use crate::server::dispatch;
use crate::test_support::{sample_log, write_fixture};
use http::{StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::tempdir;

#[tokio::test]
async fn full_log_is_returned_as_json() {
    // Arrange
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let log = sample_log("full", LogStatus::Success, 3);
    let path = write_fixture(&config.log_dir, "full.eval", &log);

    // Act
    let resp = dispatch(&config, &get(&format!("/api/logs/{}", encode(&path)))).await;

    // Assert
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header(header::CONTENT_TYPE), Some("application/json"));
    let body = json_body(&resp);
    assert_eq!(body["eval"]["task"], json!("full"));
    assert_eq!(body["samples"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn header_only_threshold_controls_samples() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let path = write_fixture(
        &config.log_dir,
        "t.json",
        &sample_log("t", LogStatus::Success, 2),
    );
    let base = format!("/api/logs/{}", encode(&path));

    let zero = json_body(&dispatch(&config, &get(&format!("{base}?header-only=0"))).await);
    let large = json_body(&dispatch(&config, &get(&format!("{base}?header-only=100"))).await);

    assert!(zero.get("samples").is_none());
    assert_eq!(zero["status"], json!("success"));
    assert_eq!(large["samples"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn non_integer_threshold_is_bad_request() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let path = write_fixture(
        &config.log_dir,
        "t.json",
        &sample_log("t", LogStatus::Success, 0),
    );

    let resp = dispatch(
        &config,
        &get(&format!("/api/logs/{}?header-only=big", encode(&path))),
    )
    .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn header_only_falls_back_on_bare_nan() {
    // Arrange
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let path = write_fixture(
        &config.log_dir,
        "nan.json",
        &sample_log("nan", LogStatus::Success, 1),
    );
    let text = fs::read_to_string(&path)
        .unwrap()
        .replacen(r#""value": "C""#, r#""value": NaN"#, 1);
    fs::write(&path, text).unwrap();

    // Act
    let resp = dispatch(
        &config,
        &get(&format!("/api/logs/{}?header-only=0", encode(&path))),
    )
    .await;

    // Assert
    assert_eq!(resp.status, StatusCode::OK);
    let body = json_body(&resp);
    assert_eq!(body["samples"][0]["scores"]["match"]["value"], json!("NaN"));
}

#[tokio::test]
async fn read_failure_is_500_file_not_found() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let missing = config.log_dir.join("missing.eval");
    let broken = config.log_dir.join("broken.eval");
    fs::write(&broken, "not a container").unwrap();

    for path in [missing, broken] {
        let resp = dispatch(&config, &get(&format!("/api/logs/{}", encode(&path)))).await;

        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.reason.as_deref(), Some("File not found"));
    }
}

#[tokio::test]
async fn log_size_reports_bytes() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let path = write_fixture(
        &config.log_dir,
        "s.eval",
        &sample_log("s", LogStatus::Success, 1),
    );

    let resp = dispatch(&config, &get(&format!("/api/log-size/{}", encode(&path)))).await;
    let missing = dispatch(
        &config,
        &get(&format!(
            "/api/log-size/{}",
            encode(&config.log_dir.join("gone.eval"))
        )),
    )
    .await;

    assert_eq!(json_body(&resp), json!(fs::metadata(&path).unwrap().len()));
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn log_headers_preserve_order() {
    // Arrange
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let a = write_fixture(&config.log_dir, "a.eval", &sample_log("a", LogStatus::Success, 1));
    let b = write_fixture(&config.log_dir, "b.json", &sample_log("b", LogStatus::Error, 1));

    // Act
    let resp = dispatch(
        &config,
        &get(&format!(
            "/api/log-headers?file={}&file={}",
            encode(&b),
            encode(&a)
        )),
    )
    .await;

    // Assert
    assert_eq!(resp.status, StatusCode::OK);
    let body = json_body(&resp);
    let tasks: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["eval"]["task"].clone())
        .collect();
    assert_eq!(tasks, vec![json!("b"), json!("a")]);
    assert!(body[0].get("samples").is_none());
    // None fields are omitted rather than null.
    assert!(body[0].get("error").is_none());
}

#[tokio::test]
async fn log_headers_fail_as_a_batch() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let a = write_fixture(&config.log_dir, "a.eval", &sample_log("a", LogStatus::Success, 1));
    let missing = config.log_dir.join("missing.eval");

    let resp = dispatch(
        &config,
        &get(&format!(
            "/api/log-headers?file={}&file={}",
            encode(&a),
            encode(&missing)
        )),
    )
    .await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
}
