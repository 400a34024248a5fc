use super::{config, config_with_token, get, json_body, request};
use crate::eval_log::LogStatus;
use crate::server::dispatch;
use crate::test_support::{sample_log, write_fixture};
use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::tempdir;

#[tokio::test]
async fn listing_includes_every_log() {
    // Arrange
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    let a = write_fixture(&config.log_dir, "a.eval", &sample_log("a", LogStatus::Success, 1));
    write_fixture(&config.log_dir, "nested/b.json", &sample_log("b", LogStatus::Error, 0));

    // Act
    let resp = dispatch(&config, &get("/api/logs")).await;

    // Assert
    assert_eq!(resp.status, StatusCode::OK);
    let body = json_body(&resp);
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["name"], json!(a.to_string_lossy()));
    assert_eq!(files[0]["size"], json!(fs::metadata(&a).unwrap().len()));
    assert_eq!(files[0]["task"], json!("a"));
    assert_eq!(files[0]["task_id"], json!("a-id"));
    assert!(files[0]["mtime"].as_f64().unwrap() > 0.0);
    assert_eq!(files[1]["task"], json!("b"));
    assert!(body["log_dir"].is_string());
}

#[tokio::test]
async fn listing_honors_recursive_flag() {
    let dir = tempdir().unwrap();
    let config = std::sync::Arc::new(
        crate::conf::ServerConfig::new(dir.path())
            .unwrap()
            .with_recursive(false),
    );
    write_fixture(&config.log_dir, "top.eval", &sample_log("top", LogStatus::Success, 0));
    write_fixture(&config.log_dir, "nested/inner.eval", &sample_log("in", LogStatus::Success, 0));

    let body = json_body(&dispatch(&config, &get("/api/logs")).await);

    assert_eq!(body["files"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unreadable_log_is_listed_with_null_task() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());
    fs::write(config.log_dir.join("broken.json"), "{").unwrap();

    let body = json_body(&dispatch(&config, &get("/api/logs")).await);

    let file = &body["files"][0];
    assert_eq!(file["task"], json!(null));
    assert_eq!(file["task_id"], json!(null));
}

#[tokio::test]
async fn log_dir_override_requires_authorization() {
    // Arrange
    let served = tempdir().unwrap();
    let other = tempdir().unwrap();
    write_fixture(other.path(), "x.eval", &sample_log("x", LogStatus::Success, 0));
    let target = format!(
        "/api/logs?log_dir={}",
        super::encode(other.path())
    );

    // Act
    let open = dispatch(&config(served.path()), &get(&target)).await;
    let authed = dispatch(
        &config_with_token(served.path(), "tok"),
        &request(Method::GET, &target, Some("tok")),
    )
    .await;

    // Assert
    assert_eq!(json_body(&open)["files"], json!([]));
    assert_eq!(json_body(&authed)["files"].as_array().unwrap().len(), 1);
}
