use integration_tests::harness::{TestServer, encode_path, sample_log, write_log_fixture};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{Value, json};
use tempfile::tempdir;

/// Lists every log under the served directory, including nested ones
#[test]
fn lists_logs_recursively() {
    let dir = tempdir().unwrap();
    write_log_fixture(dir.path(), "a.eval", &sample_log("alpha", "success", 2));
    write_log_fixture(dir.path(), "nested/b.json", &sample_log("beta", "error", 1));
    let srv = TestServer::start(dir.path());

    let res = srv.get("/api/logs").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().unwrap();
    let tasks: Vec<_> = body["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["task"].clone())
        .collect();
    assert_eq!(tasks, vec![json!("alpha"), json!("beta")]);
}

/// A listed name can be fed straight back into the single-log route
#[test]
fn listed_names_round_trip_to_log_route() {
    let dir = tempdir().unwrap();
    write_log_fixture(dir.path(), "a.eval", &sample_log("alpha", "success", 3));
    let srv = TestServer::start(dir.path());

    let listing: Value = srv.get("/api/logs").send().unwrap().json().unwrap();
    let name = listing["files"][0]["name"].as_str().unwrap().to_string();

    let res = srv
        .get(&format!("/api/logs/{}", encode_path(name.as_ref())))
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let log: Value = res.json().unwrap();
    assert_eq!(log["eval"]["task"], json!("alpha"));
    assert_eq!(log["samples"].as_array().unwrap().len(), 3);
}

/// header-only=0 always strips samples
#[test]
fn header_only_zero_strips_samples() {
    let dir = tempdir().unwrap();
    let srv = TestServer::start(dir.path());
    let path = write_log_fixture(srv.log_dir(), "h.json", &sample_log("h", "started", 4));

    let log: Value = srv
        .get(&format!("/api/logs/{}?header-only=0", encode_path(&path)))
        .send()
        .unwrap()
        .json()
        .unwrap();

    assert!(log.get("samples").is_none());
    assert_eq!(log["status"], json!("started"));
}

/// Unreadable logs collapse to a generic 500
#[test]
fn unreadable_log_is_server_error() {
    let dir = tempdir().unwrap();
    let srv = TestServer::start(dir.path());
    let missing = srv.log_dir().join("missing.eval");

    let res = srv
        .get(&format!("/api/logs/{}", encode_path(&missing)))
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

/// Header batches come back in request order
#[test]
fn log_headers_batch() {
    let dir = tempdir().unwrap();
    let srv = TestServer::start(dir.path());
    let a = write_log_fixture(srv.log_dir(), "a.eval", &sample_log("a", "success", 1));
    let b = write_log_fixture(srv.log_dir(), "b.json", &sample_log("b", "cancelled", 1));

    let headers: Value = srv
        .get(&format!(
            "/api/log-headers?file={}&file={}",
            encode_path(&b),
            encode_path(&a)
        ))
        .send()
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(headers[0]["status"], json!("cancelled"));
    assert_eq!(headers[1]["status"], json!("success"));
}

/// Non-GET methods are refused
#[test]
fn post_is_method_not_allowed() {
    let dir = tempdir().unwrap();
    let srv = TestServer::start(dir.path());

    let res = srv
        .request(reqwest::Method::POST, "/api/logs")
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()["allow"].to_str().unwrap(), "GET, HEAD");
}

/// Every request is access-logged with its status
#[test]
fn requests_are_access_logged() {
    let dir = tempdir().unwrap();
    let srv = TestServer::start(dir.path());

    srv.get("/api/log-size/%2Fnowhere%2Fmarker-413.eval")
        .send()
        .unwrap();

    let logged = srv.captured_events().into_iter().any(|e| {
        e.field("path")
            .is_some_and(|p| p.contains("marker-413"))
            && e.field("status") == Some("401")
            && e.level == tracing::Level::INFO
    });
    assert!(logged, "access log entry not captured");
}
