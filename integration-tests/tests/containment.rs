use integration_tests::harness::{TestServer, encode_path, sample_log, write_log_fixture};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use tempfile::tempdir;

/// Files outside the log directory are refused without a token
#[test]
fn outside_log_dir_is_unauthorized() {
    let served = tempdir().unwrap();
    let outside = tempdir().unwrap();
    let secret = write_log_fixture(outside.path(), "secret.eval", &sample_log("s", "success", 1));
    let srv = TestServer::start(served.path());

    let encoded = encode_path(&secret);
    let targets = [
        format!("/api/logs/{encoded}"),
        format!("/api/log-size/{encoded}"),
        format!("/api/log-bytes/{encoded}?start=0&end=1"),
        format!("/api/log-headers?file={encoded}"),
    ];

    for target in targets {
        let res = srv.get(&target).send().unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{target}");
    }
}

/// Parent directory segments never escape the log directory
#[test]
fn parent_segments_are_unauthorized() {
    let served = tempdir().unwrap();
    let srv = TestServer::start(served.path());
    let sneaky = srv.log_dir().join("..").join("other.eval");

    let res = srv
        .get(&format!("/api/log-size/{}", encode_path(&sneaky)))
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

/// With a token, the token gates everything and containment is lifted
#[test]
fn token_gates_all_routes() {
    let served = tempdir().unwrap();
    let outside = tempdir().unwrap();
    let other = write_log_fixture(outside.path(), "other.json", &sample_log("o", "success", 1));
    let srv = TestServer::start_with_token(served.path(), "letmein");

    let anonymous = srv.get("/").send().unwrap();
    let wrong = srv
        .get("/api/logs")
        .header("Authorization", "nope")
        .send()
        .unwrap();
    let outside_ok = srv
        .get(&format!("/api/log-size/{}", encode_path(&other)))
        .header("Authorization", "letmein")
        .send()
        .unwrap();

    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(outside_ok.status(), StatusCode::OK);
}
