mod api_log_tests;
mod api_logs_tests;

use crate::conf::ServerConfig;
use crate::server::{ApiRequest, ApiResponse};
use http::{Method, Uri};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

fn config(dir: &Path) -> Arc<ServerConfig> {
    Arc::new(ServerConfig::new(dir).unwrap())
}

fn config_with_token(dir: &Path, token: &str) -> Arc<ServerConfig> {
    Arc::new(
        ServerConfig::new(dir)
            .unwrap()
            .with_authorization(Some(token.to_string())),
    )
}

fn request(method: Method, target: &str, authorization: Option<&str>) -> ApiRequest {
    let uri: Uri = target.parse().unwrap();
    ApiRequest::new(method, &uri, authorization.map(str::to_string))
}

fn get(target: &str) -> ApiRequest {
    request(Method::GET, target, None)
}

/// Percent-encodes a path the way the viewer client does.
fn encode(path: &Path) -> String {
    utf8_percent_encode(&path.to_string_lossy(), NON_ALPHANUMERIC).to_string()
}

fn json_body(resp: &ApiResponse) -> Value {
    serde_json::from_slice(&resp.body).unwrap()
}
