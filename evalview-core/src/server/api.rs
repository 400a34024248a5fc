use crate::conf::ServerConfig;
use crate::eval_log::{
    LogError, eval_log_json, read_log_with_fallback, resolve_header_only,
};
use crate::headers::read_log_headers;
use crate::index::{aliased_path, home_dir, list_logs};
use crate::notify;
use crate::server::assets::asset_response;
use crate::server::{ApiError, ApiResponse, QueryParams, authorize, validate_log_file_request};
use http::{Method, Uri};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

const REFRESH_EVALS: &str = "refresh-evals";

/// The parts of an HTTP request the view server looks at.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Raw (still percent-encoded) request path.
    pub path: String,
    pub query: QueryParams,
    pub authorization: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, uri: &Uri, authorization: Option<String>) -> Self {
        Self {
            method,
            path: uri.path().to_string(),
            query: QueryParams::parse(uri.query()),
            authorization,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRoute {
    Logs,
    Log(String),
    LogSize(String),
    LogBytes(String),
    LogHeaders,
    Events,
    /// Anything else is served from the embedded viewer bundle.
    Asset(String),
}

impl ApiRoute {
    /// Matches a raw request path. Log path segments are percent-decoded once.
    pub fn parse(path: &str) -> Result<Self, ApiError> {
        let route = match path {
            "/api/logs" | "/api/logs/" => ApiRoute::Logs,
            "/api/log-headers" => ApiRoute::LogHeaders,
            "/api/events" => ApiRoute::Events,
            _ => {
                if let Some(log) = non_empty_suffix(path, "/api/logs/") {
                    ApiRoute::Log(decode_segment(log)?)
                } else if let Some(log) = non_empty_suffix(path, "/api/log-size/") {
                    ApiRoute::LogSize(decode_segment(log)?)
                } else if let Some(log) = non_empty_suffix(path, "/api/log-bytes/") {
                    ApiRoute::LogBytes(decode_segment(log)?)
                } else {
                    let asset = decode_segment(path.trim_start_matches('/'))
                        .map_err(|_| ApiError::NotFound)?;
                    ApiRoute::Asset(asset)
                }
            }
        };

        Ok(route)
    }
}

fn non_empty_suffix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.strip_prefix(prefix).filter(|rest| !rest.is_empty())
}

fn decode_segment(segment: &str) -> Result<String, ApiError> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ApiError::bad_request("Invalid path encoding."))
}

/// Handles one request end to end. Never fails: errors become responses.
pub async fn dispatch(config: &Arc<ServerConfig>, req: &ApiRequest) -> ApiResponse {
    match route(config, req).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn route(config: &Arc<ServerConfig>, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
    authorize(config, req.authorization.as_deref())?;

    if req.method != Method::GET && req.method != Method::HEAD {
        return Err(ApiError::MethodNotAllowed);
    }

    match ApiRoute::parse(&req.path)? {
        ApiRoute::Logs => api_logs(config, &req.query).await,
        ApiRoute::Log(file) => api_log(config, &file, &req.query).await,
        ApiRoute::LogSize(file) => api_log_size(config, &file).await,
        ApiRoute::LogBytes(file) => api_log_bytes(config, &file, &req.query).await,
        ApiRoute::LogHeaders => api_log_headers(config, &req.query).await,
        ApiRoute::Events => api_events(&req.query),
        ApiRoute::Asset(path) => asset_response(&path),
    }
}

/// Body of `GET /api/logs`.
#[derive(Debug, Serialize)]
pub struct LogListing {
    pub log_dir: String,
    pub files: Vec<LogFileEntry>,
}

#[derive(Debug, Serialize)]
pub struct LogFileEntry {
    pub name: String,
    pub size: u64,
    pub mtime: f64,
    pub task: Option<String>,
    pub task_id: Option<String>,
}

async fn api_logs(config: &ServerConfig, query: &QueryParams) -> Result<ApiResponse, ApiError> {
    // The listing root may only be redirected by an authorized client.
    let log_dir = match (config.authorization(), query.get("log_dir")) {
        (Some(_), Some(dir)) if !dir.is_empty() => PathBuf::from(dir),
        _ => config.log_dir.clone(),
    };

    let recursive = config.recursive;
    let dir = log_dir.clone();
    let logs = blocking(move || list_logs(&dir, recursive, None))
        .await?
        .map_err(|err| {
            tracing::error!(log_dir = %log_dir.display(), error = %err, "failed to list logs");
            ApiError::ReadFailed
        })?;

    let listing = LogListing {
        log_dir: aliased_path(&log_dir, home_dir().as_deref()),
        files: logs
            .into_iter()
            .map(|log| LogFileEntry {
                name: log.name,
                size: log.size,
                mtime: log.mtime,
                task: log.task,
                task_id: log.task_id,
            })
            .collect(),
    };

    ApiResponse::json(&listing)
}

async fn api_log(
    config: &ServerConfig,
    file: &str,
    query: &QueryParams,
) -> Result<ApiResponse, ApiError> {
    let path = validate_log_file_request(config, file)?;
    let threshold = parse_param::<u64>(query, "header-only")?;

    let result = blocking({
        let path = path.clone();
        move || -> Result<String, LogError> {
            let header_only = resolve_header_only(&path, threshold)?;
            let log = read_log_with_fallback(&path, header_only)?;
            eval_log_json(&log).map_err(|e| LogError::encode(&path, e))
        }
    })
    .await?;

    match result {
        Ok(json) => Ok(ApiResponse::json_bytes(json)),
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "failed to read log");
            Err(ApiError::ReadFailed)
        }
    }
}

async fn api_log_size(config: &ServerConfig, file: &str) -> Result<ApiResponse, ApiError> {
    let path = validate_log_file_request(config, file)?;
    let meta = tokio::fs::metadata(&path)
        .await
        .map_err(|e| io_error(&path, e))?;

    ApiResponse::json(&meta.len())
}

async fn api_log_bytes(
    config: &ServerConfig,
    file: &str,
    query: &QueryParams,
) -> Result<ApiResponse, ApiError> {
    let path = validate_log_file_request(config, file)?;

    let start = parse_param::<u64>(query, "start")?
        .ok_or_else(|| ApiError::bad_request("No 'start' query param."))?;
    let end = parse_param::<u64>(query, "end")?
        .ok_or_else(|| ApiError::bad_request("No 'end' query param."))?;
    if start > end {
        return Err(ApiError::bad_request(
            "The 'start' query param must not exceed 'end'.",
        ));
    }

    let mut f = tokio::fs::File::open(&path)
        .await
        .map_err(|e| io_error(&path, e))?;
    let size = f.metadata().await.map_err(|e| io_error(&path, e))?.len();
    if end >= size {
        return Err(ApiError::RangeNotSatisfiable);
    }

    let len = usize::try_from(end - start + 1)
        .map_err(|_| ApiError::RangeNotSatisfiable)?;
    let mut buf = vec![0u8; len];
    f.seek(SeekFrom::Start(start))
        .await
        .map_err(|e| io_error(&path, e))?;
    f.read_exact(&mut buf)
        .await
        .map_err(|e| io_error(&path, e))?;

    Ok(ApiResponse::octet_stream(buf))
}

async fn api_log_headers(
    config: &ServerConfig,
    query: &QueryParams,
) -> Result<ApiResponse, ApiError> {
    let files = query
        .get_all("file")
        .into_iter()
        .map(|file| validate_log_file_request(config, file))
        .collect::<Result<Vec<_>, _>>()?;

    let headers = blocking(move || read_log_headers(&files))
        .await?
        .map_err(|_| ApiError::ReadFailed)?;

    ApiResponse::json(&headers)
}

fn api_events(query: &QueryParams) -> Result<ApiResponse, ApiError> {
    let last_seen = parse_param::<i64>(query, "last_eval_time")?;

    let actions: Vec<&str> = match last_seen {
        Some(last_seen) if notify::should_refresh(last_seen) => vec![REFRESH_EVALS],
        _ => Vec::new(),
    };

    ApiResponse::json(&actions)
}

/// Parses an optional query parameter. Absent or empty means `None`.
fn parse_param<T: std::str::FromStr>(
    query: &QueryParams,
    name: &str,
) -> Result<Option<T>, ApiError> {
    match query.get(name) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ApiError::bad_request(format!("Invalid '{name}' query param."))),
    }
}

fn io_error(path: &Path, err: std::io::Error) -> ApiError {
    if err.kind() == std::io::ErrorKind::NotFound {
        ApiError::NotFound
    } else {
        tracing::error!(path = %path.display(), error = %err, "failed to access log file");
        ApiError::ReadFailed
    }
}

/// Runs a decode off the reactor.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("blocking task failed: {e}")))
}
