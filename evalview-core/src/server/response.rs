use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use serde::Serialize;
use thiserror::Error;

/// A fully materialized response, written to the session by the gateway.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Overrides the canonical reason phrase when set.
    pub reason: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn new(status: StatusCode, content_type: &str, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        let mut headers = HeaderBuilder::default();
        headers.content_type(content_type);
        headers.content_length(body.len());

        Self {
            status,
            reason: None,
            headers: headers.build(),
            body,
        }
    }

    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_vec(value)
            .map_err(|e| ApiError::Internal(format!("json serialization failed: {e}")))?;
        Ok(Self::json_bytes(body))
    }

    /// Wraps an already serialized JSON document.
    pub fn json_bytes(body: impl Into<Bytes>) -> Self {
        Self::new(StatusCode::OK, "application/json", body)
    }

    pub fn octet_stream(body: impl Into<Bytes>) -> Self {
        Self::new(StatusCode::OK, "application/octet-stream", body)
    }

    pub fn header(&self, name: HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("Not Found")]
    NotFound,

    #[error("Range Not Satisfiable")]
    RangeNotSatisfiable,

    /// Any failure to read a requested log. Details are logged, not returned.
    #[error("File not found")]
    ReadFailed,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::BadRequest(reason.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::RangeNotSatisfiable => StatusCode::RANGE_NOT_SATISFIABLE,
            ApiError::ReadFailed | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn into_response(self) -> ApiResponse {
        let status = self.status();
        let reason = match &self {
            ApiError::BadRequest(reason) => Some(reason.clone()),
            ApiError::ReadFailed => Some(self.to_string()),
            _ => None,
        };

        let mut resp = ApiResponse::new(
            status,
            "text/plain; charset=utf-8",
            format!("{}: {}", status.as_u16(), self),
        );
        resp.reason = reason;

        if matches!(self, ApiError::MethodNotAllowed) {
            let mut headers = HeaderBuilder::from(resp.headers);
            headers.allow("GET, HEAD");
            resp.headers = headers.build();
        }

        resp
    }
}

#[derive(Debug, Default)]
pub(crate) struct HeaderBuilder {
    headers: HeaderMap,
}

impl From<HeaderMap> for HeaderBuilder {
    fn from(headers: HeaderMap) -> Self {
        Self { headers }
    }
}

impl HeaderBuilder {
    /// Inserts a header, or removes it when `value` is not a valid header value.
    pub(crate) fn insert(&mut self, header_name: HeaderName, value: &str) {
        let header_value = HeaderValue::from_str(value).unwrap_or(HeaderValue::from_static(""));
        if header_value.is_empty() {
            self.headers.remove(header_name);
        } else {
            self.headers.insert(header_name, header_value);
        }
    }

    pub(crate) fn content_type(&mut self, value: &str) {
        self.insert(header::CONTENT_TYPE, value);
    }

    pub(crate) fn content_length(&mut self, len: usize) {
        self.insert(header::CONTENT_LENGTH, &len.to_string());
    }

    pub(crate) fn allow(&mut self, methods: &str) {
        self.insert(header::ALLOW, methods);
    }

    /// Viewer assets are only ever served locally; never let a browser cache them.
    pub(crate) fn no_cache(&mut self) {
        self.insert(header::EXPIRES, "Fri, 01 Jan 1990 00:00:00 GMT");
        self.insert(header::PRAGMA, "no-cache");
        self.insert(
            header::CACHE_CONTROL,
            "no-cache, no-store, max-age=0, must-revalidate",
        );
    }

    pub(crate) fn build(self) -> HeaderMap {
        self.headers
    }
}
