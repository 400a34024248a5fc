use crate::server::response::HeaderBuilder;
use crate::server::{ApiError, ApiResponse};
use bytes::Bytes;
use http::StatusCode;
use rust_embed::RustEmbed;
use std::path::{Component, Path};

#[derive(RustEmbed)]
#[folder = "www/"]
struct ViewAssets;

/// Serves an embedded viewer asset. The empty path maps to `index.html`.
pub(crate) fn asset_response(path: &str) -> Result<ApiResponse, ApiError> {
    let name = if path.is_empty() || path.ends_with('/') {
        format!("{path}index.html")
    } else {
        path.to_string()
    };

    // Path component validation (no traversal, no absolute paths)
    let safe = Path::new(&name)
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    if !safe {
        return Err(ApiError::NotFound);
    }

    let file = ViewAssets::get(&name).ok_or(ApiError::NotFound)?;
    let mime = mime_guess::from_path(&name).first_or_octet_stream();
    let body = Bytes::from(file.data.into_owned());

    let mut headers = HeaderBuilder::default();
    headers.content_type(mime.essence_str());
    headers.content_length(body.len());
    headers.no_cache();

    Ok(ApiResponse {
        status: StatusCode::OK,
        reason: None,
        headers: headers.build(),
        body,
    })
}

/// Text of an embedded asset, e.g. `log-schema.json`.
pub fn embedded_text(name: &str) -> Option<String> {
    ViewAssets::get(name).map(|file| String::from_utf8_lossy(&file.data).into_owned())
}
