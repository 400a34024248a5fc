mod binary;
mod json;

pub use binary::BinaryCodec;
pub use json::JsonCodec;

use crate::eval_log::nonfinite::{contains_non_finite, sanitize_non_finite};
use crate::eval_log::{EvalLog, LogError, LogHeader};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Reads and writes one physical log format.
pub trait LogCodec: Send + Sync {
    /// Strict header-only read. Must not materialize samples.
    fn read_header(&self, path: &Path) -> Result<LogHeader, LogError>;

    /// Full read, tolerant of bare non-finite tokens.
    fn read(&self, path: &Path) -> Result<EvalLog, LogError>;

    /// Encodes a log into this format. `path` is used only for error reporting.
    fn encode(&self, log: &EvalLog, path: &Path) -> Result<Vec<u8>, LogError>;
}

/// Strict decode used by the header-only fast path.
///
/// A syntax error caused by a bare `NaN` / `Infinity` token is reported as
/// [`LogError::NonFinite`]; everything else is [`LogError::Malformed`].
pub(crate) fn decode_strict<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, LogError> {
    serde_json::from_slice(bytes).map_err(|err| {
        let non_finite = err.is_syntax()
            && std::str::from_utf8(bytes)
                .map(contains_non_finite)
                .unwrap_or(false);

        if non_finite {
            LogError::NonFinite {
                path: path.to_path_buf(),
            }
        } else {
            LogError::malformed(path, err)
        }
    })
}

/// Lenient decode used by the full-read path.
pub(crate) fn decode_lenient<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, LogError> {
    let text = std::str::from_utf8(bytes).map_err(|err| LogError::malformed(path, err))?;
    let text = sanitize_non_finite(text);
    serde_json::from_str(&text).map_err(|err| LogError::malformed(path, err))
}
