use crate::eval_log::codec::{LogCodec, decode_lenient, decode_strict};
use crate::eval_log::{EvalLog, LogError, LogHeader};
use std::fs;
use std::path::Path;

/// Logs stored as a single JSON document.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl LogCodec for JsonCodec {
    fn read_header(&self, path: &Path) -> Result<LogHeader, LogError> {
        let bytes = fs::read(path).map_err(|e| LogError::io(path, e))?;

        // `LogHeader` has no `samples` field, so serde skips over the sample array
        // without building any values for it.
        decode_strict(path, &bytes)
    }

    fn read(&self, path: &Path) -> Result<EvalLog, LogError> {
        let bytes = fs::read(path).map_err(|e| LogError::io(path, e))?;

        let mut log: EvalLog = decode_lenient(path, &bytes)?;
        log.samples.get_or_insert_with(Vec::new);
        Ok(log)
    }

    fn encode(&self, log: &EvalLog, path: &Path) -> Result<Vec<u8>, LogError> {
        serde_json::to_vec_pretty(log).map_err(|err| LogError::encode(path, err))
    }
}
