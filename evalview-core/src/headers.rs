//! Batch header reads.

use crate::eval_log::{LogError, LogHeader, read_log_header};
use std::path::Path;

/// Reads the header of every path, in order.
///
/// The first file that cannot be read fails the whole batch; the error names
/// that file.
pub fn read_log_headers<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<LogHeader>, LogError> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            read_log_header(path).inspect_err(|err| {
                tracing::error!(path = %path.display(), error = %err, "failed to read log header");
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval_log::LogStatus;
    use crate::test_support::{sample_header, sample_log, write_fixture};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn headers_follow_input_order() {
        // Arrange
        let dir = tempdir().unwrap();
        let b = write_fixture(dir.path(), "b.json", &sample_log("b", LogStatus::Error, 3));
        let a = write_fixture(dir.path(), "a.eval", &sample_log("a", LogStatus::Success, 1));

        // Act
        let headers = read_log_headers(&[&b, &a]).unwrap();

        // Assert
        assert_eq!(
            headers,
            vec![
                sample_header("b", LogStatus::Error),
                sample_header("a", LogStatus::Success)
            ]
        );
    }

    #[test]
    fn empty_batch_is_empty() {
        let paths: [&Path; 0] = [];

        assert!(read_log_headers(&paths).unwrap().is_empty());
    }

    #[test]
    fn one_bad_file_fails_the_batch() {
        let dir = tempdir().unwrap();
        let good = write_fixture(dir.path(), "good.eval", &sample_log("g", LogStatus::Success, 0));
        let missing = dir.path().join("missing.json");

        let err = read_log_headers(&[good, missing.clone()]).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.path(), Some(missing.as_path()));
    }
}
