use crate::convert::{ConvertError, ConvertProgress};
use crate::eval_log::{LogFormat, read_log, write_log};
use crate::index::discover_all;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of a successful conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Files decoded and re-encoded in the target format.
    pub converted: usize,
    /// Files already in the target format, copied byte for byte.
    pub copied: usize,
}

impl ConvertSummary {
    pub fn total(&self) -> usize {
        self.converted + self.copied
    }
}

enum Outcome {
    Converted,
    Copied,
}

/// Converts `source` (a log file or a directory of logs) into `to`, writing
/// the results under `output_dir`.
///
/// Directory sources are walked recursively and their layout is mirrored in
/// `output_dir`. The run stops at the first file that fails; outputs already
/// written are left in place.
pub fn convert_logs(
    source: &Path,
    to: LogFormat,
    output_dir: &Path,
    overwrite: bool,
    progress: &mut dyn ConvertProgress,
) -> Result<ConvertSummary, ConvertError> {
    let source = fs::canonicalize(source).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ConvertError::SourceMissing {
            path: source.to_path_buf(),
        },
        _ => ConvertError::io(source, err),
    })?;

    fs::create_dir_all(output_dir).map_err(|e| ConvertError::io(output_dir, e))?;

    let jobs = conversion_jobs(&source)?;
    tracing::debug!(
        source = %source.display(),
        output_dir = %output_dir.display(),
        %to,
        files = jobs.len(),
        "converting logs"
    );

    let mut summary = ConvertSummary::default();
    progress.start(jobs.len());

    for (input, relative) in &jobs {
        let output = output_dir.join(relative.with_extension(to.extension()));
        match convert_file(input, &output, to, overwrite)? {
            Outcome::Converted => summary.converted += 1,
            Outcome::Copied => summary.copied += 1,
        }
        progress.file_done(input);
    }

    progress.finish();
    Ok(summary)
}

/// Pairs each input file with its path relative to the conversion root.
fn conversion_jobs(source: &Path) -> Result<Vec<(PathBuf, PathBuf)>, ConvertError> {
    let meta = fs::metadata(source).map_err(|e| ConvertError::io(source, e))?;

    if meta.is_file() {
        let name = source
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| ConvertError::SourceMissing {
                path: source.to_path_buf(),
            })?;
        return Ok(vec![(source.to_path_buf(), name)]);
    }

    Ok(discover_all(source, true)?
        .into_iter()
        .filter_map(|path| {
            let relative = path.strip_prefix(source).ok()?.to_path_buf();
            Some((path, relative))
        })
        .collect())
}

fn convert_file(
    input: &Path,
    output: &Path,
    to: LogFormat,
    overwrite: bool,
) -> Result<Outcome, ConvertError> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent, e))?;
    }

    if is_same_file(input, output) {
        return Err(ConvertError::SameFile {
            path: input.to_path_buf(),
        });
    }

    if output.exists() && !overwrite {
        return Err(ConvertError::FileExists {
            path: output.to_path_buf(),
        });
    }

    let same_format = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(to.extension()));

    if same_format {
        fs::copy(input, output).map_err(|e| ConvertError::io(output, e))?;
        tracing::debug!(input = %input.display(), output = %output.display(), "copied log");
        Ok(Outcome::Copied)
    } else {
        let log = read_log(input, false)?;
        write_log(&log, output)?;
        tracing::debug!(input = %input.display(), output = %output.display(), "converted log");
        Ok(Outcome::Converted)
    }
}

/// True when `output` names `input` itself (e.g. converting a tree into itself).
fn is_same_file(input: &Path, output: &Path) -> bool {
    let (Some(parent), Some(name)) = (output.parent(), output.file_name()) else {
        return false;
    };
    let Ok(parent) = fs::canonicalize(parent) else {
        return false;
    };
    match fs::canonicalize(input) {
        Ok(input) => input == parent.join(name),
        Err(_) => false,
    }
}
