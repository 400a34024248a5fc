//! `evalview log`: query, read and convert logs.
//!
//! Logs are read uniformly as JSON whatever their physical format, either in
//! full or header-only (everything but the samples), which keeps very large
//! logs cheap to inspect.

mod convert;
mod dump;
mod headers;
mod list;
mod resources;

pub use convert::*;
pub use dump::*;
pub use headers::*;
pub use list::*;
pub use resources::*;

use crate::conf::DEFAULT_LOG_DIR;
use crate::eval_log::{LogFormat, LogStatus};
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum LogCmd {
    /// List all logs in the log directory
    List {
        /// Directory to list
        #[arg(long, env = "EVALVIEW_LOG_DIR", default_value = DEFAULT_LOG_DIR)]
        log_dir: PathBuf,

        /// List only log files with the indicated status
        #[arg(long, value_enum, ignore_case = true)]
        status: Option<LogStatus>,

        /// List absolute paths (defaults to relative to the cwd)
        #[arg(long)]
        absolute: bool,

        /// Output listing as JSON
        #[arg(long)]
        json: bool,

        /// Only list logs directly inside the log directory
        #[arg(long)]
        no_recursive: bool,
    },

    /// Print log file contents as JSON
    Dump {
        path: PathBuf,

        /// Print only the header (no samples). With a value, only when the file
        /// is larger than that many MB.
        #[arg(long, value_name = "MB", num_args = 0..=1, default_missing_value = "0")]
        header_only: Option<u64>,
    },

    /// Convert between log file formats
    Convert {
        /// Log file or directory of logs
        path: PathBuf,

        /// Target format
        #[arg(
            long,
            value_enum,
            ignore_case = true,
            env = "EVALVIEW_LOG_FORMAT",
            default_value_t = LogFormat::Eval
        )]
        to: LogFormat,

        /// Directory to write converted log files to
        #[arg(long)]
        output_dir: PathBuf,

        /// Overwrite files in the output directory
        #[arg(long)]
        overwrite: bool,
    },

    /// Print log file headers as JSON
    Headers { files: Vec<PathBuf> },

    /// Print the JSON schema for log files
    Schema,

    /// Print TypeScript declarations for log files
    Types,
}

pub fn run(cmd: LogCmd) -> anyhow::Result<()> {
    match cmd {
        LogCmd::List {
            log_dir,
            status,
            absolute,
            json,
            no_recursive,
        } => list(&log_dir, status, absolute, json, !no_recursive),
        LogCmd::Dump { path, header_only } => dump(&path, header_only),
        LogCmd::Convert {
            path,
            to,
            output_dir,
            overwrite,
        } => convert(&path, to, &output_dir, overwrite),
        LogCmd::Headers { files } => headers(&files),
        LogCmd::Schema => schema(),
        LogCmd::Types => types(),
    }
}
