//! Enumerates log files under a directory and summarizes each one.

mod discover;
mod info;
mod list;
mod paths;

pub use discover::{discover, discover_all, resolve_glob};
pub use info::LogInfo;
pub use list::list_logs;
pub use paths::{PathMode, aliased_path, home_dir, normalize_names, parse_log_file_name, relative_to};
