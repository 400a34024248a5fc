//! View server configuration.

pub mod error;
mod types;

pub use error::ConfigError;
pub use types::{ServerConfig, parse_fs_option};

pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub const DEFAULT_VIEW_PORT: u16 = 7575;
pub const DEFAULT_LOG_DIR: &str = "./logs";
