use crate::conf::{ConfigError, DEFAULT_SERVER_HOST, DEFAULT_VIEW_PORT};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Canonical, absolute log directory.
    pub log_dir: PathBuf,

    /// List logs in nested directories too.
    pub recursive: bool,

    /// Shared secret every request must present in `Authorization`.
    #[serde(skip_serializing)]
    pub authorization: Option<String>,

    /// Opaque filesystem options. Parsed and kept for remote backends; the
    /// local filesystem backend does not read them.
    pub fs_options: BTreeMap<String, String>,
}

impl ServerConfig {
    /// Creates a config serving `log_dir` with default host and port.
    ///
    /// The directory must exist; it is stored in canonical form.
    pub fn new(log_dir: &Path) -> Result<Self, ConfigError> {
        let canonical =
            fs::canonicalize(log_dir).map_err(|e| ConfigError::log_dir_missing(log_dir, e))?;
        if !canonical.is_dir() {
            return Err(ConfigError::LogDirNotDirectory { path: canonical });
        }

        Ok(Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_VIEW_PORT,
            log_dir: canonical,
            recursive: true,
            authorization: None,
            fs_options: BTreeMap::new(),
        })
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Result<Self, ConfigError> {
        if port == 0 {
            return Err(ConfigError::InvalidPort { port });
        }
        self.port = port;
        Ok(self)
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// An empty token disables authorization.
    pub fn with_authorization(mut self, token: Option<String>) -> Self {
        self.authorization = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_fs_options(
        mut self,
        options: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.fs_options.extend(options);
        self
    }

    pub fn listen_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }
}

/// Parses a `key=value` filesystem option.
pub fn parse_fs_option(option: &str) -> Result<(String, String), ConfigError> {
    match option.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ConfigError::InvalidFsOption {
            option: option.to_string(),
        }),
    }
}
