use crate::conf::{
    DEFAULT_LOG_DIR, DEFAULT_SERVER_HOST, DEFAULT_VIEW_PORT, ServerConfig, parse_fs_option,
};
use crate::index::{aliased_path, home_dir};
use crate::server;
use clap::Args;
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Directory containing the logs to serve
    #[arg(long, env = "EVALVIEW_LOG_DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Address to bind
    #[arg(long, env = "EVALVIEW_HOST", default_value = DEFAULT_SERVER_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "EVALVIEW_PORT", default_value_t = DEFAULT_VIEW_PORT)]
    pub port: u16,

    /// Shared secret clients must send in the Authorization header
    #[arg(long, env = "EVALVIEW_AUTHORIZATION", hide_env_values = true)]
    pub authorization: Option<String>,

    /// Only list logs directly inside the log directory
    #[arg(long)]
    pub no_recursive: bool,

    /// Filesystem option passed through to the storage layer (repeatable)
    #[arg(long = "fs-option", value_name = "KEY=VALUE", value_parser = parse_fs_option)]
    pub fs_options: Vec<(String, String)>,
}

impl ViewArgs {
    pub fn into_config(self) -> anyhow::Result<ServerConfig> {
        Ok(ServerConfig::new(&self.log_dir)?
            .with_host(self.host)
            .with_port(self.port)?
            .with_recursive(!self.no_recursive)
            .with_authorization(self.authorization)
            .with_fs_options(self.fs_options))
    }
}

/// Serve the log viewer until interrupted.
pub fn view(args: ViewArgs) -> anyhow::Result<()> {
    let config = args.into_config()?;

    println!(
        "{} {}",
        "evalview:".bold(),
        aliased_path(&config.log_dir, home_dir().as_deref())
    );
    println!("listening on http://{}", config.listen_addr());

    server::run(config)
}
