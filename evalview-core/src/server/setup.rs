use crate::conf::ServerConfig;
use crate::server::ViewGateway;
use anyhow::{Error, Result};
use pingora::prelude::*;
use pingora::server::Server;
use std::sync::Arc;

/// Run the view server until the process is stopped.
pub fn run(config: ServerConfig) -> Result<()> {
    let config = Arc::new(config);
    let server = build_view_server(config.clone())?;

    tracing::info!(
        log_dir = %config.log_dir.display(),
        listen = %config.listen_addr(),
        recursive = config.recursive,
        authorization = config.authorization().is_some(),
        "view server starting"
    );

    server.run_forever();
}

/// Build the Pingora server with a single terminal gateway on the configured address.
pub fn build_view_server(config: Arc<ServerConfig>) -> Result<Server, Error> {
    // "None" is required here to truly tell Pingora to use its default settings.
    let mut server = Server::new(None)?;
    server.bootstrap();

    let listen = config.listen_addr();
    let gateway = ViewGateway::new(config);

    let mut svc = http_proxy_service(&server.configuration, gateway);
    svc.add_tcp(&listen);
    server.add_service(svc);

    Ok(server)
}
