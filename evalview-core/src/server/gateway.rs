use crate::conf::ServerConfig;
use crate::server::{ApiRequest, ApiResponse, dispatch};
use async_trait::async_trait;
use http::{Method, StatusCode, header};
use pingora::prelude::{HttpPeer, ProxyHttp, Session};
use pingora::{Custom, Error};
use pingora_http::ResponseHeader;
use std::sync::Arc;
use std::time::Instant;

pub struct ViewGateway {
    config: Arc<ServerConfig>,
}

impl ViewGateway {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProxyHttp for ViewGateway {
    type CTX = ();

    fn new_ctx(&self) -> Self::CTX {}

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora::Result<Box<HttpPeer>> {
        Err(Error::new(Custom(
            "ViewGateway attempted to proxy upstream (bug)",
        )))
    }

    async fn request_filter(
        &self,
        session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> pingora::Result<bool> {
        // Terminal gateway: every request is answered here.
        let started = Instant::now();
        let req = {
            let head = session.req_header();
            let authorization = head
                .headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            ApiRequest::new(head.method.clone(), &head.uri, authorization)
        };

        let resp = dispatch(&self.config, &req).await;
        log_access(&req, resp.status, started);

        write_response(session, &req.method, resp).await?;
        Ok(true)
    }
}

async fn write_response(
    session: &mut Session,
    method: &Method,
    resp: ApiResponse,
) -> pingora::Result<()> {
    let mut header = ResponseHeader::build(resp.status, Some(resp.headers.len()))?;
    for (name, value) in resp.headers.iter() {
        header.insert_header(name.clone(), value.clone())?;
    }
    if let Some(reason) = resp.reason.as_deref() {
        header.set_reason_phrase(Some(reason))?;
    }

    // HEAD keeps the GET headers (including Content-Length) but sends no body.
    let end_of_stream = *method == Method::HEAD || resp.body.is_empty();
    session
        .write_response_header(Box::new(header), end_of_stream)
        .await?;

    if !end_of_stream {
        session.write_response_body(Some(resp.body), true).await?;
    }

    Ok(())
}

fn log_access(req: &ApiRequest, status: StatusCode, started: Instant) {
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    // The viewer polls /api/events continuously.
    if req.path == "/api/events" {
        tracing::debug!(
            method = %req.method,
            path = %req.path,
            status = status.as_u16(),
            elapsed_ms,
            "request"
        );
    } else {
        tracing::info!(
            method = %req.method,
            path = %req.path,
            status = status.as_u16(),
            elapsed_ms,
            "request"
        );
    }
}
