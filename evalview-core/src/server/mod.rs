//! HTTP view server.
//!
//! A terminal pingora gateway: every request is answered locally from the log
//! directory or the embedded viewer assets, nothing is proxied upstream.

mod api;
mod assets;
mod auth;
mod gateway;
mod query;
mod response;
mod setup;
#[cfg(test)]
mod tests;

pub use api::{ApiRequest, ApiRoute, LogFileEntry, LogListing, dispatch};
pub use assets::embedded_text;
pub use auth::{authorize, validate_log_file_request};
pub use gateway::ViewGateway;
pub use query::QueryParams;
pub use response::{ApiError, ApiResponse};
pub use setup::{build_view_server, run};
