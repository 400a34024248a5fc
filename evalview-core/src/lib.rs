pub mod cli;
pub mod conf;
pub mod convert;
pub mod eval_log;
pub mod headers;
pub mod index;
pub mod logging;
pub mod notify;
pub mod server;

#[cfg(test)]
mod test_support;
