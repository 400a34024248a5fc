pub mod fixtures;
pub mod server;
pub mod tracing;

pub use fixtures::{encode_path, sample_log, write_log_fixture};
pub use server::TestServer;
pub use tracing::{CapturedEvent, init_test_tracing};
