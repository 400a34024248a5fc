use crate::harness::{CapturedEvent, init_test_tracing};
use evalview_core::conf::ServerConfig;
use evalview_core::server::build_view_server;
use reqwest::blocking::{Client, RequestBuilder};
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

/// Handle to a running view server.
pub struct TestServer {
    base_url: String,
    client: Client,
    log_dir: PathBuf,
}

impl TestServer {
    /// Start a server over `log_dir` without authorization.
    pub fn start(log_dir: &Path) -> Self {
        Self::start_with(log_dir, None)
    }

    /// Start a server that requires `token` in the Authorization header.
    pub fn start_with_token(log_dir: &Path, token: &str) -> Self {
        Self::start_with(log_dir, Some(token))
    }

    fn start_with(log_dir: &Path, token: Option<&str>) -> Self {
        // Initialize tracing (this must happen first).
        init_test_tracing(events());

        // Allocate a free port for the server.
        let listen_port = free_port();

        let config = ServerConfig::new(log_dir)
            .expect("log dir must exist")
            .with_port(listen_port)
            .expect("port must be valid")
            .with_authorization(token.map(str::to_string));
        let log_dir = config.log_dir.clone();

        let server = build_view_server(Arc::new(config)).expect("failed to build view server");

        // Run server in background thread
        thread::spawn(move || {
            server.run_forever();
        });

        let base_url = format!("http://127.0.0.1:{listen_port}");

        // Wait for server to accept connections
        wait_for_server(&base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build client");

        Self {
            base_url,
            client,
            log_dir,
        }
    }

    /// Convenience helper for GET requests.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{}", self.base_url, path))
    }

    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Canonical log directory the server is serving.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Events captured from every server in this test binary.
    pub fn captured_events(&self) -> Vec<CapturedEvent> {
        events().lock().unwrap().clone()
    }
}

/// Poll until the server responds (or panic).
fn wait_for_server(listen_addr: &str) {
    let addr = listen_addr.strip_prefix("http://").unwrap_or(listen_addr);

    let deadline = Instant::now() + Duration::from_secs(5);

    loop {
        match TcpStream::connect(addr) {
            Ok(_) => return,
            Err(_) => {
                if Instant::now() > deadline {
                    panic!("server failed to start at {}", listen_addr);
                }
                thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();

fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    EVENTS
        .get_or_init(|| Arc::new(Mutex::new(Vec::new())))
        .clone()
}

/// Allocate a free port on localhost.
/// This is required to avoid port collisions when running tests in parallel.
fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
