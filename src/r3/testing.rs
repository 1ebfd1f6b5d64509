//! Mock K2HR3 API server for tests
//!
//! The server runs on its own tokio runtime while the blocking transport is
//! driven from the test thread.

use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

use crate::r3::client::K2hr3Http;
use crate::settings::HttpConfig;

/// Transport settings that never sleep between retries
pub(crate) fn fast_config() -> HttpConfig {
    HttpConfig {
        timeout_seconds: 5,
        retry_interval_seconds: 0,
        max_retries: 0,
        ..Default::default()
    }
}

pub(crate) struct MockApi {
    runtime: Runtime,
    server: Option<MockServer>,
}

impl MockApi {
    pub(crate) fn start() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(MockServer::start());
        Self {
            runtime,
            server: Some(server),
        }
    }

    fn server(&self) -> &MockServer {
        self.server.as_ref().unwrap()
    }

    pub(crate) fn uri(&self) -> String {
        self.server().uri()
    }

    pub(crate) fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(self.server()));
    }

    pub(crate) fn received(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server().received_requests())
            .unwrap_or_default()
    }

    /// The single request the server received
    pub(crate) fn only_request(&self) -> Request {
        let mut requests = self.received();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.remove(0)
    }

    pub(crate) fn http(&self) -> K2hr3Http {
        self.http_with(fast_config())
    }

    pub(crate) fn http_with(&self, config: HttpConfig) -> K2hr3Http {
        K2hr3Http::with_config(&self.uri(), config).unwrap()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        if let Some(server) = self.server.take() {
            self.runtime.block_on(async move { drop(server) });
        }
    }
}

/// Query pairs of a received request, decoded
pub(crate) fn query_pairs(request: &Request) -> Vec<(String, String)> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Body of a received request parsed as JSON
pub(crate) fn json_body(request: &Request) -> serde_json::Value {
    serde_json::from_slice(&request.body).unwrap()
}
