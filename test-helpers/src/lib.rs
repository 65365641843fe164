pub mod mock;

use std::time::Duration;

use api::telemetry::{self, LogFormat};
use api::Config;
use payloads::{APIClient, PortalClient, responses::RagSearchResponse};
use reqwest::StatusCode;
use secrecy::SecretString;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub use mock::MockBackend;

/// A portal server wired to a fresh mock backend.
pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    pub client: PortalClient,
    pub backend: MockBackend,
}

impl TestApp {
    /// Client for the mock backend itself, as the ui would use it.
    pub fn backend_client(&self) -> APIClient {
        APIClient::new(&self.backend.address)
    }

    /// Same as [`TestApp::backend_client`], authenticated.
    pub fn authenticated_backend_client(&self) -> APIClient {
        self.backend_client()
            .with_token(SecretString::from(mock::USERS_TOKEN.to_string()))
    }

    /// Run a search through the portal, returning the status and envelope.
    pub async fn search(
        &self,
        query: &str,
    ) -> anyhow::Result<(StatusCode, RagSearchResponse)> {
        let body = payloads::requests::RagSearch {
            query: query.to_string(),
        };
        Ok(self.client.rag_search(&body).await?)
    }
}

fn init_test_tracing() {
    let subscriber =
        telemetry::get_subscriber("error".into(), LogFormat::Compact);
    let _ = LogTracer::init();
    let _ = subscriber.try_init();
}

/// Start the portal server forwarding searches to `mai_backend_url`, on an
/// OS-assigned port. Returns the port and a client for it.
pub async fn spawn_portal(mai_backend_url: &str) -> (u16, PortalClient) {
    spawn_portal_with_timeout(mai_backend_url, Duration::from_secs(5)).await
}

/// Like [`spawn_portal`], giving up on the backend after `upstream_timeout`.
pub async fn spawn_portal_with_timeout(
    mai_backend_url: &str,
    upstream_timeout: Duration,
) -> (u16, PortalClient) {
    init_test_tracing();

    let mut config = Config {
        ip: "127.0.0.1".into(),
        port: 0,
        allowed_origins: vec!["*".to_string()],
        mai_backend_url: mai_backend_url.to_string(),
        upstream_timeout,
        log_format: LogFormat::Compact,
    };

    let server = api::build(&mut config).unwrap();
    tokio::spawn(server);

    let client = PortalClient::new(format!("http://127.0.0.1:{}", config.port));
    (config.port, client)
}

/// Use OS-assigned ports for parallel testing.
pub async fn spawn_app() -> TestApp {
    let backend = MockBackend::spawn().await;
    let (port, client) = spawn_portal(&backend.address).await;

    TestApp {
        port,
        client,
        backend,
    }
}

/// Assert that a search produced the failure envelope with `status`.
pub fn assert_search_failed(
    result: (StatusCode, RagSearchResponse),
    expected: StatusCode,
    message: &str,
) {
    let (status, envelope) = result;
    assert_eq!(status, expected);
    assert!(!envelope.success);
    assert_eq!(envelope.context, "");
    assert_eq!(envelope.query, None);
    assert_eq!(envelope.error.as_deref(), Some(message));
}

/// Canned upstream body in the shape the MAI backend uses.
pub fn mai_context(query: &str, context: &str) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "context": context,
        "query": query,
    })
}
