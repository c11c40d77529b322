//! # Common Test Utilities
//!
//! `TestApp` spawns a real server on a random port. Its single `local` provider
//! points at an `httpmock::MockServer`, and both CSV logs live in temporary
//! directories.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use codelala_server::{
    config, router,
    state::{build_app_state, AppState},
};
use httpmock::{Method::POST, Mock, MockServer};
use reqwest::Client;
use serde_json::json;
use std::{fs, net::SocketAddr, path::PathBuf};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

pub const CHAT_PATH: &str = "/v1/chat/completions";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    pub log_dir: PathBuf,
    pub feedback_dir: PathBuf,
    _work_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start_async().await;
        let work_dir = tempdir()?;
        let log_dir = work_dir.path().join("logs");
        let feedback_dir = work_dir.path().join("feedback");

        let config_path = work_dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
log_dir: "{}"
feedback_dir: "{}"
providers:
  local_default:
    provider: "local"
    api_url: "{}"
    api_key: null
    model_name: "mock-chat-model"
assistant:
  provider: "local_default"
retry:
  max_attempts: 1
  timeout_ms: 5000
"#,
            log_dir.display(),
            feedback_dir.display(),
            mock_server.url(CHAT_PATH)
        );
        fs::write(&config_path, config_content)?;

        let config = config::get_config(Some(config_path.to_str().unwrap_or_default()))?;
        let app_state = build_app_state(config).await?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            log_dir,
            feedback_dir,
            _work_dir: work_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Mocks every chat completion whose body contains `needle`.
    pub async fn mock_completion(&self, needle: &str, answer: &str) -> Mock<'_> {
        let answer = answer.to_string();
        let needle = needle.to_string();
        self.mock_server
            .mock_async(move |when, then| {
                when.method(POST).path(CHAT_PATH).body_contains(needle);
                then.status(200).json_body(json!({
                    "choices": [{ "message": { "role": "assistant", "content": answer } }]
                }));
            })
            .await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Reads a CSV log written by the server, header row included.
pub fn read_csv(path: &std::path::Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
