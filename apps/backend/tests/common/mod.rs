//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up a server over a temporary directory
//! - Helpers for reading back persisted progress

pub mod fixtures;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use chrono::NaiveDate;
use tempfile::TempDir;

use vocab_core::{JsonFileStore, MemoryStore, ProgressSnapshot, ReviewStore};
use vocab_mastery_backend::config::Config;
use vocab_mastery_backend::{build_router, AppState};

/// Test context owning a temp directory with vocabulary and progress files.
pub struct TestContext {
    pub dir: TempDir,
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Create a context with the sample vocabulary and a `[1, 3, 7]` ladder.
    pub async fn new() -> Self {
        Self::with_vocabulary(fixtures::SAMPLE_VOCABULARY, &[]).await
    }

    /// Create a context with custom vocabulary content and extra env vars.
    pub async fn with_vocabulary(content: &str, vars: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("words.txt"), content).expect("Failed to write vocabulary");

        let config = test_config(&dir, vars);
        let store = JsonFileStore::new(config.progress_path.clone());
        Self::build(dir, config, Box::new(store))
    }

    /// Create a context whose progress store can be made to fail.
    pub async fn with_memory_store(store: Arc<MemoryStore>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("words.txt"), fixtures::SAMPLE_VOCABULARY)
            .expect("Failed to write vocabulary");

        let config = test_config(&dir, &[]);
        Self::build(dir, config, Box::new(store))
    }

    fn build(dir: TempDir, config: Config, store: Box<dyn ReviewStore>) -> Self {
        let mut state = AppState::with_store(config, store);
        state.fixed_today = Some(fixtures::day(0));
        let app = build_router(state.clone());
        Self { dir, state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Test server over a router pinned to `today`.
    pub fn server_on(&self, today: NaiveDate) -> TestServer {
        let mut state = self.state.clone();
        state.fixed_today = Some(today);
        TestServer::new(build_router(state)).expect("Failed to start test server")
    }

    pub fn progress_path(&self) -> PathBuf {
        self.dir.path().join("progress.json")
    }

    /// Read the progress file as written to disk.
    pub fn saved_progress(&self) -> ProgressSnapshot {
        JsonFileStore::new(self.progress_path()).load()
    }
}

fn test_config(dir: &TempDir, vars: &[(&str, &str)]) -> Config {
    let vocab_path = dir.path().to_string_lossy().to_string();
    let progress_path = dir.path().join("progress.json").to_string_lossy().to_string();

    let mut all: Vec<(String, String)> = vec![
        ("VOCAB_PATH".to_string(), vocab_path),
        ("PROGRESS_PATH".to_string(), progress_path),
        ("SRS_LADDER".to_string(), "1,3,7".to_string()),
    ];
    all.extend(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    Config::from_lookup(|key| {
        all.iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("Invalid test config")
}
