//! Shared helpers for HTTP-level tests

#![allow(dead_code)]

use axum_test::TestServer;
use petal::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A server over a fresh document in a temporary directory
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<JsonStore>,
    pub dir: TempDir,
}

impl TestApp {
    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("db.json")
    }
}

/// Build a server over `<dir>/db.json`, loading it if present
pub async fn server_at(path: &Path) -> (TestServer, Arc<JsonStore>) {
    let store = Arc::new(
        JsonStore::open(path)
            .await
            .expect("Failed to open store"),
    );

    let app = ServerBuilder::new()
        .with_store(store.clone())
        .build()
        .expect("Failed to build app");

    let server = TestServer::try_new(app).expect("Failed to create test server");
    (server, store)
}

pub async fn create_test_app() -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (server, store) = server_at(&dir.path().join("db.json")).await;
    TestApp { server, store, dir }
}
