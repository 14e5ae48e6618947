//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for serving packs from a temporary directory
//! - Helper functions for building pack content and answers

pub mod fixtures;

use std::path::Path;

use axum::Router;
use tempfile::TempDir;

use reading_quiz_backend::config::Config;
use reading_quiz_backend::{build_router, AppState};

/// Test context owning a pack directory and the router serving it.
///
/// The directory is removed when the context is dropped.
pub struct TestContext {
    dir: TempDir,
    app: Router,
}

impl TestContext {
    /// Create a context with the manifest and every fixture pack written.
    pub fn new() -> Self {
        let ctx = Self::empty();
        ctx.write_file("packs.json", &fixtures::manifest());
        ctx.write_pack(fixtures::LANTERN_ID, fixtures::LANTERN_PACK);
        ctx.write_pack(fixtures::STREAKY_ID, fixtures::STREAKY_PACK);
        ctx
    }

    /// Create a context with an empty pack directory.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create pack directory");

        let mut config = Config::with_packs_dir(dir.path());
        config.default_pack_id = fixtures::STREAKY_ID.to_string();

        let app = build_router(AppState::new(config));
        Self { dir, app }
    }

    /// Get the router for making test requests.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn packs_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Write `<id>.json` into the pack directory.
    pub fn write_pack(&self, id: &str, content: &str) {
        self.write_file(&format!("{}.json", id), content);
    }

    pub fn write_file(&self, name: &str, content: &str) {
        std::fs::write(self.packs_dir().join(name), content).expect("Failed to write fixture");
    }
}
