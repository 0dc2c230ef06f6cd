//! Test support utilities for travis-encrypt integration tests.
//!
//! Provides an isolated project directory and a local key server so no
//! test talks to the real Travis API.

#![allow(dead_code)]

pub mod commands;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use server::{KeyServer, Route};
use tempfile::TempDir;

/// Test environment with an isolated project directory and key server.
///
/// No process-global state is mutated. Child processes get the server URL
/// through the environment and use `.current_dir()`, so tests can safely
/// run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Key server answering for this test only
    pub server: KeyServer,
}

impl Test {
    /// Create a test environment whose server knows the fixture repository.
    pub fn new() -> Self {
        Self::with_route(Route::Known)
    }

    /// Create a test environment whose server answers every request with
    /// the given status and body.
    pub fn with_status(status: u16, body: &str) -> Self {
        Self::with_route(Route::Fixed {
            status,
            body: body.to_string(),
        })
    }

    fn with_route(route: Route) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let server = KeyServer::start(route);
        Self { dir, server }
    }

    /// Absolute path of a file inside the project directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a file into the project directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("failed to write test file");
        path
    }

    /// Read a file from the project directory.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).expect("failed to read test file")
    }

    /// Copy the sample `.travis.yml` into the project directory.
    pub fn travis_yml(&self) -> PathBuf {
        self.write(".travis.yml", SAMPLE_TRAVIS_YML)
    }
}
