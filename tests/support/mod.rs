//! Test support utilities for lockbox integration tests.
//!
//! Provides an isolated home directory per test and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod range_server;

#[allow(unused_imports)]
pub use assertions::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with an isolated temp home.
///
/// The store and protection key both live under `home`, so each test
/// has its own identity. Child processes get `HOME` set explicitly and
/// no process-global state is mutated.
pub struct Test {
    pub home: TempDir,
}

impl Test {
    /// Create a new environment with no store.
    pub fn new() -> Self {
        let home = TempDir::new().expect("failed to create temp home");
        Self { home }
    }

    /// Create an environment with an empty store.
    pub fn init() -> Self {
        let t = Self::new();
        let output = t.new_store();
        assert!(
            output.status.success(),
            "Failed to create store: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Create an environment with a store holding `properties`.
    pub fn with_properties(properties: &[(&str, &str)]) -> Self {
        let t = Self::init();
        for (name, value) in properties {
            let output = t.set(name, value);
            assert!(
                output.status.success(),
                "Failed to set {}: {}",
                name,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        t
    }

    /// Default store path under the temp home.
    pub fn store_path(&self) -> PathBuf {
        self.home.path().join(".lockbox").join("store.dat")
    }
}

/// Properties used across multiple tests.
pub const STANDARD_PROPERTIES: &[(&str, &str)] = &[
    ("github_token", "ghp_0123456789abcdef"),
    ("db password", "p@ss w0rd!"),
    ("empty", ""),
];
