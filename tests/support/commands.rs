//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// A lockbox command bound to this test's home directory.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("lockbox").expect("failed to find lockbox binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env_remove("LOCKBOX_STORE");
        cmd.env_remove("LOCKBOX_ENDPOINT");
        cmd.env_remove("LOCKBOX_LOG");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Shortcut for `lockbox new`.
    pub fn new_store(&self) -> Output {
        self.cmd()
            .arg("new")
            .output()
            .expect("failed to run lockbox new")
    }

    /// Shortcut for `lockbox set NAME VALUE`.
    pub fn set(&self, name: &str, value: &str) -> Output {
        self.cmd()
            .args(["set", name, value])
            .output()
            .expect("failed to run lockbox set")
    }

    /// Shortcut for `lockbox get NAME`.
    pub fn get(&self, name: &str) -> Output {
        self.cmd()
            .args(["get", name])
            .output()
            .expect("failed to run lockbox get")
    }

    /// Shortcut for `lockbox rm NAME --yes`.
    pub fn rm(&self, name: &str) -> Output {
        self.cmd()
            .args(["rm", name, "--yes"])
            .output()
            .expect("failed to run lockbox rm")
    }

    /// Shortcut for `lockbox list`.
    pub fn list(&self) -> Output {
        self.cmd()
            .arg("list")
            .output()
            .expect("failed to run lockbox list")
    }

    /// Shortcut for `lockbox list --json`.
    pub fn list_json(&self) -> serde_json::Value {
        let output = self
            .cmd()
            .args(["list", "--json"])
            .output()
            .expect("failed to run lockbox list --json");
        super::assert_success(&output);
        serde_json::from_slice(&output.stdout).expect("list --json is not JSON")
    }
}
