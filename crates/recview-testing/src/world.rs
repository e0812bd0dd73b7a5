//! TestWorld pattern for CLI integration tests.
//!
//! Provides a fluent interface for:
//! - Creating an isolated temp directory with its own config file
//! - Writing recording bundles into it
//! - Executing CLI commands against it

use anyhow::Result;
use assert_cmd::Command;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use recview_testing::TestWorld;
///
/// let world = TestWorld::new().with_sample_bundle("shop.json");
///
/// let result = world.run(&["tree", "shop.json"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    config_path: PathBuf,
    format: String,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment. No config file exists until
    /// [`with_config`](Self::with_config) writes one.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");

        Self {
            temp_dir,
            config_path,
            format: "plain".to_string(),
            env_vars: HashMap::new(),
        }
    }

    /// Get the temp directory root; commands run here.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Write the config file passed to every command.
    pub fn with_config(self, toml: &str) -> Self {
        std::fs::write(&self.config_path, toml).expect("Failed to write config");
        self
    }

    /// Output format passed as `--format` (default: plain).
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write the sample shop bundle under `name`.
    pub fn with_sample_bundle(self, name: &str) -> Self {
        let bundle = fixtures::sample_bundle().expect("Failed to build sample bundle");
        self.with_bundle(name, &bundle)
    }

    pub fn with_bundle(self, name: &str, bundle: &Value) -> Self {
        fixtures::write_json(self.temp_dir.path(), name, bundle).expect("Failed to write bundle");
        self
    }

    /// Write a file verbatim, e.g. a deliberately broken bundle.
    pub fn with_file(self, name: &str, content: &str) -> Self {
        std::fs::write(self.temp_dir.path().join(name), content).expect("Failed to write file");
        self
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// The caller must provide the base command (e.g., from `cargo_bin_cmd!("recview")`).
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--config")
            .arg(&self.config_path)
            .arg("--format")
            .arg(&self.format);

        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("RECVIEW_CONFIG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute a command using the project's binary and return the result.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built and the `CARGO_BIN_EXE_` environment variable to be set (which
    /// cargo test does automatically).
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("recview")
            .map_err(|e| anyhow::anyhow!("Failed to find recview binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
