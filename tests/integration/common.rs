//! Common utilities for integration tests

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;

/// Isolated workspace plus the workflow command files
pub struct TestContext {
    pub workspace: TempDir,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            workspace: TempDir::new().unwrap(),
        }
    }

    /// Create a file in the workspace
    pub fn file(&self, rel: &str, contents: &str) {
        self.workspace.child(rel).write_str(contents).unwrap();
    }

    pub fn output_file(&self) -> std::path::PathBuf {
        self.workspace.child("_runner/output").to_path_buf()
    }

    pub fn summary_file(&self) -> std::path::PathBuf {
        self.workspace.child("_runner/summary.md").to_path_buf()
    }

    /// Command with a clean environment, as the workflow engine would set it up
    pub fn command(&self, api_url: &str) -> Command {
        std::fs::create_dir_all(self.workspace.child("_runner").path()).unwrap();

        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("release-assets").unwrap();
        cmd.env_clear()
            .current_dir(self.workspace.path())
            .env("GITHUB_WORKSPACE", self.workspace.path())
            .env("GITHUB_REPOSITORY", "octo/widgets")
            .env("GITHUB_TOKEN", "test-token")
            .env("GITHUB_API_URL", api_url)
            .env("GITHUB_OUTPUT", self.output_file())
            .env("GITHUB_STEP_SUMMARY", self.summary_file())
            .env("RUST_LOG", "release_assets=debug");
        cmd
    }

    /// Contents of the output file, empty if never written
    pub fn outputs(&self) -> String {
        std::fs::read_to_string(self.output_file()).unwrap_or_default()
    }
}
