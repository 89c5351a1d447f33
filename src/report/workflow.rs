//! Reporter backed by the workflow engine's command files

use crate::core::ReleaseResult;
use crate::di::Reporter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Writes outputs to `GITHUB_OUTPUT` and the summary to `GITHUB_STEP_SUMMARY`
///
/// Without those files (running outside a workflow) everything goes to stdout.
#[derive(Debug, Clone, Default)]
pub struct WorkflowReporter {
    output_file: Option<PathBuf>,
    summary_file: Option<PathBuf>,
}

impl WorkflowReporter {
    pub fn new(output_file: Option<PathBuf>, summary_file: Option<PathBuf>) -> Self {
        Self {
            output_file,
            summary_file,
        }
    }

    pub fn from_env() -> Self {
        Self::new(env_path("GITHUB_OUTPUT"), env_path("GITHUB_STEP_SUMMARY"))
    }

    fn append(path: &Path, text: &str) -> ReleaseResult<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Workflow commands take the message on one line
pub fn escape_command_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

impl Reporter for WorkflowReporter {
    fn warning(&self, message: &str) {
        warn!("{}", message);
        println!("::warning::{}", escape_command_data(message));
    }

    fn set_output(&self, name: &str, value: &str) -> ReleaseResult<()> {
        match &self.output_file {
            // Outputs are single-line JSON, so the simple form is enough
            Some(path) => Self::append(path, &format!("{}={}\n", name, value)),
            None => {
                println!("{}={}", name, value);
                Ok(())
            }
        }
    }

    fn summary(&self, markdown: &str) -> ReleaseResult<()> {
        match &self.summary_file {
            Some(path) => Self::append(path, markdown),
            None => {
                println!("{}", markdown);
                Ok(())
            }
        }
    }
}
