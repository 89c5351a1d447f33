//! Presenting the outcome of a run
//!
//! Nothing here decides anything: the functions only format a finished
//! [`RunResult`] and hand it to a [`Reporter`].

pub mod workflow;

pub use workflow::{escape_command_data, WorkflowReporter};

use crate::core::ReleaseResult;
use crate::di::Reporter;
use crate::github::types::GitHubRelease;
use crate::publish::RunResult;

/// Name of the step output holding the JSON array of URLs
pub const DOWNLOAD_URLS_OUTPUT: &str = "download_urls";

/// Emit the structured output and the human-readable summary
pub fn report_results(
    reporter: &dyn Reporter,
    release: &GitHubRelease,
    result: &RunResult,
) -> ReleaseResult<()> {
    let urls = serde_json::to_string(&result.download_urls())?;
    reporter.set_output(DOWNLOAD_URLS_OUTPUT, &urls)?;
    reporter.summary(&render_summary(release, result))
}

/// Markdown summary naming the release and every uploaded file
pub fn render_summary(release: &GitHubRelease, result: &RunResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("### Uploaded assets to {}", release.display_name()));
    if release.draft {
        out.push_str(" (draft)");
    }
    out.push('\n');
    out.push('\n');

    if !release.html_url.is_empty() {
        out.push_str(&format!(
            "Release: [{}]({})\n\n",
            release.tag_name, release.html_url
        ));
    }

    if result.uploads.is_empty() {
        out.push_str("No files were uploaded.\n");
        return out;
    }

    out.push_str("| File | Download URL |\n");
    out.push_str("| --- | --- |\n");
    for upload in &result.uploads {
        out.push_str(&format!(
            "| `{}` | {} |\n",
            upload.file.display(),
            upload.download_url
        ));
    }
    out
}
