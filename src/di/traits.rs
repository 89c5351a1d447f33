//! Trait definitions for dependency injection

use crate::core::ReleaseResult;
use crate::github::types::{GitHubRelease, Repository, UploadOutcome};
use async_trait::async_trait;

/// Remote operations against the release hosting service
///
/// Each call is a single request from the caller's point of view; the
/// pipeline awaits them one at a time.
#[async_trait]
pub trait ReleaseProvider: Send + Sync {
    /// Look up a published release by tag. Drafts are never returned.
    async fn get_release_by_tag(
        &self,
        repo: &Repository,
        tag: &str,
    ) -> ReleaseResult<Option<GitHubRelease>>;

    /// One page of all releases, drafts included, newest first
    async fn list_releases(
        &self,
        repo: &Repository,
        page: u32,
        per_page: u32,
    ) -> ReleaseResult<Vec<GitHubRelease>>;

    /// Upload `data` as an asset called `name`
    async fn upload_asset(
        &self,
        release: &GitHubRelease,
        name: &str,
        data: Vec<u8>,
    ) -> ReleaseResult<UploadOutcome>;

    /// Delete an asset by id
    async fn delete_asset(&self, repo: &Repository, asset_id: u64) -> ReleaseResult<()>;
}

/// Sink for workflow-facing output
///
/// Passed explicitly through the pipeline instead of writing to a
/// process-wide logger.
#[cfg_attr(test, mockall::automock)]
pub trait Reporter: Send + Sync {
    /// Non-fatal problem worth surfacing in the workflow UI
    fn warning(&self, message: &str);

    /// Set a named step output
    fn set_output(&self, name: &str, value: &str) -> ReleaseResult<()>;

    /// Append Markdown to the step summary
    fn summary(&self, markdown: &str) -> ReleaseResult<()>;
}
