//! Mock implementations of service traits for testing

use super::traits::{ReleaseProvider, Reporter};
use crate::core::{ReleaseError, ReleaseResult};
use crate::github::types::{GitHubRelease, ReleaseAsset, Repository, UploadOutcome};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// A call made against [`MockReleaseProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    GetReleaseByTag(String),
    ListReleases { page: u32, per_page: u32 },
    UploadAsset { release_id: u64, name: String, size: usize },
    DeleteAsset(u64),
}

#[derive(Default)]
struct MockState {
    releases: Vec<GitHubRelease>,
    /// Server-side assets per release id
    assets: HashMap<u64, Vec<ReleaseAsset>>,
    next_asset_id: u64,
    calls: Vec<ProviderCall>,
    failing_uploads: HashSet<String>,
    sticky_conflicts: HashSet<String>,
    fail_deletes: bool,
    fail_listing: bool,
}

/// In-memory release service
///
/// Behaves like the real service for the operations the pipeline uses:
/// tag lookup hides drafts, listing pages through every release, and uploads
/// collide on existing asset names.
///
/// # Example
///
/// ```
/// use release_assets::di::mocks::{MockReleaseProvider, release};
///
/// let provider = MockReleaseProvider::new().with_release(release(1, "v1.0.0", Some("First")));
/// assert_eq!(provider.assets(1).len(), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockReleaseProvider {
    state: Arc<Mutex<MockState>>,
}

impl MockReleaseProvider {
    pub fn new() -> Self {
        let provider = Self::default();
        provider.state.lock().unwrap().next_asset_id = 1000;
        provider
    }

    /// Add a release; it is listed after the ones already added
    pub fn with_release(self, release: GitHubRelease) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.assets.insert(release.id, release.assets.clone());
            state.releases.push(release);
        }
        self
    }

    /// Put an asset on the server without it appearing in the release snapshot
    pub fn add_server_asset(&self, release_id: u64, asset: ReleaseAsset) {
        self.state
            .lock()
            .unwrap()
            .assets
            .entry(release_id)
            .or_default()
            .push(asset);
    }

    /// Make uploads of `name` fail with a transport error
    pub fn fail_upload(&self, name: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_uploads
            .insert(name.to_string());
    }

    /// Make uploads of `name` report a conflict even after deletion
    pub fn always_conflict(&self, name: &str) {
        self.state
            .lock()
            .unwrap()
            .sticky_conflicts
            .insert(name.to_string());
    }

    pub fn fail_deletes(&self) {
        self.state.lock().unwrap().fail_deletes = true;
    }

    pub fn fail_listing(&self) {
        self.state.lock().unwrap().fail_listing = true;
    }

    /// Calls in the order they were made
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Current server-side assets of a release
    pub fn assets(&self, release_id: u64) -> Vec<ReleaseAsset> {
        self.state
            .lock()
            .unwrap()
            .assets
            .get(&release_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Release as the service would return it now
    fn snapshot(state: &MockState, release: &GitHubRelease) -> GitHubRelease {
        let mut release = release.clone();
        release.assets = state.assets.get(&release.id).cloned().unwrap_or_default();
        release
    }
}

#[async_trait]
impl ReleaseProvider for MockReleaseProvider {
    async fn get_release_by_tag(
        &self,
        _repo: &Repository,
        tag: &str,
    ) -> ReleaseResult<Option<GitHubRelease>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ProviderCall::GetReleaseByTag(tag.to_string()));
        Ok(state
            .releases
            .iter()
            .find(|r| r.tag_name == tag && !r.draft)
            .map(|r| Self::snapshot(&state, r)))
    }

    async fn list_releases(
        &self,
        _repo: &Repository,
        page: u32,
        per_page: u32,
    ) -> ReleaseResult<Vec<GitHubRelease>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ProviderCall::ListReleases { page, per_page });
        if state.fail_listing {
            return Err(ReleaseError::Transport("HTTP 500 listing releases".to_string()));
        }
        let start = (page.saturating_sub(1) * per_page) as usize;
        Ok(state
            .releases
            .iter()
            .skip(start)
            .take(per_page as usize)
            .map(|r| Self::snapshot(&state, r))
            .collect())
    }

    async fn upload_asset(
        &self,
        release: &GitHubRelease,
        name: &str,
        data: Vec<u8>,
    ) -> ReleaseResult<UploadOutcome> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ProviderCall::UploadAsset {
            release_id: release.id,
            name: name.to_string(),
            size: data.len(),
        });

        if state.failing_uploads.contains(name) {
            return Err(ReleaseError::Transport(format!(
                "HTTP 502 uploading {}",
                name
            )));
        }
        if state.sticky_conflicts.contains(name) {
            return Ok(UploadOutcome::AlreadyExists);
        }

        let id = state.next_asset_id;
        let assets = state.assets.entry(release.id).or_default();
        if assets.iter().any(|a| a.name == name) {
            return Ok(UploadOutcome::AlreadyExists);
        }

        let asset = ReleaseAsset {
            id,
            name: name.to_string(),
            browser_download_url: format!(
                "https://github.com/octo/widgets/releases/download/{}/{}",
                release.tag_name, name
            ),
            size: data.len() as u64,
            content_type: "application/octet-stream".to_string(),
        };
        assets.push(asset.clone());
        state.next_asset_id += 1;
        Ok(UploadOutcome::Uploaded(asset))
    }

    async fn delete_asset(&self, _repo: &Repository, asset_id: u64) -> ReleaseResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(ProviderCall::DeleteAsset(asset_id));
        if state.fail_deletes {
            return Err(ReleaseError::Transport(format!(
                "HTTP 403 deleting asset {}",
                asset_id
            )));
        }
        for assets in state.assets.values_mut() {
            assets.retain(|a| a.id != asset_id);
        }
        Ok(())
    }
}

/// Build a published release with no assets
pub fn release(id: u64, tag: &str, name: Option<&str>) -> GitHubRelease {
    GitHubRelease {
        id,
        tag_name: tag.to_string(),
        name: name.map(str::to_string),
        draft: false,
        prerelease: false,
        upload_url: format!(
            "https://uploads.github.com/repos/octo/widgets/releases/{}/assets{{?name,label}}",
            id
        ),
        html_url: format!("https://github.com/octo/widgets/releases/tag/{}", tag),
        assets: vec![],
    }
}

/// Build an asset with a predictable download URL
pub fn asset(id: u64, name: &str) -> ReleaseAsset {
    ReleaseAsset {
        id,
        name: name.to_string(),
        browser_download_url: format!("https://github.com/octo/widgets/releases/download/old/{}", name),
        size: 0,
        content_type: "application/octet-stream".to_string(),
    }
}

/// Reporter that keeps everything in memory
#[derive(Clone, Default)]
pub struct RecordingReporter {
    warnings: Arc<Mutex<Vec<String>>>,
    outputs: Arc<Mutex<Vec<(String, String)>>>,
    summaries: Arc<Mutex<Vec<String>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn outputs(&self) -> Vec<(String, String)> {
        self.outputs.lock().unwrap().clone()
    }

    pub fn output(&self, name: &str) -> Option<String> {
        self.outputs
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn summaries(&self) -> Vec<String> {
        self.summaries.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn set_output(&self, name: &str, value: &str) -> ReleaseResult<()> {
        self.outputs
            .lock()
            .unwrap()
            .push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn summary(&self, markdown: &str) -> ReleaseResult<()> {
        self.summaries.lock().unwrap().push(markdown.to_string());
        Ok(())
    }
}
