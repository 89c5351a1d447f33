//! Uploading the plan to the release, resolving name collisions

use crate::assets::UploadPlan;
use crate::core::{ReleaseError, ReleaseResult};
use crate::di::ReleaseProvider;
use crate::github::types::{GitHubRelease, ReleaseAsset, Repository, UploadOutcome};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One file that made it onto the release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub file: PathBuf,
    pub name: String,
    pub asset_id: u64,
    pub download_url: String,
}

/// Uploads in the order they happened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    pub uploads: Vec<UploadedAsset>,
}

impl RunResult {
    pub fn download_urls(&self) -> Vec<String> {
        self.uploads.iter().map(|u| u.download_url.clone()).collect()
    }
}

/// Uploads files one at a time against a resolved release
///
/// Asset ids come from the release snapshot taken at resolution time plus
/// whatever this run uploaded itself. The snapshot is never refreshed.
pub struct UploadReconciler<'a> {
    provider: &'a dyn ReleaseProvider,
    repo: &'a Repository,
    release: &'a GitHubRelease,
    deny_overwrite: bool,
    known_assets: HashMap<String, u64>,
    result: RunResult,
}

impl<'a> UploadReconciler<'a> {
    pub fn new(
        provider: &'a dyn ReleaseProvider,
        repo: &'a Repository,
        release: &'a GitHubRelease,
        deny_overwrite: bool,
    ) -> Self {
        let known_assets = release
            .assets
            .iter()
            .map(|a| (a.name.clone(), a.id))
            .collect();
        Self {
            provider,
            repo,
            release,
            deny_overwrite,
            known_assets,
            result: RunResult::default(),
        }
    }

    /// Upload every file in plan order, stopping at the first fatal error
    pub async fn upload_all(mut self, plan: &UploadPlan) -> ReleaseResult<RunResult> {
        for file in plan.iter() {
            self.upload_file(file).await?;
        }
        Ok(self.result)
    }

    async fn upload_file(&mut self, file: &Path) -> ReleaseResult<()> {
        let name = asset_name(file)?;
        let data = tokio::fs::read(file).await?;
        info!(file = %file.display(), bytes = data.len(), "uploading {}", name);

        match self.provider.upload_asset(self.release, &name, data).await? {
            UploadOutcome::Uploaded(asset) => {
                self.record(file, asset);
                Ok(())
            }
            UploadOutcome::AlreadyExists if self.deny_overwrite => {
                Err(ReleaseError::AssetConflict {
                    name,
                    file: file.display().to_string(),
                })
            }
            UploadOutcome::AlreadyExists => self.replace(file, &name).await,
        }
    }

    /// Conflict -> delete -> exactly one retry
    async fn replace(&mut self, file: &Path, name: &str) -> ReleaseResult<()> {
        let asset_id = self.known_assets.get(name).copied().ok_or_else(|| {
            ReleaseError::InconsistentState(format!(
                "the service reports an asset named '{}' on release {}, but the release has no such asset",
                name, self.release.tag_name
            ))
        })?;

        info!(asset_id, "replacing existing asset {}", name);
        self.provider.delete_asset(self.repo, asset_id).await?;
        self.known_assets.remove(name);
        self.forget_upload(asset_id, name);

        // Re-read so only one copy of the file is held at a time
        let data = tokio::fs::read(file).await?;
        match self.provider.upload_asset(self.release, name, data).await? {
            UploadOutcome::Uploaded(asset) => {
                self.record(file, asset);
                Ok(())
            }
            UploadOutcome::AlreadyExists => Err(ReleaseError::InconsistentState(format!(
                "asset '{}' still exists after deleting it; another process may be uploading to this release",
                name
            ))),
        }
    }

    fn record(&mut self, file: &Path, asset: ReleaseAsset) {
        info!(url = %asset.browser_download_url, "uploaded {}", asset.name);
        self.known_assets.insert(asset.name.clone(), asset.id);
        self.result.uploads.push(UploadedAsset {
            file: file.to_path_buf(),
            name: asset.name,
            asset_id: asset.id,
            download_url: asset.browser_download_url,
        });
    }

    /// Drop an earlier upload from this run that is about to be replaced
    fn forget_upload(&mut self, asset_id: u64, name: &str) {
        let before = self.result.uploads.len();
        self.result.uploads.retain(|u| u.asset_id != asset_id);
        if self.result.uploads.len() != before {
            warn!("{} was uploaded earlier in this run and is being replaced", name);
        }
    }
}

/// Asset name is the file's base name
fn asset_name(file: &Path) -> ReleaseResult<String> {
    file.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            ReleaseError::InvalidInput(format!(
                "Cannot derive a UTF-8 asset name from {}",
                file.display()
            ))
        })
}
