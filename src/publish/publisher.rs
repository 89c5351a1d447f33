use crate::assets::AssetCollector;
use crate::config::Inputs;
use crate::core::ReleaseResult;
use crate::di::ServiceContainer;
use crate::github::types::Repository;
use crate::publish::reconciler::{RunResult, UploadReconciler};
use crate::release::ReleaseResolver;
use crate::report;
use std::path::{Path, PathBuf};
use tracing::info;

/// Runs one upload: collect, resolve, upload, report
pub struct Publisher<'a> {
    services: &'a ServiceContainer,
    repo: Repository,
    workspace: PathBuf,
}

impl<'a> Publisher<'a> {
    /// Create a new publisher; relative patterns resolve against `workspace`
    pub fn new(services: &'a ServiceContainer, repo: Repository, workspace: &Path) -> Self {
        Self {
            services,
            repo,
            workspace: workspace.to_path_buf(),
        }
    }

    /// Publish the files matched by `inputs` to the target release
    ///
    /// Outputs are only set once every upload has succeeded.
    pub async fn publish(&self, inputs: &Inputs) -> ReleaseResult<RunResult> {
        // 1. Collect files; nothing to upload means no remote calls at all
        let plan = AssetCollector::new(&self.workspace, self.services.reporter())
            .collect(&inputs.patterns)?;

        // 2. Find the release
        let release = ReleaseResolver::new(self.services.provider(), &self.repo)
            .resolve(&inputs.target)
            .await?;
        info!(
            "Uploading {} file(s) to release {} ({})",
            plan.len(),
            release.display_name(),
            release.tag_name
        );

        // 3. Upload
        let result = UploadReconciler::new(
            self.services.provider(),
            &self.repo,
            &release,
            inputs.deny_overwrite,
        )
        .upload_all(&plan)
        .await?;

        // 4. Report
        report::report_results(self.services.reporter(), &release, &result)?;
        info!("Uploaded {} asset(s)", result.uploads.len());

        Ok(result)
    }
}
