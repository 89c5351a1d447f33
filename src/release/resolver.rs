use crate::core::{ReleaseError, ReleaseResult};
use crate::di::ReleaseProvider;
use crate::github::types::{GitHubRelease, Repository};
use tracing::{debug, info};

/// Releases requested per page when listing
pub const PAGE_SIZE: u32 = 100;

/// Selection criteria for the target release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseTarget {
    pub tag: Option<String>,
    pub name: Option<String>,
}

impl ReleaseTarget {
    /// Whether `release` satisfies every supplied criterion
    pub fn matches(&self, release: &GitHubRelease) -> bool {
        match (&self.tag, &self.name) {
            (Some(tag), Some(name)) => release.tag_name == *tag && release.has_name(name),
            (Some(tag), None) => release.tag_name == *tag,
            (None, Some(name)) => release.has_name(name),
            (None, None) => false,
        }
    }

    /// Criteria phrased for error messages
    pub fn describe(&self) -> String {
        match (&self.tag, &self.name) {
            (Some(tag), Some(name)) => format!("tag '{}' and name '{}'", tag, name),
            (Some(tag), None) => format!("tag '{}'", tag),
            (None, Some(name)) => format!("name '{}'", name),
            (None, None) => "no criteria".to_string(),
        }
    }
}

/// Finds exactly one release for a [`ReleaseTarget`]
///
/// The tag lookup is a single request but never sees drafts, so on a miss
/// the resolver pages through the full release list.
pub struct ReleaseResolver<'a> {
    provider: &'a dyn ReleaseProvider,
    repo: &'a Repository,
    page_size: u32,
}

impl<'a> ReleaseResolver<'a> {
    pub fn new(provider: &'a dyn ReleaseProvider, repo: &'a Repository) -> Self {
        Self {
            provider,
            repo,
            page_size: PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub async fn resolve(&self, target: &ReleaseTarget) -> ReleaseResult<GitHubRelease> {
        if target.tag.is_none() && target.name.is_none() {
            return Err(ReleaseError::InvalidInput(
                "A release tag or name is required to find a release".to_string(),
            ));
        }

        if let Some(tag) = &target.tag {
            if let Some(release) = self.provider.get_release_by_tag(self.repo, tag).await? {
                return Self::check_name(release, target);
            }
            debug!(tag = %tag, "no published release for tag, searching all releases");
        }

        match self.search(target).await? {
            Some(release) => {
                info!(
                    id = release.id,
                    tag = %release.tag_name,
                    draft = release.draft,
                    "found release by listing"
                );
                Ok(release)
            }
            None => Err(ReleaseError::ReleaseNotFound(format!(
                "no release with {} in {} (drafts included)",
                target.describe(),
                self.repo
            ))),
        }
    }

    /// A tag hit still has to carry the requested name
    fn check_name(release: GitHubRelease, target: &ReleaseTarget) -> ReleaseResult<GitHubRelease> {
        if let Some(name) = &target.name {
            if !release.has_name(name) {
                return Err(ReleaseError::ReleaseNameMismatch {
                    tag: release.tag_name.clone(),
                    expected: name.clone(),
                    actual: release.name.clone().unwrap_or_default(),
                });
            }
        }
        info!(id = release.id, tag = %release.tag_name, "found release by tag");
        Ok(release)
    }

    /// First match in list order; stops at the first short page
    async fn search(&self, target: &ReleaseTarget) -> ReleaseResult<Option<GitHubRelease>> {
        let mut page = 1;
        loop {
            let releases = self
                .provider
                .list_releases(self.repo, page, self.page_size)
                .await?;
            let count = releases.len();
            debug!(page, count, "scanning releases");

            if let Some(release) = releases.into_iter().find(|r| target.matches(r)) {
                return Ok(Some(release));
            }
            if count < self.page_size as usize {
                return Ok(None);
            }
            page += 1;
        }
    }
}
