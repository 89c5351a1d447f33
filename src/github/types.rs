//! GitHub API type definitions

use crate::core::{ReleaseError, ReleaseResult};
use serde::{Deserialize, Serialize};

/// Repository coordinates (`owner/repo`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    /// Parse the `owner/repo` form used by `GITHUB_REPOSITORY`
    pub fn parse(slug: &str) -> ReleaseResult<Self> {
        let mut parts = slug.trim().split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ReleaseError::InvalidInput(format!(
                "Repository must be in the form owner/repo, got '{}'",
                slug
            ))),
        }
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// GitHub release information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRelease {
    pub id: u64,
    pub tag_name: String,
    pub name: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    /// Hypermedia template, e.g. `https://uploads.github.com/.../assets{?name,label}`
    pub upload_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl GitHubRelease {
    /// Upload endpoint with the URI template suffix removed
    pub fn upload_endpoint(&self) -> &str {
        match self.upload_url.find('{') {
            Some(idx) => &self.upload_url[..idx],
            None => &self.upload_url,
        }
    }

    /// Whether the release title equals `name` exactly
    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Title for display, falling back to the tag
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.tag_name,
        }
    }
}

/// GitHub release asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub id: u64,
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub content_type: String,
}

/// Result of an upload attempt that reached the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded(ReleaseAsset),
    /// The release already has an asset with this name
    AlreadyExists,
}

/// Error body returned by the GitHub REST API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
}

impl ApiErrorBody {
    /// Whether the body reports a name collision (`already_exists`)
    pub fn is_already_exists(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.code.as_deref() == Some("already_exists"))
    }
}
