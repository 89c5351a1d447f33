//! GitHub integration
//!
//! This module provides the REST client used to:
//! - Look up releases by tag and page through all releases (drafts included)
//! - Upload release assets
//! - Delete release assets

pub mod client;
pub mod types;

pub use client::GitHubClient;
pub use types::{GitHubRelease, ReleaseAsset, Repository, UploadOutcome};
