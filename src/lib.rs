//! Upload locally built files to a GitHub release
//!
//! The library resolves the target release (drafts included), expands path
//! patterns into an upload plan, uploads each file in order and reports the
//! resulting download URLs back to the workflow.

pub use release_assets_core::{format_error_with_help, ErrorHelp, ReleaseError, ReleaseResult};

/// Core module re-exported from release-assets-core.
pub mod core {
    pub use release_assets_core::core::*;
}

/// Configuration and input validation.
pub mod config;

/// GitHub REST client and wire types.
pub mod github;

/// Dependency injection infrastructure.
pub mod di;

/// Path pattern expansion.
pub mod assets;

/// Release lookup.
pub mod release;

/// Upload reconciliation and the run pipeline.
pub mod publish;

/// Outputs and step summary.
pub mod report;
