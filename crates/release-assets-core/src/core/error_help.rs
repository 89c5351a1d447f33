//! Human-readable suggestions attached to errors on exit

use crate::core::error::ReleaseError;

/// Provides a follow-up hint for an error
pub trait ErrorHelp {
    /// Suggestion shown below the error message, if any
    fn help(&self) -> Option<&'static str>;
}

impl ErrorHelp for ReleaseError {
    fn help(&self) -> Option<&'static str> {
        match self {
            ReleaseError::InvalidInput(_) => Some(
                "asset_paths must be a JSON array of strings, and a release_tag or \
                 release_name is required unless the workflow runs on a tag push.",
            ),
            ReleaseError::ReleaseNotFound(_) => Some(
                "Create the release before uploading assets. Draft releases are only \
                 visible to tokens with write access to the repository.",
            ),
            ReleaseError::ReleaseNameMismatch { .. } => {
                Some("Drop release_name or make it match the release's title exactly.")
            }
            ReleaseError::NoFilesFound(_) => Some(
                "Patterns are resolved relative to the workspace. Check that the build \
                 step produced the files before this step runs.",
            ),
            ReleaseError::AssetConflict { .. } => {
                Some("Set deny_overwrite to false to replace existing assets.")
            }
            ReleaseError::InconsistentState(_) => Some(
                "Another job may be modifying the same release. Re-run once it finishes.",
            ),
            ReleaseError::Transport(_) | ReleaseError::Http(_) => {
                Some("Check the token's permissions (contents: write) and the API rate limit.")
            }
            ReleaseError::Io(_) | ReleaseError::Json(_) | ReleaseError::Config(_) => None,
        }
    }
}

/// Format an error with its suggestion, if it has one
pub fn format_error_with_help(error: &ReleaseError) -> String {
    match error.help() {
        Some(help) => format!("Error: {}\n\nhelp: {}", error, help),
        None => format!("Error: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_suggests_overwrite() {
        let err = ReleaseError::AssetConflict {
            name: "app.zip".to_string(),
            file: "dist/app.zip".to_string(),
        };
        let formatted = format_error_with_help(&err);
        assert!(formatted.starts_with("Error: Asset 'app.zip'"));
        assert!(formatted.contains("deny_overwrite"));
    }

    #[test]
    fn test_config_error_has_no_help() {
        let err = ReleaseError::Config("bad token".to_string());
        assert_eq!(
            format_error_with_help(&err),
            "Error: Configuration error: bad token"
        );
    }
}
