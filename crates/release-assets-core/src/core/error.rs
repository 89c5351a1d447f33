use thiserror::Error;

pub type ReleaseResult<T> = Result<T, ReleaseError>;

#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Malformed or missing inputs. Raised before any remote call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Release not found: {0}")]
    ReleaseNotFound(String),

    /// The release found by tag carries a different name than requested.
    #[error("Release tagged '{tag}' is named '{actual}', but '{expected}' was requested")]
    ReleaseNameMismatch {
        tag: String,
        expected: String,
        actual: String,
    },

    #[error("No files found matching: {}", .0.join(", "))]
    NoFilesFound(Vec<String>),

    #[error("Asset '{name}' already exists on the release (uploading {file})")]
    AssetConflict { name: String, file: String },

    /// The service and our view of the release disagree in a way we cannot repair.
    #[error("Inconsistent release state: {0}")]
    InconsistentState(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReleaseError {
    /// Whether the error came from talking to the remote service.
    pub fn is_transport(&self) -> bool {
        matches!(self, ReleaseError::Transport(_) | ReleaseError::Http(_))
    }
}
