//! Publishing collected files to a release

pub mod publisher;
pub mod reconciler;

pub use publisher::Publisher;
pub use reconciler::{RunResult, UploadReconciler, UploadedAsset};
