//! Dependency injection infrastructure
//!
//! The pipeline talks to the hosting service and to the workflow engine only
//! through the traits defined here, so tests can swap in the mocks.
//!
//! # Example (Testing)
//! ```
//! use release_assets::di::{ServiceContainer, mocks::*};
//! use std::sync::Arc;
//!
//! let provider = Arc::new(MockReleaseProvider::new());
//! let reporter = Arc::new(RecordingReporter::new());
//!
//! let container = ServiceContainer::with_providers(provider, reporter);
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{ReleaseProvider, Reporter};
