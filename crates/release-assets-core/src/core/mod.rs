pub mod error;
pub mod error_help;

pub use error::{ReleaseError, ReleaseResult};
