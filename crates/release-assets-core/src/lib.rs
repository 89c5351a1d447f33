//! Core types shared by the `release-assets` binary and library.
//!
//! Holds the error taxonomy for a run and the helper that turns an error
//! into the message printed before the process exits.

pub mod core;

pub use crate::core::error::{ReleaseError, ReleaseResult};
pub use crate::core::error_help::{format_error_with_help, ErrorHelp};
