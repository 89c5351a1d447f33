//! Integration tests module
//!
//! These run the `release-assets` binary the way a workflow step would,
//! with inputs passed through the environment.

pub mod common;
pub mod inputs;
pub mod upload;
