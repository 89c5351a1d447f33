//! Turning path patterns into the list of files to upload

pub mod collector;

pub use collector::{AssetCollector, UploadPlan};
