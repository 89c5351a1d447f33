//! Locating the release that receives the assets

pub mod resolver;

pub use resolver::{ReleaseResolver, ReleaseTarget, PAGE_SIZE};
