//! Validation of the raw string inputs handed over by the workflow engine

use crate::core::{ReleaseError, ReleaseResult};
use crate::release::ReleaseTarget;

const TAG_REF_PREFIX: &str = "refs/tags/";

/// Inputs exactly as received, before validation
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    /// JSON-encoded array of path patterns
    pub asset_paths: String,
    pub release_tag: Option<String>,
    pub release_name: Option<String>,
    /// `true`/`false` in any of the spellings the workflow engine accepts
    pub deny_overwrite: Option<String>,
    /// Triggering ref, e.g. `refs/tags/v1.0.0`
    pub git_ref: Option<String>,
}

/// Validated inputs for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub patterns: Vec<String>,
    pub target: ReleaseTarget,
    pub deny_overwrite: bool,
}

impl Inputs {
    /// Validate raw inputs. Performs no I/O.
    pub fn parse(raw: &RawInputs) -> ReleaseResult<Self> {
        let patterns = parse_patterns(&raw.asset_paths)?;

        let tag = non_empty(raw.release_tag.as_deref())
            .or_else(|| raw.git_ref.as_deref().and_then(tag_from_ref));
        let name = non_empty(raw.release_name.as_deref());

        if tag.is_none() && name.is_none() {
            return Err(ReleaseError::InvalidInput(
                "No release_tag or release_name given, and the triggering ref is not a tag"
                    .to_string(),
            ));
        }

        let deny_overwrite = match non_empty(raw.deny_overwrite.as_deref()) {
            Some(value) => parse_bool(&value)?,
            None => true,
        };

        Ok(Self {
            patterns,
            target: ReleaseTarget { tag, name },
            deny_overwrite,
        })
    }
}

fn parse_patterns(raw: &str) -> ReleaseResult<Vec<String>> {
    if raw.trim().is_empty() {
        return Err(ReleaseError::InvalidInput("asset_paths is required".to_string()));
    }
    let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
        ReleaseError::InvalidInput(format!("asset_paths is not valid JSON: {}", e))
    })?;

    let items = value.as_array().ok_or_else(|| {
        ReleaseError::InvalidInput("asset_paths must be a JSON array of strings".to_string())
    })?;

    if items.is_empty() {
        return Err(ReleaseError::InvalidInput(
            "asset_paths must contain at least one pattern".to_string(),
        ));
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item.as_str().map(str::trim) {
            Some(pattern) if !pattern.is_empty() => Ok(pattern.to_string()),
            _ => Err(ReleaseError::InvalidInput(format!(
                "asset_paths[{}] must be a non-empty string, got {}",
                i, item
            ))),
        })
        .collect()
}

/// Extract `<tag>` from `refs/tags/<tag>`
pub fn tag_from_ref(git_ref: &str) -> Option<String> {
    git_ref
        .strip_prefix(TAG_REF_PREFIX)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
}

/// Booleans follow the YAML 1.2 core schema spellings
fn parse_bool(value: &str) -> ReleaseResult<bool> {
    match value {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        other => Err(ReleaseError::InvalidInput(format!(
            "deny_overwrite must be true or false, got '{}'",
            other
        ))),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
