//! Failures detected before any remote call

use super::common::TestContext;
use predicates::prelude::*;

// Nothing listens here; any request would fail with a transport error
const UNREACHABLE_API: &str = "http://127.0.0.1:9";

#[test]
fn test_invalid_json_asset_paths() {
    let ctx = TestContext::new();

    ctx.command(UNREACHABLE_API)
        .env("INPUT_ASSET_PATHS", "dist/*.zip")
        .env("INPUT_RELEASE_TAG", "v1.0.0")
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::Invalid input"))
        .stderr(predicate::str::contains("asset_paths is not valid JSON"));

    assert!(ctx.outputs().is_empty());
}

#[test]
fn test_empty_array_rejected() {
    let ctx = TestContext::new();

    ctx.command(UNREACHABLE_API)
        .env("INPUT_ASSET_PATHS", "[]")
        .env("INPUT_RELEASE_TAG", "v1.0.0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one pattern"));
}

#[test]
fn test_no_release_target_on_branch() {
    let ctx = TestContext::new();
    ctx.file("dist/a.zip", "a");

    ctx.command(UNREACHABLE_API)
        .env("INPUT_ASSET_PATHS", r#"["dist/*.zip"]"#)
        .env("GITHUB_REF", "refs/heads/main")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No release_tag or release_name"));
}

#[test]
fn test_bad_deny_overwrite() {
    let ctx = TestContext::new();

    ctx.command(UNREACHABLE_API)
        .env("INPUT_ASSET_PATHS", r#"["a"]"#)
        .env("INPUT_RELEASE_TAG", "v1")
        .env("INPUT_DENY_OVERWRITE", "maybe")
        .assert()
        .failure()
        .stderr(predicate::str::contains("deny_overwrite must be true or false"));
}

#[test]
fn test_error_annotation_is_escaped() {
    let ctx = TestContext::new();

    ctx.command(UNREACHABLE_API)
        .env("INPUT_ASSET_PATHS", r#"["a"]"#)
        .env("INPUT_RELEASE_TAG", "v1")
        .env("INPUT_DENY_OVERWRITE", "100%")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::Invalid input: deny_overwrite must be true or false, got '100%25'",
        ));
}

#[test]
fn test_missing_files_fail_without_output() {
    let ctx = TestContext::new();

    ctx.command(UNREACHABLE_API)
        .env("INPUT_ASSET_PATHS", r#"["missing/*.zip"]"#)
        .env("GITHUB_REF", "refs/tags/v1.0.0")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::warning::No files matched pattern 'missing/*.zip'",
        ))
        .stderr(predicate::str::contains("No files found matching: missing/*.zip"));

    assert!(ctx.outputs().is_empty());
}

#[test]
fn test_warning_logged_once() {
    let ctx = TestContext::new();
    ctx.file("dist/a.zip", "a");

    let assert = ctx
        .command(UNREACHABLE_API)
        .env("INPUT_ASSET_PATHS", r#"["missing/*.zip", "dist/*.zip"]"#)
        .env("INPUT_RELEASE_TAG", "v1.0.0")
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert_eq!(stderr.matches("No files matched pattern").count(), 1, "{}", stderr);
}
