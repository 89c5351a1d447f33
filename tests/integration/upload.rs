//! End-to-end runs against a mock GitHub API

use super::common::TestContext;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn release_json(server: &MockServer, id: u64, tag: &str, name: &str, draft: bool) -> serde_json::Value {
    json!({
        "id": id,
        "tag_name": tag,
        "name": name,
        "draft": draft,
        "prerelease": false,
        "upload_url": format!("{}/uploads/releases/{}/assets{{?name,label}}", server.uri(), id),
        "html_url": format!("https://github.com/octo/widgets/releases/tag/{}", tag),
        "assets": [{
            "id": 11,
            "name": "existing.zip",
            "browser_download_url": format!("https://github.com/octo/widgets/releases/download/{}/existing.zip", tag),
            "size": 1,
            "content_type": "application/zip"
        }]
    })
}

fn asset_json(id: u64, tag: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "browser_download_url": format!("https://github.com/octo/widgets/releases/download/{}/{}", tag, name),
        "size": 1,
        "content_type": "application/octet-stream"
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_uploads_to_draft_release_found_by_listing() {
    let server = MockServer::start().await;

    // Drafts are invisible to the tag lookup
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/releases/tags/v1.0.0"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/releases"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            release_json(&server, 5, "v1.0.0", "First", true)
        ])))
        .expect(1)
        .mount(&server)
        .await;
    for (id, name) in [(21, "a.tar.gz"), (22, "b.tar.gz")] {
        Mock::given(method("POST"))
            .and(path("/uploads/releases/5/assets"))
            .and(query_param("name", name))
            .respond_with(ResponseTemplate::new(201).set_body_json(asset_json(id, "v1.0.0", name)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let ctx = TestContext::new();
    ctx.file("dist/a.tar.gz", "a");
    ctx.file("dist/b.tar.gz", "b");
    let mut cmd = ctx.command(&server.uri());
    cmd.env("INPUT_ASSET_PATHS", r#"["dist/*.tar.gz"]"#)
        .env("GITHUB_REF", "refs/tags/v1.0.0");

    tokio::task::spawn_blocking(move || {
        cmd.assert()
            .success()
            .stdout(predicate::str::contains("Uploaded 2 asset(s)"));
    })
    .await
    .unwrap();

    assert_eq!(
        ctx.outputs(),
        "download_urls=[\"https://github.com/octo/widgets/releases/download/v1.0.0/a.tar.gz\",\
         \"https://github.com/octo/widgets/releases/download/v1.0.0/b.tar.gz\"]\n"
    );
    let summary = std::fs::read_to_string(ctx.summary_file()).unwrap();
    assert!(summary.contains("First (draft)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_conflict_with_overwrite_denied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/releases/tags/v2.0.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(release_json(&server, 6, "v2.0.0", "Second", false)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/uploads/releases/6/assets"))
        .and(query_param("name", "existing.zip"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "errors": [{"resource": "ReleaseAsset", "code": "already_exists", "field": "name"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = TestContext::new();
    ctx.file("existing.zip", "new contents");
    let mut cmd = ctx.command(&server.uri());
    cmd.env("INPUT_ASSET_PATHS", r#"["existing.zip"]"#)
        .env("INPUT_RELEASE_TAG", "v2.0.0");

    tokio::task::spawn_blocking(move || {
        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("Asset 'existing.zip' already exists"))
            .stderr(predicate::str::contains("deny_overwrite"));
    })
    .await
    .unwrap();

    assert!(ctx.outputs().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_conflict_replaced_when_overwrite_allowed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/releases/tags/v2.0.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(release_json(&server, 6, "v2.0.0", "Second", false)),
        )
        .mount(&server)
        .await;
    // First attempt collides, the retry after deletion succeeds
    Mock::given(method("POST"))
        .and(path("/uploads/releases/6/assets"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "errors": [{"resource": "ReleaseAsset", "code": "already_exists", "field": "name"}]
        })))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/uploads/releases/6/assets"))
        .respond_with(ResponseTemplate::new(201).set_body_json(asset_json(30, "v2.0.0", "existing.zip")))
        .expect(1)
        .with_priority(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/repos/octo/widgets/releases/assets/11"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = TestContext::new();
    ctx.file("existing.zip", "new contents");
    let mut cmd = ctx.command(&server.uri());
    cmd.env("INPUT_ASSET_PATHS", r#"["existing.zip"]"#)
        .env("INPUT_RELEASE_TAG", "v2.0.0")
        .env("INPUT_DENY_OVERWRITE", "false");

    tokio::task::spawn_blocking(move || {
        cmd.assert().success();
    })
    .await
    .unwrap();

    assert_eq!(
        ctx.outputs(),
        "download_urls=[\"https://github.com/octo/widgets/releases/download/v2.0.0/existing.zip\"]\n"
    );
}
