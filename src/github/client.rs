//! GitHub API client implementation

use crate::config::Config;
use crate::core::{ReleaseError, ReleaseResult};
use crate::di::traits::ReleaseProvider;
use crate::github::types::{ApiErrorBody, GitHubRelease, ReleaseAsset, Repository, UploadOutcome};
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient, StatusCode};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::Mutex;
use tracing::debug;

/// GitHub API client
pub struct GitHubClient {
    http_client: HttpClient,
    api_url: String,
    token: Option<String>,
    rate_limiter: Arc<RateLimiter>,
}

/// Rate limiter for GitHub API
struct RateLimiter {
    remaining: Mutex<u64>,
    reset_time: Mutex<SystemTime>,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: &Config) -> ReleaseResult<Self> {
        let token = config.token.clone();

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("release-assets/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            header::HeaderValue::from_static("2022-11-28"),
        );

        if let Some(ref token) = token {
            let mut value = header::HeaderValue::from_str(&format!("token {}", token))
                .map_err(|e| ReleaseError::Config(format!("Invalid GitHub token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ReleaseError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let has_token = token.is_some();
        Ok(Self {
            http_client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token,
            rate_limiter: Arc::new(RateLimiter {
                remaining: Mutex::new(if has_token { 5000 } else { 60 }),
                reset_time: Mutex::new(SystemTime::now() + Duration::from_secs(3600)),
            }),
        })
    }

    /// Get a published release by tag, `None` on 404
    pub async fn get_release_by_tag(
        &self,
        repo: &Repository,
        tag: &str,
    ) -> ReleaseResult<Option<GitHubRelease>> {
        let url = format!(
            "{}/repos/{}/{}/releases/tags/{}",
            self.api_url,
            repo.owner,
            repo.name,
            urlencoding::encode(tag)
        );
        let response = self.send(self.http_client.get(&url)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::ensure_success(response, "fetching release by tag").await?;
        Ok(Some(Self::parse_json(response).await?))
    }

    /// Get one page of releases, drafts included
    pub async fn list_releases(
        &self,
        repo: &Repository,
        page: u32,
        per_page: u32,
    ) -> ReleaseResult<Vec<GitHubRelease>> {
        let url = format!("{}/repos/{}/{}/releases", self.api_url, repo.owner, repo.name);
        let request = self
            .http_client
            .get(&url)
            .query(&[("per_page", per_page), ("page", page)]);
        let response = self.send(request).await?;
        let response = Self::ensure_success(response, "listing releases").await?;
        Self::parse_json(response).await
    }

    /// Upload an asset to a release
    pub async fn upload_asset(
        &self,
        release: &GitHubRelease,
        name: &str,
        data: Vec<u8>,
    ) -> ReleaseResult<UploadOutcome> {
        let request = self
            .http_client
            .post(release.upload_endpoint())
            .query(&[("name", name)])
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(data);
        let response = self.send(request).await?;

        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            let body = response.text().await.unwrap_or_default();
            let error: ApiErrorBody = serde_json::from_str(&body).unwrap_or_default();
            if error.is_already_exists() {
                return Ok(UploadOutcome::AlreadyExists);
            }
            return Err(ReleaseError::Transport(format!(
                "Failed uploading {}: HTTP 422 - {}",
                name,
                error.message.unwrap_or(body)
            )));
        }

        let context = format!("uploading {}", name);
        let response = Self::ensure_success(response, &context).await?;
        let asset: ReleaseAsset = Self::parse_json(response).await?;
        Ok(UploadOutcome::Uploaded(asset))
    }

    /// Delete a release asset
    pub async fn delete_asset(&self, repo: &Repository, asset_id: u64) -> ReleaseResult<()> {
        let url = format!(
            "{}/repos/{}/{}/releases/assets/{}",
            self.api_url, repo.owner, repo.name, asset_id
        );
        let response = self.send(self.http_client.delete(&url)).await?;
        Self::ensure_success(response, "deleting asset").await?;
        Ok(())
    }

    /// Send a request, honouring and updating the rate limit
    async fn send(&self, request: reqwest::RequestBuilder) -> ReleaseResult<reqwest::Response> {
        self.check_rate_limit().await?;

        let response = request.send().await?;
        debug!(status = %response.status(), url = %response.url(), "GitHub API response");

        self.update_rate_limit(&response).await;
        Ok(response)
    }

    /// Turn a non-success response into a transport error
    async fn ensure_success(
        response: reqwest::Response,
        context: &str,
    ) -> ReleaseResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or(body);
        Err(ReleaseError::Transport(format!(
            "GitHub API error while {}: HTTP {} - {}",
            context, status, message
        )))
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> ReleaseResult<T> {
        Ok(response.json().await?)
    }

    /// Check if we're within rate limits
    async fn check_rate_limit(&self) -> ReleaseResult<()> {
        let remaining = *self.rate_limiter.remaining.lock().await;
        let reset_time = *self.rate_limiter.reset_time.lock().await;

        if remaining == 0 {
            let now = SystemTime::now();
            if now < reset_time {
                let wait_duration = reset_time.duration_since(now).unwrap_or(Duration::ZERO);
                return Err(ReleaseError::Transport(format!(
                    "GitHub API rate limit exceeded. Reset in {} seconds. {}",
                    wait_duration.as_secs(),
                    if self.token.is_none() {
                        "Consider setting GITHUB_TOKEN to increase rate limit to 5000/hour."
                    } else {
                        ""
                    }
                )));
            }
        }

        Ok(())
    }

    /// Update rate limit from response headers
    async fn update_rate_limit(&self, response: &reqwest::Response) {
        if let Some(remaining) = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
        {
            *self.rate_limiter.remaining.lock().await = remaining;
        }

        if let Some(reset) = response
            .headers()
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
        {
            *self.rate_limiter.reset_time.lock().await =
                SystemTime::UNIX_EPOCH + Duration::from_secs(reset);
        }
    }
}

// Implement ReleaseProvider trait
#[async_trait]
impl ReleaseProvider for GitHubClient {
    async fn get_release_by_tag(
        &self,
        repo: &Repository,
        tag: &str,
    ) -> ReleaseResult<Option<GitHubRelease>> {
        Self::get_release_by_tag(self, repo, tag).await
    }

    async fn list_releases(
        &self,
        repo: &Repository,
        page: u32,
        per_page: u32,
    ) -> ReleaseResult<Vec<GitHubRelease>> {
        Self::list_releases(self, repo, page, per_page).await
    }

    async fn upload_asset(
        &self,
        release: &GitHubRelease,
        name: &str,
        data: Vec<u8>,
    ) -> ReleaseResult<UploadOutcome> {
        Self::upload_asset(self, release, name, data).await
    }

    async fn delete_asset(&self, repo: &Repository, asset_id: u64) -> ReleaseResult<()> {
        Self::delete_asset(self, repo, asset_id).await
    }
}
