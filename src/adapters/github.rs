//! GitHub adapter implementing the RepoSource trait
//!
//! Uses the GitHub REST API v3 to list a user's repositories.

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use std::sync::Arc;
use tracing::{debug, warn};

use super::{RepoSource, SourceError, SourceRepo, SourceResult};
use crate::auth::TokenProvider;

/// GitHub API base URL
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Largest page size the listing endpoint accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Default cap on pages walked per listing (bounds a run to 1000 repositories)
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// GitHub adapter for RepoSource trait
pub struct GitHubAdapter {
    client: Client,
    auth: Arc<dyn TokenProvider>,
    api_url: String,
    per_page: u32,
    max_pages: u32,
}

impl GitHubAdapter {
    /// Create a new GitHubAdapter with the given token provider
    pub fn new(auth: Arc<dyn TokenProvider>) -> SourceResult<Self> {
        Self::with_api_url(auth, GITHUB_API_URL)
    }

    /// Create a new GitHubAdapter with a custom API URL (for testing)
    pub fn with_api_url(
        auth: Arc<dyn TokenProvider>,
        api_url: impl Into<String>,
    ) -> SourceResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("portfolio-feed/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;

        let api_url = api_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            auth,
            api_url,
            per_page: MAX_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        })
    }

    /// Override page size (clamped to 1..=100) and page cap (at least 1)
    pub fn with_paging(mut self, per_page: u32, max_pages: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PAGE_SIZE);
        self.max_pages = max_pages.max(1);
        self
    }

    /// Get authorization headers with token from the token provider
    async fn auth_headers(&self) -> SourceResult<header::HeaderMap> {
        let token = self
            .auth
            .token()
            .await
            .map_err(|e| SourceError::AuthenticationFailed { message: e.to_string() })?
            .ok_or_else(|| SourceError::AuthenticationFailed {
                message: "No GitHub token configured".to_string(),
            })?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| SourceError::AuthenticationFailed { message: e.to_string() })?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );

        Ok(headers)
    }

    /// URL of one page of the user's repository listing
    fn page_url(&self, account: &str, page: u32) -> String {
        format!(
            "{}/users/{}/repos?type=all&sort=updated&direction=desc&per_page={}&page={}",
            self.api_url,
            urlencoding::encode(account),
            self.per_page,
            page
        )
    }

    /// Convert a non-success response into a SourceError
    async fn status_error(account: &str, response: Response) -> SourceError {
        let status = response.status();

        match status.as_u16() {
            401 => SourceError::AuthenticationFailed {
                message: "Invalid or expired token".to_string(),
            },
            403 | 429
                if response
                    .headers()
                    .get("x-ratelimit-remaining")
                    .and_then(|v| v.to_str().ok())
                    == Some("0") =>
            {
                let reset = response
                    .headers()
                    .get("x-ratelimit-reset")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown")
                    .to_string();
                SourceError::RateLimited { reset }
            }
            404 => SourceError::AccountNotFound {
                account: account.to_string(),
            },
            _ => {
                let body = response.text().await.unwrap_or_default();
                SourceError::ApiError {
                    status: status.as_u16(),
                    message: body,
                }
            }
        }
    }

    /// Fetch and decode a single page
    async fn fetch_page(
        &self,
        account: &str,
        headers: &header::HeaderMap,
        url: &str,
    ) -> SourceResult<Vec<SourceRepo>> {
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .send()
            .await
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::status_error(account, response).await);
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::SerdeError(format!("Failed to parse response: {e}")))
    }
}

#[async_trait]
impl RepoSource for GitHubAdapter {
    /// Walk pages one at a time; a short page ends the listing.
    async fn list_repos(&self, account: &str) -> SourceResult<Vec<SourceRepo>> {
        let headers = self.auth_headers().await?;
        let mut repos = Vec::new();

        for page in 1..=self.max_pages {
            let url = self.page_url(account, page);
            let batch = self.fetch_page(account, &headers, &url).await?;
            let count = batch.len();
            debug!(account, page, count, "fetched repository page");
            repos.extend(batch);

            if count < self.per_page as usize {
                return Ok(repos);
            }
        }

        warn!(
            account,
            max_pages = self.max_pages,
            "page cap reached with a full last page; listing may be truncated"
        );
        Ok(repos)
    }

    fn name(&self) -> &'static str {
        "github"
    }
}
