//! GitHub REST API client for registration issues

use crate::error::{Error, Result};
use crate::traits::IssueApi;
use crate::types::{Issue, IssueNumber, RepoInfo};
use reqwest::StatusCode;
use serde::Serialize;
use std::future::Future;

/// Default REST endpoint when `GITHUB_API_URL` is unset
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const ACCEPT: &str = "application/vnd.github+json";

/// Request body for comment creation
#[derive(Debug, Serialize)]
struct CreateComment<'a> {
    body: &'a str,
}

/// GitHub API client implementing [`IssueApi`]
pub struct GitHubApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for GitHubApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl GitHubApiClient {
    /// Create a new GitHub API client
    pub fn new(base_url: String, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("regcheck/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let base_url = std::env::var("GITHUB_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token = std::env::var("GITHUB_TOKEN").ok().filter(|s| !s.is_empty());

        Self::new(base_url, token)
    }

    fn issue_url(&self, repo: &RepoInfo, number: IssueNumber) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}",
            self.base_url,
            repo.owner,
            repo.repo,
            number.get()
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION);
        match self.token {
            Some(ref token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn fetch_issue(&self, repo: &RepoInfo, number: IssueNumber) -> Result<Issue> {
        let url = self.issue_url(repo, number);
        tracing::debug!(%url, "fetching registration issue");

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to fetch issue {}: {}", number, e)))?;

        let response = check_status(response, || format!("issue {} in {}", number, repo))?;

        response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Failed to parse issue response: {}", e)))
    }

    async fn post_comment(&self, repo: &RepoInfo, number: IssueNumber, body: &str) -> Result<()> {
        let url = format!("{}/comments", self.issue_url(repo, number));
        tracing::debug!(%url, chars = body.chars().count(), "creating issue comment");

        let response = self
            .authorize(self.client.post(&url))
            .json(&CreateComment { body })
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to comment on issue {}: {}", number, e)))?;

        check_status(response, || format!("issue {} in {}", number, repo))?;
        Ok(())
    }
}

impl IssueApi for GitHubApiClient {
    fn get_issue<'a>(
        &'a self,
        repo: &'a RepoInfo,
        number: IssueNumber,
    ) -> impl Future<Output = Result<Issue>> + Send + 'a {
        self.fetch_issue(repo, number)
    }

    fn create_comment<'a>(
        &'a self,
        repo: &'a RepoInfo,
        number: IssueNumber,
        body: &'a str,
    ) -> impl Future<Output = Result<()>> + Send + 'a {
        self.post_comment(repo, number, body)
    }
}

/// Map a non-success response to an error
fn check_status(
    response: reqwest::Response,
    target: impl FnOnce() -> String,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let remaining = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok());

    Err(classify_failure(status, remaining, &target()))
}

/// Classify a failed status into the error taxonomy
fn classify_failure(status: StatusCode, ratelimit_remaining: Option<&str>, target: &str) -> Error {
    match status {
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimitExceeded(format!(
            "GitHub API rate limit exceeded while accessing {}",
            target
        )),
        StatusCode::FORBIDDEN if ratelimit_remaining == Some("0") => {
            Error::RateLimitExceeded(format!(
                "GitHub API rate limit exceeded while accessing {}. Remaining: 0. Consider using GITHUB_TOKEN.",
                target
            ))
        }
        StatusCode::NOT_FOUND => Error::IssueNotFound(target.to_string()),
        _ => Error::Http(format!("GitHub API returned {} for {}", status, target)),
    }
}
