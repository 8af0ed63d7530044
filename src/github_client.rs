use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ServiceError;
use crate::models::{LanguageBreakdown, RepoSummary, UserRepoCount};
use crate::service::RepoService;

/// Public GitHub REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Subset of the `/users/{username}` profile we care about.
#[derive(Debug, Deserialize)]
struct UserProfile {
    public_repos: u64,
}

/// Check that `username` can only ever name a user path segment.
///
/// GitHub logins are ASCII alphanumerics and hyphens.
fn checked_username(username: &str) -> Result<&str, ServiceError> {
    let valid = !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(username)
    } else {
        debug!("Rejecting username '{}'", username);
        Err(ServiceError::InvalidUsername(username.to_string()))
    }
}

/// [`RepoService`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a client rooted at `base_url` (e.g. [`DEFAULT_API_URL`]).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ServiceError::InvalidConfig("API URL is empty".into()));
        }

        let client = Client::builder()
            .user_agent(concat!("github-repo-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GitHubClient { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` and decode the JSON body, mapping 404 to `NotFound`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ServiceError> {
        debug!("Requesting URL: {}", url);
        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Not found: {}", url);
            return Err(ServiceError::NotFound);
        }
        if !status.is_success() {
            warn!("API error: {} on {}", status, url);
            return Err(ServiceError::Status(status));
        }

        response.json::<T>().await.map_err(ServiceError::Decode)
    }
}

#[async_trait]
impl RepoService for GitHubClient {
    async fn get_user(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RepoSummary>, ServiceError> {
        let url = format!(
            "{}/users/{}/repos?page={}&per_page={}",
            self.base_url,
            checked_username(username)?,
            page,
            per_page
        );
        let repos: Vec<RepoSummary> = self.get_json(&url).await?;
        debug!("Fetched {} repos for '{}' page {}", repos.len(), username, page);
        Ok(repos)
    }

    async fn get_user_repos_count(&self, username: &str) -> Result<UserRepoCount, ServiceError> {
        let url = format!("{}/users/{}", self.base_url, checked_username(username)?);
        let profile: UserProfile = self.get_json(&url).await?;
        Ok(UserRepoCount {
            public_repo_count: profile.public_repos,
        })
    }

    async fn get_languages(
        &self,
        languages_endpoint: &str,
    ) -> Result<LanguageBreakdown, ServiceError> {
        self.get_json(languages_endpoint).await
    }
}
