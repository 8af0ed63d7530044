use async_trait::async_trait;

use crate::error::ServiceError;
use crate::models::{LanguageBreakdown, RepoSummary, UserRepoCount};

/// Remote lookups the search controller depends on.
///
/// [`GitHubClient`](crate::GitHubClient) is the HTTP implementation; tests
/// substitute scripted ones.
#[async_trait]
pub trait RepoService: Send + Sync + 'static {
    /// Fetch one page of a user's repositories.
    ///
    /// Fails with [`ServiceError::NotFound`] when the username does not exist.
    async fn get_user(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RepoSummary>, ServiceError>;

    /// Fetch the user's public repository count.
    async fn get_user_repos_count(&self, username: &str) -> Result<UserRepoCount, ServiceError>;

    /// Fetch the language breakdown behind a repository's languages endpoint.
    async fn get_languages(&self, languages_endpoint: &str)
        -> Result<LanguageBreakdown, ServiceError>;
}
