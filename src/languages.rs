use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::{LanguageEntry, RepoSummary};
use crate::service::RepoService;

/// Fans out one languages lookup per repository on a page.
pub struct LanguageAggregator<S> {
    service: Arc<S>,
}

impl<S: RepoService> LanguageAggregator<S> {
    pub fn new(service: Arc<S>) -> Self {
        LanguageAggregator { service }
    }

    /// Repositories that have a languages endpoint, as `(name, endpoint)`.
    pub fn targets(repos: &[RepoSummary]) -> Vec<(String, String)> {
        repos
            .iter()
            .filter_map(|repo| {
                repo.languages_endpoint()
                    .map(|endpoint| (repo.name.clone(), endpoint.to_string()))
            })
            .collect()
    }

    /// Issue every lookup concurrently and hand each entry to `on_entry` as it
    /// completes. Failed lookups are logged and skipped.
    ///
    /// Returns the number of entries delivered.
    pub async fn run<F>(&self, repos: &[RepoSummary], mut on_entry: F) -> usize
    where
        F: FnMut(LanguageEntry),
    {
        let mut pending: FuturesUnordered<_> = Self::targets(repos)
            .into_iter()
            .map(|(repo_name, endpoint)| {
                let service = self.service.clone();
                async move {
                    let result = service.get_languages(&endpoint).await;
                    (repo_name, result)
                }
            })
            .collect();

        let mut delivered = 0;
        while let Some((repo_name, result)) = pending.next().await {
            match result {
                Ok(breakdown) => {
                    debug!("Loaded {} languages for '{}'", breakdown.len(), repo_name);
                    on_entry(LanguageEntry::from_breakdown(repo_name, &breakdown));
                    delivered += 1;
                }
                Err(e) => {
                    warn!("Languages lookup failed for '{}': {}", repo_name, e);
                }
            }
        }

        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::models::{LanguageBreakdown, UserRepoCount};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Serves languages from the endpoint string; endpoints ending in `/fail` error.
    /// Endpoints containing `slow` finish later than the rest.
    struct EndpointEcho {
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RepoService for EndpointEcho {
        async fn get_user(&self, _: &str, _: u32, _: u32) -> Result<Vec<RepoSummary>, ServiceError> {
            Ok(Vec::new())
        }

        async fn get_user_repos_count(&self, _: &str) -> Result<UserRepoCount, ServiceError> {
            Ok(UserRepoCount { public_repo_count: 0 })
        }

        async fn get_languages(&self, endpoint: &str) -> Result<LanguageBreakdown, ServiceError> {
            self.requested.lock().unwrap().push(endpoint.to_string());
            if endpoint.contains("slow") {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            if endpoint.ends_with("/fail") {
                return Err(ServiceError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
            }
            Ok([(endpoint.to_string(), 1)].into_iter().collect())
        }
    }

    fn repo(name: &str, endpoint: Option<&str>) -> RepoSummary {
        RepoSummary {
            name: name.to_string(),
            description: None,
            languages_endpoint: endpoint.map(str::to_string),
            html_url: None,
        }
    }

    #[test]
    fn skips_repos_without_endpoint() {
        let repos = vec![
            repo("a", Some("https://x/a")),
            repo("b", None),
            repo("c", Some("")),
        ];
        let targets = LanguageAggregator::<EndpointEcho>::targets(&repos);
        assert_eq!(targets, vec![("a".to_string(), "https://x/a".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn delivers_entries_in_completion_order() {
        let service = Arc::new(EndpointEcho {
            requested: Mutex::new(Vec::new()),
        });
        let aggregator = LanguageAggregator::new(service.clone());
        let repos = vec![
            repo("first", Some("https://x/slow")),
            repo("second", Some("https://x/fast")),
            repo("broken", Some("https://x/fail")),
            repo("bare", None),
        ];

        let mut seen = Vec::new();
        let delivered = aggregator.run(&repos, |entry| seen.push(entry)).await;

        assert_eq!(delivered, 2);
        assert_eq!(service.requested.lock().unwrap().len(), 3);
        assert_eq!(seen[0].repo_name, "second");
        assert_eq!(seen[1].repo_name, "first");
        assert_eq!(seen[1].languages, vec!["https://x/slow"]);
    }
}
