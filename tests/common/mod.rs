#![allow(dead_code)]

use async_trait::async_trait;
use github_repo_explorer_lib::{
    LanguageBreakdown, RepoService, RepoSummary, ServiceError, UserRepoCount,
};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// A remote call seen by [`ScriptedService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    User {
        username: String,
        page: u32,
        per_page: u32,
    },
    Count {
        username: String,
    },
    Languages {
        endpoint: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    NotFound,
    ServerError,
}

impl Failure {
    fn into_error(self) -> ServiceError {
        match self {
            Failure::NotFound => ServiceError::NotFound,
            Failure::ServerError => ServiceError::Status(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

/// In-memory [`RepoService`] serving pages out of a fixed corpus.
#[derive(Default)]
pub struct ScriptedService {
    pub corpus: Vec<RepoSummary>,
    /// Overrides the count; defaults to the corpus length.
    pub count: Option<u64>,
    pub count_failure: Option<Failure>,
    /// Applies to every page.
    pub page_failure: Option<Failure>,
    /// Applies to the listed pages only.
    pub page_failures: HashMap<u32, Failure>,
    pub count_delay: Duration,
    /// Count and delay per username; overrides `count` and `count_delay`.
    pub user_counts: HashMap<String, (u64, Duration)>,
    /// Serve the whole corpus regardless of the requested page size.
    pub ignore_page_size: bool,
    /// Delay per requested page number.
    pub page_delays: HashMap<u32, Duration>,
    /// Breakdown and delay per languages endpoint.
    pub languages: HashMap<String, (LanguageBreakdown, Duration)>,
    pub calls: Mutex<Vec<Call>>,
}

impl ScriptedService {
    pub fn with_corpus(corpus: Vec<RepoSummary>) -> Self {
        ScriptedService {
            corpus,
            ..ScriptedService::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn user_calls(&self) -> Vec<(String, u32, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::User {
                    username,
                    page,
                    per_page,
                } => Some((username, page, per_page)),
                _ => None,
            })
            .collect()
    }

    /// Register a languages endpoint that answers after `delay`.
    pub fn serve_languages(&mut self, endpoint: &str, languages: &[(&str, u64)], delay: Duration) {
        let breakdown = languages
            .iter()
            .map(|(name, bytes)| (name.to_string(), *bytes))
            .collect();
        self.languages
            .insert(endpoint.to_string(), (breakdown, delay));
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl RepoService for ScriptedService {
    async fn get_user(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RepoSummary>, ServiceError> {
        self.record(Call::User {
            username: username.to_string(),
            page,
            per_page,
        });
        pause(self.page_delays.get(&page).copied().unwrap_or_default()).await;

        if let Some(failure) = self.page_failure.or(self.page_failures.get(&page).copied()) {
            return Err(failure.into_error());
        }

        if self.ignore_page_size {
            return Ok(self.corpus.clone());
        }

        let start = (page as usize - 1) * per_page as usize;
        Ok(self
            .corpus
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect())
    }

    async fn get_user_repos_count(&self, username: &str) -> Result<UserRepoCount, ServiceError> {
        self.record(Call::Count {
            username: username.to_string(),
        });
        let (count, delay) = self.user_counts.get(username).copied().unwrap_or((
            self.count.unwrap_or(self.corpus.len() as u64),
            self.count_delay,
        ));
        pause(delay).await;

        if let Some(failure) = self.count_failure {
            return Err(failure.into_error());
        }
        Ok(UserRepoCount {
            public_repo_count: count,
        })
    }

    async fn get_languages(&self, endpoint: &str) -> Result<LanguageBreakdown, ServiceError> {
        self.record(Call::Languages {
            endpoint: endpoint.to_string(),
        });
        let Some((breakdown, delay)) = self.languages.get(endpoint).cloned() else {
            return Err(ServiceError::NotFound);
        };
        pause(delay).await;
        Ok(breakdown)
    }
}

pub fn repo(name: &str) -> RepoSummary {
    RepoSummary {
        name: name.to_string(),
        description: Some(format!("desc {}", name)),
        languages_endpoint: None,
        html_url: None,
    }
}

pub fn repo_with_languages(name: &str, endpoint: &str) -> RepoSummary {
    RepoSummary {
        languages_endpoint: Some(endpoint.to_string()),
        ..repo(name)
    }
}

/// `repo1`..=`repoN`, none with a languages endpoint.
pub fn corpus(n: usize) -> Vec<RepoSummary> {
    (1..=n).map(|i| repo(&format!("repo{}", i))).collect()
}
