//! Search lifecycle: issues the count and page lookups, merges results into
//! [`SearchState`] and fans out the languages lookups for the page.
//!
//! Each `search` bumps a generation number kept inside the state. Every
//! completion checks it in the same update that applies its result, so a
//! lookup that belongs to an earlier search, page or page size is dropped
//! instead of overwriting newer state. Nothing is cancelled; stale tasks run
//! to completion and are ignored.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::FailureKind;
use crate::languages::LanguageAggregator;
use crate::models::{LanguageEntry, RepoPage, RepoSummary};
use crate::pagination::PaginationState;
use crate::service::RepoService;

pub const USERNAME_NOT_FOUND_MESSAGE: &str = "Username not found. Please enter a valid username.";

/// A user-facing message raised by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Notification {
            message: message.into(),
            raised_at: Utc::now(),
        }
    }
}

/// Receives user-facing notifications.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, notification: Notification);
}

impl Notifier for mpsc::UnboundedSender<Notification> {
    fn notify(&self, notification: Notification) {
        if self.send(notification).is_err() {
            debug!("Notification dropped; receiver is gone");
        }
    }
}

/// Everything the presentation layer can observe about the active search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchState {
    pub username: String,
    pub repos: Vec<RepoSummary>,
    /// Keyed by repository name.
    pub languages: BTreeMap<String, LanguageEntry>,
    pub pagination: PaginationState,
    pub is_searching: bool,
    pub no_repos: bool,
    #[serde(skip)]
    pub(crate) generation: u64,
}

impl SearchState {
    /// The displayed page.
    pub fn page(&self) -> RepoPage {
        RepoPage::new(
            self.repos.clone(),
            self.pagination.current_page,
            self.pagination.page_size,
            self.pagination.total_count,
        )
    }

    pub fn has_more_repos(&self) -> bool {
        self.pagination.has_more_repos
    }

    pub fn current_page(&self) -> u32 {
        self.pagination.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.pagination.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.pagination.total_count
    }

    pub fn languages_for(&self, repo_name: &str) -> Option<&LanguageEntry> {
        self.languages.get(repo_name)
    }

    /// Tag of the most recent search; bumped on every issued search.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Tasks spawned by one search.
#[derive(Debug)]
pub struct SearchHandle {
    generation: u64,
    count: JoinHandle<()>,
    page: JoinHandle<()>,
}

impl SearchHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.count.is_finished() && self.page.is_finished()
    }

    /// Wait for the count lookup, the page lookup and the page's languages.
    pub async fn settled(self) {
        for (name, task) in [("count", self.count), ("page", self.page)] {
            if let Err(e) = task.await {
                error!("{} lookup task failed: {}", name, e);
            }
        }
    }
}

/// Drives searches against a [`RepoService`].
///
/// Lookups are spawned on the current tokio runtime, so the mutating methods
/// must be called from within one.
pub struct SearchController<S> {
    service: Arc<S>,
    state: Arc<watch::Sender<SearchState>>,
    notifier: Arc<dyn Notifier>,
}

impl<S: RepoService> SearchController<S> {
    pub fn new(service: S, notifier: impl Notifier) -> Self {
        Self::with_service(Arc::new(service), notifier)
    }

    pub fn with_service(service: Arc<S>, notifier: impl Notifier) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        SearchController {
            service,
            state: Arc::new(state),
            notifier: Arc::new(notifier),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Start a search for `username` at the current page and page size.
    ///
    /// Returns `None`, without touching state, when `username` is empty.
    pub fn search(&self, username: &str) -> Option<SearchHandle> {
        if username.is_empty() {
            debug!("Ignoring search with an empty username");
            return None;
        }

        let mut issued = (0, 1, 0);
        self.state.send_modify(|state| {
            state.generation += 1;
            state.is_searching = true;
            state.no_repos = false;
            state.username = username.to_string();
            issued = (
                state.generation,
                state.pagination.current_page,
                state.pagination.page_size,
            );
        });
        let (generation, page, page_size) = issued;

        info!(
            "Searching '{}' page {} (size {}), generation {}",
            username, page, page_size, generation
        );

        let count_task = tokio::spawn(Self::count_lookup(
            self.service.clone(),
            self.state.clone(),
            username.to_string(),
            generation,
        ));
        let page_task = tokio::spawn(Self::page_lookup(
            self.service.clone(),
            self.state.clone(),
            self.notifier.clone(),
            username.to_string(),
            page,
            page_size,
            generation,
        ));

        Some(SearchHandle {
            generation,
            count: count_task,
            page: page_task,
        })
    }

    /// Switch page size, go back to page 1 and search again.
    ///
    /// A size of 0 is rejected and leaves state unchanged.
    pub fn change_page_size(&self, page_size: u32) -> Option<SearchHandle> {
        let mut username = String::new();
        let accepted = self.state.send_if_modified(|state| {
            username = state.username.clone();
            state.pagination.resize(page_size)
        });

        if !accepted {
            warn!("Rejected page size {}", page_size);
            return None;
        }
        self.search(&username)
    }

    /// Jump to page `page` and search again. Page 0 is rejected.
    pub fn go_to_page(&self, page: u32) -> Option<SearchHandle> {
        let mut username = String::new();
        let accepted = self.state.send_if_modified(|state| {
            username = state.username.clone();
            state.pagination.go_to(page)
        });

        if !accepted {
            warn!("Rejected page {}", page);
            return None;
        }
        self.search(&username)
    }

    async fn count_lookup(
        service: Arc<S>,
        state: Arc<watch::Sender<SearchState>>,
        username: String,
        generation: u64,
    ) {
        let count = match service.get_user_repos_count(&username).await {
            Ok(count) => count,
            Err(e) => {
                debug!("Count lookup failed for '{}': {}", username, e);
                return;
            }
        };

        let applied = state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.pagination.total_count = count.public_repo_count;
            state.pagination.refresh();
            true
        });

        if applied {
            debug!("'{}' has {} public repos", username, count.public_repo_count);
        } else {
            debug!("Discarding stale count for '{}'", username);
        }
    }

    async fn page_lookup(
        service: Arc<S>,
        state: Arc<watch::Sender<SearchState>>,
        notifier: Arc<dyn Notifier>,
        username: String,
        page: u32,
        page_size: u32,
        generation: u64,
    ) {
        let result = service.get_user(&username, page, page_size).await;

        let repos = match result {
            Ok(items) => RepoPage::clamp(items, page_size),
            Err(e) => {
                let applied = state.send_if_modified(|state| {
                    if state.generation != generation {
                        return false;
                    }
                    state.is_searching = false;
                    state.repos.clear();
                    state.languages.clear();
                    state.no_repos = false;
                    true
                });
                if !applied {
                    debug!("Discarding stale failure for '{}' page {}", username, page);
                    return;
                }

                match e.kind() {
                    FailureKind::NotFound => {
                        warn!("User '{}' not found", username);
                        notifier.notify(Notification::new(USERNAME_NOT_FOUND_MESSAGE));
                    }
                    FailureKind::Other => {
                        error!("Page lookup failed for '{}' page {}: {}", username, page, e);
                    }
                }
                return;
            }
        };

        let applied = state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.repos = repos.clone();
            state.languages.clear();
            state.is_searching = false;
            state.no_repos = state.repos.is_empty();
            if !state.no_repos {
                state.pagination.refresh();
            }
            true
        });
        if !applied {
            debug!("Discarding stale page {} for '{}'", page, username);
            return;
        }
        info!("Loaded {} repos for '{}' page {}", repos.len(), username, page);

        let aggregator = LanguageAggregator::new(service);
        aggregator
            .run(&repos, |entry| {
                let repo_name = entry.repo_name.clone();
                let stored = state.send_if_modified(move |state| {
                    let displayed = state.repos.iter().any(|repo| repo.name == entry.repo_name);
                    if state.generation != generation || !displayed {
                        return false;
                    }
                    state.languages.insert(entry.repo_name.clone(), entry);
                    true
                });
                if !stored {
                    debug!("Discarding stale languages for '{}'", repo_name);
                }
            })
            .await;
    }
}
