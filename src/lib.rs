//! # GitHub Repo Explorer
//!
//! A Rust library for paging through a GitHub user's repositories and
//! enriching every repository on the page with its language breakdown.
//!
//! ## Main Components
//!
//! - [`SearchController`]: Owns the search lifecycle and the observable [`SearchState`]
//! - [`PaginationState`]: Current page, page size and whether more pages exist
//! - [`LanguageAggregator`]: Fans out one languages lookup per repository
//! - [`RepoService`]: The remote lookups, implemented over HTTP by [`GitHubClient`]
//! - [`Args`]: Command line argument structure for the CLI
//!
//! ## Example
//!
//! ```no_run
//! use github_repo_explorer_lib::{GitHubClient, SearchController, DEFAULT_API_URL};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let (notifications, mut rx) = tokio::sync::mpsc::unbounded_channel();
//!     let controller = SearchController::new(GitHubClient::new(DEFAULT_API_URL)?, notifications);
//!
//!     if let Some(handle) = controller.search("octocat") {
//!         handle.settled().await;
//!     }
//!     if let Ok(notification) = rx.try_recv() {
//!         eprintln!("{}", notification.message);
//!     }
//!
//!     for repo in controller.state().repos {
//!         println!("{}", repo.name);
//!     }
//!     Ok(())
//! }
//! ```

mod args;
mod commands;
mod controller;
mod display;
mod error;
mod github_client;
mod languages;
mod models;
mod pagination;
mod service;

// Re-export main components for documentation and external use
pub use crate::args::Args;
pub use crate::commands::{Command, HELP};
pub use crate::controller::{
    Notification, Notifier, SearchController, SearchHandle, SearchState,
    USERNAME_NOT_FOUND_MESSAGE,
};
pub use crate::display::render_state;
pub use crate::error::{FailureKind, ServiceError};
pub use crate::github_client::{GitHubClient, DEFAULT_API_URL};
pub use crate::languages::LanguageAggregator;
pub use crate::models::{LanguageBreakdown, LanguageEntry, RepoPage, RepoSummary, UserRepoCount};
pub use crate::pagination::{PaginationState, DEFAULT_PAGE_SIZE};
pub use crate::service::RepoService;
