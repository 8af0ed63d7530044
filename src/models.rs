use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// A repository as returned by the `/users/{username}/repos` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Absolute URL of the per-repository languages endpoint.
    #[serde(default, rename = "languages_url")]
    pub languages_endpoint: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl RepoSummary {
    /// Returns the languages endpoint when it is present and non-empty.
    pub fn languages_endpoint(&self) -> Option<&str> {
        self.languages_endpoint
            .as_deref()
            .filter(|endpoint| !endpoint.trim().is_empty())
    }
}

/// One page of a user's repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoPage {
    pub items: Vec<RepoSummary>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
}

impl RepoPage {
    /// Builds a page, dropping any items past `page_size`.
    pub fn new(items: Vec<RepoSummary>, page_number: u32, page_size: u32, total_count: u64) -> Self {
        RepoPage {
            items: Self::clamp(items, page_size),
            page_number,
            page_size,
            total_count,
        }
    }

    /// Truncate `items` to at most `page_size` entries.
    pub fn clamp(mut items: Vec<RepoSummary>, page_size: u32) -> Vec<RepoSummary> {
        let limit = page_size as usize;
        if items.len() > limit {
            warn!(
                "Lookup returned {} items for a page size of {}; truncating",
                items.len(),
                page_size
            );
            items.truncate(limit);
        }
        items
    }
}

/// Result of the count lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRepoCount {
    pub public_repo_count: u64,
}

/// Language name to byte count, as served by a languages endpoint.
pub type LanguageBreakdown = HashMap<String, u64>;

/// Languages detected in one repository of the displayed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    pub repo_name: String,
    /// Ordered by byte count, largest first.
    pub languages: Vec<String>,
}

impl LanguageEntry {
    pub fn from_breakdown(repo_name: impl Into<String>, breakdown: &LanguageBreakdown) -> Self {
        let mut ranked: Vec<(&String, &u64)> = breakdown.iter().collect();
        ranked.sort_by(|(a_name, a_bytes), (b_name, b_bytes)| {
            b_bytes.cmp(a_bytes).then_with(|| a_name.cmp(b_name))
        });

        LanguageEntry {
            repo_name: repo_name.into(),
            languages: ranked.into_iter().map(|(name, _)| name.clone()).collect(),
        }
    }
}
