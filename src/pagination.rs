//! Page bookkeeping for the active search.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Current page, page size and total count, plus the cached "more pages" flag.
///
/// The flag is only refreshed at explicit points (after the count lookup and
/// after a non-empty page lands), so it can lag behind the fields in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub has_more_repos: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        PaginationState {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
            has_more_repos: true,
        }
    }
}

impl PaginationState {
    /// `current_page * page_size < total_count`.
    pub fn has_more(&self) -> bool {
        u64::from(self.current_page) * u64::from(self.page_size) < self.total_count
    }

    /// Store [`has_more`](Self::has_more) into the flag.
    pub fn refresh(&mut self) -> bool {
        self.has_more_repos = self.has_more();
        self.has_more_repos
    }

    /// Number of pages needed for `total_count`, at least 1.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total_count.div_ceil(u64::from(self.page_size.max(1)));
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    /// Move to page `page`. Page 0 is rejected and leaves state untouched.
    pub fn go_to(&mut self, page: u32) -> bool {
        if page < 1 {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Switch to a new page size and back to the first page. Size 0 is rejected.
    pub fn resize(&mut self, page_size: u32) -> bool {
        if page_size == 0 {
            return false;
        }
        self.page_size = page_size;
        self.current_page = 1;
        true
    }
}
