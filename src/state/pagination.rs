// Numbered pagination screen state.
// Shows exactly one page of posts at a time.

use chrono::{DateTime, Utc};

use crate::api::{Post, PostRepository, PostsPage};
use crate::cache::KeyValueStore;
use crate::error::Result;

use super::list::PostList;
use super::loading::{FeedPhase, PageRequest};
use super::page_window::{PageToken, page_window};

/// Store key for the persisted current page.
pub const PAGINATION_STATE_KEY: &str = "pagination-state";

/// Numbered pagination screen.
#[derive(Debug)]
pub struct Pagination {
    pub list: PostList,
    phase: FeedPhase,
    current_page: u32,
    total_pages: u32,
    total: u64,
    per_page: u32,
    last_loaded_at: Option<DateTime<Utc>>,
    /// Digits typed into the go-to-page prompt, when it is open.
    page_input: Option<String>,
}

/// Longest page number the prompt accepts.
const MAX_PAGE_INPUT_DIGITS: usize = 6;

impl Pagination {
    pub fn new(per_page: u32) -> Self {
        Self {
            list: PostList::new(),
            phase: FeedPhase::Idle,
            current_page: 1,
            total_pages: 1,
            total: 0,
            per_page,
            last_loaded_at: None,
            page_input: None,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.list.posts
    }

    pub fn phase(&self) -> &FeedPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.phase.error()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn last_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.last_loaded_at
    }

    /// Tokens for the pagination bar.
    pub fn page_numbers(&self) -> Vec<PageToken> {
        page_window(self.current_page, self.total_pages)
    }

    /// Start loading `page`. Returns `None` while another load is in flight.
    pub fn begin_load(&mut self, page: u32) -> Option<PageRequest> {
        if self.phase.is_loading() {
            return None;
        }
        self.phase = FeedPhase::Loading;
        Some(PageRequest {
            page,
            per_page: self.per_page,
        })
    }

    /// Reload the current page (initial load and retry).
    pub fn reload(&mut self) -> Option<PageRequest> {
        self.begin_load(self.current_page)
    }

    /// Jump to `page` if it is within `1..=total_pages` and not already shown.
    pub fn go_to_page(&mut self, page: u32) -> Option<PageRequest> {
        if page == 0 || page > self.total_pages {
            return None;
        }
        if page == self.current_page && self.phase == FeedPhase::Loaded {
            return None;
        }
        self.begin_load(page)
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        self.go_to_page(self.current_page.saturating_add(1))
    }

    /// Step back one page. From past the end this lands on the last page.
    pub fn prev_page(&mut self) -> Option<PageRequest> {
        let target = self.current_page.saturating_sub(1).min(self.total_pages);
        self.go_to_page(target)
    }

    pub fn first_page(&mut self) -> Option<PageRequest> {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> Option<PageRequest> {
        self.go_to_page(self.total_pages)
    }

    /// Move back onto the last page when the current one is past the end,
    /// e.g. a restored page after the server shrank.
    pub fn clamp_to_last_page(&mut self) -> Option<PageRequest> {
        if self.total_pages == 0 || self.current_page <= self.total_pages {
            return None;
        }
        tracing::debug!(
            page = self.current_page,
            total_pages = self.total_pages,
            "page is past the end, moving to the last page"
        );
        self.go_to_page(self.total_pages)
    }

    pub fn page_input(&self) -> Option<&str> {
        self.page_input.as_deref()
    }

    /// Open the go-to-page prompt.
    pub fn start_page_input(&mut self) {
        self.page_input = Some(String::new());
    }

    /// Append a digit to the prompt, opening it if needed. Other characters
    /// are ignored.
    pub fn push_page_digit(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        let input = self.page_input.get_or_insert_with(String::new);
        if input.len() < MAX_PAGE_INPUT_DIGITS {
            input.push(c);
        }
    }

    pub fn pop_page_digit(&mut self) {
        if let Some(input) = self.page_input.as_mut() {
            input.pop();
        }
    }

    pub fn cancel_page_input(&mut self) {
        self.page_input = None;
    }

    /// Close the prompt and jump to the typed page if it exists.
    pub fn submit_page_input(&mut self) -> Option<PageRequest> {
        let input = self.page_input.take()?;
        let page = input.parse::<u32>().ok()?;
        self.go_to_page(page)
    }

    /// Apply the outcome of a page fetch. The current page only moves on
    /// success. Returns true when the state changed and should be saved.
    pub fn apply_page(&mut self, request: PageRequest, result: Result<PostsPage>) -> bool {
        match result {
            Ok(page) => {
                self.list.replace(page.posts);
                self.current_page = request.page;
                self.total_pages = page.total_pages;
                self.total = page.total;
                self.phase = FeedPhase::Loaded;
                self.last_loaded_at = Some(Utc::now());
                tracing::debug!(
                    page = request.page,
                    total_pages = self.total_pages,
                    "pagination page loaded"
                );
                true
            }
            Err(e) => {
                tracing::warn!(page = request.page, error = %e, "pagination load failed");
                self.phase = FeedPhase::Failed(e.to_string());
                false
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        if self.phase.error().is_some() {
            self.phase = if self.list.is_empty() {
                FeedPhase::Idle
            } else {
                FeedPhase::Loaded
            };
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) {
        store.set(PAGINATION_STATE_KEY, &self.current_page.to_string());
    }

    /// Adopt a previously saved page. Anything unreadable or zero is ignored.
    pub fn restore(&mut self, store: &dyn KeyValueStore) {
        let saved = store
            .get(PAGINATION_STATE_KEY)
            .and_then(|raw| raw.trim().parse::<u32>().ok());
        if let Some(page) = saved.filter(|page| *page > 0) {
            self.current_page = page;
        }
    }

    /// Fetch `page` and save on success.
    pub async fn load_page(
        &mut self,
        page: u32,
        repo: &dyn PostRepository,
        store: &dyn KeyValueStore,
    ) {
        let Some(request) = self.begin_load(page) else {
            return;
        };
        let result = repo.fetch_posts(request.page, request.per_page).await;
        if self.apply_page(request, result) {
            self.save(store);
        }

        if let Some(request) = self.clamp_to_last_page() {
            let result = repo.fetch_posts(request.page, request.per_page).await;
            if self.apply_page(request, result) {
                self.save(store);
            }
        }
    }
}
