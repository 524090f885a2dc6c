// Infinite scroll screen state.
// Accumulates pages as the selection reaches the end of the list.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{Post, PostRepository, PostsPage};
use crate::cache::KeyValueStore;
use crate::error::Result;

use super::list::PostList;
use super::loading::{FeedPhase, PageRequest};

/// Store key for the persisted snapshot.
pub const INFINITE_STATE_KEY: &str = "infinite-scroll-state";

/// Persisted paging position. Post bodies are not stored, only their ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfiniteScrollSnapshot {
    pub post_ids: Vec<u64>,
    /// Next page to fetch.
    pub current_page: u32,
    pub total: u64,
    pub has_more: bool,
    /// Post the selection was on when the snapshot was taken.
    #[serde(default)]
    pub selected_post_id: Option<u64>,
}

/// Infinite scroll screen.
#[derive(Debug)]
pub struct InfiniteScroll {
    pub list: PostList,
    phase: FeedPhase,
    next_page: u32,
    total: u64,
    has_more: bool,
    per_page: u32,
    last_loaded_at: Option<DateTime<Utc>>,
    // Set from `restore` until the walk succeeds. Blocks page loads and saves.
    pending_restore: Option<RestorePlan>,
}

impl InfiniteScroll {
    pub fn new(per_page: u32) -> Self {
        Self {
            list: PostList::new(),
            phase: FeedPhase::Idle,
            next_page: 1,
            total: 0,
            has_more: true,
            per_page,
            last_loaded_at: None,
            pending_restore: None,
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

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn last_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.last_loaded_at
    }

    /// Whether previously seen posts still have to be re-fetched.
    pub fn is_restoring(&self) -> bool {
        self.pending_restore.is_some()
    }

    /// Start loading the next page. Returns `None` while a load is in
    /// flight, while a restore is unresolved, or once the last page has
    /// been fetched.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        if self.phase.is_loading() || self.pending_restore.is_some() || !self.has_more {
            return None;
        }
        self.phase = FeedPhase::Loading;
        Some(PageRequest {
            page: self.next_page,
            per_page: self.per_page,
        })
    }

    /// Start loading only when `current_post_id` is the last loaded post.
    pub fn load_more_if_needed(&mut self, current_post_id: u64) -> Option<PageRequest> {
        match self.list.last() {
            Some(last) if last.id == current_post_id => self.begin_load(),
            _ => None,
        }
    }

    /// Apply the outcome of a page fetch started by [`begin_load`](Self::begin_load).
    /// Returns true when the state changed and should be saved.
    pub fn apply_page(&mut self, request: PageRequest, result: Result<PostsPage>) -> bool {
        match result {
            Ok(page) => {
                self.list.extend_unique(page.posts);
                self.total = page.total;
                self.has_more = request.page < page.total_pages;
                if self.has_more {
                    self.next_page = request.page + 1;
                }
                self.phase = FeedPhase::Loaded;
                self.last_loaded_at = Some(Utc::now());
                tracing::debug!(
                    page = request.page,
                    loaded = self.list.len(),
                    has_more = self.has_more,
                    "infinite scroll page loaded"
                );
                true
            }
            Err(e) => {
                tracing::warn!(page = request.page, error = %e, "infinite scroll load failed");
                self.phase = FeedPhase::Failed(e.to_string());
                false
            }
        }
    }

    /// Hide the error message, keeping whatever was loaded.
    pub fn dismiss_error(&mut self) {
        if self.phase.error().is_some() {
            self.phase = if self.list.is_empty() {
                FeedPhase::Idle
            } else {
                FeedPhase::Loaded
            };
        }
    }

    pub fn snapshot(&self) -> InfiniteScrollSnapshot {
        InfiniteScrollSnapshot {
            post_ids: self.list.posts.iter().map(|post| post.id).collect(),
            current_page: self.next_page,
            total: self.total,
            has_more: self.has_more,
            selected_post_id: self.list.selected_item().map(|post| post.id),
        }
    }

    /// Persist the snapshot. Skipped while a restore is unresolved so the
    /// saved list is never replaced by a partial one.
    pub fn save(&self, store: &dyn KeyValueStore) {
        if self.pending_restore.is_some() {
            tracing::debug!("not saving infinite scroll state before restore finished");
            return;
        }
        match serde_json::to_string(&self.snapshot()) {
            Ok(json) => store.set(INFINITE_STATE_KEY, &json),
            Err(e) => tracing::warn!(error = %e, "failed to encode infinite scroll state"),
        }
    }

    /// Restore paging position from `store`.
    ///
    /// Returns a plan for re-fetching the previously seen posts when there
    /// were any and nothing is loaded yet. The screen stays in `Loading`
    /// until [`apply_restored`](Self::apply_restored) is called, and the plan
    /// is kept until a walk succeeds.
    pub fn restore(&mut self, store: &dyn KeyValueStore) -> Option<RestorePlan> {
        let raw = store.get(INFINITE_STATE_KEY)?;
        let snapshot: InfiniteScrollSnapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unreadable infinite scroll state");
                return None;
            }
        };

        self.next_page = snapshot.current_page.max(1);
        self.total = snapshot.total;
        self.has_more = snapshot.has_more;

        if snapshot.post_ids.is_empty() || !self.list.is_empty() {
            return None;
        }

        self.phase = FeedPhase::Loading;
        let plan = RestorePlan {
            post_ids: snapshot.post_ids,
            per_page: self.per_page,
            selected_post_id: snapshot.selected_post_id,
        };
        self.pending_restore = Some(plan.clone());
        Some(plan)
    }

    /// Start the restore walk again after a failure.
    pub fn retry_restore(&mut self) -> Option<RestorePlan> {
        if self.phase.is_loading() {
            return None;
        }
        let plan = self.pending_restore.clone()?;
        self.phase = FeedPhase::Loading;
        Some(plan)
    }

    /// Install the outcome of a [`RestorePlan`] walk.
    ///
    /// On failure nothing is loaded, paging stays where the snapshot left it
    /// and the plan is kept for [`retry_restore`](Self::retry_restore).
    pub fn apply_restored(&mut self, result: Result<Vec<Post>>) {
        let posts = match result {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!(error = %e, "infinite scroll restore failed");
                self.phase = FeedPhase::Failed(e.to_string());
                return;
            }
        };

        let selected = self
            .pending_restore
            .take()
            .and_then(|plan| plan.selected_post_id);
        self.list.replace(posts);
        if let Some(id) = selected {
            self.list.select_id(id);
        }
        self.phase = if self.list.is_empty() {
            FeedPhase::Idle
        } else {
            FeedPhase::Loaded
        };
        self.last_loaded_at = Some(Utc::now());
    }

    /// Fetch the next page and save on success.
    pub async fn load_more(&mut self, repo: &dyn PostRepository, store: &dyn KeyValueStore) {
        let Some(request) = self.begin_load() else {
            return;
        };
        let result = repo.fetch_posts(request.page, request.per_page).await;
        if self.apply_page(request, result) {
            self.save(store);
        }
    }
}

/// Re-fetch plan for previously seen posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestorePlan {
    post_ids: Vec<u64>,
    per_page: u32,
    selected_post_id: Option<u64>,
}

impl RestorePlan {
    pub fn post_ids(&self) -> &[u64] {
        &self.post_ids
    }

    /// Walk pages from the first until every saved id has been seen.
    ///
    /// Post bodies are always fetched fresh. Ids the server no longer has
    /// are dropped. A failed page fails the whole walk.
    pub async fn fetch(&self, repo: &dyn PostRepository) -> Result<Vec<Post>> {
        let wanted: HashSet<u64> = self.post_ids.iter().copied().collect();
        let mut seen = HashSet::new();
        let mut posts = Vec::new();
        let mut page = 1;

        loop {
            let fetched = repo.fetch_posts(page, self.per_page).await?;
            if fetched.posts.is_empty() {
                break;
            }

            for post in fetched.posts {
                if wanted.contains(&post.id) && seen.insert(post.id) {
                    posts.push(post);
                }
            }

            if seen.len() == wanted.len() || page >= fetched.total_pages {
                break;
            }
            page += 1;
        }

        Ok(posts)
    }
}
