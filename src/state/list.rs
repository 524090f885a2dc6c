// Selectable post list.
// Holds loaded posts together with the ratatui selection state.

use ratatui::widgets::ListState;

use crate::api::Post;

/// Posts shown by a list screen plus keyboard selection.
#[derive(Debug, Clone, Default)]
pub struct PostList {
    pub posts: Vec<Post>,
    pub list_state: ListState,
}

impl PostList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.posts.iter().any(|post| post.id == id)
    }

    pub fn last(&self) -> Option<&Post> {
        self.posts.last()
    }

    /// Replace all posts and move the selection to the top.
    pub fn replace(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.reset_selection();
    }

    /// Append posts whose ids are not already present. Keeps the selection.
    pub fn extend_unique(&mut self, posts: Vec<Post>) {
        for post in posts {
            if !self.contains(post.id) {
                self.posts.push(post);
            }
        }
        if self.list_state.selected().is_none() && !self.posts.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn selected_item(&self) -> Option<&Post> {
        self.posts.get(self.list_state.selected()?)
    }

    /// Select the next post. Returns the newly selected post.
    pub fn select_next(&mut self) -> Option<&Post> {
        if self.posts.is_empty() {
            return None;
        }
        let i = match self.list_state.selected() {
            Some(i) if i >= self.posts.len() - 1 => i, // Stay at end
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
        self.posts.get(i)
    }

    /// Select the previous post.
    pub fn select_prev(&mut self) {
        if self.posts.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the post with `id`. Returns false if it is not loaded.
    pub fn select_id(&mut self, id: u64) -> bool {
        match self.posts.iter().position(|post| post.id == id) {
            Some(i) => {
                self.list_state.select(Some(i));
                true
            }
            None => false,
        }
    }

    pub fn reset_selection(&mut self) {
        if self.posts.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::repository::mock::post;

    #[test]
    fn test_selection_bounds() {
        let mut list = PostList::new();
        assert!(list.select_next().is_none());

        list.replace(vec![post(1), post(2)]);
        assert_eq!(list.selected(), Some(0));

        assert_eq!(list.select_next().map(|p| p.id), Some(2));
        // Stays at end
        assert_eq!(list.select_next().map(|p| p.id), Some(2));

        list.select_prev();
        list.select_prev();
        assert_eq!(list.selected_item().map(|p| p.id), Some(1));
    }

    #[test]
    fn test_extend_unique_skips_known_ids() {
        let mut list = PostList::new();
        list.extend_unique(vec![post(1), post(2)]);
        list.extend_unique(vec![post(2), post(3)]);

        let ids: Vec<u64> = list.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn test_select_id() {
        let mut list = PostList::new();
        list.replace(vec![post(4), post(9), post(12)]);

        assert!(list.select_id(12));
        assert_eq!(list.selected(), Some(2));

        assert!(!list.select_id(5));
        assert_eq!(list.selected(), Some(2));
    }
}
