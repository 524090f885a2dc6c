//! Repository seam between screens and the posts API.
//!
//! Screens depend on [`PostRepository`] rather than on [`ApiClient`] so the
//! client can be swapped for an in-memory double in tests.

use async_trait::async_trait;

use crate::error::Result;

use super::client::ApiClient;
use super::types::{Post, PostsPage};

/// Source of posts for the list and detail screens.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetch one 1-based page of posts.
    async fn fetch_posts(&self, page: u32, per_page: u32) -> Result<PostsPage>;

    /// Fetch a single post.
    async fn fetch_post(&self, id: u64) -> Result<Post>;

    /// Absolute URL for a post's image.
    fn image_url(&self, post: &Post) -> String;
}

#[async_trait]
impl PostRepository for ApiClient {
    async fn fetch_posts(&self, page: u32, per_page: u32) -> Result<PostsPage> {
        ApiClient::fetch_posts(self, page, per_page).await
    }

    async fn fetch_post(&self, id: u64) -> Result<Post> {
        ApiClient::fetch_post(self, id).await
    }

    fn image_url(&self, post: &Post) -> String {
        ApiClient::image_url(self, post)
    }
}
