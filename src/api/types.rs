// Posts API response types.
// Defines structs for deserializing the paginated posts REST API.

use serde::{Deserialize, Serialize};

/// A single post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    /// Path relative to the API base URL, e.g. `/static/pic_1.png`.
    pub image_url: String,
    pub description: String,
}

/// One page of posts as returned by `GET /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl PostsPage {
    /// Ids of the posts on this page, in server order.
    pub fn post_ids(&self) -> Vec<u64> {
        self.posts.iter().map(|post| post.id).collect()
    }
}
