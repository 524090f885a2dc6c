// Posts API endpoint functions.
// Provides typed methods for fetching pages of posts and single posts.

use serde::de::DeserializeOwned;

use crate::config::MAX_PER_PAGE;
use crate::error::{PostdeckError, Result};

use super::client::ApiClient;
use super::types::{Post, PostsPage};

impl ApiClient {
    /// Get one page of posts. `page` is 1-based.
    pub async fn fetch_posts(&self, page: u32, per_page: u32) -> Result<PostsPage> {
        if page == 0 {
            return Err(PostdeckError::InvalidRequest(
                "page numbers start at 1".to_string(),
            ));
        }
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(PostdeckError::InvalidRequest(format!(
                "per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE, per_page
            )));
        }

        let params = [
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        let response = self.get_with_params("/posts", &params).await?;
        decode(response).await
    }

    /// Get a single post by id.
    pub async fn fetch_post(&self, id: u64) -> Result<Post> {
        let response = self.get(&format!("/posts/{}", id)).await?;
        decode(response).await
    }
}

/// Read the body and parse it as JSON, keeping transport and decode failures apart.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
