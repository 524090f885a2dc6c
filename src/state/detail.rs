// Post detail screen state.
// Loads a single post and, once it arrives, a preview of its image.

use std::sync::Arc;

use image::DynamicImage;

use crate::api::{Post, PostRepository};
use crate::error::Result;

use super::loading::LoadingState;

/// What the detail screen knows about a post's image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Detail screen for one post.
#[derive(Debug)]
pub struct PostDetail {
    post_id: u64,
    pub state: LoadingState<Post>,
    pub image: LoadingState<ImagePreview>,
}

impl PostDetail {
    pub fn new(post_id: u64) -> Self {
        Self {
            post_id,
            state: LoadingState::Loading,
            image: LoadingState::Idle,
        }
    }

    pub fn post_id(&self) -> u64 {
        self.post_id
    }

    pub fn post(&self) -> Option<&Post> {
        self.state.data()
    }

    /// Restart the post fetch (retry after an error).
    pub fn reload(&mut self) {
        self.state = LoadingState::Loading;
        self.image = LoadingState::Idle;
    }

    pub fn apply_post(&mut self, result: Result<Post>) {
        self.state = match result {
            Ok(post) => LoadingState::Loaded(post),
            Err(e) => {
                tracing::warn!(post_id = self.post_id, error = %e, "post load failed");
                LoadingState::Error(e.to_string())
            }
        };
    }

    /// Mark the image as requested. Returns false if it already was.
    pub fn begin_image(&mut self) -> bool {
        if matches!(self.image, LoadingState::Idle) {
            self.image = LoadingState::Loading;
            true
        } else {
            false
        }
    }

    pub fn apply_image(&mut self, url: String, result: Result<Arc<DynamicImage>>) {
        self.image = match result {
            Ok(image) => LoadingState::Loaded(ImagePreview {
                url,
                width: image.width(),
                height: image.height(),
            }),
            Err(e) => {
                tracing::debug!(%url, error = %e, "image load failed");
                LoadingState::Error(e.to_string())
            }
        };
    }

    /// Fetch the post.
    pub async fn load(&mut self, repo: &dyn PostRepository) {
        self.state = LoadingState::Loading;
        let result = repo.fetch_post(self.post_id).await;
        self.apply_post(result);
    }
}
