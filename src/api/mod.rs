// Posts API module.
// Provides the HTTP client, response types and the repository seam.

pub mod client;
pub mod endpoints;
pub mod repository;
pub mod types;

pub use client::ApiClient;
pub use repository::PostRepository;
pub use types::*;
