// Cache module for local filesystem caching.
// Stores screen state and downloaded images across sessions.

pub mod image_cache;
pub mod paths;
pub mod store;

pub use image_cache::ImageCache;
pub use paths::disk_key;
pub use store::{FileStore, KeyValueStore, MemoryStore};
