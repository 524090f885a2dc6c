//! Two-tier image cache.
//!
//! Lookups go memory, then disk, then network. The memory tier is a bounded
//! [`moka`] cache of decoded images keyed by URL. The disk tier keeps the raw
//! response bytes under the SHA-256 of the URL and is never evicted.
//!
//! Concurrent lookups for the same URL are not coalesced; each may fetch and
//! both write the same bytes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::DynamicImage;
use moka::sync::Cache;
use reqwest::Client;

use crate::config::Config;
use crate::error::{PostdeckError, Result};

use super::paths::disk_key;
use super::store::write_atomic;

/// Memory + disk cache in front of image downloads.
#[derive(Clone)]
pub struct ImageCache {
    memory: Cache<String, Arc<DynamicImage>>,
    disk_dir: PathBuf,
    client: Client,
}

impl ImageCache {
    /// Create a cache storing files under `disk_dir`, holding at most
    /// `memory_capacity` decoded images in memory.
    pub fn new(disk_dir: PathBuf, client: Client, memory_capacity: u64) -> Self {
        if let Err(e) = std::fs::create_dir_all(&disk_dir) {
            tracing::warn!(dir = %disk_dir.display(), error = %e, "could not create image cache directory");
        }
        Self {
            memory: Cache::new(memory_capacity),
            disk_dir,
            client,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.image_dir(),
            Client::new(),
            config.image_memory_capacity,
        )
    }

    /// File holding the cached bytes for `url`.
    pub fn disk_path(&self, url: &str) -> PathBuf {
        self.disk_dir.join(disk_key(url))
    }

    /// Whether `url` is currently held in the memory tier.
    pub fn contains(&self, url: &str) -> bool {
        self.memory.contains_key(url)
    }

    /// Return the image at `url`, fetching it only when neither tier has it.
    pub async fn get(&self, url: &str) -> Result<Arc<DynamicImage>> {
        if let Some(image) = self.memory.get(url) {
            tracing::trace!(url, "image memory hit");
            return Ok(image);
        }

        let path = self.disk_path(url);
        if let Some(image) = read_disk(&path).await {
            tracing::trace!(url, "image disk hit");
            let image = Arc::new(image);
            self.memory.insert(url.to_string(), image.clone());
            return Ok(image);
        }

        tracing::debug!(url, "fetching image");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PostdeckError::BadStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = response.bytes().await?;
        let image = Arc::new(image::load_from_memory(&bytes)?);

        self.memory.insert(url.to_string(), image.clone());

        let write = tokio::task::spawn_blocking(move || write_atomic(&path, &bytes)).await;
        match write {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(url, error = %e, "failed to write image to disk cache"),
            Err(e) => tracing::warn!(url, error = %e, "disk cache writer panicked"),
        }

        Ok(image)
    }
}

/// Read and decode a disk entry. Missing or unreadable entries are misses.
async fn read_disk(path: &Path) -> Option<DynamicImage> {
    let bytes = tokio::fs::read(path).await.ok()?;
    match image::load_from_memory(&bytes) {
        Ok(image) => Some(image),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "discarding undecodable disk entry");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn test_disk_entry_served_without_network() {
        let temp_dir = TempDir::new().unwrap();
        // Port 9 (discard) is never contacted when the disk tier answers.
        let url = "http://127.0.0.1:9/static/pic_1.png";

        let cache = ImageCache::new(temp_dir.path().to_path_buf(), Client::new(), 10);
        std::fs::write(cache.disk_path(url), png_bytes(3, 2)).unwrap();

        let image = cache.get(url).await.unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
        assert!(cache.contains(url));
    }

    #[tokio::test]
    async fn test_corrupt_disk_entry_is_a_miss() {
        let temp_dir = TempDir::new().unwrap();
        let url = "http://127.0.0.1:9/static/pic_2.png";

        let cache = ImageCache::new(temp_dir.path().to_path_buf(), Client::new(), 10);
        std::fs::write(cache.disk_path(url), b"not an image").unwrap();

        // Falls through to the network, which refuses the connection.
        let result = cache.get(url).await;
        assert!(matches!(result, Err(PostdeckError::Http(_))));
        assert!(!cache.contains(url));
    }

    #[test]
    fn test_disk_path_uses_hashed_name() {
        let temp_dir = TempDir::new().unwrap();
        let cache = ImageCache::new(temp_dir.path().to_path_buf(), Client::new(), 10);
        let url = "http://localhost:6969/static/pic_1.png?size=large";

        let path = cache.disk_path(url);
        assert_eq!(path.parent().unwrap(), temp_dir.path());
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), disk_key(url));
    }
}
