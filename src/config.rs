// Runtime configuration.
// Reads POSTDECK_* environment variables and fills in defaults.

use std::path::PathBuf;

use crate::cache::paths;
use crate::error::{PostdeckError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:6969";
pub const DEFAULT_INFINITE_PER_PAGE: u32 = 20;
pub const DEFAULT_PAGINATION_PER_PAGE: u32 = 10;
pub const DEFAULT_IMAGE_MEMORY_CAPACITY: u64 = 100;

/// Largest page size the posts API accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the posts API, without a trailing slash.
    pub api_base_url: String,
    /// Root of the on-disk cache (state file, images, log).
    pub cache_dir: PathBuf,
    /// Page size used by the infinite scroll screen.
    pub infinite_per_page: u32,
    /// Page size used by the pagination screen.
    pub pagination_per_page: u32,
    /// Maximum number of decoded images kept in memory.
    pub image_memory_capacity: u64,
    /// Keep screen state in memory only (lost on exit).
    pub ephemeral_state: bool,
}

impl Config {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base_url = lookup("POSTDECK_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let cache_dir = match lookup("POSTDECK_CACHE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => paths::cache_dir().ok_or_else(|| {
                PostdeckError::Config("could not determine a cache directory".to_string())
            })?,
        };

        let infinite_per_page = parse_per_page(
            "POSTDECK_INFINITE_PER_PAGE",
            lookup("POSTDECK_INFINITE_PER_PAGE"),
            DEFAULT_INFINITE_PER_PAGE,
        )?;
        let pagination_per_page = parse_per_page(
            "POSTDECK_PAGINATION_PER_PAGE",
            lookup("POSTDECK_PAGINATION_PER_PAGE"),
            DEFAULT_PAGINATION_PER_PAGE,
        )?;

        let image_memory_capacity = match lookup("POSTDECK_IMAGE_MEMORY_CAPACITY") {
            Some(value) => value.parse().map_err(|_| {
                PostdeckError::Config(format!(
                    "POSTDECK_IMAGE_MEMORY_CAPACITY must be a number, got {:?}",
                    value
                ))
            })?,
            None => DEFAULT_IMAGE_MEMORY_CAPACITY,
        };

        let ephemeral_state = lookup("POSTDECK_EPHEMERAL_STATE")
            .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            api_base_url,
            cache_dir,
            infinite_per_page,
            pagination_per_page,
            image_memory_capacity,
            ephemeral_state,
        })
    }

    pub fn state_path(&self) -> PathBuf {
        paths::state_path(&self.cache_dir)
    }

    pub fn image_dir(&self) -> PathBuf {
        paths::image_dir(&self.cache_dir)
    }

    pub fn log_path(&self) -> PathBuf {
        paths::log_path(&self.cache_dir)
    }
}

fn parse_per_page(name: &str, value: Option<String>, default: u32) -> Result<u32> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.parse::<u32>() {
        Ok(n) if (1..=MAX_PER_PAGE).contains(&n) => Ok(n),
        _ => Err(PostdeckError::Config(format!(
            "{} must be between 1 and {}, got {:?}",
            name, MAX_PER_PAGE, value
        ))),
    }
}
