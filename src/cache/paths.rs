// Cache path utilities.
// Constructs filesystem paths for persisted state, images and logs.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use sha2::{Digest, Sha256};

/// Get the base cache directory (~/.cache/postdeck on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "postdeck").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the persisted screen state file.
pub fn state_path(root: &Path) -> PathBuf {
    root.join("state.json")
}

/// Directory holding downloaded images.
pub fn image_dir(root: &Path) -> PathBuf {
    root.join("images")
}

/// Path to the log file.
pub fn log_path(root: &Path) -> PathBuf {
    root.join("postdeck.log")
}

/// Disk cache file name for an image URL.
/// Hex SHA-256 of the URL keeps the name free of filesystem-illegal characters.
pub fn disk_key(url: &str) -> String {
    hex::encode(Sha256::digest(url.as_bytes()))
}
