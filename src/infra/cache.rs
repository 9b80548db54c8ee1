//! # Dependency Cache Module
//!
//! The dependency cache mirrors a CI runner's dependency caching step:
//! the key is derived from the operating system name and a content hash
//! of the dependency declaration file, so an edited declaration
//! invalidates the entry. An entry is a stamp directory; no other state
//! is persisted.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Derives the cache key for a dependency declaration file:
/// `{os}-deps-{blake3(content)}`, hex-truncated to 16 characters.
pub fn cache_key(requirements: &Path) -> Result<String> {
    let mut file = File::open(requirements)
        .with_context(|| format!("Failed to open requirements file: {}", requirements.display()))?;

    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 8192];
    loop {
        let n = file
            .read(&mut buffer)
            .with_context(|| format!("Failed to read: {}", requirements.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    let digest = hasher.finalize().to_hex();
    Ok(format!("{}-deps-{}", std::env::consts::OS, &digest[..16]))
}

/// An on-disk stamp store for resolved dependency sets.
#[derive(Debug)]
pub struct DepCache {
    root: PathBuf,
}

impl DepCache {
    /// Opens (creating if needed) a cache rooted at the given directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create cache directory: {}", root.display()))?;
        Ok(Self { root })
    }

    /// Whether the cache holds an entry for the given key.
    pub fn contains(&self, key: &str) -> bool {
        self.root.join(key).join("stamp").is_file()
    }

    /// Records a successful install under the given key.
    pub fn record(&self, key: &str) -> Result<()> {
        let entry = self.root.join(key);
        fs::create_dir_all(&entry)
            .with_context(|| format!("Failed to create cache entry: {}", entry.display()))?;
        let stamp = entry.join("stamp");
        fs::write(&stamp, chrono::Utc::now().to_rfc3339())
            .with_context(|| format!("Failed to write cache stamp: {}", stamp.display()))?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
