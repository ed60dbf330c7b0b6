//! `.tenet-cache`: findings of files that have not changed since the last run
//!
//! An entry is reused only while both keys still match: the xxh3 hash of the
//! scanned file (together with its paired source) and the hash of the active
//! rule set. Files where a rule crashed are never stored, so a crash is
//! reported again on every run.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::{xxh3_64, Xxh3};

use tenet_core::Finding;

pub const CACHE_FILE: &str = ".tenet-cache";

/// Bumped whenever the on-disk layout or finding shape changes
const CACHE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub content_hash: u64,
    pub rules_hash: u64,
    /// Already filtered through inline directives
    pub findings: Vec<Finding>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Cache {
    pub version: u32,
    pub entries: HashMap<PathBuf, CacheEntry>,
}

impl Default for Cache {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION,
            entries: HashMap::new(),
        }
    }
}

impl Cache {
    pub fn load(dir: &Path) -> Result<Self> {
        Self::load_from(&dir.join(CACHE_FILE))
    }

    /// A missing file or an older layout both start an empty cache
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read cache file: {}", path.display()))?;
        let cache: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", path.display()))?;

        if cache.version != CACHE_VERSION {
            debug!(
                "cache {} has version {}, expected {}",
                path.display(),
                cache.version,
                CACHE_VERSION
            );
            return Ok(Self::default());
        }
        Ok(cache)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        self.save_to(&dir.join(CACHE_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize cache")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write cache file: {}", path.display()))
    }

    /// The stored entry for `path`, if both hashes still match
    pub fn get_if_valid(&self, path: &Path, content_hash: u64, rules_hash: u64) -> Option<&CacheEntry> {
        self.entries
            .get(path)
            .filter(|entry| entry.content_hash == content_hash && entry.rules_hash == rules_hash)
    }

    pub fn update(&mut self, path: PathBuf, entry: CacheEntry) {
        self.entries.insert(path, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Content key for a scanned file and its paired source
///
/// Each file is length-prefixed so that moving bytes from one file to the
/// other changes the key.
pub fn hash_files(paths: &[&Path]) -> Result<u64> {
    let mut hasher = Xxh3::new();
    for path in paths {
        let contents = fs::read(path)
            .with_context(|| format!("Failed to read file for hashing: {}", path.display()))?;
        hasher.update(&(contents.len() as u64).to_le_bytes());
        hasher.update(&contents);
    }
    Ok(hasher.digest())
}

pub fn hash_rules(fingerprint: &str) -> u64 {
    xxh3_64(fingerprint.as_bytes())
}
