use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CacheEntry, Issue};

/// One JSON file per source under `dir`.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

#[derive(Debug, Deserialize, Serialize)]
struct StoredEntry {
    source_key: String,
    fetched_at: DateTime<Utc>,
    issues: Vec<Issue>,
}

impl DiskCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn load(&self, source_key: &str) -> Result<Option<CacheEntry>> {
        let path = self.entry_path(source_key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("Failed to read cache file {}", path.display()));
            }
        };
        let stored: StoredEntry = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file {}", path.display()))?;
        if stored.source_key != source_key {
            return Ok(None);
        }

        Ok(Some(CacheEntry {
            issues: Arc::new(stored.issues),
            fetched_at: stored.fetched_at,
        }))
    }

    pub fn save(&self, source_key: &str, entry: &CacheEntry) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create cache directory {}", self.dir.display()))?;
        let stored = StoredEntry {
            source_key: source_key.to_string(),
            fetched_at: entry.fetched_at,
            issues: entry.issues.as_ref().clone(),
        };
        let contents = serde_json::to_string(&stored)?;

        // Readers never see a half-written file.
        let path = self.entry_path(source_key);
        let partial = path.with_extension("json.tmp");
        fs::write(&partial, contents)
            .with_context(|| format!("Failed to write cache file {}", partial.display()))?;
        fs::rename(&partial, &path)
            .with_context(|| format!("Failed to replace cache file {}", path.display()))?;
        Ok(())
    }

    pub fn remove(&self, source_key: &str) -> Result<()> {
        let path = self.entry_path(source_key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error)
                .with_context(|| format!("Failed to remove cache file {}", path.display())),
        }
    }

    pub fn entry_path(&self, source_key: &str) -> PathBuf {
        // GitHub owners cannot contain '_', so the first "__" is always the separator.
        self.dir
            .join(format!("{}.json", source_key.replace('/', "__")))
    }
}

pub fn cache_dir() -> PathBuf {
    base_cache_dir().join("issue-monitor")
}

fn base_cache_dir() -> PathBuf {
    if let Ok(dir) = env::var("XDG_CACHE_HOME") {
        return Path::new(&dir).to_path_buf();
    }

    if let Ok(home) = env::var("HOME") {
        return Path::new(&home).join(".cache");
    }

    env::temp_dir()
}
