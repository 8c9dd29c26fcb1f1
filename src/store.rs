use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::sync::IssueSource;

mod disk;

pub use disk::{DiskCache, cache_dir};

pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const FETCH_BUDGET: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("closed") {
            return Self::Closed;
        }
        Self::Open
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }
}

/// An issue exactly as fetched. Never mutated after it leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Issue {
    /// Issue number, unique within `source_key`.
    pub id: i64,
    pub title: String,
    pub body: Option<String>,
    pub state: IssueState,
    pub assignee: Option<String>,
    pub labels: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub comment_count: u32,
    pub source_key: String,
    pub url: Option<String>,
}

impl Issue {
    pub fn key(&self) -> IssueKey {
        IssueKey {
            source_key: self.source_key.clone(),
            id: self.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueKey {
    pub source_key: String,
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub author: String,
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Wall-clock `fetched_at` so entries stay comparable across runs once on disk.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub issues: Arc<Vec<Issue>>,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        // A timestamp from the future (clock moved back) counts as age zero.
        match now.signed_duration_since(self.fetched_at).to_std() {
            Ok(age) => age < ttl,
            Err(_) => true,
        }
    }
}

/// Result of one refresh cycle across every requested source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueSnapshot {
    pub issues: Vec<Issue>,
    /// Sources whose fetch failed but whose previous entry was served instead.
    pub stale_sources: Vec<String>,
    pub failed_sources: Vec<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no source could be loaded: {}", reasons.join("; "))]
    FetchFailed { reasons: Vec<String> },
    #[error("{source_key}: timed out")]
    Timeout { source_key: String },
    #[error("{source_key}: {message}")]
    Source { source_key: String, message: String },
}

pub struct IssueStore {
    source: Arc<dyn IssueSource>,
    cache: RwLock<HashMap<String, CacheEntry>>,
    disk: Option<DiskCache>,
    ttl: Duration,
    fetch_budget: Duration,
}

impl IssueStore {
    pub fn new(source: Arc<dyn IssueSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
            disk: None,
            ttl: CACHE_TTL,
            fetch_budget: FETCH_BUDGET,
        }
    }

    /// Mirrors every entry to `disk` so a later process can reuse it within the TTL.
    pub fn with_disk_cache(mut self, disk: DiskCache) -> Self {
        self.disk = Some(disk);
        self
    }

    #[cfg(test)]
    pub fn with_fetch_budget(mut self, budget: Duration) -> Self {
        self.fetch_budget = budget;
        self
    }

    pub fn source(&self) -> Arc<dyn IssueSource> {
        Arc::clone(&self.source)
    }

    pub async fn get_issues(&self, source_keys: &[String]) -> Result<IssueSnapshot, StoreError> {
        self.get_issues_at(source_keys, Utc::now()).await
    }

    /// Serves fresh cache entries as-is and refetches the rest within one shared budget.
    /// Fails only when no key produced data, fetched or cached.
    pub async fn get_issues_at(
        &self,
        source_keys: &[String],
        now: DateTime<Utc>,
    ) -> Result<IssueSnapshot, StoreError> {
        let deadline = tokio::time::Instant::now() + self.fetch_budget;
        let mut snapshot = IssueSnapshot::default();
        let mut reasons = Vec::new();
        let mut loaded_any = false;

        for source_key in source_keys {
            let cached = self.cached(source_key);
            if let Some(entry) = cached.as_ref()
                && entry.is_fresh(now, self.ttl)
            {
                debug!(source = %source_key, "serving cached issues");
                snapshot.issues.extend(entry.issues.iter().cloned());
                loaded_any = true;
                continue;
            }

            match self.fetch_before(source_key, deadline).await {
                Ok(issues) => {
                    debug!(source = %source_key, count = issues.len(), "fetched issues");
                    let issues = Arc::new(issues);
                    self.replace(
                        source_key,
                        CacheEntry {
                            issues: Arc::clone(&issues),
                            fetched_at: now,
                        },
                    );
                    snapshot.issues.extend(issues.iter().cloned());
                    loaded_any = true;
                }
                Err(error) => {
                    warn!(source = %source_key, error = %error, "failed to fetch issues");
                    snapshot.failed_sources.push(source_key.clone());
                    reasons.push(error.to_string());
                    if let Some(entry) = cached {
                        warn!(source = %source_key, "serving stale issues");
                        snapshot.issues.extend(entry.issues.iter().cloned());
                        snapshot.stale_sources.push(source_key.clone());
                        loaded_any = true;
                    }
                }
            }
        }

        if !loaded_any && !source_keys.is_empty() {
            return Err(StoreError::FetchFailed { reasons });
        }
        info!(
            issues = snapshot.issues.len(),
            failed = snapshot.failed_sources.len(),
            "refresh complete"
        );
        Ok(snapshot)
    }

    /// Drops the entry in memory and on disk; the next read refetches it.
    pub fn invalidate(&self, source_key: &str) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(source_key);
        if let Some(disk) = &self.disk
            && let Err(error) = disk.remove(source_key)
        {
            warn!(source = %source_key, error = %format!("{:#}", error), "failed to drop cached issues");
        }
    }

    /// The current entry, from memory or else from the disk cache.
    pub fn cached(&self, source_key: &str) -> Option<CacheEntry> {
        let in_memory = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source_key)
            .cloned();
        if in_memory.is_some() {
            return in_memory;
        }

        let disk = self.disk.as_ref()?;
        match disk.load(source_key) {
            Ok(Some(entry)) => {
                debug!(source = %source_key, "loaded issues from disk cache");
                self.cache
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(source_key.to_string(), entry.clone());
                Some(entry)
            }
            Ok(None) => None,
            Err(error) => {
                warn!(source = %source_key, error = %format!("{:#}", error), "ignoring unreadable disk cache");
                None
            }
        }
    }

    async fn fetch_before(
        &self,
        source_key: &str,
        deadline: tokio::time::Instant,
    ) -> Result<Vec<Issue>, StoreError> {
        let fetch = self.source.fetch_issues(source_key);
        match tokio::time::timeout_at(deadline, fetch).await {
            Ok(Ok(issues)) => Ok(issues),
            Ok(Err(error)) => Err(StoreError::Source {
                source_key: source_key.to_string(),
                message: format!("{:#}", error),
            }),
            Err(_) => Err(StoreError::Timeout {
                source_key: source_key.to_string(),
            }),
        }
    }

    fn replace(&self, source_key: &str, entry: CacheEntry) {
        if let Some(disk) = &self.disk
            && let Err(error) = disk.save(source_key, &entry)
        {
            warn!(source = %source_key, error = %format!("{:#}", error), "failed to write disk cache");
        }
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(source_key.to_string(), entry);
    }
}

#[cfg(test)]
mod tests;
