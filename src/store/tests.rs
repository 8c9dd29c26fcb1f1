use super::{DiskCache, Issue, IssueState, IssueStore, StoreError};
use crate::store::Comment;
use crate::sync::IssueSource;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Clone)]
enum Reply {
    Issues(Vec<Issue>),
    Fail(&'static str),
    Hang,
}

#[derive(Default)]
struct FakeSource {
    replies: Mutex<HashMap<String, Reply>>,
    calls: AtomicUsize,
}

impl FakeSource {
    fn with(replies: &[(&str, Reply)]) -> Arc<Self> {
        let source = Self::default();
        for (key, reply) in replies {
            source.set(key, reply.clone());
        }
        Arc::new(source)
    }

    fn set(&self, key: &str, reply: Reply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.insert(key.to_string(), reply);
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IssueSource for FakeSource {
    async fn fetch_issues(&self, source_key: &str) -> Result<Vec<Issue>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .lock()
            .map_err(|_| anyhow!("poisoned"))?
            .get(source_key)
            .cloned();
        match reply {
            Some(Reply::Issues(issues)) => Ok(issues),
            Some(Reply::Fail(message)) => Err(anyhow!(message)),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Vec::new())
            }
            None => Err(anyhow!("unknown source {}", source_key)),
        }
    }

    async fn fetch_comments(&self, _source_key: &str, _issue_id: i64) -> Result<Vec<Comment>> {
        Ok(Vec::new())
    }
}

fn issues(source_key: &str, count: i64) -> Vec<Issue> {
    (1..=count)
        .map(|id| Issue {
            id,
            title: format!("Issue {}", id),
            body: None,
            state: IssueState::Open,
            assignee: None,
            labels: Vec::new(),
            created_at: None,
            updated_at: None,
            comment_count: 0,
            source_key: source_key.to_string(),
            url: None,
        })
        .collect()
}

fn keys(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn past_ttl() -> TimeDelta {
    TimeDelta::seconds(5 * 60 + 1)
}

fn unique_temp_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("issue-monitor-test-{}-{}", label, nanos));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[tokio::test]
async fn repeated_reads_within_ttl_fetch_once() {
    let source = FakeSource::with(&[("acme/a", Reply::Issues(issues("acme/a", 2)))]);
    let store = IssueStore::new(source.clone());
    let now = Utc::now();

    let first = store.get_issues_at(&keys(&["acme/a"]), now).await;
    let second = store
        .get_issues_at(&keys(&["acme/a"]), now + TimeDelta::seconds(60))
        .await;

    assert_eq!(source.calls(), 1);
    assert_eq!(first, second);
    assert_eq!(first.map(|snapshot| snapshot.issues.len()), Ok(2));
}

#[tokio::test]
async fn expired_entry_is_refetched() {
    let source = FakeSource::with(&[("acme/a", Reply::Issues(issues("acme/a", 1)))]);
    let store = IssueStore::new(source.clone());
    let now = Utc::now();

    let _ = store.get_issues_at(&keys(&["acme/a"]), now).await;
    let _ = store
        .get_issues_at(&keys(&["acme/a"]), now + past_ttl())
        .await;

    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn invalidate_forces_refetch() {
    let source = FakeSource::with(&[("acme/a", Reply::Issues(issues("acme/a", 1)))]);
    let store = IssueStore::new(source.clone());
    let now = Utc::now();

    let _ = store.get_issues_at(&keys(&["acme/a"]), now).await;
    store.invalidate("acme/a");
    assert!(store.cached("acme/a").is_none());
    let _ = store.get_issues_at(&keys(&["acme/a"]), now).await;
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn timed_out_source_does_not_hide_loaded_ones() {
    let source = FakeSource::with(&[
        ("acme/a", Reply::Issues(issues("acme/a", 3))),
        ("acme/b", Reply::Hang),
    ]);
    let store = IssueStore::new(source).with_fetch_budget(Duration::from_millis(50));

    let snapshot = store
        .get_issues_at(&keys(&["acme/a", "acme/b"]), Utc::now())
        .await
        .expect("partial snapshot");

    assert_eq!(snapshot.issues.len(), 3);
    assert!(
        snapshot
            .issues
            .iter()
            .all(|issue| issue.source_key == "acme/a")
    );
    assert_eq!(snapshot.failed_sources, keys(&["acme/b"]));
    assert!(snapshot.stale_sources.is_empty());
    assert!(store.cached("acme/b").is_none());
}

#[tokio::test]
async fn failed_refetch_serves_previous_entry_as_stale() {
    let source = FakeSource::with(&[("acme/a", Reply::Issues(issues("acme/a", 2)))]);
    let store = IssueStore::new(source.clone());
    let now = Utc::now();
    let _ = store.get_issues_at(&keys(&["acme/a"]), now).await;

    source.set("acme/a", Reply::Fail("502 Bad Gateway"));
    let later = now + past_ttl();
    let snapshot = store
        .get_issues_at(&keys(&["acme/a"]), later)
        .await
        .expect("stale snapshot");

    assert_eq!(snapshot.issues.len(), 2);
    assert_eq!(snapshot.stale_sources, keys(&["acme/a"]));
    assert_eq!(snapshot.failed_sources, keys(&["acme/a"]));
    let entry = store.cached("acme/a").expect("entry kept");
    assert_eq!(entry.fetched_at, now);
}

#[tokio::test]
async fn all_sources_failing_without_cache_is_an_error() {
    let source = FakeSource::with(&[
        ("acme/a", Reply::Fail("401 Unauthorized")),
        ("acme/b", Reply::Fail("404 Not Found")),
    ]);
    let store = IssueStore::new(source);

    let result = store
        .get_issues_at(&keys(&["acme/a", "acme/b"]), Utc::now())
        .await;

    let reasons = match result {
        Err(StoreError::FetchFailed { reasons }) => reasons,
        other => panic!("expected FetchFailed, got {:?}", other),
    };
    assert_eq!(reasons.len(), 2);
    assert!(reasons[0].contains("acme/a"));
    assert!(reasons[0].contains("401"));
    assert!(reasons[1].contains("404"));
}

#[tokio::test]
async fn empty_key_list_yields_empty_snapshot() {
    let source = FakeSource::with(&[]);
    let store = IssueStore::new(source.clone());

    let snapshot = store
        .get_issues_at(&[], Utc::now())
        .await
        .expect("empty snapshot");

    assert!(snapshot.issues.is_empty());
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn issues_keep_configured_source_order() {
    let source = FakeSource::with(&[
        ("acme/a", Reply::Issues(issues("acme/a", 1))),
        ("acme/b", Reply::Issues(issues("acme/b", 2))),
    ]);
    let store = IssueStore::new(source);

    let snapshot = store
        .get_issues_at(&keys(&["acme/b", "acme/a"]), Utc::now())
        .await
        .expect("snapshot");

    let order: Vec<&str> = snapshot
        .issues
        .iter()
        .map(|issue| issue.source_key.as_str())
        .collect();
    assert_eq!(order, vec!["acme/b", "acme/b", "acme/a"]);
}

#[tokio::test]
async fn second_store_reuses_fresh_disk_entry() {
    let dir = unique_temp_dir("disk-fresh");
    let now = Utc::now();
    let first_source = FakeSource::with(&[("acme/a", Reply::Issues(issues("acme/a", 2)))]);
    let first = IssueStore::new(first_source.clone()).with_disk_cache(DiskCache::new(dir.clone()));
    let _ = first.get_issues_at(&keys(&["acme/a"]), now).await;
    assert_eq!(first_source.calls(), 1);

    let second_source = FakeSource::with(&[]);
    let second =
        IssueStore::new(second_source.clone()).with_disk_cache(DiskCache::new(dir.clone()));
    let snapshot = second
        .get_issues_at(&keys(&["acme/a"]), now + TimeDelta::seconds(60))
        .await
        .expect("snapshot from disk");

    assert_eq!(second_source.calls(), 0);
    assert_eq!(snapshot.issues, issues("acme/a", 2));
    let entry = second.cached("acme/a").expect("entry loaded");
    assert_eq!(entry.fetched_at, now);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn expired_disk_entry_is_refetched_and_kept_as_fallback() {
    let dir = unique_temp_dir("disk-expired");
    let now = Utc::now();
    let first = IssueStore::new(FakeSource::with(&[(
        "acme/a",
        Reply::Issues(issues("acme/a", 2)),
    )]))
    .with_disk_cache(DiskCache::new(dir.clone()));
    let _ = first.get_issues_at(&keys(&["acme/a"]), now).await;

    let source = FakeSource::with(&[("acme/a", Reply::Fail("503 Service Unavailable"))]);
    let second = IssueStore::new(source.clone()).with_disk_cache(DiskCache::new(dir.clone()));
    let snapshot = second
        .get_issues_at(&keys(&["acme/a"]), now + past_ttl())
        .await
        .expect("stale snapshot");

    assert_eq!(source.calls(), 1);
    assert_eq!(snapshot.issues.len(), 2);
    assert_eq!(snapshot.stale_sources, keys(&["acme/a"]));

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn invalidate_removes_disk_entry() {
    let dir = unique_temp_dir("disk-invalidate");
    let disk = DiskCache::new(dir.clone());
    let source = FakeSource::with(&[("acme/a", Reply::Issues(issues("acme/a", 1)))]);
    let store = IssueStore::new(source.clone()).with_disk_cache(disk.clone());
    let now = Utc::now();

    let _ = store.get_issues_at(&keys(&["acme/a"]), now).await;
    assert!(disk.entry_path("acme/a").exists());

    store.invalidate("acme/a");
    assert!(!disk.entry_path("acme/a").exists());
    let _ = store.get_issues_at(&keys(&["acme/a"]), now).await;
    assert_eq!(source.calls(), 2);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_disk_entry_is_reported() {
    let dir = unique_temp_dir("disk-corrupt");
    let disk = DiskCache::new(dir.clone());
    fs::write(disk.entry_path("acme/a"), "{not json").expect("write file");

    assert!(disk.load("acme/a").is_err());
    assert!(matches!(disk.load("acme/b"), Ok(None)));

    let _ = fs::remove_dir_all(&dir);
}
