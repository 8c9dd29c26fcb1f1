use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::Repository;
use crate::github::{ApiComment, ApiIssue, GitHubClient};
use crate::store::{Comment, Issue, IssueState};

/// Remote side of the browser: one call per configured source, one per comment thread.
#[async_trait]
pub trait IssueSource: Send + Sync {
    async fn fetch_issues(&self, source_key: &str) -> Result<Vec<Issue>>;
    async fn fetch_comments(&self, source_key: &str, issue_id: i64) -> Result<Vec<Comment>>;
}

pub struct GitHubSource {
    client: GitHubClient,
    repositories: Vec<Repository>,
}

impl GitHubSource {
    pub fn new(client: GitHubClient, repositories: Vec<Repository>) -> Self {
        Self {
            client,
            repositories,
        }
    }

    fn label_filter(&self, source_key: &str) -> &[String] {
        self.repositories
            .iter()
            .find(|repository| repository.full_name() == source_key)
            .map(|repository| repository.labels.as_slice())
            .unwrap_or_default()
    }
}

#[async_trait]
impl IssueSource for GitHubSource {
    async fn fetch_issues(&self, source_key: &str) -> Result<Vec<Issue>> {
        let (owner, repo) = split_source_key(source_key)?;
        let issues = self
            .client
            .list_open_issues(owner, repo, self.label_filter(source_key))
            .await?;
        Ok(issues
            .iter()
            .filter_map(|issue| map_issue(source_key, issue))
            .collect())
    }

    async fn fetch_comments(&self, source_key: &str, issue_id: i64) -> Result<Vec<Comment>> {
        let (owner, repo) = split_source_key(source_key)?;
        let comments = self.client.list_comments(owner, repo, issue_id).await?;
        Ok(comments.iter().map(map_comment).collect())
    }
}

pub fn split_source_key(source_key: &str) -> Result<(&str, &str)> {
    match source_key.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => Err(anyhow!("invalid repository key {:?}", source_key)),
    }
}

/// Pull requests come back from the issues endpoint too; they are dropped here.
pub fn map_issue(source_key: &str, issue: &ApiIssue) -> Option<Issue> {
    if issue.pull_request.is_some() {
        return None;
    }

    let mut labels: Vec<String> = Vec::with_capacity(issue.labels.len());
    for label in &issue.labels {
        if !labels.iter().any(|existing| existing == &label.name) {
            labels.push(label.name.clone());
        }
    }
    let assignee = issue
        .assignee
        .as_ref()
        .or_else(|| issue.assignees.first())
        .map(|user| user.login.clone());

    Some(Issue {
        id: issue.number,
        title: issue.title.clone(),
        body: issue.body.clone().filter(|body| !body.trim().is_empty()),
        state: IssueState::parse(issue.state.as_str()),
        assignee,
        labels,
        created_at: parse_timestamp(issue.created_at.as_deref()),
        updated_at: parse_timestamp(issue.updated_at.as_deref()),
        comment_count: issue.comments,
        source_key: source_key.to_string(),
        url: issue.html_url.clone(),
    })
}

pub fn map_comment(comment: &ApiComment) -> Comment {
    Comment {
        id: comment.id,
        author: comment
            .user
            .as_ref()
            .map(|user| user.login.clone())
            .unwrap_or_else(|| "unknown".to_string()),
        body: comment.body.clone().unwrap_or_default(),
        created_at: parse_timestamp(comment.created_at.as_deref()),
    }
}

pub fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = value?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}
