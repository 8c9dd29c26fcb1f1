use anyhow::Context;
use tracing::{debug, warn};

use super::*;

const COMMENTS_PER_PAGE: usize = 100;
// Threads past this many comments are truncated rather than paged forever.
const MAX_COMMENT_PAGES: usize = 20;

impl GitHubClient {
    /// The whole thread of an issue, oldest first.
    pub async fn list_comments(
        &self,
        owner: &str,
        repo: &str,
        issue_number: i64,
    ) -> Result<Vec<ApiComment>> {
        let url = comments_url(owner, repo, issue_number);
        let per_page = COMMENTS_PER_PAGE.to_string();
        let mut comments = Vec::new();

        for page in 1..=MAX_COMMENT_PAGES {
            let page_number = page.to_string();
            let response = self
                .authorized(self.client.get(&url))
                .query(&[("per_page", per_page.as_str()), ("page", page_number.as_str())])
                .send()
                .await
                .with_context(|| {
                    format!("{}/{}#{}: comment request failed", owner, repo, issue_number)
                })?
                .error_for_status()?;
            let batch = response.json::<Vec<ApiComment>>().await.with_context(|| {
                format!(
                    "{}/{}#{}: unreadable comments page {}",
                    owner, repo, issue_number, page
                )
            })?;
            debug!(
                owner,
                repo,
                issue = issue_number,
                page,
                count = batch.len(),
                "fetched comment page"
            );

            let last = is_last_page(batch.len());
            comments.extend(batch);
            if last {
                return Ok(comments);
            }
        }

        warn!(
            owner,
            repo,
            issue = issue_number,
            count = comments.len(),
            "comment thread truncated"
        );
        Ok(comments)
    }
}

fn comments_url(owner: &str, repo: &str, issue_number: i64) -> String {
    format!(
        "{}/repos/{}/{}/issues/{}/comments",
        API_BASE, owner, repo, issue_number
    )
}

/// A short page means there is nothing after it.
fn is_last_page(batch_len: usize) -> bool {
    batch_len < COMMENTS_PER_PAGE
}
