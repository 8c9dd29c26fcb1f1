use super::*;

const ISSUES_PER_PAGE: &str = "50";

impl GitHubClient {
    /// First page of open issues, newest first, optionally narrowed server-side by labels.
    pub async fn list_open_issues(
        &self,
        owner: &str,
        repo: &str,
        labels: &[String],
    ) -> Result<Vec<ApiIssue>> {
        let url = format!("{}/repos/{}/{}/issues", API_BASE, owner, repo);
        let mut request = self.authorized(self.client.get(url)).query(&[
            ("state", "open"),
            ("per_page", ISSUES_PER_PAGE),
        ]);
        if !labels.is_empty() {
            request = request.query(&[("labels", labels.join(","))]);
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<Vec<ApiIssue>>().await?)
    }
}
