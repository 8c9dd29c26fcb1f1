use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ApiUser {
    pub login: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiLabel {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiIssue {
    pub number: i64,
    pub state: String,
    pub title: String,
    pub body: Option<String>,
    #[serde(default)]
    pub comments: u32,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub labels: Vec<ApiLabel>,
    pub assignee: Option<ApiUser>,
    #[serde(default)]
    pub assignees: Vec<ApiUser>,
    pub html_url: Option<String>,
    pub pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiComment {
    pub id: i64,
    pub body: Option<String>,
    pub created_at: Option<String>,
    pub user: Option<ApiUser>,
}
