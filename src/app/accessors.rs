use super::*;

impl App {
    pub fn view(&self) -> View {
        self.view
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn issues_for_view(&self) -> Vec<&Issue> {
        self.search
            .filtered_indices
            .iter()
            .filter_map(|index| self.issues.get(*index))
            .collect::<Vec<&Issue>>()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.navigation.selected_index
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        let index = *self
            .search
            .filtered_indices
            .get(self.navigation.selected_index?)?;
        self.issues.get(index)
    }

    /// The issue shown on Detail and CommentThread, captured when it was opened.
    pub fn opened_issue(&self) -> Option<&Issue> {
        self.opened.as_ref()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comments_loading(&self) -> bool {
        self.fetch.comments_request.is_some()
    }

    pub fn refreshing(&self) -> bool {
        self.fetch.latest_issues_request.is_some()
    }

    pub fn stale_sources(&self) -> &[String] {
        &self.stale_sources
    }

    pub fn layout(&self) -> &LayoutPlan {
        &self.layout
    }

    pub fn preview_requested(&self) -> bool {
        self.navigation.preview_requested
    }

    pub fn detail_scroll(&self) -> u16 {
        self.navigation.detail_scroll
    }

    pub fn comments_scroll(&self) -> u16 {
        self.navigation.comments_scroll
    }

    pub fn status(&self) -> &str {
        self.status.as_str()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
