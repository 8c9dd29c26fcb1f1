use super::*;

impl App {
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Replaces the whole issue set and re-clamps the cursor into the new filtered set.
    pub fn set_issues(&mut self, issues: Vec<Issue>) {
        let selected_key = self.selected_issue().map(Issue::key);
        self.issues = issues;
        self.rebuild_filter();
        if let Some(key) = selected_key
            && let Some(position) = self.search.filtered_indices.iter().position(|index| {
                self.issues
                    .get(*index)
                    .is_some_and(|issue| issue.key() == key)
            })
        {
            self.navigation.selected_index = Some(position);
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub(super) fn set_view(&mut self, view: View) {
        self.view = view;
        self.error = None;
        self.navigation.max_scroll = 0;
    }

    pub(super) fn set_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.replan();
    }

    pub(super) fn replan(&mut self) {
        let (width, height) = self.terminal_size;
        self.layout = layout::plan(
            width,
            height,
            self.search.filters_visible,
            self.navigation.preview_requested,
        );
    }

    /// Reported back by the host after each render of a scrollable screen.
    pub fn set_max_scroll(&mut self, max_scroll: u16) {
        self.navigation.max_scroll = max_scroll;
        let scroll = match self.view {
            View::Detail => &mut self.navigation.detail_scroll,
            View::CommentThread => &mut self.navigation.comments_scroll,
            View::Table => return,
        };
        if *scroll > max_scroll {
            *scroll = max_scroll;
        }
    }
}
