use super::*;

impl App {
    pub(super) fn move_selection(&mut self, delta: isize) {
        let len = self.search.filtered_indices.len();
        if len == 0 {
            self.navigation.selected_index = None;
            return;
        }
        let current = self.navigation.selected_index.unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.navigation.selected_index = Some(next);
    }

    pub(super) fn page_size(&self) -> isize {
        self.layout.table_height.max(1) as isize
    }

    pub(super) fn scroll(&mut self, delta: i32) {
        let max_scroll = self.navigation.max_scroll;
        let scroll = match self.view {
            View::Detail => &mut self.navigation.detail_scroll,
            View::CommentThread => &mut self.navigation.comments_scroll,
            View::Table => return,
        };
        let next = i32::from(*scroll).saturating_add(delta).clamp(0, i32::from(max_scroll));
        *scroll = next as u16;
    }

    /// Table -> Detail. Ignored unless the cursor points into the filtered set.
    pub(super) fn open_selected(&mut self) {
        let Some(issue) = self.selected_issue().cloned() else {
            return;
        };
        self.opened = Some(issue);
        self.comments.clear();
        self.navigation.detail_scroll = 0;
        self.set_view(View::Detail);
        self.status.clear();
    }

    pub(super) fn request_comments(&mut self) {
        let Some(key) = self.opened.as_ref().map(Issue::key) else {
            return;
        };
        if self
            .fetch
            .comments_request
            .as_ref()
            .is_some_and(|(_, pending)| *pending == key)
        {
            return;
        }
        let request_id = self.next_request_id();
        self.fetch.comments_request = Some((request_id, key.clone()));
        self.error = None;
        self.status = "Loading comments...".to_string();
        self.pending_work
            .push(PendingWork::FetchComments { request_id, key });
    }

    /// Unwinds exactly one level per press.
    pub(super) fn back(&mut self) {
        match self.view {
            View::CommentThread => {
                self.comments.clear();
                self.set_view(View::Detail);
            }
            // The table cursor is left where it was when the issue was opened.
            View::Detail => {
                self.opened = None;
                self.fetch.comments_request = None;
                self.status.clear();
                self.set_view(View::Table);
            }
            View::Table => {
                if self.search.filters_visible {
                    self.toggle_filters();
                    return;
                }
                if self.search.input_focus != InputFocus::None {
                    self.set_input_focus(InputFocus::None);
                }
            }
        }
    }

    fn current_issue(&self) -> Option<&Issue> {
        match self.view {
            View::Table => self.selected_issue(),
            View::Detail | View::CommentThread => self.opened.as_ref(),
        }
    }

    pub(super) fn open_in_browser(&mut self) {
        let Some((id, url)) = self.current_issue().map(|issue| (issue.id, issue.url.clone())) else {
            self.status = "No issue selected".to_string();
            return;
        };
        match url {
            Some(url) => {
                self.status = format!("Opening #{} in browser", id);
                self.pending_work.push(PendingWork::OpenBrowser(url));
            }
            None => self.set_error(format!("Issue #{} has no URL", id)),
        }
    }

    pub(super) fn copy_body(&mut self) {
        let Some((id, body)) = self
            .current_issue()
            .map(|issue| (issue.id, issue.body.clone()))
        else {
            self.status = "No issue selected".to_string();
            return;
        };
        match body {
            Some(body) => {
                self.status = format!("Copying #{} to clipboard", id);
                self.pending_work.push(PendingWork::CopyToClipboard(body));
            }
            None => self.status = format!("Issue #{} has no description", id),
        }
    }

    pub(super) fn toggle_preview(&mut self) {
        self.navigation.preview_requested = !self.navigation.preview_requested;
        self.replan();
        if let Some(hint) = self.layout.preview_hint {
            self.status = hint.to_string();
        }
    }
}
