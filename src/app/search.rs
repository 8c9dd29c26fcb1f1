use super::*;

impl App {
    pub fn search_text(&self) -> &str {
        self.search.search_text.as_str()
    }

    pub fn filter_text(&self) -> &str {
        self.search.filter_text.as_str()
    }

    pub fn input_focus(&self) -> InputFocus {
        self.search.input_focus
    }

    pub fn filters_visible(&self) -> bool {
        self.search.filters_visible
    }

    pub fn filtered_indices(&self) -> &[usize] {
        &self.search.filtered_indices
    }

    /// True when the table may be hiding issues.
    pub fn is_filtered(&self) -> bool {
        self.search.narrowing || self.search.active_quick_filter.is_some()
    }

    pub(super) fn set_input_focus(&mut self, focus: InputFocus) {
        self.search.input_focus = focus;
    }

    pub(super) fn toggle_filters(&mut self) {
        self.search.filters_visible = !self.search.filters_visible;
        if self.search.filters_visible {
            self.set_input_focus(InputFocus::Filter);
        } else {
            self.set_input_focus(InputFocus::None);
        }
        self.replan();
    }

    /// Filter box first, then search; only meaningful while the overlay is open.
    pub(super) fn cycle_input_focus(&mut self) {
        if !self.search.filters_visible {
            return;
        }
        let next = match self.input_focus() {
            InputFocus::Filter => InputFocus::Search,
            InputFocus::Search | InputFocus::None => InputFocus::Filter,
        };
        self.set_input_focus(next);
    }

    pub(super) fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.input_focus() {
            InputFocus::Search => Some(&mut self.search.search_text),
            InputFocus::Filter => Some(&mut self.search.filter_text),
            InputFocus::None => None,
        }
    }

    pub(super) fn rebuild_filter(&mut self) {
        let search = FilterQuery::search(self.search.search_text.as_str());
        let filter = FilterQuery::parse_with_viewer(
            self.search.filter_text.as_str(),
            self.config.viewer.as_deref(),
        );
        self.search.narrowing = !search.is_empty() || !filter.is_empty();
        self.search.filtered_indices = filter::filter_indices(&self.issues, &search, &filter);
        self.clamp_selection();
    }

    pub(super) fn clamp_selection(&mut self) {
        let len = self.search.filtered_indices.len();
        self.navigation.selected_index = if len == 0 {
            None
        } else {
            Some(
                self.navigation
                    .selected_index
                    .map_or(0, |index| index.min(len - 1)),
            )
        };
    }
}
