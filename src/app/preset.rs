use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickFilter {
    pub name: &'static str,
    pub query: &'static str,
    pub key: char,
}

pub const QUICK_FILTERS: [QuickFilter; 6] = [
    QuickFilter {
        name: "My Issues",
        query: "assignee:@me",
        key: '1',
    },
    QuickFilter {
        name: "Open",
        query: "state:open",
        key: '2',
    },
    QuickFilter {
        name: "Recent",
        query: "updated:>7days",
        key: '3',
    },
    QuickFilter {
        name: "Bugs",
        query: "label:bug",
        key: '4',
    },
    QuickFilter {
        name: "Features",
        query: "label:feature",
        key: '5',
    },
    QuickFilter {
        name: "High Priority",
        query: "label:priority-high",
        key: '6',
    },
];

impl QuickFilter {
    pub fn index_for_key(key: char) -> Option<usize> {
        QUICK_FILTERS.iter().position(|preset| preset.key == key)
    }
}

impl App {
    pub fn active_quick_filter(&self) -> Option<usize> {
        self.search.active_quick_filter
    }

    /// Same preset again clears it; another one replaces the filter text.
    pub(super) fn toggle_quick_filter(&mut self, index: usize) {
        let Some(preset) = QUICK_FILTERS.get(index) else {
            return;
        };
        if self.search.active_quick_filter == Some(index) {
            self.search.active_quick_filter = None;
            self.search.filter_text.clear();
            self.status = format!("Cleared {} filter", preset.name);
        } else {
            self.search.active_quick_filter = Some(index);
            self.search.filter_text = preset.query.to_string();
            self.status = format!("Filter: {}", preset.name);
        }
        self.rebuild_filter();
    }
}
