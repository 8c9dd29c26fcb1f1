use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::config::Config;
use crate::filter::{self, FilterQuery};
use crate::layout::{self, LayoutPlan};
use crate::store::{Comment, Issue, IssueKey, IssueSnapshot};

mod accessors;
mod input;
mod navigation;
mod preset;
mod search;
mod state;

pub use preset::{QUICK_FILTERS, QuickFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Table,
    Detail,
    CommentThread,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFocus {
    #[default]
    None,
    Search,
    Filter,
}

/// Everything the host feeds into the state machine, in arrival order.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Mouse input is captured but has no bindings.
    Mouse,
    RefreshTick,
    IssuesFetched {
        request_id: u64,
        result: Result<IssueSnapshot, String>,
    },
    CommentsFetched {
        request_id: u64,
        key: IssueKey,
        result: Result<Vec<Comment>, String>,
    },
    ExternalActionFinished(Result<String, String>),
}

/// Asynchronous work the host must schedule on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingWork {
    FetchIssues {
        request_id: u64,
        source_keys: Vec<String>,
        /// Drop every cache entry before fetching.
        force: bool,
    },
    FetchComments {
        request_id: u64,
        key: IssueKey,
    },
    OpenBrowser(String),
    CopyToClipboard(String),
}

#[derive(Debug, Default)]
struct SearchState {
    search_text: String,
    filter_text: String,
    input_focus: InputFocus,
    filters_visible: bool,
    active_quick_filter: Option<usize>,
    filtered_indices: Vec<usize>,
    /// Either query has at least one clause.
    narrowing: bool,
}

#[derive(Debug, Default)]
struct NavigationState {
    selected_index: Option<usize>,
    preview_requested: bool,
    detail_scroll: u16,
    comments_scroll: u16,
    max_scroll: u16,
}

#[derive(Debug, Default)]
struct FetchState {
    next_request_id: u64,
    latest_issues_request: Option<u64>,
    applied_issues_request: Option<u64>,
    comments_request: Option<(u64, IssueKey)>,
}

pub struct App {
    should_quit: bool,
    config: Config,
    view: View,
    issues: Vec<Issue>,
    stale_sources: Vec<String>,
    opened: Option<Issue>,
    comments: Vec<Comment>,
    search: SearchState,
    navigation: NavigationState,
    fetch: FetchState,
    layout: LayoutPlan,
    terminal_size: (u16, u16),
    status: String,
    error: Option<String>,
    pending_work: Vec<PendingWork>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            config,
            view: View::Table,
            issues: Vec::new(),
            stale_sources: Vec::new(),
            opened: None,
            comments: Vec::new(),
            search: SearchState::default(),
            navigation: NavigationState {
                preview_requested: true,
                ..NavigationState::default()
            },
            fetch: FetchState::default(),
            layout: layout::plan(layout::MIN_WIDTH, layout::MIN_HEIGHT, false, true),
            terminal_size: (layout::MIN_WIDTH, layout::MIN_HEIGHT),
            status: String::new(),
            error: None,
            pending_work: Vec::new(),
        }
    }

    /// Work to schedule at startup: the first load of every configured source.
    pub fn init(&mut self) -> Vec<PendingWork> {
        self.refresh()
    }

    pub fn refresh(&mut self) -> Vec<PendingWork> {
        self.request_refresh(false);
        self.take_pending_work()
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Vec<PendingWork> {
        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Resize(width, height) => self.set_terminal_size(width, height),
            AppEvent::Mouse => {}
            AppEvent::RefreshTick => self.request_refresh(false),
            AppEvent::IssuesFetched { request_id, result } => {
                self.apply_issues_result(request_id, result)
            }
            AppEvent::CommentsFetched {
                request_id,
                key,
                result,
            } => self.apply_comments_result(request_id, key, result),
            AppEvent::ExternalActionFinished(result) => match result {
                Ok(message) => self.set_status(message),
                Err(message) => self.set_error(message),
            },
        }
        self.take_pending_work()
    }

    pub fn take_pending_work(&mut self) -> Vec<PendingWork> {
        std::mem::take(&mut self.pending_work)
    }

    fn next_request_id(&mut self) -> u64 {
        self.fetch.next_request_id += 1;
        self.fetch.next_request_id
    }

    pub(crate) fn request_refresh(&mut self, force: bool) {
        let request_id = self.next_request_id();
        self.fetch.latest_issues_request = Some(request_id);
        self.status = if force {
            "Reloading all sources...".to_string()
        } else {
            "Refreshing...".to_string()
        };
        self.pending_work.push(PendingWork::FetchIssues {
            request_id,
            source_keys: self.config.source_keys(),
            force,
        });
    }

    fn apply_issues_result(&mut self, request_id: u64, result: Result<IssueSnapshot, String>) {
        if self
            .fetch
            .applied_issues_request
            .is_some_and(|applied| request_id < applied)
        {
            debug!(request_id, "dropping superseded issue result");
            return;
        }
        self.fetch.applied_issues_request = Some(request_id);
        if self.fetch.latest_issues_request == Some(request_id) {
            self.fetch.latest_issues_request = None;
        }

        match result {
            Ok(snapshot) => {
                let count = snapshot.issues.len();
                self.stale_sources = snapshot.stale_sources;
                self.set_issues(snapshot.issues);
                self.error = None;
                self.set_status(format!("Loaded {} issues", count));
            }
            Err(message) => {
                self.set_error(format!("Failed to load issues: {}", message));
                self.status.clear();
            }
        }
    }

    fn apply_comments_result(
        &mut self,
        request_id: u64,
        key: IssueKey,
        result: Result<Vec<Comment>, String>,
    ) {
        let pending = self
            .fetch
            .comments_request
            .as_ref()
            .is_some_and(|(pending_id, pending_key)| {
                *pending_id == request_id && *pending_key == key
            });
        let opened = self.opened.as_ref().is_some_and(|issue| issue.key() == key);
        if !pending || !opened || self.view != View::Detail {
            debug!(request_id, issue = key.id, "discarding stale comment result");
            return;
        }
        self.fetch.comments_request = None;

        match result {
            Ok(comments) => {
                self.comments = comments;
                self.navigation.comments_scroll = 0;
                self.set_view(View::CommentThread);
                self.status.clear();
            }
            Err(message) => {
                self.set_error(format!("Failed to load comments: {}", message));
                self.status.clear();
            }
        }
    }
}
