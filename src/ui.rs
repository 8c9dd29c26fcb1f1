use ratatui::Frame;
use ratatui::layout::Margin;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph};

use crate::app::{App, InputFocus, QUICK_FILTERS, View};
use crate::layout::{Column, ColumnName};
use crate::markdown;
use crate::store::{Comment, Issue};
use crate::theme::{self, Palette};

mod ui_issue_detail;
mod ui_issues;
mod ui_shared;

pub use ui_shared::fit_cell;
use ui_shared::*;

/// One frame of output. Identical app state always yields an identical frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub text: Text<'static>,
    /// Furthest the current screen can scroll; fed back into the app.
    pub max_scroll: u16,
    pub background: Color,
}

pub fn render(app: &App) -> RenderedView {
    let palette = theme::resolve_palette(app.config().theme.as_deref());
    let mut lines = vec![header_line(app, palette)];
    let (body, max_scroll) = match app.view() {
        View::Table => (ui_issues::table_lines(app, palette), 0),
        View::Detail => ui_issue_detail::detail_lines(app, palette),
        View::CommentThread => ui_issue_detail::comment_lines(app, palette),
    };
    lines.extend(body);
    lines.push(error_line(app, palette));
    lines.push(status_line(app, palette));
    lines.push(help_line(app, palette));

    RenderedView {
        text: Text::from(lines),
        max_scroll,
        background: palette.background,
    }
}

pub fn draw(frame: &mut Frame<'_>, view: &RenderedView) {
    let area = frame.area().inner(Margin {
        horizontal: 2,
        vertical: 0,
    });
    frame.render_widget(
        Block::default().style(Style::default().bg(view.background)),
        frame.area(),
    );
    frame.render_widget(Paragraph::new(view.text.clone()), area);
}

fn header_line(app: &App, palette: &Palette) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            "Issue Monitor",
            Style::default()
                .fg(palette.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  Monitoring: {}", app.config().source_keys().join(", ")),
            Style::default().fg(palette.muted),
        ),
    ];
    if app.refreshing() {
        spans.push(Span::styled(
            "  ⟳ refreshing",
            Style::default().fg(palette.accent),
        ));
    }
    Line::from(spans)
}

fn error_line(app: &App, palette: &Palette) -> Line<'static> {
    match app.error() {
        Some(message) => Line::from(Span::styled(
            format!("Error: {}", message),
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::default(),
    }
}

fn status_line(app: &App, palette: &Palette) -> Line<'static> {
    let mut summary = match app.view() {
        View::Table => table_summary(app),
        View::Detail | View::CommentThread => match app.opened_issue() {
            Some(issue) => format!("Issue #{} • {}", issue.id, issue.source_key),
            None => String::new(),
        },
    };
    if !app.stale_sources().is_empty() {
        summary.push_str(&format!(" • stale: {}", app.stale_sources().join(", ")));
    }

    let mut spans = vec![Span::styled(summary, Style::default().fg(palette.text))];
    if !app.status().is_empty() {
        spans.push(Span::styled(
            format!("  {}", app.status()),
            Style::default().fg(palette.muted),
        ));
    }
    Line::from(spans)
}

/// "N of M issues (filtered) • Row i/N • Issue #n • @assignee • k comments"
fn table_summary(app: &App) -> String {
    let shown = app.filtered_indices().len();
    let mut summary = format!("{} of {} issues", shown, app.issues().len());
    if app.is_filtered() {
        summary.push_str(" (filtered)");
    }
    if let (Some(index), Some(issue)) = (app.selected_index(), app.selected_issue()) {
        summary.push_str(&format!(" • Row {}/{} • Issue #{}", index + 1, shown, issue.id));
        if let Some(assignee) = issue.assignee.as_deref() {
            summary.push_str(&format!(" • @{}", assignee));
        }
        if issue.comment_count > 0 {
            summary.push_str(&format!(" • {} comments", issue.comment_count));
        }
    }
    summary
}

fn help_line(app: &App, palette: &Palette) -> Line<'static> {
    let help = match app.view() {
        View::Table if app.input_focus() != InputFocus::None => {
            "enter apply • tab switch input • ctrl+u clear • esc close"
        }
        View::Table if app.preview_requested() => {
            "enter open • f filter • s search • 1-6 quick filters • p preview (on) • r refresh • o browser • y copy • q quit"
        }
        View::Table => {
            "enter open • f filter • s search • 1-6 quick filters • p preview (off) • r refresh • o browser • y copy • q quit"
        }
        View::Detail => {
            "c comments • o open in browser • y copy description • ↑/↓ scroll • esc back"
        }
        View::CommentThread => "↑/↓ scroll • o open in browser • y copy description • esc back",
    };
    Line::from(Span::styled(help, Style::default().fg(palette.muted)))
}
