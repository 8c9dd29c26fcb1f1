use super::*;

const FILTER_EXAMPLES: &str = "Examples: state:open, label:bug, assignee:username, repo:Azure/AKS";

pub(super) fn table_lines(app: &App, palette: &Palette) -> Vec<Line<'static>> {
    let layout = app.layout();
    let mut lines = vec![quick_filter_line(app, palette)];
    lines.push(input_line(
        "Search",
        app.search_text(),
        app.input_focus() == InputFocus::Search,
        palette,
    ));
    if app.filters_visible() {
        lines.extend(filter_overlay_lines(app, palette));
    }
    lines.push(match layout.preview_hint {
        Some(hint) => Line::from(Span::styled(hint, Style::default().fg(palette.muted))),
        None => Line::default(),
    });

    let table = issue_rows(app, palette);
    if !layout.show_preview_pane {
        lines.extend(table);
        return lines;
    }

    let table_width = usize::from(layout.table_width);
    let spacer = " ".repeat(usize::from(layout.spacer_width));
    let preview_width = usize::from(layout.preview_width);
    let mut preview = match app.selected_issue() {
        Some(issue) => wrap_lines(preview_lines(issue, palette), preview_width),
        None => Vec::new(),
    }
    .into_iter();
    for row in table {
        let fitted = fit_line(row, table_width);
        let row_style = fitted.style;
        let mut spans = fitted
            .spans
            .into_iter()
            .map(|span| span.patch_style(row_style))
            .collect::<Vec<_>>();
        spans.push(Span::raw(spacer.clone()));
        if let Some(side) = preview.next() {
            spans.extend(fit_line(side, preview_width).spans);
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn quick_filter_line(app: &App, palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "Quick filters:",
        Style::default().fg(palette.muted),
    )];
    for (index, preset) in QUICK_FILTERS.iter().enumerate() {
        let style = if app.active_quick_filter() == Some(index) {
            Style::default()
                .fg(palette.background)
                .bg(palette.quick_filter_active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[{}] {}", preset.key, preset.name),
            style,
        ));
    }
    Line::from(spans)
}

fn input_line(label: &str, value: &str, focused: bool, palette: &Palette) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };
    let mut spans = vec![
        Span::styled(format!("{}: ", label), label_style),
        Span::styled(value.to_string(), Style::default().fg(palette.text)),
    ];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(palette.accent)));
    }
    Line::from(spans)
}

fn filter_overlay_lines(app: &App, palette: &Palette) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Filters (tab switches between filter and search)",
            Style::default()
                .fg(palette.title)
                .add_modifier(Modifier::BOLD),
        )),
        input_line(
            "Filter",
            app.filter_text(),
            app.input_focus() == InputFocus::Filter,
            palette,
        ),
        Line::from(Span::styled(
            FILTER_EXAMPLES,
            Style::default().fg(palette.muted),
        )),
        Line::default(),
    ]
}

/// Column header followed by exactly `table_height` rows, windowed on the selection.
fn issue_rows(app: &App, palette: &Palette) -> Vec<Line<'static>> {
    let layout = app.layout();
    let rows = usize::from(layout.table_height);
    let mut lines = Vec::with_capacity(rows + 1);
    lines.push(header_row(&layout.columns, palette));

    let issues = app.issues_for_view();
    if issues.is_empty() {
        let message = if app.refreshing() && app.issues().is_empty() {
            "Loading issues..."
        } else if app.issues().is_empty() {
            "No issues loaded. Press r to refresh."
        } else {
            "No issues match the current search and filter."
        };
        lines.push(Line::from(Span::styled(
            message,
            Style::default().fg(palette.muted),
        )));
    } else {
        let selected = app.selected_index().unwrap_or(0);
        let start = window_start(selected, rows);
        for (offset, issue) in issues.iter().skip(start).take(rows).enumerate() {
            let is_selected = app.selected_index() == Some(start + offset);
            lines.push(issue_row(issue, &layout.columns, is_selected, palette));
        }
    }

    while lines.len() < rows + 1 {
        lines.push(Line::default());
    }
    lines
}

fn header_row(columns: &[Column], palette: &Palette) -> Line<'static> {
    let style = Style::default()
        .fg(palette.title)
        .add_modifier(Modifier::BOLD);
    let spans = columns
        .iter()
        .map(|column| {
            let width = usize::from(column.width);
            Span::styled(
                format!("{} ", pad(fit_cell(column.name.header(), width), width)),
                style,
            )
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

fn issue_row(issue: &Issue, columns: &[Column], selected: bool, palette: &Palette) -> Line<'static> {
    let spans = columns
        .iter()
        .map(|column| {
            let width = usize::from(column.width);
            let (text, style) = cell(issue, column.name, palette);
            Span::styled(format!("{} ", pad(fit_cell(&text, width), width)), style)
        })
        .collect::<Vec<_>>();
    let line = Line::from(spans);
    if selected {
        line.style(Style::default().bg(palette.selection))
    } else {
        line
    }
}

fn cell(issue: &Issue, name: ColumnName, palette: &Palette) -> (String, Style) {
    let plain = Style::default().fg(palette.text);
    let muted = Style::default().fg(palette.muted);
    match name {
        ColumnName::Number => (format!("#{}", issue.id), muted),
        ColumnName::Title => (issue.title.clone(), plain),
        ColumnName::State => (issue.state.label().to_string(), state_style(issue, palette)),
        ColumnName::Assignee => match issue.assignee.as_deref() {
            Some(assignee) => (format!("@{}", assignee), plain),
            None => ("-".to_string(), muted),
        },
        ColumnName::Labels => (
            issue.labels.join(", "),
            Style::default().fg(palette.label),
        ),
        ColumnName::Updated => (
            format_date(issue.updated_at).unwrap_or_else(|| "-".to_string()),
            muted,
        ),
        ColumnName::Repo => (issue.source_key.clone(), muted),
    }
}

fn preview_lines(issue: &Issue, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Issue #{}", issue.id),
            Style::default().fg(palette.muted),
        )),
        Line::from(Span::styled(
            issue.title.clone(),
            Style::default()
                .fg(palette.title)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let mut meta = vec![Span::styled(
        issue.state.label().to_string(),
        state_style(issue, palette),
    )];
    if let Some(assignee) = issue.assignee.as_deref() {
        meta.push(Span::styled(
            format!(" • @{}", assignee),
            Style::default().fg(palette.text),
        ));
    }
    meta.push(Span::styled(
        format!(" • {} comments", issue.comment_count),
        Style::default().fg(palette.muted),
    ));
    lines.push(Line::from(meta));

    if !issue.labels.is_empty() {
        lines.push(Line::from(label_spans(&issue.labels, palette)));
    }
    lines.push(Line::default());
    lines.extend(body_lines(issue, palette));
    lines
}
