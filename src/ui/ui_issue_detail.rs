use super::*;

pub(super) fn detail_lines(app: &App, palette: &Palette) -> (Vec<Line<'static>>, u16) {
    let Some(issue) = app.opened_issue() else {
        return (Vec::new(), 0);
    };

    let mut lines = vec![title_line(issue, palette), metadata_line(issue, palette)];
    if !issue.labels.is_empty() {
        let mut spans = vec![Span::styled(
            "Labels: ",
            Style::default().fg(palette.muted),
        )];
        spans.extend(label_spans(&issue.labels, palette));
        lines.push(Line::from(spans));
    }
    lines.push(Line::default());
    lines.push(section_line("Description:", palette));
    lines.extend(body_lines(issue, palette));
    if app.comments_loading() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Loading comments...",
            Style::default().fg(palette.accent),
        )));
    }

    window(app, lines, app.detail_scroll())
}

pub(super) fn comment_lines(app: &App, palette: &Palette) -> (Vec<Line<'static>>, u16) {
    let Some(issue) = app.opened_issue() else {
        return (Vec::new(), 0);
    };
    let comments = app.comments();

    let mut lines = vec![title_line(issue, palette)];
    if comments.is_empty() {
        lines.push(Line::from(Span::styled(
            "No comments on this issue.",
            Style::default().fg(palette.muted),
        )));
        return window(app, lines, app.comments_scroll());
    }

    lines.push(Line::from(Span::styled(
        format!("Repository: {} • {} comments", issue.source_key, comments.len()),
        Style::default().fg(palette.muted),
    )));
    let rule_width = usize::from(app.layout().detail_width);
    for (index, comment) in comments.iter().enumerate() {
        if index > 0 {
            lines.push(Line::from(Span::styled(
                "─".repeat(rule_width),
                Style::default().fg(palette.muted),
            )));
        }
        lines.push(Line::default());
        lines.extend(comment_block(comment, palette));
        lines.push(Line::default());
    }

    window(app, lines, app.comments_scroll())
}

fn comment_block(comment: &Comment, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            comment.author.clone(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" commented on {}", format_comment_date(comment.created_at)),
            Style::default().fg(palette.muted),
        ),
    ])];
    if comment.body.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            "No content.",
            Style::default().fg(palette.muted),
        )));
    } else {
        lines.extend(markdown::render(&comment.body, palette));
    }
    lines
}

fn title_line(issue: &Issue, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(
        format!("#{}: {}", issue.id, issue.title),
        Style::default()
            .fg(palette.title)
            .add_modifier(Modifier::BOLD),
    ))
}

/// "OPEN • Repository: key • Assignee: @x • Created: … • Updated: … • Comments: k"
fn metadata_line(issue: &Issue, palette: &Palette) -> Line<'static> {
    let muted = Style::default().fg(palette.muted);
    let mut spans = vec![
        Span::styled(issue.state.as_str().to_uppercase(), state_style(issue, palette)),
        Span::styled(format!(" • Repository: {}", issue.source_key), muted),
    ];
    spans.push(Span::styled(
        match issue.assignee.as_deref() {
            Some(assignee) => format!(" • Assignee: @{}", assignee),
            None => " • Assignee: Unassigned".to_string(),
        },
        muted,
    ));
    if let Some(created) = format_date(issue.created_at) {
        spans.push(Span::styled(format!(" • Created: {}", created), muted));
    }
    if let Some(updated) = format_date(issue.updated_at) {
        spans.push(Span::styled(format!(" • Updated: {}", updated), muted));
    }
    spans.push(Span::styled(
        format!(" • Comments: {}", issue.comment_count),
        muted,
    ));
    Line::from(spans)
}

fn section_line(title: &'static str, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Wraps to the detail width and cuts the visible window; returns it with the scroll limit.
fn window(app: &App, lines: Vec<Line<'static>>, scroll: u16) -> (Vec<Line<'static>>, u16) {
    let layout = app.layout();
    let height = usize::from(layout.detail_height);
    let wrapped = wrap_lines(lines, usize::from(layout.detail_width));
    let max_scroll = u16::try_from(wrapped.len().saturating_sub(height)).unwrap_or(u16::MAX);
    let start = usize::from(scroll.min(max_scroll));

    let mut visible = wrapped
        .into_iter()
        .skip(start)
        .take(height)
        .collect::<Vec<_>>();
    while visible.len() < height {
        visible.push(Line::default());
    }
    (visible, max_scroll)
}
