use super::*;

const ELLIPSIS: &str = "...";
const MIN_FRAGMENT: usize = 5;

/// Fits `text` into `width` characters. Long text keeps a head and a tail around the
/// ellipsis when both stay at least five characters, otherwise only the head.
pub fn fit_cell(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    if width < ELLIPSIS.len() {
        return text.chars().take(width).collect();
    }

    let budget = width - ELLIPSIS.len();
    let head = budget / 2;
    let tail = budget - head;
    if head >= MIN_FRAGMENT && tail >= MIN_FRAGMENT {
        let start: String = text.chars().take(head).collect();
        let end: String = text.chars().skip(count - tail).collect();
        return format!("{}{}{}", start, ELLIPSIS, end);
    }
    let start: String = text.chars().take(budget).collect();
    format!("{}{}", start, ELLIPSIS)
}

pub(super) fn pad(text: String, width: usize) -> String {
    let count = text.chars().count();
    if count >= width {
        return text;
    }
    format!("{}{}", text, " ".repeat(width - count))
}

pub(super) fn line_width(line: &Line<'_>) -> usize {
    line.spans
        .iter()
        .map(|span| span.content.chars().count())
        .sum()
}

/// Clips or pads a styled line to exactly `width` characters.
pub(super) fn fit_line(line: Line<'static>, width: usize) -> Line<'static> {
    let mut remaining = width;
    let mut spans = Vec::with_capacity(line.spans.len() + 1);
    for span in line.spans {
        if remaining == 0 {
            break;
        }
        let count = span.content.chars().count();
        if count <= remaining {
            remaining -= count;
            spans.push(span);
            continue;
        }
        let clipped: String = span.content.chars().take(remaining).collect();
        spans.push(Span::styled(clipped, span.style));
        remaining = 0;
    }
    if remaining > 0 {
        spans.push(Span::raw(" ".repeat(remaining)));
    }
    Line::from(spans).style(line.style)
}

/// Hard-wraps a styled line at `width` characters, keeping span styles.
pub(super) fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    if line_width(&line) <= width {
        return vec![line];
    }

    let mut wrapped = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    for span in line.spans {
        let mut chars = span.content.chars().peekable();
        while chars.peek().is_some() {
            if used == width {
                wrapped.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            let piece: String = chars.by_ref().take(width - used).collect();
            used += piece.chars().count();
            current.push(Span::styled(piece, span.style));
        }
    }
    if !current.is_empty() {
        wrapped.push(Line::from(current));
    }
    wrapped
}

pub(super) fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

/// First visible row so that `selected` stays inside a window of `rows`.
pub(super) fn window_start(selected: usize, rows: usize) -> usize {
    if rows == 0 {
        return 0;
    }
    selected.saturating_sub(rows - 1)
}

pub(super) fn state_style(issue: &Issue, palette: &Palette) -> Style {
    let color = match issue.state {
        crate::store::IssueState::Open => palette.state_open,
        crate::store::IssueState::Closed => palette.state_closed,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub(super) fn format_date(value: Option<chrono::DateTime<chrono::Utc>>) -> Option<String> {
    value.map(|value| value.format("%b %d, %Y").to_string())
}

pub(super) fn format_comment_date(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    value
        .map(|value| value.format("%b %d, %Y at %-I:%M %p").to_string())
        .unwrap_or_else(|| "Unknown date".to_string())
}

pub(super) fn label_spans(labels: &[String], palette: &Palette) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(labels.len() * 2);
    for (index, label) in labels.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("[{}]", label),
            Style::default().fg(palette.label),
        ));
    }
    spans
}

pub(super) fn body_lines(issue: &Issue, palette: &Palette) -> Vec<Line<'static>> {
    match issue.body.as_deref() {
        Some(body) if !body.trim().is_empty() => markdown::render(body, palette),
        _ => vec![Line::from(Span::styled(
            "No description provided.",
            Style::default().fg(palette.muted),
        ))],
    }
}
