use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::theme::Palette;

/// Renders an issue or comment body into styled lines. Links are shown inline as `text <url>`.
pub fn render(input: &str, palette: &Palette) -> Vec<Line<'static>> {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS;
    let mut writer = Writer::new(palette);
    for event in Parser::new_ext(input, options) {
        writer.handle(event);
    }
    writer.finish()
}

struct Writer<'a> {
    palette: &'a Palette,
    lines: Vec<Vec<Span<'static>>>,
    styles: Vec<Style>,
    link: Option<String>,
    list_depth: usize,
    quote_depth: usize,
}

impl<'a> Writer<'a> {
    fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            lines: vec![Vec::new()],
            styles: vec![Style::default().fg(palette.text)],
            link: None,
            list_depth: 0,
            quote_depth: 0,
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(text.as_ref()),
            Event::Code(code) => {
                let style = Style::default()
                    .fg(self.palette.accent)
                    .bg(self.palette.code_background);
                self.push(Span::styled(code.into_string(), style));
            }
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.break_line(),
            Event::Rule => {
                self.blank_line();
                self.push(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(self.palette.muted),
                ));
                self.break_line();
            }
            Event::TaskListMarker(done) => self.text(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.blank_line(),
            Tag::Heading { level, .. } => {
                self.blank_line();
                let color = match level {
                    HeadingLevel::H1 | HeadingLevel::H2 => self.palette.title,
                    _ => self.palette.accent,
                };
                self.style(Style::default().fg(color).add_modifier(Modifier::BOLD));
            }
            Tag::Emphasis => self.style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self.style(Style::default().add_modifier(Modifier::CROSSED_OUT)),
            Tag::BlockQuote(_) => {
                self.quote_depth += 1;
                self.break_line();
                self.style(Style::default().fg(self.palette.muted));
            }
            Tag::List(_) => {
                self.list_depth += 1;
                if self.list_depth == 1 {
                    self.blank_line();
                }
            }
            Tag::Item => {
                self.start_line();
                let indent = "  ".repeat(self.list_depth.saturating_sub(1));
                self.text(&format!("{}• ", indent));
            }
            Tag::CodeBlock(_) => {
                self.blank_line();
                self.style(
                    Style::default()
                        .fg(self.palette.accent)
                        .bg(self.palette.code_background),
                );
            }
            Tag::Link { dest_url, .. } => {
                self.link = Some(dest_url.to_string());
                self.style(
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.unstyle();
                self.break_line();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.unstyle(),
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.unstyle();
                self.break_line();
            }
            TagEnd::List(_) => self.list_depth = self.list_depth.saturating_sub(1),
            TagEnd::CodeBlock => {
                self.unstyle();
                self.break_line();
            }
            TagEnd::Link => {
                self.unstyle();
                if let Some(url) = self.link.take() {
                    self.push(Span::styled(
                        format!(" <{}>", url),
                        Style::default().fg(self.palette.muted),
                    ));
                }
            }
            TagEnd::Paragraph => self.break_line(),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        while self.lines.len() > 1 && self.lines.last().is_some_and(Vec::is_empty) {
            self.lines.pop();
        }
        while self.lines.len() > 1 && self.lines.first().is_some_and(Vec::is_empty) {
            self.lines.remove(0);
        }
        self.lines.into_iter().map(Line::from).collect()
    }

    fn text(&mut self, text: &str) {
        let style = self.current();
        // Code blocks arrive as one text event with embedded newlines.
        for (index, part) in text.split('\n').enumerate() {
            if index > 0 {
                self.break_line();
            }
            if !part.is_empty() {
                self.push(Span::styled(part.to_string(), style));
            }
        }
    }

    fn push(&mut self, span: Span<'static>) {
        match self.lines.last_mut() {
            Some(line) => line.push(span),
            None => self.lines.push(vec![span]),
        }
    }

    fn break_line(&mut self) {
        self.lines.push(Vec::new());
        if self.quote_depth > 0 {
            let style = Style::default().fg(self.palette.muted);
            self.push(Span::styled("│ ".repeat(self.quote_depth), style));
        }
    }

    fn start_line(&mut self) {
        if self.lines.last().is_some_and(|line| !line.is_empty()) {
            self.break_line();
        }
    }

    /// Leaves exactly one empty line after earlier content.
    fn blank_line(&mut self) {
        self.start_line();
        if self.lines.iter().rev().nth(1).is_some_and(|line| !line.is_empty()) {
            self.break_line();
        }
    }

    fn style(&mut self, style: Style) {
        let merged = self.current().patch(style);
        self.styles.push(merged);
    }

    fn unstyle(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn current(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }
}
