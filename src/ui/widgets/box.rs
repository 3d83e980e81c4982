use std::borrow::Cow;

use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

use crate::ui::primitives::border::BorderSet;
use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStyle {
    Info,
    Success,
    Warning,
    Error,
}

/// Bordered block of lines, sized to its widest line
#[derive(Debug, Clone)]
pub struct Box {
    title: Option<String>,
    content: Vec<String>,
    style: BoxStyle,
}

impl Box {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Vec::new(),
            style: BoxStyle::Info,
        }
    }

    pub fn style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    /// Add content; embedded newlines become separate rows.
    pub fn add_line(&mut self, line: impl AsRef<str>) {
        self.content
            .extend(line.as_ref().lines().map(str::to_string));
    }

    pub fn add_empty(&mut self) {
        self.content.push(String::new());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let border = BorderSet::for_terminal(supports_unicode);
        let paint = |s: &str| color_border(s, supports_color, self.style);

        let mut rows: Vec<&str> = Vec::with_capacity(self.content.len() + 2);
        if let Some(title) = &self.title {
            rows.push(title);
            rows.push("");
        }
        rows.extend(self.content.iter().map(String::as_str));

        let inner = rows.iter().map(|r| visible_width(r)).max().unwrap_or(0) + 2;
        let rule = border.horizontal.repeat(inner);

        let mut out = paint(&format!("{}{}{}", border.top_left, rule, border.top_right));
        out.push('\n');
        for row in rows {
            let pad = inner - 1 - visible_width(row);
            out.push_str(&paint(border.vertical));
            out.push(' ');
            out.push_str(row);
            out.push_str(&" ".repeat(pad));
            out.push_str(&paint(border.vertical));
            out.push('\n');
        }
        out.push_str(&paint(&format!(
            "{}{}{}",
            border.bottom_left, rule, border.bottom_right
        )));
        out.push('\n');
        out
    }
}

fn color_border(s: &str, supports_color: bool, style: BoxStyle) -> String {
    if !supports_color {
        return s.to_string();
    }

    let color = match style {
        BoxStyle::Info => theme::colors::INFO,
        BoxStyle::Success => theme::colors::SUCCESS,
        BoxStyle::Warning => theme::colors::WARNING,
        BoxStyle::Error => theme::colors::ERROR,
    };
    format!("{}", s.with(color))
}

/// Display width, ignoring ANSI escapes.
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).width()
}

fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\u{1b}') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            out.push(c);
            continue;
        }
        // ESC [ ... <final letter>
        if chars.peek() == Some(&'[') {
            chars.next();
        }
        for next in chars.by_ref() {
            if next.is_ascii_alphabetic() {
                break;
            }
        }
    }
    Cow::Owned(out)
}
