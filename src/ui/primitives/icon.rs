use crossterm::style::Stylize;

use crate::ui::theme;

/// Status tag in front of a console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Info,
    Stage,
    Arrow,
    Command,
    Deploy,
    Link,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        use theme::{icons, icons_ascii};

        let (unicode, ascii) = match self {
            Icon::Success => (icons::SUCCESS, icons_ascii::SUCCESS),
            Icon::Error => (icons::ERROR, icons_ascii::ERROR),
            Icon::Warning => (icons::WARNING, icons_ascii::WARNING),
            Icon::Info => (icons::INFO, icons_ascii::INFO),
            Icon::Stage => (icons::STAGE, icons_ascii::STAGE),
            Icon::Arrow => (icons::ARROW, icons_ascii::ARROW),
            Icon::Command => (icons::COMMAND, icons_ascii::COMMAND),
            Icon::Deploy => (icons::DEPLOY, icons_ascii::DEPLOY),
            Icon::Link => (icons::LINK, icons_ascii::LINK),
        };
        if supports_unicode {
            unicode
        } else {
            ascii
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning => theme::colors::WARNING,
            Icon::Arrow | Icon::Command => theme::colors::DIM,
            Icon::Info | Icon::Stage | Icon::Deploy | Icon::Link => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
