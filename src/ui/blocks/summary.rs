use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::r#box::{Box, BoxStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Partial,
    Failure,
}

/// Closing box: a verdict, key facts, warnings and a hint
#[derive(Debug, Clone)]
pub struct ResultSummary {
    title: String,
    tone: Tone,
    facts: Vec<(String, String)>,
    warnings: Vec<String>,
    next_step: Option<String>,
}

impl ResultSummary {
    fn new(title: impl Into<String>, tone: Tone) -> Self {
        Self {
            title: title.into(),
            tone,
            facts: Vec::new(),
            warnings: Vec::new(),
            next_step: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title, Tone::Success)
    }

    pub fn partial(title: impl Into<String>) -> Self {
        Self::new(title, Tone::Partial)
    }

    pub fn failure(title: impl Into<String>) -> Self {
        Self::new(title, Tone::Failure)
    }

    pub fn add_fact(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.facts.push((label.into(), value.into()));
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn with_next_step(&mut self, hint: impl Into<String>) {
        self.next_step = Some(hint.into());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let (style, icon, title) = match self.tone {
            Tone::Success => (
                BoxStyle::Success,
                Icon::Success,
                ColoredText::success(self.title.as_str()),
            ),
            Tone::Partial => (
                BoxStyle::Warning,
                Icon::Warning,
                ColoredText::warning(self.title.as_str()),
            ),
            Tone::Failure => (
                BoxStyle::Error,
                Icon::Error,
                ColoredText::error(self.title.as_str()),
            ),
        };

        let header = format!(
            "{} {}",
            icon.colored(supports_color, supports_unicode),
            title.bold().render(supports_color)
        );
        let mut b = Box::with_title(header).style(style);

        for (label, value) in &self.facts {
            b.add_line(format!("{label}: {value}"));
        }

        if !self.warnings.is_empty() {
            b.add_empty();
            for warning in &self.warnings {
                b.add_line(format!(
                    "{} {}",
                    Icon::Warning.colored(supports_color, supports_unicode),
                    warning
                ));
            }
        }

        if let Some(next) = &self.next_step {
            b.add_empty();
            b.add_line(format!(
                "{} {}",
                Icon::Arrow.colored(supports_color, supports_unicode),
                ColoredText::dim(next.as_str()).render(supports_color)
            ));
        }

        b.render(supports_color, supports_unicode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_summary_uses_fail_tag() {
        let mut s = ResultSummary::failure("Deployment failed");
        s.add_fact("Failed at", "deploying stack");
        let out = s.render(false, false);

        assert!(out.contains("[FAIL] Deployment failed"));
        assert!(out.contains("Failed at: deploying stack"));
    }

    #[test]
    fn partial_summary_lists_warnings_and_hint() {
        let mut s = ResultSummary::partial("Deployed with warnings");
        s.add_warning("function code update failed");
        s.with_next_step("Re-run aimon");
        let out = s.render(false, false);

        assert!(out.contains("[WARN] function code update failed"));
        assert!(out.contains("-> Re-run aimon"));
    }
}
