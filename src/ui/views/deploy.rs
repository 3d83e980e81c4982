use std::path::Path;

use aimon::config::ConfigWarning;
use aimon::domain::value_objects::{FUNCTION_NAME, STACK_NAME};
use aimon::{PipelineEvent, PipelineOutcome};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::r#box::{Box, BoxStyle};

pub fn render_deploy_header(
    work_dir: &Path,
    profile: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Deploy, "aimon deploy");
    header.add("Stack", STACK_NAME);
    header.add("Function", FUNCTION_NAME);
    header.add("Directory", work_dir.display().to_string());
    header.add("Profile", profile);
    header.render(supports_color, supports_unicode)
}

pub fn render_config_warning(
    warning: &ConfigWarning,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let location = match warning.line {
        Some(line) => format!("{}:{}", warning.file.display(), line),
        None => warning.file.display().to_string(),
    };
    let mut line = format!(
        "{} unknown config key '{}' in {}",
        Icon::Warning.colored(supports_color, supports_unicode),
        warning.key,
        location
    );
    if let Some(suggestion) = &warning.suggestion {
        line.push_str(&format!(" (did you mean '{suggestion}'?)"));
    }
    line.push('\n');
    line
}

/// Text for one pipeline event, or `None` for events shown elsewhere.
pub fn render_event(
    event: &PipelineEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> Option<String> {
    let tagged = |icon: Icon, text: String| {
        Some(format!(
            "  {} {}\n",
            icon.colored(supports_color, supports_unicode),
            text
        ))
    };

    match event {
        PipelineEvent::StageStarted { state } => Some(format!(
            "\n{} {}\n",
            Icon::Stage.colored(supports_color, supports_unicode),
            ColoredText::plain(capitalize(state.label()))
                .bold()
                .render(supports_color)
        )),
        PipelineEvent::Info { message } => tagged(Icon::Info, message.clone()),
        PipelineEvent::Success { message } => tagged(Icon::Success, message.clone()),
        PipelineEvent::Warning { message } => tagged(
            Icon::Warning,
            ColoredText::warning(message.as_str()).render(supports_color),
        ),
        PipelineEvent::Error { message } => tagged(
            Icon::Error,
            ColoredText::error(message.as_str()).render(supports_color),
        ),
        PipelineEvent::Command { line } => tagged(
            Icon::Command,
            ColoredText::dim(line.as_str()).render(supports_color),
        ),
        PipelineEvent::ConfigCollected {
            notification_email,
            region,
            stack_name,
            api_key_provided,
        } => {
            let key = if *api_key_provided {
                "provided"
            } else {
                "not provided"
            };
            let rows = [
                ("Notification email", notification_email.as_str()),
                ("Region", region.as_str()),
                ("Stack", stack_name.as_str()),
                ("API key", key),
            ];
            let mut out = String::new();
            for (label, value) in rows {
                let label = ColoredText::dim(format!("{label}:")).render(supports_color);
                out.push_str(&format!("    {label} {value}\n"));
            }
            Some(out)
        }
        PipelineEvent::Report {
            links,
            paths,
            notes,
        } => Some(render_report(
            links,
            paths,
            notes,
            supports_color,
            supports_unicode,
        )),
        PipelineEvent::Response { body } => {
            let mut out = format!(
                "  {} smoke test response:\n",
                Icon::Info.colored(supports_color, supports_unicode)
            );
            for line in body.trim_end().lines() {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
            Some(out)
        }
        PipelineEvent::Finished { .. } => None,
    }
}

fn render_report(
    links: &[(String, String)],
    paths: &[(String, std::path::PathBuf)],
    notes: &[String],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let title = format!(
        "{} {}",
        Icon::Link.colored(supports_color, supports_unicode),
        ColoredText::info("Deployment links").bold().render(supports_color)
    );
    let mut b = Box::with_title(title).style(BoxStyle::Info);

    for (label, url) in links {
        b.add_line(format!("{label}: {url}"));
    }
    if !paths.is_empty() {
        b.add_empty();
        for (label, path) in paths {
            b.add_line(format!("{label}: {}", path.display()));
        }
    }
    if !notes.is_empty() {
        b.add_empty();
        for note in notes {
            b.add_line(format!(
                "{} {}",
                Icon::Arrow.colored(supports_color, supports_unicode),
                note
            ));
        }
    }

    let mut out = String::from("\n");
    out.push_str(&b.render(supports_color, supports_unicode));
    out
}

pub fn render_deploy_summary(
    outcome: &PipelineOutcome,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = if !outcome.is_success() {
        ResultSummary::failure("Deployment failed")
    } else if outcome.is_degraded() {
        ResultSummary::partial("Deployment finished with warnings")
    } else {
        ResultSummary::success("Deployment complete")
    };

    if let Some(state) = outcome.failed_at {
        summary.add_fact("Failed at", state.label());
    }
    if let Some(error) = &outcome.error {
        summary.add_fact("Error", error.as_str());
    }
    if let Some(config) = &outcome.config {
        summary.add_fact("Stack", config.stack_name());
        summary.add_fact("Region", config.region());
    }
    if let Some(identity) = &outcome.identity {
        summary.add_fact("Account", identity.account.as_str());
    }
    if let Some(report) = &outcome.cleanup {
        summary.add_fact(
            "Cleanup",
            format!("removed {} temporary item(s)", report.removed.len()),
        );
    }

    for warning in &outcome.warnings {
        summary.add_warning(warning.as_str());
    }

    if !outcome.is_success() {
        summary.with_next_step("Fix the problem above and run aimon again");
    } else if outcome.is_degraded() {
        summary.with_next_step("Run aimon again to retry the steps that warned");
    } else if let Some(config) = &outcome.config {
        summary.with_next_step(format!(
            "Confirm the subscription email sent to {}",
            config.notification_email()
        ));
    }

    summary.render(supports_color, supports_unicode)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
