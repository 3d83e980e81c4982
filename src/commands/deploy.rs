//! Deploy command: wires the real adapters into the pipeline and renders it

use std::io::{self, BufReader};
use std::sync::Arc;

use anyhow::{Context, Result};
use aimon::application::CleanupRegistry;
use aimon::config::load_or_default;
use aimon::presentation::ColorWhen;
use aimon::{
    AwsCli, DeployPipeline, DialoguerPrompter, LinePrompter, PipelineEventSink, PipelineOptions,
    PipelineOutcome, Prompter,
};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::sink::ConsoleEventSink;
use crate::ui::terminal::TerminalSnapshot;
use crate::ui::views::deploy::{
    render_config_warning, render_deploy_header, render_deploy_summary,
};

/// Exit code after an interrupt (128 + SIGINT)
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Run the deployment in the current directory; returns the exit code.
pub fn cmd_deploy(color: Option<ColorWhen>, verbose: u8) -> Result<i32> {
    let work_dir = std::env::current_dir().context("cannot determine working directory")?;
    let (config, warnings) = load_or_default(&work_dir)?;
    let ui = UiContext::new(verbose, color, &config);

    print!(
        "{}",
        render_deploy_header(&work_dir, &config.aws.profile, ui.color, ui.unicode)
    );
    for warning in &warnings {
        print!("{}", render_config_warning(warning, ui.color, ui.unicode));
    }

    let registry = Arc::new(CleanupRegistry::new());
    install_interrupt_handler(Arc::clone(&registry), TerminalSnapshot::capture(), ui)?;

    let sink: Arc<dyn PipelineEventSink> = Arc::new(ConsoleEventSink::stdout(ui));
    let options = PipelineOptions::from_config(&config, &work_dir);

    let outcome = if ui.interactive() {
        run(DialoguerPrompter::new(ui.color), &options, sink, registry)
    } else {
        let prompter = LinePrompter::new(BufReader::new(io::stdin()), io::stdout());
        run(prompter, &options, sink, registry)
    };

    println!();
    print!("{}", render_deploy_summary(&outcome, ui.color, ui.unicode));
    Ok(outcome.exit_code())
}

fn run<P: Prompter>(
    prompter: P,
    options: &PipelineOptions,
    sink: Arc<dyn PipelineEventSink>,
    registry: Arc<CleanupRegistry>,
) -> PipelineOutcome {
    let control_plane = AwsCli::new().with_echo(Arc::clone(&sink));
    DeployPipeline::new(control_plane, prompter).execute(options, sink, registry)
}

fn install_interrupt_handler(
    registry: Arc<CleanupRegistry>,
    terminal: TerminalSnapshot,
    ui: UiContext,
) -> Result<()> {
    ctrlc::set_handler(move || {
        // The secret prompt may have left echo off.
        if terminal.is_captured() {
            let _ = terminal.restore(&mut io::stderr());
        }
        eprintln!();
        if let Some(report) = registry.run() {
            for path in &report.removed {
                eprintln!("removed {}", path.display());
            }
            for error in &report.errors {
                eprintln!("cleanup could not remove {error}");
            }
        }
        let tag = Icon::Error.colored(ui.color, ui.unicode);
        eprintln!("{tag} interrupted, temporary files cleaned up");
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .context("failed to install interrupt handler")
}
