//! Console event sink
//!
//! Renders pipeline events as status-tagged lines as they arrive.

use std::io::{self, Write};
use std::sync::Mutex;

use aimon::{PipelineEvent, PipelineEventSink};

use crate::ui::context::UiContext;
use crate::ui::views::deploy::render_event;

pub struct ConsoleEventSink {
    ui: UiContext,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stdout(ui: UiContext) -> Self {
        Self::with_writer(ui, Box::new(io::stdout()))
    }

    pub fn with_writer(ui: UiContext, out: Box<dyn Write + Send>) -> Self {
        Self {
            ui,
            out: Mutex::new(out),
        }
    }
}

impl PipelineEventSink for ConsoleEventSink {
    fn on_event(&self, event: PipelineEvent) {
        let Some(text) = render_event(&event, self.ui.color, self.ui.unicode) else {
            return;
        };
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        // A closed stdout must not abort the deployment.
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }

    fn wants_commands(&self) -> bool {
        self.ui.verbose >= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aimon::config::Config;
    use std::sync::Arc;

    use crate::ui::terminal::TerminalCapabilities;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn plain_ui(verbose: u8) -> UiContext {
        let caps = TerminalCapabilities {
            stdout_tty: false,
            stdin_tty: false,
            supports_color: false,
            supports_unicode: false,
            is_ci: false,
        };
        UiContext::from_caps(verbose, None, &Config::default(), caps)
    }

    #[test]
    fn writes_rendered_events() {
        let buf = SharedBuffer::default();
        let sink = ConsoleEventSink::with_writer(plain_ui(0), Box::new(buf.clone()));

        sink.on_event(PipelineEvent::Error {
            message: "stack failed".into(),
        });

        let written = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "  [FAIL] stack failed\n");
    }

    #[test]
    fn command_echo_follows_verbosity() {
        assert!(!ConsoleEventSink::with_writer(plain_ui(0), Box::new(io::sink())).wants_commands());
        assert!(ConsoleEventSink::with_writer(plain_ui(1), Box::new(io::sink())).wants_commands());
    }
}
