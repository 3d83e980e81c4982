//! Pipeline Event Port
//!
//! Every status line the pipeline produces goes through a sink, so the
//! console renderer and tests see the same stream.

use std::path::PathBuf;

use crate::domain::value_objects::PipelineState;

/// Event emitted during a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// A step is about to run
    StageStarted { state: PipelineState },

    Info { message: String },

    Success { message: String },

    Warning { message: String },

    Error { message: String },

    /// A control-plane command is about to run (secrets already masked)
    Command { line: String },

    /// Non-secret summary of the collected configuration
    ConfigCollected {
        notification_email: String,
        region: String,
        stack_name: String,
        api_key_provided: bool,
    },

    /// Console links and local paths for operator follow-up
    Report {
        links: Vec<(String, String)>,
        paths: Vec<(String, PathBuf)>,
        notes: Vec<String>,
    },

    /// Raw smoke-test response body
    Response { body: String },

    /// The pipeline reached a terminal state
    Finished {
        state: PipelineState,
        warnings: usize,
    },
}

/// Trait for receiving pipeline events
///
/// The binary renders them as colored status lines; tests record them.
pub trait PipelineEventSink: Send + Sync {
    fn on_event(&self, event: PipelineEvent);

    /// Whether command echoes should be produced at all
    fn wants_commands(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingEventSink {
        events: Arc<Mutex<Vec<PipelineEvent>>>,
    }

    impl PipelineEventSink for RecordingEventSink {
        fn on_event(&self, event: PipelineEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn recording_sink_captures_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingEventSink {
            events: events.clone(),
        };

        sink.on_event(PipelineEvent::StageStarted {
            state: PipelineState::Checking,
        });
        sink.on_event(PipelineEvent::Warning {
            message: "careful".into(),
        });

        assert_eq!(events.lock().unwrap().len(), 2);
    }

    #[test]
    fn sinks_skip_command_echo_by_default() {
        let sink = RecordingEventSink {
            events: Arc::new(Mutex::new(Vec::new())),
        };
        assert!(!sink.wants_commands());
    }
}
