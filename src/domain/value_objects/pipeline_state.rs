//! Pipeline state machine
//!
//! Transitions are strictly linear. Checking, Collecting, Packaging and
//! Provisioning fail into `Failed`; Updating and Testing fail forward.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Init,
    Checking,
    Collecting,
    Packaging,
    Provisioning,
    Updating,
    Reporting,
    Testing,
    Done,
    Failed,
}

impl PipelineState {
    /// Successor on success. Terminal states map to themselves.
    pub fn next(self) -> Self {
        match self {
            PipelineState::Init => PipelineState::Checking,
            PipelineState::Checking => PipelineState::Collecting,
            PipelineState::Collecting => PipelineState::Packaging,
            PipelineState::Packaging => PipelineState::Provisioning,
            PipelineState::Provisioning => PipelineState::Updating,
            PipelineState::Updating => PipelineState::Reporting,
            PipelineState::Reporting => PipelineState::Testing,
            PipelineState::Testing => PipelineState::Done,
            PipelineState::Done => PipelineState::Done,
            PipelineState::Failed => PipelineState::Failed,
        }
    }

    /// Successor when the step running in this state fails.
    pub fn on_failure(self) -> Self {
        if self.degrades_on_failure() {
            self.next()
        } else {
            PipelineState::Failed
        }
    }

    /// Steps whose failure is reported as a warning only.
    pub fn degrades_on_failure(self) -> bool {
        matches!(self, PipelineState::Updating | PipelineState::Testing)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    /// Process exit code once a terminal state is reached.
    pub fn exit_code(self) -> i32 {
        match self {
            PipelineState::Failed => 1,
            _ => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PipelineState::Init => "init",
            PipelineState::Checking => "checking prerequisites",
            PipelineState::Collecting => "collecting configuration",
            PipelineState::Packaging => "packaging function code",
            PipelineState::Provisioning => "deploying stack",
            PipelineState::Updating => "updating function code",
            PipelineState::Reporting => "reporting",
            PipelineState::Testing => "running smoke test",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_every_state_in_order() {
        let mut state = PipelineState::Init;
        let mut seen = vec![state];
        while !state.is_terminal() {
            state = state.next();
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                PipelineState::Init,
                PipelineState::Checking,
                PipelineState::Collecting,
                PipelineState::Packaging,
                PipelineState::Provisioning,
                PipelineState::Updating,
                PipelineState::Reporting,
                PipelineState::Testing,
                PipelineState::Done,
            ]
        );
    }

    #[test]
    fn fatal_stages_fail_into_failed() {
        for state in [
            PipelineState::Checking,
            PipelineState::Collecting,
            PipelineState::Packaging,
            PipelineState::Provisioning,
        ] {
            assert_eq!(state.on_failure(), PipelineState::Failed, "{state}");
        }
    }

    #[test]
    fn update_and_test_failures_move_forward() {
        assert_eq!(
            PipelineState::Updating.on_failure(),
            PipelineState::Reporting
        );
        assert_eq!(PipelineState::Testing.on_failure(), PipelineState::Done);
    }

    #[test]
    fn exit_codes() {
        assert_eq!(PipelineState::Done.exit_code(), 0);
        assert_eq!(PipelineState::Failed.exit_code(), 1);
    }
}
