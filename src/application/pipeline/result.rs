//! Pipeline Outcome

use crate::application::cleanup::CleanupReport;
use crate::domain::entities::DeploymentConfig;
use crate::domain::ports::CallerIdentity;
use crate::domain::value_objects::PipelineState;

/// How a run ended
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// `Done` or `Failed`
    pub final_state: PipelineState,
    /// State the pipeline was in when a fatal error hit
    pub failed_at: Option<PipelineState>,
    /// Fatal error, if any
    pub error: Option<String>,
    /// Recoverable problems, in order
    pub warnings: Vec<String>,
    pub identity: Option<CallerIdentity>,
    pub config: Option<DeploymentConfig>,
    pub cleanup: Option<CleanupReport>,
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        self.final_state == PipelineState::Done
    }

    /// Success with at least one warning
    pub fn is_degraded(&self) -> bool {
        self.is_success() && !self.warnings.is_empty()
    }

    pub fn exit_code(&self) -> i32 {
        self.final_state.exit_code()
    }
}
