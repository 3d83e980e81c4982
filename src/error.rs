//! Error types for aimon
//!
//! Library code returns `DeployError`; the binary wraps edges in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::ControlPlaneError;

/// Result type alias for pipeline operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Every way a pipeline step can fail.
///
/// Whether a failure aborts the run is decided by [`DeployError::is_fatal`].
#[derive(Error, Debug)]
pub enum DeployError {
    /// The control-plane command-line client is not installed
    #[error("required tool '{tool}' was not found on PATH")]
    MissingTool { tool: String },

    /// The configured credential profile could not be verified
    #[error("credentials for profile '{profile}' are missing or invalid: {detail}")]
    MissingCredentials { profile: String, detail: String },

    /// A required local artifact is not present
    #[error("required file not found: {path}")]
    MissingFile { path: PathBuf },

    /// Operator input could not be read
    #[error("failed to read operator input: {0}")]
    Prompt(String),

    /// The deployment archive could not be built
    #[error("failed to package {source_file}: {message}")]
    Packaging {
        source_file: PathBuf,
        message: String,
    },

    /// The stack create-or-update request was rejected or failed
    #[error("stack '{stack}' failed to deploy: {detail}")]
    ProvisionFailure { stack: String, detail: String },

    /// The function code could not be replaced with the new archive
    #[error("function code update failed for '{function}': {detail}")]
    CodeUpdateFailure { function: String, detail: String },

    /// The smoke-test invocation failed
    #[error("smoke test invocation of '{function}' failed: {detail}")]
    InvokeFailure { function: String, detail: String },
}

impl DeployError {
    /// Fatal errors abort the pipeline; the rest degrade to warnings.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            DeployError::CodeUpdateFailure { .. } | DeployError::InvokeFailure { .. }
        )
    }

    /// Short machine-ish label used in status lines.
    pub fn kind(&self) -> &'static str {
        match self {
            DeployError::MissingTool { .. } => "MissingTool",
            DeployError::MissingCredentials { .. } => "MissingCredentials",
            DeployError::MissingFile { .. } => "MissingFile",
            DeployError::Prompt(_) => "Prompt",
            DeployError::Packaging { .. } => "Packaging",
            DeployError::ProvisionFailure { .. } => "ProvisionFailure",
            DeployError::CodeUpdateFailure { .. } => "CodeUpdateFailure",
            DeployError::InvokeFailure { .. } => "InvokeFailure",
        }
    }

    pub(crate) fn provision(stack: &str, err: ControlPlaneError) -> Self {
        DeployError::ProvisionFailure {
            stack: stack.to_string(),
            detail: err.to_string(),
        }
    }

    pub(crate) fn code_update(function: &str, err: ControlPlaneError) -> Self {
        DeployError::CodeUpdateFailure {
            function: function.to_string(),
            detail: err.to_string(),
        }
    }

    pub(crate) fn invoke(function: &str, detail: impl Into<String>) -> Self {
        DeployError::InvokeFailure {
            function: function.to_string(),
            detail: detail.into(),
        }
    }
}
