//! Control Plane Port
//!
//! Everything the pipeline asks of the remote infrastructure API. The
//! production adapter shells out to the `aws` client; tests use an in-memory
//! mock that records calls.

use std::path::Path;

use thiserror::Error;

use crate::domain::entities::PackagedArtifact;

/// Errors from a control-plane call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlPlaneError {
    /// The client could not be started at all
    #[error("failed to run {program}: {message}")]
    Spawn { program: String, message: String },

    /// The client ran and reported failure
    #[error("`{command}` exited with {}: {stderr}", describe_status(.status))]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The client succeeded but its output could not be understood
    #[error("unexpected response from `{command}`: {message}")]
    InvalidResponse { command: String, message: String },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

/// Who the configured credentials belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account: String,
    pub arn: String,
}

/// A named template parameter. Secret values are masked in command echoes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackParameter {
    pub key: String,
    pub value: String,
    pub secret: bool,
}

impl StackParameter {
    pub fn plain(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            secret: false,
        }
    }

    pub fn secret(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            secret: true,
        }
    }
}

/// Create-or-update request for a named stack
#[derive(Debug, Clone)]
pub struct StackDeployRequest<'a> {
    pub template: &'a Path,
    pub stack_name: &'a str,
    pub region: &'a str,
    pub profile: &'a str,
    pub parameters: Vec<StackParameter>,
    /// Capabilities acknowledged on submit (e.g. `CAPABILITY_NAMED_IAM`)
    pub capabilities: Vec<&'static str>,
}

/// Addresses one deployed function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionTarget<'a> {
    pub function_name: &'a str,
    pub region: &'a str,
    pub profile: &'a str,
}

/// Metadata the client prints after an invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokeMetadata {
    pub status_code: Option<i64>,
    /// Set when the function itself raised (`Handled`/`Unhandled`)
    pub function_error: Option<String>,
    pub executed_version: Option<String>,
}

/// One declared output of the provisioned stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOutput {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}

/// Remote infrastructure API.
///
/// All calls block until the control plane reports a terminal result.
pub trait ControlPlane {
    /// Name of the client program, for diagnostics
    fn tool_name(&self) -> &str;

    /// Whether the client program can be executed at all
    fn is_available(&self) -> bool;

    /// Resolve the identity behind `profile`
    fn caller_identity(&self, profile: &str) -> Result<CallerIdentity, ControlPlaneError>;

    /// Create or update the stack and wait for completion
    fn deploy_stack(&self, request: &StackDeployRequest<'_>) -> Result<(), ControlPlaneError>;

    /// Replace the function's code body with the archive
    fn update_function_code(
        &self,
        target: FunctionTarget<'_>,
        artifact: &PackagedArtifact,
    ) -> Result<(), ControlPlaneError>;

    /// Invoke once, writing the raw response to `response_path`
    fn invoke_function(
        &self,
        target: FunctionTarget<'_>,
        payload: &str,
        response_path: &Path,
    ) -> Result<InvokeMetadata, ControlPlaneError>;

    /// Read back the stack's declared outputs
    fn stack_outputs(
        &self,
        stack_name: &str,
        region: &str,
        profile: &str,
    ) -> Result<Vec<StackOutput>, ControlPlaneError>;
}
