//! aimon - deployment orchestrator for the AI infrastructure monitor
//!
//! Checks prerequisites, collects the deployment parameters, packages the
//! function source, provisions the stack, pushes the code, reports console
//! links and runs a smoke test. Temporary files are cleaned up on every exit
//! path, including interrupts.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{CleanupRegistry, DeployPipeline, PipelineOptions, PipelineOutcome};
pub use config::Config;
pub use domain::ports::{ControlPlane, PipelineEvent, PipelineEventSink, Prompter};
pub use domain::value_objects::PipelineState;
pub use error::{DeployError, DeployResult};
pub use infrastructure::{AwsCli, DialoguerPrompter, LinePrompter};
