//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod control_plane;
pub mod pipeline_events;
pub mod prompter;

pub use control_plane::{
    CallerIdentity, ControlPlane, ControlPlaneError, FunctionTarget, InvokeMetadata,
    StackDeployRequest, StackOutput, StackParameter,
};
pub use pipeline_events::{PipelineEvent, PipelineEventSink};
pub use prompter::Prompter;
