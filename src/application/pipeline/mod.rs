//! Deploy Pipeline
//!
//! The linear deployment flow, see [`DeployPipeline`].

mod options;
mod result;
mod use_case;


pub use options::PipelineOptions;
pub use result::PipelineOutcome;
pub use use_case::DeployPipeline;
