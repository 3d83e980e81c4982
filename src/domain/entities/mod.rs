//! Domain Entities
//!
//! Values created once per pipeline run.

mod artifact;
mod deployment_config;

pub use artifact::PackagedArtifact;
pub use deployment_config::DeploymentConfig;
