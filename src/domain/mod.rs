//! Domain Layer
//!
//! Pure types and port traits. Nothing in here spawns processes or touches
//! the terminal.
//!
//! - `entities` - values created during a run (`DeploymentConfig`, `PackagedArtifact`)
//! - `value_objects` - fixed resource names and the pipeline state machine
//! - `ports` - traits the application layer drives (`ControlPlane`, `Prompter`, event sinks)

pub mod entities;
pub mod ports;
pub mod value_objects;
