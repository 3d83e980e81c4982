//! Application Layer
//!
//! Use cases that orchestrate the deployment flow.
//! This layer:
//! - Depends on Domain layer (entities, value objects, ports)
//! - Never spawns processes or reads the terminal directly
//! - Coordinates the steps in the order the pipeline state machine allows
//!
//! ## Steps
//!
//! - `prerequisites` - tool, file and credential checks
//! - `collector` - interactive deployment parameters
//! - `packager` - zip archive of the function source
//! - `report` - console links and local paths
//! - `smoke_test` - single empty-payload invocation
//! - `cleanup` - scoped release of temporary files
//! - `pipeline` - `DeployPipeline`, which runs all of the above

pub mod cleanup;
pub mod collector;
pub mod packager;
pub mod pipeline;
pub mod prerequisites;
pub mod report;

pub use cleanup::{CleanupGuard, CleanupRegistry, CleanupReport};
pub use collector::collect_config;
pub use packager::package_function;
pub use pipeline::{DeployPipeline, PipelineOptions, PipelineOutcome};
pub use prerequisites::PrerequisiteChecker;
pub use report::{build_report, DeploymentReport};
pub use smoke_test::{run_smoke_test, summarize_response, ResponseSummary, SmokeTestOutcome};
