//! Value Objects
//!
//! Immutable values without identity.

mod pipeline_state;
mod resources;

pub use pipeline_state::PipelineState;
pub use resources::{
    RequiredFile, ARCHIVE_FILE, DEFAULT_NOTIFICATION_EMAIL, DEFAULT_PROFILE, DEFAULT_REGION,
    FUNCTION_NAME, LOG_GROUP, METRICS_NAMESPACE, RESPONSE_FILE, STACK_NAME,
};
