//! Configuration collector
//!
//! Asks for the three deployment parameters. Blank answers take the defaults;
//! nothing is validated beyond that.

use crate::domain::entities::DeploymentConfig;
use crate::domain::ports::{PipelineEvent, PipelineEventSink, Prompter};
use crate::domain::value_objects::{DEFAULT_NOTIFICATION_EMAIL, DEFAULT_REGION};
use crate::error::{DeployError, DeployResult};

pub const EMAIL_PROMPT: &str = "Notification email for alerts";
pub const API_KEY_PROMPT: &str = "AI provider API key (optional, input hidden)";
pub const REGION_PROMPT: &str = "AWS region";

/// Gather answers and emit a summary that carries no secret.
pub fn collect_config(
    prompter: &dyn Prompter,
    sink: &dyn PipelineEventSink,
) -> DeployResult<DeploymentConfig> {
    let email = prompter
        .input(EMAIL_PROMPT, DEFAULT_NOTIFICATION_EMAIL)
        .map_err(|e| DeployError::Prompt(e.to_string()))?;
    let api_key = prompter
        .secret(API_KEY_PROMPT)
        .map_err(|e| DeployError::Prompt(e.to_string()))?;
    let region = prompter
        .input(REGION_PROMPT, DEFAULT_REGION)
        .map_err(|e| DeployError::Prompt(e.to_string()))?;

    let config = DeploymentConfig::from_answers(&email, &api_key, &region);

    sink.on_event(PipelineEvent::ConfigCollected {
        notification_email: config.notification_email().to_string(),
        region: config.region().to_string(),
        stack_name: config.stack_name().to_string(),
        api_key_provided: config.has_api_key(),
    });

    Ok(config)
}
