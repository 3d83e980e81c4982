//! DeploymentConfig entity
//!
//! Built once by the configuration collector and passed by reference to every
//! later step. Fields are private so nothing can change it mid-run.

use std::fmt;

use crate::domain::value_objects::{DEFAULT_NOTIFICATION_EMAIL, DEFAULT_REGION, STACK_NAME};

/// Operator-supplied deployment parameters
#[derive(Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    notification_email: String,
    api_key: String,
    region: String,
    stack_name: String,
}

impl DeploymentConfig {
    /// Build from raw answers. Blank answers (after trimming) select the defaults.
    pub fn from_answers(email: &str, api_key: &str, region: &str) -> Self {
        Self {
            notification_email: non_blank_or(email, DEFAULT_NOTIFICATION_EMAIL),
            api_key: api_key.trim().to_string(),
            region: non_blank_or(region, DEFAULT_REGION),
            stack_name: STACK_NAME.to_string(),
        }
    }

    pub fn notification_email(&self) -> &str {
        &self.notification_email
    }

    /// Secret key; empty when the operator skipped it.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self::from_answers("", "", "")
    }
}

// Never print the key itself.
impl fmt::Debug for DeploymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentConfig")
            .field("notification_email", &self.notification_email)
            .field("api_key", &if self.has_api_key() { "<redacted>" } else { "" })
            .field("region", &self.region)
            .field("stack_name", &self.stack_name)
            .finish()
    }
}

fn non_blank_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
