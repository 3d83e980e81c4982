//! Pipeline Options

use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;

/// Everything a run needs besides its ports
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Directory holding the required files; receives the archive
    pub work_dir: PathBuf,
    /// Credential profile for every control-plane call
    pub profile: String,
    /// Wait before pushing code into the freshly provisioned function
    pub update_delay: Duration,
}

impl PipelineOptions {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(&Config::default(), work_dir)
    }

    pub fn from_config(config: &Config, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            profile: config.aws.profile.clone(),
            update_delay: config.deploy.update_delay(),
        }
    }

    pub fn with_update_delay(mut self, delay: Duration) -> Self {
        self.update_delay = delay;
        self
    }
}
