//! Fixed resource names
//!
//! The pipeline manages exactly one stack per account/region pair, so every
//! remote name is a constant.

use std::path::{Path, PathBuf};

/// Name of the managed stack
pub const STACK_NAME: &str = "ai-infra-monitor-stack";
/// Name of the compute function created by the template
pub const FUNCTION_NAME: &str = "ai-infra-monitor";
/// Log group the function writes to
pub const LOG_GROUP: &str = "/aws/lambda/ai-infra-monitor";
/// Namespace the function publishes its metrics under
pub const METRICS_NAMESPACE: &str = "Infrastructure/AI-Monitor";

/// Deployment archive produced by the packager (working-directory relative)
pub const ARCHIVE_FILE: &str = "lambda-deployment.zip";
/// Raw smoke-test response (working-directory relative)
pub const RESPONSE_FILE: &str = "smoke-test-response.json";

pub const DEFAULT_NOTIFICATION_EMAIL: &str = "admin@example.com";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_PROFILE: &str = "default";

/// Local artifacts the pipeline cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredFile {
    /// Declarative infrastructure template
    Template,
    /// Source of the compute function
    FunctionSource,
    /// Static dashboard page
    Dashboard,
}

impl RequiredFile {
    /// All required files, in the order they are checked.
    pub const ALL: [RequiredFile; 3] = [
        RequiredFile::Template,
        RequiredFile::FunctionSource,
        RequiredFile::Dashboard,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            RequiredFile::Template => "infrastructure.yaml",
            RequiredFile::FunctionSource => "lambda_function.py",
            RequiredFile::Dashboard => "dashboard.html",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RequiredFile::Template => "infrastructure template",
            RequiredFile::FunctionSource => "function source",
            RequiredFile::Dashboard => "dashboard page",
        }
    }

    /// Resolve against a working directory.
    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_files_are_checked_template_first() {
        assert_eq!(RequiredFile::ALL[0], RequiredFile::Template);
        assert_eq!(RequiredFile::ALL.len(), 3);
    }

    #[test]
    fn path_in_joins_file_name() {
        let path = RequiredFile::Dashboard.path_in(Path::new("/work"));
        assert_eq!(path, PathBuf::from("/work/dashboard.html"));
    }

    #[test]
    fn log_group_belongs_to_function() {
        assert!(LOG_GROUP.ends_with(FUNCTION_NAME));
    }
}
