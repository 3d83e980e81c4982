//! Prerequisite checks
//!
//! Local checks (tool, files) run before the remote identity check, so a
//! missing file never costs a control-plane call.

use std::path::Path;

use crate::domain::ports::{CallerIdentity, ControlPlane, PipelineEvent, PipelineEventSink};
use crate::domain::value_objects::RequiredFile;
use crate::error::{DeployError, DeployResult};

pub struct PrerequisiteChecker<'a, C: ControlPlane + ?Sized> {
    control_plane: &'a C,
    work_dir: &'a Path,
    profile: &'a str,
}

impl<'a, C: ControlPlane + ?Sized> PrerequisiteChecker<'a, C> {
    pub fn new(control_plane: &'a C, work_dir: &'a Path, profile: &'a str) -> Self {
        Self {
            control_plane,
            work_dir,
            profile,
        }
    }

    /// Run every check, stopping at the first failure.
    pub fn check(&self, sink: &dyn PipelineEventSink) -> DeployResult<CallerIdentity> {
        self.check_tool()?;
        sink.on_event(PipelineEvent::Success {
            message: format!("{} CLI found", self.control_plane.tool_name()),
        });

        for file in RequiredFile::ALL {
            self.check_file(file)?;
            sink.on_event(PipelineEvent::Success {
                message: format!("{} present ({})", file.description(), file.file_name()),
            });
        }

        let identity = self.check_credentials()?;
        sink.on_event(PipelineEvent::Success {
            message: format!(
                "credentials valid for profile '{}' (account {})",
                self.profile, identity.account
            ),
        });

        Ok(identity)
    }

    pub fn check_tool(&self) -> DeployResult<()> {
        if self.control_plane.is_available() {
            Ok(())
        } else {
            Err(DeployError::MissingTool {
                tool: self.control_plane.tool_name().to_string(),
            })
        }
    }

    pub fn check_file(&self, file: RequiredFile) -> DeployResult<()> {
        let path = file.path_in(self.work_dir);
        if path.exists() {
            Ok(())
        } else {
            Err(DeployError::MissingFile {
                path: file.file_name().into(),
            })
        }
    }

    pub fn check_credentials(&self) -> DeployResult<CallerIdentity> {
        self.control_plane
            .caller_identity(self.profile)
            .map_err(|e| DeployError::MissingCredentials {
                profile: self.profile.to_string(),
                detail: e.to_string(),
            })
    }
}
