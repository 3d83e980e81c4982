//! Deploy Pipeline Use Case
//!
//! Runs the steps in state-machine order:
//! Checking → Collecting → Packaging → Provisioning → Updating → Reporting →
//! Testing → Done.
//!
//! Each step returns `DeployResult`. Fatal errors end the run in `Failed`;
//! update and smoke-test errors are recorded as warnings and the run moves on.
//! A `CleanupGuard` spans the whole run, so temporary files are released on
//! every path out of `execute`.

use std::sync::Arc;
use std::thread;

use crate::application::cleanup::{CleanupGuard, CleanupRegistry};
use crate::application::collector::collect_config;
use crate::application::packager::package_function;
use crate::application::prerequisites::PrerequisiteChecker;
use crate::application::report::build_report;
use crate::application::smoke_test::run_smoke_test;
use crate::domain::entities::{DeploymentConfig, PackagedArtifact};
use crate::domain::ports::{
    CallerIdentity, ControlPlane, FunctionTarget, PipelineEvent, PipelineEventSink, Prompter,
    StackDeployRequest, StackParameter,
};
use crate::domain::value_objects::{PipelineState, RequiredFile, FUNCTION_NAME};
use crate::error::{DeployError, DeployResult};

use super::options::PipelineOptions;
use super::result::PipelineOutcome;

/// Template parameter receiving the alert address
pub const EMAIL_PARAMETER: &str = "NotificationEmail";
/// Template parameter receiving the secret key
pub const API_KEY_PARAMETER: &str = "ApiKey";
/// The template creates IAM roles with explicit names
pub const REQUIRED_CAPABILITY: &str = "CAPABILITY_NAMED_IAM";

/// Deploy pipeline, parameterized by its ports
pub struct DeployPipeline<C, P>
where
    C: ControlPlane,
    P: Prompter,
{
    control_plane: C,
    prompter: P,
}

/// Mutable bookkeeping for one run
struct Run<'s> {
    state: PipelineState,
    warnings: Vec<String>,
    identity: Option<CallerIdentity>,
    config: Option<DeploymentConfig>,
    sink: &'s dyn PipelineEventSink,
}

impl<'s> Run<'s> {
    fn new(sink: &'s dyn PipelineEventSink) -> Self {
        Self {
            state: PipelineState::Init,
            warnings: Vec::new(),
            identity: None,
            config: None,
            sink,
        }
    }

    fn advance(&mut self) {
        self.state = self.state.next();
        self.announce();
    }

    /// Record a recoverable failure and move past the current step.
    fn degrade(&mut self, err: DeployError) {
        debug_assert!(self.state.degrades_on_failure());
        let message = format!("{err} (re-run aimon to retry)");
        self.sink.on_event(PipelineEvent::Warning {
            message: message.clone(),
        });
        self.warnings.push(message);
        self.state = self.state.on_failure();
        self.announce();
    }

    fn announce(&self) {
        if !self.state.is_terminal() {
            self.sink.on_event(PipelineEvent::StageStarted { state: self.state });
        }
    }
}

impl<C, P> DeployPipeline<C, P>
where
    C: ControlPlane,
    P: Prompter,
{
    pub fn new(control_plane: C, prompter: P) -> Self {
        Self {
            control_plane,
            prompter,
        }
    }

    pub fn control_plane(&self) -> &C {
        &self.control_plane
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Run the pipeline to a terminal state.
    ///
    /// `registry` is shared with the interrupt handler; cleanup runs exactly
    /// once whichever side triggers it.
    pub fn execute(
        &self,
        options: &PipelineOptions,
        sink: Arc<dyn PipelineEventSink>,
        registry: Arc<CleanupRegistry>,
    ) -> PipelineOutcome {
        let guard = CleanupGuard::new(registry);
        let mut run = Run::new(sink.as_ref());

        let result = self.run_steps(&mut run, options, guard.registry());

        let (failed_at, error) = match result {
            Ok(()) => (None, None),
            Err(err) => {
                let failed_at = run.state;
                debug_assert!(err.is_fatal());
                sink.on_event(PipelineEvent::Error {
                    message: format!("{} failed: {}", failed_at.label(), err),
                });
                run.state = failed_at.on_failure();
                (Some(failed_at), Some(err.to_string()))
            }
        };

        let cleanup = guard.finish();
        if let Some(report) = &cleanup {
            for error in &report.errors {
                sink.on_event(PipelineEvent::Warning {
                    message: format!("cleanup could not remove {error}"),
                });
            }
            if !report.removed.is_empty() {
                sink.on_event(PipelineEvent::Info {
                    message: format!("cleaned up {} temporary item(s)", report.removed.len()),
                });
            }
        }

        sink.on_event(PipelineEvent::Finished {
            state: run.state,
            warnings: run.warnings.len(),
        });

        PipelineOutcome {
            final_state: run.state,
            failed_at,
            error,
            warnings: run.warnings,
            identity: run.identity,
            config: run.config,
            cleanup,
        }
    }

    fn run_steps(
        &self,
        run: &mut Run<'_>,
        options: &PipelineOptions,
        registry: &CleanupRegistry,
    ) -> DeployResult<()> {
        run.advance(); // Checking
        let identity = PrerequisiteChecker::new(
            &self.control_plane,
            &options.work_dir,
            &options.profile,
        )
        .check(run.sink)?;
        run.identity = Some(identity);

        run.advance(); // Collecting
        let config = collect_config(&self.prompter, run.sink)?;
        run.config = Some(config.clone());

        run.advance(); // Packaging
        let source = RequiredFile::FunctionSource.path_in(&options.work_dir);
        let artifact = package_function(&source, &options.work_dir, registry)?;
        run.sink.on_event(PipelineEvent::Success {
            message: format!(
                "packaged {} ({} bytes, sha256 {})",
                artifact.archive_path().display(),
                artifact.size_bytes(),
                artifact.short_digest()
            ),
        });

        run.advance(); // Provisioning
        self.provision(&config, options, run.sink)?;

        run.advance(); // Updating
        match self.update_code(&config, &artifact, options, run.sink) {
            Ok(()) => run.advance(),
            Err(err) => run.degrade(err),
        }

        // Reporting
        self.report(run, &config, options);
        run.advance(); // Testing

        let target = function_target(&config, options);
        match run_smoke_test(&self.control_plane, target, &options.work_dir, registry, run.sink) {
            Ok(_) => run.advance(),
            Err(err) => run.degrade(err),
        }

        Ok(())
    }

    fn provision(
        &self,
        config: &DeploymentConfig,
        options: &PipelineOptions,
        sink: &dyn PipelineEventSink,
    ) -> DeployResult<()> {
        let template = RequiredFile::Template.path_in(&options.work_dir);
        let request = StackDeployRequest {
            template: &template,
            stack_name: config.stack_name(),
            region: config.region(),
            profile: &options.profile,
            parameters: vec![
                StackParameter::plain(EMAIL_PARAMETER, config.notification_email()),
                StackParameter::secret(API_KEY_PARAMETER, config.api_key()),
            ],
            capabilities: vec![REQUIRED_CAPABILITY],
        };

        sink.on_event(PipelineEvent::Info {
            message: format!(
                "deploying stack '{}' to {} (this can take several minutes)",
                config.stack_name(),
                config.region()
            ),
        });

        self.control_plane
            .deploy_stack(&request)
            .map_err(|e| DeployError::provision(config.stack_name(), e))?;

        sink.on_event(PipelineEvent::Success {
            message: format!("stack '{}' is up to date", config.stack_name()),
        });
        Ok(())
    }

    fn update_code(
        &self,
        config: &DeploymentConfig,
        artifact: &PackagedArtifact,
        options: &PipelineOptions,
        sink: &dyn PipelineEventSink,
    ) -> DeployResult<()> {
        if !options.update_delay.is_zero() {
            sink.on_event(PipelineEvent::Info {
                message: format!(
                    "waiting {}s for the function to become addressable",
                    options.update_delay.as_secs()
                ),
            });
            thread::sleep(options.update_delay);
        }

        self.control_plane
            .update_function_code(function_target(config, options), artifact)
            .map_err(|e| DeployError::code_update(FUNCTION_NAME, e))?;

        sink.on_event(PipelineEvent::Success {
            message: format!("function '{FUNCTION_NAME}' code updated"),
        });
        Ok(())
    }

    fn report(&self, run: &mut Run<'_>, config: &DeploymentConfig, options: &PipelineOptions) {
        let outputs = match self.control_plane.stack_outputs(
            config.stack_name(),
            config.region(),
            &options.profile,
        ) {
            Ok(outputs) => outputs,
            Err(err) => {
                // Outputs are decoration; the report goes out without them.
                let message = format!("could not read stack outputs: {err}");
                run.sink.on_event(PipelineEvent::Warning {
                    message: message.clone(),
                });
                run.warnings.push(message);
                Vec::new()
            }
        };

        let report = build_report(config, run.identity.as_ref(), &options.work_dir, &outputs);
        run.sink.on_event(report.into_event());
    }
}

fn function_target<'a>(config: &'a DeploymentConfig, options: &'a PipelineOptions) -> FunctionTarget<'a> {
    FunctionTarget {
        function_name: FUNCTION_NAME,
        region: config.region(),
        profile: &options.profile,
    }
}
