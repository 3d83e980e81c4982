//! AWS CLI Control Plane
//!
//! Implements `ControlPlane` by running the `aws` command-line client.
//! Every call is a blocking child process; stdout is parsed as JSON where
//! the pipeline needs a value back.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::entities::PackagedArtifact;
use crate::domain::ports::{
    CallerIdentity, ControlPlane, ControlPlaneError, FunctionTarget, InvokeMetadata,
    PipelineEvent, PipelineEventSink, StackDeployRequest, StackOutput,
};

const DEFAULT_PROGRAM: &str = "aws";
const MASK: &str = "****";

/// One command line, with secret arguments marked for echo masking.
#[derive(Debug, Clone, Default)]
struct CommandLine {
    args: Vec<String>,
    secret: Vec<bool>,
}

impl CommandLine {
    fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut line = Self::default();
        for arg in args {
            line = line.arg(arg);
        }
        line
    }

    fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self.secret.push(false);
        self
    }

    /// `KEY=VALUE` where only the value is hidden in echoes
    fn secret_pair(mut self, key: &str, value: &str) -> Self {
        self.args.push(format!("{key}={value}"));
        self.secret.push(true);
        self
    }

    fn target(self, region: &str, profile: &str) -> Self {
        self.arg("--region")
            .arg(region)
            .arg("--profile")
            .arg(profile)
    }

    /// Render for display, masking secret values.
    fn display(&self, program: &str) -> String {
        let mut out = String::from(program);
        for (arg, secret) in self.args.iter().zip(&self.secret) {
            out.push(' ');
            if *secret {
                let key = arg.split_once('=').map(|(k, _)| k).unwrap_or_default();
                out.push_str(key);
                out.push('=');
                out.push_str(MASK);
            } else if arg.is_empty() || arg.contains(char::is_whitespace) {
                out.push('\'');
                out.push_str(arg);
                out.push('\'');
            } else {
                out.push_str(arg);
            }
        }
        out
    }

    /// Short form for error messages: program plus the service/operation pair
    fn summary(&self, program: &str) -> String {
        let words: Vec<&str> = self
            .args
            .iter()
            .take_while(|a| !a.starts_with("--"))
            .take(2)
            .map(String::as_str)
            .collect();
        if words.is_empty() {
            program.to_string()
        } else {
            format!("{program} {}", words.join(" "))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct IdentityResponse {
    account: Option<String>,
    arn: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
struct InvokeResponse {
    status_code: Option<i64>,
    function_error: Option<String>,
    executed_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OutputEntry {
    output_key: String,
    output_value: String,
    description: Option<String>,
}

/// Control plane backed by the `aws` client
pub struct AwsCli {
    program: OsString,
    echo: Option<Arc<dyn PipelineEventSink>>,
}

impl Default for AwsCli {
    fn default() -> Self {
        Self::new()
    }
}

impl AwsCli {
    pub fn new() -> Self {
        Self {
            program: OsString::from(DEFAULT_PROGRAM),
            echo: None,
        }
    }

    /// Use a different client executable (name or path)
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Echo each command to `sink` before running it
    pub fn with_echo(mut self, sink: Arc<dyn PipelineEventSink>) -> Self {
        self.echo = Some(sink);
        self
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Run the client and return its stdout on success.
    fn run(&self, line: &CommandLine) -> Result<String, ControlPlaneError> {
        let program = self.program_name();
        if let Some(sink) = self.echo.as_ref().filter(|s| s.wants_commands()) {
            sink.on_event(PipelineEvent::Command {
                line: line.display(&program),
            });
        }

        let output = Command::new(&self.program)
            .args(&line.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ControlPlaneError::Spawn {
                program: program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ControlPlaneError::CommandFailed {
                command: line.summary(&program),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn parse<T: for<'de> Deserialize<'de>>(
        &self,
        line: &CommandLine,
        stdout: &str,
    ) -> Result<T, ControlPlaneError> {
        serde_json::from_str(stdout).map_err(|e| ControlPlaneError::InvalidResponse {
            command: line.summary(&self.program_name()),
            message: e.to_string(),
        })
    }
}

fn identity_command(profile: &str) -> CommandLine {
    CommandLine::new(["sts", "get-caller-identity", "--profile", profile])
        .arg("--output")
        .arg("json")
}

fn deploy_command(request: &StackDeployRequest<'_>) -> CommandLine {
    let mut line = CommandLine::new(["cloudformation", "deploy"])
        .arg("--template-file")
        .arg(request.template.display().to_string())
        .arg("--stack-name")
        .arg(request.stack_name)
        .target(request.region, request.profile);

    if !request.parameters.is_empty() {
        line = line.arg("--parameter-overrides");
        for param in &request.parameters {
            line = if param.secret {
                line.secret_pair(&param.key, &param.value)
            } else {
                line.arg(format!("{}={}", param.key, param.value))
            };
        }
    }

    if !request.capabilities.is_empty() {
        line = line.arg("--capabilities");
        for capability in &request.capabilities {
            line = line.arg(*capability);
        }
    }

    line.arg("--no-fail-on-empty-changeset")
}

fn update_code_command(target: FunctionTarget<'_>, artifact: &PackagedArtifact) -> CommandLine {
    CommandLine::new(["lambda", "update-function-code"])
        .arg("--function-name")
        .arg(target.function_name)
        .arg("--zip-file")
        .arg(artifact.fileb_uri())
        .target(target.region, target.profile)
        .arg("--output")
        .arg("json")
}

fn invoke_command(target: FunctionTarget<'_>, payload: &str, response_path: &Path) -> CommandLine {
    CommandLine::new(["lambda", "invoke"])
        .arg("--function-name")
        .arg(target.function_name)
        .arg("--payload")
        .arg(payload)
        .arg("--cli-binary-format")
        .arg("raw-in-base64-out")
        .target(target.region, target.profile)
        .arg("--output")
        .arg("json")
        // outfile is positional and must come last
        .arg(response_path.display().to_string())
}

fn outputs_command(stack_name: &str, region: &str, profile: &str) -> CommandLine {
    CommandLine::new(["cloudformation", "describe-stacks"])
        .arg("--stack-name")
        .arg(stack_name)
        .target(region, profile)
        .arg("--query")
        .arg("Stacks[0].Outputs")
        .arg("--output")
        .arg("json")
}

impl ControlPlane for AwsCli {
    fn tool_name(&self) -> &str {
        self.program.to_str().unwrap_or(DEFAULT_PROGRAM)
    }

    fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn caller_identity(&self, profile: &str) -> Result<CallerIdentity, ControlPlaneError> {
        let line = identity_command(profile);
        let stdout = self.run(&line)?;
        let response: IdentityResponse = self.parse(&line, &stdout)?;

        match response.account.filter(|a| !a.is_empty()) {
            Some(account) => Ok(CallerIdentity {
                account,
                arn: response.arn.unwrap_or_default(),
            }),
            None => Err(ControlPlaneError::InvalidResponse {
                command: line.summary(&self.program_name()),
                message: "no account in response".to_string(),
            }),
        }
    }

    fn deploy_stack(&self, request: &StackDeployRequest<'_>) -> Result<(), ControlPlaneError> {
        self.run(&deploy_command(request)).map(|_| ())
    }

    fn update_function_code(
        &self,
        target: FunctionTarget<'_>,
        artifact: &PackagedArtifact,
    ) -> Result<(), ControlPlaneError> {
        self.run(&update_code_command(target, artifact)).map(|_| ())
    }

    fn invoke_function(
        &self,
        target: FunctionTarget<'_>,
        payload: &str,
        response_path: &Path,
    ) -> Result<InvokeMetadata, ControlPlaneError> {
        let line = invoke_command(target, payload, response_path);
        let stdout = self.run(&line)?;

        // Older clients print nothing; treat that as bare success.
        let response: InvokeResponse = if stdout.trim().is_empty() {
            InvokeResponse::default()
        } else {
            self.parse(&line, &stdout)?
        };

        Ok(InvokeMetadata {
            status_code: response.status_code,
            function_error: response.function_error,
            executed_version: response.executed_version,
        })
    }

    fn stack_outputs(
        &self,
        stack_name: &str,
        region: &str,
        profile: &str,
    ) -> Result<Vec<StackOutput>, ControlPlaneError> {
        let line = outputs_command(stack_name, region, profile);
        let stdout = self.run(&line)?;

        // A stack without outputs yields `null`.
        let entries: Option<Vec<OutputEntry>> = self.parse(&line, &stdout)?;
        Ok(entries
            .unwrap_or_default()
            .into_iter()
            .map(|e| StackOutput {
                key: e.output_key,
                value: e.output_value,
                description: e.description,
            })
            .collect())
    }
}
