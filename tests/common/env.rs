//! Test environment builder for isolated aimon runs.
//!
//! The fake `aws` client is a POSIX shell script placed alone on `PATH`. It
//! appends every invocation's arguments to a log file and can be told to
//! fail chosen operations, so tests see exactly which remote calls were made.

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

use super::fixtures::REQUIRED_FILES;

const FAKE_AWS: &str = r##"#!/bin/sh
printf '%s\n' "$*" >> "$FAKE_AWS_LOG"

if [ "$1" = "--version" ]; then
    echo "aws-cli/2.15.0 Python/3.11.6 Linux/6.1 exe/x86_64"
    exit 0
fi

case ",$FAKE_AWS_FAIL," in
    *",$2,"*)
        echo "An error occurred (ValidationError) when calling the $2 operation: simulated" >&2
        exit 254
        ;;
esac

case "$2" in
    get-caller-identity)
        echo '{"UserId": "AIDAEXAMPLE", "Account": "123456789012", "Arn": "arn:aws:iam::123456789012:user/ci"}'
        ;;
    deploy)
        echo "Waiting for changeset to be created.."
        echo "Successfully created/updated stack - ai-infra-monitor-stack"
        ;;
    update-function-code)
        echo '{"FunctionName": "ai-infra-monitor", "LastUpdateStatus": "InProgress"}'
        ;;
    invoke)
        for last; do :; done
        printf '{"statusCode": 200, "body": "{\\"message\\": \\"Log analysis completed\\", \\"logs_analyzed\\": 0, \\"analysis\\": {\\"severity\\": \\"low\\"}}"}' > "$last"
        if [ -n "$FAKE_AWS_FUNCTION_ERROR" ]; then
            printf '{"StatusCode": 200, "FunctionError": "%s", "ExecutedVersion": "$LATEST"}\n' "$FAKE_AWS_FUNCTION_ERROR"
        else
            echo '{"StatusCode": 200, "ExecutedVersion": "$LATEST"}'
        fi
        ;;
    describe-stacks)
        echo '[{"OutputKey": "AlertTopicArn", "OutputValue": "arn:aws:sns:us-east-1:123456789012:ai-infra-alerts", "Description": "Alert topic"}]'
        ;;
esac
exit 0
"##;

/// Result of running the aimon binary
#[derive(Debug)]
pub struct TestResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated environment: working directory, TMPDIR and a PATH holding only
/// the fake client (or nothing at all).
pub struct TestEnv {
    pub work_dir: TempDir,
    pub tmp_dir: TempDir,
    bin_dir: TempDir,
    log_path: PathBuf,
    failing: Vec<String>,
    function_error: Option<String>,
    extra_env: Vec<(String, String)>,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::default()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.work_dir.path().join(relative)
    }

    /// Run with blank answers for every prompt.
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_input(args, "\n\n\n")
    }

    pub fn run_with_input(&self, args: &[&str], stdin: &str) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_aimon"));
        cmd.current_dir(self.work_dir.path())
            .args(args)
            .env("PATH", self.bin_dir.path())
            .env("TMPDIR", self.tmp_dir.path())
            .env("FAKE_AWS_LOG", &self.log_path)
            .env("FAKE_AWS_FAIL", self.failing.join(","))
            .env("AIMON_UPDATE_DELAY_SECS", "0")
            .env("AIMON_COLOR", "never")
            .env("LC_ALL", "C")
            .env_remove("AIMON_PROFILE")
            .env_remove("AWS_PROFILE")
            .env_remove("FAKE_AWS_FUNCTION_ERROR")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(kind) = &self.function_error {
            cmd.env("FAKE_AWS_FUNCTION_ERROR", kind);
        }
        for (key, value) in &self.extra_env {
            cmd.env(key, value);
        }

        let mut child = cmd.spawn().expect("failed to spawn aimon");
        {
            let mut pipe = child.stdin.take().expect("stdin is piped");
            // The run may exit before reading; a broken pipe is fine.
            let _ = pipe.write_all(stdin.as_bytes());
        }
        let output = child.wait_with_output().expect("failed to wait for aimon");

        TestResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Every recorded client invocation, one argument string per call.
    pub fn aws_calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log_path)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Recorded calls other than the `--version` probe.
    pub fn remote_calls(&self) -> Vec<String> {
        self.aws_calls()
            .into_iter()
            .filter(|c| c != "--version")
            .collect()
    }

    pub fn call_for(&self, operation: &str) -> Option<String> {
        self.aws_calls().into_iter().find(|c| c.starts_with(operation))
    }

    /// Anything the run left in its TMPDIR
    pub fn leftover_temp_entries(&self) -> Vec<PathBuf> {
        fs::read_dir(self.tmp_dir.path())
            .map(|entries| entries.flatten().map(|e| e.path()).collect())
            .unwrap_or_default()
    }

    pub fn assert_no_leftovers(&self) {
        assert!(
            !self.path("lambda-deployment.zip").exists(),
            "archive left in working directory"
        );
        assert!(
            !self.path("smoke-test-response.json").exists(),
            "response file left in working directory"
        );
        let leftovers = self.leftover_temp_entries();
        assert!(leftovers.is_empty(), "temp entries left: {:?}", leftovers);
    }
}

#[derive(Default)]
pub struct TestEnvBuilder {
    without_aws: bool,
    missing_files: Vec<String>,
    failing: Vec<String>,
    function_error: Option<String>,
    config: Option<String>,
    extra_env: Vec<(String, String)>,
}

impl TestEnvBuilder {
    /// Leave the client off PATH entirely
    pub fn without_aws(mut self) -> Self {
        self.without_aws = true;
        self
    }

    pub fn without_file(mut self, name: &str) -> Self {
        self.missing_files.push(name.to_string());
        self
    }

    /// Make the fake client fail `operation` (e.g. `deploy`, `invoke`)
    pub fn failing(mut self, operation: &str) -> Self {
        self.failing.push(operation.to_string());
        self
    }

    pub fn function_error(mut self, kind: &str) -> Self {
        self.function_error = Some(kind.to_string());
        self
    }

    pub fn config(mut self, toml: &str) -> Self {
        self.config = Some(toml.to_string());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.extra_env.push((key.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> TestEnv {
        let work_dir = tempfile::tempdir().expect("work dir");
        let tmp_dir = tempfile::tempdir().expect("tmp dir");
        let bin_dir = tempfile::tempdir().expect("bin dir");
        let log_path = bin_dir.path().join("calls.log");

        for (name, content) in REQUIRED_FILES {
            if !self.missing_files.iter().any(|m| m == name) {
                fs::write(work_dir.path().join(name), content).expect("write fixture");
            }
        }

        if let Some(config) = &self.config {
            fs::write(work_dir.path().join("aimon.toml"), config).expect("write config");
        }

        if !self.without_aws {
            install_fake_aws(bin_dir.path());
        }

        TestEnv {
            work_dir,
            tmp_dir,
            bin_dir,
            log_path,
            failing: self.failing,
            function_error: self.function_error,
            extra_env: self.extra_env,
        }
    }
}

fn install_fake_aws(dir: &Path) {
    let path = dir.join("aws");
    fs::write(&path, FAKE_AWS).expect("write fake aws");
    let mut perms = fs::metadata(&path).expect("stat fake aws").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod fake aws");
}
