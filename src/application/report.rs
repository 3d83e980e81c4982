//! Deployment report
//!
//! Pure formatting of console links and local paths. Nothing here can fail.

use std::path::{Path, PathBuf};

use crate::domain::entities::DeploymentConfig;
use crate::domain::ports::{CallerIdentity, PipelineEvent, StackOutput};
use crate::domain::value_objects::{RequiredFile, FUNCTION_NAME, LOG_GROUP, METRICS_NAMESPACE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentReport {
    pub links: Vec<(String, String)>,
    pub paths: Vec<(String, PathBuf)>,
    pub notes: Vec<String>,
}

impl DeploymentReport {
    pub fn into_event(self) -> PipelineEvent {
        PipelineEvent::Report {
            links: self.links,
            paths: self.paths,
            notes: self.notes,
        }
    }
}

/// Base URL of the management console for `region`
pub fn console_base(region: &str) -> String {
    format!("https://{region}.console.aws.amazon.com")
}

// The logs console double-encodes '/' in log group names.
fn console_log_group(log_group: &str) -> String {
    log_group.replace('/', "$252F")
}

pub fn build_report(
    config: &DeploymentConfig,
    identity: Option<&CallerIdentity>,
    work_dir: &Path,
    outputs: &[StackOutput],
) -> DeploymentReport {
    let region = config.region();
    let base = console_base(region);

    let mut links = vec![
        (
            "Stack".to_string(),
            format!(
                "{base}/cloudformation/home?region={region}#/stacks?filteringText={}",
                config.stack_name()
            ),
        ),
        (
            "Function".to_string(),
            format!("{base}/lambda/home?region={region}#/functions/{FUNCTION_NAME}"),
        ),
        (
            "Dashboards".to_string(),
            format!("{base}/cloudwatch/home?region={region}#dashboards:"),
        ),
        (
            "Logs".to_string(),
            format!(
                "{base}/cloudwatch/home?region={region}#logsV2:log-groups/log-group/{}",
                console_log_group(LOG_GROUP)
            ),
        ),
        (
            "Alert topics".to_string(),
            format!("{base}/sns/v3/home?region={region}#/topics"),
        ),
    ];

    for output in outputs {
        links.push((format!("Output {}", output.key), output.value.clone()));
    }

    let dashboard = RequiredFile::Dashboard.path_in(work_dir);
    let paths = vec![("Local dashboard".to_string(), dashboard)];

    let mut notes = Vec::new();
    if let Some(identity) = identity {
        notes.push(format!("Deployed to account {}", identity.account));
    }
    notes.push(format!("Metrics are published under {METRICS_NAMESPACE}"));
    notes.push(format!(
        "Confirm the subscription email sent to {} to receive alerts",
        config.notification_email()
    ));

    DeploymentReport {
        links,
        paths,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DeploymentConfig {
        DeploymentConfig::from_answers("ops@example.com", "secret", "eu-central-1")
    }

    #[test]
    fn links_point_at_collected_region() {
        let report = build_report(&config(), None, Path::new("/work"), &[]);
        assert!(report
            .links
            .iter()
            .all(|(_, url)| url.starts_with("https://eu-central-1.console.aws.amazon.com")));
    }

    #[test]
    fn function_link_names_the_function() {
        let report = build_report(&config(), None, Path::new("/work"), &[]);
        let (_, url) = report.links.iter().find(|(l, _)| l == "Function").unwrap();
        assert!(url.ends_with("#/functions/ai-infra-monitor"));
    }

    #[test]
    fn log_group_is_console_encoded() {
        let report = build_report(&config(), None, Path::new("/work"), &[]);
        let (_, url) = report.links.iter().find(|(l, _)| l == "Logs").unwrap();
        assert!(url.ends_with("$252Faws$252Flambda$252Fai-infra-monitor"));
    }

    #[test]
    fn stack_outputs_and_identity_are_included() {
        let identity = CallerIdentity {
            account: "123456789012".into(),
            arn: "arn:aws:iam::123456789012:user/ops".into(),
        };
        let outputs = vec![StackOutput {
            key: "AlertTopicArn".into(),
            value: "arn:aws:sns:eu-central-1:123456789012:alerts".into(),
            description: None,
        }];

        let report = build_report(&config(), Some(&identity), Path::new("/work"), &outputs);

        assert!(report.links.iter().any(|(l, _)| l == "Output AlertTopicArn"));
        assert!(report.notes.iter().any(|n| n.contains("123456789012")));
    }

    #[test]
    fn report_never_mentions_the_key() {
        let report = build_report(&config(), None, Path::new("/work"), &[]);
        assert!(!format!("{:?}", report).contains("secret"));
    }

    #[test]
    fn dashboard_path_is_in_work_dir() {
        let report = build_report(&config(), None, Path::new("/work"), &[]);
        assert_eq!(report.paths[0].1, PathBuf::from("/work/dashboard.html"));
    }
}
