//! Tests for the config module

use super::*;
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.aws.profile, "default");
    assert_eq!(config.deploy.update_delay_secs, 10);
    assert_eq!(config.output.color, ColorMode::Auto);
    assert!(config.output.unicode);
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[aws]
profile = "monitoring"

[deploy]
update_delay_secs = 3

[output]
color = "never"
unicode = false
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.aws.profile, "monitoring");
    assert_eq!(config.deploy.update_delay().as_secs(), 3);
    assert_eq!(config.output.color, ColorMode::Never);
    assert!(!config.output.unicode);
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config: Config = toml::from_str("[aws]\nprofile = \"ops\"\n").unwrap();
    assert_eq!(config.aws.profile, "ops");
    assert_eq!(config.deploy.update_delay_secs, 10);
}

#[test]
fn test_unknown_key_warning_has_suggestion_and_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "[aws]\nprofle = \"ops\"\n").unwrap();

    let (config, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(config.aws.profile, "default");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "profle");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("profile"));
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "[deploy]\nupdate_delay_secs = \"soon\"\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let (config, warnings) = load_or_default(dir.path()).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(config.deploy.update_delay_secs, Config::default().deploy.update_delay_secs);
}

#[test]
fn test_aimon_profile_beats_aws_profile() {
    let mut out = Vec::new();
    let config = with_env_overrides_from(
        Config::default(),
        env(&[("AIMON_PROFILE", "deployer"), ("AWS_PROFILE", "other")]),
        &mut out,
    );
    assert_eq!(config.aws.profile, "deployer");
}

#[test]
fn test_aws_profile_is_honored() {
    let mut out = Vec::new();
    let config = with_env_overrides_from(Config::default(), env(&[("AWS_PROFILE", "sandbox")]), &mut out);
    assert_eq!(config.aws.profile, "sandbox");
}

#[test]
fn test_update_delay_override() {
    let mut out = Vec::new();
    let config = with_env_overrides_from(
        Config::default(),
        env(&[("AIMON_UPDATE_DELAY_SECS", "0")]),
        &mut out,
    );
    assert_eq!(config.deploy.update_delay_secs, 0);
    assert!(out.is_empty());
}

#[test]
fn test_invalid_update_delay_keeps_value_and_warns() {
    let mut out = Vec::new();
    let config = with_env_overrides_from(
        Config::default(),
        env(&[("AIMON_UPDATE_DELAY_SECS", "ten")]),
        &mut out,
    );
    assert_eq!(config.deploy.update_delay_secs, 10);
    assert!(String::from_utf8(out).unwrap().contains("AIMON_UPDATE_DELAY_SECS"));
}

#[test]
fn test_invalid_color_falls_back_with_suggestion() {
    let mut out = Vec::new();
    let config = with_env_overrides_from(Config::default(), env(&[("AIMON_COLOR", "nevr")]), &mut out);
    assert_eq!(config.output.color, ColorMode::Auto);
    assert!(String::from_utf8(out).unwrap().contains("Did you mean 'never'?"));
}
