//! `aimon.toml` and environment overrides.

#![cfg(unix)]

mod common;

use common::TestEnv;

#[test]
fn config_file_sets_profile() {
    let env = TestEnv::builder()
        .config("[aws]\nprofile = \"monitoring\"\n")
        .build();

    let result = env.run(&[]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    assert!(result.stdout.contains("Profile: monitoring"));
    let identity = env.call_for("sts get-caller-identity").unwrap();
    assert!(identity.contains("--profile monitoring"));
}

#[test]
fn unknown_key_warns_with_suggestion() {
    let env = TestEnv::builder()
        .config("[aws]\nprofil = \"monitoring\"\n")
        .build();

    let result = env.run(&[]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    assert!(
        result.stdout.contains("unknown config key 'profil'"),
        "{}",
        result.stdout
    );
    assert!(result.stdout.contains("did you mean 'profile'?"));
}

#[test]
fn malformed_config_is_fatal_before_any_call() {
    let env = TestEnv::builder().config("[aws\nprofile = 1\n").build();

    let result = env.run(&[]);

    assert_ne!(result.exit_code, 0);
    assert!(result.stderr.contains("aimon.toml"), "{}", result.stderr);
    assert!(env.aws_calls().is_empty());
}

#[test]
fn invalid_color_env_warns_and_falls_back() {
    let env = TestEnv::builder().build();

    let result = env.run(&["--color", "auto"]);
    assert_eq!(result.exit_code, 0);

    let env = TestEnv::builder().env("AIMON_COLOR", "allways").build();
    let result = env.run(&[]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    assert!(result
        .stderr
        .contains("Invalid AIMON_COLOR value 'allways'. Did you mean 'always'?"));
}
