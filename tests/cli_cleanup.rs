//! Temporary artifacts never outlive a run, whichever way it ends.

#![cfg(unix)]

mod common;

use std::fs;

use common::TestEnv;

#[test]
fn cleanup_after_success() {
    let env = TestEnv::builder().build();

    let result = env.run(&[]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    assert!(result.stdout.contains("cleaned up 2 temporary item(s)"));
    env.assert_no_leftovers();
}

#[test]
fn cleanup_after_failure_at_each_remote_step() {
    for operation in ["deploy", "update-function-code", "describe-stacks", "invoke"] {
        let env = TestEnv::builder().failing(operation).build();

        env.run(&[]);

        env.assert_no_leftovers();
    }
}

#[test]
fn cleanup_after_packaging_failure() {
    let env = TestEnv::builder().without_file("lambda_function.py").build();
    // A directory passes the existence check but cannot be packaged.
    fs::create_dir(env.path("lambda_function.py")).unwrap();

    let result = env.run(&[]);

    assert_eq!(result.exit_code, 1, "{}", result.combined_output());
    assert!(result.stdout.contains("failed to package"));
    assert!(env.call_for("cloudformation").is_none());
    env.assert_no_leftovers();
}

#[test]
fn source_files_are_never_removed() {
    let env = TestEnv::builder().failing("deploy").build();

    env.run(&[]);

    for name in ["infrastructure.yaml", "lambda_function.py", "dashboard.html"] {
        assert!(env.path(name).exists(), "{name} was removed");
    }
}

#[test]
fn stale_archive_is_replaced_and_removed() {
    let env = TestEnv::builder().build();
    fs::write(env.path("lambda-deployment.zip"), b"stale").unwrap();

    let result = env.run(&[]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    env.assert_no_leftovers();
}
