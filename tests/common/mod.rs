//! Common test utilities for aimon CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated working directory, temp dir and fake `aws` client
//! - `TestResult`: captured exit code and output
//! - Fixtures: the three required files

#![allow(dead_code)]
#![deny(unused_imports)]

pub mod env;
pub mod fixtures;

pub use env::*;
