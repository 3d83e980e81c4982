//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports:
//! - `aws_cli` - `ControlPlane` over the `aws` command-line client
//! - `prompt` - `Prompter` for terminals and for piped input

pub mod aws_cli;
pub mod prompt;

pub use aws_cli::AwsCli;
pub use prompt::{DialoguerPrompter, LinePrompter};
