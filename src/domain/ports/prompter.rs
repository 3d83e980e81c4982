//! Prompter Port
//!
//! Reads operator answers. Implementations return the raw answer; defaults
//! are applied by the caller.

use std::io;

pub trait Prompter {
    /// Ask for a visible value. `default` is shown as a hint only.
    fn input(&self, prompt: &str, default: &str) -> io::Result<String>;

    /// Ask for a value without echoing it.
    fn secret(&self, prompt: &str) -> io::Result<String>;
}
