//! aimon CLI - deploy the AI infrastructure monitor stack
//!
//! Usage: aimon [--color <WHEN>] [-v]
//!
//! Run from the directory holding `infrastructure.yaml`,
//! `lambda_function.py` and `dashboard.html`. Deployment parameters are
//! asked for interactively.

mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use aimon::presentation::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let code = commands::deploy::cmd_deploy(cli.color, cli.verbose)?;
    std::process::exit(code);
}
