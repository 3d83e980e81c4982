//! CLI Argument Parsing
//!
//! The deploy flow takes no deployment flags: email, key and region are
//! always asked for interactively. Only presentation switches live here.

use clap::Parser;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// aimon - deploy the AI infrastructure monitor stack
#[derive(Parser, Debug)]
#[command(name = "aimon")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Run from the directory containing infrastructure.yaml, lambda_function.py and dashboard.html."
)]
pub struct Cli {
    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v echoes every aws command)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["aimon"]).unwrap();
        assert_eq!(cli.color, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_color_flag() {
        let cli = Cli::try_parse_from(["aimon", "--color", "never"]).unwrap();
        assert!(matches!(cli.color, Some(ColorWhen::Never)));
    }

    #[test]
    fn test_cli_verbose_counts() {
        let cli = Cli::try_parse_from(["aimon", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_rejects_deployment_flags() {
        assert!(Cli::try_parse_from(["aimon", "--region", "eu-west-1"]).is_err());
        assert!(Cli::try_parse_from(["aimon", "deploy"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_color() {
        assert!(Cli::try_parse_from(["aimon", "--color", "sometimes"]).is_err());
    }
}
