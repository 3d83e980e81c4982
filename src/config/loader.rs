//! Configuration loading

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::env_validator::{closest_match, EnvVarValidator};
use super::types::{ColorMode, Config, ConfigError};

/// Project config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "aimon.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        file: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `aimon.toml` from `dir` if present, then apply environment overrides.
///
/// A missing file is not an error; a malformed one is.
pub fn load_or_default(dir: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let path = dir.join(CONFIG_FILE);
    let (config, warnings) = if path.exists() {
        load_with_warnings(&path)?
    } else {
        (Config::default(), Vec::new())
    };

    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (AIMON_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok(), &mut std::io::stderr())
}

/// Apply overrides from an arbitrary lookup; invalid values are reported to `writer`.
pub fn with_env_overrides_from<W: Write>(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
    writer: &mut W,
) -> Config {
    // AIMON_PROFILE wins over the SDK-wide AWS_PROFILE
    if let Some(profile) = get_env("AIMON_PROFILE")
        .or_else(|| get_env("AWS_PROFILE"))
        .filter(|p| !p.trim().is_empty())
    {
        config.aws.profile = profile.trim().to_string();
    }

    if let Some(delay) = get_env("AIMON_UPDATE_DELAY_SECS") {
        match delay.trim().parse::<u64>() {
            Ok(secs) => config.deploy.update_delay_secs = secs,
            Err(_) => {
                let _ = writeln!(
                    writer,
                    "Warning: Invalid AIMON_UPDATE_DELAY_SECS value '{}' (expected whole seconds)",
                    delay
                );
            }
        }
    }

    if let Some(color) = get_env("AIMON_COLOR") {
        let validator = EnvVarValidator::new("AIMON_COLOR", ColorMode::VALID);
        config.output.color =
            validator.parse_with_writer(&color, ColorMode::parse, config.output.color, writer);
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "aws",
        "profile",
        "deploy",
        "update_delay_secs",
        "output",
        "color",
        "unicode",
    ];

    closest_match(unknown, CANDIDATES).map(str::to_string)
}
