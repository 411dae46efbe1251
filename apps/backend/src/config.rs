//! Server configuration loaded from environment variables.

use std::path::PathBuf;

use thiserror::Error;
use vocab_core::{ExperienceRules, FailurePolicy, IntervalLadder, ParseMode};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("invalid SRS_LADDER: {0}")]
    Ladder(#[from] vocab_core::LadderError),
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub vocab_path: PathBuf,
    pub progress_path: PathBuf,
    pub ladder: IntervalLadder,
    pub failure_policy: FailurePolicy,
    pub parse_mode: ParseMode,
    pub daily_reset_hour: u32,
    pub experience: ExperienceRules,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Env vars (all optional):
    /// - HOST, PORT: listen address
    /// - VOCAB_PATH: vocabulary file or directory
    /// - PROGRESS_PATH: review progress JSON file
    /// - SRS_LADDER: comma-separated day intervals
    /// - SRS_FAILURE_POLICY: "reset" or "demote_one"
    /// - VOCAB_STRICT: "true" requires three fields per line
    /// - DAILY_RESET_HOUR: hour (0-23) when a new study day begins
    /// - XP_PER_SUCCESS, XP_PER_FAILURE, XP_PER_LEVEL
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let ladder = match get("SRS_LADDER") {
            Some(value) => value.parse()?,
            None => IntervalLadder::default(),
        };

        let failure_policy = match get("SRS_FAILURE_POLICY") {
            Some(value) => FailurePolicy::from_str(&value).ok_or(ConfigError::Invalid {
                key: "SRS_FAILURE_POLICY",
                value,
            })?,
            None => FailurePolicy::default(),
        };

        let parse_mode = match get("VOCAB_STRICT") {
            Some(value) => {
                if parse_flag("VOCAB_STRICT", value)? {
                    ParseMode::Strict
                } else {
                    ParseMode::Lenient
                }
            }
            None => ParseMode::default(),
        };

        let daily_reset_hour = parse_number("DAILY_RESET_HOUR", get("DAILY_RESET_HOUR"), 0u32)?;
        if daily_reset_hour > 23 {
            return Err(ConfigError::Invalid {
                key: "DAILY_RESET_HOUR",
                value: daily_reset_hour.to_string(),
            });
        }

        let defaults = ExperienceRules::default();
        let experience = ExperienceRules {
            per_success: parse_number("XP_PER_SUCCESS", get("XP_PER_SUCCESS"), defaults.per_success)?,
            per_failure: parse_number("XP_PER_FAILURE", get("XP_PER_FAILURE"), defaults.per_failure)?,
            per_level: parse_number("XP_PER_LEVEL", get("XP_PER_LEVEL"), defaults.per_level)?,
        };
        if experience.per_level == 0 {
            return Err(ConfigError::Invalid {
                key: "XP_PER_LEVEL",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_number("PORT", get("PORT"), 3000u16)?,
            vocab_path: get("VOCAB_PATH").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")),
            progress_path: get("PROGRESS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_progress_path),
            ladder,
            failure_policy,
            parse_mode,
            daily_reset_hour,
            experience,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `<data_local_dir>/vocab-mastery/progress.json`, or `./progress.json`.
pub fn default_progress_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("vocab-mastery").join("progress.json"))
        .unwrap_or_else(|| PathBuf::from("progress.json"))
}

fn parse_number<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_flag(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}
