use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::{
    error::{config::ConfigError, AppError},
    service::{
        draw::{DEFAULT_SPIN_DELAY_MS, DEFAULT_SPIN_STEPS},
        identity::{MatchStrategy, DEFAULT_FUZZY_THRESHOLD},
    },
};

const DEFAULT_LEDGER_PATH: &str = "participaciones.json";
const DEFAULT_COMMAND_PREFIX: &str = "!";
const DEFAULT_DRAW_ROOM: &str = "Sorteo";
const DEFAULT_GRANT_ROOM: &str = "Evento";
const DEFAULT_DISCORD_TIMEOUT_SECS: u64 = 10;

pub struct Config {
    pub discord_token: String,

    pub ledger_path: PathBuf,
    pub command_prefix: String,

    pub draw_room: String,
    pub grant_room: String,
    pub match_strategy: MatchStrategy,

    pub spin_steps: usize,
    pub spin_delay: Duration,
    pub discord_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()))?;

        let threshold = parse_or(&lookup, "FUZZY_THRESHOLD", DEFAULT_FUZZY_THRESHOLD)?;
        if threshold > 100 {
            return Err(invalid("FUZZY_THRESHOLD", &threshold.to_string(), "must be 0-100").into());
        }

        let match_strategy = match lookup("MATCH_STRATEGY").as_deref().map(str::trim) {
            None | Some("") | Some("exact") => MatchStrategy::Exact,
            Some("fuzzy") => MatchStrategy::Fuzzy { threshold },
            Some(other) => {
                return Err(invalid("MATCH_STRATEGY", other, "expected 'exact' or 'fuzzy'").into())
            }
        };

        Ok(Self {
            discord_token,
            ledger_path: lookup("LEDGER_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH)),
            command_prefix: lookup("COMMAND_PREFIX")
                .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string()),
            draw_room: lookup("DRAW_ROOM").unwrap_or_else(|| DEFAULT_DRAW_ROOM.to_string()),
            grant_room: lookup("GRANT_ROOM").unwrap_or_else(|| DEFAULT_GRANT_ROOM.to_string()),
            match_strategy,
            spin_steps: parse_or(&lookup, "SPIN_STEPS", DEFAULT_SPIN_STEPS)?,
            spin_delay: Duration::from_millis(parse_or(
                &lookup,
                "SPIN_DELAY_MS",
                DEFAULT_SPIN_DELAY_MS,
            )?),
            discord_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DISCORD_TIMEOUT_SECS",
                DEFAULT_DISCORD_TIMEOUT_SECS,
            )?),
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| invalid(name, &value, &e.to_string())),
    }
}

fn invalid(name: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
