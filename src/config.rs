//! Environment-based configuration for the homework watcher.
use thiserror::Error;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Отсутствует обязательная переменная окружения: '{0}' Программа принудительно остановлена.")]
    MissingVar(&'static str),
    #[error("TELEGRAM_CHAT_ID must be a numeric chat id, got '{0}'")]
    InvalidChatId(String),
}

/// Credentials read once at startup; immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: i64,
}

impl Config {
    /// Build from the process environment. All three variables are required;
    /// the first missing one is reported by name.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but with an injectable variable lookup,
    /// so tests never have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telegram_token = require(&lookup, TELEGRAM_TOKEN_VAR)?;
        let chat_id_raw = require(&lookup, TELEGRAM_CHAT_ID_VAR)?;
        let practicum_token = require(&lookup, PRACTICUM_TOKEN_VAR)?;
        let chat_id = chat_id_raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidChatId(chat_id_raw))?;
        Ok(Self {
            practicum_token,
            telegram_token,
            chat_id,
        })
    }
}

fn require<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (PRACTICUM_TOKEN_VAR, "practicum-secret"),
            (TELEGRAM_TOKEN_VAR, "123:bot-secret"),
            (TELEGRAM_CHAT_ID_VAR, "987654321"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn loads_all_three_credentials() {
        let cfg = load(&full_env()).unwrap();
        assert_eq!(cfg.practicum_token, "practicum-secret");
        assert_eq!(cfg.telegram_token, "123:bot-secret");
        assert_eq!(cfg.chat_id, 987654321);
    }

    #[test]
    fn missing_var_is_reported_by_name() {
        for var in [PRACTICUM_TOKEN_VAR, TELEGRAM_TOKEN_VAR, TELEGRAM_CHAT_ID_VAR] {
            let mut env = full_env();
            env.remove(var);
            match load(&env) {
                Err(ConfigError::MissingVar(name)) => assert_eq!(name, var),
                other => panic!("expected MissingVar for {var}, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut env = full_env();
        env.insert(TELEGRAM_TOKEN_VAR, "  ");
        assert!(matches!(
            load(&env),
            Err(ConfigError::MissingVar(TELEGRAM_TOKEN_VAR))
        ));
    }

    #[test]
    fn non_numeric_chat_id_is_rejected() {
        let mut env = full_env();
        env.insert(TELEGRAM_CHAT_ID_VAR, "not-a-number");
        assert!(matches!(load(&env), Err(ConfigError::InvalidChatId(_))));
    }
}
