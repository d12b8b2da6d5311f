use crate::error::{AppError, AppResult};
use crate::services::MAX_SETTING_DAYS;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub loyalty: LoyaltyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Generation engine knobs. The lookback and cycle-duration values are only
/// fallbacks: the `settings` table wins when it has a parseable value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyConfig {
    #[serde(default = "default_days")]
    pub default_lookback_days: i64,
    #[serde(default = "default_days")]
    pub default_cycle_duration_days: i64,
    #[serde(default = "default_generation_interval_secs")]
    pub generation_interval_secs: u64,
    #[serde(default = "default_level_concurrency")]
    pub level_concurrency: usize,
    #[serde(default = "default_true")]
    pub run_scheduler: bool,
}

fn default_days() -> i64 {
    30
}

fn default_generation_interval_secs() -> u64 {
    12 * 3600
}

fn default_level_concurrency() -> usize {
    8
}

fn default_true() -> bool {
    true
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            default_lookback_days: default_days(),
            default_cycle_duration_days: default_days(),
            generation_interval_secs: default_generation_interval_secs(),
            level_concurrency: default_level_concurrency(),
            run_scheduler: default_true(),
        }
    }
}

fn get_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse::<T>().ok())
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => toml::from_str(&config_str)
                .map_err(|e| format!("Failed to parse config file {config_path}: {e}"))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // no file: environment variables and defaults only
                let database_url = get_env("DATABASE_URL").ok_or(
                    "DATABASE_URL is not set and no config.toml was found",
                )?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT").unwrap_or(8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS").unwrap_or(10u32),
                    },
                    loyalty: LoyaltyConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("Unable to read config file {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Environment variables override file values.
    fn apply_env_overrides(&mut self) {
        if let Some(v) = get_env("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(p) = get_env_parse("SERVER_PORT") {
            self.server.port = p;
        }
        if let Some(v) = get_env("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(mc) = get_env_parse("DB_MAX_CONNECTIONS") {
            self.database.max_connections = mc;
        }
        if let Some(n) = get_env_parse("LOYALTY_LOOKBACK_DAYS") {
            self.loyalty.default_lookback_days = n;
        }
        if let Some(n) = get_env_parse("LOYALTY_CYCLE_DURATION_DAYS") {
            self.loyalty.default_cycle_duration_days = n;
        }
        if let Some(n) = get_env_parse("LOYALTY_GENERATION_INTERVAL_SECS") {
            self.loyalty.generation_interval_secs = n;
        }
        if let Some(n) = get_env_parse("LOYALTY_LEVEL_CONCURRENCY") {
            self.loyalty.level_concurrency = n;
        }
        if let Some(b) = get_env_parse("LOYALTY_RUN_SCHEDULER") {
            self.loyalty.run_scheduler = b;
        }
    }

    fn validate(&self) -> AppResult<()> {
        let days = 1..=MAX_SETTING_DAYS;
        if !days.contains(&self.loyalty.default_lookback_days)
            || !days.contains(&self.loyalty.default_cycle_duration_days)
        {
            return Err(AppError::ConfigError(format!(
                "loyalty lookback and cycle duration must be within 1..={MAX_SETTING_DAYS} days"
            )));
        }
        if self.loyalty.level_concurrency == 0 {
            return Err(AppError::ConfigError(
                "loyalty.level_concurrency must be at least 1".to_string(),
            ));
        }
        if self.loyalty.generation_interval_secs == 0 {
            return Err(AppError::ConfigError(
                "loyalty.generation_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 9000

        [database]
        url = "postgres://localhost/loyalty"
        max_connections = 5
    "#;

    #[test]
    fn test_loyalty_section_is_optional() {
        let config: Config = toml::from_str(BASE).unwrap();
        assert_eq!(config.loyalty.default_lookback_days, 30);
        assert_eq!(config.loyalty.default_cycle_duration_days, 30);
        assert_eq!(config.loyalty.generation_interval_secs, 43_200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_loyalty_section_keeps_defaults() {
        let raw = format!("{BASE}\n[loyalty]\ndefault_lookback_days = 60\n");
        let config: Config = toml::from_str(&raw).unwrap();
        assert_eq!(config.loyalty.default_lookback_days, 60);
        assert_eq!(config.loyalty.default_cycle_duration_days, 30);
        assert_eq!(config.loyalty.level_concurrency, 8);
        assert!(config.loyalty.run_scheduler);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        for loyalty in [
            "level_concurrency = 0",
            "generation_interval_secs = 0",
            "default_lookback_days = 0",
            "default_cycle_duration_days = 100000000",
        ] {
            let raw = format!("{BASE}\n[loyalty]\n{loyalty}\n");
            let config: Config = toml::from_str(&raw).unwrap();
            let err = config.validate().unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)), "{loyalty}");
        }
    }
}
