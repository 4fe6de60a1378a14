use crate::dependencies::Environment;
use crate::error::{ApplicationError, Result};
use anyhow::Context;
use std::time::Duration;

const DEFAULT_BASE_WEB_PORT: u16 = 3000;
const DEFAULT_BASE_DATABASE_PORT: u16 = 3306;
const DEFAULT_BASE_CACHE_PORT: u16 = 6379;
const DEFAULT_MAX_SLOTS: u16 = 100;
const DEFAULT_PROBE_TIMEOUT_MS: u64 = 250;

#[derive(Debug)]
pub struct Config {
    pub base_web_port: u16,
    pub base_database_port: u16,
    pub base_cache_port: u16,
    pub max_slots: u16,
    pub probe_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_web_port: DEFAULT_BASE_WEB_PORT,
            base_database_port: DEFAULT_BASE_DATABASE_PORT,
            base_cache_port: DEFAULT_BASE_CACHE_PORT,
            max_slots: DEFAULT_MAX_SLOTS,
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
        }
    }
}

impl Config {
    // Build the configuration from environment variable overrides, falling
    // back to the default for each variable that isn't set
    pub fn from_env(deps: &impl Environment) -> Result<Self> {
        let config = Config {
            base_web_port: numeric_var(deps, "BASE_WEB_PORT", DEFAULT_BASE_WEB_PORT)?,
            base_database_port: numeric_var(
                deps,
                "BASE_DATABASE_PORT",
                DEFAULT_BASE_DATABASE_PORT,
            )?,
            base_cache_port: numeric_var(deps, "BASE_CACHE_PORT", DEFAULT_BASE_CACHE_PORT)?,
            max_slots: numeric_var(deps, "MAX_PORT_SLOTS", DEFAULT_MAX_SLOTS)?,
            probe_timeout: Duration::from_millis(numeric_var(
                deps,
                "PORT_PROBE_TIMEOUT_MS",
                DEFAULT_PROBE_TIMEOUT_MS,
            )?),
        };
        if config.max_slots == 0 {
            return Err(ApplicationError::InvalidConfig(String::from(
                "MAX_PORT_SLOTS must be at least 1",
            )));
        }
        Ok(config)
    }
}

// Read an environment variable as a number, using the default when the
// variable isn't set
fn numeric_var<T>(deps: &impl Environment, var: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match deps.read_var(var) {
        Ok(value) => {
            let parsed = value
                .parse()
                .with_context(|| format!("Failed to parse ${var} value \"{value}\" as a number"))?;
            Ok(parsed)
        }
        Err(_) => Ok(default),
    }
}
