use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::client::RetryPolicy;

pub const DEFAULT_YEAR: i32 = 2026;

/// Runtime configuration, resolved from the environment with defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub year: i32,
    pub port: u16,
    pub data_path: PathBuf,
    pub store: RetryPolicy,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let data_path = env::var("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/entries.json"));

        Self {
            year: env_parse("APP_YEAR", DEFAULT_YEAR),
            port: env_parse("PORT", 8080),
            data_path,
            store: RetryPolicy {
                timeout: Duration::from_millis(env_parse("APP_STORE_TIMEOUT_MS", 10_000)),
                retries: env_parse("APP_STORE_RETRIES", 0),
                backoff: Duration::from_millis(env_parse("APP_STORE_RETRY_BACKOFF_MS", 250)),
            },
        }
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
