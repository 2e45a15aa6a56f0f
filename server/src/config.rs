use std::time::Duration;

use anyhow::{Context, Result};
use platform_db::DatabaseSettings;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Environment first, then a `.env` file in the working directory.
    pub fn load() -> Result<Self> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err).context("failed to read .env");
            }
        }

        let database = DatabaseSettings::from_env()?;
        let request_timeout = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("invalid REQUEST_TIMEOUT_SECS: {raw}"))
            })
            .transpose()?
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        Ok(Self {
            database,
            request_timeout,
        })
    }
}
