use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_EMPLOYEE_SERVICE_URL: &str = "http://127.0.0.1:50051";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub employee_service_url: String,
    pub request_timeout: Duration,
}

impl GatewayConfig {
    pub fn load() -> Result<Self> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err).context("failed to read .env");
            }
        }

        let employee_service_url = std::env::var("EMPLOYEE_SERVICE_URL")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_EMPLOYEE_SERVICE_URL.into());

        let request_timeout = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("invalid REQUEST_TIMEOUT_SECS: {raw}"))?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            employee_service_url,
            request_timeout,
        })
    }
}
