//! Gateway configuration, loaded from environment variables.
//!
//! Nothing here is required: process credentials only feed the startup
//! construction check, and every setting has a default. Operations get
//! their credentials from their own arguments, never from this config.

use std::time::Duration;

use crate::alpaca::{BackendUrls, Credentials, TradingEnvironment};

/// Default HTTP port for the gateway.
const DEFAULT_PORT: u16 = 8081;

/// Default per-request backend timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Complete gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// HTTP port the gateway listens on.
    pub port: u16,
    /// Default trading environment for the startup check.
    pub environment: TradingEnvironment,
    /// Per-request backend timeout.
    pub request_timeout: Duration,
    /// Process credentials, when both `ALPACA_KEY` and `ALPACA_SECRET`
    /// are set. Used only by the startup construction check.
    pub credentials: Option<Credentials>,
    /// Backend base-URL resolution (with optional overrides).
    pub urls: BackendUrls,
}

impl GatewayConfig {
    /// Create configuration from environment variables.
    ///
    /// - `GATEWAY_PORT`: HTTP port (default: 8081)
    /// - `GATEWAY_ENV`: `PAPER` | `LIVE` (default: PAPER)
    /// - `GATEWAY_HTTP_TIMEOUT_SECS`: backend timeout (default: 30)
    /// - `ALPACA_KEY` / `ALPACA_SECRET`: optional process credentials
    /// - `ALPACA_TRADING_URL` / `ALPACA_DATA_URL`: base-URL overrides
    #[must_use]
    pub fn from_env() -> Self {
        let environment = std::env::var("GATEWAY_ENV")
            .map(|s| TradingEnvironment::from_str_case_insensitive(&s))
            .unwrap_or_default();

        let api_key = non_empty_env("ALPACA_KEY");
        let api_secret = non_empty_env("ALPACA_SECRET");
        let credentials = match (api_key, api_secret) {
            (Some(key), Some(secret)) => Some(Credentials::new(key, secret)),
            (None, None) => None,
            _ => {
                tracing::warn!(
                    "Only one of ALPACA_KEY / ALPACA_SECRET is set; ignoring process credentials"
                );
                None
            }
        };

        Self {
            port: parse_env_u16("GATEWAY_PORT", DEFAULT_PORT),
            environment,
            request_timeout: parse_env_duration_secs("GATEWAY_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT),
            credentials,
            urls: BackendUrls::from_env(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: TradingEnvironment::default(),
            request_timeout: DEFAULT_TIMEOUT,
            credentials: None,
            urls: BackendUrls::default(),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_env_u16(key: &str, default: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_env_duration_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.port, 8081);
        assert_eq!(config.environment, TradingEnvironment::Paper);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.credentials.is_none());
    }

    #[test]
    fn parse_helpers_fall_back_on_garbage() {
        // Keys that are certainly unset.
        assert_eq!(parse_env_u16("GATEWAY_TEST_UNSET_PORT", 7777), 7777);
        assert_eq!(
            parse_env_duration_secs("GATEWAY_TEST_UNSET_TIMEOUT", Duration::from_secs(9)),
            Duration::from_secs(9)
        );
    }
}
