//! Trading environment, caller credentials, and backend URL resolution.

/// Trading environment (paper vs live).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TradingEnvironment {
    /// Paper trading (simulated funds).
    #[default]
    Paper,
    /// Live trading (real funds).
    Live,
}

impl TradingEnvironment {
    /// Parse an environment from string, defaulting to paper.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "LIVE" => Self::Live,
            _ => Self::Paper,
        }
    }

    /// Map the per-call `paper` flag onto an environment.
    #[must_use]
    pub const fn from_paper_flag(paper: bool) -> Self {
        if paper { Self::Paper } else { Self::Live }
    }

    /// Base URL for the trading API.
    #[must_use]
    pub const fn trading_base_url(&self) -> &'static str {
        match self {
            Self::Paper => "https://paper-api.alpaca.markets",
            Self::Live => "https://api.alpaca.markets",
        }
    }

    /// Base URL for the market data API.
    ///
    /// The data API uses one URL for both environments - authentication
    /// determines the access level.
    #[must_use]
    pub const fn data_base_url() -> &'static str {
        "https://data.alpaca.markets"
    }

    /// Check if this is live trading.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    /// Lowercase environment name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Live => "live",
        }
    }
}

impl std::fmt::Display for TradingEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paper => write!(f, "PAPER"),
            Self::Live => write!(f, "LIVE"),
        }
    }
}

/// Alpaca API credentials scoping a single operation.
///
/// Credentials arrive with every tool call and live only as long as the
/// handles built from them. They are never persisted and never logged.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }

    /// Get the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the API secret.
    #[must_use]
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    /// Check that both parts are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Backend base-URL resolution.
///
/// Production traffic goes to the per-environment Alpaca endpoints.
/// Overrides exist for tests and local proxies; when set they take
/// precedence over the environment defaults.
#[derive(Debug, Clone, Default)]
pub struct BackendUrls {
    trading_override: Option<String>,
    data_override: Option<String>,
}

impl BackendUrls {
    /// Read overrides from `ALPACA_TRADING_URL` / `ALPACA_DATA_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            trading_override: std::env::var("ALPACA_TRADING_URL")
                .ok()
                .filter(|v| !v.is_empty()),
            data_override: std::env::var("ALPACA_DATA_URL")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }

    /// Build with explicit overrides for both services.
    #[must_use]
    pub fn with_overrides(trading: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            trading_override: Some(trading.into()),
            data_override: Some(data.into()),
        }
    }

    /// Resolve the trading API base URL for an environment.
    #[must_use]
    pub fn trading(&self, environment: TradingEnvironment) -> String {
        self.trading_override
            .clone()
            .unwrap_or_else(|| environment.trading_base_url().to_string())
    }

    /// Resolve the market data API base URL.
    #[must_use]
    pub fn data(&self) -> String {
        self.data_override
            .clone()
            .unwrap_or_else(|| TradingEnvironment::data_base_url().to_string())
    }
}
