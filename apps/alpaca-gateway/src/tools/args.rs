//! Tool argument schemas.
//!
//! Every operation carries its own credentials; nothing is inherited from
//! process state. Defaults mirror the tool table: `paper = true`,
//! `days = 5`, `status = "all"`, `limit = 10`, `cancel_orders = true`.

use serde::Deserialize;

use crate::alpaca::{Credentials, TradingEnvironment};

const fn default_true() -> bool {
    true
}

const fn default_bars_days() -> i64 {
    5
}

const fn default_orders_limit() -> u32 {
    10
}

fn default_orders_status() -> String {
    "all".to_string()
}

/// Arguments for `get_account_info`, `get_positions`, and
/// `cancel_all_orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountArgs {
    /// Alpaca API key ID.
    pub api_key: String,
    /// Alpaca API secret key.
    pub api_secret: String,
    /// Use the paper trading environment.
    #[serde(default = "default_true")]
    pub paper: bool,
}

/// Arguments for `get_stock_quote`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteArgs {
    /// Stock ticker symbol (e.g. AAPL, MSFT).
    pub symbol: String,
    /// Alpaca API key ID.
    pub api_key: String,
    /// Alpaca API secret key.
    pub api_secret: String,
}

/// Arguments for `get_stock_bars`.
#[derive(Debug, Clone, Deserialize)]
pub struct BarsArgs {
    /// Stock ticker symbol (e.g. AAPL, MSFT).
    pub symbol: String,
    /// Alpaca API key ID.
    pub api_key: String,
    /// Alpaca API secret key.
    pub api_secret: String,
    /// Number of trading days to look back.
    #[serde(default = "default_bars_days")]
    pub days: i64,
}

/// Arguments for `get_orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersArgs {
    /// Alpaca API key ID.
    pub api_key: String,
    /// Alpaca API secret key.
    pub api_secret: String,
    /// Use the paper trading environment.
    #[serde(default = "default_true")]
    pub paper: bool,
    /// Order status to filter by (`open`, `closed`, or `all`).
    #[serde(default = "default_orders_status")]
    pub status: String,
    /// Maximum number of orders to return.
    #[serde(default = "default_orders_limit")]
    pub limit: u32,
}

/// Arguments for `place_market_order`.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketOrderArgs {
    /// Stock ticker symbol (e.g. AAPL, MSFT).
    pub symbol: String,
    /// Order side (`buy` or `sell`).
    pub side: String,
    /// Number of shares to buy or sell.
    pub quantity: f64,
    /// Alpaca API key ID.
    pub api_key: String,
    /// Alpaca API secret key.
    pub api_secret: String,
    /// Use the paper trading environment.
    #[serde(default = "default_true")]
    pub paper: bool,
}

/// Arguments for `place_limit_order`.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitOrderArgs {
    /// Stock ticker symbol (e.g. AAPL, MSFT).
    pub symbol: String,
    /// Order side (`buy` or `sell`).
    pub side: String,
    /// Number of shares to buy or sell.
    pub quantity: f64,
    /// Limit price for the order.
    pub limit_price: f64,
    /// Alpaca API key ID.
    pub api_key: String,
    /// Alpaca API secret key.
    pub api_secret: String,
    /// Use the paper trading environment.
    #[serde(default = "default_true")]
    pub paper: bool,
}

/// Arguments for `close_all_positions`.
#[derive(Debug, Clone, Deserialize)]
pub struct CloseAllArgs {
    /// Alpaca API key ID.
    pub api_key: String,
    /// Alpaca API secret key.
    pub api_secret: String,
    /// Use the paper trading environment.
    #[serde(default = "default_true")]
    pub paper: bool,
    /// Cancel all open orders before closing positions.
    #[serde(default = "default_true")]
    pub cancel_orders: bool,
}

/// Build [`Credentials`] from a key/secret argument pair.
#[must_use]
pub fn credentials(api_key: &str, api_secret: &str) -> Credentials {
    Credentials::new(api_key.to_string(), api_secret.to_string())
}

/// Map the `paper` argument onto a [`TradingEnvironment`].
#[must_use]
pub const fn environment(paper: bool) -> TradingEnvironment {
    TradingEnvironment::from_paper_flag(paper)
}
