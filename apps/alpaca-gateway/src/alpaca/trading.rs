//! Trading-side handle: account, positions, and orders.
//!
//! A [`TradingClient`] is built fresh for every operation from the
//! credentials that operation received. Nothing here is cached or shared
//! across calls.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::api_types::{
    AccountResponse, CancelStatusResponse, OrderRequest, OrderResponse, PositionResponse,
};
use super::environment::{BackendUrls, Credentials, TradingEnvironment};
use super::error::AlpacaError;
use super::http::ApiClient;

// ============================================================================
// Caller-Facing Enums
// ============================================================================

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    /// Buy to open or increase a position.
    Buy,
    /// Sell to close or reduce a position.
    Sell,
}

impl OrderSide {
    /// Map a caller-supplied side, case-insensitive.
    ///
    /// Anything other than `buy` / `sell` is `None`; callers reject the
    /// value before any backend contact.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "buy" => Some(Self::Buy),
            "sell" => Some(Self::Sell),
            _ => None,
        }
    }

    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status filter for listing orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatusFilter {
    /// Open orders only.
    Open,
    /// Closed orders only.
    Closed,
    /// All orders.
    #[default]
    All,
}

impl OrderStatusFilter {
    /// Map a caller-supplied filter, case-insensitive.
    ///
    /// Anything other than `open` / `closed` maps to `All`.
    #[must_use]
    pub fn from_str_case_insensitive(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "open" => Self::Open,
            "closed" => Self::Closed,
            _ => Self::All,
        }
    }

    /// Wire representation for the orders query string.
    #[must_use]
    pub const fn as_query_value(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

// ============================================================================
// Domain Views
// ============================================================================

/// Account snapshot.
#[derive(Debug, Clone)]
pub struct Account {
    /// Account ID.
    pub id: String,
    /// Account status (e.g. `ACTIVE`).
    pub status: String,
    /// Account currency.
    pub currency: String,
    /// Buying power.
    pub buying_power: Decimal,
    /// Cash balance.
    pub cash: Decimal,
    /// Total portfolio value.
    pub portfolio_value: Decimal,
    /// Account equity.
    pub equity: Decimal,
    /// Long market value.
    pub long_market_value: Decimal,
    /// Short market value.
    pub short_market_value: Decimal,
    /// Pattern day trader flag.
    pub pattern_day_trader: bool,
    /// Day trade count, when the backend reports one.
    pub daytrade_count: Option<i32>,
}

impl Account {
    pub(crate) fn from_wire(response: AccountResponse) -> Self {
        Self {
            id: response.id,
            status: response.status,
            currency: response.currency,
            buying_power: parse_decimal(&response.buying_power),
            cash: parse_decimal(&response.cash),
            portfolio_value: parse_decimal(&response.portfolio_value),
            equity: parse_decimal(&response.equity),
            long_market_value: parse_decimal(&response.long_market_value),
            short_market_value: parse_decimal(&response.short_market_value),
            pattern_day_trader: response.pattern_day_trader.unwrap_or(false),
            daytrade_count: response.daytrade_count,
        }
    }
}

/// Open position snapshot.
#[derive(Debug, Clone)]
pub struct Position {
    /// Symbol.
    pub symbol: String,
    /// Quantity (signed; negative for short).
    pub qty: Decimal,
    /// Current market value.
    pub market_value: Decimal,
    /// Average entry price.
    pub avg_entry_price: Decimal,
    /// Current price.
    pub current_price: Decimal,
    /// Unrealized P/L in account currency.
    pub unrealized_pl: Decimal,
    /// Unrealized P/L as a fraction of cost basis.
    pub unrealized_plpc: Decimal,
}

impl Position {
    pub(crate) fn from_wire(response: PositionResponse) -> Self {
        Self {
            symbol: response.symbol,
            qty: parse_decimal(&response.qty),
            market_value: parse_decimal(&response.market_value),
            avg_entry_price: parse_decimal(&response.avg_entry_price),
            current_price: parse_decimal(&response.current_price),
            unrealized_pl: parse_decimal(&response.unrealized_pl),
            unrealized_plpc: parse_decimal(&response.unrealized_plpc),
        }
    }
}

/// Order snapshot, returned both by listings and by submissions.
#[derive(Debug, Clone)]
pub struct Order {
    /// Broker order ID.
    pub id: String,
    /// Symbol.
    pub symbol: String,
    /// Order type (`market` / `limit` / ...).
    pub order_type: String,
    /// Order side.
    pub side: String,
    /// Quantity.
    pub qty: Decimal,
    /// Order status.
    pub status: String,
    /// Time in force.
    pub time_in_force: String,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Fill timestamp, present once filled.
    pub filled_at: Option<DateTime<Utc>>,
    /// Average fill price, present once filled.
    pub filled_avg_price: Option<Decimal>,
    /// Limit price, limit orders only.
    pub limit_price: Option<Decimal>,
}

impl Order {
    pub(crate) fn from_wire(response: OrderResponse) -> Self {
        Self {
            id: response.id,
            symbol: response.symbol,
            order_type: response.order_type,
            side: response.side,
            qty: parse_decimal(&response.qty),
            status: response.status,
            time_in_force: response.time_in_force,
            submitted_at: response.submitted_at,
            filled_at: response.filled_at,
            filled_avg_price: response.filled_avg_price.as_deref().and_then(try_decimal),
            limit_price: response.limit_price.as_deref().and_then(try_decimal),
        }
    }
}

/// Result of canceling one open order.
#[derive(Debug, Clone)]
pub struct CancelStatus {
    /// Canceled order ID.
    pub order_id: String,
    /// HTTP status the cancellation resolved to.
    pub status: u16,
}

/// Parameters of a new order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Symbol to trade.
    pub symbol: String,
    /// Order side.
    pub side: OrderSide,
    /// Quantity of shares, strictly positive.
    pub qty: Decimal,
    /// Limit price; `None` makes this a market order.
    pub limit_price: Option<Decimal>,
}

impl NewOrder {
    /// Market order specification.
    #[must_use]
    pub fn market(symbol: impl Into<String>, side: OrderSide, qty: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            qty,
            limit_price: None,
        }
    }

    /// Limit order specification.
    #[must_use]
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        qty: Decimal,
        limit_price: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            qty,
            limit_price: Some(limit_price),
        }
    }

    /// Wire representation. All gateway orders expire at end of day.
    fn to_wire(&self) -> OrderRequest {
        OrderRequest {
            symbol: self.symbol.clone(),
            qty: self.qty.to_string(),
            side: self.side.as_str().to_string(),
            order_type: if self.limit_price.is_some() {
                "limit"
            } else {
                "market"
            }
            .to_string(),
            time_in_force: "day".to_string(),
            limit_price: self.limit_price.map(|p| p.to_string()),
        }
    }
}

fn parse_decimal(value: &str) -> Decimal {
    value.parse().unwrap_or(Decimal::ZERO)
}

fn try_decimal(value: &str) -> Option<Decimal> {
    value.parse().ok()
}

// ============================================================================
// Trading Client
// ============================================================================

/// Credential-scoped handle to the Alpaca trading API.
#[derive(Debug, Clone)]
pub struct TradingClient {
    client: ApiClient,
    environment: TradingEnvironment,
}

impl TradingClient {
    /// Build a handle from one operation's credentials.
    ///
    /// # Errors
    ///
    /// Returns an error for empty credentials or an unconstructable
    /// HTTP client; no network I/O happens here.
    pub fn connect(
        credentials: &Credentials,
        environment: TradingEnvironment,
        urls: &BackendUrls,
        timeout: Duration,
    ) -> Result<Self, AlpacaError> {
        let client = ApiClient::new(credentials, urls.trading(environment), timeout)?;
        Ok(Self {
            client,
            environment,
        })
    }

    /// Check if this handle targets live trading.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.environment.is_live()
    }

    /// Fetch the account snapshot.
    pub async fn get_account(&self) -> Result<Account, AlpacaError> {
        let response: AccountResponse = self.client.get("/v2/account").await?;
        Ok(Account::from_wire(response))
    }

    /// List all open positions.
    pub async fn list_positions(&self) -> Result<Vec<Position>, AlpacaError> {
        let responses: Vec<PositionResponse> = self.client.get("/v2/positions").await?;
        Ok(responses.into_iter().map(Position::from_wire).collect())
    }

    /// List orders matching a status filter, bounded by `limit`.
    pub async fn list_orders(
        &self,
        status: OrderStatusFilter,
        limit: u32,
    ) -> Result<Vec<Order>, AlpacaError> {
        let path = format!(
            "/v2/orders?status={}&limit={}",
            status.as_query_value(),
            limit
        );
        let responses: Vec<OrderResponse> = self.client.get(&path).await?;
        Ok(responses.into_iter().map(Order::from_wire).collect())
    }

    /// Submit a new order.
    pub async fn submit_order(&self, order: &NewOrder) -> Result<Order, AlpacaError> {
        if self.is_live() {
            tracing::warn!(
                symbol = %order.symbol,
                side = %order.side,
                "Submitting LIVE order - this will execute real trades"
            );
        }

        let request = order.to_wire();
        tracing::info!(
            symbol = %order.symbol,
            side = %order.side,
            order_type = %request.order_type,
            qty = %order.qty,
            limit_price = ?order.limit_price,
            "Submitting order"
        );

        let response: OrderResponse = self.client.post("/v2/orders", &request).await?;

        tracing::info!(
            order_id = %response.id,
            status = %response.status,
            "Order submitted"
        );

        Ok(Order::from_wire(response))
    }

    /// Cancel all open orders, returning the backend's per-order outcome.
    pub async fn cancel_all_orders(&self) -> Result<Vec<CancelStatus>, AlpacaError> {
        let responses: Vec<CancelStatusResponse> = self.client.delete("/v2/orders").await?;
        Ok(responses
            .into_iter()
            .map(|r| CancelStatus {
                order_id: r.id,
                status: r.status,
            })
            .collect())
    }

    /// Close all open positions, optionally canceling open orders first.
    pub async fn close_all_positions(&self, cancel_orders: bool) -> Result<(), AlpacaError> {
        let path = format!("/v2/positions?cancel_orders={cancel_orders}");
        let _: serde_json::Value = self.client.delete(&path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test_case("buy", Some(OrderSide::Buy); "lowercase buy")]
    #[test_case("BUY", Some(OrderSide::Buy); "uppercase buy")]
    #[test_case("Sell", Some(OrderSide::Sell); "mixed case sell")]
    #[test_case("hold", None; "unrecognized value")]
    #[test_case("", None; "empty value")]
    fn order_side_parsing(raw: &str, expected: Option<OrderSide>) {
        assert_eq!(OrderSide::parse(raw), expected);
    }

    #[test_case("open", OrderStatusFilter::Open; "open")]
    #[test_case("CLOSED", OrderStatusFilter::Closed; "uppercase closed")]
    #[test_case("all", OrderStatusFilter::All; "all")]
    #[test_case("pending", OrderStatusFilter::All; "unrecognized defaults to all")]
    fn status_filter_parsing(raw: &str, expected: OrderStatusFilter) {
        assert_eq!(OrderStatusFilter::from_str_case_insensitive(raw), expected);
    }

    #[test]
    fn market_order_to_wire() {
        let order = NewOrder::market("AAPL", OrderSide::Buy, dec!(10));
        let request = order.to_wire();
        assert_eq!(request.symbol, "AAPL");
        assert_eq!(request.qty, "10");
        assert_eq!(request.side, "buy");
        assert_eq!(request.order_type, "market");
        assert_eq!(request.time_in_force, "day");
        assert!(request.limit_price.is_none());
    }

    #[test]
    fn limit_order_to_wire() {
        let order = NewOrder::limit("GOOGL", OrderSide::Sell, dec!(50), dec!(150.5));
        let request = order.to_wire();
        assert_eq!(request.order_type, "limit");
        assert_eq!(request.limit_price, Some("150.5".to_string()));
    }

    #[test]
    fn account_from_wire_parses_balances() {
        let response = AccountResponse {
            id: "904837e3".to_string(),
            status: "ACTIVE".to_string(),
            currency: "USD".to_string(),
            buying_power: "262113.632".to_string(),
            cash: "100000".to_string(),
            portfolio_value: "103820.56".to_string(),
            equity: "103820.56".to_string(),
            long_market_value: "3820.56".to_string(),
            short_market_value: "0".to_string(),
            pattern_day_trader: None,
            daytrade_count: Some(2),
        };
        let account = Account::from_wire(response);
        assert_eq!(account.buying_power, dec!(262113.632));
        assert_eq!(account.cash, dec!(100000));
        assert!(!account.pattern_day_trader);
        assert_eq!(account.daytrade_count, Some(2));
    }

    #[test]
    fn order_from_wire_parses_optional_prices() {
        let response = OrderResponse {
            id: "o-1".to_string(),
            symbol: "AAPL".to_string(),
            qty: "10".to_string(),
            status: "filled".to_string(),
            side: "buy".to_string(),
            order_type: "limit".to_string(),
            time_in_force: "day".to_string(),
            submitted_at: "2026-08-07T14:30:00Z".parse().unwrap(),
            filled_at: Some("2026-08-07T14:30:01Z".parse().unwrap()),
            filled_avg_price: Some("150.25".to_string()),
            limit_price: Some("150.50".to_string()),
        };
        let order = Order::from_wire(response);
        assert_eq!(order.qty, dec!(10));
        assert_eq!(order.filled_avg_price, Some(dec!(150.25)));
        assert_eq!(order.limit_price, Some(dec!(150.50)));
    }

    #[test]
    fn malformed_decimal_falls_back_to_zero() {
        assert_eq!(parse_decimal("not-a-number"), Decimal::ZERO);
        assert_eq!(try_decimal("not-a-number"), None);
    }
}
