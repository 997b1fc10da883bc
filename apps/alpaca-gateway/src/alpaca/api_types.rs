//! Alpaca REST API request and response types.
//!
//! These types map directly to Alpaca's wire format. Monetary fields on
//! the trading API are strings; the market data API uses raw numbers.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Request Types
// ============================================================================

/// Order submission body for `POST /v2/orders`.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    /// Stock symbol.
    pub symbol: String,
    /// Quantity (shares), serialized as a string.
    pub qty: String,
    /// Order side (`buy` / `sell`).
    pub side: String,
    /// Order type (`market` / `limit`).
    #[serde(rename = "type")]
    pub order_type: String,
    /// Time in force.
    pub time_in_force: String,
    /// Limit price (limit orders only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<String>,
}

// ============================================================================
// Trading API Response Types
// ============================================================================

/// Order response from the trading API.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponse {
    /// Broker order ID.
    pub id: String,
    /// Symbol.
    pub symbol: String,
    /// Quantity (as string).
    pub qty: String,
    /// Order status.
    pub status: String,
    /// Order side.
    pub side: String,
    /// Order type.
    #[serde(rename = "type")]
    pub order_type: String,
    /// Time in force.
    pub time_in_force: String,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Fill timestamp, present once filled.
    #[serde(default)]
    pub filled_at: Option<DateTime<Utc>>,
    /// Average fill price (as string), present once filled.
    #[serde(default)]
    pub filled_avg_price: Option<String>,
    /// Limit price (as string), limit orders only.
    #[serde(default)]
    pub limit_price: Option<String>,
}

/// Account response from `GET /v2/account`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: String,
    /// Account status (e.g. `ACTIVE`).
    pub status: String,
    /// Account currency.
    pub currency: String,
    /// Buying power.
    pub buying_power: String,
    /// Cash balance.
    pub cash: String,
    /// Total portfolio value.
    pub portfolio_value: String,
    /// Account equity.
    pub equity: String,
    /// Long market value.
    pub long_market_value: String,
    /// Short market value.
    pub short_market_value: String,
    /// Pattern day trader flag.
    #[serde(default)]
    pub pattern_day_trader: Option<bool>,
    /// Day trade count.
    #[serde(default)]
    pub daytrade_count: Option<i32>,
}

/// Position response from `GET /v2/positions`.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionResponse {
    /// Symbol.
    pub symbol: String,
    /// Quantity (signed; negative for short).
    pub qty: String,
    /// Current market value.
    pub market_value: String,
    /// Average entry price.
    pub avg_entry_price: String,
    /// Current price.
    pub current_price: String,
    /// Unrealized P/L in account currency.
    pub unrealized_pl: String,
    /// Unrealized P/L as a fraction of cost basis.
    pub unrealized_plpc: String,
}

/// Per-order result of `DELETE /v2/orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelStatusResponse {
    /// Canceled order ID.
    pub id: String,
    /// HTTP status the cancellation resolved to.
    pub status: u16,
}

/// Error payload returned by both Alpaca APIs.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Numeric Alpaca error code.
    #[serde(default)]
    pub code: Option<i64>,
    /// Error message.
    pub message: String,
}

// ============================================================================
// Market Data API Response Types
// ============================================================================

/// Response from `GET /v2/stocks/quotes/latest`.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestQuotesResponse {
    /// Map of symbol to latest quote. Symbols without data are absent.
    #[serde(default)]
    pub quotes: Option<HashMap<String, QuoteData>>,
}

/// Latest quote for one symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteData {
    /// Quote timestamp.
    pub t: DateTime<Utc>,
    /// Ask price.
    pub ap: f64,
    /// Ask size.
    #[serde(rename = "as")]
    pub ask_size: u64,
    /// Bid price.
    pub bp: f64,
    /// Bid size.
    pub bs: u64,
}

/// Response from `GET /v2/stocks/bars`.
#[derive(Debug, Clone, Deserialize)]
pub struct BarsResponse {
    /// Map of symbol to chronological bars. Symbols without data are absent.
    #[serde(default)]
    pub bars: Option<HashMap<String, Vec<BarData>>>,
    /// Pagination token (unused; the gateway fetches a single page).
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Single OHLCV bar.
#[derive(Debug, Clone, Deserialize)]
pub struct BarData {
    /// Bar timestamp (start of the trading day for daily bars).
    pub t: DateTime<Utc>,
    /// Open price.
    pub o: f64,
    /// High price.
    pub h: f64,
    /// Low price.
    pub l: f64,
    /// Close price.
    pub c: f64,
    /// Volume.
    pub v: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_quote_with_renamed_ask_size() {
        let json = r#"{"t":"2026-08-07T19:59:59.731123Z","ap":150.125,"as":3,"bp":150.1,"bs":5}"#;
        let quote: QuoteData = serde_json::from_str(json).unwrap();
        assert_eq!(quote.ask_size, 3);
        assert_eq!(quote.bs, 5);
        assert!((quote.ap - 150.125).abs() < f64::EPSILON);
    }

    #[test]
    fn deserialize_order_without_fill_fields() {
        let json = r#"{
            "id": "61e69015-8549-4bfd-b9c3-01e75843f47d",
            "symbol": "AAPL",
            "qty": "10",
            "status": "new",
            "side": "buy",
            "type": "market",
            "time_in_force": "day",
            "submitted_at": "2026-08-07T14:30:00Z"
        }"#;
        let order: OrderResponse = serde_json::from_str(json).unwrap();
        assert!(order.filled_at.is_none());
        assert!(order.filled_avg_price.is_none());
        assert!(order.limit_price.is_none());
    }

    #[test]
    fn deserialize_account_without_daytrade_count() {
        let json = r#"{
            "id": "904837e3",
            "status": "ACTIVE",
            "currency": "USD",
            "buying_power": "262113.632",
            "cash": "100000",
            "portfolio_value": "103820.56",
            "equity": "103820.56",
            "long_market_value": "3820.56",
            "short_market_value": "0"
        }"#;
        let account: AccountResponse = serde_json::from_str(json).unwrap();
        assert!(account.daytrade_count.is_none());
        assert!(account.pattern_day_trader.is_none());
    }

    #[test]
    fn deserialize_empty_quotes_map() {
        let response: LatestQuotesResponse = serde_json::from_str(r#"{"quotes":{}}"#).unwrap();
        assert!(response.quotes.unwrap().is_empty());

        let response: LatestQuotesResponse = serde_json::from_str(r#"{"quotes":null}"#).unwrap();
        assert!(response.quotes.is_none());
    }

    #[test]
    fn deserialize_bars_keyed_by_symbol() {
        let json = r#"{
            "bars": {
                "AAPL": [
                    {"t":"2026-08-04T04:00:00Z","o":150.0,"h":152.5,"l":149.25,"c":151.75,"v":1000000}
                ]
            },
            "next_page_token": null
        }"#;
        let response: BarsResponse = serde_json::from_str(json).unwrap();
        let bars = &response.bars.unwrap()["AAPL"];
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].v, 1_000_000);
    }

    #[test]
    fn deserialize_cancel_status() {
        let statuses: Vec<CancelStatusResponse> =
            serde_json::from_str(r#"[{"id":"abc123","status":200}]"#).unwrap();
        assert_eq!(statuses[0].id, "abc123");
        assert_eq!(statuses[0].status, 200);
    }

    #[test]
    fn deserialize_numeric_error_code() {
        let error: ApiErrorResponse =
            serde_json::from_str(r#"{"code":40410000,"message":"order not found"}"#).unwrap();
        assert_eq!(error.code, Some(40_410_000));
        assert_eq!(error.message, "order not found");
    }

    #[test]
    fn serialize_order_request_skips_absent_limit_price() {
        let request = OrderRequest {
            symbol: "AAPL".to_string(),
            qty: "10".to_string(),
            side: "buy".to_string(),
            order_type: "market".to_string(),
            time_in_force: "day".to_string(),
            limit_price: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("limit_price"));
        assert!(json.contains(r#""type":"market""#));
    }
}
