//! The operation dispatch table.
//!
//! Every tool follows one shape: map and validate inputs, build a fresh
//! credential-scoped backend handle, make exactly one backend call, and
//! render the result as text. Any failure along that path is caught at
//! the operation boundary and rendered as `"Error <description>:
//! <message>"` - a tool call never raises, because the caller has no
//! other error channel.
//!
//! Operations are stateless and independent; concurrent calls share
//! nothing but this router's configuration.

pub mod args;
pub mod render;

use std::future::Future;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::alpaca::{
    BackendUrls, MarketDataClient, NewOrder, OrderSide, OrderStatusFilter, TradingClient,
};
use crate::error::ToolError;
use args::{
    AccountArgs, BarsArgs, CloseAllArgs, LimitOrderArgs, MarketOrderArgs, OrdersArgs, QuoteArgs,
};

/// Default per-request timeout for backend calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Summary of one dispatchable tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Tool name, as dispatched.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// The dispatch table: one entry point per brokerage operation.
#[derive(Debug, Clone)]
pub struct ToolRouter {
    urls: BackendUrls,
    timeout: Duration,
}

impl ToolRouter {
    /// Create a router resolving backend calls against `urls`.
    #[must_use]
    pub const fn new(urls: BackendUrls) -> Self {
        Self {
            urls,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request backend timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enumerate the dispatch table.
    #[must_use]
    pub fn tool_definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: "get_account_info",
                description: "Get the current account information including balances and status.",
            },
            ToolDefinition {
                name: "get_positions",
                description: "Get all current positions in the portfolio.",
            },
            ToolDefinition {
                name: "get_stock_quote",
                description: "Get the latest quote for a stock.",
            },
            ToolDefinition {
                name: "get_stock_bars",
                description: "Get historical price bars for a stock.",
            },
            ToolDefinition {
                name: "get_orders",
                description: "Get orders with the specified status.",
            },
            ToolDefinition {
                name: "place_market_order",
                description: "Place a market order.",
            },
            ToolDefinition {
                name: "place_limit_order",
                description: "Place a limit order.",
            },
            ToolDefinition {
                name: "cancel_all_orders",
                description: "Cancel all open orders.",
            },
            ToolDefinition {
                name: "close_all_positions",
                description: "Close all open positions.",
            },
        ]
    }

    /// Dispatch a named tool call with JSON arguments.
    ///
    /// Always returns text. Unknown names and malformed arguments are
    /// reported in-band, in the same error shape the operations use.
    pub async fn dispatch(&self, name: &str, arguments: Value) -> String {
        match name {
            "get_account_info" => match serde_json::from_value(arguments) {
                Ok(args) => self.get_account_info(args).await,
                Err(e) => invalid_arguments("getting account info", &e),
            },
            "get_positions" => match serde_json::from_value(arguments) {
                Ok(args) => self.get_positions(args).await,
                Err(e) => invalid_arguments("getting positions", &e),
            },
            "get_stock_quote" => match serde_json::from_value(arguments) {
                Ok(args) => self.get_stock_quote(args).await,
                Err(e) => invalid_arguments("fetching quote", &e),
            },
            "get_stock_bars" => match serde_json::from_value(arguments) {
                Ok(args) => self.get_stock_bars(args).await,
                Err(e) => invalid_arguments("fetching historical data", &e),
            },
            "get_orders" => match serde_json::from_value(arguments) {
                Ok(args) => self.get_orders(args).await,
                Err(e) => invalid_arguments("fetching orders", &e),
            },
            "place_market_order" => match serde_json::from_value(arguments) {
                Ok(args) => self.place_market_order(args).await,
                Err(e) => invalid_arguments("placing market order", &e),
            },
            "place_limit_order" => match serde_json::from_value(arguments) {
                Ok(args) => self.place_limit_order(args).await,
                Err(e) => invalid_arguments("placing limit order", &e),
            },
            "cancel_all_orders" => match serde_json::from_value(arguments) {
                Ok(args) => self.cancel_all_orders(args).await,
                Err(e) => invalid_arguments("canceling orders", &e),
            },
            "close_all_positions" => match serde_json::from_value(arguments) {
                Ok(args) => self.close_all_positions(args).await,
                Err(e) => invalid_arguments("closing positions", &e),
            },
            _ => format!("Error dispatching tool call: unknown tool '{name}'"),
        }
    }

    /// Current account balances and status.
    pub async fn get_account_info(&self, arguments: AccountArgs) -> String {
        normalized("getting account info", async {
            let trading =
                self.trading_handle(&arguments.api_key, &arguments.api_secret, arguments.paper)?;
            let account = trading.get_account().await?;
            Ok(render::account(&account))
        })
        .await
    }

    /// All open positions, or a fixed sentence when there are none.
    pub async fn get_positions(&self, arguments: AccountArgs) -> String {
        normalized("getting positions", async {
            let trading =
                self.trading_handle(&arguments.api_key, &arguments.api_secret, arguments.paper)?;
            let positions = trading.list_positions().await?;
            if positions.is_empty() {
                return Ok("No open positions found.".to_string());
            }
            Ok(render::positions(&positions))
        })
        .await
    }

    /// Latest quote for a symbol.
    pub async fn get_stock_quote(&self, arguments: QuoteArgs) -> String {
        let description = format!("fetching quote for {}", arguments.symbol);
        normalized(&description, async {
            let data = self.data_handle(&arguments.api_key, &arguments.api_secret)?;
            match data.latest_quote(&arguments.symbol).await? {
                Some(quote) => Ok(render::quote(&quote)),
                None => Ok(format!("No quote data found for {}.", arguments.symbol)),
            }
        })
        .await
    }

    /// Daily bars for a symbol over a trailing window.
    pub async fn get_stock_bars(&self, arguments: BarsArgs) -> String {
        let description = format!("fetching historical data for {}", arguments.symbol);
        normalized(&description, async {
            let data = self.data_handle(&arguments.api_key, &arguments.api_secret)?;
            let bars = data.daily_bars(&arguments.symbol, arguments.days).await?;
            if bars.is_empty() {
                return Ok(format!(
                    "No historical data found for {} in the last {} days.",
                    arguments.symbol, arguments.days
                ));
            }
            Ok(render::bars(&arguments.symbol, arguments.days, &bars))
        })
        .await
    }

    /// Orders filtered by status, newest first as the backend returns them.
    pub async fn get_orders(&self, arguments: OrdersArgs) -> String {
        normalized("fetching orders", async {
            let status = OrderStatusFilter::from_str_case_insensitive(&arguments.status);
            let trading =
                self.trading_handle(&arguments.api_key, &arguments.api_secret, arguments.paper)?;
            let orders = trading.list_orders(status, arguments.limit).await?;
            if orders.is_empty() {
                return Ok(format!("No {} orders found.", arguments.status));
            }
            Ok(render::orders(&arguments.status, &orders))
        })
        .await
    }

    /// Place a market order with day time-in-force.
    ///
    /// The side is validated before anything else; an unrecognized value
    /// is answered directly, without contacting the backend.
    pub async fn place_market_order(&self, arguments: MarketOrderArgs) -> String {
        let Some(side) = OrderSide::parse(&arguments.side) else {
            return invalid_side(&arguments.side);
        };

        normalized("placing market order", async {
            let qty = positive_quantity(arguments.quantity)?;
            let trading =
                self.trading_handle(&arguments.api_key, &arguments.api_secret, arguments.paper)?;
            let order = trading
                .submit_order(&NewOrder::market(&arguments.symbol, side, qty))
                .await?;
            Ok(render::market_order_confirmation(&order))
        })
        .await
    }

    /// Place a limit order with day time-in-force.
    pub async fn place_limit_order(&self, arguments: LimitOrderArgs) -> String {
        let Some(side) = OrderSide::parse(&arguments.side) else {
            return invalid_side(&arguments.side);
        };

        normalized("placing limit order", async {
            let qty = positive_quantity(arguments.quantity)?;
            let limit_price = positive_price(arguments.limit_price)?;
            let trading =
                self.trading_handle(&arguments.api_key, &arguments.api_secret, arguments.paper)?;
            let order = trading
                .submit_order(&NewOrder::limit(&arguments.symbol, side, qty, limit_price))
                .await?;
            Ok(render::limit_order_confirmation(&order))
        })
        .await
    }

    /// Cancel all open orders.
    pub async fn cancel_all_orders(&self, arguments: AccountArgs) -> String {
        normalized("canceling orders", async {
            let trading =
                self.trading_handle(&arguments.api_key, &arguments.api_secret, arguments.paper)?;
            let statuses = trading.cancel_all_orders().await?;
            Ok(render::cancel_all(&statuses))
        })
        .await
    }

    /// Close all open positions, optionally canceling open orders first.
    pub async fn close_all_positions(&self, arguments: CloseAllArgs) -> String {
        normalized("closing positions", async {
            let trading =
                self.trading_handle(&arguments.api_key, &arguments.api_secret, arguments.paper)?;
            trading.close_all_positions(arguments.cancel_orders).await?;
            Ok("Successfully closed all positions.".to_string())
        })
        .await
    }

    fn trading_handle(
        &self,
        api_key: &str,
        api_secret: &str,
        paper: bool,
    ) -> Result<TradingClient, ToolError> {
        let credentials = args::credentials(api_key, api_secret);
        let environment = args::environment(paper);
        TradingClient::connect(&credentials, environment, &self.urls, self.timeout)
            .map_err(ToolError::from)
    }

    fn data_handle(&self, api_key: &str, api_secret: &str) -> Result<MarketDataClient, ToolError> {
        let credentials = args::credentials(api_key, api_secret);
        MarketDataClient::connect(&credentials, &self.urls, self.timeout).map_err(ToolError::from)
    }
}

/// Run one operation body, converting any failure to the uniform error
/// text. This is the only place operation failures become caller-visible.
async fn normalized<F>(description: &str, operation: F) -> String
where
    F: Future<Output = Result<String, ToolError>>,
{
    match operation.await {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(operation = description, error = %error, "Tool operation failed");
            format!("Error {description}: {error}")
        }
    }
}

fn invalid_arguments(description: &str, error: &serde_json::Error) -> String {
    format!("Error {description}: invalid arguments: {error}")
}

fn invalid_side(side: &str) -> String {
    format!("Invalid order side: {side}. Must be 'buy' or 'sell'.")
}

fn positive_quantity(quantity: f64) -> Result<Decimal, ToolError> {
    if quantity.is_nan() || quantity <= 0.0 {
        return Err(ToolError::InvalidArgument(
            "quantity must be a positive number".to_string(),
        ));
    }
    Decimal::try_from(quantity)
        .map_err(|_| ToolError::InvalidArgument("quantity must be a finite number".to_string()))
}

fn positive_price(price: f64) -> Result<Decimal, ToolError> {
    if price.is_nan() || price <= 0.0 {
        return Err(ToolError::InvalidArgument(
            "limit price must be a positive number".to_string(),
        ));
    }
    Decimal::try_from(price)
        .map_err(|_| ToolError::InvalidArgument("limit price must be a finite number".to_string()))
}
