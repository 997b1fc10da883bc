//! Alpaca backend capability.
//!
//! Two credential-scoped handles cover everything the gateway needs:
//! [`TradingClient`] for accounts, positions, and orders, and
//! [`MarketDataClient`] for quotes and bars. Handles are built fresh for
//! every operation from that operation's own credentials - there is no
//! process-wide connection, no pooling, and no caching.

mod api_types;
mod environment;
mod error;
mod http;
mod market_data;
mod trading;

pub use environment::{BackendUrls, Credentials, TradingEnvironment};
pub use error::AlpacaError;
pub use market_data::{Bar, MarketDataClient, Quote};
pub use trading::{
    Account, CancelStatus, NewOrder, Order, OrderSide, OrderStatusFilter, Position, TradingClient,
};
