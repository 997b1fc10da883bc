#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::default_trait_access
    )
)]

//! Alpaca Tool Gateway
//!
//! Exposes an Alpaca brokerage account's trading and market-data
//! operations as a fixed set of named tools. Every tool call carries its
//! own credentials, builds a fresh backend handle, makes exactly one
//! backend round trip, and returns a human-readable text result.
//!
//! # Layers (inside -> outside)
//!
//! - **Backend capability** (`alpaca`): credential-scoped handles for the
//!   trading API (accounts, positions, orders) and the market data API
//!   (quotes, bars), over a single-attempt authenticated HTTP client.
//!
//! - **Dispatch** (`tools`): the operation table. Input mapping, handle
//!   construction, one backend call, text rendering - with every failure
//!   caught at the operation boundary and rendered as
//!   `"Error <description>: <message>"`.
//!
//! - **Transport** (`server`): axum HTTP surface invoking the dispatch
//!   table by tool name.
//!
//! # Data Flow
//!
//! ```text
//! caller arguments ──► enum mapping ──► fresh credential-scoped handle
//!     ──► one backend call ──► text rendering ──► text result
//!
//! (normalizer wraps the whole path: any failure becomes "Error ...: ..." text)
//! ```
//!
//! Operations are stateless and independent: no handle outlives its call,
//! no response is cached, and concurrent calls share nothing.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Backend capability - Alpaca trading and market data handles.
pub mod alpaca;

/// Gateway configuration from environment variables.
pub mod config;

/// Unified operation error.
pub mod error;

/// HTTP transport exposing the dispatch table.
pub mod server;

/// Tracing setup.
pub mod telemetry;

/// The operation dispatch table.
pub mod tools;

pub use alpaca::{
    Account, AlpacaError, BackendUrls, Bar, CancelStatus, Credentials, MarketDataClient, NewOrder,
    Order, OrderSide, OrderStatusFilter, Position, Quote, TradingClient, TradingEnvironment,
};
pub use config::GatewayConfig;
pub use error::ToolError;
pub use server::{GatewayServer, ServerError, create_router};
pub use tools::{ToolDefinition, ToolRouter};
