//! Alpaca Tool Gateway Binary
//!
//! Starts the tool-call gateway.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p alpaca-gateway
//! ```
//!
//! # Environment Variables
//!
//! All optional:
//! - `ALPACA_KEY` / `ALPACA_SECRET`: process credentials, used only for a
//!   startup construction check - operations always use the credentials
//!   they are called with
//! - `GATEWAY_ENV`: PAPER | LIVE (default: PAPER)
//! - `GATEWAY_PORT`: HTTP port (default: 8081)
//! - `GATEWAY_HTTP_TIMEOUT_SECS`: backend request timeout (default: 30)
//! - `ALPACA_TRADING_URL` / `ALPACA_DATA_URL`: backend base-URL overrides
//! - `RUST_LOG`: log level (default: info)

use std::sync::Arc;

use alpaca_gateway::{
    GatewayConfig, GatewayServer, MarketDataClient, ToolRouter, TradingClient, telemetry,
};
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    telemetry::init();

    tracing::info!("Starting Alpaca tool gateway");

    let config = GatewayConfig::from_env();
    log_config(&config);
    startup_credentials_check(&config);

    let shutdown_token = CancellationToken::new();

    let tools = Arc::new(ToolRouter::new(config.urls.clone()).with_timeout(config.request_timeout));
    let server = GatewayServer::new(config.port, tools, shutdown_token.clone());

    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        await_shutdown(signal_token).await;
    });

    server.run().await?;

    tracing::info!("Gateway shut down");
    Ok(())
}

/// Log the parsed configuration. Credentials are reported only by presence.
fn log_config(config: &GatewayConfig) {
    tracing::info!(
        environment = config.environment.as_str(),
        port = config.port,
        timeout_secs = config.request_timeout.as_secs(),
        process_credentials = config.credentials.is_some(),
        "Configuration loaded"
    );
}

/// Construct backend handles once from process credentials.
///
/// This is a startup configuration check and nothing more: the handles
/// are dropped immediately, and no operation ever uses process
/// credentials - each call builds its own handles from its own arguments.
fn startup_credentials_check(config: &GatewayConfig) {
    let Some(credentials) = &config.credentials else {
        tracing::info!("No process credentials configured; tool calls must supply their own");
        return;
    };

    let trading = TradingClient::connect(
        credentials,
        config.environment,
        &config.urls,
        config.request_timeout,
    );
    let data = MarketDataClient::connect(credentials, &config.urls, config.request_timeout);

    match (trading, data) {
        (Ok(_), Ok(_)) => {
            tracing::info!(environment = %config.environment, "Startup credential check passed");
        }
        (Err(error), _) | (_, Err(error)) => {
            tracing::warn!(error = %error, "Startup credential check failed");
        }
    }
}

/// Load `.env` from the current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for a shutdown signal (SIGTERM or SIGINT), then cancel.
#[allow(clippy::expect_used)]
async fn await_shutdown(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    shutdown_token.cancel();
}
