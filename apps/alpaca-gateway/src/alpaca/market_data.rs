//! Market-data handle: latest quotes and daily bars.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;

use super::api_types::{BarData, BarsResponse, LatestQuotesResponse, QuoteData};
use super::environment::{BackendUrls, Credentials};
use super::error::AlpacaError;
use super::http::ApiClient;

/// Latest quote for one symbol.
#[derive(Debug, Clone)]
pub struct Quote {
    /// Symbol the quote belongs to.
    pub symbol: String,
    /// Ask price.
    pub ask_price: Decimal,
    /// Bid price.
    pub bid_price: Decimal,
    /// Ask size.
    pub ask_size: u64,
    /// Bid size.
    pub bid_size: u64,
    /// Quote timestamp.
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    fn from_wire(symbol: String, data: QuoteData) -> Self {
        Self {
            symbol,
            ask_price: Decimal::try_from(data.ap).unwrap_or_default(),
            bid_price: Decimal::try_from(data.bp).unwrap_or_default(),
            ask_size: data.ask_size,
            bid_size: data.bs,
            timestamp: data.t,
        }
    }
}

/// One daily OHLCV bar.
#[derive(Debug, Clone)]
pub struct Bar {
    /// Trading day the bar covers.
    pub date: NaiveDate,
    /// Open price.
    pub open: Decimal,
    /// High price.
    pub high: Decimal,
    /// Low price.
    pub low: Decimal,
    /// Close price.
    pub close: Decimal,
    /// Volume.
    pub volume: u64,
}

impl Bar {
    fn from_wire(data: BarData) -> Self {
        Self {
            date: data.t.date_naive(),
            open: Decimal::try_from(data.o).unwrap_or_default(),
            high: Decimal::try_from(data.h).unwrap_or_default(),
            low: Decimal::try_from(data.l).unwrap_or_default(),
            close: Decimal::try_from(data.c).unwrap_or_default(),
            volume: data.v,
        }
    }
}

/// Credential-scoped handle to the Alpaca market data API.
///
/// Like [`super::TradingClient`], one is built per operation and dropped
/// when the operation completes.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    client: ApiClient,
}

impl MarketDataClient {
    /// Build a handle from one operation's credentials.
    ///
    /// # Errors
    ///
    /// Returns an error for empty credentials or an unconstructable
    /// HTTP client; no network I/O happens here.
    pub fn connect(
        credentials: &Credentials,
        urls: &BackendUrls,
        timeout: Duration,
    ) -> Result<Self, AlpacaError> {
        let client = ApiClient::new(credentials, urls.data(), timeout)?;
        Ok(Self { client })
    }

    /// Fetch the latest quote for a symbol.
    ///
    /// Returns `None` when the backend has no quote data for the symbol;
    /// that is an empty result, not an error.
    pub async fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>, AlpacaError> {
        let symbol = symbol.to_uppercase();
        let path = format!("/v2/stocks/quotes/latest?symbols={symbol}");
        let response: LatestQuotesResponse = self.client.get(&path).await?;

        Ok(response
            .quotes
            .unwrap_or_default()
            .remove(&symbol)
            .map(|data| Quote::from_wire(symbol, data)))
    }

    /// Fetch daily bars looking back `days` calendar days from now.
    ///
    /// Bars come back in the backend's chronological order; an unknown
    /// symbol yields an empty list.
    pub async fn daily_bars(&self, symbol: &str, days: i64) -> Result<Vec<Bar>, AlpacaError> {
        let symbol = symbol.to_uppercase();
        let start =
            (Utc::now() - chrono::Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true);
        let path = format!("/v2/stocks/bars?symbols={symbol}&timeframe=1Day&start={start}");

        tracing::debug!(symbol = %symbol, days, "Fetching daily bars");

        let response: BarsResponse = self.client.get(&path).await?;
        Ok(response
            .bars
            .unwrap_or_default()
            .remove(&symbol)
            .unwrap_or_default()
            .into_iter()
            .map(Bar::from_wire)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn quote_from_wire_converts_prices() {
        let data = QuoteData {
            t: "2026-08-07T19:59:59Z".parse().unwrap(),
            ap: 150.125,
            ask_size: 3,
            bp: 150.10,
            bs: 5,
        };
        let quote = Quote::from_wire("AAPL".to_string(), data);
        assert_eq!(quote.ask_price, dec!(150.125));
        assert_eq!(quote.bid_price, dec!(150.10));
        assert_eq!(quote.ask_size, 3);
        assert_eq!(quote.bid_size, 5);
    }

    #[test]
    fn bar_from_wire_keeps_trading_day() {
        let data = BarData {
            t: "2026-08-04T04:00:00Z".parse().unwrap(),
            o: 150.0,
            h: 152.5,
            l: 149.25,
            c: 151.75,
            v: 1_000_000,
        };
        let bar = Bar::from_wire(data);
        assert_eq!(bar.date.to_string(), "2026-08-04");
        assert_eq!(bar.open, dec!(150));
        assert_eq!(bar.close, dec!(151.75));
        assert_eq!(bar.volume, 1_000_000);
    }
}
