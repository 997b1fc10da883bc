//! Response formatting.
//!
//! Every operation's success output is rendered here: fixed field order,
//! fixed separator lines, and two-decimal money/percent values. The text
//! layout is part of the gateway's contract - callers parse nothing, but
//! they do rely on it staying stable.

use std::fmt::Write;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::alpaca::{Account, Bar, CancelStatus, Order, Position, Quote};

/// Render a monetary value as `$x.yz`.
///
/// Exactly two decimal places, round-half-to-even: `0.005` renders as
/// `$0.00`, `12.3456` as `$12.35`, `100` as `$100.00`.
#[must_use]
pub fn money(value: Decimal) -> String {
    format!("${:.2}", round2(value))
}

/// Render a plain numeric value with exactly two decimal places.
#[must_use]
pub fn two_decimals(value: Decimal) -> String {
    format!("{:.2}", round2(value))
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
    })
}

/// Account information block.
#[must_use]
pub fn account(account: &Account) -> String {
    let day_trades = account
        .daytrade_count
        .map_or_else(|| "Unknown".to_string(), |count| count.to_string());

    format!(
        "\nAccount Information:\n\
         -------------------\n\
         Account ID: {}\n\
         Status: {}\n\
         Currency: {}\n\
         Buying Power: {}\n\
         Cash: {}\n\
         Portfolio Value: {}\n\
         Equity: {}\n\
         Long Market Value: {}\n\
         Short Market Value: {}\n\
         Pattern Day Trader: {}\n\
         Day Trades Remaining: {}\n",
        account.id,
        account.status,
        account.currency,
        money(account.buying_power),
        money(account.cash),
        money(account.portfolio_value),
        money(account.equity),
        money(account.long_market_value),
        money(account.short_market_value),
        yes_no(account.pattern_day_trader),
        day_trades,
    )
}

/// Position list: header plus one block per position.
#[must_use]
pub fn positions(positions: &[Position]) -> String {
    let mut out = String::from("Current Positions:\n-------------------\n");
    for position in positions {
        let _ = write!(
            out,
            "\nSymbol: {}\n\
             Quantity: {} shares\n\
             Market Value: {}\n\
             Average Entry Price: {}\n\
             Current Price: {}\n\
             Unrealized P/L: {} ({}%)\n\
             -------------------\n",
            position.symbol,
            position.qty,
            money(position.market_value),
            money(position.avg_entry_price),
            money(position.current_price),
            money(position.unrealized_pl),
            two_decimals(position.unrealized_plpc * Decimal::ONE_HUNDRED),
        );
    }
    out
}

/// Latest quote block.
#[must_use]
pub fn quote(quote: &Quote) -> String {
    format!(
        "\nLatest Quote for {}:\n\
         ------------------------\n\
         Ask Price: {}\n\
         Bid Price: {}\n\
         Ask Size: {}\n\
         Bid Size: {}\n\
         Timestamp: {}\n",
        quote.symbol,
        money(quote.ask_price),
        money(quote.bid_price),
        quote.ask_size,
        quote.bid_size,
        quote.timestamp,
    )
}

/// Daily bar list: header plus one line per bar, in backend order.
#[must_use]
pub fn bars(symbol: &str, days: i64, bars: &[Bar]) -> String {
    let mut out = format!(
        "Historical Data for {symbol} (Last {days} trading days):\n\
         ---------------------------------------------------\n"
    );
    for bar in bars {
        let _ = writeln!(
            out,
            "Date: {}, Open: {}, High: {}, Low: {}, Close: {}, Volume: {}",
            bar.date,
            money(bar.open),
            money(bar.high),
            money(bar.low),
            money(bar.close),
            bar.volume,
        );
    }
    out
}

/// Order list: header plus one block per order.
///
/// `status_label` is the caller's raw filter value, capitalized for the
/// header only.
#[must_use]
pub fn orders(status_label: &str, orders: &[Order]) -> String {
    let mut out = format!(
        "{} Orders (Last {}):\n\
         -----------------------------------\n",
        capitalize(status_label),
        orders.len(),
    );
    for order in orders {
        let _ = write!(
            out,
            "\nSymbol: {}\n\
             ID: {}\n\
             Type: {}\n\
             Side: {}\n\
             Quantity: {}\n\
             Status: {}\n\
             Submitted At: {}\n",
            order.symbol,
            order.id,
            order.order_type,
            order.side,
            order.qty,
            order.status,
            order.submitted_at,
        );
        if let Some(filled_at) = order.filled_at {
            let _ = writeln!(out, "Filled At: {filled_at}");
        }
        if let Some(price) = order.filled_avg_price {
            let _ = writeln!(out, "Filled Price: {}", money(price));
        }
        out.push_str("-----------------------------------\n");
    }
    out
}

/// Market order confirmation block.
#[must_use]
pub fn market_order_confirmation(order: &Order) -> String {
    format!(
        "\nMarket Order Placed Successfully:\n\
         --------------------------------\n\
         Order ID: {}\n\
         Symbol: {}\n\
         Side: {}\n\
         Quantity: {}\n\
         Type: {}\n\
         Time In Force: {}\n\
         Status: {}\n",
        order.id,
        order.symbol,
        order.side,
        order.qty,
        order.order_type,
        order.time_in_force,
        order.status,
    )
}

/// Limit order confirmation block, including the limit price.
#[must_use]
pub fn limit_order_confirmation(order: &Order) -> String {
    format!(
        "\nLimit Order Placed Successfully:\n\
         -------------------------------\n\
         Order ID: {}\n\
         Symbol: {}\n\
         Side: {}\n\
         Quantity: {}\n\
         Type: {}\n\
         Limit Price: {}\n\
         Time In Force: {}\n\
         Status: {}\n",
        order.id,
        order.symbol,
        order.side,
        order.qty,
        order.order_type,
        money(order.limit_price.unwrap_or_default()),
        order.time_in_force,
        order.status,
    )
}

/// Cancel-all confirmation with the backend's per-order outcome.
#[must_use]
pub fn cancel_all(statuses: &[CancelStatus]) -> String {
    let rendered = statuses
        .iter()
        .map(|s| format!("{}: {}", s.order_id, s.status))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Successfully canceled all open orders. Status: [{rendered}]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn sample_account() -> Account {
        Account {
            id: "904837e3".to_string(),
            status: "ACTIVE".to_string(),
            currency: "USD".to_string(),
            buying_power: dec!(262113.632),
            cash: dec!(100000),
            portfolio_value: dec!(103820.56),
            equity: dec!(103820.56),
            long_market_value: dec!(3820.56),
            short_market_value: dec!(0),
            pattern_day_trader: false,
            daytrade_count: Some(2),
        }
    }

    fn sample_order() -> Order {
        Order {
            id: "o-1".to_string(),
            symbol: "AAPL".to_string(),
            order_type: "market".to_string(),
            side: "buy".to_string(),
            qty: dec!(10),
            status: "filled".to_string(),
            time_in_force: "day".to_string(),
            submitted_at: "2026-08-07T14:30:00Z".parse().unwrap(),
            filled_at: None,
            filled_avg_price: None,
            limit_price: None,
        }
    }

    #[test_case(dec!(100), "$100.00"; "integral value gains decimals")]
    #[test_case(dec!(12.3456), "$12.35"; "extra precision rounds")]
    #[test_case(dec!(0.005), "$0.00"; "midpoint rounds to even zero")]
    #[test_case(dec!(0.015), "$0.02"; "midpoint rounds to even two")]
    #[test_case(dec!(150.125), "$150.12"; "midpoint rounds down to even")]
    #[test_case(dec!(-50.255), "$-50.26"; "negative midpoint")]
    fn money_formatting(value: Decimal, expected: &str) {
        assert_eq!(money(value), expected);
    }

    #[test]
    fn two_decimals_formatting() {
        assert_eq!(two_decimals(dec!(8.5)), "8.50");
        assert_eq!(two_decimals(dec!(-0.125)), "-0.12");
    }

    #[test]
    fn capitalize_lowercases_tail() {
        assert_eq!(capitalize("closed"), "Closed");
        assert_eq!(capitalize("ALL"), "All");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn account_block_layout() {
        let text = account(&sample_account());
        assert!(text.starts_with("\nAccount Information:\n-------------------\n"));
        assert!(text.contains("Account ID: 904837e3\n"));
        assert!(text.contains("Buying Power: $262113.63\n"));
        assert!(text.contains("Cash: $100000.00\n"));
        assert!(text.contains("Pattern Day Trader: No\n"));
        assert!(text.contains("Day Trades Remaining: 2\n"));
    }

    #[test]
    fn account_block_unknown_day_trades() {
        let mut snapshot = sample_account();
        snapshot.daytrade_count = None;
        assert!(account(&snapshot).contains("Day Trades Remaining: Unknown\n"));
    }

    #[test]
    fn positions_block_converts_fraction_to_percent() {
        let position = Position {
            symbol: "AAPL".to_string(),
            qty: dec!(10),
            market_value: dec!(1517.50),
            avg_entry_price: dec!(150.00),
            current_price: dec!(151.75),
            unrealized_pl: dec!(17.50),
            unrealized_plpc: dec!(0.085),
        };
        let text = positions(&[position]);
        assert!(text.starts_with("Current Positions:\n-------------------\n"));
        assert!(text.contains("Quantity: 10 shares\n"));
        assert!(text.contains("Unrealized P/L: $17.50 (8.50%)\n"));
    }

    #[test]
    fn quote_block_layout() {
        let snapshot = Quote {
            symbol: "AAPL".to_string(),
            ask_price: dec!(150.125),
            bid_price: dec!(150.10),
            ask_size: 3,
            bid_size: 5,
            timestamp: "2026-08-07T19:59:59Z".parse().unwrap(),
        };
        let text = quote(&snapshot);
        assert!(text.starts_with("\nLatest Quote for AAPL:\n------------------------\n"));
        assert!(text.contains("Ask Price: $150.12\n"));
        assert!(text.contains("Bid Price: $150.10\n"));
        assert!(text.contains("Ask Size: 3\n"));
    }

    #[test]
    fn bars_lines_in_given_order() {
        let history = vec![
            Bar {
                date: "2026-08-04".parse().unwrap(),
                open: dec!(150),
                high: dec!(152.5),
                low: dec!(149.25),
                close: dec!(151.75),
                volume: 1_000_000,
            },
            Bar {
                date: "2026-08-05".parse().unwrap(),
                open: dec!(151.80),
                high: dec!(153),
                low: dec!(151),
                close: dec!(152.40),
                volume: 900_000,
            },
        ];
        let text = bars("AAPL", 5, &history);
        assert!(text.starts_with("Historical Data for AAPL (Last 5 trading days):\n"));
        let first = text.find("Date: 2026-08-04").unwrap();
        let second = text.find("Date: 2026-08-05").unwrap();
        assert!(first < second);
        assert!(text.contains("Open: $150.00, High: $152.50, Low: $149.25, Close: $151.75, Volume: 1000000\n"));
    }

    #[test]
    fn orders_block_skips_absent_fill_fields() {
        let text = orders("all", &[sample_order()]);
        assert!(text.starts_with("All Orders (Last 1):\n"));
        assert!(!text.contains("Filled At:"));
        assert!(!text.contains("Filled Price:"));
    }

    #[test]
    fn orders_block_includes_fill_fields_when_present() {
        let mut order = sample_order();
        order.filled_at = Some("2026-08-07T14:30:01Z".parse().unwrap());
        order.filled_avg_price = Some(dec!(150.25));
        let text = orders("closed", &[order]);
        assert!(text.starts_with("Closed Orders (Last 1):\n"));
        assert!(text.contains("Filled Price: $150.25\n"));
    }

    #[test]
    fn market_confirmation_layout() {
        let text = market_order_confirmation(&sample_order());
        assert!(text.starts_with("\nMarket Order Placed Successfully:\n"));
        assert!(text.contains("Order ID: o-1\n"));
        assert!(text.contains("Time In Force: day\n"));
        assert!(!text.contains("Limit Price:"));
    }

    #[test]
    fn limit_confirmation_includes_price() {
        let mut order = sample_order();
        order.order_type = "limit".to_string();
        order.limit_price = Some(dec!(150.5));
        let text = limit_order_confirmation(&order);
        assert!(text.starts_with("\nLimit Order Placed Successfully:\n"));
        assert!(text.contains("Limit Price: $150.50\n"));
    }

    #[test]
    fn cancel_all_renders_status_list() {
        let statuses = vec![
            CancelStatus {
                order_id: "abc".to_string(),
                status: 200,
            },
            CancelStatus {
                order_id: "def".to_string(),
                status: 200,
            },
        ];
        assert_eq!(
            cancel_all(&statuses),
            "Successfully canceled all open orders. Status: [abc: 200, def: 200]"
        );
        assert_eq!(
            cancel_all(&[]),
            "Successfully canceled all open orders. Status: []"
        );
    }
}
