//! Mining profitability projection

use serde::Serialize;

use crate::constants::SECS_PER_DAY;
use crate::duration::format_duration;

/// One label/value display row. Consumers align on row order, not on
/// structured field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

impl ReportRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Payout and running-cost projection for one block-finding rate.
///
/// Row order is fixed: block time, payout/day, then price and fiat
/// payout when a price is known, then payout/cost ratio and net profit
/// when the power draw and electricity price are both known. Missing
/// inputs shrink the report; they are never an error.
///
/// `price` runs at most once, and only when `fiat_hint` is not a
/// usable price (a zero or negative hint means "not supplied").
pub fn profit(
    block_time: f64,
    reward: f64,
    ticker: &str,
    watts: f64,
    kwh_price: f64,
    fiat_hint: f64,
    base_currency: &str,
    price: impl FnOnce() -> f64,
) -> Vec<ReportRow> {
    let mut rows = Vec::new();

    let (value, unit) = format_duration(block_time);
    rows.push(ReportRow::new(
        "Average time between blocks",
        format!("{value} {unit}"),
    ));

    let coins_per_day = reward / block_time * SECS_PER_DAY;
    rows.push(ReportRow::new(
        "Average payout",
        format!("{coins_per_day} {ticker}/day"),
    ));

    let fiat_price = if fiat_hint > 0.0 { fiat_hint } else { price() };
    if fiat_price <= 0.0 {
        return rows;
    }

    let fiat_per_day = coins_per_day * fiat_price;
    rows.push(ReportRow::new(
        format!("1 {ticker}"),
        format!("{fiat_price} {base_currency}"),
    ));
    rows.push(ReportRow::new(
        "Fiat payout",
        format!("{fiat_per_day} {base_currency}/day"),
    ));

    if watts > 0.0 && kwh_price > 0.0 {
        let daily_cost = kwh_price * watts / 1_000.0 * 24.0;
        let ratio = fiat_per_day / daily_cost;
        let tag = if ratio > 2.0 {
            "great"
        } else if ratio > 1.0 {
            "good"
        } else {
            "poor"
        };
        rows.push(ReportRow::new("Payout/cost", format!("{ratio} {tag}")));
        rows.push(ReportRow::new(
            "Net profit",
            format!("{} {base_currency}/day", fiat_per_day - daily_cost),
        ));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stubbed_price_fills_fiat_rows() {
        let rows = profit(600.0, 6.25, "BTC", 0.0, 0.0, 0.0, "EUR", || 30_000.0);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].label, "Average time between blocks");
        assert_eq!(rows[0].value, "10 min");
        assert_eq!(rows[1].value, "900 BTC/day");
        assert_eq!(rows[2].label, "1 BTC");
        assert_eq!(rows[3].value, "27000000 EUR/day");
    }

    #[test]
    fn positive_hint_skips_the_lookup() {
        let rows = profit(600.0, 6.25, "BTC", 0.0, 0.0, 25_000.0, "EUR", || {
            panic!("price must not be fetched when a hint is supplied")
        });
        assert_eq!(rows[2].value, "25000 EUR");
    }

    #[test]
    fn no_price_means_coin_rows_only() {
        let rows = profit(600.0, 6.25, "BTC", 800.0, 0.25, 0.0, "EUR", || 0.0);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn cost_rows_need_both_watts_and_price() {
        let rows = profit(600.0, 6.25, "BTC", 800.0, 0.0, 100.0, "EUR", || unreachable!());
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn ratio_tags() {
        // 900 coins/day at 1 EUR; 1000 W at 0.025 EUR/kWh -> 0.6 EUR/day cost.
        let rows = profit(600.0, 6.25, "BTC", 1_000.0, 0.025, 1.0, "EUR", || unreachable!());
        assert_eq!(rows.len(), 6);
        assert!(rows[4].value.ends_with("great"));
        assert_eq!(rows[5].label, "Net profit");

        // Payout below cost tags poor.
        let rows = profit(600.0, 6.25, "BTC", 1_000.0, 100.0, 1.0, "EUR", || unreachable!());
        assert!(rows[4].value.ends_with("poor"));

        // Between 1x and 2x tags good. 900 EUR/day payout, 600 EUR/day cost.
        let rows = profit(600.0, 6.25, "BTC", 1_000.0, 25.0, 1.0, "EUR", || unreachable!());
        assert!(rows[4].value.ends_with("good"));
    }
}
