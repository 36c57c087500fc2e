//! Fiat price lookup
//!
//! An ordered list of quote providers, tried sequentially: the first
//! answer wins and the remaining providers stay untried. Total failure
//! is 0.0, never an error; the report just loses its fiat rows.

use std::time::Duration;

use log::debug;
use serde_json::Value;

use crate::error::Result;

const PRICE_TIMEOUT: Duration = Duration::from_secs(5);

/// Quote providers in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Provider {
    CoinGecko,
    CryptoCompare,
    Cryptonator,
}

const PROVIDERS: [Provider; 3] = [
    Provider::CoinGecko,
    Provider::CryptoCompare,
    Provider::Cryptonator,
];

impl Provider {
    fn quote_url(&self, coin: &str, ticker: &str, base: &str) -> String {
        match self {
            Provider::CoinGecko => format!(
                "https://api.coingecko.com/api/v3/simple/price?ids={coin}&vs_currencies={}",
                base.to_lowercase()
            ),
            Provider::CryptoCompare => format!(
                "https://www.cryptocompare.com/api/data/price?fsym={ticker}&tsyms={base}"
            ),
            Provider::Cryptonator => {
                format!("https://api.cryptonator.com/api/ticker/{ticker}-{base}")
            }
        }
    }

    fn parse(&self, data: &Value, coin: &str, base: &str) -> Option<f64> {
        match self {
            Provider::CoinGecko => data.get(coin)?.get(base.to_lowercase())?.as_f64(),
            Provider::CryptoCompare => data.get("Data")?.get(0)?.get("Price")?.as_f64(),
            // Prices come back as strings here.
            Provider::Cryptonator => {
                let price = data.get("ticker")?.get("price")?;
                price.as_f64().or_else(|| price.as_str()?.parse().ok())
            }
        }
    }
}

pub struct PriceFeed {
    http: reqwest::blocking::Client,
}

impl PriceFeed {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: reqwest::blocking::Client::builder()
                .timeout(PRICE_TIMEOUT)
                .build()?,
        })
    }

    /// Quote one coin against a base currency. Identity pairs are 1,
    /// an unquotable pair falls back to crossing through bitcoin, and
    /// total failure is 0.
    pub fn coin_price(&self, coin: &str, ticker: &str, base: &str) -> f64 {
        self.price_inner(coin, ticker, base, true)
    }

    fn price_inner(&self, coin: &str, ticker: &str, base: &str, allow_cross: bool) -> f64 {
        if ticker == base {
            return 1.0;
        }

        for provider in PROVIDERS {
            match self.fetch(provider, coin, ticker, base) {
                Some(price) if price > 0.0 => return price,
                _ => debug!("{provider:?} has no {ticker}/{base} quote"),
            }
        }

        // The usual pair failure: the base is only quoted against BTC.
        if allow_cross && ticker != "BTC" && base != "BTC" {
            let in_btc = self.price_inner(coin, ticker, "BTC", false);
            let btc = self.price_inner("bitcoin", "BTC", base, false);
            if in_btc > 0.0 && btc > 0.0 {
                return in_btc * btc;
            }
        }

        0.0
    }

    fn fetch(&self, provider: Provider, coin: &str, ticker: &str, base: &str) -> Option<f64> {
        let url = provider.quote_url(coin, ticker, base);
        let data: Value = self.http.get(&url).send().ok()?.json().ok()?;
        provider.parse(&data, coin, base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn provider_payloads_parse() {
        let gecko = json!({"bitcoin": {"eur": 30000.5}});
        assert_eq!(
            Provider::CoinGecko.parse(&gecko, "bitcoin", "EUR"),
            Some(30000.5)
        );

        let compare = json!({"Data": [{"Price": 12.25}]});
        assert_eq!(
            Provider::CryptoCompare.parse(&compare, "bitcoin", "EUR"),
            Some(12.25)
        );

        let nator = json!({"ticker": {"price": "0.0042"}});
        assert_eq!(
            Provider::Cryptonator.parse(&nator, "bitcoin", "EUR"),
            Some(0.0042)
        );
    }

    #[test]
    fn empty_payloads_yield_nothing() {
        assert_eq!(Provider::CoinGecko.parse(&json!({}), "bitcoin", "EUR"), None);
        assert_eq!(
            Provider::CryptoCompare.parse(&json!({"Data": []}), "bitcoin", "EUR"),
            None
        );
    }

    #[test]
    fn identity_pair_is_unity() {
        let feed = PriceFeed::new().unwrap();
        assert_eq!(feed.coin_price("bitcoin", "BTC", "BTC"), 1.0);
    }
}
