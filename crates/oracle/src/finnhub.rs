use async_trait::async_trait;
use chrono::Utc;
use core_types::Quote;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::error::OracleError;
use crate::PriceOracle;

/// A live quote client for the Finnhub REST API.
#[derive(Clone)]
pub struct FinnhubClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Intermediate struct mapping Finnhub's terse quote payload.
#[derive(Debug, Deserialize)]
struct RawQuote {
    /// Current price.
    c: f64,
    /// High price of the day.
    h: f64,
    /// Low price of the day.
    l: f64,
    /// Open price of the day.
    o: f64,
    /// Previous close price.
    pc: f64,
}

impl FinnhubClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn to_decimal(value: f64, field: &str) -> Result<Decimal, OracleError> {
        Decimal::from_f64_retain(value)
            .ok_or_else(|| OracleError::InvalidData(format!("{field} is not a valid price: {value}")))
    }
}

#[async_trait]
impl PriceOracle for FinnhubClient {
    async fn quote(&self, symbol: &str) -> Result<Quote, OracleError> {
        let symbol = symbol.to_uppercase();
        let url = format!("{}/quote", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol.as_str()), ("token", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let raw = response
            .json::<RawQuote>()
            .await
            .map_err(|e| OracleError::Deserialization(e.to_string()))?;

        // Finnhub reports all-zero prices for unknown symbols instead of a
        // proper error status.
        if raw.c <= 0.0 {
            return Err(OracleError::InvalidData(format!(
                "upstream returned no price for symbol {symbol}"
            )));
        }

        let current = Self::to_decimal(raw.c, "current")?;
        // Bid/ask are derived from the mid price with a 0.1% half-spread.
        let spread = current * dec!(0.001);

        Ok(Quote {
            symbol,
            current_price: current,
            high_price: Self::to_decimal(raw.h, "high")?,
            low_price: Self::to_decimal(raw.l, "low")?,
            open_price: Self::to_decimal(raw.o, "open")?,
            previous_close: Self::to_decimal(raw.pc, "previous_close")?,
            bid: current - spread,
            ask: current + spread,
            timestamp: Utc::now(),
        })
    }
}
