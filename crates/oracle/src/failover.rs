use std::time::Duration;

use async_trait::async_trait;
use core_types::Quote;

use crate::error::OracleError;
use crate::finnhub::FinnhubClient;
use crate::synthetic::SyntheticOracle;
use crate::PriceOracle;

/// The production oracle: tries the live quote source under a bounded
/// timeout and silently substitutes a synthetic quote on any failure.
///
/// `quote` never returns `Err`, so a flaky or unconfigured upstream can
/// never block or fail a trade.
pub struct FailoverOracle {
    live: Option<FinnhubClient>,
    synthetic: SyntheticOracle,
    timeout: Duration,
}

impl FailoverOracle {
    pub fn new(live: Option<FinnhubClient>, timeout: Duration) -> Self {
        Self {
            live,
            synthetic: SyntheticOracle::new(),
            timeout,
        }
    }

    /// Convenience constructor from the oracle configuration section.
    pub fn from_settings(settings: &configuration::Oracle) -> Self {
        let live = settings
            .api_key
            .as_deref()
            .map(|key| FinnhubClient::new(settings.base_url.clone(), key));
        Self::new(live, Duration::from_millis(settings.request_timeout_ms))
    }

    async fn live_quote(&self, symbol: &str) -> Result<Quote, OracleError> {
        let client = self.live.as_ref().ok_or(OracleError::MissingCredential)?;
        tokio::time::timeout(self.timeout, client.quote(symbol))
            .await
            .map_err(|_| OracleError::Timeout)?
    }
}

#[async_trait]
impl PriceOracle for FailoverOracle {
    async fn quote(&self, symbol: &str) -> Result<Quote, OracleError> {
        match self.live_quote(symbol).await {
            Ok(quote) => Ok(quote),
            Err(e) => {
                tracing::warn!(error = %e, symbol, "Live quote unavailable, serving synthetic quote.");
                Ok(self.synthetic.generate(symbol))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_credential_falls_through_to_synthetic() {
        let oracle = FailoverOracle::new(None, Duration::from_millis(10));
        let quote = oracle.quote("AAPL").await.expect("failover never errors");
        assert_eq!(quote.symbol, "AAPL");
        assert!(quote.current_price > rust_decimal::Decimal::ZERO);
    }

    #[tokio::test]
    async fn unreachable_upstream_falls_through_to_synthetic() {
        let live = FinnhubClient::new("http://127.0.0.1:1", "test-key");
        let oracle = FailoverOracle::new(Some(live), Duration::from_millis(200));
        let quote = oracle.quote("TSLA").await.expect("failover never errors");
        assert_eq!(quote.symbol, "TSLA");
    }
}
