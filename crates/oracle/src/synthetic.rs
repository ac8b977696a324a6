use async_trait::async_trait;
use chrono::Utc;
use core_types::Quote;
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::OracleError;
use crate::PriceOracle;

/// Reference data for one symbol in the synthetic market.
struct SymbolProfile {
    base: Decimal,
    high: Decimal,
    low: Decimal,
    open: Decimal,
    previous_close: Decimal,
    /// Fixed half-spread applied around the current price.
    spread: Decimal,
    /// Scale factor applied to the variation when shifting the day's range.
    swing: Decimal,
}

fn profile(symbol: &str) -> SymbolProfile {
    match symbol {
        "AAPL" => SymbolProfile {
            base: dec!(175.50),
            high: dec!(177.20),
            low: dec!(174.30),
            open: dec!(176.00),
            previous_close: dec!(175.00),
            spread: dec!(0.18),
            swing: dec!(100),
        },
        "GOOGL" => SymbolProfile {
            base: dec!(140.30),
            high: dec!(142.50),
            low: dec!(139.80),
            open: dec!(141.00),
            previous_close: dec!(140.00),
            spread: dec!(0.14),
            swing: dec!(100),
        },
        "MSFT" => SymbolProfile {
            base: dec!(380.75),
            high: dec!(385.00),
            low: dec!(378.50),
            open: dec!(382.00),
            previous_close: dec!(379.00),
            spread: dec!(0.38),
            swing: dec!(200),
        },
        "TSLA" => SymbolProfile {
            base: dec!(245.60),
            high: dec!(250.00),
            low: dec!(242.30),
            open: dec!(248.00),
            previous_close: dec!(244.50),
            spread: dec!(0.25),
            swing: dec!(150),
        },
        _ => SymbolProfile {
            base: dec!(100.00),
            high: dec!(102.00),
            low: dec!(98.00),
            open: dec!(101.00),
            previous_close: dec!(99.50),
            spread: dec!(0.10),
            swing: dec!(50),
        },
    }
}

/// A quote source that fabricates plausible prices without any upstream API.
///
/// Each call perturbs the symbol's base price by a bounded random variation
/// (-2% to +3%), so repeated calls during a demo show believable market
/// movement without ever blocking a trade.
#[derive(Debug, Clone, Default)]
pub struct SyntheticOracle;

impl SyntheticOracle {
    pub fn new() -> Self {
        Self
    }

    /// Builds a quote for the symbol. Infallible: every symbol maps to a
    /// profile, unknown ones to the default.
    pub fn generate(&self, symbol: &str) -> Quote {
        let symbol = symbol.to_uppercase();
        let profile = profile(&symbol);

        let variation_pct: f64 = rand::thread_rng().gen_range(-0.02..0.03);
        // Retain the full f64 representation; the price itself is rounded to
        // cents below.
        let variation = Decimal::from_f64_retain(variation_pct).unwrap_or_default();

        let current = (profile.base * (Decimal::ONE + variation))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let shift = variation * profile.swing;

        Quote {
            symbol,
            current_price: current,
            high_price: profile.high + shift,
            low_price: profile.low + shift,
            open_price: profile.open,
            previous_close: profile.previous_close,
            bid: current - profile.spread,
            ask: current + profile.spread,
            timestamp: Utc::now(),
        }
    }
}

#[async_trait]
impl PriceOracle for SyntheticOracle {
    async fn quote(&self, symbol: &str) -> Result<Quote, OracleError> {
        Ok(self.generate(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_stays_within_the_perturbation_bounds() {
        let oracle = SyntheticOracle::new();
        for _ in 0..200 {
            let quote = oracle.generate("AAPL");
            assert!(quote.current_price >= dec!(175.50) * dec!(0.98));
            assert!(quote.current_price <= dec!(175.50) * dec!(1.03));
            // Rounded to cents.
            assert_eq!(quote.current_price, quote.current_price.round_dp(2));
        }
    }

    #[test]
    fn bid_and_ask_straddle_the_current_price_by_the_fixed_spread() {
        let quote = SyntheticOracle::new().generate("MSFT");
        assert_eq!(quote.ask - quote.current_price, dec!(0.38));
        assert_eq!(quote.current_price - quote.bid, dec!(0.38));
    }

    #[test]
    fn unknown_symbols_fall_back_to_the_default_profile() {
        let quote = SyntheticOracle::new().generate("zzzz");
        assert_eq!(quote.symbol, "ZZZZ");
        assert!(quote.current_price >= dec!(98.00));
        assert!(quote.current_price <= dec!(103.00));
    }
}
