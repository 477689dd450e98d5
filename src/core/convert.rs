//! Conversion of foreign amounts into the base currency

use crate::core::rate::RateSnapshot;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Digits kept in a converted amount (the currency subunit).
pub const AMOUNT_PRECISION: u32 = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The snapshot has no quote for this currency.
    #[error("Currency not found: {0}")]
    CurrencyNotFound(String),
}

/// Converts `amount` in `currency` to the base currency using the snapshot's mid rate.
pub fn convert(
    amount: Decimal,
    currency: &str,
    snapshot: &RateSnapshot,
) -> Result<Decimal, ConversionError> {
    let rate = snapshot
        .get(currency)
        .ok_or_else(|| ConversionError::CurrencyNotFound(currency.to_uppercase()))?;

    Ok((amount * rate.rate())
        .round_dp_with_strategy(AMOUNT_PRECISION, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fallback::FallbackTable;
    use crate::core::rate::{ExchangeRate, Provenance};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn usd_snapshot() -> RateSnapshot {
        let usd = ExchangeRate::new(
            "USD",
            dec!(5.70),
            dec!(5.80),
            Provenance::Primary,
            "",
            "2025-01-01T00:00:00",
        );
        RateSnapshot::new(HashMap::from([("USD".to_string(), usd)]), Utc::now())
    }

    #[test]
    fn test_convert() {
        let snapshot = usd_snapshot();
        assert_eq!(convert(dec!(100), "USD", &snapshot).unwrap(), dec!(575.00));
        assert_eq!(
            convert(dec!(26300), "usd", &snapshot).unwrap(),
            dec!(151225.00)
        );
    }

    #[test]
    fn test_convert_rounds_to_cents() {
        let snapshot = usd_snapshot();
        // 0.333 * 5.75 = 1.91475
        assert_eq!(convert(dec!(0.333), "USD", &snapshot).unwrap(), dec!(1.91));
        // 0.001 * 5.75 = 0.00575
        assert_eq!(convert(dec!(0.001), "USD", &snapshot).unwrap(), dec!(0.01));
    }

    #[test]
    fn test_convert_unknown_currency() {
        let snapshot = usd_snapshot();
        let err = convert(dec!(100), "jpy", &snapshot).unwrap_err();
        assert_eq!(err, ConversionError::CurrencyNotFound("JPY".to_string()));
        assert_eq!(err.to_string(), "Currency not found: JPY");
    }

    #[test]
    fn test_static_snapshot_converts_every_static_currency() {
        let table = FallbackTable::default();
        let currencies: Vec<String> = table.currencies().map(str::to_string).collect();
        let snapshot = RateSnapshot::new(table.select(&currencies), Utc::now());

        for currency in &currencies {
            assert!(convert(dec!(1234.56), currency, &snapshot).is_ok());
        }
    }
}
