//! Exchange rate value objects and snapshots

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use std::fmt::Display;

/// Minimum number of decimal digits kept in a mid rate.
pub const RATE_PRECISION: u32 = 4;

/// Which tier of the cascade produced a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    Primary,
    Secondary,
    Static,
}

impl Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Provenance::Primary => "primary (live)",
                Provenance::Secondary => "secondary (official)",
                Provenance::Static => "static",
            }
        )
    }
}

/// A quote for one currency against the base currency.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    currency: String,
    buy: Decimal,
    sell: Decimal,
    rate: Decimal,
    provenance: Provenance,
    source_url: String,
    updated_at: String,
    flag: String,
}

impl ExchangeRate {
    /// Builds a rate from buy and sell quotes, deriving the mid rate and flag.
    pub fn new(
        currency: &str,
        buy: Decimal,
        sell: Decimal,
        provenance: Provenance,
        source_url: &str,
        updated_at: &str,
    ) -> Self {
        let currency = currency.to_uppercase();
        ExchangeRate {
            flag: flag_for(&currency),
            currency,
            buy,
            sell,
            rate: mid_rate(buy, sell),
            provenance,
            source_url: source_url.to_string(),
            updated_at: updated_at.to_string(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn buy(&self) -> Decimal {
        self.buy
    }

    pub fn sell(&self) -> Decimal {
        self.sell
    }

    /// Mid rate used for every conversion.
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Observation timestamp as reported by the origin.
    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }
}

/// Arithmetic mean of buy and sell, rounded to [`RATE_PRECISION`] digits or to the
/// precision of the quotes, whichever is finer.
pub fn mid_rate(buy: Decimal, sell: Decimal) -> Decimal {
    let precision = RATE_PRECISION.max(buy.scale()).max(sell.scale());
    ((buy + sell) / Decimal::TWO)
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

/// Maps an ISO 4217 code to the flag of its first two letters.
///
/// ISO 4217 codes start with the ISO 3166 country code (or `EU` for the euro), so the
/// regional indicator pair renders as the right flag on most terminals.
pub fn flag_for(currency: &str) -> String {
    let letters: Vec<char> = currency
        .chars()
        .take(2)
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if letters.len() != 2 {
        return "🏳".to_string();
    }

    letters
        .into_iter()
        .filter_map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}

/// The full set of quotes fetched together and cached as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    rates: HashMap<String, ExchangeRate>,
    fetched_at: DateTime<Utc>,
}

impl RateSnapshot {
    pub fn new(rates: HashMap<String, ExchangeRate>, fetched_at: DateTime<Utc>) -> Self {
        RateSnapshot { rates, fetched_at }
    }

    pub fn get(&self, currency: &str) -> Option<&ExchangeRate> {
        self.rates.get(&currency.to_uppercase())
    }

    pub fn rates(&self) -> &HashMap<String, ExchangeRate> {
        &self.rates
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Rates sorted by currency code, for stable display.
    pub fn sorted(&self) -> Vec<&ExchangeRate> {
        let mut rates: Vec<_> = self.rates.values().collect();
        rates.sort_by(|a, b| a.currency.cmp(&b.currency));
        rates
    }
}
