use crate::core::rate::{ExchangeRate, Provenance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const STATIC_BASE_CURRENCY: &str = "BRL";
pub const STATIC_SOURCE_URL: &str = "https://www.bcb.gov.br";
pub const STATIC_UPDATED_AT: &str = "2025-12-01T00:00:00";

/// A manually maintained quote, as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FallbackRateConfig {
    pub currency: String,
    pub buy: Decimal,
    pub sell: Decimal,
    #[serde(default = "default_source_url")]
    pub source_url: String,
    #[serde(default = "default_updated_at")]
    pub updated_at: String,
}

fn default_source_url() -> String {
    STATIC_SOURCE_URL.to_string()
}

fn default_updated_at() -> String {
    STATIC_UPDATED_AT.to_string()
}

/// Last-resort quotes used when every network source fails, all quoted against one
/// base currency.
#[derive(Debug, Clone)]
pub struct FallbackTable {
    base_currency: String,
    rates: HashMap<String, ExchangeRate>,
}

impl FallbackTable {
    pub fn from_entries(base_currency: &str, entries: &[FallbackRateConfig]) -> Self {
        let rates = entries
            .iter()
            .map(|e| {
                let rate = ExchangeRate::new(
                    &e.currency,
                    e.buy,
                    e.sell,
                    Provenance::Static,
                    &e.source_url,
                    &e.updated_at,
                );
                (rate.currency().to_string(), rate)
            })
            .collect();
        Self {
            base_currency: base_currency.to_uppercase(),
            rates,
        }
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    pub fn get(&self, currency: &str) -> Option<&ExchangeRate> {
        self.rates.get(&currency.to_uppercase())
    }

    /// Entries for the requested currencies; codes without a static entry are left out.
    pub fn select(&self, currencies: &[String]) -> HashMap<String, ExchangeRate> {
        currencies
            .iter()
            .filter_map(|c| self.get(c).map(|r| (r.currency().to_string(), r.clone())))
            .collect()
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }
}

pub fn default_entries() -> Vec<FallbackRateConfig> {
    [
        ("USD", Decimal::new(575, 2), Decimal::new(585, 2)),
        ("EUR", Decimal::new(605, 2), Decimal::new(615, 2)),
        ("GBP", Decimal::new(720, 2), Decimal::new(736, 2)),
    ]
    .into_iter()
    .map(|(currency, buy, sell)| FallbackRateConfig {
        currency: currency.to_string(),
        buy,
        sell,
        source_url: default_source_url(),
        updated_at: default_updated_at(),
    })
    .collect()
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::from_entries(STATIC_BASE_CURRENCY, &default_entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_table() {
        let table = FallbackTable::default();
        let usd = table.get("USD").unwrap();
        assert_eq!(usd.rate(), dec!(5.80));
        assert_eq!(usd.provenance(), Provenance::Static);
        assert_eq!(table.get("eur").unwrap().rate(), dec!(6.10));
        assert_eq!(table.get("GBP").unwrap().rate(), dec!(7.28));
        assert_eq!(table.base_currency(), "BRL");
    }

    #[test]
    fn test_select_skips_unknown_currencies() {
        let table = FallbackTable::default();
        let selected = table.select(&["USD".to_string(), "JPY".to_string()]);
        assert_eq!(selected.len(), 1);
        assert!(selected.contains_key("USD"));
    }
}
