//! The exchange rate provider: cache in front of an ordered cascade of sources.

use crate::core::cache::RateCache;
use crate::core::clock::Clock;
use crate::core::fallback::FallbackTable;
use crate::core::rate::{ExchangeRate, RateSnapshot};
use crate::core::source::RateSource;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

pub struct ExchangeRateProvider {
    sources: Vec<Arc<dyn RateSource>>,
    fallback: FallbackTable,
    cache: Arc<RateCache>,
    clock: Arc<dyn Clock>,
    currencies: Vec<String>,
    sentinel: String,
    base_currency: String,
    refresh_lock: Mutex<()>,
}

impl ExchangeRateProvider {
    /// `currencies` should already contain the sentinel; see
    /// [`AppConfig::requested_currencies`](crate::core::config::AppConfig::requested_currencies).
    pub fn new(
        sources: Vec<Arc<dyn RateSource>>,
        fallback: FallbackTable,
        cache: Arc<RateCache>,
        clock: Arc<dyn Clock>,
        currencies: Vec<String>,
        sentinel: &str,
        base_currency: &str,
    ) -> Self {
        Self {
            sources,
            fallback,
            cache,
            clock,
            currencies,
            sentinel: sentinel.to_uppercase(),
            base_currency: base_currency.to_uppercase(),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns the cached snapshot, or refreshes it through the cascade.
    ///
    /// Never fails: when every source fails the static fallback table is returned.
    pub async fn get_rates(&self) -> Arc<RateSnapshot> {
        if let Some(snapshot) = self.cache.get(self.clock.now()).await {
            return snapshot;
        }

        // Only one refresh at a time; late arrivals pick up the fresh snapshot.
        let _guard = self.refresh_lock.lock().await;
        if let Some(snapshot) = self.cache.get(self.clock.now()).await {
            debug!("Snapshot refreshed while waiting for the refresh lock");
            return snapshot;
        }

        let rates = self.fetch_from_sources().await;
        let snapshot = Arc::new(RateSnapshot::new(rates, self.clock.now()));
        self.cache.put(Arc::clone(&snapshot)).await;
        snapshot
    }

    #[instrument(name = "RateCascade", skip(self), fields(currencies = ?self.currencies))]
    async fn fetch_from_sources(&self) -> HashMap<String, ExchangeRate> {
        for source in &self.sources {
            match source.fetch_rates(&self.currencies, &self.sentinel).await {
                Ok(rates) => match self.complete(rates) {
                    Some(rates) => {
                        info!(source = source.name(), count = rates.len(), "Fetched rates");
                        return rates;
                    }
                    None => warn!(
                        source = source.name(),
                        sentinel = %self.sentinel,
                        "Source returned no sentinel rate"
                    ),
                },
                Err(e) => warn!(source = source.name(), error = %e, "Rate source failed"),
            }
        }

        match self.static_rates() {
            Some(table) => {
                warn!("All rate sources failed. Using static rates.");
                table.select(&self.currencies)
            }
            None => {
                warn!(
                    base_currency = %self.base_currency,
                    static_base_currency = %self.fallback.base_currency(),
                    "All rate sources failed and static rates use another base currency"
                );
                HashMap::new()
            }
        }
    }

    /// The static table, unless it is quoted against a different base currency.
    fn static_rates(&self) -> Option<&FallbackTable> {
        (self.fallback.base_currency() == self.base_currency).then_some(&self.fallback)
    }

    /// Keeps only requested currencies and backfills the missing ones from the static table.
    ///
    /// Returns `None` when the sentinel is absent, so the result is discarded whole.
    fn complete(
        &self,
        mut rates: HashMap<String, ExchangeRate>,
    ) -> Option<HashMap<String, ExchangeRate>> {
        if !rates.contains_key(&self.sentinel) {
            return None;
        }
        rates.retain(|code, _| self.currencies.contains(code));

        for code in &self.currencies {
            if rates.contains_key(code) {
                continue;
            }
            match self.static_rates().and_then(|table| table.get(code)) {
                Some(rate) => {
                    debug!(currency = %code, "Backfilling from static rates");
                    rates.insert(code.clone(), rate.clone());
                }
                None => warn!(currency = %code, "No rate available for currency"),
            }
        }
        Some(rates)
    }
}
