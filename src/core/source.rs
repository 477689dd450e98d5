//! Rate source abstractions

use crate::core::rate::ExchangeRate;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// One tier of the acquisition cascade.
///
/// A source returns whatever quotes it could obtain for `currencies`, keyed by
/// currency code. It must fail when the sentinel currency is missing or malformed;
/// other absent currencies are backfilled by the caller.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn fetch_rates(
        &self,
        currencies: &[String],
        sentinel: &str,
    ) -> Result<HashMap<String, ExchangeRate>>;
}
