use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::core::clock::Clock;
use crate::core::rate::{ExchangeRate, Provenance};
use crate::core::source::RateSource;
use crate::providers::util::{http_client, parse_decimal};

/// Keyless aggregator quoting many pairs against the base currency in one request.
pub struct AwesomeApiProvider {
    base_url: String,
    base_currency: String,
    timeout_secs: u64,
    clock: Arc<dyn Clock>,
}

impl AwesomeApiProvider {
    pub fn new(
        base_url: &str,
        base_currency: &str,
        timeout_secs: u64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        AwesomeApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            base_currency: base_currency.to_uppercase(),
            timeout_secs,
            clock,
        }
    }

    fn quote_to_rate(&self, currency: &str, quote: &AwesomeQuote) -> Result<ExchangeRate> {
        let buy = parse_decimal(quote.bid.as_deref().ok_or_else(|| anyhow!("missing bid"))?)?;
        let sell = parse_decimal(quote.ask.as_deref().ok_or_else(|| anyhow!("missing ask"))?)?;
        let updated_at = quote.create_date.clone().unwrap_or_else(|| {
            self.clock
                .now()
                .naive_utc()
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string()
        });

        Ok(ExchangeRate::new(
            currency,
            buy,
            sell,
            Provenance::Primary,
            &self.base_url,
            &updated_at,
        ))
    }
}

#[derive(Debug, Deserialize)]
struct AwesomeQuote {
    bid: Option<String>,
    ask: Option<String>,
    create_date: Option<String>,
}

#[async_trait]
impl RateSource for AwesomeApiProvider {
    fn name(&self) -> &'static str {
        "AwesomeAPI"
    }

    #[instrument(name = "AwesomeApiFetch", skip(self))]
    async fn fetch_rates(
        &self,
        currencies: &[String],
        sentinel: &str,
    ) -> Result<HashMap<String, ExchangeRate>> {
        let pairs = currencies
            .iter()
            .map(|c| format!("{}-{}", c, self.base_currency))
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/last/{}", self.base_url, pairs);
        debug!("Requesting rates from {}", url);

        let client = http_client(self.timeout_secs)?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for pairs: {}", e, pairs))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for pairs: {}",
                response.status(),
                pairs
            ));
        }

        let text = response.text().await?;
        let data: HashMap<String, AwesomeQuote> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", pairs, e))?;

        if !data.contains_key(&format!("{}{}", sentinel, self.base_currency)) {
            return Err(anyhow!("No rate data found for sentinel currency: {}", sentinel));
        }

        // A batch missing any requested pair is degraded; let the next tier answer it.
        let mut rates = HashMap::new();
        for currency in currencies {
            let key = format!("{}{}", currency, self.base_currency);
            let quote = data
                .get(&key)
                .ok_or_else(|| anyhow!("No rate data found for pair: {}", key))?;
            let rate = self
                .quote_to_rate(currency, quote)
                .with_context(|| format!("Malformed quote for {key}"))?;
            rates.insert(currency.clone(), rate);
        }

        Ok(rates)
    }
}
