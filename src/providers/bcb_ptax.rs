use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use futures::future::join_all;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::core::clock::Clock;
use crate::core::rate::{ExchangeRate, Provenance};
use crate::core::source::RateSource;
use crate::providers::util::{decimal_from_f64, http_client};

const SOURCE_URL: &str = "https://dadosabertos.bcb.gov.br";
/// PTAX bulletins only quote foreign currencies against the real.
const PTAX_QUOTE_CURRENCY: &str = "BRL";
const BRASILIA_UTC_OFFSET_SECS: i64 = -3 * 3600;

/// Official central bank quotes, one request per currency and day.
pub struct BcbPtaxProvider {
    base_url: String,
    base_currency: String,
    timeout_secs: u64,
    supported: Vec<String>,
    clock: Arc<dyn Clock>,
}

#[derive(Debug, Deserialize)]
struct PtaxResponse {
    #[serde(default)]
    value: Vec<PtaxQuote>,
}

#[derive(Debug, Deserialize)]
struct PtaxQuote {
    #[serde(rename = "cotacaoCompra")]
    buy: f64,
    #[serde(rename = "cotacaoVenda")]
    sell: f64,
    #[serde(rename = "dataHoraCotacao")]
    quoted_at: Option<String>,
}

impl BcbPtaxProvider {
    pub fn new(
        base_url: &str,
        base_currency: &str,
        timeout_secs: u64,
        supported: &[String],
        clock: Arc<dyn Clock>,
    ) -> Self {
        BcbPtaxProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            base_currency: base_currency.to_uppercase(),
            timeout_secs,
            supported: supported.iter().map(|c| c.to_uppercase()).collect(),
            clock,
        }
    }

    /// Today's date in Brasília, which is what the bulletin is keyed by.
    fn today(&self) -> NaiveDate {
        (self.clock.now() + Duration::seconds(BRASILIA_UTC_OFFSET_SECS)).date_naive()
    }

    async fn fetch_quote(
        &self,
        client: &reqwest::Client,
        currency: &str,
        date: NaiveDate,
    ) -> Result<Option<PtaxQuote>> {
        let endpoint = format!(
            "{}/CotacaoMoedaDia(moeda=@moeda,dataCotacao=@dataCotacao)",
            self.base_url
        );
        let date_param = date.format("%m-%d-%Y").to_string();
        let url = reqwest::Url::parse_with_params(
            &endpoint,
            &[
                ("@moeda", format!("'{currency}'")),
                ("@dataCotacao", format!("'{date_param}'")),
                ("$format", "json".to_string()),
                ("$top", "1".to_string()),
                ("$orderby", "dataHoraCotacao desc".to_string()),
            ],
        )
        .with_context(|| format!("Invalid PTAX endpoint: {endpoint}"))?;
        debug!(%currency, date = %date_param, "Requesting rate from {}", url);

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency: {}", e, currency))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency: {}",
                response.status(),
                currency
            ));
        }

        let text = response.text().await?;
        let data: PtaxResponse = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON response for {currency}"))?;

        Ok(data.value.into_iter().next())
    }

    /// Fetches today's quote, retrying once with yesterday's date when there is none.
    async fn fetch_currency(
        &self,
        client: &reqwest::Client,
        currency: &str,
    ) -> Result<ExchangeRate> {
        let today = self.today();
        let quote = match self.fetch_quote(client, currency, today).await? {
            Some(quote) => quote,
            None => {
                debug!(%currency, "No quote for today, trying yesterday");
                self.fetch_quote(client, currency, today - Duration::days(1))
                    .await?
                    .ok_or_else(|| anyhow!("No quote available for currency: {}", currency))?
            }
        };

        let updated_at = quote
            .quoted_at
            .unwrap_or_else(|| today.format("%Y-%m-%dT00:00:00").to_string());
        Ok(ExchangeRate::new(
            currency,
            decimal_from_f64(quote.buy)?,
            decimal_from_f64(quote.sell)?,
            Provenance::Secondary,
            SOURCE_URL,
            &updated_at,
        ))
    }
}

#[async_trait]
impl RateSource for BcbPtaxProvider {
    fn name(&self) -> &'static str {
        "BCB PTAX"
    }

    #[instrument(name = "BcbPtaxFetch", skip(self))]
    async fn fetch_rates(
        &self,
        currencies: &[String],
        sentinel: &str,
    ) -> Result<HashMap<String, ExchangeRate>> {
        if self.base_currency != PTAX_QUOTE_CURRENCY {
            return Err(anyhow!(
                "PTAX quotes are in {}, not in base currency {}",
                PTAX_QUOTE_CURRENCY,
                self.base_currency
            ));
        }

        let client = http_client(self.timeout_secs)?;
        let wanted: Vec<&String> = currencies
            .iter()
            .filter(|c| self.supported.contains(c))
            .collect();

        let results = join_all(wanted.iter().map(|currency| {
            let client = &client;
            async move { (*currency, self.fetch_currency(client, currency).await) }
        }))
        .await;

        let mut rates = HashMap::new();
        for (currency, result) in results {
            match result {
                Ok(rate) => {
                    rates.insert(currency.clone(), rate);
                }
                Err(e) if currency == sentinel => {
                    return Err(e.context(format!("Sentinel currency {sentinel} unavailable")));
                }
                Err(e) => warn!(%currency, error = %e, "Skipping currency"),
            }
        }

        if !rates.contains_key(sentinel) {
            return Err(anyhow!("Sentinel currency {} is not supported", sentinel));
        }

        Ok(rates)
    }
}
