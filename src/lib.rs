pub mod cli;
pub mod core;
pub mod providers;

use crate::core::clock::{Clock, SystemClock};
use crate::core::config::AppConfig;
use crate::core::salary::{CareerSort, Category};
use crate::core::{ExchangeRateProvider, FallbackTable, RateCache};
use anyhow::Result;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Rates,
    Convert { amount: Decimal, currency: String },
    Compare,
    Careers {
        sort: CareerSort,
        category: Option<Category>,
    },
    Career {
        id: String,
    },
    CompareCareers {
        first: String,
        second: String,
    },
}

/// Wires the rate provider from configuration: cache, clock, and the source cascade.
pub fn build_rate_provider(config: &AppConfig, clock: Arc<dyn Clock>) -> ExchangeRateProvider {
    let ttl = i64::try_from(config.cache_ttl_seconds)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .unwrap_or(chrono::Duration::MAX);
    let cache = Arc::new(RateCache::new(ttl));
    let sources = providers::sources_from_config(config, Arc::clone(&clock));

    ExchangeRateProvider::new(
        sources,
        FallbackTable::from_entries(&config.fallback_base_currency, &config.fallback_rates),
        cache,
        clock,
        config.requested_currencies(),
        &config.sentinel_currency,
        &config.base_currency,
    )
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("OctoWage starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let base_currency = config.base_currency.to_uppercase();
    match command {
        AppCommand::Rates => {
            let provider = build_rate_provider(&config, Arc::new(SystemClock));
            cli::rates::run(&provider, &base_currency).await
        }
        AppCommand::Convert { amount, currency } => {
            let provider = build_rate_provider(&config, Arc::new(SystemClock));
            cli::convert::run(&provider, amount, &currency, &base_currency).await
        }
        AppCommand::Compare => {
            let provider = build_rate_provider(&config, Arc::new(SystemClock));
            cli::compare::run(&provider, &base_currency).await
        }
        AppCommand::Careers { sort, category } => cli::careers::run(sort, category),
        AppCommand::Career { id } => cli::careers::run_detail(&id),
        AppCommand::CompareCareers { first, second } => {
            cli::careers::run_comparison(&first, &second)
        }
    }
}
