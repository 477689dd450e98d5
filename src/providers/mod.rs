pub mod awesome_api;
pub mod bcb_ptax;
pub mod util;

use crate::core::clock::Clock;
use crate::core::config::AppConfig;
use crate::core::source::RateSource;
use std::sync::Arc;

/// The cascade's network tiers, in the order they are tried.
pub fn sources_from_config(
    config: &AppConfig,
    clock: Arc<dyn Clock>,
) -> Vec<Arc<dyn RateSource>> {
    let primary: Arc<dyn RateSource> = Arc::new(awesome_api::AwesomeApiProvider::new(
        &config.providers.primary.base_url,
        &config.base_currency,
        config.providers.primary.timeout_secs,
        Arc::clone(&clock),
    ));
    let secondary: Arc<dyn RateSource> = Arc::new(bcb_ptax::BcbPtaxProvider::new(
        &config.providers.secondary.base_url,
        &config.base_currency,
        config.providers.secondary.timeout_secs,
        &config.providers.secondary.currencies,
        clock,
    ));

    vec![primary, secondary]
}
