use super::ui;
use crate::core::{ExchangeRateProvider, convert};
use anyhow::Result;
use rust_decimal::Decimal;

pub async fn run(
    provider: &ExchangeRateProvider,
    amount: Decimal,
    currency: &str,
    base_currency: &str,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rates...");
    let snapshot = provider.get_rates().await;
    pb.finish_and_clear();

    let converted = convert(amount, currency, &snapshot)?;
    let currency = currency.to_uppercase();
    // Presence is guaranteed by the successful conversion above.
    if let Some(rate) = snapshot.get(&currency) {
        println!(
            "{} {} {} = {} {}",
            rate.flag(),
            ui::format_amount(amount),
            currency,
            ui::style_text(&ui::format_amount(converted), ui::StyleType::TotalValue),
            base_currency
        );
        println!(
            "{}",
            ui::style_text(
                &format!(
                    "Rate {:.4} ({}, {})",
                    rate.rate(),
                    rate.provenance(),
                    rate.updated_at()
                ),
                ui::StyleType::Subtle
            )
        );
    }
    Ok(())
}
