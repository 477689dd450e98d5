use super::ui;
use crate::core::{ExchangeRateProvider, RateSnapshot};
use anyhow::Result;
use comfy_table::Cell;

impl RateSnapshot {
    pub fn display_as_table(&self, base_currency: &str) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Currency"),
            ui::header_cell(&format!("Buy ({base_currency})")),
            ui::header_cell(&format!("Sell ({base_currency})")),
            ui::header_cell(&format!("Rate ({base_currency})")),
            ui::header_cell("Source"),
            ui::header_cell("Updated"),
        ]);

        for rate in self.sorted() {
            table.add_row(vec![
                Cell::new(format!("{} {}", rate.flag(), rate.currency())),
                Cell::new(format!("{:.4}", rate.buy())),
                Cell::new(format!("{:.4}", rate.sell())),
                Cell::new(format!("{:.4}", rate.rate())),
                ui::provenance_cell(rate.provenance()),
                Cell::new(rate.updated_at()),
            ]);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Exchange rates", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                &format!("Fetched at {}", self.fetched_at().format("%Y-%m-%d %H:%M:%S UTC")),
                ui::StyleType::Subtle
            )
        ));
        output
    }
}

pub async fn run(provider: &ExchangeRateProvider, base_currency: &str) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rates...");
    let snapshot = provider.get_rates().await;
    pb.finish_and_clear();

    println!("{}", snapshot.display_as_table(base_currency));
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::core::{FallbackTable, RateSnapshot};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_display_as_table() {
        let table = FallbackTable::default();
        let snapshot = RateSnapshot::new(
            table.select(&["USD".to_string(), "EUR".to_string()]),
            Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
        );

        let output = snapshot.display_as_table("BRL");
        assert!(output.contains("Rate (BRL)"));
        assert!(output.contains("USD"));
        assert!(output.contains("5.8000"));
        assert!(output.contains("6.1000"));
        assert!(output.contains("static"));
        assert!(output.contains("2025-01-01 12:00:00 UTC"));
        assert!(output.find("EUR").unwrap() < output.find("USD").unwrap());
    }
}
