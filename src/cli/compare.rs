use super::ui;
use crate::core::ExchangeRateProvider;
use crate::core::salary::{CountryComparison, international_comparison};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

pub fn display_as_table(rows: &[CountryComparison], base_currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Country"),
        ui::header_cell("Judge (local)"),
        ui::header_cell(&format!("Judge ({base_currency})")),
        ui::header_cell("Teacher (local)"),
        ui::header_cell(&format!("Teacher ({base_currency})")),
        ui::header_cell("Ratio"),
        ui::header_cell("Source"),
    ]);

    for row in rows {
        let pay = &row.pay;
        table.add_row(vec![
            Cell::new(format!("{} {}", pay.flag, pay.country)),
            Cell::new(format!("{} {}", pay.currency, ui::format_amount(pay.judge)))
                .set_alignment(CellAlignment::Right),
            ui::format_optional_cell(row.judge_converted, ui::format_amount),
            Cell::new(format!("{} {}", pay.currency, ui::format_amount(pay.teacher)))
                .set_alignment(CellAlignment::Right),
            ui::format_optional_cell(row.teacher_converted, ui::format_amount),
            Cell::new(format!("{}x", row.ratio)).set_alignment(CellAlignment::Right),
            Cell::new(pay.source),
        ]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Judges vs teachers around the world", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output
}

pub async fn run(provider: &ExchangeRateProvider, base_currency: &str) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rates...");
    let snapshot = provider.get_rates().await;
    pb.finish_and_clear();

    let rows = international_comparison(&snapshot, base_currency);
    println!("{}", display_as_table(&rows, base_currency));
    ui::print_separator();
    println!("{}", snapshot.display_as_table(base_currency));
    Ok(())
}
