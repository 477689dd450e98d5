use super::ui;
use crate::core::salary::{
    CONSTITUTIONAL_CEILING, CareerData, CareerSort, Category, SERVANTS_ABOVE_CEILING,
    SUPERSALARY_ANNUAL_COST, career_by_id, careers_listing, social_costs,
};
use anyhow::{Result, anyhow};
use comfy_table::{Cell, CellAlignment, Color};

pub fn display_as_table(careers: &[&CareerData]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Career"),
        ui::header_cell("Category"),
        ui::header_cell("Base (BRL)"),
        ui::header_cell("Real (BRL)"),
        ui::header_cell("Allowances (BRL)"),
        ui::header_cell("x Ceiling"),
        ui::header_cell("Hours/week"),
        ui::header_cell("Risk"),
    ]);

    for career in careers {
        let multiple = Cell::new(format!("{}x", career.ceiling_multiple()))
            .set_alignment(CellAlignment::Right);
        let multiple = if career.exceeds_ceiling() {
            multiple.fg(Color::Red)
        } else {
            multiple
        };

        table.add_row(vec![
            Cell::new(career.name),
            Cell::new(career.category.to_string()),
            ui::amount_cell(career.salary_base),
            ui::amount_cell(career.salary_real),
            ui::amount_cell(career.allowances),
            multiple,
            Cell::new(career.weekly_hours).set_alignment(CellAlignment::Right),
            Cell::new(career.risk_level.to_string()),
        ]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Public careers", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n{}: {}",
        ui::style_text("Constitutional ceiling (BRL)", ui::StyleType::TotalLabel),
        ui::style_text(
            &ui::format_amount(CONSTITUTIONAL_CEILING),
            ui::StyleType::TotalValue
        )
    ));
    output
}

pub fn display_social_costs() -> String {
    let mut output = format!(
        "{} {} servants above the ceiling cost BRL {} a year. That would pay for:\n",
        ui::style_text("The cost of inequality:", ui::StyleType::TotalLabel),
        SERVANTS_ABOVE_CEILING,
        ui::format_amount(SUPERSALARY_ANNUAL_COST)
    );
    for cost in social_costs() {
        output.push_str(&format!(
            "\n  {} {}",
            ui::style_text(&cost.total_possible().to_string(), ui::StyleType::TotalValue),
            cost.label
        ));
    }
    output
}

/// Pay slip breakdown of one career against the ceiling.
pub fn display_detail(career: &CareerData) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Item"), ui::header_cell("BRL")]);
    table.add_row(vec![Cell::new("Base salary"), ui::amount_cell(career.salary_base)]);
    table.add_row(vec![Cell::new("Allowances"), ui::amount_cell(career.allowances)]);
    table.add_row(vec![Cell::new("Real salary"), ui::amount_cell(career.salary_real)]);
    table.add_row(vec![Cell::new("Maximum"), ui::amount_cell(career.salary_max)]);
    table.add_row(vec![
        Cell::new("Constitutional ceiling"),
        ui::amount_cell(CONSTITUTIONAL_CEILING),
    ]);
    table.add_row(vec![
        Cell::new("Above the ceiling"),
        ui::amount_cell(career.amount_above_ceiling()).fg(if career.exceeds_ceiling() {
            Color::Red
        } else {
            Color::Green
        }),
    ]);

    let mut output = format!(
        "{} ({})

",
        ui::style_text(career.name, ui::StyleType::Title),
        career.category
    );
    output.push_str(&table.to_string());
    if career.exceeds_ceiling() {
        output.push_str(&format!(
            "

{}: {}%",
            ui::style_text("Above the ceiling by", ui::StyleType::TotalLabel),
            ui::style_text(
                &career.percent_above_ceiling().to_string(),
                ui::StyleType::TotalValue
            )
        ));
    }
    output.push_str(&format!(
        "

{}",
        ui::style_text(
            &format!(
                "{}. {} h/week, {} risk. Source: {} ({})",
                career.education,
                career.weekly_hours,
                career.risk_level,
                career.source,
                career.source_url
            ),
            ui::StyleType::Subtle
        )
    ));
    output
}

/// Side-by-side view of two careers.
pub fn display_comparison(first: &CareerData, second: &CareerData) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell(first.name),
        ui::header_cell(second.name),
    ]);
    let amounts = [
        ("Base (BRL)", first.salary_base, second.salary_base),
        ("Allowances (BRL)", first.allowances, second.allowances),
        ("Real (BRL)", first.salary_real, second.salary_real),
        ("Maximum (BRL)", first.salary_max, second.salary_max),
        (
            "Above ceiling (BRL)",
            first.amount_above_ceiling(),
            second.amount_above_ceiling(),
        ),
    ];
    for (label, a, b) in amounts {
        table.add_row(vec![Cell::new(label), ui::amount_cell(a), ui::amount_cell(b)]);
    }
    table.add_row(vec![
        Cell::new("Hours/week"),
        Cell::new(first.weekly_hours).set_alignment(CellAlignment::Right),
        Cell::new(second.weekly_hours).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Risk"),
        Cell::new(first.risk_level.to_string()),
        Cell::new(second.risk_level.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Education"),
        Cell::new(first.education),
        Cell::new(second.education),
    ]);

    let mut output = format!(
        "{}

",
        ui::style_text(
            &format!("{} vs {}", first.name, second.name),
            ui::StyleType::Title
        )
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "

{} earns {}x what {} earns",
        first.name,
        ui::style_text(
            &first.pay_ratio(second).to_string(),
            ui::StyleType::TotalValue
        ),
        second.name
    ));
    output
}

fn find_career(id: &str) -> Result<&'static CareerData> {
    career_by_id(id).ok_or_else(|| anyhow!("Career not found: {}", id))
}

pub fn run(sort: CareerSort, category: Option<Category>) -> Result<()> {
    println!("{}", display_as_table(&careers_listing(sort, category)));
    ui::print_separator();
    println!("{}", display_social_costs());
    Ok(())
}

pub fn run_detail(id: &str) -> Result<()> {
    println!("{}", display_detail(find_career(id)?));
    Ok(())
}

pub fn run_comparison(first: &str, second: &str) -> Result<()> {
    let first = find_career(first)?;
    let second = find_career(second)?;
    println!("{}", display_comparison(first, second));
    Ok(())
}
