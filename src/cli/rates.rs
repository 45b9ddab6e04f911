use super::ui;
use crate::core::config::AppConfig;
use crate::core::feed::RateSource;
use crate::core::rate::CurrencyRecord;
use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;
use tracing::info;

/// Renders resolved rates as a table with the amount column labelled by the
/// requested amount and base currency.
pub fn display_as_table(records: &[CurrencyRecord], amount: f64, base: &str) -> String {
    if records.is_empty() {
        return ui::style_text(
            &format!("No currencies reachable from {base}."),
            ui::StyleType::Error,
        );
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Country"),
        ui::header_cell(&format!("Amount (${amount} {base})")),
        ui::header_cell("Path"),
    ]);

    for record in records {
        table.add_row(vec![
            Cell::new(&record.currency_code),
            ui::optional_cell(record.country.as_deref()),
            ui::amount_cell(record.amount),
            Cell::new(record.path_display()),
        ]);
    }

    let mut output = format!(
        "Best rates from {}\n\n",
        ui::style_text(base, ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n{}",
        ui::style_text(
            &format!("{} currencies reachable", records.len()),
            ui::StyleType::Subtle
        )
    ));
    output
}

/// All-currency queries print an array, single-currency queries the bare
/// record.
pub fn display_as_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub async fn run(
    source: &(dyn RateSource + Send + Sync),
    config: &AppConfig,
    currency: Option<&str>,
    amount: Option<f64>,
    json: bool,
) -> Result<()> {
    let session = super::open_session(source, config).await?;
    let amount = amount.unwrap_or(config.amount);

    let output = match currency {
        Some(code) => {
            let code = code.to_uppercase();
            info!(currency = %code, amount, "Resolving best rate");
            let record = session.resolve_one(&code, amount)?;
            if json {
                display_as_json(&record)?
            } else {
                display_as_table(std::slice::from_ref(&record), amount, session.base())
            }
        }
        None => {
            info!(amount, "Resolving best rates for all currencies");
            let records = session.resolve_all(amount)?;
            if json {
                display_as_json(&records)?
            } else {
                display_as_table(&records, amount, session.base())
            }
        }
    };
    println!("{output}");
    Ok(())
}
