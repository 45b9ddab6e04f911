//! Delimited text export of resolved rates

use crate::core::error::{ConversionError, Result};
use crate::core::rate::CurrencyRecord;
use csv::{QuoteStyle, WriterBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub delimiter: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Label of the amount column, e.g. `Amount $100 CAD`.
pub fn amount_label(amount: f64, base: &str) -> String {
    format!("Amount ${amount} {base}")
}

/// Renders a header row plus one row per record with the columns currency
/// code, country, amount and path.
///
/// Output is buffered and only returned once every row has been written; on
/// failure the caller gets [`ConversionError::Render`] and no text.
pub fn render_table(
    records: &[CurrencyRecord],
    amount: f64,
    base: &str,
    options: &ExportOptions,
) -> Result<String> {
    let delimiter = options.delimiter;
    if !delimiter.is_ascii() || matches!(delimiter, b'"' | b'\n' | b'\r') {
        return Err(ConversionError::Render(format!(
            "unusable delimiter: {:?}",
            delimiter as char
        )));
    }

    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(Vec::new());

    writer
        .write_record([
            "Currency Code",
            "Country",
            amount_label(amount, base).as_str(),
            "Path",
        ])
        .map_err(render_error)?;

    for record in records {
        writer
            .write_record([
                record.currency_code.as_str(),
                record.country.as_deref().unwrap_or_default(),
                record.amount.to_string().as_str(),
                record.path_display().as_str(),
            ])
            .map_err(render_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ConversionError::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ConversionError::Render(e.to_string()))
}

fn render_error(error: csv::Error) -> ConversionError {
    ConversionError::Render(error.to_string())
}
