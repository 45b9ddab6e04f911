use crate::core::config::AppConfig;
use crate::core::export::{ExportOptions, render_table};
use crate::core::feed::RateSource;
use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing::info;

/// Default file name when exporting to a directory.
pub const DEFAULT_EXPORT_FILE: &str = "currency-conversion.csv";

pub fn export_options(delimiter: char) -> Result<ExportOptions> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got {delimiter:?}");
    }
    Ok(ExportOptions {
        delimiter: delimiter as u8,
    })
}

pub async fn run(
    source: &(dyn RateSource + Send + Sync),
    config: &AppConfig,
    amount: Option<f64>,
    output: Option<&Path>,
    delimiter: char,
) -> Result<()> {
    let options = export_options(delimiter)?;
    let session = super::open_session(source, config).await?;
    let amount = amount.unwrap_or(config.amount);

    let records = session.resolve_all(amount)?;
    let text = render_table(&records, amount, session.base(), &options)?;

    match output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(DEFAULT_EXPORT_FILE)
            } else {
                path.to_path_buf()
            };
            std::fs::write(&path, &text)
                .with_context(|| format!("Failed to write export to {}", path.display()))?;
            info!(rows = records.len(), path = %path.display(), "Exported best rates");
        }
        None => print!("{text}"),
    }
    Ok(())
}
