pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::{API_URL_ENV, AppConfig};
use crate::core::feed::RateSource;
use crate::providers::{FileRateSource, RatesApiProvider};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub enum AppCommand {
    Rates {
        currency: Option<String>,
        amount: Option<f64>,
        json: bool,
        file: Option<PathBuf>,
    },
    Export {
        amount: Option<f64>,
        output: Option<PathBuf>,
        delimiter: char,
        file: Option<PathBuf>,
    },
}

/// Picks the rate feed: a local file when given, otherwise the configured API.
pub fn rate_source(
    config: &AppConfig,
    file: Option<&Path>,
) -> Result<Box<dyn RateSource + Send + Sync>> {
    if let Some(path) = file {
        return Ok(Box::new(FileRateSource::new(path)));
    }

    let provider = config.provider.as_ref().with_context(|| {
        format!("No exchange rate API configured. Set provider.api_url or {API_URL_ENV}")
    })?;
    Ok(Box::new(RatesApiProvider::new(provider)))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxroute starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Rates {
            currency,
            amount,
            json,
            file,
        } => {
            let source = rate_source(&config, file.as_deref())?;
            cli::rates::run(&*source, &config, currency.as_deref(), amount, json).await
        }
        AppCommand::Export {
            amount,
            output,
            delimiter,
            file,
        } => {
            let source = rate_source(&config, file.as_deref())?;
            cli::export::run(
                &*source,
                &config,
                amount,
                output.as_deref(),
                delimiter,
            )
            .await
        }
    }
}
