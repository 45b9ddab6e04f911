pub mod export;
pub mod rates;
pub mod setup;
pub mod ui;

use crate::core::config::AppConfig;
use crate::core::country::CountryTable;
use crate::core::convert::RateSession;
use crate::core::feed::RateSource;
use anyhow::Result;

/// Fetches the edge list once and builds the session every command in this
/// run resolves against.
pub async fn open_session(
    source: &(dyn RateSource + Send + Sync),
    config: &AppConfig,
) -> Result<RateSession> {
    let pb = ui::new_spinner("Fetching exchange rates...");
    let edges = source.fetch_edges().await;
    pb.finish_and_clear();

    Ok(RateSession::new(edges?, &config.base_currency.to_uppercase())
        .with_countries(CountryTable::with_overrides(&config.countries))
        .with_options(config.resolver))
}
