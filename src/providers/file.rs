use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, instrument};

use crate::core::feed::{RateSource, parse_edges};
use crate::core::rate::ExchangeRateEdge;

/// Reads the edge list from a local JSON file in the same shape the rates
/// API returns.
pub struct FileRateSource {
    path: PathBuf,
}

impl FileRateSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileRateSource { path: path.into() }
    }
}

#[async_trait]
impl RateSource for FileRateSource {
    #[instrument(name = "FileRateFetch", skip(self))]
    async fn fetch_edges(&self) -> Result<Vec<ExchangeRateEdge>> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read rates file: {}", self.path.display()))?;
        let edges = parse_edges(&body)
            .with_context(|| format!("Failed to parse rates file: {}", self.path.display()))?;
        debug!(path = %self.path.display(), edges = edges.len(), "Loaded exchange rates");
        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_rates_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"fromCurrencyCode": "CAD", "toCurrencyCode": "USD", "exchangeRate": 0.75}}]"#
        )
        .unwrap();

        let edges = FileRateSource::new(file.path()).fetch_edges().await.unwrap();
        assert_eq!(edges, vec![ExchangeRateEdge::new("CAD", "USD", 0.75)]);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = FileRateSource::new("/nonexistent/rates.json");
        assert!(source.fetch_edges().await.is_err());
    }
}
