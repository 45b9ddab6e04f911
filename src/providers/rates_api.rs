use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::core::config::ProviderConfig;
use crate::core::feed::{RateSource, parse_edges};
use crate::core::rate::ExchangeRateEdge;
use crate::providers::util::with_retry;

/// Fetches the edge list from the exchange rate API as `GET {api_url}?seed={seed}`.
pub struct RatesApiProvider {
    api_url: String,
    seed: u64,
    retries: usize,
    retry_delay_ms: u64,
}

impl RatesApiProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        RatesApiProvider {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            seed: config.seed,
            retries: config.retries,
            retry_delay_ms: config.retry_delay_ms,
        }
    }

    fn url(&self) -> String {
        format!("{}?seed={}", self.api_url, self.seed)
    }
}

async fn fetch_body(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP error: {} for URL: {}", response.status(), url));
    }

    Ok(response.text().await?)
}

#[async_trait]
impl RateSource for RatesApiProvider {
    #[instrument(name = "RatesApiFetch", skip(self))]
    async fn fetch_edges(&self) -> Result<Vec<ExchangeRateEdge>> {
        let url = self.url();
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fxroute/0.1")
            .build()?;
        let body = with_retry(
            || fetch_body(&client, &url),
            self.retries,
            self.retry_delay_ms,
        )
        .await
        .context("Couldn't get exchange rates from the API")?;

        let edges = parse_edges(&body)
            .with_context(|| format!("Failed to parse exchange rates from {url}"))?;
        debug!(edges = edges.len(), "Received exchange rates");
        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ConversionError;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_url: &str) -> ProviderConfig {
        ProviderConfig {
            api_url: format!("{api_url}/api/exchange-rates"),
            seed: 33331,
            retries: 1,
            retry_delay_ms: 1,
        }
    }

    #[tokio::test]
    async fn test_fetch_edges() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"[
            {"exchangeRate": 0.7618, "fromCurrencyCode": "CAD", "fromCurrencyName": "Canada Dollar", "toCurrencyCode": "USD", "toCurrencyName": "USA Dollar"},
            {"exchangeRate": 0.9,    "fromCurrencyCode": "USD", "fromCurrencyName": "USA Dollar", "toCurrencyCode": "EUR", "toCurrencyName": "Euro"}
        ]"#;

        Mock::given(method("GET"))
            .and(path("/api/exchange-rates"))
            .and(query_param("seed", "33331"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = RatesApiProvider::new(&config(&mock_server.uri()));
        let edges = provider.fetch_edges().await.unwrap();

        assert_eq!(
            edges,
            vec![
                ExchangeRateEdge::new("CAD", "USD", 0.7618),
                ExchangeRateEdge::new("USD", "EUR", 0.9),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_edges_http_error_is_retried_then_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/exchange-rates"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&mock_server)
            .await;

        let provider = RatesApiProvider::new(&config(&mock_server.uri()));
        let err = provider.fetch_edges().await.unwrap_err();
        assert!(format!("{err:#}").contains("HTTP error: 500"));
    }

    #[tokio::test]
    async fn test_fetch_edges_malformed_record() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/exchange-rates"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"[{"fromCurrencyCode": "CAD", "toCurrencyCode": "USD"}]"#),
            )
            .mount(&mock_server)
            .await;

        let provider = RatesApiProvider::new(&config(&mock_server.uri()));
        let err = provider.fetch_edges().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConversionError>(),
            Some(ConversionError::MalformedEdge { index: 0, .. })
        ));
    }
}
