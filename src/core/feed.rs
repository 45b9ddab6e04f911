//! Exchange rate feed abstractions and record parsing

use crate::core::error::ConversionError;
use crate::core::rate::ExchangeRateEdge;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Source of the full edge list for one resolution session.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_edges(&self) -> Result<Vec<ExchangeRateEdge>>;
}

/// Parses a feed body: a JSON array of `{fromCurrencyCode, toCurrencyCode,
/// exchangeRate}` records.
///
/// A record missing a field, or carrying one of the wrong type, fails the
/// whole parse with [`ConversionError::MalformedEdge`]. Skipping it would
/// silently change which currencies are reachable.
pub fn parse_edges(body: &str) -> Result<Vec<ExchangeRateEdge>> {
    let records: Vec<Value> =
        serde_json::from_str(body).context("Exchange rate feed is not a JSON array")?;
    Ok(edges_from_records(&records)?)
}

pub fn edges_from_records(
    records: &[Value],
) -> std::result::Result<Vec<ExchangeRateEdge>, ConversionError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| edge_from_record(index, record))
        .collect()
}

fn edge_from_record(
    index: usize,
    record: &Value,
) -> std::result::Result<ExchangeRateEdge, ConversionError> {
    let malformed = |field: &str| ConversionError::MalformedEdge {
        index,
        field: field.to_string(),
    };

    let code = |field: &str| {
        record
            .get(field)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .ok_or_else(|| malformed(field))
    };

    Ok(ExchangeRateEdge {
        from_currency_code: code("fromCurrencyCode")?,
        to_currency_code: code("toCurrencyCode")?,
        exchange_rate: record
            .get("exchangeRate")
            .and_then(Value::as_f64)
            .ok_or_else(|| malformed("exchangeRate"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feed() {
        let body = r#"[
            {"exchangeRate": 0.7618, "fromCurrencyCode": "CAD", "fromCurrencyName": "Canada Dollar", "toCurrencyCode": "USD"},
            {"exchangeRate": 1.3127, "fromCurrencyCode": "USD", "toCurrencyCode": "CAD"}
        ]"#;

        let edges = parse_edges(body).unwrap();
        assert_eq!(
            edges,
            vec![
                ExchangeRateEdge::new("CAD", "USD", 0.7618),
                ExchangeRateEdge::new("USD", "CAD", 1.3127),
            ]
        );
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let body = r#"[
            {"exchangeRate": 0.7618, "fromCurrencyCode": "CAD", "toCurrencyCode": "USD"},
            {"exchangeRate": 1.3127, "fromCurrencyCode": "USD"}
        ]"#;

        let err = parse_edges(body).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConversionError>(),
            Some(&ConversionError::MalformedEdge {
                index: 1,
                field: "toCurrencyCode".to_string()
            })
        );
    }

    #[test]
    fn test_non_numeric_rate_is_malformed() {
        let body = r#"[{"exchangeRate": "fast", "fromCurrencyCode": "CAD", "toCurrencyCode": "USD"}]"#;

        let err = parse_edges(body).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConversionError>(),
            Some(ConversionError::MalformedEdge { index: 0, field }) if field == "exchangeRate"
        ));
    }

    #[test]
    fn test_not_an_array() {
        let err = parse_edges(r#"{"rates": []}"#).unwrap_err();
        assert!(err.downcast_ref::<ConversionError>().is_none());
    }
}
