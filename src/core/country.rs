//! Currency code to country name lookup

use std::collections::HashMap;

const BUILTIN_COUNTRIES: &[(&str, &str)] = &[
    ("AUD", "Australia"),
    ("BRL", "Brazil"),
    ("CAD", "Canada"),
    ("CHF", "Switzerland"),
    ("CNY", "China"),
    ("DKK", "Denmark"),
    ("EUR", "Europe"),
    ("GBP", "United Kingdom"),
    ("HKD", "Hong Kong"),
    ("INR", "India"),
    ("JPY", "Japan"),
    ("KRW", "South Korea"),
    ("MXN", "Mexico"),
    ("NOK", "Norway"),
    ("NZD", "New Zealand"),
    ("SEK", "Sweden"),
    ("SGD", "Singapore"),
    ("USD", "United States of America"),
    ("ZAR", "South Africa"),
];

/// Read-only code to country table. Unknown codes resolve to `None`.
#[derive(Debug, Clone)]
pub struct CountryTable {
    countries: HashMap<String, String>,
}

impl CountryTable {
    pub fn empty() -> Self {
        Self {
            countries: HashMap::new(),
        }
    }

    /// Built-in table with `overrides` layered on top.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut table = Self::default();
        table.countries.extend(
            overrides
                .iter()
                .map(|(code, country)| (code.to_uppercase(), country.clone())),
        );
        table
    }

    pub fn country(&self, currency_code: &str) -> Option<&str> {
        self.countries.get(currency_code).map(String::as_str)
    }
}

impl Default for CountryTable {
    fn default() -> Self {
        Self {
            countries: BUILTIN_COUNTRIES
                .iter()
                .map(|(code, country)| (code.to_string(), country.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let table = CountryTable::default();
        assert_eq!(table.country("CAD"), Some("Canada"));
        assert_eq!(table.country("XYZ"), None);
    }

    #[test]
    fn test_overrides_replace_and_extend() {
        let overrides = HashMap::from([
            ("eur".to_string(), "European Union".to_string()),
            ("BTC".to_string(), "Internet".to_string()),
        ]);
        let table = CountryTable::with_overrides(&overrides);
        assert_eq!(table.country("EUR"), Some("European Union"));
        assert_eq!(table.country("BTC"), Some("Internet"));
        assert_eq!(table.country("USD"), Some("United States of America"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(CountryTable::empty().country("CAD"), None);
    }
}
