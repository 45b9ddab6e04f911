//! Exchange rate edges and resolution results

use serde::{Serialize, Serializer};

/// Separator used when a conversion path is displayed.
pub const PATH_SEPARATOR: &str = " | ";

/// One unit of `from_currency_code` converts to `exchange_rate` units of
/// `to_currency_code`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRateEdge {
    pub from_currency_code: String,
    pub to_currency_code: String,
    pub exchange_rate: f64,
}

impl ExchangeRateEdge {
    pub fn new(from: &str, to: &str, exchange_rate: f64) -> Self {
        Self {
            from_currency_code: from.to_string(),
            to_currency_code: to.to_string(),
            exchange_rate,
        }
    }
}

/// Best composed conversion value from the base currency into a target,
/// along with the currencies traversed to get there.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BestRate {
    pub amount: f64,
    pub path: Vec<String>,
}

impl BestRate {
    /// The "no path" result.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_found(&self) -> bool {
        self.amount != 0.0 && !self.path.is_empty()
    }

    pub fn path_display(&self) -> String {
        self.path.join(PATH_SEPARATOR)
    }
}

/// An output row: the best rate into one currency, scaled by the requested
/// amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRecord {
    pub currency_code: String,
    pub country: Option<String>,
    pub amount: f64,
    #[serde(serialize_with = "serialize_path")]
    pub path: Vec<String>,
}

impl CurrencyRecord {
    pub fn path_display(&self) -> String {
        self.path.join(PATH_SEPARATOR)
    }
}

fn serialize_path<S: Serializer>(path: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.join(PATH_SEPARATOR))
}
