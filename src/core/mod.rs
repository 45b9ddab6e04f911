//! Rate resolution core: graph, resolver, aggregation and export

pub mod config;
pub mod convert;
pub mod country;
pub mod error;
pub mod export;
pub mod feed;
pub mod graph;
pub mod log;
pub mod rate;
pub mod resolver;

// Re-export main types for cleaner imports
pub use convert::{RateSession, resolve_all, resolve_one, to_table};
pub use error::ConversionError;
pub use feed::RateSource;
pub use graph::RateGraph;
pub use rate::{BestRate, CurrencyRecord, ExchangeRateEdge};
pub use resolver::{Resolver, ResolverOptions};
