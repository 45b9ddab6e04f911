//! Drives the resolver for one or all currencies and shapes the results
//! into [`CurrencyRecord`]s.

use crate::core::country::CountryTable;
use crate::core::error::{ConversionError, Result};
use crate::core::export::{self, ExportOptions};
use crate::core::graph::RateGraph;
use crate::core::rate::{CurrencyRecord, ExchangeRateEdge};
use crate::core::resolver::{Resolver, ResolverOptions};
use rayon::prelude::*;
use tracing::{debug, info};

/// Resolves `target` and scales the result by `multiplier`. A currency with
/// no path comes back with an amount of zero and an empty path.
pub fn best_rate_for_one(
    resolver: &Resolver<'_>,
    countries: &CountryTable,
    target: &str,
    multiplier: f64,
) -> Result<CurrencyRecord> {
    let best = resolver.best_rate(target)?;
    Ok(CurrencyRecord {
        currency_code: target.to_string(),
        country: countries.country(target).map(str::to_string),
        amount: best.amount * multiplier,
        path: best.path,
    })
}

/// Resolves every currency that appears as an edge destination, in
/// first-occurrence order, and drops those whose scaled amount is not
/// strictly positive.
///
/// Targets are resolved in parallel against the shared graph; the output
/// order does not depend on completion order.
pub fn best_rate_for_all(
    resolver: &Resolver<'_>,
    graph: &RateGraph,
    countries: &CountryTable,
    multiplier: f64,
) -> Result<Vec<CurrencyRecord>> {
    let records = graph
        .destinations()
        .par_iter()
        .map(|target| best_rate_for_one(resolver, countries, target, multiplier))
        .collect::<Result<Vec<_>>>()?;

    let total = records.len();
    let reachable: Vec<CurrencyRecord> = records
        .into_iter()
        .filter(|record| record.amount > 0.0)
        .collect();
    debug!(
        base = resolver.base(),
        total,
        reachable = reachable.len(),
        "Resolved all currencies"
    );
    Ok(reachable)
}

/// One resolution session: a graph built once from the fetched edges, plus
/// the base currency and lookups every query shares.
#[derive(Debug, Clone)]
pub struct RateSession {
    graph: RateGraph,
    base: String,
    countries: CountryTable,
    options: ResolverOptions,
}

impl RateSession {
    pub fn new<I>(edges: I, base: &str) -> Self
    where
        I: IntoIterator<Item = ExchangeRateEdge>,
    {
        Self {
            graph: RateGraph::build(edges),
            base: base.to_string(),
            countries: CountryTable::default(),
            options: ResolverOptions::default(),
        }
    }

    pub fn with_countries(mut self, countries: CountryTable) -> Self {
        self.countries = countries;
        self
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.graph, &self.base, self.options)
    }

    /// Best rate into a single currency. Fails with
    /// [`ConversionError::NotFound`] when the base currency cannot reach it,
    /// whether or not the currency appears in the edge set at all.
    pub fn resolve_one(&self, target: &str, amount: f64) -> Result<CurrencyRecord> {
        let resolver = self.resolver();
        let best = resolver.best_rate(target)?;
        if !best.is_found() {
            info!(
                currency = target,
                known = self.graph.contains(target),
                "No conversion path"
            );
            return Err(ConversionError::NotFound {
                currency: target.to_string(),
            });
        }

        Ok(CurrencyRecord {
            currency_code: target.to_string(),
            country: self.countries.country(target).map(str::to_string),
            amount: best.amount * amount,
            path: best.path,
        })
    }

    pub fn resolve_all(&self, amount: f64) -> Result<Vec<CurrencyRecord>> {
        let resolver = self.resolver();
        best_rate_for_all(&resolver, &self.graph, &self.countries, amount)
    }

    pub fn to_table(&self, records: &[CurrencyRecord], amount: f64) -> Result<String> {
        export::render_table(records, amount, &self.base, &ExportOptions::default())
    }
}

pub fn resolve_one(
    edges: &[ExchangeRateEdge],
    base: &str,
    target: &str,
    amount: f64,
) -> Result<CurrencyRecord> {
    RateSession::new(edges.iter().cloned(), base).resolve_one(target, amount)
}

pub fn resolve_all(
    edges: &[ExchangeRateEdge],
    base: &str,
    amount: f64,
) -> Result<Vec<CurrencyRecord>> {
    RateSession::new(edges.iter().cloned(), base).resolve_all(amount)
}

pub fn to_table(records: &[CurrencyRecord], amount: f64, base: &str) -> Result<String> {
    export::render_table(records, amount, base, &ExportOptions::default())
}
