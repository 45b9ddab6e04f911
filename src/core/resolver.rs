//! Recursive best-rate search over a [`RateGraph`].
//!
//! For a target currency every edge into it is a candidate. An edge leaving
//! the base currency is a one-hop path; any other edge is priced by first
//! resolving its origin, recursively, and multiplying. The candidate with the
//! strictly largest value wins and ties go to the edge seen first. A NaN
//! candidate is skipped.
//!
//! By default nothing is memoized and cycles are not detected, so an edge
//! set where a currency can only be reached through itself recurses without
//! bound. [`ResolverOptions`] can turn on a per-session memo and a visited-set
//! guard; neither changes the output for acyclic edge sets.

use crate::core::error::{ConversionError, Result};
use crate::core::graph::RateGraph;
use crate::core::rate::{BestRate, ExchangeRateEdge};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolverOptions {
    /// Fail with [`ConversionError::CyclicPath`] instead of recursing
    /// forever when a currency is revisited on the current search path.
    #[serde(default)]
    pub cycle_guard: bool,
    /// Reuse results for currencies already resolved in this session.
    #[serde(default)]
    pub memoize: bool,
}

pub struct Resolver<'g> {
    graph: &'g RateGraph,
    base: String,
    options: ResolverOptions,
    memo: RwLock<HashMap<String, BestRate>>,
}

impl<'g> Resolver<'g> {
    pub fn new(graph: &'g RateGraph, base: &str, options: ResolverOptions) -> Self {
        Self {
            graph,
            base: base.to_string(),
            options,
            memo: RwLock::new(HashMap::new()),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Best rate from the base currency into `target`. A target nothing
    /// converts into, or one only reachable from elsewhere, yields
    /// [`BestRate::none`].
    pub fn best_rate(&self, target: &str) -> Result<BestRate> {
        let mut visiting = Vec::new();
        let best = self.resolve(target, &mut visiting)?;
        debug!(
            base = %self.base,
            currency = target,
            amount = best.amount,
            path = %best.path_display(),
            "Resolved best rate"
        );
        Ok(best)
    }

    fn resolve(&self, target: &str, visiting: &mut Vec<String>) -> Result<BestRate> {
        if let Some(hit) = self.memoized(target) {
            return Ok(hit);
        }

        if self.options.cycle_guard {
            if let Some(start) = visiting.iter().position(|c| c == target) {
                let mut path = visiting[start..].to_vec();
                path.push(target.to_string());
                return Err(ConversionError::CyclicPath { path });
            }
            visiting.push(target.to_string());
        }

        let mut best: Option<BestRate> = None;
        for edge in self.graph.edges_into(target) {
            let candidate = self.candidate(edge, visiting)?;
            // Incomparable, so it can neither win nor block a later candidate.
            if candidate.amount.is_nan() {
                continue;
            }
            best = match best {
                Some(current) if candidate.amount > current.amount => Some(candidate),
                Some(current) => Some(current),
                None => Some(candidate),
            };
        }

        if self.options.cycle_guard {
            visiting.pop();
        }

        let best = best.unwrap_or_default();
        self.remember(target, &best);
        Ok(best)
    }

    fn candidate(&self, edge: &ExchangeRateEdge, visiting: &mut Vec<String>) -> Result<BestRate> {
        if edge.from_currency_code == self.base {
            return Ok(BestRate {
                amount: edge.exchange_rate,
                path: vec![self.base.clone(), edge.to_currency_code.clone()],
            });
        }

        let upstream = self.resolve(&edge.from_currency_code, visiting)?;
        if !upstream.is_found() {
            return Ok(BestRate::none());
        }

        let mut path = upstream.path;
        path.push(edge.to_currency_code.clone());
        Ok(BestRate {
            amount: upstream.amount * edge.exchange_rate,
            path,
        })
    }

    fn memoized(&self, target: &str) -> Option<BestRate> {
        if !self.options.memoize {
            return None;
        }
        self.memo
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(target)
            .cloned()
    }

    fn remember(&self, target: &str, best: &BestRate) {
        if !self.options.memoize {
            return;
        }
        self.memo
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(target.to_string(), best.clone());
    }
}
