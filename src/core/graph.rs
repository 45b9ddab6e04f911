//! Destination-indexed view over a set of exchange rate edges

use crate::core::rate::ExchangeRateEdge;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// Edges grouped by the currency they convert into.
///
/// Built once per session and read-only afterwards, so a single graph can be
/// shared by any number of concurrent resolutions. Nothing is validated on
/// build: negative rates, duplicates and cycles are kept as given.
#[derive(Debug, Clone, Default)]
pub struct RateGraph {
    fan_in: HashMap<String, Vec<ExchangeRateEdge>>,
    destinations: Vec<String>,
}

impl RateGraph {
    pub fn build<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = ExchangeRateEdge>,
    {
        let mut graph = RateGraph::default();
        let mut edge_count = 0usize;

        for edge in edges {
            edge_count += 1;
            match graph.fan_in.entry(edge.to_currency_code.clone()) {
                Entry::Occupied(mut into) => into.get_mut().push(edge),
                Entry::Vacant(slot) => {
                    graph.destinations.push(slot.key().clone());
                    slot.insert(vec![edge]);
                }
            }
        }

        debug!(
            edges = edge_count,
            destinations = graph.destinations.len(),
            "Built rate graph"
        );
        graph
    }

    /// Edges whose destination is `currency_code`, in input order. Empty when
    /// nothing converts into it.
    pub fn edges_into(&self, currency_code: &str) -> &[ExchangeRateEdge] {
        self.fan_in
            .get(currency_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distinct destination currencies in first-occurrence order.
    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }

    /// Whether the currency appears anywhere in the edge set, as origin or
    /// destination.
    pub fn contains(&self, currency_code: &str) -> bool {
        self.fan_in.contains_key(currency_code)
            || self
                .fan_in
                .values()
                .flatten()
                .any(|edge| edge.from_currency_code == currency_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges() -> Vec<ExchangeRateEdge> {
        vec![
            ExchangeRateEdge::new("CAD", "USD", 0.75),
            ExchangeRateEdge::new("USD", "EUR", 0.9),
            ExchangeRateEdge::new("CAD", "USD", 0.7),
            ExchangeRateEdge::new("GBP", "CAD", 1.7),
        ]
    }

    #[test]
    fn test_groups_edges_by_destination_in_input_order() {
        let graph = RateGraph::build(edges());

        let into_usd = graph.edges_into("USD");
        assert_eq!(into_usd.len(), 2);
        assert_eq!(into_usd[0].exchange_rate, 0.75);
        assert_eq!(into_usd[1].exchange_rate, 0.7);
        assert_eq!(graph.edges_into("EUR").len(), 1);
    }

    #[test]
    fn test_unknown_currency_has_no_incoming_edges() {
        let graph = RateGraph::build(edges());
        assert!(graph.edges_into("JPY").is_empty());
        assert!(!graph.contains("JPY"));
    }

    #[test]
    fn test_destinations_follow_first_occurrence() {
        let graph = RateGraph::build(edges());
        assert_eq!(graph.destinations(), ["USD", "EUR", "CAD"]);
    }

    #[test]
    fn test_contains_origin_only_currency() {
        let graph = RateGraph::build(edges());
        assert!(graph.contains("GBP"));
        assert!(graph.edges_into("GBP").is_empty());
    }

    #[test]
    fn test_empty_graph() {
        let graph = RateGraph::build(Vec::new());
        assert!(graph.destinations().is_empty());
    }
}
