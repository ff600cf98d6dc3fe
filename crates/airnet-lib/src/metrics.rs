//! Reachability and aggregate metrics over the flight graph.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;
use tracing::debug;

use crate::graph::{FlightGraph, NodeHandle};
use crate::model::{AirlineSet, CityKey};

/// Hop distance from `source` to every node, ignoring airlines.
///
/// The returned vector is indexed by handle; unreachable nodes (and index 0)
/// stay `None`. An invalid source yields all `None`.
pub fn hop_distances(graph: &FlightGraph, source: NodeHandle) -> Vec<Option<usize>> {
    let mut distances = vec![None; graph.node_count() + 1];
    if !graph.contains(source) {
        return distances;
    }

    let mut queue = VecDeque::new();
    distances[source] = Some(0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let next_distance = distances[current].map_or(0, |d| d + 1);
        for edge in graph.edges(current) {
            if distances[edge.target].is_none() {
                distances[edge.target] = Some(next_distance);
                queue.push_back(edge.target);
            }
        }
    }

    distances
}

/// Airports, cities and countries reachable from one airport within a hop limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Reachability {
    pub max_hops: usize,
    pub airports: usize,
    pub cities: usize,
    pub countries: usize,
}

/// Count what `source` reaches in at most `max_hops` flights, excluding the
/// origin airport, its city and its country.
pub fn reachable_within(graph: &FlightGraph, source: NodeHandle, max_hops: usize) -> Reachability {
    let mut reach = Reachability {
        max_hops,
        ..Reachability::default()
    };
    if !graph.contains(source) {
        return reach;
    }

    let distances = hop_distances(graph, source);
    let mut cities: HashSet<CityKey> = HashSet::new();
    let mut countries: HashSet<&str> = HashSet::new();
    let mut airports = 0usize;

    for handle in graph.handles() {
        if !matches!(distances[handle], Some(d) if d <= max_hops) {
            continue;
        }
        let Some(airport) = graph.airport(handle) else {
            continue;
        };
        airports += 1;
        cities.insert(airport.city_key());
        countries.insert(airport.country.as_str());
    }

    reach.airports = airports.saturating_sub(1);
    reach.cities = cities.len().saturating_sub(1);
    reach.countries = countries.len().saturating_sub(1);
    reach
}

/// Longest shortest-hop distance observed from any node.
///
/// Nodes a search cannot reach do not contribute, so on a disconnected graph
/// this is the largest diameter among the reachable parts.
pub fn diameter(graph: &FlightGraph) -> usize {
    let mut diameter = 0;
    let mut partial_runs = 0usize;

    for source in graph.handles() {
        let distances = hop_distances(graph, source);
        let mut unreached = false;
        for distance in distances.iter().skip(1) {
            match distance {
                Some(d) => diameter = diameter.max(*d),
                None => unreached = true,
            }
        }
        if unreached {
            partial_runs += 1;
        }
    }

    debug!(
        nodes = graph.node_count(),
        diameter, partial_runs, "computed diameter"
    );
    diameter
}

/// Outgoing traffic summary for one airport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AirportStats {
    /// (route, airline) pairs departing the airport.
    pub flights: usize,
    pub airlines: usize,
    pub destination_cities: usize,
    pub destination_countries: usize,
}

/// Departure statistics for `handle`; all zero for invalid handles.
pub fn airport_stats(graph: &FlightGraph, handle: NodeHandle) -> AirportStats {
    let mut airlines = AirlineSet::new();
    let mut cities: HashSet<CityKey> = HashSet::new();
    let mut countries: HashSet<&str> = HashSet::new();
    let mut flights = 0;

    for edge in graph.edges(handle) {
        flights += edge.airlines.len();
        airlines.union_with(&edge.airlines);
        if let Some(destination) = graph.airport(edge.target) {
            cities.insert(destination.city_key());
            countries.insert(destination.country.as_str());
        }
    }

    AirportStats {
        flights,
        airlines: airlines.len(),
        destination_cities: cities.len(),
        destination_countries: countries.len(),
    }
}
