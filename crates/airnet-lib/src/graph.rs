//! Directed flight graph over airports.
//!
//! Nodes live in a dense array addressed by [`NodeHandle`]; handles start at 1
//! and [`INVALID_HANDLE`] (0) means "not found". Each ordered airport pair has
//! at most one [`Edge`], labelled with every airline flying that leg. The graph
//! carries no traversal scratch state, so algorithms allocate their own
//! per-query arrays indexed by handle and take `&FlightGraph`.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{AirlineSet, Airport};

/// Stable integer identifier of an airport within a [`FlightGraph`].
pub type NodeHandle = usize;

/// Reserved handle returned for unknown airports.
pub const INVALID_HANDLE: NodeHandle = 0;

/// Airlines to attach to an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeLabel {
    Single(String),
    Set(AirlineSet),
}

/// Directed arc to `target`, flown by `airlines`.
#[derive(Debug, Clone)]
pub struct Edge {
    pub target: NodeHandle,
    pub airlines: AirlineSet,
}

#[derive(Debug, Clone)]
struct Node {
    airport: Airport,
    adjacency: Vec<Edge>,
}

/// Flight network graph built once during ingestion and queried afterwards.
#[derive(Debug, Clone, Default)]
pub struct FlightGraph {
    nodes: Vec<Node>,
    airport_to_node: HashMap<String, NodeHandle>,
    dropped_edges: usize,
}

impl FlightGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty graph with room for `capacity` airports. The capacity is advisory.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            airport_to_node: HashMap::with_capacity(capacity),
            dropped_edges: 0,
        }
    }

    /// Append an airport and return its newly assigned handle.
    pub fn add_node(&mut self, airport: Airport) -> NodeHandle {
        self.nodes.push(Node {
            airport,
            adjacency: Vec::new(),
        });
        let handle = self.nodes.len();
        let code = self.nodes[handle - 1].airport.code.clone();
        self.airport_to_node.insert(code, handle);
        handle
    }

    /// Add `label`'s airlines to the `source -> dest` edge, creating it if needed.
    ///
    /// Invalid handles make this a no-op that is counted in
    /// [`dropped_edge_count`](Self::dropped_edge_count).
    pub fn add_edge(&mut self, source: NodeHandle, dest: NodeHandle, label: EdgeLabel) {
        if !self.contains(source) || !self.contains(dest) {
            self.dropped_edges += 1;
            debug!(source, dest, nodes = self.nodes.len(), "dropping edge with invalid endpoint");
            return;
        }

        let adjacency = &mut self.nodes[source - 1].adjacency;
        let position = adjacency.iter().position(|edge| edge.target == dest);
        let edge = match position {
            Some(index) => &mut adjacency[index],
            None => {
                adjacency.push(Edge {
                    target: dest,
                    airlines: AirlineSet::new(),
                });
                let last = adjacency.len() - 1;
                &mut adjacency[last]
            }
        };

        match label {
            EdgeLabel::Single(code) => {
                edge.airlines.insert(code);
            }
            EdgeLabel::Set(set) => edge.airlines.union_with(&set),
        }
    }

    /// Record one airline flying `source -> dest`.
    pub fn add_flight(&mut self, source: NodeHandle, dest: NodeHandle, airline: &str) {
        self.add_edge(source, dest, EdgeLabel::Single(airline.to_string()));
    }

    /// Record a set of airlines flying `source -> dest`.
    pub fn add_route(&mut self, source: NodeHandle, dest: NodeHandle, airlines: AirlineSet) {
        self.add_edge(source, dest, EdgeLabel::Set(airlines));
    }

    /// Handle of the airport with `code`, or [`INVALID_HANDLE`] when absent.
    pub fn find_airport_node(&self, code: &str) -> NodeHandle {
        self.airport_to_node
            .get(code)
            .copied()
            .unwrap_or(INVALID_HANDLE)
    }

    /// Whether `handle` addresses a node of this graph.
    pub fn contains(&self, handle: NodeHandle) -> bool {
        (1..=self.nodes.len()).contains(&handle)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All valid handles in insertion order.
    pub fn handles(&self) -> impl Iterator<Item = NodeHandle> {
        1..=self.nodes.len()
    }

    pub fn airport(&self, handle: NodeHandle) -> Option<&Airport> {
        self.node(handle).map(|node| &node.airport)
    }

    /// Outgoing edges of `handle` in insertion order; empty for invalid handles.
    pub fn edges(&self, handle: NodeHandle) -> &[Edge] {
        self.node(handle)
            .map(|node| node.adjacency.as_slice())
            .unwrap_or(&[])
    }

    /// Edges rejected because an endpoint handle was invalid.
    pub fn dropped_edge_count(&self) -> usize {
        self.dropped_edges
    }

    /// Number of distinct ordered airport pairs with at least one flight.
    pub fn total_routes(&self) -> usize {
        self.nodes.iter().map(|node| node.adjacency.len()).sum()
    }

    /// Number of (route, airline) pairs.
    pub fn total_flights(&self) -> usize {
        self.nodes
            .iter()
            .flat_map(|node| node.adjacency.iter())
            .map(|edge| edge.airlines.len())
            .sum()
    }

    fn node(&self, handle: NodeHandle) -> Option<&Node> {
        handle.checked_sub(1).and_then(|index| self.nodes.get(index))
    }
}
