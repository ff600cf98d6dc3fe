use std::collections::VecDeque;

use serde::Serialize;

use crate::graph::{FlightGraph, NodeHandle, INVALID_HANDLE};
use crate::model::AirlineSet;

/// One stop of an itinerary: the airlines usable for the hop into `airport`.
///
/// The first segment of an itinerary is the origin and has no airlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSegment {
    pub airlines: AirlineSet,
    pub airport: String,
}

impl PathSegment {
    fn origin(code: &str) -> Self {
        Self {
            airlines: AirlineSet::new(),
            airport: code.to_string(),
        }
    }
}

/// Ordered segments from an origin airport to a destination. Empty when no
/// route exists or the destination is already one of the origins.
pub type Itinerary = Vec<PathSegment>;

/// Number of flights taken along an itinerary.
pub fn hop_count(itinerary: &[PathSegment]) -> usize {
    itinerary.len().saturating_sub(1)
}

#[derive(Debug, Clone)]
struct Visit {
    parent: NodeHandle,
    airlines: AirlineSet,
}

/// Fewest-hop itinerary from any of `sources` to `destination`, using only
/// legs flown by at least one airline in `whitelist`.
///
/// All sources are seeded at distance zero in the order given; invalid source
/// handles are skipped. Returns an empty itinerary when `destination` is
/// invalid, unreachable, or itself one of the sources.
///
/// A node stops expanding its edges at the first edge that targets
/// `destination`, even when that edge carries no whitelisted airline. Later
/// edges of that node are never explored, so a constrained search can report
/// no route where a detour through them would exist.
pub fn shortest_path(
    graph: &FlightGraph,
    sources: &[NodeHandle],
    destination: NodeHandle,
    whitelist: &AirlineSet,
) -> Itinerary {
    if !graph.contains(destination) || sources.contains(&destination) {
        return Vec::new();
    }

    let mut visits: Vec<Option<Visit>> = vec![None; graph.node_count() + 1];
    let mut queue = VecDeque::new();

    for &source in sources {
        if !graph.contains(source) || visits[source].is_some() {
            continue;
        }
        visits[source] = Some(Visit {
            parent: INVALID_HANDLE,
            airlines: AirlineSet::new(),
        });
        queue.push_back(source);
    }

    while let Some(current) = queue.pop_front() {
        for edge in graph.edges(current) {
            let next = edge.target;
            if visits[next].is_none() {
                let usable = edge.airlines.intersection(whitelist);
                if !usable.is_empty() {
                    visits[next] = Some(Visit {
                        parent: current,
                        airlines: usable,
                    });
                    queue.push_back(next);
                }
            }
            // Any edge into the destination ends this node's expansion, usable or not.
            if next == destination {
                break;
            }
        }
    }

    reconstruct_path(graph, &visits, destination)
}

fn reconstruct_path(
    graph: &FlightGraph,
    visits: &[Option<Visit>],
    destination: NodeHandle,
) -> Itinerary {
    let mut path = Vec::new();
    let mut current = destination;

    while let Some(visit) = visits[current].as_ref() {
        let Some(airport) = graph.airport(current) else {
            break;
        };
        if visit.parent == INVALID_HANDLE {
            path.push(PathSegment::origin(&airport.code));
            break;
        }
        path.push(PathSegment {
            airlines: visit.airlines.clone(),
            airport: airport.code.clone(),
        });
        current = visit.parent;
    }

    path.reverse();
    path
}

/// Shortest itineraries from `sources` to any of `targets`.
///
/// Each target is searched independently; only the itineraries of minimal
/// length are kept, ties included, in target order. Unreachable targets are
/// ignored unless none is reachable, in which case one empty itinerary is
/// returned per target.
pub fn shortest_paths(
    graph: &FlightGraph,
    sources: &[NodeHandle],
    targets: &[NodeHandle],
    whitelist: &AirlineSet,
) -> Vec<Itinerary> {
    let mut best: Vec<Itinerary> = Vec::new();

    for &target in targets {
        let path = shortest_path(graph, sources, target, whitelist);
        if path.is_empty() {
            continue;
        }
        match best.first().map(Vec::len) {
            Some(len) if path.len() > len => {}
            Some(len) if path.len() == len => best.push(path),
            _ => best = vec![path],
        }
    }

    if best.is_empty() {
        return targets.iter().map(|_| Vec::new()).collect();
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Position;
    use crate::model::Airport;

    fn airport(code: &str) -> Airport {
        Airport {
            code: code.to_string(),
            name: code.to_string(),
            city: code.to_string(),
            country: "Testland".to_string(),
            position: Position::new(0.0, 0.0),
        }
    }

    fn graph_with(codes: &[&str]) -> FlightGraph {
        let mut graph = FlightGraph::new();
        for code in codes {
            graph.add_node(airport(code));
        }
        graph
    }

    fn set(codes: &[&str]) -> AirlineSet {
        codes.iter().copied().collect()
    }

    fn codes(path: &[PathSegment]) -> Vec<&str> {
        path.iter().map(|s| s.airport.as_str()).collect()
    }

    #[test]
    fn chains_airlines_per_hop() {
        let mut graph = graph_with(&["A", "B", "C"]);
        graph.add_flight(1, 2, "X1");
        graph.add_flight(2, 3, "X2");

        let path = shortest_path(&graph, &[1], 3, &set(&["X1", "X2"]));
        assert_eq!(
            path,
            vec![
                PathSegment::origin("A"),
                PathSegment {
                    airlines: set(&["X1"]),
                    airport: "B".to_string(),
                },
                PathSegment {
                    airlines: set(&["X2"]),
                    airport: "C".to_string(),
                },
            ]
        );
        assert_eq!(hop_count(&path), 2);

        assert!(shortest_path(&graph, &[1], 3, &set(&["X1"])).is_empty());
    }

    #[test]
    fn hop_airlines_are_whitelist_intersection() {
        let mut graph = graph_with(&["A", "B"]);
        graph.add_route(1, 2, set(&["X", "Y", "Z"]));

        let path = shortest_path(&graph, &[1], 2, &set(&["Y", "Z", "W"]));
        assert_eq!(path[1].airlines, set(&["Y", "Z"]));
    }

    #[test]
    fn destination_among_sources_is_empty() {
        let mut graph = graph_with(&["A", "B"]);
        graph.add_flight(1, 2, "X");
        assert!(shortest_path(&graph, &[2, 1], 2, &set(&["X"])).is_empty());
    }

    #[test]
    fn invalid_handles_are_tolerated() {
        let mut graph = graph_with(&["A", "B"]);
        graph.add_flight(1, 2, "X");
        let whitelist = set(&["X"]);

        assert!(shortest_path(&graph, &[1], INVALID_HANDLE, &whitelist).is_empty());
        assert!(shortest_path(&graph, &[1], 9, &whitelist).is_empty());
        assert_eq!(
            codes(&shortest_path(&graph, &[INVALID_HANDLE, 9, 1], 2, &whitelist)),
            vec!["A", "B"]
        );
    }

    #[test]
    fn starts_from_nearest_source() {
        // A -> B -> C -> D and E -> D
        let mut graph = graph_with(&["A", "B", "C", "D", "E"]);
        graph.add_flight(1, 2, "X");
        graph.add_flight(2, 3, "X");
        graph.add_flight(3, 4, "X");
        graph.add_flight(5, 4, "X");

        let path = shortest_path(&graph, &[1, 5], 4, &set(&["X"]));
        assert_eq!(codes(&path), vec!["E", "D"]);
    }

    #[test]
    fn prefers_fewer_hops_over_insertion_order() {
        // A -> B -> C -> D on X plus a direct A -> D on Y
        let mut graph = graph_with(&["A", "B", "C", "D"]);
        graph.add_flight(1, 2, "X");
        graph.add_flight(2, 3, "X");
        graph.add_flight(3, 4, "X");
        graph.add_flight(1, 4, "Y");

        assert_eq!(codes(&shortest_path(&graph, &[1], 4, &set(&["X", "Y"]))), vec!["A", "D"]);
        assert_eq!(
            codes(&shortest_path(&graph, &[1], 4, &set(&["X"]))),
            vec!["A", "B", "C", "D"]
        );
    }

    #[test]
    fn unusable_edge_to_destination_ends_node_expansion() {
        // U -> D on Y is listed before U -> B on X, and B -> D on X
        let mut graph = graph_with(&["U", "B", "D"]);
        graph.add_flight(1, 3, "Y");
        graph.add_flight(1, 2, "X");
        graph.add_flight(2, 3, "X");

        assert!(shortest_path(&graph, &[1], 3, &set(&["X"])).is_empty());
        assert_eq!(codes(&shortest_path(&graph, &[1], 3, &set(&["X", "Y"]))), vec!["U", "D"]);
        assert_eq!(codes(&shortest_path(&graph, &[1], 2, &set(&["X"]))), vec!["U", "B"]);
    }

    #[test]
    fn multi_target_keeps_shortest_ties() {
        // A -> B, A -> C, C -> D
        let mut graph = graph_with(&["A", "B", "C", "D"]);
        graph.add_flight(1, 2, "X");
        graph.add_flight(1, 3, "X");
        graph.add_flight(3, 4, "X");
        let whitelist = set(&["X"]);

        let paths = shortest_paths(&graph, &[1], &[4, 2, 3], &whitelist);
        let found: Vec<Vec<&str>> = paths.iter().map(|p| codes(p)).collect();
        assert_eq!(found, vec![vec!["A", "B"], vec!["A", "C"]]);
    }

    #[test]
    fn multi_target_ignores_unreachable_targets() {
        let mut graph = graph_with(&["A", "B", "C"]);
        graph.add_flight(1, 2, "X");
        let whitelist = set(&["X"]);

        let paths = shortest_paths(&graph, &[1], &[3, 2], &whitelist);
        assert_eq!(paths.len(), 1);
        assert_eq!(codes(&paths[0]), vec!["A", "B"]);
    }

    #[test]
    fn multi_target_all_unreachable_yields_empty_per_target() {
        let graph = graph_with(&["A", "B", "C"]);
        let paths = shortest_paths(&graph, &[1], &[2, 3], &set(&["X"]));
        assert_eq!(paths, vec![Vec::new(), Vec::new()]);
        assert!(shortest_paths(&graph, &[1], &[], &set(&["X"])).is_empty());
    }
}
