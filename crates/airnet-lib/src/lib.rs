//! airnet library entry points.
//!
//! This crate loads a flight network from CSV tables, indexes airports by
//! code, city and location, and answers route and reachability queries over
//! the directed airport graph. The CLI should only depend on the functions
//! exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod dataset;
pub mod error;
pub mod geo;
pub mod graph;
pub mod metrics;
pub mod model;
pub mod output;
pub mod path;
pub mod repository;
pub mod routing;
pub mod scc;
pub mod spatial;

pub use dataset::{default_dataset_dir, load_dataset, resolve_dataset_dir, Dataset, DATA_DIR_ENV};
pub use error::{Error, Result};
pub use geo::{great_circle_distance, Position};
pub use graph::{EdgeLabel, FlightGraph, NodeHandle, INVALID_HANDLE};
pub use metrics::{airport_stats, diameter, hop_distances, reachable_within, AirportStats, Reachability};
pub use model::{Airline, AirlineSet, Airport, CityKey};
pub use output::{AirportReport, NetworkReport, RouteItinerary, RouteStep, RouteSummary};
pub use path::{hop_count, shortest_path, shortest_paths, Itinerary, PathSegment};
pub use repository::Repository;
pub use routing::{plan_route, resolve_endpoint, AirlineFilter, Endpoint, RoutePlan, RouteRequest};
pub use scc::{scc_count, strongly_connected_components};
