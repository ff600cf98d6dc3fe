//! Route planning on top of the flight graph.
//!
//! This module provides:
//! - [`Endpoint`] - an airport, a city or a coordinate radius, parsed from text
//! - [`AirlineFilter`] - which airlines a route may use
//! - [`RouteRequest`] / [`RoutePlan`] - the planning request and its result
//! - [`plan_route`] - resolves endpoints, runs the search and maps empty results to errors
//!
//! # Example
//!
//! ```ignore
//! use airnet_lib::{load_dataset, plan_route, RouteRequest};
//!
//! let dataset = load_dataset("path/to/dataset".as_ref())?;
//! let request = RouteRequest::new("OPO".parse()?, "city:London,United Kingdom".parse()?);
//! let plan = plan_route(&dataset, &request)?;
//! println!("Route: {} hops", plan.hop_count());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::geo::Position;
use crate::graph::NodeHandle;
use crate::model::AirlineSet;
use crate::path::{hop_count, shortest_paths, Itinerary};

/// Number of fuzzy suggestions attached to unknown-airport errors.
pub(crate) const SUGGESTION_LIMIT: usize = 3;

/// One side of a route query.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// A single airport by code.
    Airport(String),
    /// Every airport of a city.
    City { city: String, country: String },
    /// Every airport within `radius_km` of a coordinate.
    Location { position: Position, radius_km: f64 },
}

impl FromStr for Endpoint {
    type Err = Error;

    /// Parse `OPO`, `city:Porto,Portugal` or `loc:41.2,-8.6,50`.
    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        let invalid = |message: &str| Error::InvalidEndpoint {
            input: input.to_string(),
            message: message.to_string(),
        };

        if let Some(rest) = input.strip_prefix("city:") {
            let (city, country) = rest
                .split_once(',')
                .ok_or_else(|| invalid("expected city:<city>,<country>"))?;
            let (city, country) = (city.trim(), country.trim());
            if city.is_empty() || country.is_empty() {
                return Err(invalid("city and country must not be empty"));
            }
            return Ok(Endpoint::City {
                city: city.to_string(),
                country: country.to_string(),
            });
        }

        if let Some(rest) = input.strip_prefix("loc:") {
            let parts: Vec<&str> = rest.split(',').map(str::trim).collect();
            let [latitude, longitude, radius] = parts[..] else {
                return Err(invalid("expected loc:<latitude>,<longitude>,<radius_km>"));
            };
            let parse = |value: &str| {
                value
                    .parse::<f64>()
                    .map_err(|_| invalid(&format!("'{value}' is not a number")))
            };
            let position = Position::checked(parse(latitude)?, parse(longitude)?)?;
            let radius_km = parse(radius)?;
            if !radius_km.is_finite() || radius_km <= 0.0 {
                return Err(Error::InvalidCoordinate {
                    message: format!("radius {radius_km} must be a positive number of kilometres"),
                });
            }
            return Ok(Endpoint::Location {
                position,
                radius_km,
            });
        }

        if input.is_empty() || input.contains(char::is_whitespace) {
            return Err(invalid("expected an airport code, city:... or loc:..."));
        }
        Ok(Endpoint::Airport(input.to_string()))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Airport(code) => f.write_str(code),
            Endpoint::City { city, country } => write!(f, "{city}, {country}"),
            Endpoint::Location {
                position,
                radius_km,
            } => write!(
                f,
                "{radius_km} km around ({}, {})",
                position.latitude, position.longitude
            ),
        }
    }
}

/// Airlines a route may use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AirlineFilter {
    /// Every airline known to the dataset.
    #[default]
    Any,
    /// Only the listed airline codes; each must exist.
    Only(Vec<String>),
}

impl AirlineFilter {
    /// Build the whitelist, rejecting unknown airline codes.
    pub fn resolve(&self, dataset: &Dataset) -> Result<AirlineSet> {
        match self {
            AirlineFilter::Any => Ok(dataset
                .repository
                .airlines()
                .map(|airline| airline.code.clone())
                .collect()),
            AirlineFilter::Only(codes) => {
                let mut whitelist = AirlineSet::new();
                for code in codes {
                    if dataset.repository.find_airline(code).is_none() {
                        return Err(Error::UnknownAirline { code: code.clone() });
                    }
                    whitelist.insert(code.as_str());
                }
                Ok(whitelist)
            }
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub origin: Endpoint,
    pub destination: Endpoint,
    pub airlines: AirlineFilter,
}

impl RouteRequest {
    /// Request a route on any airline.
    pub fn new(origin: Endpoint, destination: Endpoint) -> Self {
        Self {
            origin,
            destination,
            airlines: AirlineFilter::Any,
        }
    }

    /// Restrict the request to the given airlines.
    pub fn with_airlines(mut self, airlines: AirlineFilter) -> Self {
        self.airlines = airlines;
        self
    }
}

/// Planned route returned by the library.
///
/// Holds every itinerary of minimal length between the resolved endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub origin: String,
    pub destination: String,
    pub itineraries: Vec<Itinerary>,
}

impl RoutePlan {
    /// Number of flights in each itinerary.
    pub fn hop_count(&self) -> usize {
        self.itineraries
            .first()
            .map(|itinerary| hop_count(itinerary))
            .unwrap_or(0)
    }
}

/// Resolve an endpoint to the graph handles of its airports.
pub fn resolve_endpoint(dataset: &Dataset, endpoint: &Endpoint) -> Result<Vec<NodeHandle>> {
    let repository = &dataset.repository;
    let codes: Vec<&str> = match endpoint {
        Endpoint::Airport(code) => {
            let airport = repository.find_airport(code).ok_or_else(|| {
                let suggestions = repository.fuzzy_airport_matches(code, SUGGESTION_LIMIT);
                Error::UnknownAirport {
                    code: code.clone(),
                    suggestions,
                }
            })?;
            vec![airport.code.as_str()]
        }
        Endpoint::City { city, country } => repository
            .airports_in_city(city, country)
            .ok_or_else(|| Error::UnknownCity {
                city: city.clone(),
                country: country.clone(),
            })?
            .into_iter()
            .map(|airport| airport.code.as_str())
            .collect(),
        Endpoint::Location {
            position,
            radius_km,
        } => {
            let nearby = repository.airports_within(*position, *radius_km);
            if nearby.is_empty() {
                return Err(Error::NoAirportsNearby {
                    latitude: position.latitude,
                    longitude: position.longitude,
                    radius_km: *radius_km,
                });
            }
            nearby.into_iter().map(|airport| airport.code.as_str()).collect()
        }
    };

    Ok(codes
        .into_iter()
        .map(|code| dataset.graph.find_airport_node(code))
        .filter(|&handle| dataset.graph.contains(handle))
        .collect())
}

/// Plan the fewest-flight routes for `request`.
pub fn plan_route(dataset: &Dataset, request: &RouteRequest) -> Result<RoutePlan> {
    // Step 1: Resolve both endpoints and the airline whitelist
    let origins = resolve_endpoint(dataset, &request.origin)?;
    let destinations = resolve_endpoint(dataset, &request.destination)?;
    let whitelist = request.airlines.resolve(dataset)?;

    // Step 2: Reject overlapping endpoints
    if let Some(&shared) = destinations.iter().find(|handle| origins.contains(*handle)) {
        let code = dataset
            .graph
            .airport(shared)
            .map(|airport| airport.code.clone())
            .unwrap_or_default();
        return Err(Error::AlreadyAtDestination { code });
    }

    // Step 3: Search
    debug!(
        origins = origins.len(),
        destinations = destinations.len(),
        airlines = whitelist.len(),
        "planning route"
    );
    let itineraries = shortest_paths(&dataset.graph, &origins, &destinations, &whitelist);
    if itineraries.iter().all(Vec::is_empty) {
        return Err(Error::RouteNotFound {
            origin: request.origin.to_string(),
            destination: request.destination.to_string(),
        });
    }

    Ok(RoutePlan {
        origin: request.origin.to_string(),
        destination: request.destination.to_string(),
        itineraries,
    })
}
