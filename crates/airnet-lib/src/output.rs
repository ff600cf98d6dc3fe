use std::fmt::Write;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::metrics::{airport_stats, diameter, reachable_within, AirportStats, Reachability};
use crate::model::AirlineSet;
use crate::path::{hop_count, PathSegment};
use crate::repository::Repository;
use crate::routing::{RoutePlan, SUGGESTION_LIMIT};
use crate::scc::scc_count;

/// Stop within a rendered itinerary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteStep {
    pub index: usize,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Airlines usable for the flight into this stop; empty for the origin.
    pub airlines: AirlineSet,
}

/// One itinerary with resolved airport names.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteItinerary {
    pub hops: usize,
    pub steps: Vec<RouteStep>,
}

impl RouteItinerary {
    fn from_segments(repository: &Repository, segments: &[PathSegment]) -> Self {
        let steps = segments
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                let airport = repository.find_airport(&segment.airport);
                RouteStep {
                    index,
                    code: segment.airport.clone(),
                    name: airport.map(|a| a.name.clone()),
                    city: airport.map(|a| a.city.clone()),
                    airlines: segment.airlines.clone(),
                }
            })
            .collect();
        Self {
            hops: hop_count(segments),
            steps,
        }
    }

    /// `OPO -> MAD (IBE, RYR) -> CDG (AFR)`
    pub fn route_line(&self) -> String {
        let mut line = String::new();
        for step in &self.steps {
            if step.index > 0 {
                line.push_str(" -> ");
            }
            line.push_str(&step.code);
            if !step.airlines.is_empty() {
                let _ = write!(line, " ({})", step.airlines);
            }
        }
        line
    }
}

/// Serialisable summary of a [`RoutePlan`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub origin: String,
    pub destination: String,
    pub hops: usize,
    pub itineraries: Vec<RouteItinerary>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with resolved airport names.
    pub fn from_plan(repository: &Repository, plan: &RoutePlan) -> Self {
        Self {
            origin: plan.origin.clone(),
            destination: plan.destination.clone(),
            hops: plan.hop_count(),
            itineraries: plan
                .itineraries
                .iter()
                .map(|segments| RouteItinerary::from_segments(repository, segments))
                .collect(),
        }
    }
}

/// Departure statistics and optional reachability for one airport.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AirportReport {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    #[serde(flatten)]
    pub stats: AirportStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reachability: Option<Reachability>,
}

impl AirportReport {
    /// Build the report for `code`, with `max_hops` reachability when requested.
    pub fn build(dataset: &Dataset, code: &str, max_hops: Option<usize>) -> Result<Self> {
        let airport = dataset
            .repository
            .find_airport(code)
            .ok_or_else(|| Error::UnknownAirport {
                code: code.to_string(),
                suggestions: dataset.repository.fuzzy_airport_matches(code, SUGGESTION_LIMIT),
            })?;
        let handle = dataset.graph.find_airport_node(code);

        Ok(Self {
            code: airport.code.clone(),
            name: airport.name.clone(),
            city: airport.city.clone(),
            country: airport.country.clone(),
            stats: airport_stats(&dataset.graph, handle),
            reachability: max_hops.map(|k| reachable_within(&dataset.graph, handle, k)),
        })
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Airport: {} - {} ({}, {})",
            self.code, self.name, self.city, self.country
        );
        let rows = [
            ("Flights", self.stats.flights),
            ("Airlines", self.stats.airlines),
            ("Destination cities", self.stats.destination_cities),
            ("Destination countries", self.stats.destination_countries),
        ];
        for (label, value) in rows {
            let _ = writeln!(buffer, "  {:<23}{}", format!("{label}:"), value);
        }
        if let Some(reach) = &self.reachability {
            let _ = writeln!(buffer, "  Within {} flights:", reach.max_hops);
            let _ = writeln!(buffer, "    Airports:  {}", reach.airports);
            let _ = writeln!(buffer, "    Cities:    {}", reach.cities);
            let _ = writeln!(buffer, "    Countries: {}", reach.countries);
        }
        buffer
    }
}

/// Global statistics of the loaded network.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NetworkReport {
    pub airports: usize,
    pub airlines: usize,
    pub cities: usize,
    pub countries: usize,
    pub routes: usize,
    pub flights: usize,
    pub dropped_flights: usize,
    pub components: usize,
    pub diameter: usize,
}

impl NetworkReport {
    pub fn build(dataset: &Dataset) -> Self {
        let repository = &dataset.repository;
        let graph = &dataset.graph;
        Self {
            airports: repository.airport_count(),
            airlines: repository.airline_count(),
            cities: repository.city_count(),
            countries: repository.country_count(),
            routes: graph.total_routes(),
            flights: graph.total_flights(),
            dropped_flights: graph.dropped_edge_count(),
            components: scc_count(graph),
            diameter: diameter(graph),
        }
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "Network");
        let _ = writeln!(buffer, "  Airports:   {}", self.airports);
        let _ = writeln!(buffer, "  Airlines:   {}", self.airlines);
        let _ = writeln!(buffer, "  Cities:     {}", self.cities);
        let _ = writeln!(buffer, "  Countries:  {}", self.countries);
        let _ = writeln!(buffer, "  Routes:     {}", self.routes);
        let _ = writeln!(buffer, "  Flights:    {}", self.flights);
        if self.dropped_flights > 0 {
            let _ = writeln!(buffer, "  Dropped:    {}", self.dropped_flights);
        }
        let _ = writeln!(buffer, "  Components: {}", self.components);
        let _ = writeln!(buffer, "  Diameter:   {}", self.diameter);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{plan_route, RouteRequest};
    use std::io::Cursor;

    fn dataset() -> Dataset {
        let airlines = "Code,Name,Callsign,Country\nX1,First,FIRST,Testland\nX2,Second,SECOND,Testland\n";
        let airports = "Code,Name,City,Country,Latitude,Longitude\n\
            AAA,Alpha Field,Alpha,Testland,10.0,10.0\n\
            BBB,Beta Field,Beta,Testland,10.5,10.5\n";
        let flights = "Source,Target,Airline\nAAA,BBB,X1\nAAA,BBB,X2\nBBB,AAA,X2\n";
        Dataset::from_readers(
            Cursor::new(airlines),
            Cursor::new(airports),
            Cursor::new(flights),
        )
        .expect("dataset loads")
    }

    #[test]
    fn route_summary_resolves_names() {
        let dataset = dataset();
        let request = RouteRequest::new("AAA".parse().unwrap(), "BBB".parse().unwrap());
        let plan = plan_route(&dataset, &request).expect("route");
        let summary = RouteSummary::from_plan(&dataset.repository, &plan);

        assert_eq!(summary.hops, 1);
        let steps = &summary.itineraries[0].steps;
        assert_eq!(steps[0].name.as_deref(), Some("Alpha Field"));
        assert!(steps[0].airlines.is_empty());
        assert_eq!(summary.itineraries[0].route_line(), "AAA -> BBB (X1, X2)");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["itineraries"][0]["steps"][1]["airlines"][1], "X2");
    }

    #[test]
    fn airport_report_flattens_stats() {
        let dataset = dataset();
        let report = AirportReport::build(&dataset, "AAA", Some(1)).expect("known airport");
        assert_eq!(report.stats.flights, 2);
        assert_eq!(report.stats.airlines, 2);
        assert_eq!(report.reachability.map(|r| r.airports), Some(1));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["flights"], 2);
        assert_eq!(json["reachability"]["max_hops"], 1);

        match AirportReport::build(&dataset, "AAX", None) {
            Err(Error::UnknownAirport { suggestions, .. }) => {
                assert_eq!(suggestions.first().map(String::as_str), Some("AAA"));
                assert!(suggestions.len() <= SUGGESTION_LIMIT);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn network_report_counts_everything() {
        let report = NetworkReport::build(&dataset());
        assert_eq!(report.airports, 2);
        assert_eq!(report.routes, 2);
        assert_eq!(report.flights, 3);
        assert_eq!(report.components, 1);
        assert_eq!(report.diameter, 1);
        assert!(report.render_plain().contains("Diameter:   1"));
    }
}
