//! Flat entity repository: airlines, airports and the lookup indices built
//! over them.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::geo::Position;
use crate::model::{Airline, Airport, CityKey};
use crate::spatial::ProximityIndex;

/// Canonical airport and airline records with city and proximity indices.
#[derive(Debug, Default)]
pub struct Repository {
    airlines: HashMap<String, Airline>,
    airports: HashMap<String, Airport>,
    city_to_airports: HashMap<CityKey, Vec<String>>,
    proximity: ProximityIndex,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an airline. Returns `false` (and keeps the first record) when
    /// the code is already known.
    pub fn insert_airline(&mut self, airline: Airline) -> bool {
        if self.airlines.contains_key(&airline.code) {
            return false;
        }
        self.airlines.insert(airline.code.clone(), airline);
        true
    }

    /// Register an airport in the code, city and proximity indices. Returns
    /// `false` (and keeps the first record) when the code is already known.
    pub fn insert_airport(&mut self, airport: Airport) -> bool {
        if self.airports.contains_key(&airport.code) {
            return false;
        }
        self.city_to_airports
            .entry(airport.city_key())
            .or_default()
            .push(airport.code.clone());
        self.proximity.insert(&airport.code, airport.position);
        self.airports.insert(airport.code.clone(), airport);
        true
    }

    /// Lookup an airport by its case-sensitive code.
    pub fn find_airport(&self, code: &str) -> Option<&Airport> {
        self.airports.get(code)
    }

    /// Lookup an airline by its case-sensitive code.
    pub fn find_airline(&self, code: &str) -> Option<&Airline> {
        self.airlines.get(code)
    }

    /// Airports of a (city, country) pair in insertion order, or `None` when
    /// the pair is unknown.
    pub fn airports_in_city(&self, city: &str, country: &str) -> Option<Vec<&Airport>> {
        self.city_to_airports
            .get(&CityKey::new(city, country))
            .map(|codes| {
                codes
                    .iter()
                    .filter_map(|code| self.airports.get(code))
                    .collect()
            })
    }

    /// Airports within `radius_km` of `center`, nearest first.
    pub fn airports_within(&self, center: Position, radius_km: f64) -> Vec<&Airport> {
        let matches = self.proximity.within_radius(center, radius_km);
        debug!(
            latitude = center.latitude,
            longitude = center.longitude,
            radius_km,
            matches = matches.len(),
            "proximity lookup"
        );
        matches
            .iter()
            .filter_map(|(code, _)| self.airports.get(code))
            .collect()
    }

    /// Up to `limit` known airport codes closest to `query`, best match first.
    ///
    /// Codes and airport names are both considered; candidates scoring below a
    /// fixed similarity threshold are discarded.
    pub fn fuzzy_airport_matches(&self, query: &str, limit: usize) -> Vec<String> {
        const MIN_SCORE: f64 = 0.6;

        let needle = query.to_ascii_uppercase();
        let mut scored: Vec<(f64, &str)> = self
            .airports
            .values()
            .map(|airport| {
                let by_code = strsim::jaro_winkler(&needle, &airport.code);
                let by_name =
                    strsim::jaro_winkler(&needle, &airport.name.to_ascii_uppercase());
                (by_code.max(by_name), airport.code.as_str())
            })
            .filter(|(score, _)| *score >= MIN_SCORE)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, code)| code.to_string())
            .collect()
    }

    pub fn airlines(&self) -> impl Iterator<Item = &Airline> {
        self.airlines.values()
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn airline_count(&self) -> usize {
        self.airlines.len()
    }

    /// Number of distinct (city, country) pairs.
    pub fn city_count(&self) -> usize {
        self.city_to_airports.len()
    }

    /// Number of distinct countries across all known cities.
    pub fn country_count(&self) -> usize {
        self.city_to_airports
            .keys()
            .map(|key| key.country.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}
