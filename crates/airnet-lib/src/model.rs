//! Canonical airport and airline records plus the airline-set edge label.

use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::geo::Position;

/// Operating airline, keyed by its ICAO code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airline {
    pub code: String,
    pub name: String,
    pub callsign: String,
    pub country: String,
}

/// Airport, keyed by its IATA code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub position: Position,
}

impl Airport {
    /// The (city, country) pair this airport belongs to.
    pub fn city_key(&self) -> CityKey {
        CityKey::new(&self.city, &self.country)
    }
}

/// City names are only unique within a country, so cities are keyed by both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CityKey {
    pub city: String,
    pub country: String,
}

impl CityKey {
    pub fn new(city: &str, country: &str) -> Self {
        Self {
            city: city.to_string(),
            country: country.to_string(),
        }
    }
}

impl fmt::Display for CityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

/// Unordered set of airline codes labelling an edge or constraining a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AirlineSet {
    codes: HashSet<String>,
}

impl AirlineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an airline; returns `false` when it was already present.
    pub fn insert(&mut self, code: impl Into<String>) -> bool {
        self.codes.insert(code.into())
    }

    /// Add every airline of `other` to this set.
    pub fn union_with(&mut self, other: &AirlineSet) {
        self.codes.extend(other.codes.iter().cloned());
    }

    /// Airlines present in both sets.
    ///
    /// Probes the members of `self` against `other`, so callers should pass
    /// the smaller set as the receiver when they have the choice.
    pub fn intersection(&self, other: &AirlineSet) -> AirlineSet {
        let codes = self
            .codes
            .iter()
            .filter(|code| other.contains(code))
            .cloned()
            .collect();
        AirlineSet { codes }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Codes in lexicographic order, for stable rendering.
    pub fn sorted(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.iter().collect();
        codes.sort_unstable();
        codes
    }
}

impl<S: Into<String>> FromIterator<S> for AirlineSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for AirlineSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sorted().join(", "))
    }
}

impl Serialize for AirlineSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted())
    }
}
