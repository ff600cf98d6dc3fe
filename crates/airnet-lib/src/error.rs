use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the airnet library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset directory or one of its tables could not be located.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset location")]
    ProjectDirsUnavailable,

    /// A dataset row could not be turned into a record.
    #[error("malformed record in {path} at line {line}: {message}")]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// Raised when an airport code could not be found in the dataset.
    #[error("unknown airport code: {code}{}", format_suggestions(.suggestions))]
    UnknownAirport {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when an airline code could not be found in the dataset.
    #[error("unknown airline code: {code}")]
    UnknownAirline { code: String },

    /// Raised when a (city, country) pair has no airports.
    #[error("unknown city: {city}, {country}")]
    UnknownCity { city: String, country: String },

    /// Raised when a latitude, longitude or radius is outside its valid range.
    #[error("invalid coordinate: {message}")]
    InvalidCoordinate { message: String },

    /// Raised when a location query matched no airport.
    #[error("no airports within {radius_km} km of ({latitude}, {longitude})")]
    NoAirportsNearby {
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    },

    /// Raised when an endpoint description cannot be parsed.
    #[error("invalid endpoint '{input}': {message}")]
    InvalidEndpoint { input: String, message: String },

    /// Raised when the origin already contains the destination airport.
    #[error("origin and destination share airport {code}")]
    AlreadyAtDestination { code: String },

    /// Raised when no route could be found between two endpoints.
    #[error("no route found between {origin} and {destination}")]
    RouteNotFound { origin: String, destination: String },

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_airport_lists_single_suggestion() {
        let err = Error::UnknownAirport {
            code: "OPP".to_string(),
            suggestions: vec!["OPO".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown airport code: OPP. Did you mean 'OPO'?"
        );
    }

    #[test]
    fn unknown_airport_lists_many_suggestions() {
        let err = Error::UnknownAirport {
            code: "LH".to_string(),
            suggestions: vec!["LHR".to_string(), "LIS".to_string()],
        };
        assert!(err
            .to_string()
            .ends_with("Did you mean one of: 'LHR', 'LIS'?"));
    }

    #[test]
    fn unknown_airport_without_suggestions() {
        let err = Error::UnknownAirport {
            code: "QQQ".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown airport code: QQQ");
    }
}
