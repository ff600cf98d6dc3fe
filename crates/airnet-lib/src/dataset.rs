use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use directories::ProjectDirs;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::geo::Position;
use crate::graph::FlightGraph;
use crate::model::{Airline, Airport};
use crate::repository::Repository;

/// Environment variable overriding the dataset directory.
pub const DATA_DIR_ENV: &str = "AIRNET_DATA_DIR";

pub const AIRLINES_FILE: &str = "airlines.csv";
pub const AIRPORTS_FILE: &str = "airports.csv";
pub const FLIGHTS_FILE: &str = "flights.csv";

/// Loaded flight network: entity records plus the graph built over them.
#[derive(Debug, Default)]
pub struct Dataset {
    pub repository: Repository,
    pub graph: FlightGraph,
}

/// Platform data directory used when no dataset location is configured.
pub fn default_dataset_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "airnet", "airnet").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Resolve the dataset directory: explicit path, then `AIRNET_DATA_DIR`, then
/// the platform data directory.
pub fn resolve_dataset_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(env_path) = env::var_os(DATA_DIR_ENV) {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    default_dataset_dir()
}

/// Load `airlines.csv`, `airports.csv` and `flights.csv` from `dir`.
pub fn load_dataset(dir: &Path) -> Result<Dataset> {
    if !dir.is_dir() {
        return Err(Error::DatasetNotFound {
            path: dir.to_path_buf(),
        });
    }
    debug!(path = %dir.display(), "loading dataset");

    let airlines = open_table(dir, AIRLINES_FILE)?;
    let airports = open_table(dir, AIRPORTS_FILE)?;
    let flights = open_table(dir, FLIGHTS_FILE)?;

    Dataset::load(
        (airlines, &dir.join(AIRLINES_FILE)),
        (airports, &dir.join(AIRPORTS_FILE)),
        (flights, &dir.join(FLIGHTS_FILE)),
    )
}

fn open_table(dir: &Path, name: &str) -> Result<File> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(Error::DatasetNotFound { path });
    }
    Ok(File::open(path)?)
}

impl Dataset {
    /// Build a dataset from in-memory CSV tables, each with a header row.
    pub fn from_readers<A: Read, P: Read, F: Read>(
        airlines: A,
        airports: P,
        flights: F,
    ) -> Result<Self> {
        Self::load(
            (airlines, Path::new(AIRLINES_FILE)),
            (airports, Path::new(AIRPORTS_FILE)),
            (flights, Path::new(FLIGHTS_FILE)),
        )
    }

    fn load<A: Read, P: Read, F: Read>(
        airlines: (A, &Path),
        airports: (P, &Path),
        flights: (F, &Path),
    ) -> Result<Self> {
        let (airlines, airlines_path) = airlines;
        let (airports, airports_path) = airports;
        let (flights, flights_path) = flights;
        let mut repository = Repository::new();

        for_each_record(airlines, airlines_path, 4, |record, line| {
            let airline = Airline {
                code: record[0].to_string(),
                name: record[1].to_string(),
                callsign: record[2].to_string(),
                country: record[3].to_string(),
            };
            if !repository.insert_airline(airline) {
                warn!(code = &record[0], line, "skipping duplicate airline");
            }
            Ok(())
        })?;

        let mut parsed = Vec::new();
        for_each_record(airports, airports_path, 6, |record, line| {
            let latitude = parse_coordinate(&record[4], "latitude", airports_path, line)?;
            let longitude = parse_coordinate(&record[5], "longitude", airports_path, line)?;
            let position =
                Position::checked(latitude, longitude).map_err(|err| Error::MalformedRecord {
                    path: airports_path.to_path_buf(),
                    line,
                    message: err.to_string(),
                })?;
            parsed.push((
                line,
                Airport {
                    code: record[0].to_string(),
                    name: record[1].to_string(),
                    city: record[2].to_string(),
                    country: record[3].to_string(),
                    position,
                },
            ));
            Ok(())
        })?;

        let mut graph = FlightGraph::with_capacity(parsed.len());
        for (line, airport) in parsed {
            if repository.find_airport(&airport.code).is_some() {
                warn!(code = %airport.code, line, "skipping duplicate airport");
                continue;
            }
            repository.insert_airport(airport.clone());
            graph.add_node(airport);
        }

        for_each_record(flights, flights_path, 3, |record, line| {
            let airline = &record[2];
            if repository.find_airline(airline).is_none() {
                return Err(Error::MalformedRecord {
                    path: flights_path.to_path_buf(),
                    line,
                    message: format!("unknown airline '{airline}'"),
                });
            }
            let source = graph.find_airport_node(&record[0]);
            let target = graph.find_airport_node(&record[1]);
            graph.add_flight(source, target, airline);
            Ok(())
        })?;

        let dropped_edges = graph.dropped_edge_count();
        if dropped_edges > 0 {
            warn!(dropped_edges, "ignored flights referencing unknown airports");
        }

        info!(
            airports = repository.airport_count(),
            airlines = repository.airline_count(),
            routes = graph.total_routes(),
            flights = graph.total_flights(),
            dropped_edges,
            "loaded flight network"
        );

        Ok(Self { repository, graph })
    }
}

fn for_each_record<R, F>(reader: R, path: &Path, expected_fields: usize, mut visit: F) -> Result<()>
where
    R: Read,
    F: FnMut(&StringRecord, u64) -> Result<()>,
{
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::Fields)
        .flexible(true)
        .from_reader(reader);

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |pos| pos.line());
        if record.len() != expected_fields {
            return Err(Error::MalformedRecord {
                path: path.to_path_buf(),
                line,
                message: format!(
                    "expected {expected_fields} fields, found {}",
                    record.len()
                ),
            });
        }
        visit(&record, line)?;
    }

    Ok(())
}

fn parse_coordinate(value: &str, field: &str, path: &Path, line: u64) -> Result<f64> {
    value.parse::<f64>().map_err(|_| Error::MalformedRecord {
        path: path.to_path_buf(),
        line,
        message: format!("invalid {field} '{value}'"),
    })
}
