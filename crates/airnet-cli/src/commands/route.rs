//! Route command handler for computing itineraries between endpoints.

use std::path::Path;

use anyhow::{Context, Result};

use airnet_lib::{
    plan_route, AirlineFilter, Endpoint, Error as RouteError, RouteRequest, RouteSummary,
};

use crate::output::OutputFormat;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Origin endpoint (`OPO`, `city:Porto,Portugal` or `loc:lat,lon,radius_km`).
    pub from: String,
    /// Destination endpoint, same forms as `from`.
    pub to: String,
    /// Airlines allowed on every flight; empty means any airline.
    pub airlines: Vec<String>,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> Result<RouteRequest> {
        let origin: Endpoint = self
            .from
            .parse()
            .with_context(|| format!("invalid --from value '{}'", self.from))?;
        let destination: Endpoint = self
            .to
            .parse()
            .with_context(|| format!("invalid --to value '{}'", self.to))?;
        let airlines = if self.airlines.is_empty() {
            AirlineFilter::Any
        } else {
            AirlineFilter::Only(self.airlines.clone())
        };
        Ok(RouteRequest::new(origin, destination).with_airlines(airlines))
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    data_dir: Option<&Path>,
    args: &RouteCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let request = args.to_request()?;
    let dataset = super::load(data_dir)?;

    let plan = match plan_route(&dataset, &request) {
        Ok(plan) => plan,
        Err(err) => return Err(handle_route_failure(&request, err)),
    };

    let summary = RouteSummary::from_plan(&dataset.repository, &plan);
    format.render_route(&summary)
}

fn handle_route_failure(request: &RouteRequest, err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownAirport { code, suggestions } => {
            anyhow::anyhow!(format_unknown_airport_message(&code, &suggestions))
        }
        RouteError::RouteNotFound {
            origin,
            destination,
        } => anyhow::anyhow!(format_route_not_found_message(&origin, &destination, request)),
        RouteError::AlreadyAtDestination { code } => {
            anyhow::anyhow!("Origin and destination both include {code}; nothing to plan.")
        }
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_airport_message(code: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown airport '{}'.", code);
    if !suggestions.is_empty() {
        let formatted = if suggestions.len() == 1 {
            format!(" Did you mean '{}'?", suggestions[0])
        } else {
            let joined = suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            format!(" Did you mean one of: {}?", joined)
        };
        message.push_str(&formatted);
    }
    message
}

fn format_route_not_found_message(origin: &str, destination: &str, request: &RouteRequest) -> String {
    let mut message = format!("No route found between {} and {}.", origin, destination);
    if let AirlineFilter::Only(codes) = &request.airlines {
        message.push_str(&format!(
            " Only {} allowed; try adding more --airline values or dropping the filter.",
            codes.join(", ")
        ));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(from: &str, to: &str, airlines: &[&str]) -> RouteCommandArgs {
        RouteCommandArgs {
            from: from.to_string(),
            to: to.to_string(),
            airlines: airlines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn empty_airline_list_means_any() {
        let request = args("OPO", "city:Paris,France", &[]).to_request().unwrap();
        assert_eq!(request.airlines, AirlineFilter::Any);
        assert_eq!(request.origin, Endpoint::Airport("OPO".to_string()));
    }

    #[test]
    fn airline_list_becomes_filter() {
        let request = args("OPO", "LHR", &["TAP", "IBE"]).to_request().unwrap();
        assert_eq!(
            request.airlines,
            AirlineFilter::Only(vec!["TAP".to_string(), "IBE".to_string()])
        );
    }

    #[test]
    fn invalid_endpoint_is_reported_with_flag() {
        let err = args("loc:1,2", "LHR", &[]).to_request().unwrap_err();
        assert!(format!("{err:#}").contains("invalid --from value"));
    }

    #[test]
    fn unknown_airport_message_lists_suggestions() {
        assert_eq!(
            format_unknown_airport_message("OPP", &["OPO".to_string()]),
            "Unknown airport 'OPP'. Did you mean 'OPO'?"
        );
        assert_eq!(format_unknown_airport_message("QQQ", &[]), "Unknown airport 'QQQ'.");
    }

    #[test]
    fn route_not_found_mentions_airline_filter() {
        let request = args("OPO", "LHR", &["TAP"]).to_request().unwrap();
        let message = format_route_not_found_message("OPO", "LHR", &request);
        assert!(message.starts_with("No route found between OPO and LHR."));
        assert!(message.contains("Only TAP allowed"));
    }
}
