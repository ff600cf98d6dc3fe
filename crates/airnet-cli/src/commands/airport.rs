//! Airport command handler for per-airport statistics.

use std::path::Path;

use anyhow::{Context, Result};

use airnet_lib::AirportReport;

use crate::output::OutputFormat;

/// Handle the airport subcommand.
pub fn handle_airport_command(
    data_dir: Option<&Path>,
    code: &str,
    hops: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let dataset = super::load(data_dir)?;
    let report = AirportReport::build(&dataset, code, hops)
        .with_context(|| format!("failed to build statistics for airport {code}"))?;
    format.render_airport(&report)
}
