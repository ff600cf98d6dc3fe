//! Network command handler for whole-graph statistics.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use airnet_lib::NetworkReport;

use crate::output::OutputFormat;

/// Handle the network subcommand.
pub fn handle_network_command(data_dir: Option<&Path>, format: OutputFormat) -> Result<()> {
    let dataset = super::load(data_dir)?;
    let report = NetworkReport::build(&dataset);
    debug!(components = report.components, diameter = report.diameter, "network statistics ready");
    format.render_network(&report)
}
