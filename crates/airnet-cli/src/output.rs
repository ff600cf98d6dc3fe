//! Output formatting for route and statistics reports.

use std::fmt::Write as _;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use airnet_lib::{AirportReport, NetworkReport, RouteItinerary, RouteSummary};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    pub fn render_route(self, summary: &RouteSummary) -> Result<()> {
        match self {
            OutputFormat::Text => write_stdout(&render_route_text(summary, ColorPalette::detect())),
            OutputFormat::Json => print_json(summary),
        }
    }

    pub fn render_airport(self, report: &AirportReport) -> Result<()> {
        match self {
            OutputFormat::Text => write_stdout(&with_heading(
                &report.render_plain(),
                ColorPalette::detect(),
            )),
            OutputFormat::Json => print_json(report),
        }
    }

    pub fn render_network(self, report: &NetworkReport) -> Result<()> {
        match self {
            OutputFormat::Text => write_stdout(&with_heading(
                &report.render_plain(),
                ColorPalette::detect(),
            )),
            OutputFormat::Json => print_json(report),
        }
    }
}

/// Render a route summary as styled text, one line per itinerary.
pub fn render_route_text(summary: &RouteSummary, palette: ColorPalette) -> String {
    let mut buffer = String::new();
    let count = summary.itineraries.len();
    let _ = writeln!(
        buffer,
        "{}Route:{} {} -> {} {}({} flight{}, {} itinerar{}){}",
        palette.heading,
        palette.reset,
        summary.origin,
        summary.destination,
        palette.muted,
        summary.hops,
        if summary.hops == 1 { "" } else { "s" },
        count,
        if count == 1 { "y" } else { "ies" },
        palette.reset
    );
    for (index, itinerary) in summary.itineraries.iter().enumerate() {
        let _ = writeln!(
            buffer,
            "  {}. {}",
            index + 1,
            styled_itinerary(itinerary, palette)
        );
    }
    buffer
}

fn styled_itinerary(itinerary: &RouteItinerary, palette: ColorPalette) -> String {
    if palette == ColorPalette::plain() {
        return itinerary.route_line();
    }
    let mut line = String::new();
    for step in &itinerary.steps {
        if step.index > 0 {
            let _ = write!(line, " {}->{} ", palette.muted, palette.reset);
        }
        let _ = write!(line, "{}{}{}", palette.code, step.code, palette.reset);
        if !step.airlines.is_empty() {
            let _ = write!(line, " ({}{}{})", palette.airline, step.airlines, palette.reset);
        }
    }
    line
}

/// Colour the first line of a plain-text report as a heading.
fn with_heading(text: &str, palette: ColorPalette) -> String {
    match text.split_once('\n') {
        Some((heading, rest)) => format!(
            "{}{}{}\n{}",
            palette.heading, heading, palette.reset, rest
        ),
        None => text.to_string(),
    }
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .context("failed to write output")?;
    stdout.flush().context("failed to flush output")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialise output")?;
    write_stdout(&format!("{json}\n"))
}
