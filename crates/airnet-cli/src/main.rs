use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use airnet_cli::commands::airport::handle_airport_command;
use airnet_cli::commands::network::handle_network_command;
use airnet_cli::commands::route::{handle_route_command, RouteCommandArgs};
use airnet_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Flight network route finding and statistics")]
struct Cli {
    /// Override the dataset directory (defaults to AIRNET_DATA_DIR, then the platform data dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the fewest-flight itineraries between two endpoints.
    Route {
        /// Origin: airport code, `city:<city>,<country>` or `loc:<lat>,<lon>,<radius_km>`.
        #[arg(long = "from")]
        from: String,
        /// Destination, same forms as --from.
        #[arg(long = "to")]
        to: String,
        /// Restrict every flight to these airlines (repeatable).
        #[arg(long = "airline")]
        airlines: Vec<String>,
    },
    /// Show departure statistics for one airport.
    Airport {
        /// Airport code.
        code: String,
        /// Also count airports, cities and countries reachable within this many flights.
        #[arg(long)]
        hops: Option<usize>,
    },
    /// Show global network statistics.
    Network,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Command::Route { from, to, airlines } => {
            let args = RouteCommandArgs { from, to, airlines };
            handle_route_command(data_dir, &args, cli.format)
        }
        Command::Airport { code, hops } => handle_airport_command(data_dir, &code, hops, cli.format),
        Command::Network => handle_network_command(data_dir, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
