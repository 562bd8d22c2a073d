//! fleet-sim — runs every eligible vehicle in the database until Ctrl-C.
//!
//! Reference data (routes, waypoints, vehicles) must already be in the
//! SQLite file; the schema is created on open if missing.  Telemetry is
//! written back to the same file.
//!
//! ```text
//! ROUTE_API=… fleet-sim --db tracking.db --config fleet.json
//! ROUTE_API=… fleet-sim --export-route 3 > route-3.csv
//! ```

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ft_core::{Direction, Mission, RouteId};
use ft_routing::{AdmissionGate, GeoapifyProvider, PathBuilder};
use ft_sim::{FleetBuilder, FleetConfig};
use ft_store::{SqliteStore, TelemetryStore};

#[derive(Debug, Parser)]
#[command(name = "fleet-sim", version, about = "Simulate a vehicle fleet and record GPS telemetry")]
struct Args {
    /// SQLite database with routes, vehicles, and telemetry tables.
    #[arg(long, default_value = "tracking.db")]
    db: PathBuf,

    /// JSON fleet configuration.  Built-in defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Geoapify API key.
    #[arg(long, env = "ROUTE_API", hide_env_values = true)]
    api_key: String,

    /// Print the forward path of this route as CSV and exit.
    #[arg(long, value_name = "ROUTE_ID")]
    export_route: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => FleetConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => FleetConfig::default(),
    };
    let store = SqliteStore::open(&args.db, config.max_positions_per_vehicle)
        .with_context(|| format!("opening database {}", args.db.display()))?;
    let store = Arc::new(store);
    let provider = GeoapifyProvider::new(args.api_key).context("building routing client")?;

    if let Some(route) = args.export_route {
        return export_route(provider, store.as_ref(), RouteId(route)).await;
    }

    let fleet = FleetBuilder::new(config, provider, Arc::clone(&store)).build()?;
    if fleet.is_empty() {
        warn!("no eligible vehicles; only maintenance will run");
    }
    let mut running = fleet.spawn();

    tokio::select! {
        _ = running.supervise() => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("listening for Ctrl-C")?;
            info!("Ctrl-C received; shutting down");
        }
    }
    running.shutdown().await;
    store.checkpoint()?;
    Ok(())
}

/// Build one route's forward path and write it to stdout.
async fn export_route(provider: GeoapifyProvider, store: &SqliteStore, route: RouteId) -> Result<()> {
    let waypoints = store.route_waypoints(route)?;
    let mission = Mission::new(route, Direction::Forward, waypoints)?;
    let builder = PathBuilder::new(provider, AdmissionGate::new(1));
    let path = builder.try_build(&mission).await.with_context(|| format!("routing {route}"))?;
    info!(route = %route, points = path.points.len(), stops = path.stops.len(), "path exported");
    path.write_csv(io::stdout().lock())?;
    Ok(())
}
