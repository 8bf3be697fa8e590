//! Airlock simulator: runs the controller against an in-memory station.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  SimulatedStation   DiagnosticBuffer   LogEventSink      │
//! │  (Inventory+Device) (DiagnosticSink)   (EventSink)       │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │        AirlockController (pure logic)              │  │
//! │  │  Registry · AirlockUnit · interlock policy         │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The host normally owns the clock; here a plain sleep loop stands in
//! for it.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{debug, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use airlock::adapters::json_config::JsonConfigAdapter;
use airlock::adapters::log_sink::LogEventSink;
use airlock::adapters::sim::{DoorPosition, SimulatedStation, StationLayout};
use airlock::app::ports::ConfigPort;
use airlock::app::service::AirlockController;
use airlock::diagnostics::DiagnosticBuffer;

#[derive(Debug, Parser)]
#[command(name = "airlock-sim", version, about = "Run the airlock controller against a simulated station")]
struct Cli {
    /// Controller configuration (JSON).  Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Station layout (JSON).  A built-in demo layout is used when omitted.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 12)]
    ticks: u64,

    /// Open the named door before the first tick.  Repeatable.
    #[arg(long = "open", value_name = "NAME")]
    open: Vec<String>,

    /// Close the doors given with --open after this many ticks.
    #[arg(long, value_name = "TICKS")]
    close_after: Option<u64>,

    /// Run ticks back to back instead of at the configured period.
    #[arg(long)]
    no_wait: bool,

    /// Debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default = if verbose { "airlock=debug,airlock_sim=debug" } else { "airlock=info,airlock_sim=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .init();
}

fn load_layout(path: Option<&PathBuf>) -> Result<StationLayout> {
    let Some(path) = path else {
        info!("Layout: built-in demo station");
        return Ok(StationLayout::demo());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading layout {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing layout {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    info!("airlock-sim v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Config + station ───────────────────────────────────
    let config = JsonConfigAdapter::new(cli.config.clone())
        .load()
        .map_err(|e| anyhow!("loading config: {e}"))?;
    let period = Duration::from_millis(u64::from(config.tick_interval_ms));

    let mut station = SimulatedStation::from_layout(&load_layout(cli.layout.as_ref())?);
    let mut diag = DiagnosticBuffer::new();
    let mut sink = LogEventSink::new();

    // ── 2. Controller setup ───────────────────────────────────
    let mut controller = AirlockController::new(config)?;
    info!(
        "Marker {} | membership {:?} | tick every {} ms",
        controller.config().marker_tag,
        controller.config().membership,
        controller.config().tick_interval_ms
    );
    controller.setup(&station, &mut diag, &mut sink);
    for line in diag.lines() {
        info!("diag | {line}");
    }

    let mut opened = Vec::new();
    for name in &cli.open {
        match station.find(name) {
            Some(id) => {
                station.set_door(id, DoorPosition::Open);
                opened.push(id);
                info!("Opened '{name}'");
            }
            None => warn!("No device named '{name}'"),
        }
    }

    // ── 3. Tick loop ──────────────────────────────────────────
    for tick in 1..=cli.ticks {
        if cli.close_after == Some(tick - 1) {
            for &id in &opened {
                station.set_door(id, DoorPosition::Closed);
            }
            info!("Closed {} door(s) before tick {tick}", opened.len());
        }

        let report = controller.tick(&mut station, &mut diag, &mut sink);
        for (id, action) in station.actions() {
            debug!("tick {:>3} | {action} {id}", report.tick);
        }
        station.clear_actions();
        info!(
            "tick {:>3} | sealed={} interior_breach={} exterior_breach={} failed={}",
            report.tick, report.sealed, report.interior_breached, report.exterior_breached, report.failed
        );

        if !cli.no_wait {
            thread::sleep(period);
        }
    }

    // ── 4. Summary ────────────────────────────────────────────
    for unit in controller.registry().units() {
        for (role, ids) in [
            ("interior", unit.interior_doors()),
            ("exterior", unit.exterior_doors()),
            ("vent", unit.vents()),
        ] {
            for &id in ids {
                let name = station.devices().find(|(d, _, _)| *d == id).map(|(_, n, _)| n);
                info!(
                    "{} | {:<8} | {:<45} | {}",
                    unit.name(),
                    role,
                    name.unwrap_or("<removed>"),
                    match station.is_enabled(id) {
                        Some(true) => "enabled",
                        Some(false) => "disabled",
                        None => "-",
                    }
                );
            }
        }
    }
    info!("metrics | {}", serde_json::to_string(controller.metrics())?);

    Ok(())
}
