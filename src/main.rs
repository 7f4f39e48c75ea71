//! SherpAI - terminal dashboard
//!
//! Reads chat messages from stdin and, while the simulation is switched on,
//! runs the risk simulation in the background. Engine events and assistant
//! replies are printed as they arrive.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use sherpai::assistant::{GREETING, QUICK_ACTIONS};
use sherpai::core::config::{config, set_config};
use sherpai::core::{Result, SherpaError, SimulationConfig};
use sherpai::shell::Dashboard;
use sherpai::simulation::{EventSink, SimulationEvent};
use sherpai::state::seed::SeedData;

#[derive(Parser, Debug)]
#[command(name = "sherpai", about = "Avalanche risk dashboard in the terminal")]
struct Args {
    /// TOML file with simulation settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file with zones and observations (built-in data if omitted)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Short delays for demos; applied on top of --config
    #[arg(long)]
    fast: bool,

    /// Start with the simulation switched on
    #[arg(long)]
    sim: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sherpai=info")),
        )
        .init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if args.fast {
        settings = settings.with_fast_cadence();
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    set_config(settings).map_err(|_| SherpaError::Config("config already set".into()))?;

    let seed = match &args.data {
        Some(path) => SeedData::load(path)?,
        None => SeedData::builtin(),
    };
    let mut dashboard = Dashboard::new(seed);

    let (tx, mut events) = mpsc::unbounded_channel::<SimulationEvent>();
    let sink: EventSink = Arc::new(move |event: &SimulationEvent| {
        // Receiver gone means we are shutting down
        let _ = tx.send(event.clone());
    });
    if args.sim {
        dashboard.start_simulation(config().clone(), Some(Arc::clone(&sink)));
    }

    println!("\n=== SHERPAI ===");
    println!("{}", GREETING);
    println!();
    println!("Commands:");
    println!("  sim             - Switch the simulation on or off");
    println!("  layer / l       - Cycle the map layer");
    println!("  status / s      - Show zones and the feed");
    for (i, action) in QUICK_ACTIONS.iter().enumerate() {
        println!("  {}               - {}", i + 1, action);
    }
    println!("  quit / q        - Exit");
    println!("  <any text>      - Ask the assistant");
    println!();
    display_status(&dashboard);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                match input {
                    "" => continue,
                    "quit" | "q" => break,
                    "layer" | "l" => {
                        let layer = dashboard.cycle_layer();
                        println!("Layer: {}", layer);
                    }
                    "status" | "s" => display_status(&dashboard),
                    "sim" => {
                        let on = dashboard
                            .toggle_simulation(config().clone(), Some(Arc::clone(&sink)))
                            .await;
                        println!("Simulation: {}", if on { "on" } else { "off" });
                    }
                    _ => {
                        let text = quick_action(input).unwrap_or(input);
                        handle_message(&mut dashboard, text);
                    }
                }
            }
            Some(event) = events.recv() => {
                dashboard.on_event(&event);
                let marker = if dashboard.pulse() { '!' } else { '*' };
                println!("{} {}", marker, event.describe());
                dashboard.clear_pulse();
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    dashboard.stop_simulation().await;
    tracing::info!("SherpAI stopped");
    Ok(())
}

/// Map "1".."4" to the quick-action prompts
fn quick_action(input: &str) -> Option<&'static str> {
    let index: usize = input.parse().ok()?;
    QUICK_ACTIONS.get(index.checked_sub(1)?).copied()
}

fn handle_message(dashboard: &mut Dashboard, text: &str) {
    let Some(reply) = dashboard.send(text) else {
        return;
    };
    println!("{}", reply.text());
    for command in &reply.commands {
        println!("-> {:?}", command);
    }
}

fn display_status(dashboard: &Dashboard) {
    println!(
        "--- Layer: {}  Simulation: {} ---",
        dashboard.active_layer(),
        if dashboard.simulation_on() { "on" } else { "off" }
    );
    let selected = dashboard.selected_zone_id().cloned();
    let highlighted = dashboard.highlighted().to_vec();
    dashboard.zones().read(|zones| {
        for zone in zones {
            let marker = if Some(&zone.id) == selected.as_ref() {
                '>'
            } else if highlighted.contains(&zone.id) {
                '*'
            } else {
                ' '
            };
            println!(
                "{} {:<14} {:<14} hazard {} ({:<12}) confidence {:>3}%",
                marker,
                zone.name,
                zone.region,
                zone.hazard_level,
                zone.hazard_level.label(),
                zone.confidence_score
            );
        }
    });

    let feed = dashboard.visible_observations();
    match dashboard.focused_kind() {
        Some(kind) => println!("--- Feed ({}, {} shown) ---", kind, feed.len()),
        None => println!("--- Feed ({} shown) ---", feed.len()),
    }
    for obs in feed.iter().take(5) {
        println!(
            "  {} {:<9} {:<6} {}",
            obs.time.format("%H:%M"),
            obs.kind,
            obs.severity,
            obs.summary
        );
    }
    println!();
}
