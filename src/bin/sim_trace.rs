//! Seeded simulation trace
//!
//! Runs ticks back to back without timers and prints every event, then the
//! final zone table. Usage: sim_trace [ticks] [seed]

use chrono::{Duration, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sherpai::core::SimulationConfig;
use sherpai::simulation::{append_observation, mutate_zone_risk, SimulationEvent};
use sherpai::state::seed::SeedData;

fn main() {
    let mut args = std::env::args().skip(1);
    let ticks: u32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(20);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(42);

    let config = SimulationConfig::default();
    let SeedData {
        mut zones,
        mut observations,
    } = SeedData::builtin();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut now = Utc::now();

    println!("SherpAI simulation trace");
    println!("========================");
    println!("Ticks: {}  Seed: {}  Zones: {}", ticks, seed, zones.len());
    println!();

    let mut zone_events = 0;
    for tick in 1..=ticks {
        now += Duration::milliseconds(config.min_interval_ms as i64);

        let (next_zones, mutation) = mutate_zone_risk(&zones, &mut rng, &config, now);
        zones = next_zones;
        if let Some(event) = mutation.as_ref().and_then(|m| m.to_event()) {
            zone_events += 1;
            println!("{:>4}  {}", tick, event.describe());
        }

        let (next_feed, observation) = append_observation(&observations, &mut rng, &config, now);
        observations = next_feed;
        println!(
            "{:>4}  {}",
            tick,
            SimulationEvent::Observation { observation }.describe()
        );
    }

    println!("\n--- Final zones ---");
    for zone in &zones {
        println!(
            "{:<14} hazard {} ({:<12}) confidence {:>3}%",
            zone.name,
            zone.hazard_level,
            zone.hazard_level.label(),
            zone.confidence_score
        );
    }
    println!(
        "\n{} zone events, {} observations in feed",
        zone_events,
        observations.len()
    );
}
