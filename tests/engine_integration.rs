//! Integration tests for the simulation engine against host-owned state

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use parking_lot::RwLock;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc;

use sherpai::core::SimulationConfig;
use sherpai::shell::Dashboard;
use sherpai::simulation::{
    append_observation, mutate_zone_risk, EventSink, Mutator, SimulationEngine, SimulationEvent,
};
use sherpai::state::{Observation, SeedData, Zone};

/// Storage that is not a `Shared`, to exercise the mutator seam directly
struct Store<T> {
    items: RwLock<Vec<T>>,
}

impl<T> Store<T> {
    fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

impl<T: Send + Sync> Mutator<T> for Store<T> {
    fn apply(&self, transform: &mut dyn FnMut(&[T]) -> Vec<T>) {
        let mut items = self.items.write();
        let next = transform(items.as_slice());
        *items = next;
    }
}

fn seeded(seed: u64) -> SimulationConfig {
    SimulationConfig {
        seed: Some(seed),
        ..SimulationConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_engine_drives_dashboard_through_channel() {
    let mut dashboard = Dashboard::new(SeedData::builtin());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let sink: EventSink = Arc::new(move |event: &SimulationEvent| {
        let _ = tx.send(event.clone());
    });

    let handle = SimulationEngine::start(
        seeded(7),
        dashboard.zones(),
        dashboard.observations(),
        Some(sink),
    );

    // Initial delay plus three maximal intervals
    tokio::time::sleep(Duration::from_millis(5_000 + 3 * 15_000 + 10)).await;
    handle.cancel();
    handle.stopped().await;

    let mut observation_events = 0;
    while let Ok(event) = rx.try_recv() {
        if matches!(event, SimulationEvent::Observation { .. }) {
            observation_events += 1;
        }
        dashboard.on_event(&event);
    }

    assert!(observation_events >= 4);
    assert_eq!(dashboard.observations().len(), 5 + observation_events);
}

#[tokio::test(start_paused = true)]
async fn test_custom_mutator_receives_ticks() {
    let seed = SeedData::builtin();
    let zones = Arc::new(Store::new(seed.zones));
    let feed: Arc<Store<Observation>> = Arc::new(Store::new(Vec::new()));

    let handle = SimulationEngine::start(seeded(3), Arc::clone(&zones), Arc::clone(&feed), None);
    tokio::time::sleep(Duration::from_millis(5_001)).await;

    {
        let items = feed.items.read();
        assert_eq!(items.len(), 1);
        // Empty history borrows the fallback zone
        assert_eq!(items[0].zone_id.as_str(), "raven-peak");
    }
    assert_eq!(zones.items.read().len(), 5);

    handle.cancel();
    handle.stopped().await;
}

#[tokio::test(start_paused = true)]
async fn test_after_cancel_no_further_mutation() {
    let dashboard = Dashboard::new(SeedData::builtin());
    let handle = SimulationEngine::start(
        seeded(11),
        dashboard.zones(),
        dashboard.observations(),
        None,
    );

    tokio::time::sleep(Duration::from_millis(5_001)).await;
    let snapshot = dashboard.observations().snapshot();
    handle.cancel();
    tokio::time::sleep(Duration::from_secs(300)).await;

    assert_eq!(dashboard.observations().snapshot(), snapshot);
    assert!(handle.is_cancelled());
    handle.stopped().await;
}

#[test]
fn test_same_seed_same_trace() {
    let config = SimulationConfig::default();
    let now = Utc.with_ymd_and_hms(2026, 2, 4, 9, 0, 0).unwrap();

    let run = |seed: u64| {
        let SeedData {
            mut zones,
            mut observations,
        } = SeedData::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..25 {
            zones = mutate_zone_risk(&zones, &mut rng, &config, now).0;
            observations = append_observation(&observations, &mut rng, &config, now).0;
        }
        (zones, observations)
    };

    assert_eq!(run(99), run(99));
}

fn changed_zones<'a>(before: &'a [Zone], after: &'a [Zone]) -> Vec<(&'a Zone, &'a Zone)> {
    before
        .iter()
        .zip(after)
        .filter(|(b, a)| b != a)
        .collect()
}

proptest! {
    #[test]
    fn prop_risk_step_stays_in_bounds(seed in any::<u64>(), steps in 1usize..40) {
        let config = SimulationConfig::default();
        let now = Utc.with_ymd_and_hms(2026, 2, 4, 9, 0, 0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut zones = SeedData::builtin().zones;

        for _ in 0..steps {
            let (next, mutation) = mutate_zone_risk(&zones, &mut rng, &config, now);
            let mutation = mutation.expect("zones are not empty");
            prop_assert_eq!(next.len(), zones.len());

            let changed = changed_zones(&zones, &next);
            prop_assert!(changed.len() <= 1);
            for (_, after) in &changed {
                prop_assert_eq!(&after.id, &mutation.zone_id);
                prop_assert_eq!(after.last_updated, now);
            }

            for zone in &next {
                prop_assert!((1..=5).contains(&zone.hazard_level.value()));
                prop_assert!((config.confidence_floor..=config.confidence_ceiling)
                    .contains(&zone.confidence_score));
            }

            let target = next.iter().find(|z| z.id == mutation.zone_id).unwrap();
            let step = target.hazard_level.value() as i16 - mutation.previous_level.value() as i16;
            prop_assert!(step.abs() <= 1);

            zones = next;
        }
    }

    #[test]
    fn prop_history_stays_capped(seed in any::<u64>(), steps in 1usize..80) {
        let config = SimulationConfig::default();
        let now = Utc.with_ymd_and_hms(2026, 2, 4, 9, 0, 0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut feed = SeedData::builtin().observations;

        for _ in 0..steps {
            let (next, added) = append_observation(&feed, &mut rng, &config, now);
            prop_assert!(next.len() <= config.history_limit);
            prop_assert_eq!(&next[0], &added);
            prop_assert!(next.len() >= feed.len().min(config.history_limit));
            feed = next;
        }
    }
}
