//! Self-scheduling simulation loop
//!
//! The engine runs as a single tokio task: sleep, tick, draw the next delay,
//! repeat. Each tick performs one zone-risk step and one observation, both
//! through the caller's mutators, and reports what changed to the optional
//! event sink. The loop only stops when its `CancelHandle` is cancelled.

use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use crate::core::config::SimulationConfig;
use crate::simulation::cancel::CancelToken;
use crate::simulation::events::{EventSink, SimulationEvent};
use crate::simulation::mutator::Mutator;
use crate::simulation::tick::{self, RiskMutation};
use crate::state::observation::Observation;
use crate::state::zone::Zone;

/// Entry point for starting the background simulation
pub struct SimulationEngine;

impl SimulationEngine {
    /// Spawn the loop on the current tokio runtime
    ///
    /// The RNG is seeded from `config.seed` when present, otherwise from OS
    /// entropy. Must be called from within a tokio runtime.
    pub fn start<Z, O>(
        config: SimulationConfig,
        zones: Z,
        observations: O,
        on_event: Option<EventSink>,
    ) -> CancelHandle
    where
        Z: Mutator<Zone> + 'static,
        O: Mutator<Observation> + 'static,
    {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::start_with_rng(config, zones, observations, on_event, rng)
    }

    /// Like `start`, with an explicit RNG
    pub fn start_with_rng<Z, O>(
        config: SimulationConfig,
        zones: Z,
        observations: O,
        on_event: Option<EventSink>,
        rng: ChaCha8Rng,
    ) -> CancelHandle
    where
        Z: Mutator<Zone> + 'static,
        O: Mutator<Observation> + 'static,
    {
        let token = CancelToken::new();
        let runner = Runner {
            config,
            zones,
            observations,
            on_event,
            rng,
            token: token.clone(),
            ticks: 0,
        };
        let task = tokio::spawn(runner.run());
        CancelHandle { token, task }
    }
}

/// Handle returned by `SimulationEngine::start`
///
/// Dropping the handle does not stop the engine; call `cancel`.
#[derive(Debug)]
pub struct CancelHandle {
    token: CancelToken,
    task: JoinHandle<()>,
}

impl CancelHandle {
    /// Stop the engine; no mutator or sink call happens after this returns
    /// unless a tick is already executing. Safe to call repeatedly.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Wait for the engine task to exit
    ///
    /// A panic raised by a mutator or the event sink resumes here.
    pub async fn stopped(self) {
        if let Err(err) = self.task.await {
            if err.is_panic() {
                std::panic::resume_unwind(err.into_panic());
            }
        }
    }
}

struct Runner<Z, O> {
    config: SimulationConfig,
    zones: Z,
    observations: O,
    on_event: Option<EventSink>,
    rng: ChaCha8Rng,
    token: CancelToken,
    ticks: u64,
}

impl<Z, O> Runner<Z, O>
where
    Z: Mutator<Zone>,
    O: Mutator<Observation>,
{
    async fn run(mut self) {
        info!(
            initial_delay_ms = self.config.initial_delay_ms,
            min_interval_ms = self.config.min_interval_ms,
            max_interval_ms = self.config.max_interval_ms,
            "Simulation engine started"
        );

        let mut delay = self.config.initial_delay();
        loop {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }

            if self.token.is_cancelled() {
                break;
            }
            self.tick();

            if self.token.is_cancelled() {
                break;
            }
            delay = self.next_delay();
            debug!(tick = self.ticks, delay_ms = delay.as_millis() as u64, "Next tick scheduled");
        }

        info!(ticks = self.ticks, "Simulation engine stopped");
    }

    fn tick(&mut self) {
        self.ticks += 1;
        let now = Utc::now();

        let mut risk: Option<RiskMutation> = None;
        {
            let rng = &mut self.rng;
            let config = &self.config;
            self.zones.apply(&mut |zones: &[Zone]| {
                let (next, mutation) = tick::mutate_zone_risk(zones, &mut *rng, config, now);
                risk = mutation;
                next
            });
        }

        match &risk {
            Some(mutation) => {
                debug!(
                    tick = self.ticks,
                    zone = %mutation.zone_id,
                    delta = mutation.delta,
                    hazard = %mutation.hazard_level,
                    confidence = mutation.confidence_score,
                    "Zone risk stepped"
                );
                if let Some(event) = mutation.to_event() {
                    self.emit(&event);
                }
            }
            None => debug!(tick = self.ticks, "No zones to mutate"),
        }

        let mut created: Option<Observation> = None;
        {
            let rng = &mut self.rng;
            let config = &self.config;
            self.observations.apply(&mut |history: &[Observation]| {
                let (next, observation) = tick::append_observation(history, &mut *rng, config, now);
                created = Some(observation);
                next
            });
        }

        if let Some(observation) = created {
            debug!(tick = self.ticks, id = %observation.id, kind = %observation.kind, "Observation created");
            self.emit(&SimulationEvent::Observation { observation });
        }
    }

    fn emit(&self, event: &SimulationEvent) {
        trace!(event = %event.describe(), "Simulation event");
        if let Some(sink) = &self.on_event {
            sink(event);
        }
    }

    fn next_delay(&mut self) -> Duration {
        draw_interval(&mut self.rng, &self.config)
    }
}

/// Uniform delay in `[min_interval_ms, max_interval_ms)`
///
/// Equal bounds give a fixed cadence and consume no randomness.
fn draw_interval<R: Rng + ?Sized>(rng: &mut R, config: &SimulationConfig) -> Duration {
    let (lo, hi) = config.interval_bounds_ms();
    let ms = if lo < hi { rng.gen_range(lo..hi) } else { lo };
    Duration::from_millis(ms)
}
