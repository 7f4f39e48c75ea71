//! Pure per-tick transforms
//!
//! Each function takes the current collection and returns the next one
//! along with a description of what changed. The engine feeds these to the
//! owner's mutators; `sim_trace` and the tests call them directly.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::types::{HazardLevel, ObservationId, ZoneId};
use crate::simulation::events::SimulationEvent;
use crate::simulation::templates::{HAZARD_SHIFTS, OBSERVATION_TEMPLATES};
use crate::state::observation::Observation;
use crate::state::zone::Zone;

/// Outcome of one zone-risk step
#[derive(Debug, Clone, PartialEq)]
pub struct RiskMutation {
    pub zone_id: ZoneId,
    pub previous_level: HazardLevel,
    pub hazard_level: HazardLevel,
    pub confidence_score: u8,
    /// Raw step drawn from the shift table, before clamping
    pub delta: i8,
}

impl RiskMutation {
    /// Zone event for this step; None when the drawn delta was zero
    pub fn to_event(&self) -> Option<SimulationEvent> {
        (self.delta != 0).then(|| SimulationEvent::Zone {
            zone_id: self.zone_id.clone(),
            hazard_level: self.hazard_level,
        })
    }
}

/// Random-walk one uniformly chosen zone
///
/// Returns the zones unchanged and no mutation when the list is empty.
pub fn mutate_zone_risk<R: Rng + ?Sized>(
    zones: &[Zone],
    rng: &mut R,
    config: &SimulationConfig,
    now: DateTime<Utc>,
) -> (Vec<Zone>, Option<RiskMutation>) {
    if zones.is_empty() {
        return (Vec::new(), None);
    }

    let target = rng.gen_range(0..zones.len());
    let delta = HAZARD_SHIFTS[rng.gen_range(0..HAZARD_SHIFTS.len())];
    // Non-finite jitter would make the range invalid
    let jitter = if config.confidence_jitter.is_finite() {
        config.confidence_jitter.abs()
    } else {
        0.0
    };
    let nudge = rng.gen_range(-jitter..=jitter);

    let zone = &zones[target];
    let hazard_level = zone.hazard_level.shifted(delta);
    let floor = config.confidence_floor.min(config.confidence_ceiling) as f64;
    let ceiling = config.confidence_ceiling.max(config.confidence_floor) as f64;
    let confidence_score = (zone.confidence_score as f64 + nudge)
        .clamp(floor, ceiling)
        .round() as u8;

    let mutation = RiskMutation {
        zone_id: zone.id.clone(),
        previous_level: zone.hazard_level,
        hazard_level,
        confidence_score,
        delta,
    };

    let next = zones
        .iter()
        .enumerate()
        .map(|(i, z)| {
            let mut z = z.clone();
            if i == target {
                z.update_risk(hazard_level, confidence_score, now);
            }
            z
        })
        .collect();

    (next, Some(mutation))
}

/// Synthesize one observation and prepend it to the capped history
///
/// The zone is borrowed from a random existing observation, so new reports
/// are not tied to the zone whose risk moved on the same tick.
pub fn append_observation<R: Rng + ?Sized>(
    history: &[Observation],
    rng: &mut R,
    config: &SimulationConfig,
    now: DateTime<Utc>,
) -> (Vec<Observation>, Observation) {
    let template = &OBSERVATION_TEMPLATES[rng.gen_range(0..OBSERVATION_TEMPLATES.len())];
    let zone_id = history
        .choose(rng)
        .map(|obs| obs.zone_id.clone())
        .unwrap_or_else(|| ZoneId::new(config.fallback_zone_id.clone()));
    let observation = template.instantiate(ObservationId::generate(rng), zone_id, now);

    let limit = config.history_limit.max(1);
    let mut next = Vec::with_capacity(limit.min(history.len() + 1));
    next.push(observation.clone());
    next.extend(history.iter().take(limit - 1).cloned());

    (next, observation)
}
