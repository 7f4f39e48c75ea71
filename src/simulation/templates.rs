//! Fixed pools the engine draws from

use chrono::{DateTime, Utc};

use crate::core::types::{ObservationId, ZoneId};
use crate::state::observation::{Observation, ObservationKind, Severity};

/// Hazard steps, drawn uniformly: P(-1) = P(+1) = 1/5, P(0) = 3/5
pub const HAZARD_SHIFTS: [i8; 5] = [-1, 0, 0, 0, 1];

/// Preset content for a synthesized observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationTemplate {
    pub kind: ObservationKind,
    pub severity: Severity,
    pub summary: &'static str,
    pub details: &'static str,
}

impl ObservationTemplate {
    pub fn instantiate(&self, id: ObservationId, zone_id: ZoneId, time: DateTime<Utc>) -> Observation {
        Observation {
            id,
            zone_id,
            kind: self.kind,
            severity: self.severity,
            time,
            summary: self.summary.to_string(),
            details: self.details.to_string(),
        }
    }
}

pub const OBSERVATION_TEMPLATES: [ObservationTemplate; 5] = [
    ObservationTemplate {
        kind: ObservationKind::Avalanche,
        severity: Severity::High,
        summary: "D2 slab released on steep northerly.",
        details: "Observer noted whumpf and wide propagation.",
    },
    ObservationTemplate {
        kind: ObservationKind::Whumpf,
        severity: Severity::Medium,
        summary: "Audible collapse in low-angle meadow.",
        details: "Collapse propagated 15-20 m in soft slab.",
    },
    ObservationTemplate {
        kind: ObservationKind::Wind,
        severity: Severity::Medium,
        summary: "Wind transport increasing along ridgeline.",
        details: "Plumes visible; small pillows forming in start zones.",
    },
    ObservationTemplate {
        kind: ObservationKind::Temp,
        severity: Severity::Low,
        summary: "Rapid warming at mid elevations.",
        details: "Surface snow moist below 9k'.",
    },
    ObservationTemplate {
        kind: ObservationKind::Snowfall,
        severity: Severity::Low,
        summary: "Quick burst of snowfall over the last hour.",
        details: "1-2\" accumulation with moderate density.",
    },
];
