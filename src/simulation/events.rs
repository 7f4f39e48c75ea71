//! Events emitted by the engine for state-changing mutations

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::types::{HazardLevel, ZoneId};
use crate::state::observation::Observation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimulationEvent {
    /// A new observation was prepended to the feed
    Observation { observation: Observation },
    /// A zone's hazard walk produced a non-zero step
    Zone {
        zone_id: ZoneId,
        hazard_level: HazardLevel,
    },
}

impl SimulationEvent {
    /// One-line description for logs and the terminal feed
    pub fn describe(&self) -> String {
        match self {
            Self::Observation { observation } => format!(
                "[{}] {} ({}) in {}: {}",
                observation.id,
                observation.kind,
                observation.severity,
                observation.zone_id,
                observation.summary
            ),
            Self::Zone {
                zone_id,
                hazard_level,
            } => format!(
                "{} now at hazard {} ({})",
                zone_id,
                hazard_level,
                hazard_level.label()
            ),
        }
    }
}

/// Optional listener for engine events; invoked on the engine task
pub type EventSink = Arc<dyn Fn(&SimulationEvent) + Send + Sync>;
