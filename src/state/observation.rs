//! Field observations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::{ObservationId, ZoneId};

/// A timestamped field report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub id: ObservationId,
    /// Owning zone; advisory only, never checked against the zone list
    pub zone_id: ZoneId,
    #[serde(rename = "type")]
    pub kind: ObservationKind,
    pub severity: Severity,
    pub time: DateTime<Utc>,
    pub summary: String,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationKind {
    Avalanche,
    Whumpf,
    Cracking,
    Wind,
    Snowfall,
    Temp,
    Pit,
}

impl fmt::Display for ObservationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// First observation of `kind` in list order (the feed is newest-first)
pub fn newest_of_kind(observations: &[Observation], kind: ObservationKind) -> Option<&Observation> {
    observations.iter().find(|obs| obs.kind == kind)
}
