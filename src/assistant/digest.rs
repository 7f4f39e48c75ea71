//! Deterministic state digest shown as the assistant's reply

use serde::{Deserialize, Serialize};

use crate::state::observation::{newest_of_kind, Observation, ObservationKind};
use crate::state::zone::Zone;

pub const NO_ZONE_SUMMARY: &str = "Select a zone to see tailored guidance.";
pub const NO_PROBLEMS: &str = "No primary problems reported.";
pub const NO_AVALANCHES: &str = "No new avalanche activity reported.";
pub const GENERIC_APPROACH: &str = "Stick to low-angle terrain and keep spacing.";
pub const NO_CONFIDENCE: &str = "--";

/// Five-part summary of the selected zone and recent activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    pub summary: String,
    pub key_problems: String,
    pub changed: String,
    pub approach: String,
    pub confidence: String,
}

impl Digest {
    /// Build the digest; never fails, missing data becomes fallback text
    ///
    /// `observations` is expected newest-first.
    pub fn build(zone: Option<&Zone>, observations: &[Observation]) -> Self {
        let summary = match zone {
            Some(z) => format!(
                "{} is sitting at hazard {} with {}% confidence.",
                z.name, z.hazard_level, z.confidence_score
            ),
            None => NO_ZONE_SUMMARY.to_string(),
        };

        let problems: Vec<String> = zone
            .map(|z| z.problems.iter().map(ToString::to_string).collect())
            .unwrap_or_default();
        let key_problems = if problems.is_empty() {
            NO_PROBLEMS.to_string()
        } else {
            problems.join(", ")
        };

        let changed = match newest_of_kind(observations, ObservationKind::Avalanche) {
            Some(obs) => format!("Newest avalanche: {}", obs.summary),
            None => NO_AVALANCHES.to_string(),
        };

        let approach = zone
            .map(|z| z.travel_advice.join(" "))
            .unwrap_or_else(|| GENERIC_APPROACH.to_string());

        let confidence = zone
            .map(|z| format!("{}%", z.confidence_score))
            .unwrap_or_else(|| NO_CONFIDENCE.to_string());

        Self {
            summary,
            key_problems,
            changed,
            approach,
            confidence,
        }
    }

    /// Chat-message form of the digest
    pub fn render(&self) -> String {
        format!(
            "Summary: {}\nKey problems: {}\nWhat changed: {}\nSuggested approach: {}\nConfidence: {}",
            self.summary, self.key_problems, self.changed, self.approach, self.confidence
        )
    }
}
