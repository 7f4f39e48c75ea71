//! Forecast zones and their avalanche problems

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::{HazardLevel, Point, ZoneId};

/// A monitored area with a current hazard assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub region: String,
    pub hazard_level: HazardLevel,
    /// Forecaster confidence, percent (0-100)
    pub confidence_score: u8,
    /// Map outline; opaque to the core
    #[serde(default)]
    pub polygon: Vec<Point>,
    #[serde(default)]
    pub problems: Vec<ForecastProblem>,
    #[serde(default)]
    pub travel_advice: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

impl Zone {
    /// Set hazard and confidence, stamping `now` only if either changed
    ///
    /// Returns true when the zone was modified.
    pub fn update_risk(
        &mut self,
        hazard_level: HazardLevel,
        confidence_score: u8,
        now: DateTime<Utc>,
    ) -> bool {
        let confidence_score = confidence_score.min(100);
        if self.hazard_level == hazard_level && self.confidence_score == confidence_score {
            return false;
        }
        self.hazard_level = hazard_level;
        self.confidence_score = confidence_score;
        self.last_updated = now;
        true
    }

    /// Case-insensitive substring match of `query` against the name
    pub fn name_contains(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        !query.is_empty() && self.name.to_lowercase().contains(&query)
    }

    /// True if the full name appears inside `phrase`, ignoring case
    ///
    /// Lets "raven peak please" find Raven Peak.
    pub fn is_named_in(&self, phrase: &str) -> bool {
        let name = self.name.trim().to_lowercase();
        !name.is_empty() && phrase.to_lowercase().contains(&name)
    }
}

/// One avalanche problem in a zone forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastProblem {
    #[serde(rename = "type")]
    pub problem_type: ProblemType,
    pub likelihood: Likelihood,
    pub size: ProblemSize,
    #[serde(default)]
    pub aspects: Vec<Aspect>,
    #[serde(default)]
    pub elevations: Vec<Elevation>,
}

impl fmt::Display for ForecastProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.problem_type, self.likelihood)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProblemType {
    #[serde(rename = "Persistent Slab")]
    PersistentSlab,
    #[serde(rename = "Wind Slab")]
    WindSlab,
    #[serde(rename = "Storm Slab")]
    StormSlab,
    Wet,
}

impl ProblemType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PersistentSlab => "Persistent Slab",
            Self::WindSlab => "Wind Slab",
            Self::StormSlab => "Storm Slab",
            Self::Wet => "Wet",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Likelihood {
    Low,
    Medium,
    High,
}

impl fmt::Display for Likelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProblemSize {
    Small,
    Medium,
    Large,
}

impl fmt::Display for ProblemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        };
        f.write_str(label)
    }
}

/// Compass aspect of a slope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aspect {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Elevation band relative to treeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Elevation {
    #[serde(rename = "Below Treeline")]
    BelowTreeline,
    #[serde(rename = "Near Treeline")]
    NearTreeline,
    #[serde(rename = "Above Treeline")]
    AboveTreeline,
}

impl fmt::Display for Elevation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BelowTreeline => "Below Treeline",
            Self::NearTreeline => "Near Treeline",
            Self::AboveTreeline => "Above Treeline",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn zone(name: &str) -> Zone {
        Zone {
            id: ZoneId::new(name.to_lowercase().replace(' ', "-")),
            name: name.to_string(),
            region: "Test Range".to_string(),
            hazard_level: HazardLevel::clamped(3),
            confidence_score: 60,
            polygon: Vec::new(),
            problems: Vec::new(),
            travel_advice: Vec::new(),
            last_updated: Utc.with_ymd_and_hms(2026, 2, 3, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_update_risk_stamps_time_on_change() {
        let mut z = zone("Raven Peak");
        let now = Utc.with_ymd_and_hms(2026, 2, 4, 8, 0, 0).unwrap();
        assert!(z.update_risk(HazardLevel::clamped(4), 60, now));
        assert_eq!(z.hazard_level.value(), 4);
        assert_eq!(z.last_updated, now);
    }

    #[test]
    fn test_update_risk_noop_keeps_timestamp() {
        let mut z = zone("Raven Peak");
        let before = z.last_updated;
        let now = Utc.with_ymd_and_hms(2026, 2, 4, 8, 0, 0).unwrap();
        assert!(!z.update_risk(HazardLevel::clamped(3), 60, now));
        assert_eq!(z.last_updated, before);
    }

    #[test]
    fn test_update_risk_caps_confidence() {
        let mut z = zone("Raven Peak");
        let now = Utc.with_ymd_and_hms(2026, 2, 4, 8, 0, 0).unwrap();
        z.update_risk(HazardLevel::clamped(3), 250, now);
        assert_eq!(z.confidence_score, 100);
    }

    #[test]
    fn test_name_contains_is_case_insensitive() {
        let z = zone("Raven Peak");
        assert!(z.name_contains("raven"));
        assert!(z.name_contains("RAVEN PEAK"));
        assert!(!z.name_contains("raven peak please"));
        assert!(!z.name_contains("silver"));
        assert!(!z.name_contains("   "));
    }

    #[test]
    fn test_is_named_in_phrase() {
        let z = zone("Raven Peak");
        assert!(z.is_named_in("raven peak please"));
        assert!(!z.is_named_in("raven"));
    }

    #[test]
    fn test_problem_display() {
        let problem = ForecastProblem {
            problem_type: ProblemType::WindSlab,
            likelihood: Likelihood::High,
            size: ProblemSize::Medium,
            aspects: vec![Aspect::NW, Aspect::N],
            elevations: vec![Elevation::AboveTreeline],
        };
        assert_eq!(problem.to_string(), "Wind Slab (High)");
    }

    #[test]
    fn test_problem_serde_labels() {
        let json = r#"{
            "type": "Persistent Slab",
            "likelihood": "Medium",
            "size": "Large",
            "aspects": ["N", "NE"],
            "elevations": ["Near Treeline", "Above Treeline"]
        }"#;
        let problem: ForecastProblem = serde_json::from_str(json).unwrap();
        assert_eq!(problem.problem_type, ProblemType::PersistentSlab);
        assert_eq!(problem.elevations[0], Elevation::NearTreeline);
        assert_eq!(problem.aspects[1].to_string(), "NE");
    }
}
