//! Initial dataset supplied to the dashboard at startup
//!
//! The built-in set mirrors the demo backcountry: five zones and a short
//! history of observations. A JSON file with the same shape can replace it.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SherpaError};
use crate::core::types::{HazardLevel, ObservationId, Point, ZoneId};
use crate::state::observation::{Observation, ObservationKind, Severity};
use crate::state::zone::{
    Aspect, Elevation, ForecastProblem, Likelihood, ProblemSize, ProblemType, Zone,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

impl SeedData {
    /// Parse and validate seed data from JSON
    pub fn from_json_str(text: &str) -> Result<Self> {
        let seed: Self = serde_json::from_str(text)?;
        seed.validate()?;
        Ok(seed)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Zones must be present, uniquely identified, and carry sane confidence
    pub fn validate(&self) -> Result<()> {
        if self.zones.is_empty() {
            return Err(SeedData::error("at least one zone is required"));
        }

        let mut seen = HashSet::new();
        for zone in &self.zones {
            if !seen.insert(&zone.id) {
                return Err(SeedData::error(format!("duplicate zone id {}", zone.id)));
            }
            if zone.confidence_score > 100 {
                return Err(SeedData::error(format!(
                    "zone {} has confidence {} above 100",
                    zone.id, zone.confidence_score
                )));
            }
        }

        Ok(())
    }

    fn error(message: impl Into<String>) -> SherpaError {
        SherpaError::SeedData(message.into())
    }

    /// The demo backcountry
    pub fn builtin() -> Self {
        Self {
            zones: builtin_zones(),
            observations: builtin_observations(),
        }
    }
}

fn seed_time(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 3, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn outline(points: &[(f32, f32)]) -> Vec<Point> {
    points.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn problem(
    problem_type: ProblemType,
    likelihood: Likelihood,
    size: ProblemSize,
    aspects: &[Aspect],
    elevations: &[Elevation],
) -> ForecastProblem {
    ForecastProblem {
        problem_type,
        likelihood,
        size,
        aspects: aspects.to_vec(),
        elevations: elevations.to_vec(),
    }
}

fn advice(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

fn builtin_zones() -> Vec<Zone> {
    use Aspect::*;
    use Elevation::*;

    vec![
        Zone {
            id: ZoneId::new("raven-peak"),
            name: "Raven Peak".into(),
            region: "North Summit".into(),
            hazard_level: HazardLevel::clamped(3),
            confidence_score: 62,
            polygon: outline(&[(120.0, 120.0), (340.0, 80.0), (420.0, 210.0), (260.0, 280.0), (140.0, 220.0)]),
            problems: vec![
                problem(ProblemType::PersistentSlab, Likelihood::Medium, ProblemSize::Large, &[N, NE, E], &[NearTreeline, AboveTreeline]),
                problem(ProblemType::WindSlab, Likelihood::High, ProblemSize::Medium, &[NW, N], &[AboveTreeline]),
            ],
            travel_advice: advice(&[
                "Stay on low-angle ridgelines and avoid convex rolls.",
                "Give wind-loaded bowls extra spacing.",
            ]),
            last_updated: seed_time(19, 30),
        },
        Zone {
            id: ZoneId::new("silver-pass"),
            name: "Silver Pass".into(),
            region: "Central Basin".into(),
            hazard_level: HazardLevel::clamped(2),
            confidence_score: 78,
            polygon: outline(&[(430.0, 120.0), (620.0, 110.0), (700.0, 240.0), (600.0, 360.0), (420.0, 300.0)]),
            problems: vec![problem(
                ProblemType::StormSlab,
                Likelihood::Medium,
                ProblemSize::Medium,
                &[W, SW],
                &[NearTreeline, AboveTreeline],
            )],
            travel_advice: advice(&[
                "Watch for cracking near small test slopes.",
                "Prefer wind-sheltered trees below 30°.",
            ]),
            last_updated: seed_time(21, 10),
        },
        Zone {
            id: ZoneId::new("glacier-gulch"),
            name: "Glacier Gulch".into(),
            region: "South Range".into(),
            hazard_level: HazardLevel::clamped(4),
            confidence_score: 48,
            polygon: outline(&[(210.0, 350.0), (420.0, 340.0), (520.0, 480.0), (360.0, 610.0), (190.0, 520.0)]),
            problems: vec![
                problem(ProblemType::PersistentSlab, Likelihood::High, ProblemSize::Large, &[N, NE, E], &[NearTreeline, AboveTreeline]),
                problem(ProblemType::Wet, Likelihood::Medium, ProblemSize::Medium, &[S, SE, SW], &[BelowTreeline]),
            ],
            travel_advice: advice(&[
                "Avoid steep glacial runouts and terrain traps.",
                "Consider conservative objectives or postpone travel.",
            ]),
            last_updated: seed_time(22, 5),
        },
        Zone {
            id: ZoneId::new("echo-ridge"),
            name: "Echo Ridge".into(),
            region: "East Spur".into(),
            hazard_level: HazardLevel::clamped(1),
            confidence_score: 86,
            polygon: outline(&[(670.0, 320.0), (860.0, 290.0), (920.0, 420.0), (810.0, 560.0), (640.0, 470.0)]),
            problems: vec![problem(
                ProblemType::WindSlab,
                Likelihood::Low,
                ProblemSize::Small,
                &[N, NE],
                &[AboveTreeline],
            )],
            travel_advice: advice(&[
                "Enjoy low-angle glades; monitor for isolated wind slabs.",
                "Keep an eye on upper elevation rollovers.",
            ]),
            last_updated: seed_time(20, 45),
        },
        Zone {
            id: ZoneId::new("midnight-bowl"),
            name: "Midnight Bowl".into(),
            region: "West Ridge".into(),
            hazard_level: HazardLevel::clamped(3),
            confidence_score: 58,
            polygon: outline(&[(740.0, 80.0), (930.0, 120.0), (980.0, 260.0), (840.0, 260.0), (710.0, 170.0)]),
            problems: vec![problem(
                ProblemType::StormSlab,
                Likelihood::High,
                ProblemSize::Medium,
                &[W, NW],
                &[NearTreeline, AboveTreeline],
            )],
            travel_advice: advice(&[
                "Expect touchy slabs on cross-loaded features.",
                "Use quick hand pits to check bonding on leeward slopes.",
            ]),
            last_updated: seed_time(18, 20),
        },
    ]
}

fn builtin_observations() -> Vec<Observation> {
    let obs = |id: &str,
               zone: &str,
               kind: ObservationKind,
               severity: Severity,
               (hour, minute): (u32, u32),
               summary: &str,
               details: &str| {
        Observation {
            id: ObservationId::new(id),
            zone_id: ZoneId::new(zone),
            kind,
            severity,
            time: seed_time(hour, minute),
            summary: summary.to_string(),
            details: details.to_string(),
        }
    };

    vec![
        obs(
            "obs-001",
            "raven-peak",
            ObservationKind::Wind,
            Severity::Medium,
            (17, 45),
            "Ridgetop winds loading north aspects.",
            "Gusts 25-30 mph with active transport above 10k'.",
        ),
        obs(
            "obs-002",
            "silver-pass",
            ObservationKind::Snowfall,
            Severity::Low,
            (18, 10),
            "2-3 inches new snow overnight.",
            "Light density snow with minimal wind effect.",
        ),
        obs(
            "obs-003",
            "glacier-gulch",
            ObservationKind::Avalanche,
            Severity::High,
            (19, 5),
            "D2.5 persistent slab on NE face.",
            "Crown 2-3 ft deep, triggered remotely from ridge.",
        ),
        obs(
            "obs-004",
            "echo-ridge",
            ObservationKind::Pit,
            Severity::Low,
            (20, 25),
            "ECTP 19 down 40 cm.",
            "New snow bonding well over older layers.",
        ),
        obs(
            "obs-005",
            "midnight-bowl",
            ObservationKind::Cracking,
            Severity::Medium,
            (21, 15),
            "Shooting cracks on wind-loaded rollovers.",
            "Cracks up to 4 m on SE aspect just below ridge.",
        ),
    ]
}
