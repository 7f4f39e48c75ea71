//! Core type definitions used throughout the codebase

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a forecast zone
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub String);

impl ZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Unique identifier for observations
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationId(pub String);

impl ObservationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh `obs-xxxxxxxx` id from the supplied RNG
    ///
    /// The hex suffix comes from a v4 UUID built out of RNG bytes, so a seeded
    /// engine produces reproducible ids.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let uuid = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
        let simple = uuid.simple().to_string();
        Self(format!("obs-{}", &simple[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Avalanche danger on the 1 (Low) to 5 (Extreme) scale
///
/// The only way to obtain a value is through a validating or clamping
/// constructor, so a `HazardLevel` is always in 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HazardLevel(u8);

impl HazardLevel {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(5);

    /// Returns None when `level` is outside 1..=5
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0).contains(&level).then_some(Self(level))
    }

    pub fn clamped(level: i32) -> Self {
        Self(level.clamp(Self::MIN.0 as i32, Self::MAX.0 as i32) as u8)
    }

    /// Apply a signed step, saturating at the ends of the scale
    pub fn shifted(self, delta: i8) -> Self {
        Self::clamped(self.0 as i32 + delta as i32)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Danger-scale word shown next to the number
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Low",
            2 => "Moderate",
            3 => "Considerable",
            4 => "High",
            _ => "Extreme",
        }
    }
}

impl Default for HazardLevel {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for HazardLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or_else(|| format!("hazard level {} outside 1..=5", level))
    }
}

impl From<HazardLevel> for u8 {
    fn from(level: HazardLevel) -> Self {
        level.0
    }
}

impl fmt::Display for HazardLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 2D map point (zone outlines)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zone_id_equality() {
        let a = ZoneId::new("raven-peak");
        let b = ZoneId::from("raven-peak");
        let c = ZoneId::new("echo-ridge");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), "raven-peak");
    }

    #[test]
    fn test_observation_id_format() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let id = ObservationId::generate(&mut rng);
        assert!(id.as_str().starts_with("obs-"));
        assert_eq!(id.as_str().len(), 12);
        assert!(id.as_str()[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_observation_id_reproducible_from_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        assert_eq!(ObservationId::generate(&mut a), ObservationId::generate(&mut b));
        // Subsequent draws differ
        assert_ne!(ObservationId::generate(&mut a), ObservationId::generate(&mut a));
    }

    #[test]
    fn test_hazard_level_bounds() {
        assert!(HazardLevel::new(0).is_none());
        assert!(HazardLevel::new(6).is_none());
        assert_eq!(HazardLevel::new(3).map(HazardLevel::value), Some(3));
        assert_eq!(HazardLevel::clamped(-4), HazardLevel::MIN);
        assert_eq!(HazardLevel::clamped(11), HazardLevel::MAX);
    }

    #[test]
    fn test_hazard_level_shift_saturates() {
        assert_eq!(HazardLevel::MAX.shifted(1), HazardLevel::MAX);
        assert_eq!(HazardLevel::MIN.shifted(-1), HazardLevel::MIN);
        assert_eq!(HazardLevel::clamped(3).shifted(1).value(), 4);
        assert_eq!(HazardLevel::clamped(3).shifted(-1).value(), 2);
    }

    #[test]
    fn test_hazard_level_labels() {
        let labels: Vec<_> = (1..=5)
            .filter_map(HazardLevel::new)
            .map(HazardLevel::label)
            .collect();
        assert_eq!(labels, ["Low", "Moderate", "Considerable", "High", "Extreme"]);
    }

    #[test]
    fn test_hazard_level_serde_rejects_out_of_range() {
        let level: HazardLevel = serde_json::from_str("4").unwrap();
        assert_eq!(level.value(), 4);
        assert_eq!(serde_json::to_string(&level).unwrap(), "4");
        assert!(serde_json::from_str::<HazardLevel>("9").is_err());
    }
}
