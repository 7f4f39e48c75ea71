use serde::{Deserialize, Serialize};
use std::fmt;

/// Map display layers, in the order the layer button cycles through them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapLayer {
    #[default]
    Hazard,
    Avalanches,
    Wind,
    Snow,
    Temp,
    Problems,
}

impl MapLayer {
    pub const ALL: [MapLayer; 6] = [
        Self::Hazard,
        Self::Avalanches,
        Self::Wind,
        Self::Snow,
        Self::Temp,
        Self::Problems,
    ];

    /// Next layer, wrapping back to Hazard
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for MapLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
