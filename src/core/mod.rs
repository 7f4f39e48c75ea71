pub mod config;
pub mod error;
pub mod types;

pub use config::SimulationConfig;
pub use error::{Result, SherpaError};
pub use types::{HazardLevel, ObservationId, Point, ZoneId};
