//! Zone and observation records shared by the engine, the assistant, and
//! the host shell

pub mod layer;
pub mod observation;
pub mod seed;
pub mod zone;

pub use layer::MapLayer;
pub use observation::{Observation, ObservationKind, Severity};
pub use seed::SeedData;
pub use zone::{Aspect, Elevation, ForecastProblem, Likelihood, ProblemSize, ProblemType, Zone};
