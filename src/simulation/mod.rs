//! Background simulation of zone risk and the observation feed

pub mod cancel;
pub mod engine;
pub mod events;
pub mod mutator;
pub mod templates;
pub mod tick;

pub use cancel::{CancelToken, TokenState};
pub use engine::{CancelHandle, SimulationEngine};
pub use events::{EventSink, SimulationEvent};
pub use mutator::{Mutator, Shared};
pub use tick::{append_observation, mutate_zone_risk, RiskMutation};
