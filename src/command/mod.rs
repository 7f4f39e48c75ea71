//! Command pipeline
//!
//! Free text becomes UI commands in two steps:
//! input -> classify -> Vec<Intent> -> IntentResolver -> Vec<UiCommand>
//! The host shell is the only thing that executes a `UiCommand`.

pub mod resolver;

pub use resolver::IntentResolver;

use serde::{Deserialize, Serialize};

use crate::core::types::ZoneId;
use crate::state::layer::MapLayer;
use crate::state::observation::ObservationKind;

/// A request for the host shell to change visible state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum UiCommand {
    SelectZone(ZoneId),
    SwitchLayer(MapLayer),
    FocusFeed(ObservationKind),
    HighlightZones(Vec<ZoneId>),
}
