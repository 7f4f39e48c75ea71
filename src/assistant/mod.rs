//! Assistant dispatcher
//!
//! Every message gets the same deterministic digest of the selected zone,
//! plus whatever UI commands its keywords map to.

pub mod digest;
pub mod intent;

pub use digest::Digest;
pub use intent::{classify, Intent};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command::{IntentResolver, UiCommand};
use crate::state::observation::Observation;
use crate::state::zone::Zone;

/// Shown before the first message
pub const GREETING: &str = "Ask me about the snowpack, zones, or what changed in the last hour.";

/// Canned prompts offered next to the input box
pub const QUICK_ACTIONS: [&str; 4] = [
    "Summarize selected zone",
    "Show recent avalanches",
    "Safest travel options",
    "What changed recently?",
];

/// Assistant answer to one user message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub digest: Digest,
    pub intents: Vec<Intent>,
    pub commands: Vec<UiCommand>,
}

impl Reply {
    pub fn text(&self) -> String {
        self.digest.render()
    }
}

pub struct Assistant;

impl Assistant {
    /// Answer `text` given a snapshot of dashboard state
    ///
    /// The digest describes state as it was before any returned command runs.
    pub fn respond(
        text: &str,
        selected: Option<&Zone>,
        zones: &[Zone],
        observations: &[Observation],
    ) -> Reply {
        let digest = Digest::build(selected, observations);
        let intents = classify(text);
        let commands = IntentResolver::new(zones).resolve_all(&intents);
        debug!(
            intents = intents.len(),
            commands = commands.len(),
            "Assistant reply built"
        );
        Reply {
            digest,
            intents,
            commands,
        }
    }
}
