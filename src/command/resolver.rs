//! Intent resolution - turns intents into concrete commands against the zone list

use tracing::debug;

use crate::assistant::intent::Intent;
use crate::command::UiCommand;
use crate::core::types::ZoneId;
use crate::state::zone::Zone;

/// Resolves intents against the caller's zone ordering
pub struct IntentResolver<'a> {
    zones: &'a [Zone],
}

impl<'a> IntentResolver<'a> {
    pub fn new(zones: &'a [Zone]) -> Self {
        Self { zones }
    }

    /// Resolve each intent in order, dropping the ones with no target
    pub fn resolve_all(&self, intents: &[Intent]) -> Vec<UiCommand> {
        intents.iter().filter_map(|intent| self.resolve(intent)).collect()
    }

    pub fn resolve(&self, intent: &Intent) -> Option<UiCommand> {
        match intent {
            Intent::SwitchLayer { layer } => Some(UiCommand::SwitchLayer(*layer)),
            Intent::FocusFeed { kind } => Some(UiCommand::FocusFeed(*kind)),
            Intent::HighlightHighestHazard => {
                let ids = self.highest_hazard_zones();
                (!ids.is_empty()).then_some(UiCommand::HighlightZones(ids))
            }
            Intent::SelectZone { query } => match self.find_by_name(query) {
                Some(zone) => Some(UiCommand::SelectZone(zone.id.clone())),
                None => {
                    debug!(query = %query, "No zone matches selection");
                    None
                }
            },
        }
    }

    /// Every zone at the maximum hazard level, in zone order
    pub fn highest_hazard_zones(&self) -> Vec<ZoneId> {
        let Some(max) = self.zones.iter().map(|z| z.hazard_level).max() else {
            return Vec::new();
        };
        self.zones
            .iter()
            .filter(|z| z.hazard_level == max)
            .map(|z| z.id.clone())
            .collect()
    }

    /// First zone whose name contains the query
    ///
    /// If no name contains it, falls back to the first zone whose full name
    /// appears inside the query, so trailing words don't break a selection.
    pub fn find_by_name(&self, query: &str) -> Option<&'a Zone> {
        self.zones
            .iter()
            .find(|zone| zone.name_contains(query))
            .or_else(|| self.zones.iter().find(|zone| zone.is_named_in(query)))
    }
}
