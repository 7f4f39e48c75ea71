//! Host-side dashboard state
//!
//! `Dashboard` is the single executor of `UiCommand`s and the receiver of
//! simulation events. It owns the shared zone list and observation feed that
//! the engine mutates, and the engine handle while the simulation is on.

pub mod transcript;

pub use transcript::{Message, Speaker, Transcript};

use tracing::{info, trace};

use crate::assistant::{Assistant, Reply};
use crate::command::UiCommand;
use crate::core::config::SimulationConfig;
use crate::core::types::ZoneId;
use crate::simulation::engine::{CancelHandle, SimulationEngine};
use crate::simulation::events::{EventSink, SimulationEvent};
use crate::simulation::mutator::Shared;
use crate::state::layer::MapLayer;
use crate::state::observation::{Observation, ObservationKind};
use crate::state::seed::SeedData;
use crate::state::zone::Zone;

/// Tab shown in the side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelTab {
    #[default]
    Overview,
    Observations,
}

#[derive(Debug)]
pub struct Dashboard {
    zones: Shared<Zone>,
    observations: Shared<Observation>,
    selected_zone_id: Option<ZoneId>,
    active_layer: MapLayer,
    panel_tab: PanelTab,
    focused_kind: Option<ObservationKind>,
    highlighted: Vec<ZoneId>,
    transcript: Transcript,
    pulse: bool,
    /// Running engine; None while the simulation is off
    engine: Option<CancelHandle>,
}

impl Dashboard {
    pub fn new(seed: SeedData) -> Self {
        let selected_zone_id = seed.zones.first().map(|z| z.id.clone());
        Self {
            zones: Shared::new(seed.zones),
            observations: Shared::new(seed.observations),
            selected_zone_id,
            active_layer: MapLayer::default(),
            panel_tab: PanelTab::default(),
            focused_kind: None,
            highlighted: Vec::new(),
            transcript: Transcript::new(),
            pulse: false,
            engine: None,
        }
    }

    /// Handle to the zone list for the engine
    pub fn zones(&self) -> Shared<Zone> {
        self.zones.clone()
    }

    /// Handle to the observation feed for the engine
    pub fn observations(&self) -> Shared<Observation> {
        self.observations.clone()
    }

    pub fn selected_zone(&self) -> Option<Zone> {
        let id = self.selected_zone_id.as_ref()?;
        self.zones.read(|zones| zones.iter().find(|z| &z.id == id).cloned())
    }

    pub fn selected_zone_id(&self) -> Option<&ZoneId> {
        self.selected_zone_id.as_ref()
    }

    pub fn active_layer(&self) -> MapLayer {
        self.active_layer
    }

    pub fn panel_tab(&self) -> PanelTab {
        self.panel_tab
    }

    pub fn focused_kind(&self) -> Option<ObservationKind> {
        self.focused_kind
    }

    pub fn highlighted(&self) -> &[ZoneId] {
        &self.highlighted
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pulse(&self) -> bool {
        self.pulse
    }

    pub fn clear_pulse(&mut self) {
        self.pulse = false;
    }

    /// Feed as currently filtered by the focused category
    pub fn visible_observations(&self) -> Vec<Observation> {
        self.observations.read(|feed| {
            feed.iter()
                .filter(|obs| self.focused_kind.map_or(true, |kind| obs.kind == kind))
                .cloned()
                .collect()
        })
    }

    /// Send a chat message; blank input is ignored
    ///
    /// The digest is computed before the reply's commands are applied.
    pub fn send(&mut self, text: &str) -> Option<Reply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let selected = self.selected_zone();
        let zones = self.zones.snapshot();
        let reply = self
            .observations
            .read(|feed| Assistant::respond(text, selected.as_ref(), &zones, feed));

        self.transcript.push(Speaker::User, text);
        self.transcript.push(Speaker::Assistant, reply.text());
        for command in &reply.commands {
            self.apply(command);
        }
        Some(reply)
    }

    /// Execute one command against the dashboard state
    pub fn apply(&mut self, command: &UiCommand) {
        match command {
            UiCommand::SelectZone(id) => {
                self.selected_zone_id = Some(id.clone());
                self.highlighted.clear();
            }
            UiCommand::SwitchLayer(layer) => {
                self.active_layer = *layer;
                if *layer == MapLayer::Avalanches {
                    self.panel_tab = PanelTab::Observations;
                }
            }
            UiCommand::FocusFeed(kind) => {
                self.focused_kind = Some(*kind);
            }
            UiCommand::HighlightZones(ids) => {
                self.highlighted = ids.clone();
            }
        }
    }

    /// React to a simulation event
    pub fn on_event(&mut self, event: &SimulationEvent) {
        trace!(event = %event.describe(), "Dashboard event");
        match event {
            SimulationEvent::Observation { observation } => {
                if observation.kind == ObservationKind::Avalanche {
                    self.focused_kind = Some(ObservationKind::Avalanche);
                    self.pulse = true;
                }
            }
            SimulationEvent::Zone { .. } => {
                self.pulse = true;
            }
        }
    }

    pub fn simulation_on(&self) -> bool {
        self.engine.is_some()
    }

    /// Start a fresh engine over this dashboard's collections
    ///
    /// Returns false if the simulation is already on. Must be called from
    /// within a tokio runtime.
    pub fn start_simulation(&mut self, config: SimulationConfig, on_event: Option<EventSink>) -> bool {
        if self.engine.is_some() {
            return false;
        }
        info!("Simulation switched on");
        self.engine = Some(SimulationEngine::start(
            config,
            self.zones(),
            self.observations(),
            on_event,
        ));
        true
    }

    /// Cancel the running engine and wait for it to exit
    ///
    /// Returns false if the simulation was already off.
    pub async fn stop_simulation(&mut self) -> bool {
        let Some(handle) = self.engine.take() else {
            return false;
        };
        handle.cancel();
        handle.stopped().await;
        info!("Simulation switched off");
        true
    }

    /// Flip the simulation switch; returns the new state
    pub async fn toggle_simulation(
        &mut self,
        config: SimulationConfig,
        on_event: Option<EventSink>,
    ) -> bool {
        if self.simulation_on() {
            self.stop_simulation().await;
            false
        } else {
            self.start_simulation(config, on_event)
        }
    }

    /// Advance to the next map layer
    pub fn cycle_layer(&mut self) -> MapLayer {
        let next = self.active_layer.next();
        self.apply(&UiCommand::SwitchLayer(next));
        next
    }
}
