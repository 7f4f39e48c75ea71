//! Lexical classification of free-text input into intents
//!
//! There is no language model here: a fixed table of rules is checked against
//! the lowercased input, and every rule that matches contributes its intents.
//! Rules are independent, so one message can produce several intents.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::state::layer::MapLayer;
use crate::state::observation::ObservationKind;

/// What the user asked the dashboard to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// Change the active map layer
    SwitchLayer { layer: MapLayer },
    /// Filter the observation feed to one category
    FocusFeed { kind: ObservationKind },
    /// Highlight every zone at the current maximum hazard
    HighlightHighestHazard,
    /// Select the first zone whose name matches `query`
    SelectZone { query: String },
}

/// One entry of the rule table
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub build: fn(&str) -> Vec<Intent>,
}

/// Rules in evaluation order; each sees the lowercased input
pub const RULES: &[Rule] = &[
    Rule {
        name: "show_avalanches",
        matches: mentions_show_avalanches,
        build: build_show_avalanches,
    },
    Rule {
        name: "highest_hazard",
        matches: mentions_highest_hazard,
        build: build_highest_hazard,
    },
    Rule {
        name: "select_zone",
        matches: mentions_select,
        build: build_select,
    },
];

fn mentions_show_avalanches(text: &str) -> bool {
    text.contains("show avalanches")
}

fn build_show_avalanches(_: &str) -> Vec<Intent> {
    vec![
        Intent::SwitchLayer {
            layer: MapLayer::Avalanches,
        },
        Intent::FocusFeed {
            kind: ObservationKind::Avalanche,
        },
    ]
}

fn mentions_highest_hazard(text: &str) -> bool {
    text.contains("highest hazard")
}

fn build_highest_hazard(_: &str) -> Vec<Intent> {
    vec![Intent::HighlightHighestHazard]
}

fn select_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)select\s+([a-z\s]+)").expect("select pattern is valid"))
}

fn mentions_select(text: &str) -> bool {
    select_pattern().is_match(text)
}

fn build_select(text: &str) -> Vec<Intent> {
    select_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|query| !query.is_empty())
        .map(|query| {
            vec![Intent::SelectZone {
                query: query.to_string(),
            }]
        })
        .unwrap_or_default()
}

/// Classify raw input; unmatched text yields an empty list
pub fn classify(input: &str) -> Vec<Intent> {
    let normalized = input.to_lowercase();
    RULES
        .iter()
        .filter(|rule| (rule.matches)(&normalized))
        .flat_map(|rule| {
            tracing::debug!(rule = rule.name, "Assistant rule matched");
            (rule.build)(&normalized)
        })
        .collect()
}
