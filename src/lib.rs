//! SherpAI - avalanche dashboard core
//!
//! A background simulation that nudges zone risk and synthesizes field
//! observations, plus a rule-based assistant that turns chat input into
//! dashboard commands.

pub mod assistant;
pub mod command;
pub mod core;
pub mod shell;
pub mod simulation;
pub mod state;
