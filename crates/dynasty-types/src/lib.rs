//! Shared type definitions for the Imperial Dynasties campaign engine.
//!
//! This crate is the single source of truth for the data model used by the
//! engine, the content loader, the turn-log store, and the console binary.
//!
//! # Modules
//!
//! - [`enums`] -- Order categories and outcome quality bands
//! - [`resources`] -- Resource totals and partial resource deltas
//! - [`ideal`] -- Ideal actions and ideal-run report narratives
//! - [`faction`] -- The player faction profile consumed by the scorer
//! - [`log`] -- The append-only turn log and its entries
//! - [`year`] -- Raw year values as authored in content

pub mod enums;
pub mod faction;
pub mod ideal;
pub mod log;
pub mod resources;
pub mod year;

// Re-export all public types at crate root for convenience.
pub use enums::{Category, QualityBand, UnknownVariant};
pub use faction::FactionProfile;
pub use ideal::{IdealAction, IdealActionSet, OutcomeNarrative, SimulationOutcome};
pub use log::{ResumePoint, TurnLog, TurnLogEntry};
pub use resources::{EffectDelta, ResourceState};
pub use year::YearValue;
