//! Content loading for Imperial Dynasties.
//!
//! Reads the two JSON documents a campaign is built from and turns them
//! into a [`CampaignSetup`](dynasty_core::CampaignSetup).
//!
//! # Modules
//!
//! - [`scenario`] -- Scenario documents: factions, objectives, start clock.
//! - [`ideal_run`] -- Ideal-run documents: ideal actions and report
//!   narratives per campaign.
//! - [`error`] -- [`ContentError`].

pub mod error;
pub mod ideal_run;
pub mod scenario;

pub use error::ContentError;
pub use ideal_run::{IdealRunBlock, IdealRunDocument, SelectedBlock, load_ideal_run};
pub use scenario::{ScenarioDocument, load_scenario};
