//! Order resolution, calendar, and campaign state machine for Imperial
//! Dynasties.
//!
//! This crate turns a player's free-text order into a resource delta,
//! keeps the signed-year campaign clock, and decides when a campaign ends.
//! It performs no I/O besides reading an optional config file; content
//! loading, persistence, and presentation live in sibling crates.
//!
//! # Modules
//!
//! - [`calendar`] -- Year parsing, display, and arithmetic with no year 0.
//! - [`campaign`] -- The [`Campaign`] session and its [`Response`] values.
//! - [`classifier`] -- Keyword classification of orders into categories.
//! - [`config`] -- Configuration loading from `dynasty-config.yaml` into
//!   strongly-typed structs.
//! - [`effects`] -- The fallback effect table, outcome phrases, and
//!   effect application.
//! - [`ending`] -- End conditions and their narrative.
//! - [`matcher`] -- Ideal-action matching.
//! - [`outcome`] -- Deterministic fallback scoring and quality bands.
//! - [`report`] -- Decade report keys and narrative lookup.
//! - [`similarity`] -- Gestalt string similarity used by the matcher.
//!
//! [`Campaign`]: campaign::Campaign
//! [`Response`]: campaign::Response

pub mod calendar;
pub mod campaign;
pub mod classifier;
pub mod config;
pub mod effects;
pub mod ending;
pub mod matcher;
pub mod outcome;
pub mod report;
pub mod similarity;

pub use campaign::{Campaign, CampaignSetup, Response};
pub use config::EngineConfig;
