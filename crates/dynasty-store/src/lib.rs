//! Turn-log persistence for Imperial Dynasties.
//!
//! Saves and loads the append-only turn log as JSON. A loaded log becomes
//! a [`ResumePoint`](dynasty_types::ResumePoint) the session restores
//! from.
//!
//! # Modules
//!
//! - [`store`] -- Save-file paths, saving, and loading.
//! - [`error`] -- [`StoreError`].

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::{FINAL_SAVE, TurnLogStore, load_log, save_log};
