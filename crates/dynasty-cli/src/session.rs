//! The interactive turn loop.
//!
//! Reads one order per line, hands it to the [`Campaign`], and renders the
//! [`Response`]. Save and load go through the [`TurnLogStore`]; their
//! failures are reported to the player and play continues. End of input
//! counts as `end`, and so does input that cannot be read.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use dynasty_core::campaign::{Campaign, Response};
use dynasty_store::{StoreError, TurnLogStore};
use tracing::{info, warn};

use crate::console::{Briefing, Console};
use crate::error::CliError;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Orders that consumed a turn.
    pub turns_played: usize,
    /// Where the session log was written, if it was.
    pub session_path: Option<PathBuf>,
    /// Where the conclusion snapshot was written, if it was.
    pub final_path: Option<PathBuf>,
}

/// One player's session: the campaign, its save files, and its briefing.
#[derive(Debug)]
pub struct Session {
    campaign: Campaign,
    store: TurnLogStore,
    briefing: Briefing,
}

impl Session {
    /// Assemble a session.
    pub const fn new(campaign: Campaign, store: TurnLogStore, briefing: Briefing) -> Self {
        Self {
            campaign,
            store,
            briefing,
        }
    }

    /// The campaign being played.
    pub const fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    /// Print the header and briefing, then play until the campaign ends or
    /// input runs out. The session log is saved on the way out.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        console: &mut Console<W>,
    ) -> Result<SessionSummary, CliError> {
        let clock = *self.campaign.clock();
        console.header(
            self.campaign.title(),
            clock.year(),
            &self.briefing.faction,
            self.campaign.resources(),
        )?;
        console.briefing(&self.briefing, clock.year())?;

        let mut turns_played: usize = 0;
        let mut final_path = None;
        let mut line = String::new();

        loop {
            console.prompt(self.campaign.clock())?;
            line.clear();
            let order = match input.read_line(&mut line) {
                Ok(0) => {
                    info!("input closed, ending session");
                    "end"
                }
                Ok(_) => line.trim(),
                Err(e) => {
                    warn!(error = %e, "could not read order; ending session");
                    "end"
                }
            };

            match self.campaign.handle(order) {
                Response::Resolved(resolution) => {
                    turns_played = turns_played.saturating_add(1);
                    console.resolution(&resolution)?;
                    if let Some(conclusion) = &resolution.concluded {
                        console.conclusion(conclusion)?;
                        final_path = self.save_final(console)?;
                        break;
                    }
                }
                Response::Report(report) => {
                    console.report(&report, self.campaign.resources())?;
                }
                Response::Briefing => {
                    console.briefing(&self.briefing, self.campaign.clock().year())?;
                }
                Response::SaveRequested => {
                    self.save(console)?;
                }
                Response::LoadRequested => {
                    self.load(console)?;
                }
                Response::Concluded(_) => break,
            }
        }

        let session_path = self.save(console)?;
        console.line("Thank you for playing Imperial Dynasties.")?;
        Ok(SessionSummary {
            turns_played,
            session_path,
            final_path,
        })
    }

    fn save<W: Write>(&self, console: &mut Console<W>) -> Result<Option<PathBuf>, CliError> {
        match self.store.save(self.campaign.log()) {
            Ok(path) => {
                console.line(&format!("Game saved successfully to {}", path.display()))?;
                Ok(Some(path))
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                console.line(&format!("Error saving game: {e}"))?;
                Ok(None)
            }
        }
    }

    fn save_final<W: Write>(&self, console: &mut Console<W>) -> Result<Option<PathBuf>, CliError> {
        match self.store.save_final(self.campaign.log()) {
            Ok(path) => {
                console.line(&format!(
                    "Final save written as '{}'",
                    dynasty_store::FINAL_SAVE
                ))?;
                Ok(Some(path))
            }
            Err(e) => {
                warn!(error = %e, "final save failed");
                console.line(&format!("Error writing final save: {e}"))?;
                Ok(None)
            }
        }
    }

    fn load<W: Write>(&mut self, console: &mut Console<W>) -> Result<(), CliError> {
        match self.store.load() {
            Ok(point) => {
                let turn = point.next_turn;
                self.campaign.restore(point);
                console.line(&format!("Loaded save: Turn {turn}, resources restored."))?;
            }
            Err(e) => {
                warn!(error = %e, "load failed");
                let notice = match &e {
                    StoreError::Missing(_) => "No save file found.".to_owned(),
                    StoreError::Corrupt { .. } => "Corrupted save file.".to_owned(),
                    StoreError::Empty(_) => "Save file is empty.".to_owned(),
                    StoreError::Io { .. } => format!("Could not read save file: {e}"),
                };
                console.line(&notice)?;
            }
        }
        Ok(())
    }
}
