//! Console launcher for Imperial Dynasties.
//!
//! Loads a scenario and its ideal run, then plays the campaign one order
//! per line on stdin. Output goes to stdout; structured logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Parse arguments (each flag also reads a `DYNASTY_*` variable)
//! 2. Load configuration, falling back to defaults when the file is absent
//! 3. Initialize structured logging (tracing)
//! 4. Load the scenario and the ideal run
//! 5. Build the campaign and its save store
//! 6. Run the turn loop

mod console;
mod error;
mod session;

use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use dynasty_content::{IdealRunDocument, load_ideal_run, load_scenario};
use dynasty_core::{Campaign, EngineConfig};
use dynasty_store::TurnLogStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::console::{Briefing, Console};
use crate::error::CliError;
use crate::session::Session;

/// Input fed to the session by `--auto-end`.
const AUTO_END_INPUT: &str = "end\n";

/// Play an Imperial Dynasties campaign in the console.
#[derive(Debug, Parser)]
#[command(name = "dynasty-cli", version, about)]
struct Args {
    /// Scenario document to play.
    #[arg(
        long,
        env = "DYNASTY_SCENARIO",
        default_value = "scenarios/Sparta_380BC_LastKing.json"
    )]
    scenario: PathBuf,

    /// Ideal-run document with ideal actions and report narratives.
    #[arg(long, env = "DYNASTY_IDEAL_RUN", default_value = "core/perfect_run.json")]
    ideal_run: PathBuf,

    /// Engine configuration; defaults apply when the file does not exist.
    #[arg(long, env = "DYNASTY_CONFIG", default_value = "dynasty-config.yaml")]
    config: PathBuf,

    /// Directory the save files are written to.
    #[arg(long, env = "DYNASTY_SAVE_DIR", default_value = ".")]
    save_dir: PathBuf,

    /// Open the campaign and end it straight away.
    #[arg(long, env = "DYNASTY_AUTO_END")]
    auto_end: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_config(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;
    init_tracing(&config.logging.level);
    info!(
        config = %args.config.display(),
        scenario = %args.scenario.display(),
        ideal_run = %args.ideal_run.display(),
        "dynasty-cli starting"
    );

    let scenario = load_scenario(&args.scenario)
        .with_context(|| format!("loading scenario from {}", args.scenario.display()))?;
    let ideal_run = load_ideal_run_or_empty(&args.ideal_run)
        .with_context(|| format!("loading ideal run from {}", args.ideal_run.display()))?;

    let (faction, _) = scenario.player_handles();
    let selected = ideal_run.select_block(scenario.campaign_id(), faction);
    info!(
        campaign = scenario.campaign_id(),
        faction,
        ideal_actions = selected.ideal_actions.len(),
        narratives = selected.simulation_outcome.len(),
        "scenario loaded"
    );

    let briefing = Briefing {
        faction: faction.to_owned(),
        context: scenario.briefing_context().to_owned(),
        objectives: scenario.objectives.clone(),
    };
    let store = TurnLogStore::new(args.save_dir.clone(), faction);
    let campaign = Campaign::new(scenario.campaign_setup(selected), config);
    let mut session = Session::new(campaign, store, briefing);

    let mut console = Console::new(io::stdout().lock());
    let summary = if args.auto_end {
        session.run(Cursor::new(AUTO_END_INPUT), &mut console)
    } else {
        session.run(io::stdin().lock(), &mut console)
    }?;

    info!(
        turns_played = summary.turns_played,
        turn = session.campaign().clock().turn(),
        session_file = ?summary.session_path,
        final_file = ?summary.final_path,
        "dynasty-cli finished"
    );
    Ok(())
}

/// Initialize tracing on stderr. `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

/// Load the engine configuration from `path`, or the defaults when the
/// file does not exist.
fn load_config(path: &Path) -> Result<EngineConfig, CliError> {
    if path.exists() {
        Ok(EngineConfig::from_file(path)?)
    } else {
        Ok(EngineConfig::default())
    }
}

/// Load the ideal run, or an empty document when the file does not exist.
fn load_ideal_run_or_empty(path: &Path) -> Result<IdealRunDocument, CliError> {
    if path.exists() {
        Ok(load_ideal_run(path)?)
    } else {
        warn!(path = %path.display(), "ideal run not found; every order will be scored");
        Ok(IdealRunDocument::default())
    }
}
