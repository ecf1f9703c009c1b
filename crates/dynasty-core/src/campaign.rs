//! The campaign state machine: one session, one order at a time.
//!
//! A [`Campaign`] owns everything that changes during play: resources, the
//! clock, the turn log, and the set of ideal actions already granted. It
//! is mutated only through [`Campaign::handle`] and [`Campaign::restore`].
//!
//! Each non-meta order runs through the same steps:
//!
//! 1. **Match** -- look for an ideal action. A fresh match grants its
//!    effect at `major_success`; a repeat earns the repetition penalty.
//! 2. **Fallback** -- with no match, classify the order, score it, and
//!    take the table effect for the resulting band.
//! 3. **Apply and log** -- apply the delta, then append a log entry that
//!    records the year the order was resolved in.
//! 4. **Advance** -- one turn, one year.
//! 5. **Check** -- evaluate end conditions against the new state.

use std::collections::BTreeSet;

use chrono::{SubsecRound, Utc};
use dynasty_types::{
    Category, EffectDelta, FactionProfile, IdealActionSet, QualityBand, ResourceState, ResumePoint,
    SimulationOutcome, TurnLog, TurnLogEntry,
};
use tracing::{debug, info, warn};

use crate::calendar::{CampaignClock, advance_year, display_year};
use crate::classifier::classify;
use crate::config::EngineConfig;
use crate::effects::{apply, fallback_effects, summary_for};
use crate::ending::{Conclusion, EndReason, evaluate_end_conditions};
use crate::matcher::find_ideal_match;
use crate::outcome::assess;
use crate::report::{ReportKey, ReportNarrative, narrative_for, report_key};

/// Everything needed to open a session, usually built from scenario
/// content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignSetup {
    /// Scenario title.
    pub title: String,
    /// The player faction.
    pub faction: FactionProfile,
    /// Starting resources; missing baseline resources are filled from
    /// config.
    pub resources: ResourceState,
    /// Starting year (signed, 0 is read as 1 AD).
    pub start_year: i64,
    /// Starting turn (0 is read as 1).
    pub start_turn: u32,
    /// Year the clock resumes in when the scenario was saved part-way
    /// through; `None` starts at `start_year`.
    pub resume_year: Option<i64>,
    /// Ideal actions in document order.
    pub ideal_actions: IdealActionSet,
    /// Report narratives of the ideal run.
    pub outcome: SimulationOutcome,
}

/// Whether the session still accepts orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignStatus {
    /// Orders are being resolved.
    Running,
    /// The campaign has ended; further orders change nothing.
    Concluded(Conclusion),
}

/// Orders that do not consume a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    /// Show the decade report.
    Report,
    /// Show the scenario briefing.
    Briefing,
    /// Save the turn log.
    Save,
    /// Load the turn log.
    Load,
    /// End the session (`end`, `quit`, or `exit`).
    End,
}

impl MetaCommand {
    /// Recognize a meta-command, ignoring case and surrounding whitespace.
    pub fn parse(order: &str) -> Option<Self> {
        match order.trim().to_lowercase().as_str() {
            "report" => Some(Self::Report),
            "briefing" => Some(Self::Briefing),
            "save" => Some(Self::Save),
            "load" => Some(Self::Load),
            "end" | "quit" | "exit" => Some(Self::End),
            _ => None,
        }
    }
}

/// How an order was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionPath {
    /// A fresh ideal action was granted.
    Ideal {
        /// Name of the action.
        name: String,
    },
    /// An ideal action that was already granted matched again.
    Repeated {
        /// Name of the action.
        name: String,
    },
    /// No ideal action matched; the order was scored.
    Fallback {
        /// Category the classifier chose.
        category: Category,
        /// Clamped score.
        score: i64,
    },
}

impl ResolutionPath {
    /// Short label for logs.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ideal { .. } => "ideal",
            Self::Repeated { .. } => "repeated",
            Self::Fallback { .. } => "fallback",
        }
    }
}

/// The result of one resolved order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResolution {
    /// Turn the order was resolved on.
    pub turn: u32,
    /// Year the order was resolved in.
    pub year: i64,
    /// Outcome quality.
    pub band: QualityBand,
    /// Outcome summary.
    pub summary: String,
    /// Applied delta.
    pub delta: EffectDelta,
    /// Resources after the delta.
    pub resources: ResourceState,
    /// Which path produced the outcome.
    pub path: ResolutionPath,
    /// Set when this order ended the campaign.
    pub concluded: Option<Conclusion>,
}

/// A decade report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    /// The period the clock is in.
    pub key: ReportKey,
    /// Narrative for that period.
    pub narrative: ReportNarrative,
}

/// What [`Campaign::handle`] did with an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The order consumed a turn.
    Resolved(Box<TurnResolution>),
    /// A report was requested.
    Report(ReportRequest),
    /// The briefing was requested.
    Briefing,
    /// The caller should persist the log.
    SaveRequested,
    /// The caller should load a log and pass it to [`Campaign::restore`].
    LoadRequested,
    /// The campaign is over.
    Concluded(Conclusion),
}

/// One play session.
#[derive(Debug, Clone)]
pub struct Campaign {
    config: EngineConfig,
    title: String,
    faction: FactionProfile,
    ideal_actions: IdealActionSet,
    outcome: SimulationOutcome,
    resources: ResourceState,
    clock: CampaignClock,
    log: TurnLog,
    used_actions: BTreeSet<String>,
    status: CampaignStatus,
}

impl Campaign {
    /// Open a session from setup data and config.
    pub fn new(setup: CampaignSetup, config: EngineConfig) -> Self {
        let CampaignSetup {
            title,
            faction,
            mut resources,
            start_year,
            start_turn,
            resume_year,
            ideal_actions,
            outcome,
        } = setup;
        config.resources.fill(&mut resources);
        let mut clock = CampaignClock::new(start_year, start_turn);
        if let Some(year) = resume_year {
            clock.restore(clock.turn(), year);
        }

        info!(
            faction = %faction.name,
            year = %display_year(clock.year()),
            turn = clock.turn(),
            ideal_actions = ideal_actions.len(),
            "campaign opened"
        );

        Self {
            config,
            title,
            faction,
            ideal_actions,
            outcome,
            resources,
            clock,
            log: TurnLog::new(),
            used_actions: BTreeSet::new(),
            status: CampaignStatus::Running,
        }
    }

    /// Handle one line of player input.
    pub fn handle(&mut self, order: &str) -> Response {
        if let CampaignStatus::Concluded(conclusion) = &self.status {
            return Response::Concluded(conclusion.clone());
        }

        match MetaCommand::parse(order) {
            Some(MetaCommand::Report) => Response::Report(self.report()),
            Some(MetaCommand::Briefing) => Response::Briefing,
            Some(MetaCommand::Save) => Response::SaveRequested,
            Some(MetaCommand::Load) => Response::LoadRequested,
            Some(MetaCommand::End) => Response::Concluded(self.conclude(EndReason::Abandoned)),
            None => Response::Resolved(Box::new(self.resolve(order.trim()))),
        }
    }

    /// The report for the period the clock is in.
    pub fn report(&self) -> ReportRequest {
        let key = report_key(self.clock.start_year(), self.clock.year(), &self.config.report);
        ReportRequest {
            key,
            narrative: narrative_for(&self.outcome, key),
        }
    }

    /// Replace resources, clock, and log with a loaded state.
    ///
    /// The turn resumes after the last logged turn and the year after the
    /// last logged year; the start year is kept. Ideal actions whose
    /// summaries were logged at `major_success` count as granted.
    pub fn restore(&mut self, point: ResumePoint) {
        let ResumePoint {
            mut resources,
            next_turn,
            last_year,
            log,
        } = point;

        let key_length = self.config.matcher.key_length;
        let known: BTreeSet<String> = self
            .ideal_actions
            .iter()
            .map(|(_, action)| action.key(key_length))
            .collect();
        self.used_actions = log
            .entries()
            .iter()
            .filter(|entry| entry.band == QualityBand::MajorSuccess)
            .map(|entry| entry.summary.chars().take(key_length).collect::<String>())
            .filter(|key| known.contains(key))
            .collect();

        self.config.resources.fill(&mut resources);
        self.resources = resources;
        self.clock.restore(next_turn, advance_year(last_year));
        self.log = log;

        info!(
            turn = self.clock.turn(),
            year = %display_year(self.clock.year()),
            entries = self.log.len(),
            used_actions = self.used_actions.len(),
            "campaign restored"
        );
    }

    fn resolve(&mut self, order: &str) -> TurnResolution {
        let turn = self.clock.turn();
        let year = self.clock.year();

        let (delta, band, summary, path) =
            match find_ideal_match(order, &self.ideal_actions, &self.config.matcher) {
                Some(found) => {
                    let key = found.action.key(self.config.matcher.key_length);
                    if self.used_actions.insert(key) {
                        debug!(action = found.name, turn, "ideal action granted");
                        (
                            found.action.effect.clone(),
                            QualityBand::MajorSuccess,
                            found.action.summary.clone(),
                            ResolutionPath::Ideal {
                                name: found.name.to_owned(),
                            },
                        )
                    } else {
                        warn!(action = found.name, turn, "ideal action already granted");
                        (
                            self.config.matcher.repetition_delta.clone(),
                            QualityBand::Failure,
                            self.config.matcher.repetition_message.clone(),
                            ResolutionPath::Repeated {
                                name: found.name.to_owned(),
                            },
                        )
                    }
                }
                None => {
                    let category = classify(order, &self.config.classifier);
                    let assessment = assess(&self.faction, category, &self.config.scoring);
                    debug!(
                        %category,
                        base_stat = assessment.base_stat,
                        context = assessment.context,
                        score = assessment.score,
                        "order scored"
                    );
                    (
                        fallback_effects(category, assessment.band),
                        assessment.band,
                        summary_for(category, assessment.band).to_owned(),
                        ResolutionPath::Fallback {
                            category,
                            score: assessment.score,
                        },
                    )
                }
            };

        apply(&mut self.resources, &delta);
        self.log.append(TurnLogEntry {
            turn,
            timestamp: Utc::now().trunc_subsecs(0),
            order: order.to_owned(),
            band,
            summary: summary.clone(),
            delta: delta.clone(),
            resources_after: self.resources.clone(),
            year_after: year,
        });
        self.clock.advance();

        info!(
            turn,
            year = %display_year(year),
            %band,
            path = path.label(),
            "turn resolved"
        );

        let concluded = evaluate_end_conditions(
            &self.resources,
            self.clock.turn(),
            &self.config.end_conditions,
        )
        .map(|reason| self.conclude(reason));

        TurnResolution {
            turn,
            year,
            band,
            summary,
            delta,
            resources: self.resources.clone(),
            path,
            concluded,
        }
    }

    fn conclude(&mut self, reason: EndReason) -> Conclusion {
        let conclusion = Conclusion {
            reason,
            message: reason.message(&self.faction.name, self.config.end_conditions.max_turns),
            turn: self.clock.turn(),
            year: self.clock.year(),
        };
        info!(
            reason = ?reason,
            turn = conclusion.turn,
            year = %display_year(conclusion.year),
            "campaign concluded"
        );
        self.status = CampaignStatus::Concluded(conclusion.clone());
        conclusion
    }

    /// Scenario title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The player faction.
    pub const fn faction(&self) -> &FactionProfile {
        &self.faction
    }

    /// Current resources.
    pub const fn resources(&self) -> &ResourceState {
        &self.resources
    }

    /// Turn, year, and start year.
    pub const fn clock(&self) -> &CampaignClock {
        &self.clock
    }

    /// Everything resolved so far.
    pub const fn log(&self) -> &TurnLog {
        &self.log
    }

    /// Keys of ideal actions already granted.
    pub const fn used_actions(&self) -> &BTreeSet<String> {
        &self.used_actions
    }

    /// The ideal-action set.
    pub const fn ideal_actions(&self) -> &IdealActionSet {
        &self.ideal_actions
    }

    /// Session status.
    pub const fn status(&self) -> &CampaignStatus {
        &self.status
    }

    /// Whether the campaign has ended.
    pub const fn is_concluded(&self) -> bool {
        matches!(self.status, CampaignStatus::Concluded(_))
    }

    /// The engine configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dynasty_types::IdealAction;
    use dynasty_types::resources::{AUTHORITY, GOLD, STABILITY};

    use super::*;

    fn setup() -> CampaignSetup {
        let mut faction = FactionProfile::named("Sparta");
        faction.stats.insert(Category::Military, 18);
        faction.traits.insert("land_power".to_owned());

        let ideal_actions: IdealActionSet = [(
            "helot_reform".to_owned(),
            IdealAction {
                keywords: vec!["helot".to_owned(), "land".to_owned(), "reform".to_owned()],
                summary: "Land reform eases the helot burden and steadies the polis.".to_owned(),
                effect: EffectDelta::from_pairs([(AUTHORITY, 5), (STABILITY, 3)]),
            },
        )]
        .into_iter()
        .collect();

        CampaignSetup {
            title: "The Last King".to_owned(),
            faction,
            resources: ResourceState::new(),
            start_year: -380,
            start_turn: 1,
            resume_year: None,
            ideal_actions,
            outcome: SimulationOutcome::new(),
        }
    }

    fn campaign() -> Campaign {
        Campaign::new(setup(), EngineConfig::default())
    }

    fn resolved(response: Response) -> TurnResolution {
        match response {
            Response::Resolved(resolution) => *resolution,
            other => panic!("expected a resolved turn, got {other:?}"),
        }
    }

    #[test]
    fn baseline_resources_are_filled() {
        let c = campaign();
        assert_eq!(c.resources().get(GOLD), 1000);
        assert_eq!(c.resources().len(), 5);
        assert_eq!(c.clock().turn(), 1);
        assert_eq!(c.clock().year(), -380);
    }

    #[test]
    fn meta_commands_do_not_consume_turns() {
        let mut c = campaign();
        assert!(matches!(c.handle("  REPORT "), Response::Report(_)));
        assert_eq!(c.handle("Briefing"), Response::Briefing);
        assert_eq!(c.handle("save"), Response::SaveRequested);
        assert_eq!(c.handle("load"), Response::LoadRequested);
        assert_eq!(c.clock().turn(), 1);
        assert!(c.log().is_empty());
    }

    #[test]
    fn fallback_order_consumes_a_turn() {
        let mut c = campaign();
        let resolution = resolved(c.handle("march on Messenia"));
        assert_eq!(resolution.band, QualityBand::MajorSuccess);
        assert_eq!(
            resolution.path,
            ResolutionPath::Fallback {
                category: Category::Military,
                score: 87
            }
        );
        assert_eq!(resolution.resources.get(GOLD), 920);
        assert_eq!(resolution.year, -380);
        assert_eq!(c.clock().turn(), 2);
        assert_eq!(c.clock().year(), -379);

        let entry = c.log().last().unwrap();
        assert_eq!(entry.turn, 1);
        assert_eq!(entry.year_after, -380);
        assert_eq!(entry.order, "march on Messenia");
        assert_eq!(entry.resources_after, *c.resources());
    }

    #[test]
    fn ideal_action_is_granted_once() {
        let mut c = campaign();
        let first = resolved(c.handle("Redistribute land to ease the helot revolt"));
        assert_eq!(first.band, QualityBand::MajorSuccess);
        assert_eq!(first.delta.get(AUTHORITY), Some(5));
        assert!(matches!(first.path, ResolutionPath::Ideal { .. }));

        let second = resolved(c.handle("Redistribute land to ease the helot revolt"));
        assert_eq!(second.band, QualityBand::Failure);
        assert_eq!(second.delta, EffectDelta::from_pairs([(AUTHORITY, -1)]));
        assert!(second.summary.starts_with("Repetition breeds stagnation"));
        assert_eq!(c.resources().get(AUTHORITY), 4);
        assert_eq!(c.used_actions().len(), 1);
    }

    #[test]
    fn end_synonym_concludes_and_freezes() {
        let mut c = campaign();
        let response = c.handle("Quit");
        let Response::Concluded(conclusion) = response else {
            panic!("expected conclusion");
        };
        assert_eq!(conclusion.reason, EndReason::Abandoned);
        assert!(c.is_concluded());

        let after = c.handle("march on Messenia");
        assert!(matches!(after, Response::Concluded(_)));
        assert!(c.log().is_empty());
        assert_eq!(c.clock().turn(), 1);
    }

    #[test]
    fn restore_resumes_after_last_entry() {
        let mut source = campaign();
        resolved(source.handle("Redistribute land to ease the helot revolt"));
        resolved(source.handle("march on Messenia"));
        let log = source.log().clone();

        let mut fresh = campaign();
        fresh.restore(ResumePoint::from_log(log).unwrap());
        assert_eq!(fresh.clock().turn(), 3);
        assert_eq!(fresh.clock().year(), -378);
        assert_eq!(fresh.clock().start_year(), -380);
        assert_eq!(fresh.resources(), source.resources());
        assert_eq!(fresh.log().len(), 2);
        assert_eq!(fresh.used_actions().len(), 1);

        let repeat = resolved(fresh.handle("Redistribute land to ease the helot revolt"));
        assert_eq!(repeat.band, QualityBand::Failure);
    }

    #[test]
    fn report_tracks_the_clock() {
        let mut c = campaign();
        assert_eq!(c.report().key.to_string(), "decade_1_380_370");
        for _ in 0..10 {
            resolved(c.handle("build a road"));
        }
        assert_eq!(c.report().key.to_string(), "decade_2_370_360");
    }

    #[test]
    fn resume_year_keeps_start_for_reports() {
        let mut s = setup();
        s.start_turn = 12;
        s.resume_year = Some(-369);
        let c = Campaign::new(s, EngineConfig::default());
        assert_eq!(c.clock().turn(), 12);
        assert_eq!(c.clock().year(), -369);
        assert_eq!(c.clock().start_year(), -380);
        assert_eq!(c.report().key.to_string(), "decade_2_370_360");
    }

    #[test]
    fn start_year_zero_is_one_ad() {
        let mut s = setup();
        s.start_year = 0;
        let c = Campaign::new(s, EngineConfig::default());
        assert_eq!(c.clock().year(), 1);
    }
}
