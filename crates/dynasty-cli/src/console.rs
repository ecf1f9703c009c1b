//! Text rendering for the console session.
//!
//! [`Console`] writes to any [`Write`], so the session can be driven
//! against an in-memory buffer in tests.

use std::io::{self, Write};

use dynasty_core::calendar::{CampaignClock, display_year};
use dynasty_core::campaign::{ReportRequest, ResolutionPath, TurnResolution};
use dynasty_core::ending::Conclusion;
use dynasty_core::report::ReportSource;
use dynasty_types::{EffectDelta, ResourceState};

const RULE: &str = "----------------------------------------------";
const PROMPT: &str = "Enter order ('report', 'briefing', 'save', 'load', or 'end' to finish):";

/// Characters of an ideal action's summary echoed when it is granted.
const ECHO_LENGTH: usize = 60;

/// What the strategic briefing shows besides the year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Briefing {
    /// Player faction name.
    pub faction: String,
    /// Context paragraph.
    pub context: String,
    /// Objectives, shown numbered.
    pub objectives: Vec<String>,
}

/// Console output for one session.
#[derive(Debug)]
pub struct Console<W> {
    out: W,
}

impl<W: Write> Console<W> {
    /// Wrap a writer.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Title block with the opening resources.
    pub fn header(
        &mut self,
        title: &str,
        year: i64,
        faction: &str,
        resources: &ResourceState,
    ) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "=== Imperial Dynasties: Historical Simulation Demo ===")?;
        writeln!(self.out, "Scenario: {title}")?;
        writeln!(self.out, "Year: {} | Faction: {faction}", display_year(year))?;
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "Initial Resources:")?;
        self.resources(resources)?;
        writeln!(self.out, "{RULE}")
    }

    /// The strategic briefing as of `year`.
    pub fn briefing(&mut self, briefing: &Briefing, year: i64) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "=== STRATEGIC BRIEFING ===")?;
        writeln!(self.out, "Year: {} - {}", display_year(year), briefing.faction)?;
        writeln!(self.out, "Context: {}", briefing.context)?;
        writeln!(self.out)?;
        writeln!(self.out, "Primary Objectives:")?;
        for (number, goal) in (1_usize..).zip(&briefing.objectives) {
            writeln!(self.out, "  {number}. {goal}")?;
        }
        writeln!(self.out, "===========================")?;
        writeln!(self.out)
    }

    /// Turn banner and order prompt.
    pub fn prompt(&mut self, clock: &CampaignClock) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "==== Turn {} | Year: {} ====",
            clock.turn(),
            display_year(clock.year())
        )?;
        writeln!(self.out)?;
        writeln!(self.out, "{PROMPT}")?;
        write!(self.out, ">>> ")?;
        self.out.flush()
    }

    /// Outcome, delta, and running totals of a resolved order.
    pub fn resolution(&mut self, resolution: &TurnResolution) -> io::Result<()> {
        match &resolution.path {
            ResolutionPath::Ideal { .. } => {
                let echo: String = resolution.summary.chars().take(ECHO_LENGTH).collect();
                writeln!(self.out, "[Ideal Run Detected] {echo}...")?;
            }
            ResolutionPath::Repeated { .. } => {
                writeln!(
                    self.out,
                    "[Ideal Run Denied] That strategy has already been executed."
                )?;
            }
            ResolutionPath::Fallback { .. } => {}
        }

        writeln!(self.out)?;
        writeln!(self.out, "Outcome: {}", resolution.summary)?;
        writeln!(self.out, "Delta: {}", delta_line(&resolution.delta))?;
        writeln!(
            self.out,
            "Current Totals -> {}",
            totals_line(&resolution.resources)
        )
    }

    /// The decade report with current resources.
    pub fn report(&mut self, report: &ReportRequest, resources: &ResourceState) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "========== REPORT ==========")?;
        let text = &report.narrative.text;
        match report.narrative.source {
            ReportSource::Decade(key) => writeln!(self.out, "[{key}] {text}")?,
            ReportSource::FinalMetrics => writeln!(self.out, "[FINAL REPORT] {text}")?,
            ReportSource::Missing => writeln!(self.out, "[REPORT] {text}")?,
        }
        writeln!(self.out)?;
        writeln!(self.out, "Current Resources:")?;
        self.resources(resources)?;
        writeln!(self.out, "============================")?;
        writeln!(self.out)
    }

    /// The closing banner.
    pub fn conclusion(&mut self, conclusion: &Conclusion) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "=== CAMPAIGN CONCLUDED ===")?;
        writeln!(self.out, "{}", conclusion.message)?;
        writeln!(self.out)
    }

    /// A single line of status text.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    fn resources(&mut self, resources: &ResourceState) -> io::Result<()> {
        for (name, value) in resources.iter() {
            writeln!(self.out, " - {}: {value}", capitalize(name))?;
        }
        Ok(())
    }
}

/// `gold: +50 | stability: -1`, or `no change`.
pub fn delta_line(delta: &EffectDelta) -> String {
    if delta.is_empty() {
        return "no change".to_owned();
    }
    delta
        .iter()
        .map(|(name, value)| format!("{name}: {value:+}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// `authority: 2 | gold: 1050 | ...`
pub fn totals_line(resources: &ResourceState) -> String {
    resources
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
