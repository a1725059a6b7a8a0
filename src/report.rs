//! Reporting of command results

use std::fmt;
use std::io::{self, Write};

use crate::collection::Collection;
use crate::error::Result;
use crate::operation::Outcome;
use crate::replay::ReplayStats;

/// Header of one command: action, object kind and affected identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSummary {
    pub action: String,
    pub object: String,
    /// Identity named by the payload, or the one assigned by a create
    pub id: Option<String>,
}

impl CommandSummary {
    pub fn new(action: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            object: object.into(),
            id: None,
        }
    }
}

impl fmt::Display for CommandSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.object)?;
        if let Some(id) = &self.id {
            write!(f, " ID:{}", id)?;
        }
        Ok(())
    }
}

/// Everything known about one dispatched command
#[derive(Debug)]
pub struct CommandReport {
    /// Where the command came from
    pub source: String,
    /// Missing when the envelope itself could not be decoded
    pub summary: Option<CommandSummary>,
    pub result: Result<Outcome>,
}

impl CommandReport {
    pub fn new(source: &str, summary: Option<CommandSummary>, result: Result<Outcome>) -> Self {
        Self {
            source: source.to_string(),
            summary,
            result,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Output capability the replay reports into
pub trait ReportSink {
    /// Called once per command, after it has been applied
    fn report(&mut self, report: &CommandReport, collection: &Collection) -> io::Result<()>;

    /// Called once after the source is exhausted
    fn finish(&mut self, _stats: &ReplayStats) -> io::Result<()> {
        Ok(())
    }
}

/// Human-readable report written to any writer (stdout for the CLI)
pub struct ConsoleSink<W: Write> {
    out: W,
    snapshot: bool,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout(snapshot: bool) -> Self {
        Self::new(io::stdout(), snapshot)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, snapshot: bool) -> Self {
        Self { out, snapshot }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn report(&mut self, report: &CommandReport, collection: &Collection) -> io::Result<()> {
        writeln!(self.out, "Action:")?;
        match &report.summary {
            Some(summary) => writeln!(self.out, "{}:", summary)?,
            None => writeln!(self.out, "{}:", report.source)?,
        }
        writeln!(self.out, "Result:")?;
        match &report.result {
            Ok(outcome) => writeln!(self.out, "{}", outcome)?,
            Err(e) => writeln!(self.out, "error: {}", e)?,
        }

        if self.snapshot {
            writeln!(self.out)?;
            writeln!(self.out, "DB after Action:")?;
            for record in collection {
                writeln!(self.out, "{}", record)?;
            }
        }
        writeln!(self.out)
    }

    fn finish(&mut self, stats: &ReplayStats) -> io::Result<()> {
        writeln!(self.out, "{}", stats)?;
        self.out.flush()
    }
}

/// One command as captured by [`MemorySink`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCommand {
    pub source: String,
    pub summary: Option<CommandSummary>,
    /// Outcome, or the rendered error
    pub result: std::result::Result<Outcome, String>,
    /// Rendered collection after the command
    pub snapshot: Vec<String>,
}

/// Sink that keeps every report in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub commands: Vec<RecordedCommand>,
    pub stats: Option<ReplayStats>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for MemorySink {
    fn report(&mut self, report: &CommandReport, collection: &Collection) -> io::Result<()> {
        self.commands.push(RecordedCommand {
            source: report.source.clone(),
            summary: report.summary.clone(),
            result: match &report.result {
                Ok(outcome) => Ok(outcome.clone()),
                Err(e) => Err(e.to_string()),
            },
            snapshot: collection.iter().map(|r| r.to_string()).collect(),
        });
        Ok(())
    }

    fn finish(&mut self, stats: &ReplayStats) -> io::Result<()> {
        self.stats = Some(*stats);
        Ok(())
    }
}
