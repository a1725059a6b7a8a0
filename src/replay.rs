//! Sequential replay of a command source into a collection

use std::fmt;

use tracing::{info, warn};

use crate::collection::Collection;
use crate::config::ReplayConfig;
use crate::dispatcher::Dispatcher;
use crate::error::{RecordError, Result};
use crate::operation::DeletePolicy;
use crate::report::{CommandReport, ReportSink};
use crate::source::RawCommand;

/// Counters for one replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Failures where no operation was executed; see [`RecordError::is_rejected`]
    pub rejected: usize,
}

impl ReplayStats {
    fn record(&mut self, report: &CommandReport) {
        self.processed += 1;
        match &report.result {
            Ok(_) => self.succeeded += 1,
            Err(e) => {
                self.failed += 1;
                if e.is_rejected() {
                    self.rejected += 1;
                }
            }
        }
    }
}

impl fmt::Display for ReplayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed {} commands: {} succeeded, {} failed ({} rejected)",
            self.processed, self.succeeded, self.failed, self.rejected
        )
    }
}

/// Owns the collection for one run and feeds it commands one at a time
#[derive(Debug, Default)]
pub struct Replay {
    collection: Collection,
    dispatcher: Dispatcher,
}

impl Replay {
    pub fn new(policy: DeletePolicy) -> Self {
        Self {
            collection: Collection::new(),
            dispatcher: Dispatcher::new(policy),
        }
    }

    pub fn from_config(config: &ReplayConfig) -> Self {
        Self::new(config.policy.missing_delete)
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Dispatch a single command
    pub fn apply(&mut self, command: &RawCommand) -> CommandReport {
        self.dispatcher.dispatch(command, &mut self.collection)
    }

    /// Drain `source`, reporting every command to `sink`.
    ///
    /// Command failures are reported and skipped; only a failing sink stops
    /// the run.
    pub fn run<I, S>(&mut self, source: I, sink: &mut S) -> Result<ReplayStats>
    where
        I: IntoIterator<Item = Result<RawCommand>>,
        S: ReportSink + ?Sized,
    {
        let mut stats = ReplayStats::default();

        for item in source {
            let report = match item {
                Ok(command) => self.apply(&command),
                Err(e) => {
                    let label = match &e {
                        RecordError::UnsupportedFormat(path) => path.display().to_string(),
                        _ => "<unreadable command>".to_string(),
                    };
                    warn!(source = %label, error = %e, "skipping command");
                    CommandReport::new(&label, None, Err(e))
                }
            };

            stats.record(&report);
            sink.report(&report, &self.collection)?;
        }

        info!(
            processed = stats.processed,
            succeeded = stats.succeeded,
            failed = stats.failed,
            records = self.collection.len(),
            "replay finished"
        );
        sink.finish(&stats)?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Encoding;
    use crate::report::MemorySink;
    use crate::source::MemorySource;
    use std::path::PathBuf;

    fn json(name: &str, raw: &str) -> RawCommand {
        RawCommand::new(name, Encoding::Json, raw.as_bytes().to_vec())
    }

    #[test]
    fn test_failures_do_not_stop_the_run() {
        let source = MemorySource::new(vec![
            json("01.json", r#"{"action": "create", "object": "Student", "data": {"class": "1A", "person": {"name": "A", "surname": "B", "personalCode": "C"}}}"#),
            json("02.json", r#"{"action": "read", "object": "Student", "data": {"id": "42"}}"#),
            json("03.json", r#"{"action": "read", "object": "Student", "data": {"id": "1"}}"#),
        ])
        .chain(std::iter::once(Err(RecordError::UnsupportedFormat(PathBuf::from("04.csv")))));

        let mut replay = Replay::default();
        let mut sink = MemorySink::new();
        let stats = replay.run(source, &mut sink).unwrap();

        assert_eq!(
            stats,
            ReplayStats { processed: 4, succeeded: 2, failed: 2, rejected: 1 }
        );
        assert_eq!(sink.commands.len(), 4);
        assert_eq!(sink.commands[3].source, "04.csv");
        assert_eq!(sink.stats, Some(stats));
        assert_eq!(replay.collection().len(), 1);
    }

    #[test]
    fn test_stats_display() {
        let stats = ReplayStats { processed: 3, succeeded: 2, failed: 1, rejected: 0 };
        assert_eq!(stats.to_string(), "processed 3 commands: 2 succeeded, 1 failed (0 rejected)");
    }
}
