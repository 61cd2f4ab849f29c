//! Batch driver: apply a command list, log failures, keep going.

use crate::command::Command;
use crate::engine::Engine;
use crate::error::EngineError;

/// Outcome of [`run_batch`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Commands that succeeded.
    pub succeeded: usize,
    /// `(index, error)` for every failed command, in order.
    pub failures: Vec<(usize, EngineError)>,
}

impl BatchReport {
    /// Whether every command succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total commands attempted.
    pub fn total(&self) -> usize {
        self.succeeded + self.failures.len()
    }

    /// Apply command `index` of a batch to `engine` and record the outcome.
    ///
    /// A failure is logged at `warn` and kept; nothing is rolled back.
    /// Returns whether the command succeeded.
    pub fn apply(&mut self, engine: &mut Engine, index: usize, command: &Command) -> bool {
        match engine.apply(command) {
            Ok(_) => {
                self.succeeded += 1;
                true
            }
            Err(e) => {
                log::warn!(
                    "command {index} ({}) failed: {e}",
                    command.action().as_str()
                );
                self.failures.push((index, e));
                false
            }
        }
    }
}

/// Apply `commands` in order.
///
/// A failing command is logged at `warn` and recorded; the batch
/// continues with the next one. Commands are not atomic as a group.
pub fn run_batch<'a, I>(engine: &mut Engine, commands: I) -> BatchReport
where
    I: IntoIterator<Item = &'a Command>,
{
    let mut report = BatchReport::default();
    for (index, command) in commands.into_iter().enumerate() {
        report.apply(engine, index, command);
    }
    log::info!(
        "batch finished: {} ok, {} failed",
        report.succeeded,
        report.failures.len()
    );
    report
}
