//! `SnapshotOutputObserver<W>` bridges `AssociationObserver` to an
//! `AssociationWriter`.

use cs_core::Step;
use cs_sim::{AssociationObserver, RunSummary};
use cs_track::AssociationTracker;

use crate::row::AssociationRow;
use crate::writer::AssociationWriter;
use crate::{OutputError, OutputResult};

/// An [`AssociationObserver`] that writes one batch of rows per check step to
/// any [`AssociationWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods have
/// no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SnapshotOutputObserver<W: AssociationWriter> {
    writer:       W,
    rows_written: u64,
    last_error:   Option<OutputError>,
}

impl<W: AssociationWriter> SnapshotOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows_written: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows handed to the writer so far.
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Unwrap the inner writer (e.g. to inspect output after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                log::error!("association output failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: AssociationWriter> AssociationObserver for SnapshotOutputObserver<W> {
    fn on_snapshot(&mut self, step: Step, tracker: &AssociationTracker) {
        let rows = AssociationRow::snapshot(step, tracker);
        if rows.is_empty() {
            return;
        }
        let result = self.writer.write_snapshot(&rows);
        if result.is_ok() {
            self.rows_written += rows.len() as u64;
        }
        self.store_err(result);
    }

    fn on_run_end(&mut self, _summary: &RunSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
