//! The `AssociationWriter` trait implemented by all backend writers.

use crate::{AssociationRow, OutputResult};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SnapshotOutputObserver::take_error`][crate::SnapshotOutputObserver::take_error].
pub trait AssociationWriter {
    /// Append the rows of one snapshot.
    fn write_snapshot(&mut self, rows: &[AssociationRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<W: AssociationWriter + ?Sized> AssociationWriter for Box<W> {
    fn write_snapshot(&mut self, rows: &[AssociationRow]) -> OutputResult<()> {
        (**self).write_snapshot(rows)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}
