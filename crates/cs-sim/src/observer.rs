//! Observer trait for progress reporting and association output.

use cs_core::Step;
use cs_track::AssociationTracker;

use crate::{RunSummary, StepStats};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: handover counter
///
/// ```rust,ignore
/// struct Handovers(u64);
///
/// impl AssociationObserver for Handovers {
///     fn on_step_end(&mut self, _step: Step, stats: &StepStats) {
///         self.0 += stats.handovers as u64;
///     }
/// }
/// ```
pub trait AssociationObserver {
    /// Called at the very start of each step, before the oracle advances.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called once removals, subscriptions and observations are done.
    fn on_step_end(&mut self, _step: Step, _stats: &StepStats) {}

    /// Called on every check step, after [`on_step_end`](Self::on_step_end).
    ///
    /// The tracker reflects the end of `step`: every live vehicle has a record
    /// and no record belongs to a vehicle that left the network.
    fn on_snapshot(&mut self, _step: Step, _tracker: &AssociationTracker) {}

    /// Called once when [`Sim::run`][crate::Sim::run] returns, whether the
    /// run completed or was stopped.
    fn on_run_end(&mut self, _summary: &RunSummary) {}
}

impl<T: AssociationObserver + ?Sized> AssociationObserver for &mut T {
    fn on_step_start(&mut self, step: Step) {
        (**self).on_step_start(step)
    }

    fn on_step_end(&mut self, step: Step, stats: &StepStats) {
        (**self).on_step_end(step, stats)
    }

    fn on_snapshot(&mut self, step: Step, tracker: &AssociationTracker) {
        (**self).on_snapshot(step, tracker)
    }

    fn on_run_end(&mut self, summary: &RunSummary) {
        (**self).on_run_end(summary)
    }
}

/// An [`AssociationObserver`] that does nothing.  Use when you need to call
/// `run` but don't want callbacks.
pub struct NoopObserver;

impl AssociationObserver for NoopObserver {}
