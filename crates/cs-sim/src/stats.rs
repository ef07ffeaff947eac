//! Per-step and per-run counters reported to observers.

use cs_core::Step;

/// What happened during one step of the loop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub step: Step,

    /// Whether this step re-evaluated associations and emitted a snapshot.
    pub is_check: bool,

    /// Vehicles that departed (and were subscribed) this step.
    pub departed: usize,

    /// Records dropped because the vehicle arrived or was teleported away.
    pub removed: usize,

    /// Removal notices for vehicles with no record.  Logged, never fatal.
    pub unknown_removals: usize,

    /// Vehicles observed for the first time this step.
    pub created: usize,

    /// Vehicles whose association changed this step.
    pub handovers: usize,

    /// Records held at the end of the step.
    pub tracked: usize,

    /// Of those, how many are assigned to a site.
    pub assigned: usize,
}

/// Totals for a [`Sim::run`][crate::Sim::run] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of steps processed.
    pub steps_run: u64,

    /// The last step processed, if any.
    pub last_step: Option<Step>,

    /// Number of check steps (and therefore snapshots) processed.
    pub check_steps: u64,

    pub vehicles_seen: u64,
    pub removed: u64,
    pub unknown_removals: u64,
    pub handovers: u64,

    /// `true` when the run ended early because the stop flag was raised.
    pub stopped: bool,
}

impl RunSummary {
    pub(crate) fn record(&mut self, stats: &StepStats) {
        self.steps_run += 1;
        self.last_step = Some(stats.step);
        if stats.is_check {
            self.check_steps += 1;
        }
        self.vehicles_seen    += stats.created as u64;
        self.removed          += stats.removed as u64;
        self.unknown_removals += stats.unknown_removals as u64;
        self.handovers        += stats.handovers as u64;
    }
}
