//! The `Sim` struct and its step loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cs_core::{CheckSchedule, RunConfig, Step};
use cs_spatial::{SiteRegistry, SiteResolver};
use cs_track::{AssociationTracker, Transition};

use crate::{AssociationObserver, RunSummary, SimulationOracle, StepStats};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The association loop runner.
///
/// `Sim<O, R>` owns the oracle, the site registry and the tracker, and drives
/// one oracle step per loop step:
///
/// 1. **Advance**: `oracle.advance_one_step()`.
/// 2. **Removals**: arrived vehicles, then teleport-removed vehicles, lose
///    their record.  A removal for an untracked vehicle is logged and counted
///    in [`StepStats::unknown_removals`].
/// 3. **Subscribe**: every vehicle that departed this step is subscribed.
/// 4. **Observe**: every subscribed position is fed to
///    [`AssociationTracker::observe`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<O: SimulationOracle, R: SiteResolver> {
    /// Run configuration (validated by the builder).
    pub config: RunConfig,

    pub schedule: CheckSchedule,

    /// The traffic simulation being observed.
    pub oracle: O,

    /// Fixed site set; never mutated during a run.
    pub registry: SiteRegistry,

    /// Nearest-site strategy.
    pub resolver: R,

    /// One record per live, subscribed vehicle.
    pub tracker: AssociationTracker,

    pub(crate) next_step: Step,
    pub(crate) stop:      Option<Arc<AtomicBool>>,
    pub(crate) summary:   RunSummary,
}

impl<O: SimulationOracle, R: SiteResolver> Sim<O, R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current step through `config.last_step()` (inclusive).
    ///
    /// The stop flag, if any, is checked before every step.  `on_run_end` is
    /// called exactly once, with the returned summary.
    pub fn run<Obs: AssociationObserver + ?Sized>(&mut self, observer: &mut Obs) -> RunSummary {
        let last = self.config.last_step();
        self.summary.stopped = false;

        while self.next_step <= last {
            if self.stop_requested() {
                log::info!("stop requested before {}; ending run", self.next_step);
                self.summary.stopped = true;
                break;
            }
            self.step_once(observer);
        }

        log::info!(
            "run finished: {} steps, {} snapshots, {} vehicles seen, {} handovers",
            self.summary.steps_run,
            self.summary.check_steps,
            self.summary.vehicles_seen,
            self.summary.handovers,
        );
        observer.on_run_end(&self.summary);
        self.summary.clone()
    }

    /// Run exactly `n` steps from the current position (ignores the last
    /// step and the stop flag; never calls `on_run_end`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_steps<Obs: AssociationObserver + ?Sized>(&mut self, n: u64, observer: &mut Obs) {
        for _ in 0..n {
            self.step_once(observer);
        }
    }

    /// The step the next call to `run`/`run_steps` will process.
    pub fn current_step(&self) -> Step {
        self.next_step
    }

    /// Totals accumulated so far.
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    // ── Core step processing ──────────────────────────────────────────────

    fn stop_requested(&self) -> bool {
        self.stop.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn step_once<Obs: AssociationObserver + ?Sized>(&mut self, observer: &mut Obs) {
        let step = self.next_step;

        observer.on_step_start(step);
        let stats = self.process_step(step);
        self.summary.record(&stats);
        observer.on_step_end(step, &stats);
        if stats.is_check {
            observer.on_snapshot(step, &self.tracker);
        }

        self.next_step = step.next();
    }

    fn process_step(&mut self, step: Step) -> StepStats {
        let is_check = self.schedule.is_check_step(step);
        let mut stats = StepStats { step, is_check, ..StepStats::default() };

        self.oracle.advance_one_step();

        // ── Phase 1: removals ─────────────────────────────────────────────
        //
        // Before any resolution, so a freed id never sees a stale record.
        let removals = [
            ("arrived",    self.oracle.arrived_vehicle_ids()),
            ("teleported", self.oracle.teleport_removed_vehicle_ids()),
        ];
        for (reason, ids) in removals {
            for vehicle in ids {
                if self.tracker.remove(vehicle.as_str()) {
                    stats.removed += 1;
                } else {
                    stats.unknown_removals += 1;
                    log::warn!("{step}: {reason} vehicle {vehicle} has no association record");
                }
            }
        }

        // ── Phase 2: subscribe new departures ─────────────────────────────
        let departed = self.oracle.departed_vehicle_ids();
        stats.departed = departed.len();
        for vehicle in &departed {
            self.oracle.subscribe(vehicle);
        }

        // ── Phase 3: observe positions ────────────────────────────────────
        for (vehicle, pos) in self.oracle.subscribed_positions() {
            match self.tracker.observe(&vehicle, pos, is_check, &self.registry, &self.resolver) {
                Transition::Created(_) => stats.created += 1,
                Transition::Reassigned { from, to } => {
                    stats.handovers += 1;
                    log::trace!("{step}: vehicle {vehicle} moved from {from} to {to}");
                }
                Transition::Kept => {}
            }
        }

        stats.tracked  = self.tracker.len();
        stats.assigned = self.tracker.assigned_count();

        if is_check {
            log::debug!(
                "{step}: {} tracked, {} assigned, {} handovers",
                stats.tracked, stats.assigned, stats.handovers,
            );
        }

        stats
    }
}
