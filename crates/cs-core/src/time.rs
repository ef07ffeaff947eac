//! Step counter, checkpoint schedule, and run configuration.
//!
//! # Design
//!
//! Simulated time is a monotonically increasing `Step` counter driven by the
//! simulation oracle (one step = one simulated second for the usual
//! micro-simulation setup).  A *check step* is any step divisible by the
//! configured interval; re-evaluation and persistence only happen there.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Upper bound on a run's duration: one simulated day at one step per second.
pub const MAX_DURATION_STEPS: u64 = 86_400;

// ── Step ──────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// Return the step `n` after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Step {
        Step(self.0 + n)
    }

    #[inline]
    pub fn next(self) -> Step {
        self.offset(1)
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── Checkpoint schedule ───────────────────────────────────────────────────────

/// `true` iff `step` is a check step for `interval`.
///
/// `interval` must be positive; [`CheckSchedule::new`] enforces that once at
/// setup so the per-step call can stay branch-free.
#[inline]
pub fn is_check_step(step: Step, interval: u64) -> bool {
    step.0.is_multiple_of(interval)
}

/// A validated check interval.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckSchedule {
    interval: u64,
}

impl CheckSchedule {
    /// Fails with [`CoreError::Config`] for a zero interval.
    pub fn new(interval: u64) -> CoreResult<Self> {
        if interval == 0 {
            return Err(CoreError::Config("check interval must be positive".into()));
        }
        Ok(Self { interval })
    }

    #[inline]
    pub fn interval(&self) -> u64 {
        self.interval
    }

    #[inline]
    pub fn is_check_step(&self, step: Step) -> bool {
        is_check_step(step, self.interval)
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Configuration values consumed by the association loop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Last step to simulate; the loop runs steps `0..=duration_steps`.
    /// Capped at [`MAX_DURATION_STEPS`].
    pub duration_steps: u64,

    /// Steps between re-evaluations (and association snapshots).
    pub check_interval: u64,

    /// Maximum vehicle–site distance for an association, in planar units.
    pub max_distance: f64,

    /// Seed for synthetic site placement.
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration_steps: MAX_DURATION_STEPS,
            check_interval: 180,
            max_distance:   2_000.0,
            seed:           42,
        }
    }
}

impl RunConfig {
    /// Check every field; the first violation is returned as
    /// [`CoreError::Config`].
    pub fn validate(&self) -> CoreResult<()> {
        if self.duration_steps > MAX_DURATION_STEPS {
            return Err(CoreError::Config(format!(
                "duration {} exceeds the daily horizon of {MAX_DURATION_STEPS} steps",
                self.duration_steps
            )));
        }
        if !(self.max_distance.is_finite() && self.max_distance > 0.0) {
            return Err(CoreError::Config(format!(
                "max distance must be a positive number, got {}",
                self.max_distance
            )));
        }
        self.schedule().map(|_| ())
    }

    pub fn schedule(&self) -> CoreResult<CheckSchedule> {
        CheckSchedule::new(self.check_interval)
    }

    /// The final step of the run (inclusive).
    #[inline]
    pub fn last_step(&self) -> Step {
        Step(self.duration_steps)
    }
}
