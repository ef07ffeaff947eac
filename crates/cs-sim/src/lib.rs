//! `cs-sim` — step loop orchestrator for the cellsite association tracker.
//!
//! # Step loop
//!
//! ```text
//! for step in 0..=config.duration_steps:
//!   ① Advance:    the oracle moves the simulation forward one step.
//!   ② Removals:   arrived, then teleport-removed vehicles lose their
//!                  record (unknown ids are logged and counted, never fatal).
//!   ③ Subscribe:  vehicles that departed this step start reporting
//!                  positions.
//!   ④ Observe:    every reported position goes through
//!                  AssociationTracker::observe (new vehicles are resolved
//!                  immediately; others only on check steps).
//!   ⑤ Snapshot:   on check steps the observer receives the tracker.
//! ```
//!
//! Removals run before resolution so an id freed this step can never be
//! confused with a same-step re-arrival under the same id.
//!
//! The loop is single-threaded.  An optional stop flag is polled between
//! steps; each step is atomic, so stopping never leaves partial state.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cs_sim::{NoopObserver, SimBuilder, TraceOracle};
//! use cs_spatial::LinearScan;
//!
//! let oracle = TraceOracle::from_path(Path::new("trace.csv"))?;
//! let mut sim = SimBuilder::new(config, oracle, registry, LinearScan).build()?;
//! let summary = sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod oracle;
pub mod sim;
pub mod stats;
pub mod trace;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{AssociationObserver, NoopObserver};
pub use oracle::SimulationOracle;
pub use sim::Sim;
pub use stats::{RunSummary, StepStats};
pub use trace::{TraceOracle, TraceRecord};
