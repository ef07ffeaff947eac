//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use cs_core::{RunConfig, Step};
use cs_spatial::{SiteRegistry, SiteResolver};
use cs_track::AssociationTracker;

use crate::{Sim, SimResult, SimulationOracle, RunSummary};

/// Fluent builder for [`Sim<O, R>`].
///
/// # Required inputs
///
/// - [`RunConfig`]: duration, check interval, max distance, seed
/// - `O: SimulationOracle`: the traffic simulation being observed
/// - [`SiteRegistry`]: the fixed site set, from a file or synthetic placement
/// - `R: SiteResolver`: nearest-site strategy (e.g. [`cs_spatial::LinearScan`])
///
/// # Optional inputs
///
/// | Method            | Default                |
/// |-------------------|------------------------|
/// | `.stop_flag(f)`   | Run until the last step |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, oracle, registry, SpatialIndex)
///     .stop_flag(Arc::clone(&stop))
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<O: SimulationOracle, R: SiteResolver> {
    config:   RunConfig,
    oracle:   O,
    registry: SiteRegistry,
    resolver: R,
    stop:     Option<Arc<AtomicBool>>,
}

impl<O: SimulationOracle, R: SiteResolver> SimBuilder<O, R> {
    /// Create a builder with all required inputs.
    pub fn new(config: RunConfig, oracle: O, registry: SiteRegistry, resolver: R) -> Self {
        Self { config, oracle, registry, resolver, stop: None }
    }

    /// Poll `flag` between steps; once it reads `true` the run ends early.
    pub fn stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    /// Validate the configuration and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<O, R>> {
        self.config.validate()?;
        let schedule = self.config.schedule()?;

        if self.registry.is_empty() {
            log::warn!("site registry is empty; every vehicle will stay unassociated");
        }
        log::info!(
            "association run: steps 0..={}, check every {} steps, max distance {}, {} sites",
            self.config.duration_steps,
            schedule.interval(),
            self.config.max_distance,
            self.registry.len(),
        );

        Ok(Sim {
            tracker:   AssociationTracker::new(self.config.max_distance),
            config:    self.config,
            schedule,
            oracle:    self.oracle,
            registry:  self.registry,
            resolver:  self.resolver,
            next_step: Step::ZERO,
            stop:      self.stop,
            summary:   RunSummary::default(),
        })
    }
}
