//! Nearest-site resolution.
//!
//! # Pluggability
//!
//! The tracker resolves through the [`SiteResolver`] trait, so the search
//! strategy can be swapped without touching the state machine.  Two
//! implementations are provided:
//!
//! | Resolver         | Cost per query  | Tie-break on equal distance             |
//! |------------------|-----------------|-----------------------------------------|
//! | [`LinearScan`]   | O(sites)        | first site in registration order        |
//! | [`SpatialIndex`] | O(log sites)    | deterministic, otherwise unspecified    |
//!
//! Both always return *a* nearest site; callers must not depend on which one
//! when several are equidistant.

use cs_core::{Point2, SiteId};

use crate::registry::{Site, SiteRegistry};

/// Pluggable nearest-site search.
pub trait SiteResolver {
    /// The site closest to `pos` and its planar distance, or `None` for an
    /// empty registry.
    fn nearest<'r>(&self, registry: &'r SiteRegistry, pos: Point2) -> Option<(&'r Site, f64)>;

    /// The nearest site within `max_distance` of `pos`.
    ///
    /// A distance exactly equal to `max_distance` is in range.  `None` means
    /// no coverage: every site is farther than `max_distance`.
    fn resolve(&self, registry: &SiteRegistry, pos: Point2, max_distance: f64) -> Option<SiteId> {
        self.nearest(registry, pos)
            .filter(|&(_, d)| d <= max_distance)
            .map(|(site, _)| site.id.clone())
    }
}

impl<T: SiteResolver + ?Sized> SiteResolver for &T {
    fn nearest<'r>(&self, registry: &'r SiteRegistry, pos: Point2) -> Option<(&'r Site, f64)> {
        (**self).nearest(registry, pos)
    }
}

// ── LinearScan ────────────────────────────────────────────────────────────────

/// Scans every site in registration order and keeps the strict minimum.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinearScan;

impl SiteResolver for LinearScan {
    fn nearest<'r>(&self, registry: &'r SiteRegistry, pos: Point2) -> Option<(&'r Site, f64)> {
        let mut best: Option<(&Site, f64)> = None;
        for site in registry {
            let d = site.pos.distance(pos);
            // Strict `<`: the earlier site keeps an exact tie.
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((site, d));
            }
        }
        best
    }
}

// ── SpatialIndex ──────────────────────────────────────────────────────────────

/// Queries the registry's R-tree.
#[derive(Copy, Clone, Debug, Default)]
pub struct SpatialIndex;

impl SiteResolver for SpatialIndex {
    fn nearest<'r>(&self, registry: &'r SiteRegistry, pos: Point2) -> Option<(&'r Site, f64)> {
        registry.nearest_indexed(pos)
    }
}
