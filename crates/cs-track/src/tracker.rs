//! The `AssociationTracker`: the vehicle → association store.

use cs_core::{Point2, VehicleId};
use cs_spatial::{SiteRegistry, SiteResolver};

use crate::{Association, Transition};

#[cfg(not(feature = "fx-hash"))]
type RecordMap = std::collections::HashMap<VehicleId, Association>;
#[cfg(feature = "fx-hash")]
type RecordMap = rustc_hash::FxHashMap<VehicleId, Association>;

/// Holds one association record per live vehicle.
///
/// A record exists iff the simulation considers the vehicle live: it is
/// created by the first [`observe`](Self::observe) for that vehicle and
/// dropped by [`remove`](Self::remove).  The tracker does no I/O; the
/// periodic snapshot is read through [`iter`](Self::iter).
pub struct AssociationTracker {
    records:      RecordMap,
    max_distance: f64,
}

impl AssociationTracker {
    /// Create an empty tracker.  `max_distance` is the association range in
    /// planar units and must be positive (validated by `RunConfig`).
    pub fn new(max_distance: f64) -> Self {
        debug_assert!(max_distance > 0.0, "max distance must be positive");
        Self {
            records: RecordMap::default(),
            max_distance,
        }
    }

    #[inline]
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Number of tracked (live) vehicles.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn contains(&self, vehicle: &str) -> bool {
        self.records.contains_key(vehicle)
    }

    /// Current association of `vehicle`, or `None` if untracked.
    #[inline]
    pub fn association(&self, vehicle: &str) -> Option<&Association> {
        self.records.get(vehicle)
    }

    /// Tracked vehicles currently assigned to a site.
    pub fn assigned_count(&self) -> usize {
        self.records.values().filter(|a| a.is_assigned()).count()
    }

    /// Read-only view of every record, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&VehicleId, &Association)> + '_ {
        self.records.iter()
    }

    /// Report `vehicle` at `pos` for the current step.
    ///
    /// - Untracked vehicle: resolved immediately, whatever the step.
    /// - Tracked vehicle on a non-check step: untouched.
    /// - Tracked and `Assigned(s)` on a check step: kept while its distance
    ///   to `s` is within range, otherwise re-resolved against every site.
    /// - Tracked and `Unassociated` on a check step: re-resolved.
    ///
    /// An assigned site missing from `registry` counts as out of range.
    pub fn observe<R: SiteResolver + ?Sized>(
        &mut self,
        vehicle:  &VehicleId,
        pos:      Point2,
        is_check: bool,
        registry: &SiteRegistry,
        resolver: &R,
    ) -> Transition {
        let max_distance = self.max_distance;

        let Some(current) = self.records.get_mut(vehicle.as_str()) else {
            let created = Association::from_resolved(resolver.resolve(registry, pos, max_distance));
            self.records.insert(vehicle.clone(), created.clone());
            return Transition::Created(created);
        };

        if !is_check {
            return Transition::Kept;
        }

        if let Association::Assigned(site) = current {
            let in_range = registry
                .position(site.as_str())
                .is_some_and(|site_pos| site_pos.distance(pos) <= max_distance);
            if in_range {
                return Transition::Kept;
            }
        }

        let next = Association::from_resolved(resolver.resolve(registry, pos, max_distance));
        if next == *current {
            return Transition::Kept;
        }
        let from = std::mem::replace(current, next.clone());
        Transition::Reassigned { from, to: next }
    }

    /// Drop the record for `vehicle`.
    ///
    /// Idempotent: returns `false` if no record existed, leaving every other
    /// record untouched.  Callers decide whether that is worth reporting.
    pub fn remove(&mut self, vehicle: &str) -> bool {
        self.records.remove(vehicle).is_some()
    }
}
