//! Unit tests for cs-track.

use cs_core::{Point2, SimRng, SiteId, VehicleId};
use cs_spatial::{LinearScan, SiteRegistry, SiteRegistryBuilder, SiteResolver, SpatialIndex};

use crate::{Association, AssociationTracker, Transition};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn vid(s: &str) -> VehicleId {
    VehicleId::new(s)
}

fn assigned(s: &str) -> Association {
    Association::Assigned(SiteId::new(s))
}

/// One site at the origin.
fn single_site() -> SiteRegistry {
    let mut b = SiteRegistryBuilder::new();
    b.add_site("0", Point2::new(0.0, 0.0)).unwrap();
    b.build()
}

/// Two sites 1000 apart on the x axis: "a" at 0, "b" at 1000.
fn two_sites() -> SiteRegistry {
    let mut b = SiteRegistryBuilder::new();
    b.add_site("a", Point2::new(0.0, 0.0)).unwrap();
    b.add_site("b", Point2::new(1_000.0, 0.0)).unwrap();
    b.build()
}

/// `n` seeded random sites in a 5 km square.
fn scattered(n: usize, seed: u64) -> SiteRegistry {
    let mut rng = SimRng::new(seed);
    let mut b = SiteRegistryBuilder::new();
    for i in 0..n {
        let p = Point2::new(rng.gen_range(0.0..5_000.0), rng.gen_range(0.0..5_000.0));
        b.add_site(i.to_string(), p).unwrap();
    }
    b.build()
}

/// Exhaustive nearest in-range site, ignoring ties (returns the distance).
fn brute_force(reg: &SiteRegistry, p: Point2, max: f64) -> Option<f64> {
    reg.iter()
        .map(|s| s.pos.distance(p))
        .filter(|&d| d <= max)
        .min_by(|a, b| a.total_cmp(b))
}

// ── Association ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod association {
    use super::*;

    #[test]
    fn from_resolved() {
        assert_eq!(Association::from_resolved(Some(SiteId::new("x"))), assigned("x"));
        assert_eq!(Association::from_resolved(None), Association::Unassociated);
        assert_eq!(assigned("x").site().map(|s| s.as_str()), Some("x"));
        assert!(Association::Unassociated.site().is_none());
    }

    #[test]
    fn handover_flag() {
        let t = Transition::Reassigned { from: assigned("a"), to: Association::Unassociated };
        assert!(t.is_handover());
        assert!(!Transition::Kept.is_handover());
        assert!(!Transition::Created(assigned("a")).is_handover());
    }
}

// ── New vehicles ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod creation {
    use super::*;

    #[test]
    fn resolved_on_first_observation_even_off_check() {
        let reg = two_sites();
        let mut t = AssociationTracker::new(600.0);
        let tr = t.observe(&vid("v"), Point2::new(900.0, 0.0), false, &reg, &LinearScan);
        assert_eq!(tr, Transition::Created(assigned("b")));
        assert_eq!(t.association("v"), Some(&assigned("b")));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn out_of_range_creates_unassociated() {
        let reg = two_sites();
        let mut t = AssociationTracker::new(100.0);
        let tr = t.observe(&vid("v"), Point2::new(500.0, 0.0), true, &reg, &LinearScan);
        assert_eq!(tr, Transition::Created(Association::Unassociated));
        assert!(t.contains("v"));
        assert_eq!(t.assigned_count(), 0);
    }

    #[test]
    fn empty_registry_leaves_everyone_unassociated() {
        let reg = SiteRegistry::empty();
        let mut t = AssociationTracker::new(1e9);
        t.observe(&vid("v"), Point2::new(0.0, 0.0), true, &reg, &LinearScan);
        assert_eq!(t.association("v"), Some(&Association::Unassociated));
    }
}

// ── Hysteresis and re-resolution ──────────────────────────────────────────────

#[cfg(test)]
mod reassignment {
    use super::*;

    #[test]
    fn non_check_step_never_changes() {
        let reg = two_sites();
        let mut t = AssociationTracker::new(600.0);
        t.observe(&vid("v"), Point2::new(0.0, 0.0), true, &reg, &LinearScan);
        // Far out of range of "a" and right on top of "b", but not a check step.
        let tr = t.observe(&vid("v"), Point2::new(1_000.0, 0.0), false, &reg, &LinearScan);
        assert_eq!(tr, Transition::Kept);
        assert_eq!(t.association("v"), Some(&assigned("a")));
    }

    #[test]
    fn in_range_keeps_current_site_even_if_another_is_closer() {
        let reg = two_sites();
        let mut t = AssociationTracker::new(600.0);
        t.observe(&vid("v"), Point2::new(100.0, 0.0), true, &reg, &LinearScan);
        // 550 from "a", 450 from "b": "b" is nearer but "a" is still in range.
        let tr = t.observe(&vid("v"), Point2::new(550.0, 0.0), true, &reg, &LinearScan);
        assert_eq!(tr, Transition::Kept);
        assert_eq!(t.association("v"), Some(&assigned("a")));
    }

    #[test]
    fn out_of_range_hands_over_to_nearest() {
        let reg = two_sites();
        let mut t = AssociationTracker::new(600.0);
        t.observe(&vid("v"), Point2::new(100.0, 0.0), true, &reg, &LinearScan);
        let tr = t.observe(&vid("v"), Point2::new(700.0, 0.0), true, &reg, &LinearScan);
        assert_eq!(tr, Transition::Reassigned { from: assigned("a"), to: assigned("b") });
        assert_eq!(t.association("v"), Some(&assigned("b")));
    }

    #[test]
    fn out_of_range_with_no_alternative_goes_unassociated() {
        let reg = single_site();
        let mut t = AssociationTracker::new(100.0);
        t.observe(&vid("v"), Point2::new(50.0, 0.0), true, &reg, &LinearScan);
        let tr = t.observe(&vid("v"), Point2::new(150.0, 0.0), true, &reg, &LinearScan);
        assert_eq!(tr, Transition::Reassigned { from: assigned("0"), to: Association::Unassociated });
    }

    #[test]
    fn unassociated_re_resolved_only_on_check_steps() {
        let reg = single_site();
        let mut t = AssociationTracker::new(100.0);
        t.observe(&vid("v"), Point2::new(500.0, 0.0), true, &reg, &LinearScan);
        assert_eq!(t.association("v"), Some(&Association::Unassociated));

        // Back in range, but off-check: still unassociated.
        t.observe(&vid("v"), Point2::new(10.0, 0.0), false, &reg, &LinearScan);
        assert_eq!(t.association("v"), Some(&Association::Unassociated));

        let tr = t.observe(&vid("v"), Point2::new(10.0, 0.0), true, &reg, &LinearScan);
        assert_eq!(tr, Transition::Reassigned { from: Association::Unassociated, to: assigned("0") });
    }

    #[test]
    fn still_unassociated_is_kept() {
        let reg = single_site();
        let mut t = AssociationTracker::new(100.0);
        t.observe(&vid("v"), Point2::new(500.0, 0.0), true, &reg, &LinearScan);
        let tr = t.observe(&vid("v"), Point2::new(600.0, 0.0), true, &reg, &LinearScan);
        assert_eq!(tr, Transition::Kept);
    }

    #[test]
    fn exactly_at_max_distance_is_in_range() {
        let reg = single_site();
        let mut t = AssociationTracker::new(100.0);
        t.observe(&vid("v"), Point2::new(0.0, 0.0), true, &reg, &LinearScan);
        let tr = t.observe(&vid("v"), Point2::new(0.0, 100.0), true, &reg, &LinearScan);
        assert_eq!(tr, Transition::Kept);
    }
}

// ── Removal ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod removal {
    use super::*;

    #[test]
    fn remove_is_idempotent() {
        let reg = two_sites();
        let mut t = AssociationTracker::new(600.0);
        t.observe(&vid("v1"), Point2::new(0.0, 0.0), true, &reg, &LinearScan);
        t.observe(&vid("v2"), Point2::new(1_000.0, 0.0), true, &reg, &LinearScan);

        assert!(t.remove("v1"));
        assert!(!t.remove("v1"));
        assert!(!t.remove("never-seen"));

        assert_eq!(t.len(), 1);
        assert!(!t.contains("v1"));
        assert_eq!(t.association("v2"), Some(&assigned("b")));
    }

    #[test]
    fn re_added_vehicle_is_resolved_fresh() {
        let reg = two_sites();
        let mut t = AssociationTracker::new(600.0);
        t.observe(&vid("v"), Point2::new(0.0, 0.0), true, &reg, &LinearScan);
        t.remove("v");
        let tr = t.observe(&vid("v"), Point2::new(1_000.0, 0.0), false, &reg, &LinearScan);
        assert_eq!(tr, Transition::Created(assigned("b")));
    }
}

// ── Properties over random walks ──────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use std::collections::HashMap;

    use super::*;

    const MAX: f64 = 800.0;
    const INTERVAL: u64 = 5;

    fn walk<R: SiteResolver>(resolver: R) {
        let reg = scattered(40, 5);
        let mut rng = SimRng::new(17);
        let mut t = AssociationTracker::new(MAX);
        let mut pos: HashMap<String, Point2> = (0..30)
            .map(|i| (format!("veh{i}"), Point2::new(rng.gen_range(0.0..5_000.0), rng.gen_range(0.0..5_000.0))))
            .collect();

        for step in 0..200u64 {
            let check = step % INTERVAL == 0;
            for (id, p) in pos.iter_mut() {
                p.x += rng.gen_range(-150.0..150.0);
                p.y += rng.gen_range(-150.0..150.0);

                let before = t.association(id).cloned();
                let tr = t.observe(&VehicleId::new(id.as_str()), *p, check, &reg, &resolver);
                let after = t.association(id).cloned().expect("record exists after observe");

                match (before, check) {
                    // New vehicles get the true nearest in-range site.
                    (None, _) => check_nearest(&reg, *p, &after),
                    // Off-check: no flapping.
                    (Some(b), false) => assert_eq!(b, after, "changed off-check at step {step}"),
                    (Some(Association::Assigned(s)), true) => {
                        let d = reg.position(s.as_str()).unwrap().distance(*p);
                        if d <= MAX {
                            assert_eq!(after, Association::Assigned(s), "in-range site dropped");
                            assert_eq!(tr, Transition::Kept);
                        } else {
                            check_nearest(&reg, *p, &after);
                        }
                    }
                    (Some(Association::Unassociated), true) => check_nearest(&reg, *p, &after),
                }
            }
        }
    }

    fn check_nearest(reg: &SiteRegistry, p: Point2, got: &Association) {
        match (brute_force(reg, p, MAX), got) {
            (None, Association::Unassociated) => {}
            (Some(best), Association::Assigned(s)) => {
                let d = reg.position(s.as_str()).unwrap().distance(p);
                assert!((d - best).abs() < 1e-9, "assigned {s} at {d}, nearest is {best}");
            }
            (expected, got) => panic!("expected nearest {expected:?}, got {got:?}"),
        }
    }

    #[test]
    fn random_walk_linear_scan() {
        walk(LinearScan);
    }

    #[test]
    fn random_walk_spatial_index() {
        walk(SpatialIndex);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn co_located_vehicle_stays_assigned_all_run() {
        let reg = single_site();
        let mut t = AssociationTracker::new(100.0);
        for step in 0..50u64 {
            t.observe(&vid("v"), Point2::new(0.0, 0.0), step % 10 == 0, &reg, &LinearScan);
            assert_eq!(t.association("v"), Some(&assigned("0")));
        }
    }

    #[test]
    fn leaves_coverage_exactly_at_check_step() {
        let reg = single_site();
        let mut t = AssociationTracker::new(100.0);
        // Steps 0..10 at distance 50; steps 10.. at distance 150; check every 20.
        for step in 0..=40u64 {
            let p = if step < 10 { Point2::new(50.0, 0.0) } else { Point2::new(150.0, 0.0) };
            t.observe(&vid("v"), p, step % 20 == 0, &reg, &LinearScan);
            let a = t.association("v").unwrap();
            if step < 20 {
                assert_eq!(a, &assigned("0"), "step {step}");
            } else {
                assert_eq!(a, &Association::Unassociated, "step {step}");
            }
        }
    }
}
