//! Plain data row type written by output backends.

use cs_core::Step;
use cs_track::AssociationTracker;

/// One vehicle's association at a check step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationRow {
    pub step:       u64,
    pub vehicle_id: String,
    /// `None` for an unassociated vehicle; written as an empty field (CSV) or
    /// `NULL` (SQLite).
    pub site_id:    Option<String>,
}

impl AssociationRow {
    /// Every record in `tracker`, ordered by vehicle id.
    pub fn snapshot(step: Step, tracker: &AssociationTracker) -> Vec<AssociationRow> {
        let mut rows: Vec<AssociationRow> = tracker
            .iter()
            .map(|(vehicle, assoc)| AssociationRow {
                step:       step.0,
                vehicle_id: vehicle.as_str().to_owned(),
                site_id:    assoc.site().map(|s| s.as_str().to_owned()),
            })
            .collect();
        rows.sort_by(|a, b| a.vehicle_id.cmp(&b.vehicle_id));
        rows
    }
}
