//! Trace-replay oracle.
//!
//! [`TraceOracle`] stands in for a live traffic engine by replaying recorded
//! vehicle positions.
//!
//! # CSV format
//!
//! ```csv
//! step,vehicle_id,x,y,teleported
//! 0,veh0,120.5,88.0,
//! 1,veh0,131.0,90.2,
//! 1,veh1,4010.0,2200.0,
//! 2,veh1,4022.5,2201.0,true
//! ```
//!
//! - A vehicle departs on the step of its first row.
//! - Between rows its last position is held.
//! - It leaves the network on the step after its last row: as a
//!   teleport removal if that row has `teleported = true`, otherwise as an
//!   arrival.
//! - The `teleported` column is optional; empty means `false`.
//!
//! The network bounds are the bounding box of every recorded position unless
//! overridden with [`TraceOracle::with_bounds`].

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cs_core::{Bounds, Point2, Step, VehicleId};

use crate::{SimError, SimResult, SimulationOracle};

// ── Record ────────────────────────────────────────────────────────────────────

/// One recorded position.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TraceRecord {
    pub step: u64,
    #[serde(alias = "vehicle", alias = "id")]
    pub vehicle_id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub teleported: Option<bool>,
}

impl TraceRecord {
    pub fn new(step: u64, vehicle_id: impl Into<String>, x: f64, y: f64) -> Self {
        Self { step, vehicle_id: vehicle_id.into(), x, y, teleported: None }
    }

    /// Mark this row as the vehicle's last before a teleport removal.
    pub fn teleported(mut self) -> Self {
        self.teleported = Some(true);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Exit {
    Arrived,
    Teleported,
}

struct Span {
    first:      u64,
    last:       u64,
    teleported: bool,
}

// ── TraceOracle ───────────────────────────────────────────────────────────────

/// A [`SimulationOracle`] that replays a recorded trace.
pub struct TraceOracle {
    moves:      BTreeMap<u64, Vec<(VehicleId, Point2)>>,
    departures: BTreeMap<u64, Vec<VehicleId>>,
    exits:      BTreeMap<u64, Vec<(VehicleId, Exit)>>,
    bounds:     Bounds,
    vehicles:   usize,
    final_step: Option<Step>,

    current:    Option<u64>,
    live:       BTreeMap<VehicleId, Point2>,
    subscribed: HashSet<VehicleId>,

    departed_now:   Vec<VehicleId>,
    arrived_now:    Vec<VehicleId>,
    teleported_now: Vec<VehicleId>,
}

impl TraceOracle {
    /// Load a trace from a CSV file.
    pub fn from_path(path: &Path) -> SimResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Like [`from_path`](Self::from_path) but accepts any `Read` source.
    pub fn from_reader<R: Read>(reader: R) -> SimResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = csv_reader
            .deserialize::<TraceRecord>()
            .enumerate()
            .map(|(row_no, r)| r.map_err(|e| SimError::Trace(format!("row {}: {e}", row_no + 1))))
            .collect::<SimResult<Vec<_>>>()?;

        let oracle = Self::from_records(records)?;
        log::info!(
            "loaded trace: {} vehicles, last event at {}",
            oracle.vehicles,
            oracle.final_step.unwrap_or(Step::ZERO),
        );
        Ok(oracle)
    }

    /// Build from in-memory records, in any order.
    ///
    /// Fails on an empty vehicle id, a non-finite coordinate, or a vehicle
    /// listed twice on the same step.
    pub fn from_records<I: IntoIterator<Item = TraceRecord>>(records: I) -> SimResult<Self> {
        let mut moves:  BTreeMap<u64, Vec<(VehicleId, Point2)>> = BTreeMap::new();
        let mut spans:  HashMap<VehicleId, Span> = HashMap::new();
        let mut seen:   HashSet<(u64, VehicleId)> = HashSet::new();
        let mut points: Vec<Point2> = Vec::new();

        for (row_no, rec) in records.into_iter().enumerate() {
            let id = rec.vehicle_id.trim();
            if id.is_empty() {
                return Err(SimError::Trace(format!("row {}: empty vehicle id", row_no + 1)));
            }
            if !(rec.x.is_finite() && rec.y.is_finite()) {
                return Err(SimError::Trace(format!(
                    "row {}: invalid position ({}, {})",
                    row_no + 1, rec.x, rec.y
                )));
            }
            let vehicle = VehicleId::new(id);
            if !seen.insert((rec.step, vehicle.clone())) {
                return Err(SimError::Trace(format!(
                    "row {}: vehicle {vehicle} listed twice at step {}",
                    row_no + 1, rec.step
                )));
            }

            let teleported = rec.teleported.unwrap_or(false);
            spans
                .entry(vehicle.clone())
                .and_modify(|span| {
                    span.first = span.first.min(rec.step);
                    if rec.step > span.last {
                        span.last = rec.step;
                        span.teleported = teleported;
                    }
                })
                .or_insert(Span { first: rec.step, last: rec.step, teleported });

            let pos = Point2::new(rec.x, rec.y);
            points.push(pos);
            moves.entry(rec.step).or_default().push((vehicle, pos));
        }

        let mut departures: BTreeMap<u64, Vec<VehicleId>> = BTreeMap::new();
        let mut exits:      BTreeMap<u64, Vec<(VehicleId, Exit)>> = BTreeMap::new();
        let vehicles = spans.len();
        for (vehicle, span) in spans {
            let exit = if span.teleported { Exit::Teleported } else { Exit::Arrived };
            departures.entry(span.first).or_default().push(vehicle.clone());
            exits.entry(span.last + 1).or_default().push((vehicle, exit));
        }
        departures.values_mut().for_each(|v| v.sort());
        exits.values_mut().for_each(|v| v.sort_by(|a, b| a.0.cmp(&b.0)));

        let final_step = exits.keys().next_back().map(|&s| Step(s));
        let origin = Point2::new(0.0, 0.0);
        let bounds = Bounds::enclosing(points).unwrap_or(Bounds::new(origin, origin));

        Ok(Self {
            moves,
            departures,
            exits,
            bounds,
            vehicles,
            final_step,
            current:        None,
            live:           BTreeMap::new(),
            subscribed:     HashSet::new(),
            departed_now:   Vec::new(),
            arrived_now:    Vec::new(),
            teleported_now: Vec::new(),
        })
    }

    /// Report `bounds` from [`network_bounds`](SimulationOracle::network_bounds)
    /// instead of the trace's own bounding box.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Number of distinct vehicles in the trace.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles
    }

    /// The step on which the last vehicle leaves, or `None` for an empty
    /// trace.
    pub fn final_step(&self) -> Option<Step> {
        self.final_step
    }

    /// The step produced by the last `advance_one_step`, if any.
    pub fn current_step(&self) -> Option<Step> {
        self.current.map(Step)
    }
}

impl SimulationOracle for TraceOracle {
    fn advance_one_step(&mut self) {
        let step = self.current.map_or(0, |s| s + 1);
        self.current = Some(step);

        self.departed_now.clear();
        self.arrived_now.clear();
        self.teleported_now.clear();

        for (vehicle, exit) in self.exits.remove(&step).unwrap_or_default() {
            self.live.remove(&vehicle);
            self.subscribed.remove(&vehicle);
            match exit {
                Exit::Arrived    => self.arrived_now.push(vehicle),
                Exit::Teleported => self.teleported_now.push(vehicle),
            }
        }

        if let Some(departed) = self.departures.remove(&step) {
            self.departed_now = departed;
        }

        for (vehicle, pos) in self.moves.remove(&step).unwrap_or_default() {
            self.live.insert(vehicle, pos);
        }
    }

    fn arrived_vehicle_ids(&self) -> Vec<VehicleId> {
        self.arrived_now.clone()
    }

    fn teleport_removed_vehicle_ids(&self) -> Vec<VehicleId> {
        self.teleported_now.clone()
    }

    fn departed_vehicle_ids(&self) -> Vec<VehicleId> {
        self.departed_now.clone()
    }

    fn subscribe(&mut self, vehicle: &VehicleId) {
        if self.live.contains_key(vehicle) {
            self.subscribed.insert(vehicle.clone());
        }
    }

    fn subscribed_positions(&self) -> Vec<(VehicleId, Point2)> {
        self.live
            .iter()
            .filter(|(vehicle, _)| self.subscribed.contains(*vehicle))
            .map(|(vehicle, &pos)| (vehicle.clone(), pos))
            .collect()
    }

    fn network_bounds(&self) -> Bounds {
        self.bounds
    }
}
