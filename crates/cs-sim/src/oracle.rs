//! The simulation engine, seen from the association loop.

use cs_core::{Bounds, Point2, VehicleId};

/// An opaque, synchronously stepped traffic simulation.
///
/// Every query describes the step produced by the most recent
/// [`advance_one_step`](Self::advance_one_step).  Calls are infallible by
/// contract: the engine is authoritative and never retried.
pub trait SimulationOracle {
    /// Advance the simulation by exactly one step.
    fn advance_one_step(&mut self);

    /// Vehicles that reached their destination during the last step.
    fn arrived_vehicle_ids(&self) -> Vec<VehicleId>;

    /// Vehicles the engine removed during the last step because they were
    /// stuck for too long.
    fn teleport_removed_vehicle_ids(&self) -> Vec<VehicleId>;

    /// Vehicles that entered the network during the last step.
    fn departed_vehicle_ids(&self) -> Vec<VehicleId>;

    /// Start reporting `vehicle`'s position.  Called once per vehicle, on
    /// the step it departs.
    fn subscribe(&mut self, vehicle: &VehicleId);

    /// Current position of every subscribed, still-live vehicle.
    fn subscribed_positions(&self) -> Vec<(VehicleId, Point2)>;

    /// Bounding box of the simulated network.
    fn network_bounds(&self) -> Bounds;
}

impl<T: SimulationOracle + ?Sized> SimulationOracle for Box<T> {
    fn advance_one_step(&mut self) {
        (**self).advance_one_step()
    }

    fn arrived_vehicle_ids(&self) -> Vec<VehicleId> {
        (**self).arrived_vehicle_ids()
    }

    fn teleport_removed_vehicle_ids(&self) -> Vec<VehicleId> {
        (**self).teleport_removed_vehicle_ids()
    }

    fn departed_vehicle_ids(&self) -> Vec<VehicleId> {
        (**self).departed_vehicle_ids()
    }

    fn subscribe(&mut self, vehicle: &VehicleId) {
        (**self).subscribe(vehicle)
    }

    fn subscribed_positions(&self) -> Vec<(VehicleId, Point2)> {
        (**self).subscribed_positions()
    }

    fn network_bounds(&self) -> Bounds {
        (**self).network_bounds()
    }
}
