//! `cs-core` — foundational types for the `cellsite` association tracker.
//!
//! This crate is a dependency of every other `cs-*` crate.  It has no `cs-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`ids`]     | `VehicleId`, `SiteId`                                        |
//! | [`geo`]     | `Point2`, `Bounds`, `GeoPoint`, `Projection`                 |
//! | [`time`]    | `Step`, `CheckSchedule`, `is_check_step`, `RunConfig`        |
//! | [`rng`]     | `SimRng`                                                     |
//! | [`error`]   | `CoreError`, `CoreResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Bounds, EquirectangularProjection, GeoPoint, Point2, Projection};
pub use ids::{SiteId, VehicleId};
pub use rng::SimRng;
pub use time::{CheckSchedule, RunConfig, Step, is_check_step};
