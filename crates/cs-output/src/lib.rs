//! `cs-output` — association snapshot writers for the cellsite tracker.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Output                                              |
//! |-----------|---------|-----------------------------------------------------|
//! | *(none)*  | CSV     | one file, header `step,vehicle_id,site_id`          |
//! | `sqlite`  | SQLite  | one database, table `associations`                  |
//!
//! Both implement [`AssociationWriter`] and are driven by
//! [`SnapshotOutputObserver`], which implements
//! `cs_sim::AssociationObserver` and writes one batch of rows per check step.
//!
//! [`write_site_positions`] writes the `site_id,x,y` audit file for a
//! synthetic site set.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_output::{CsvAssociationWriter, SnapshotOutputObserver};
//!
//! let writer = CsvAssociationWriter::create(Path::new("output_vehicles_sites.csv"))?;
//! let mut obs = SnapshotOutputObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::{CsvAssociationWriter, write_site_positions};
pub use error::{OutputError, OutputResult};
pub use observer::SnapshotOutputObserver;
pub use row::AssociationRow;
pub use writer::AssociationWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteAssociationWriter;
