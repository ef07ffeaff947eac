//! CSV site-list loader.
//!
//! # CSV format
//!
//! One row per site, with a header.  Only the id and the coordinates are
//! used; any other column (typically a descriptive `site_name`) is ignored.
//!
//! ```csv
//! node_id,site_lat,site_long,site_name
//! 1101,45.0703,7.6869,TORINO CENTRO
//! 1102,45.0621,7.6782,TORINO CROCETTA
//! ```
//!
//! Accepted header names:
//!
//! | Field | Headers                                         |
//! |-------|-------------------------------------------------|
//! | id    | `node_id`, `id`, `site_id`                      |
//! | lat   | `site_lat`, `lat`, `latitude`                   |
//! | lon   | `site_long`, `lon`, `long`, `longitude`         |
//!
//! A repeated id keeps its first row; later rows are skipped with a warning,
//! the same way a site export with one row per antenna collapses to one row
//! per site.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cs_core::{GeoPoint, Projection};

use crate::registry::{SiteRegistry, SiteRegistryBuilder};
use crate::{SpatialError, SpatialResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SiteRecord {
    #[serde(alias = "node_id", alias = "site_id")]
    id:  String,
    #[serde(alias = "site_lat", alias = "latitude")]
    lat: f64,
    #[serde(alias = "site_long", alias = "long", alias = "longitude")]
    lon: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a site list from a CSV file, projecting every coordinate with
/// `projection`.
pub fn load_sites_csv<P: Projection + ?Sized>(
    path:       &Path,
    projection: &P,
) -> SpatialResult<SiteRegistry> {
    let file = std::fs::File::open(path)?;
    load_sites_reader(file, projection)
}

/// Like [`load_sites_csv`] but accepts any `Read` source.
pub fn load_sites_reader<R: Read, P: Projection + ?Sized>(
    reader:     R,
    projection: &P,
) -> SpatialResult<SiteRegistry> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = SiteRegistryBuilder::new();

    for (row_no, result) in csv_reader.deserialize::<SiteRecord>().enumerate() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        let id = row.id.trim();
        if id.is_empty() {
            return Err(SpatialError::Parse(format!("row {}: empty site id", row_no + 1)));
        }
        let geo = GeoPoint::new(row.lat, row.lon);
        if !(row.lat.is_finite() && row.lon.is_finite()) {
            return Err(SpatialError::Parse(format!("row {}: invalid coordinate {geo}", row_no + 1)));
        }

        match builder.add_site(id, projection.to_planar(geo)) {
            Ok(_) => {}
            Err(SpatialError::DuplicateSite(dup)) => {
                log::warn!("site {dup} listed more than once; keeping the first row");
            }
            Err(e) => return Err(e),
        }
    }

    log::info!("loaded {} sites from site list", builder.site_count());
    Ok(builder.build())
}
