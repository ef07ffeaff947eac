//! Site-registry construction modes.
//!
//! A run gets its sites from exactly one place: a site-list file (projected
//! into planar coordinates) or `N` synthetic sites scattered uniformly over
//! the network's bounding box.  [`SiteSource::from_options`] turns the raw
//! configuration into one of the two and rejects every other combination
//! before the simulation starts.

use std::path::PathBuf;

use cs_core::{Bounds, Point2, Projection, SimRng};

use crate::loader::load_sites_csv;
use crate::registry::{SiteRegistry, SiteRegistryBuilder};
use crate::{SpatialError, SpatialResult};

/// Where the run's sites come from.
pub enum SiteSource {
    /// Read `path` and convert each coordinate with `projection`.
    File {
        path:       PathBuf,
        projection: Box<dyn Projection>,
    },
    /// Generate `count` sites at random integer positions inside the network
    /// bounds.
    Synthetic { count: usize },
}

impl SiteSource {
    /// Select the construction mode.
    ///
    /// # Errors
    ///
    /// [`SpatialError::Config`] when neither or both sources are given, when
    /// a file comes without a projection, or when the requested count is 0.
    pub fn from_options(
        sites_file: Option<PathBuf>,
        site_count: Option<usize>,
        projection: Option<Box<dyn Projection>>,
    ) -> SpatialResult<Self> {
        match (sites_file, site_count) {
            (Some(path), None) => {
                let projection = projection.ok_or_else(|| {
                    SpatialError::Config(format!(
                        "site file {} needs a network projection to convert coordinates",
                        path.display()
                    ))
                })?;
                Ok(SiteSource::File { path, projection })
            }
            (None, Some(0)) => Err(SpatialError::Config(
                "synthetic site count must be positive".into(),
            )),
            (None, Some(count)) => Ok(SiteSource::Synthetic { count }),
            (Some(_), Some(_)) => Err(SpatialError::Config(
                "a site file and a synthetic site count are mutually exclusive".into(),
            )),
            (None, None) => Err(SpatialError::Config(
                "provide either a site file or a number of sites to generate".into(),
            )),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, SiteSource::Synthetic { .. })
    }

    /// Build the registry.  `bounds` and `rng` are only consulted in
    /// synthetic mode.
    pub fn build(&self, bounds: Bounds, rng: &mut SimRng) -> SpatialResult<SiteRegistry> {
        match self {
            SiteSource::File { path, projection } => load_sites_csv(path, projection.as_ref()),
            SiteSource::Synthetic { count } => Ok(generate_synthetic(*count, bounds, rng)),
        }
    }
}

/// Generate `count` sites with ids `"0"`, `"1"`, … at uniformly random
/// integer coordinates within `bounds`.
///
/// The bounds are shrunk to the integers they contain (`ceil` of the minimum,
/// `floor` of the maximum) so every site lies inside the box; both ends are
/// inclusive.  A box too thin to contain an integer collapses onto its
/// rounded-up minimum.
pub fn generate_synthetic(count: usize, bounds: Bounds, rng: &mut SimRng) -> SiteRegistry {
    let (x_min, x_max) = int_range(bounds.min.x, bounds.max.x);
    let (y_min, y_max) = int_range(bounds.min.y, bounds.max.y);

    let mut builder = SiteRegistryBuilder::with_capacity(count);
    for i in 0..count {
        let x = rng.gen_range(x_min..=x_max);
        let y = rng.gen_range(y_min..=y_max);
        let pos = Point2::new(x as f64, y as f64);
        log::debug!("synthetic site {i} at {pos}");
        // Ids are sequential, so they can never collide.
        let _ = builder.add_site(i.to_string(), pos);
    }

    log::info!(
        "generated {count} synthetic sites in x {x_min}..={x_max}, y {y_min}..={y_max}"
    );
    builder.build()
}

fn int_range(lo: f64, hi: f64) -> (i64, i64) {
    let lo = lo.ceil() as i64;
    let hi = hi.floor() as i64;
    (lo, hi.max(lo))
}
