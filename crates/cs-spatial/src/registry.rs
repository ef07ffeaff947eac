//! Site registry and builder.
//!
//! # Data layout
//!
//! Sites are stored in a `Vec<Site>` in registration order.  That order is
//! the iteration order seen by [`LinearScan`](crate::LinearScan), which makes
//! its tie-break (first registered site wins) deterministic.  A `HashMap`
//! gives O(1) id lookup for the tracker's hysteresis check.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over the same sites backs
//! [`SpatialIndex`](crate::SpatialIndex) for registries too large to scan at
//! every check step.
//!
//! The registry is immutable once built; the only way in is
//! [`SiteRegistryBuilder`].

use std::collections::HashMap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cs_core::{Bounds, Point2, SiteId};

use crate::{SpatialError, SpatialResult};

// ── Site ──────────────────────────────────────────────────────────────────────

/// A fixed coverage source.
#[derive(Clone, Debug, PartialEq)]
pub struct Site {
    pub id:  SiteId,
    pub pos: Point2,
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: the site's `[x, y]` and its index in
/// `SiteRegistry::sites`.
#[derive(Clone, Debug)]
struct SiteEntry {
    point: [f64; 2],
    index: usize,
}

impl RTreeObject for SiteEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SiteEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── SiteRegistry ──────────────────────────────────────────────────────────────

/// Immutable mapping from site id to fixed planar position.
#[derive(Debug)]
pub struct SiteRegistry {
    sites:       Vec<Site>,
    by_id:       HashMap<SiteId, usize>,
    spatial_idx: RTree<SiteEntry>,
}

impl SiteRegistry {
    /// A registry with no sites.  Every resolution against it yields "no site".
    pub fn empty() -> Self {
        SiteRegistryBuilder::new().build()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// All sites in registration order.
    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Site> {
        self.sites.iter()
    }

    /// Look up a site by id.
    #[inline]
    pub fn get(&self, id: &str) -> Option<&Site> {
        self.by_id.get(id).map(|&i| &self.sites[i])
    }

    /// Position of site `id`, if registered.
    #[inline]
    pub fn position(&self, id: &str) -> Option<Point2> {
        self.get(id).map(|s| s.pos)
    }

    /// Bounding box of all site positions (`None` when empty).
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.sites.iter().map(|s| s.pos))
    }

    /// Nearest site according to the R-tree, with its distance.
    pub(crate) fn nearest_indexed(&self, pos: Point2) -> Option<(&Site, f64)> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.y])
            .map(|e| {
                let site = &self.sites[e.index];
                (site, site.pos.distance(pos))
            })
    }
}

impl<'a> IntoIterator for &'a SiteRegistry {
    type Item = &'a Site;
    type IntoIter = std::slice::Iter<'a, Site>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}

// ── SiteRegistryBuilder ───────────────────────────────────────────────────────

/// Construct a [`SiteRegistry`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use cs_core::Point2;
/// use cs_spatial::SiteRegistryBuilder;
///
/// let mut b = SiteRegistryBuilder::new();
/// b.add_site("north", Point2::new(0.0, 1_000.0)).unwrap();
/// b.add_site("south", Point2::new(0.0, -1_000.0)).unwrap();
/// assert!(b.add_site("north", Point2::new(5.0, 5.0)).is_err());
/// let reg = b.build();
/// assert_eq!(reg.len(), 2);
/// ```
pub struct SiteRegistryBuilder {
    sites: Vec<Site>,
    by_id: HashMap<SiteId, usize>,
}

impl SiteRegistryBuilder {
    pub fn new() -> Self {
        Self { sites: Vec::new(), by_id: HashMap::new() }
    }

    pub fn with_capacity(sites: usize) -> Self {
        Self {
            sites: Vec::with_capacity(sites),
            by_id: HashMap::with_capacity(sites),
        }
    }

    /// Register a site and return its registration index.
    ///
    /// Fails with [`SpatialError::DuplicateSite`] if `id` is already present.
    pub fn add_site(&mut self, id: impl Into<SiteId>, pos: Point2) -> SpatialResult<usize> {
        let id = id.into();
        if self.by_id.contains_key(&id) {
            return Err(SpatialError::DuplicateSite(id));
        }
        let index = self.sites.len();
        self.by_id.insert(id.clone(), index);
        self.sites.push(Site { id, pos });
        Ok(index)
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Consume the builder and bulk-load the R-tree.
    pub fn build(self) -> SiteRegistry {
        let entries: Vec<SiteEntry> = self
            .sites
            .iter()
            .enumerate()
            .map(|(index, s)| SiteEntry { point: [s.pos.x, s.pos.y], index })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        SiteRegistry {
            sites: self.sites,
            by_id: self.by_id,
            spatial_idx,
        }
    }
}

impl Default for SiteRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
