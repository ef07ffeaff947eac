//! Planar and geographic coordinate types.
//!
//! The tracker works exclusively in the simulation's **planar** coordinate
//! system (`Point2`, metres).  Geographic coordinates (`GeoPoint`) only appear
//! when site lists are read from real-world records, and are converted once
//! at setup through a [`Projection`].

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Mean Earth radius, metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

// ── Point2 ────────────────────────────────────────────────────────────────────

/// A position in the simulation's planar coordinate system.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean planar distance.
    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        self.distance_2(other).sqrt()
    }

    /// Squared Euclidean distance.  Cheaper than [`distance`](Self::distance)
    /// when only comparisons are needed.
    #[inline]
    pub fn distance_2(self, other: Point2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box of the simulated network.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Point2,
    pub max: Point2,
}

impl Bounds {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn enclosing<I: IntoIterator<Item = Point2>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Bounds::new(first, first);
        for p in iter {
            b.min.x = b.min.x.min(p.x);
            b.min.y = b.min.y.min(p.y);
            b.max.x = b.max.x.max(p.x);
            b.max.y = b.max.y.max(p.y);
        }
        Some(b)
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Parses `"lat,lon"` (whitespace around either number is ignored).
impl FromStr for GeoPoint {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| CoreError::Parse(format!("expected \"lat,lon\", got {s:?}")))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| CoreError::Parse(format!("invalid latitude {lat:?}")))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| CoreError::Parse(format!("invalid longitude {lon:?}")))?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(CoreError::Parse(format!("coordinate out of range: {s:?}")));
        }
        Ok(GeoPoint::new(lat, lon))
    }
}

// ── Projection ────────────────────────────────────────────────────────────────

/// Converts geographic coordinates into the simulation's planar system.
///
/// The real conversion belongs to whatever produced the simulated network;
/// callers supply an implementation alongside any file-based site list.
pub trait Projection {
    fn to_planar(&self, geo: GeoPoint) -> Point2;
}

impl<F: Fn(GeoPoint) -> Point2> Projection for F {
    fn to_planar(&self, geo: GeoPoint) -> Point2 {
        self(geo)
    }
}

/// Local equirectangular projection around a reference point.
///
/// `origin` maps to `offset`; x grows east, y grows north.  Accurate to well
/// under 1 % across a city-sized network, which is the scale the planar
/// network coordinates are meant for.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquirectangularProjection {
    pub origin: GeoPoint,
    pub offset: Point2,
}

impl EquirectangularProjection {
    pub fn new(origin: GeoPoint) -> Self {
        Self { origin, offset: Point2::default() }
    }

    pub fn with_offset(mut self, offset: Point2) -> Self {
        self.offset = offset;
        self
    }
}

impl Projection for EquirectangularProjection {
    fn to_planar(&self, geo: GeoPoint) -> Point2 {
        let cos_lat0 = self.origin.lat.to_radians().cos();
        let x = (geo.lon - self.origin.lon).to_radians() * cos_lat0 * EARTH_RADIUS_M;
        let y = (geo.lat - self.origin.lat).to_radians() * EARTH_RADIUS_M;
        Point2::new(self.offset.x + x, self.offset.y + y)
    }
}
