//! Core geometry types for site offset maps
//!
//! Everything here lives in data space, the output space of placement.

use crate::dataset::UnitKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A 2D point in data space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Nested `shot -> seq -> T`. BTreeMap ordering gives rings sorted by ascending seq.
pub type ShotMap<T> = BTreeMap<i32, BTreeMap<i32, T>>;

/// Anything with a plotted position
pub trait PlottedPoint {
    fn position(&self) -> MapPoint;
}

/// Placed design coordinate of one site
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TheoryPoint {
    pub site: i64,
    /// Raw design coordinate as measured (last row wins)
    pub raw: MapPoint,
    pub position: MapPoint,
}

/// Theory placement of a site plus one unit's scaled offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActualPoint {
    pub site: i64,
    /// Unscaled offset as read from the parameters (absent axes are 0)
    pub offset: MapPoint,
    pub position: MapPoint,
    pub out_of_spec: bool,
}

/// Theory placement of a site plus its offset averaged over all units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanPoint {
    pub site: i64,
    /// Arithmetic mean of the unscaled offsets
    pub offset: MapPoint,
    /// Number of units contributing to the mean
    pub units: usize,
    pub position: MapPoint,
    pub out_of_spec: bool,
}

impl PlottedPoint for TheoryPoint {
    fn position(&self) -> MapPoint {
        self.position
    }
}

impl PlottedPoint for ActualPoint {
    fn position(&self) -> MapPoint {
        self.position
    }
}

impl PlottedPoint for MeanPoint {
    fn position(&self) -> MapPoint {
        self.position
    }
}

/// Which family a plotted point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    Theory,
    Actual,
    Mean,
}

/// Payload returned by spatial queries, one per plotted point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointMetadata {
    pub kind: PointKind,
    pub shot: i32,
    pub seq: i32,
    pub site: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<UnitKey>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub out_of_spec: bool,
}

/// Closed ring: points in ascending seq order with the first point repeated at the end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    pub points: Vec<MapPoint>,
}

impl Polygon {
    /// Closes the ring, or `None` when fewer than two points are given
    pub fn close<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = MapPoint>,
    {
        let mut points: Vec<MapPoint> = points.into_iter().collect();
        if points.len() < 2 {
            return None;
        }
        points.push(points[0]);
        Some(Self { points })
    }

    /// Builds the ring for one shot, already ordered by seq
    pub fn from_ring<T: PlottedPoint>(ring: &BTreeMap<i32, T>) -> Option<Self> {
        Self::close(ring.values().map(PlottedPoint::position))
    }

    /// Number of distinct vertices (excludes the closing repeat)
    pub fn vertex_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// Axis-aligned bounding box in data space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: max_x.max(min_x),
            max_y: max_y.max(min_y),
        }
    }

    /// Smallest box holding every point, `None` for an empty set
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = MapPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first.x, first.y, first.x, first.y);
        for p in iter {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> MapPoint {
        MapPoint::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }
}
