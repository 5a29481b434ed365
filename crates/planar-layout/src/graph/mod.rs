use indexmap::IndexMap;
use nalgebra as na;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (na::Vector2::from(*self) - na::Vector2::from(*other)).norm()
    }
}

impl From<na::Vector2<f64>> for Point {
    fn from(v: na::Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point> for na::Vector2<f64> {
    fn from(p: Point) -> Self {
        na::Vector2::new(p.x, p.y)
    }
}

/// Axis-aligned bounding box of a layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Positions keyed by node id, in graph node order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult<K>
where
    K: Clone + Eq + Hash,
{
    pub positions: IndexMap<K, Point>,
}

impl<K> LayoutResult<K>
where
    K: Clone + Eq + Hash,
{
    pub fn get(&self, id: &K) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Point)> {
        self.positions.iter()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut it = self.positions.values();
        let first = *it.next()?;
        let mut b = Bounds {
            min: first,
            max: first,
        };
        for p in it {
            b.min.x = b.min.x.min(p.x);
            b.min.y = b.min.y.min(p.y);
            b.max.x = b.max.x.max(p.x);
            b.max.y = b.max.y.max(p.y);
        }
        Some(b)
    }
}

/// How a relaxation run ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Iterations actually performed.
    pub iterations: usize,
    /// `true` when the movement threshold stopped the run before the iteration cap.
    pub converged: bool,
}

#[cfg(test)]
mod tests {
    use super::{LayoutResult, Point};
    use indexmap::IndexMap;

    #[test]
    fn bounds_cover_every_position() {
        let mut positions = IndexMap::new();
        positions.insert("a", Point::new(-1.0, 0.5));
        positions.insert("b", Point::new(2.0, -3.0));
        positions.insert("c", Point::new(0.0, 1.0));
        let layout = LayoutResult { positions };

        let b = layout.bounds().unwrap();
        assert_eq!(b.min, Point::new(-1.0, -3.0));
        assert_eq!(b.max, Point::new(2.0, 1.0));
        assert_eq!(b.width(), 3.0);
        assert_eq!(b.height(), 4.0);
    }

    #[test]
    fn empty_layout_has_no_bounds() {
        let layout: LayoutResult<u32> = LayoutResult {
            positions: IndexMap::new(),
        };
        assert!(layout.bounds().is_none());
        assert!(layout.is_empty());
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Point::new(0.0, 0.0).distance(&Point::new(3.0, 4.0)), 5.0);
    }
}
