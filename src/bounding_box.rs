//! Axis aligned boxes around planar points.

use nalgebra::{Scalar, Vector2};

/// Axis aligned bounding box spanned by its minimal and maximal corner
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox<K: Scalar> {
    /// Corner with the smallest coordinates
    pub min: Vector2<K>,
    /// Corner with the largest coordinates
    pub max: Vector2<K>,
}

impl<T: Scalar + PartialOrd + Copy> BoundingBox<T> {
    /// Smallest box containing every point, `None` if there are no points
    pub fn from_iter<Iter: IntoIterator<Item = Vector2<T>>>(points: Iter) -> Option<BoundingBox<T>> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bb = BoundingBox {
            min: first,
            max: first,
        };
        for p in points {
            bb.extend(p);
        }
        Some(bb)
    }

    /// Grows the box until it contains `p`
    pub fn extend(&mut self, p: Vector2<T>) {
        if self.min.x > p.x {
            self.min.x = p.x;
        }
        if self.min.y > p.y {
            self.min.y = p.y;
        }
        if self.max.x < p.x {
            self.max.x = p.x;
        }
        if self.max.y < p.y {
            self.max.y = p.y;
        }
    }

    /// Checks whether `p` lies inside the box or on its border
    pub fn contains(&self, p: Vector2<T>) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }
}

impl BoundingBox<f64> {
    /// Width and height of the box
    pub fn size(&self) -> Vector2<f64> {
        self.max - self.min
    }

    /// Returns a box grown by `ratio` of its larger side on every edge.
    ///
    /// Degenerate boxes (a single point) are grown by `ratio` units instead.
    pub fn padded(&self, ratio: f64) -> BoundingBox<f64> {
        let size = self.size();
        let side = size.x.max(size.y);
        let margin = if side > 0.0 { side * ratio } else { ratio };
        let margin = Vector2::new(margin, margin);
        BoundingBox {
            min: self.min - margin,
            max: self.max + margin,
        }
    }
}

impl<K: Scalar> From<[Vector2<K>; 2]> for BoundingBox<K> {
    fn from(array: [Vector2<K>; 2]) -> Self {
        let [min, max] = array;
        BoundingBox { min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_all_points() {
        let bb = BoundingBox::from_iter([
            Vector2::new(1.0, 5.0),
            Vector2::new(-2.0, 3.0),
            Vector2::new(4.0, -1.0),
        ])
        .unwrap();
        assert_eq!(bb.min, Vector2::new(-2.0, -1.0));
        assert_eq!(bb.max, Vector2::new(4.0, 5.0));
        assert!(bb.contains(Vector2::new(0.0, 0.0)));
        assert!(!bb.contains(Vector2::new(5.0, 0.0)));
    }

    #[test]
    fn empty_has_no_box() {
        assert!(BoundingBox::<f64>::from_iter(Vec::new()).is_none());
    }

    #[test]
    fn padding() {
        let bb = BoundingBox::from([Vector2::new(0.0, 0.0), Vector2::new(10.0, 4.0)]).padded(0.1);
        assert_eq!(bb.min, Vector2::new(-1.0, -1.0));
        assert_eq!(bb.max, Vector2::new(11.0, 5.0));

        let point = BoundingBox::from([Vector2::new(2.0, 2.0), Vector2::new(2.0, 2.0)]).padded(0.5);
        assert_eq!(point.size(), Vector2::new(1.0, 1.0));
    }
}
