//! A wrapper around [`nalgebra::Matrix`] interpreting it as a bezier curve.

use nalgebra::dimension::{U2, U4};
use nalgebra::{Matrix, Matrix2x4, Owned, RealField, Storage, Vector2};

use crate::geodesy::LonLat;

/// Wrapper around [`nalgebra::Matrix`] interpreting it as a bezier curve.
///
/// The curve's control points are stored as the matrix' columns.
pub struct BezierCurve<T, R, C, S>(pub Matrix<T, R, C, S>);

/// Wrapper around [`nalgebra::OMatrix`] interpreting it as a bezier curve.
pub type OBezierCurve<T, R, C> = BezierCurve<T, R, C, Owned<T, R, C>>;

/// Stack allocated planar cubic curve, the only kind the overlay builds
pub type CubicCurve = OBezierCurve<f64, U2, U4>;

impl<T: RealField, S: Storage<T, U2, U4>> BezierCurve<T, U2, U4, S> {
    /// Get the point on a cubic curve at position `t` using the bernstein blend
    ///
    /// `B(t) = (1-t)³p0 + 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³p3`, per component.
    ///
    /// `t = 0` yields `p0` and `t = 1` yields `p3` exactly.
    /// Values outside `[0, 1]` are not rejected and extrapolate the curve.
    pub fn bernstein_eval(&self, t: T) -> Vector2<T> {
        let three = T::one() + T::one() + T::one();
        let u = T::one() - t.clone();
        let tt = t.clone() * t.clone();
        let uu = u.clone() * u.clone();

        let b0 = uu.clone() * u.clone();
        let b1 = three.clone() * uu * t.clone();
        let b2 = three * u * tt.clone();
        let b3 = tt * t;

        self.0.column(0) * b0
            + self.0.column(1) * b1
            + self.0.column(2) * b2
            + self.0.column(3) * b3
    }
}

impl CubicCurve {
    /// Builds a cubic curve from its four control points
    pub fn cubic(p0: LonLat, p1: LonLat, p2: LonLat, p3: LonLat) -> CubicCurve {
        BezierCurve(Matrix2x4::from_columns(&[
            p0.to_vector(),
            p1.to_vector(),
            p2.to_vector(),
            p3.to_vector(),
        ]))
    }

    /// Evaluates the curve at `steps + 1` evenly spaced parameters from `0` to `1` inclusive.
    ///
    /// A `steps` of zero is treated as one.
    pub fn sample(&self, steps: usize) -> Vec<LonLat> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| LonLat::from(self.bernstein_eval(i as f64 / steps as f64)))
            .collect()
    }
}

/// Point at `t` on the cubic curve through the four given control points.
///
/// ```
/// use geocurve::bezier::cubic_point;
/// use geocurve::geodesy::LonLat;
///
/// let [p0, p1, p2, p3] = [LonLat(0.0, 0.0), LonLat(0.0, 1.0), LonLat(1.0, 1.0), LonLat(1.0, 0.0)];
/// assert_eq!(cubic_point(p0, p1, p2, p3, 0.0), p0);
/// assert_eq!(cubic_point(p0, p1, p2, p3, 0.5), LonLat(0.5, 0.75));
/// assert_eq!(cubic_point(p0, p1, p2, p3, 1.0), p3);
/// ```
pub fn cubic_point(p0: LonLat, p1: LonLat, p2: LonLat, p3: LonLat, t: f64) -> LonLat {
    LonLat::from(CubicCurve::cubic(p0, p1, p2, p3).bernstein_eval(t))
}
