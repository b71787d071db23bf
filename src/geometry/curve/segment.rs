use crate::error::Result;
use crate::geometry::surface::unit;
use crate::math::{Point3, Vector3};

use super::{Curve, CurveDomain};

/// A bounded straight segment parameterized by arc length on `[0, length]`.
///
/// Zero-length segments are representable; their tangent is undefined, so
/// any frame-based operation on them fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    start: Point3,
    end: Point3,
}

impl Segment {
    /// Creates a segment between two points.
    #[must_use]
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

impl Curve for Segment {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let length = self.length();
        if length == 0.0 {
            return Ok(self.start);
        }
        Ok(self.start + (self.end - self.start) * (t / length))
    }

    fn tangent(&self, _t: f64) -> Result<Vector3> {
        unit(self.end - self.start)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.length())
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn is_straight(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn evaluates_endpoints() {
        let s = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0));
        assert!((s.length() - 5.0).abs() < TOLERANCE);
        let d = s.domain();
        assert!((s.evaluate(d.t_max).unwrap() - Point3::new(3.0, 4.0, 0.0)).norm() < TOLERANCE);
        assert!((s.evaluate(2.5).unwrap() - Point3::new(1.5, 2.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn zero_length_has_no_tangent() {
        let s = Segment::new(Point3::origin(), Point3::origin());
        assert!(s.tangent(0.0).is_err());
        assert!(s.evaluate(0.0).is_ok());
    }
}
