use crate::error::Result;
use crate::geometry::surface::{unit, Surface};
use crate::math::{Point3, Vector3};

use super::{Curve, CurveDomain};

/// Which surface parameter an [`IsoCurve`] runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsoDirection {
    /// `v` is held fixed; the curve parameter is `u`.
    AlongU,
    /// `u` is held fixed; the curve parameter is `v`.
    AlongV,
}

/// A curve traced on a surface by holding one parameter fixed.
#[derive(Debug, Clone)]
pub struct IsoCurve<S> {
    surface: S,
    direction: IsoDirection,
    fixed: f64,
    domain: CurveDomain,
}

impl<S: Surface> IsoCurve<S> {
    /// Creates an isocurve over `domain` of the varying parameter.
    #[must_use]
    pub fn new(surface: S, direction: IsoDirection, fixed: f64, domain: CurveDomain) -> Self {
        Self {
            surface,
            direction,
            fixed,
            domain,
        }
    }

    /// The direction the curve runs along.
    #[must_use]
    pub fn direction(&self) -> IsoDirection {
        self.direction
    }

    /// The value of the parameter held fixed.
    #[must_use]
    pub fn fixed(&self) -> f64 {
        self.fixed
    }

    fn uv(&self, t: f64) -> (f64, f64) {
        match self.direction {
            IsoDirection::AlongU => (t, self.fixed),
            IsoDirection::AlongV => (self.fixed, t),
        }
    }
}

impl<S: Surface> Curve for IsoCurve<S> {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let (u, v) = self.uv(t);
        self.surface.evaluate(u, v)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let (u, v) = self.uv(t);
        let (su, sv) = self.surface.partials(u, v)?;
        let derivative = match self.direction {
            IsoDirection::AlongU => su,
            IsoDirection::AlongV => sv,
        };
        let sign = if self.domain.t_max >= self.domain.t_min { 1.0 } else { -1.0 };
        unit(derivative * sign)
    }

    fn domain(&self) -> CurveDomain {
        self.domain
    }

    fn is_closed(&self) -> bool {
        match (self.evaluate(self.domain.t_min), self.evaluate(self.domain.t_max)) {
            (Ok(a), Ok(b)) => (a - b).norm() < crate::math::TOLERANCE,
            _ => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::surface::{Cylinder, Sphere};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn cylinder_row_is_a_circle() {
        let cyl = Cylinder::new(Point3::origin(), 2.0, Vector3::z(), Vector3::x()).unwrap();
        let iso = IsoCurve::new(cyl, IsoDirection::AlongU, 1.5, CurveDomain::new(0.0, PI));
        let p = iso.evaluate(FRAC_PI_2).unwrap();
        assert!((p - Point3::new(0.0, 2.0, 1.5)).norm() < 1e-12);
        let t = iso.tangent(0.0).unwrap();
        assert!((t - Vector3::y()).norm() < 1e-12);
        assert!(!iso.is_closed());
    }

    #[test]
    fn cylinder_column_is_straight_up() {
        let cyl = Cylinder::new(Point3::origin(), 2.0, Vector3::z(), Vector3::x()).unwrap();
        let iso = IsoCurve::new(cyl, IsoDirection::AlongV, 0.0, CurveDomain::new(0.0, 4.0));
        assert!((iso.tangent(2.0).unwrap() - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn sphere_parallel_at_pole_has_no_tangent() {
        let sph = Sphere::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x()).unwrap();
        let iso = IsoCurve::new(sph, IsoDirection::AlongU, FRAC_PI_2, CurveDomain::new(0.0, PI));
        assert!(iso.tangent(0.5).is_err());
    }
}
