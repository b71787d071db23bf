mod cylinder;
mod plane;
mod sphere;

pub use cylinder::Cylinder;
pub use plane::Plane;
pub use sphere::Sphere;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Step used for central-difference partial derivatives.
const DIFF_STEP: f64 = 1e-6;

/// Parameter domain for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDomain {
    /// Start of the U parameter range.
    pub u_min: f64,
    /// End of the U parameter range.
    pub u_max: f64,
    /// Start of the V parameter range.
    pub v_min: f64,
    /// End of the V parameter range.
    pub v_max: f64,
}

impl SurfaceDomain {
    /// Creates a new surface domain.
    #[must_use]
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }

    /// Returns `true` when all four bounds are finite.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.u_min.is_finite()
            && self.u_max.is_finite()
            && self.v_min.is_finite()
            && self.v_max.is_finite()
    }

    /// The `i`-th of `n + 1` evenly spaced U parameters, endpoints included.
    #[must_use]
    pub fn u_at(&self, i: usize, n: usize) -> f64 {
        even_step(self.u_min, self.u_max, i, n)
    }

    /// The `j`-th of `n + 1` evenly spaced V parameters, endpoints included.
    #[must_use]
    pub fn v_at(&self, j: usize, n: usize) -> f64 {
        even_step(self.v_min, self.v_max, j, n)
    }
}

/// `start + i/n * (end - start)`, exact at both ends.
#[must_use]
pub(crate) fn even_step(start: f64, end: f64, i: usize, n: usize) -> f64 {
    if i == 0 || n == 0 {
        return start;
    }
    if i == n {
        return end;
    }
    #[allow(clippy::cast_precision_loss)]
    let frac = i as f64 / n as f64;
    start + frac * (end - start)
}

/// Trait for parametric surfaces in 3D space.
pub trait Surface {
    /// Evaluates the surface at parameters `(u, v)`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range or evaluation fails.
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3>;

    /// Computes the surface normal at parameters `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range or the normal is degenerate.
    fn normal(&self, u: f64, v: f64) -> Result<Vector3>;

    /// Returns the natural parameter domain of the surface.
    fn domain(&self) -> SurfaceDomain;

    /// Maps a point lying on the surface back to its `(u, v)` parameters.
    fn inverse(&self, point: &Point3) -> (f64, f64);

    /// Whether U wraps around (angular parameter).
    fn is_u_periodic(&self) -> bool {
        false
    }

    /// First partial derivatives `(dS/du, dS/dv)` at `(u, v)`.
    ///
    /// The default uses central differences.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn partials(&self, u: f64, v: f64) -> Result<(Vector3, Vector3)> {
        let su = (self.evaluate(u + DIFF_STEP, v)? - self.evaluate(u - DIFF_STEP, v)?)
            / (2.0 * DIFF_STEP);
        let sv = (self.evaluate(u, v + DIFF_STEP)? - self.evaluate(u, v - DIFF_STEP)?)
            / (2.0 * DIFF_STEP);
        Ok((su, sv))
    }

    /// Area element `|dS/du x dS/dv|` at `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the partials cannot be evaluated.
    fn area_element(&self, u: f64, v: f64) -> Result<f64> {
        let (su, sv) = self.partials(u, v)?;
        let area = su.cross(&sv).norm();
        if area.is_finite() {
            Ok(area)
        } else {
            Err(GeometryError::Degenerate("non-finite area element".into()).into())
        }
    }
}

/// Normalizes a direction or reports [`GeometryError::ZeroVector`].
pub(crate) fn unit(v: Vector3) -> Result<Vector3> {
    let len = v.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(v / len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_step_hits_endpoints_exactly() {
        assert_eq!(even_step(0.1, 0.7, 0, 3), 0.1);
        assert_eq!(even_step(0.1, 0.7, 3, 3), 0.7);
        assert!((even_step(0.0, 1.0, 1, 4) - 0.25).abs() < TOLERANCE);
    }

    #[test]
    fn bounded_domain() {
        assert!(SurfaceDomain::new(0.0, 1.0, 0.0, 2.0).is_bounded());
        assert!(!SurfaceDomain::new(0.0, f64::INFINITY, 0.0, 2.0).is_bounded());
    }
}
