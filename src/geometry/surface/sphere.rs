use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{unit, Surface, SurfaceDomain};

/// A spherical surface in 3D space.
///
/// `P(u, v) = center + r * cos(v) * (cos(u) * ref_dir + sin(u) * binormal) + r * sin(v) * axis`
/// where `binormal = axis x ref_dir`.
///
/// Parameters: `u` = longitude `[0, 2*pi)`, `v` = latitude `[-pi/2, pi/2]`.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    axis: Vector3,
    ref_dir: Vector3,
}

impl Sphere {
    /// Creates a new sphere.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, axis is zero-length,
    /// or the reference direction is not perpendicular to the axis.
    pub fn new(center: Point3, radius: f64, axis: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("sphere radius must be positive".into()).into(),
            );
        }
        let axis = unit(axis)?;
        let ref_dir = unit(ref_dir)?;
        if axis.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to axis".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            axis,
            ref_dir,
        })
    }

    /// Returns the center of the sphere.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the axis direction (north pole, unit vector).
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    /// Returns the reference direction (u=0 on the equator).
    #[must_use]
    pub fn ref_dir(&self) -> &Vector3 {
        &self.ref_dir
    }

    fn binormal(&self) -> Vector3 {
        self.axis.cross(&self.ref_dir)
    }

    fn radial(&self, u: f64, v: f64) -> Vector3 {
        let (su, cu) = u.sin_cos();
        let (sv, cv) = v.sin_cos();
        self.ref_dir * (cv * cu) + self.binormal() * (cv * su) + self.axis * sv
    }

    /// Returns a copy uniformly scaled by `factor` about `pivot`.
    #[must_use]
    pub fn scaled_about(&self, pivot: &Point3, factor: f64) -> Self {
        Self {
            center: pivot + (self.center - pivot) * factor,
            radius: self.radius * factor,
            ..self.clone()
        }
    }
}

impl Surface for Sphere {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.center + self.radial(u, v) * self.radius)
    }

    fn normal(&self, u: f64, v: f64) -> Result<Vector3> {
        unit(self.radial(u, v))
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, TAU, -FRAC_PI_2, FRAC_PI_2)
    }

    /// `u` = longitude in `(-pi, pi]`, `v` = latitude in `[-pi/2, pi/2]`.
    fn inverse(&self, point: &Point3) -> (f64, f64) {
        let dp = (point - self.center) / self.radius;
        let v = dp.dot(&self.axis).clamp(-1.0, 1.0).asin();
        let u = dp.dot(&self.binormal()).atan2(dp.dot(&self.ref_dir));
        (u, v)
    }

    fn is_u_periodic(&self) -> bool {
        true
    }

    fn partials(&self, u: f64, v: f64) -> Result<(Vector3, Vector3)> {
        let (su, cu) = u.sin_cos();
        let (sv, cv) = v.sin_cos();
        let b = self.binormal();
        let du = (self.ref_dir * (-cv * su) + b * (cv * cu)) * self.radius;
        let dv = (self.ref_dir * (-sv * cu) + b * (-sv * su) + self.axis * cv) * self.radius;
        Ok((du, dv))
    }
}
