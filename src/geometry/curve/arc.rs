use crate::error::{GeometryError, Result};
use crate::geometry::surface::unit;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A circular arc in 3D space.
///
/// Defined by a center, radius, normal axis, and a reference direction
/// for the zero angle. The parameter is the angle in radians, running
/// from `start_angle` to `end_angle` around the normal axis.
#[derive(Debug, Clone)]
pub struct Arc {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
    start_angle: f64,
    end_angle: f64,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, the normal is zero-length,
    /// or the reference direction is not perpendicular to the normal.
    pub fn new(
        center: Point3,
        radius: f64,
        normal: Vector3,
        ref_dir: Vector3,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        let normal = unit(normal)?;
        let ref_dir = unit(ref_dir)?;
        if normal.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to normal".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
            start_angle,
            end_angle,
        })
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the normal vector of the arc plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    fn binormal(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }

    /// Returns a copy uniformly scaled by `factor` about `pivot`.
    ///
    /// Angles are unchanged, so edge parameters stay valid.
    #[must_use]
    pub fn scaled_about(&self, pivot: &Point3, factor: f64) -> Self {
        Self {
            center: pivot + (self.center - pivot) * factor,
            radius: self.radius * factor,
            ..self.clone()
        }
    }
}

impl Curve for Arc {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let (s, c) = t.sin_cos();
        Ok(self.center + self.ref_dir * (self.radius * c) + self.binormal() * (self.radius * s))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let (s, c) = t.sin_cos();
        let direction = if self.end_angle >= self.start_angle { 1.0 } else { -1.0 };
        unit((self.ref_dir * -s + self.binormal() * c) * direction)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.start_angle, self.end_angle)
    }

    fn is_closed(&self) -> bool {
        ((self.end_angle - self.start_angle).abs() - std::f64::consts::TAU).abs() < TOLERANCE
    }
}
