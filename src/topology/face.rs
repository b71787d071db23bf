use crate::error::Result;
use crate::geometry::surface::{Cylinder, Plane, Sphere, Surface, SurfaceDomain};
use crate::math::{Point3, Vector3};

use super::wire::WireId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// The geometric surface associated with a face.
#[derive(Debug, Clone)]
pub enum FaceSurface {
    /// A planar surface.
    Plane(Plane),
    /// A cylindrical surface.
    Cylinder(Cylinder),
    /// A spherical surface.
    Sphere(Sphere),
}

impl FaceSurface {
    fn as_surface(&self) -> &dyn Surface {
        match self {
            Self::Plane(s) => s,
            Self::Cylinder(s) => s,
            Self::Sphere(s) => s,
        }
    }

    /// Returns `true` for planar faces.
    #[must_use]
    pub fn is_planar(&self) -> bool {
        matches!(self, Self::Plane(_))
    }

    /// Returns a copy uniformly scaled by `factor` about `pivot`.
    #[must_use]
    pub fn scaled_about(&self, pivot: &Point3, factor: f64) -> Self {
        match self {
            Self::Plane(s) => Self::Plane(s.scaled_about(pivot, factor)),
            Self::Cylinder(s) => Self::Cylinder(s.scaled_about(pivot, factor)),
            Self::Sphere(s) => Self::Sphere(s.scaled_about(pivot, factor)),
        }
    }

    /// Maps a parameter box through a uniform scale of this surface.
    ///
    /// Length-valued parameters grow with `factor`; angles do not.
    #[must_use]
    pub fn scaled_domain(&self, domain: &SurfaceDomain, factor: f64) -> SurfaceDomain {
        match self {
            Self::Plane(_) => SurfaceDomain::new(
                domain.u_min * factor,
                domain.u_max * factor,
                domain.v_min * factor,
                domain.v_max * factor,
            ),
            Self::Cylinder(_) => SurfaceDomain::new(
                domain.u_min,
                domain.u_max,
                domain.v_min * factor,
                domain.v_max * factor,
            ),
            Self::Sphere(_) => *domain,
        }
    }
}

impl Surface for FaceSurface {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        self.as_surface().evaluate(u, v)
    }

    fn normal(&self, u: f64, v: f64) -> Result<Vector3> {
        self.as_surface().normal(u, v)
    }

    fn domain(&self) -> SurfaceDomain {
        self.as_surface().domain()
    }

    fn inverse(&self, point: &Point3) -> (f64, f64) {
        self.as_surface().inverse(point)
    }

    fn is_u_periodic(&self) -> bool {
        self.as_surface().is_u_periodic()
    }

    fn partials(&self, u: f64, v: f64) -> Result<(Vector3, Vector3)> {
        self.as_surface().partials(u, v)
    }
}

/// Data associated with a topological face.
///
/// A face is a bounded region on a surface, defined by an outer wire
/// and optionally inner wires (holes).
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The geometric surface on which this face lies.
    pub surface: FaceSurface,
    /// The outer boundary wire.
    pub outer_wire: WireId,
    /// Inner boundary wires (holes).
    pub inner_wires: Vec<WireId>,
    /// If `true`, the face normal agrees with the surface normal.
    pub same_sense: bool,
    /// Parametric trim box, when known exactly at creation.
    ///
    /// Faces without one derive their domain from the boundary.
    pub uv_bounds: Option<SurfaceDomain>,
}

impl FaceData {
    /// A face with no holes whose normal agrees with its surface.
    #[must_use]
    pub fn bounded_by(surface: FaceSurface, outer_wire: WireId) -> Self {
        Self {
            surface,
            outer_wire,
            inner_wires: Vec::new(),
            same_sense: true,
            uv_bounds: None,
        }
    }

    /// Records the exact parametric trim box of the face.
    #[must_use]
    pub fn with_uv_bounds(mut self, bounds: SurfaceDomain) -> Self {
        self.uv_bounds = Some(bounds);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn delegates_to_cylinder() {
        let cyl = Cylinder::new(Point3::origin(), 3.0, Vector3::z(), Vector3::x()).unwrap();
        let surface = FaceSurface::Cylinder(cyl);
        assert!(surface.is_u_periodic());
        assert!(!surface.is_planar());
        let p = surface.evaluate(FRAC_PI_2, 1.0).unwrap();
        assert!((p - Point3::new(0.0, 3.0, 1.0)).norm() < 1e-12);
        assert!((surface.area_element(0.3, 0.0).unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn scaling_preserves_variant() {
        let sph = Sphere::new(Point3::new(1.0, 0.0, 0.0), 1.0, Vector3::z(), Vector3::x()).unwrap();
        let scaled = FaceSurface::Sphere(sph).scaled_about(&Point3::origin(), 2.0);
        match scaled {
            FaceSurface::Sphere(s) => {
                assert!((s.radius() - 2.0).abs() < 1e-12);
                assert!((s.center() - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-12);
            }
            other => panic!("expected sphere, got {other:?}"),
        }
    }
}
