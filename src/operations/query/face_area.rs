use crate::error::{GeometryError, Result};
use crate::geometry::surface::Surface;
use crate::math::polygon_3d::polygon_area;
use crate::tessellation::{wire_samples, TessellationParams};
use crate::topology::{FaceId, FaceSurface, TopologyStore};

use super::FaceDomain;

/// Five-point Gauss–Legendre nodes on `[-1, 1]`.
const GAUSS_NODES: [f64; 5] = [
    -0.906_179_845_938_664,
    -0.538_469_310_105_683,
    0.0,
    0.538_469_310_105_683,
    0.906_179_845_938_664,
];

/// Weights matching [`GAUSS_NODES`].
const GAUSS_WEIGHTS: [f64; 5] = [
    0.236_926_885_056_189,
    0.478_628_670_499_366,
    0.568_888_888_888_889,
    0.478_628_670_499_366,
    0.236_926_885_056_189,
];

/// Sub-intervals per parameter direction for curved faces.
const PANELS: usize = 8;

/// Computes the area of a single face.
///
/// Planar faces use the exact polygon area of their boundary, less holes.
/// Curved faces integrate `|Su x Sv|` over their parametric domain.
pub struct FaceArea {
    face: FaceId,
    params: TessellationParams,
}

impl FaceArea {
    /// Creates a new `FaceArea` query.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self {
            face,
            params: TessellationParams::default(),
        }
    }

    /// Executes the query, returning the face area.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is missing, its domain is unbounded, or
    /// the surface cannot be evaluated.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        let face = store.face(self.face)?;
        match &face.surface {
            FaceSurface::Plane(_) => {
                let outer = polygon_area(&wire_samples(store, face.outer_wire, &self.params)?);
                let mut holes = 0.0;
                for &wire in &face.inner_wires {
                    holes += polygon_area(&wire_samples(store, wire, &self.params)?);
                }
                Ok((outer - holes).max(0.0))
            }
            surface => {
                let domain = FaceDomain::new(self.face).execute(store)?;
                if !domain.is_bounded() {
                    return Err(GeometryError::UnboundedDomain.into());
                }
                integrate(surface, domain.u_min, domain.u_max, domain.v_min, domain.v_max)
            }
        }
    }
}

/// Composite Gauss–Legendre integral of the area element.
fn integrate(surface: &FaceSurface, u0: f64, u1: f64, v0: f64, v1: f64) -> Result<f64> {
    #[allow(clippy::cast_precision_loss)]
    let (du, dv) = ((u1 - u0) / PANELS as f64, (v1 - v0) / PANELS as f64);
    let mut total = 0.0;
    for pu in 0..PANELS {
        #[allow(clippy::cast_precision_loss)]
        let u_mid = u0 + du * (pu as f64 + 0.5);
        for pv in 0..PANELS {
            #[allow(clippy::cast_precision_loss)]
            let v_mid = v0 + dv * (pv as f64 + 0.5);
            for (xi, wi) in GAUSS_NODES.iter().zip(&GAUSS_WEIGHTS) {
                for (xj, wj) in GAUSS_NODES.iter().zip(&GAUSS_WEIGHTS) {
                    let u = u_mid + 0.5 * du * xi;
                    let v = v_mid + 0.5 * dv * xj;
                    total += wi * wj * surface.area_element(u, v)?;
                }
            }
        }
    }
    Ok(total * 0.25 * du.abs() * dv.abs())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::surface::{Cylinder, Sphere, SurfaceDomain};
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::{MakeFace, MakePatch, MakeWire};
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    fn patch_face(store: &mut TopologyStore, surface: FaceSurface, domain: SurfaceDomain) -> FaceId {
        let solid = MakePatch::new(surface, domain).execute(store).unwrap();
        store.solid_faces(solid).unwrap()[0]
    }

    #[test]
    fn square_with_hole() {
        let mut store = TopologyStore::new();
        let square = |s: f64, o: f64| {
            vec![
                Point3::new(o, o, 0.0),
                Point3::new(o + s, o, 0.0),
                Point3::new(o + s, o + s, 0.0),
                Point3::new(o, o + s, 0.0),
            ]
        };
        let outer = MakeWire::new(square(10.0, 0.0), true).execute(&mut store).unwrap();
        let inner = MakeWire::new(square(2.0, 4.0), true).execute(&mut store).unwrap();
        let face = MakeFace::new(outer, vec![inner]).execute(&mut store).unwrap();
        assert_relative_eq!(FaceArea::new(face).execute(&store).unwrap(), 96.0, epsilon = 1e-9);
    }

    #[test]
    fn cylinder_patch_area_is_exact() {
        let mut store = TopologyStore::new();
        let cyl = Cylinder::new(Point3::origin(), 2.0, Vector3::z(), Vector3::x()).unwrap();
        let face = patch_face(&mut store, FaceSurface::Cylinder(cyl), SurfaceDomain::new(0.0, PI, 0.0, 3.0));
        assert_relative_eq!(FaceArea::new(face).execute(&store).unwrap(), 6.0 * PI, epsilon = 1e-8);
    }

    #[test]
    fn full_sphere_area() {
        let mut store = TopologyStore::new();
        let sph = Sphere::new(Point3::origin(), 3.0, Vector3::z(), Vector3::x()).unwrap();
        let face = patch_face(
            &mut store,
            FaceSurface::Sphere(sph),
            SurfaceDomain::new(0.0, TAU, -FRAC_PI_2, FRAC_PI_2),
        );
        assert_relative_eq!(
            FaceArea::new(face).execute(&store).unwrap(),
            4.0 * PI * 9.0,
            max_relative = 1e-8
        );
    }
}
