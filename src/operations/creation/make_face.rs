use crate::error::Result;
use crate::geometry::surface::Plane;
use crate::math::polygon_3d::newell_normal;
use crate::topology::{FaceData, FaceId, FaceSurface, TopologyStore, WireId};

/// Creates a face from a boundary wire and optional hole wires.
///
/// By default the supporting plane is fitted to the outer wire, with its
/// normal following the wire's winding.
pub struct MakeFace {
    outer_wire: WireId,
    inner_wires: Vec<WireId>,
    surface: Option<FaceSurface>,
}

impl MakeFace {
    /// Creates a new `MakeFace` operation on a fitted plane.
    #[must_use]
    pub fn new(outer_wire: WireId, inner_wires: Vec<WireId>) -> Self {
        Self {
            outer_wire,
            inner_wires,
            surface: None,
        }
    }

    /// Creates a face on an explicit surface instead of a fitted plane.
    #[must_use]
    pub fn on_surface(outer_wire: WireId, inner_wires: Vec<WireId>, surface: FaceSurface) -> Self {
        Self {
            outer_wire,
            inner_wires,
            surface: Some(surface),
        }
    }

    /// Executes the operation, creating the face in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if a wire is missing or, when fitting a plane, the
    /// outer wire is degenerate.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        for &wire in &self.inner_wires {
            store.wire(wire)?;
        }
        let surface = match &self.surface {
            Some(surface) => {
                store.wire(self.outer_wire)?;
                surface.clone()
            }
            None => FaceSurface::Plane(fit_plane(store, self.outer_wire)?),
        };

        let mut face = FaceData::bounded_by(surface, self.outer_wire);
        face.inner_wires.clone_from(&self.inner_wires);
        Ok(store.add_face(face))
    }
}

/// Plane through the first wire vertex, `u` along the first edge.
fn fit_plane(store: &TopologyStore, wire: WireId) -> Result<Plane> {
    let points = store.wire_points(wire)?;
    let normal = newell_normal(&points)?;
    let first_edge = points[1] - points[0];
    let u_dir = first_edge - normal * first_edge.dot(&normal);
    match Plane::new(points[0], u_dir, normal.cross(&u_dir)) {
        Ok(plane) => Ok(plane),
        Err(_) => Plane::from_normal(points[0], normal),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::MakeWire;

    #[test]
    fn plane_normal_follows_winding() {
        let mut store = TopologyStore::new();
        let ccw = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 1.0),
            Point3::new(2.0, 2.0, 1.0),
        ];
        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        for (points, expected) in [(ccw, Vector3::z()), (cw, -Vector3::z())] {
            let wire = MakeWire::new(points, true).execute(&mut store).unwrap();
            let face = MakeFace::new(wire, vec![]).execute(&mut store).unwrap();
            let FaceSurface::Plane(plane) = &store.face(face).unwrap().surface else {
                panic!("expected a plane");
            };
            assert!((plane.plane_normal() - expected).norm() < 1e-12);
            assert!(plane.signed_distance(&Point3::new(5.0, 5.0, 1.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn collinear_wire_is_rejected() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)],
            true,
        )
        .execute(&mut store)
        .unwrap();
        assert!(MakeFace::new(wire, vec![]).execute(&mut store).is_err());
    }
}
