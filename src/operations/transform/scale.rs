use std::collections::HashSet;

use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::topology::{EdgeId, FaceId, Geometry, TopologyStore, VertexId, WireId};

/// Scales a geometry uniformly about a center point, in place.
pub struct Scale {
    geometry: Geometry,
    center: Point3,
    factor: f64,
}

impl Scale {
    /// Creates a new `Scale` operation.
    #[must_use]
    pub fn new(geometry: Geometry, center: Point3, factor: f64) -> Self {
        Self {
            geometry,
            center,
            factor,
        }
    }

    /// Executes the scaling, modifying the geometry in place.
    ///
    /// Entities shared between faces are transformed exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for a non-positive or
    /// non-finite factor, or an error if a referenced entity is missing.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        if !self.factor.is_finite() || self.factor <= 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "scale factor must be positive and finite, got {}",
                self.factor
            ))
            .into());
        }

        let faces = store.geometry_faces(self.geometry)?;
        let mut wires: Vec<WireId> = Vec::new();
        for &face in &faces {
            wires.extend(store.face_wires(face)?);
        }
        if let Geometry::Curve(wire) = self.geometry {
            wires.push(wire);
        }

        let mut edges: Vec<EdgeId> = Vec::new();
        let mut seen_edges = HashSet::new();
        let mut vertices: Vec<VertexId> = Vec::new();
        let mut seen_vertices = HashSet::new();
        for wire in wires {
            for oe in &store.wire(wire)?.edges {
                if seen_edges.insert(oe.edge) {
                    edges.push(oe.edge);
                    let edge = store.edge(oe.edge)?;
                    for v in [edge.start, edge.end] {
                        if seen_vertices.insert(v) {
                            vertices.push(v);
                        }
                    }
                }
            }
        }

        let (center, k) = (self.center, self.factor);
        for v in vertices {
            let vertex = store.vertex_mut(v)?;
            vertex.point = center + (vertex.point - center) * k;
        }
        for e in edges {
            let edge = store.edge_mut(e)?;
            if edge.curve.is_arc_length() {
                edge.t_start *= k;
                edge.t_end *= k;
            }
            edge.curve = edge.curve.scaled_about(&center, k);
        }
        for f in unique(faces) {
            let face = store.face_mut(f)?;
            if let Some(bounds) = face.uv_bounds {
                face.uv_bounds = Some(face.surface.scaled_domain(&bounds, k));
            }
            face.surface = face.surface.scaled_about(&center, k);
        }
        Ok(())
    }
}

fn unique(faces: Vec<FaceId>) -> Vec<FaceId> {
    let mut seen = HashSet::new();
    faces.into_iter().filter(|f| seen.insert(*f)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::surface::{Cylinder, SurfaceDomain};
    use crate::math::Vector3;
    use crate::operations::creation::{MakeBox, MakePatch};
    use crate::operations::query::{BoundingBox, FaceArea};
    use crate::topology::FaceSurface;
    use approx::assert_relative_eq;

    #[test]
    fn box_doubles_about_its_center() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::origin(), Point3::new(2.0, 2.0, 2.0))
            .execute(&mut store)
            .unwrap();
        Scale::new(Geometry::Solid(solid), Point3::new(1.0, 1.0, 1.0), 2.0)
            .execute(&mut store)
            .unwrap();
        let aabb = BoundingBox::new(Geometry::Solid(solid)).execute(&store).unwrap();
        assert_relative_eq!(aabb.min, Point3::new(-1.0, -1.0, -1.0), epsilon = 1e-12);
        assert_relative_eq!(aabb.max, Point3::new(3.0, 3.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn curved_patch_area_scales_quadratically() {
        let mut store = TopologyStore::new();
        let cyl = Cylinder::new(Point3::new(1.0, 0.0, 0.0), 1.0, Vector3::z(), Vector3::x()).unwrap();
        let solid = MakePatch::new(FaceSurface::Cylinder(cyl), SurfaceDomain::new(0.0, 1.0, 0.0, 2.0))
            .execute(&mut store)
            .unwrap();
        let face = store.solid_faces(solid).unwrap()[0];
        let before = FaceArea::new(face).execute(&store).unwrap();
        Scale::new(Geometry::Solid(solid), Point3::origin(), 3.0)
            .execute(&mut store)
            .unwrap();
        let after = FaceArea::new(face).execute(&store).unwrap();
        assert_relative_eq!(after, before * 9.0, max_relative = 1e-9);
    }

    #[test]
    fn rejects_non_positive_factor() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
            .execute(&mut store)
            .unwrap();
        for k in [0.0, -1.0, f64::NAN] {
            assert!(Scale::new(Geometry::Solid(solid), Point3::origin(), k)
                .execute(&mut store)
                .is_err());
        }
    }
}
