use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::FixedFaceHandle;
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TessellationError};
use crate::geometry::surface::{Plane, Surface, SurfaceDomain};
use crate::math::{Point2, Point3};
use crate::operations::query::FaceDomain;
use crate::topology::{FaceId, FaceSurface, TopologyStore, WireId};

use super::{wire_samples, TessellationParams, TriangleMesh};

/// Tessellates a face into a triangle mesh.
///
/// Planar faces are triangulated with a constrained Delaunay triangulation
/// of their boundary, holes included. Curved faces are sampled on a uv grid
/// over their parametric domain.
pub struct TessellateFace {
    face: FaceId,
    params: TessellationParams,
}

impl TessellateFace {
    /// Creates a new `TessellateFace` operation.
    #[must_use]
    pub fn new(face: FaceId, params: TessellationParams) -> Self {
        Self { face, params }
    }

    /// Executes the tessellation, returning a triangle mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the face cannot be tessellated.
    pub fn execute(&self, store: &TopologyStore) -> Result<TriangleMesh> {
        let face = store.face(self.face)?;
        let same_sense = face.same_sense;

        match &face.surface {
            FaceSurface::Plane(plane) => tessellate_plane(
                store,
                plane,
                same_sense,
                face.outer_wire,
                &face.inner_wires,
                &self.params,
            ),
            FaceSurface::Cylinder(cyl) => {
                let domain = FaceDomain::new(self.face).execute(store)?;
                let n_u = self.params.angular_segments(cyl.radius(), domain.u_max - domain.u_min);
                let n_v = self.params.linear_segments(domain.v_max - domain.v_min);
                tessellate_uv_grid(&face.surface, &domain, n_u, n_v, same_sense)
            }
            FaceSurface::Sphere(sph) => {
                let domain = FaceDomain::new(self.face).execute(store)?;
                let n_u = self.params.angular_segments(sph.radius(), domain.u_max - domain.u_min);
                let n_v = self.params.angular_segments(sph.radius(), domain.v_max - domain.v_min);
                tessellate_uv_grid(&face.surface, &domain, n_u, n_v, same_sense)
            }
        }
    }
}

/// Tessellates a planar face using CDT.
#[allow(clippy::cast_possible_truncation)]
fn tessellate_plane(
    store: &TopologyStore,
    plane: &Plane,
    same_sense: bool,
    outer_wire: WireId,
    inner_wires: &[WireId],
    params: &TessellationParams,
) -> Result<TriangleMesh> {
    let outer_3d = wire_samples(store, outer_wire, params)?;
    let mut inner_3d_list = Vec::with_capacity(inner_wires.len());
    for &wire in inner_wires {
        inner_3d_list.push(wire_samples(store, wire, params)?);
    }

    let normal = if same_sense {
        *plane.plane_normal()
    } else {
        -*plane.plane_normal()
    };

    let project = |p: &Point3| -> SpadePoint2<f64> {
        let (u, v) = plane.inverse(p);
        SpadePoint2::new(u, v)
    };

    let mut cdt = ConstrainedDelaunayTriangulation::<SpadePoint2<f64>>::new();
    insert_constraint_loop(&mut cdt, &outer_3d.iter().map(project).collect::<Vec<_>>())?;
    for inner in &inner_3d_list {
        insert_constraint_loop(&mut cdt, &inner.iter().map(project).collect::<Vec<_>>())?;
    }

    let interior_faces = classify_interior_faces(&cdt);

    let mut mesh = TriangleMesh::default();
    let mut vertex_map: HashMap<usize, u32> = HashMap::new();

    for face_handle in cdt.inner_faces() {
        if !interior_faces.contains(&face_handle.fix().index()) {
            continue;
        }

        let mut tri = [0u32; 3];
        for (slot, vh) in tri.iter_mut().zip(face_handle.vertices().iter()) {
            let key = vh.fix().index();
            *slot = match vertex_map.get(&key) {
                Some(&existing) => existing,
                None => {
                    let pos = vh.position();
                    let idx = mesh.vertices.len() as u32;
                    mesh.vertices.push(plane.evaluate(pos.x, pos.y)?);
                    mesh.normals.push(normal);
                    mesh.uvs.push(Point2::new(pos.x, pos.y));
                    vertex_map.insert(key, idx);
                    idx
                }
            };
        }

        // CDT triangles are counter-clockwise in (u, v), i.e. along the plane normal.
        if same_sense {
            mesh.indices.push(tri);
        } else {
            mesh.indices.push([tri[0], tri[2], tri[1]]);
        }
    }

    if mesh.is_empty() {
        return Err(TessellationError::Failed("planar face has no interior".into()).into());
    }
    Ok(mesh)
}

/// Tessellates a parametric surface on a UV grid.
///
/// Generates `(n_u + 1) * (n_v + 1)` vertices, then splits each cell into
/// two triangles.
#[allow(clippy::cast_possible_truncation)]
fn tessellate_uv_grid(
    surface: &FaceSurface,
    domain: &SurfaceDomain,
    n_u: usize,
    n_v: usize,
    same_sense: bool,
) -> Result<TriangleMesh> {
    if !domain.is_bounded() {
        return Err(TessellationError::InvalidParameters("unbounded face domain".into()).into());
    }

    let mut mesh = TriangleMesh::default();
    let cols = n_u + 1;
    let rows = n_v + 1;
    mesh.vertices.reserve(rows * cols);
    mesh.normals.reserve(rows * cols);
    mesh.uvs.reserve(rows * cols);
    mesh.indices.reserve(n_u * n_v * 2);

    for iv in 0..rows {
        let v = domain.v_at(iv, n_v);
        for iu in 0..cols {
            let u = domain.u_at(iu, n_u);
            let point = surface.evaluate(u, v)?;
            let n = surface.normal(u, v)?;
            mesh.vertices.push(point);
            mesh.normals.push(if same_sense { n } else { -n });
            mesh.uvs.push(Point2::new(u, v));
        }
    }

    for iv in 0..n_v {
        for iu in 0..n_u {
            let i00 = (iv * cols + iu) as u32;
            let i10 = (iv * cols + iu + 1) as u32;
            let i01 = ((iv + 1) * cols + iu) as u32;
            let i11 = ((iv + 1) * cols + iu + 1) as u32;
            if same_sense {
                mesh.indices.push([i00, i10, i11]);
                mesh.indices.push([i00, i11, i01]);
            } else {
                mesh.indices.push([i00, i11, i10]);
                mesh.indices.push([i00, i01, i11]);
            }
        }
    }

    Ok(mesh)
}

/// Inserts a closed polygon as constraint edges into the CDT.
fn insert_constraint_loop(
    cdt: &mut ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
    points: &[SpadePoint2<f64>],
) -> Result<()> {
    if points.len() < 3 {
        return Err(
            TessellationError::Failed("constraint loop needs at least 3 points".into()).into(),
        );
    }

    let mut handles = Vec::with_capacity(points.len());
    for &pt in points {
        let h = cdt
            .insert(pt)
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }

    Ok(())
}

/// Flood-fills CDT faces from the outside, counting constraint crossings.
///
/// Odd depth means interior.
fn classify_interior_faces(
    cdt: &ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<spade::handles::InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer_fix {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            let idx = inner.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, depth);
            if depth % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((inner.fix(), depth));
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        for edge in cdt.face(face_fix).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let idx = neighbor.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let next = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, next);
            if next % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((neighbor.fix(), next));
        }
    }

    interior
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::surface::{Cylinder, Sphere};
    use crate::math::Vector3;
    use crate::operations::creation::{MakeFace, MakePatch, MakeWire};
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn planar_face(store: &mut TopologyStore, points: Vec<Point3>) -> FaceId {
        let wire = MakeWire::new(points, true).execute(store).unwrap();
        MakeFace::new(wire, vec![]).execute(store).unwrap()
    }

    fn first_face(store: &TopologyStore, solid: crate::topology::SolidId) -> FaceId {
        store.solid_faces(solid).unwrap()[0]
    }

    #[test]
    fn triangle_produces_1_triangle() {
        let mut store = TopologyStore::new();
        let face = planar_face(&mut store, vec![p(0.0, 0.0), p(4.0, 0.0), p(2.0, 3.0)]);
        let mesh = TessellateFace::new(face, TessellationParams::default())
            .execute(&store)
            .unwrap();
        assert_eq!(mesh.indices.len(), 1);
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.normals.len(), 3);
    }

    #[test]
    fn l_shape_concave_tessellates() {
        let mut store = TopologyStore::new();
        let face = planar_face(
            &mut store,
            vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 2.0), p(2.0, 2.0), p(2.0, 4.0), p(0.0, 4.0)],
        );
        let mesh = TessellateFace::new(face, TessellationParams::default())
            .execute(&store)
            .unwrap();
        assert_eq!(mesh.indices.len(), 4);
        assert!((mesh.area() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn face_with_hole_excludes_interior() {
        let mut store = TopologyStore::new();
        let outer = MakeWire::new(vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)], true)
            .execute(&mut store)
            .unwrap();
        let inner = MakeWire::new(vec![p(3.0, 3.0), p(7.0, 3.0), p(7.0, 7.0), p(3.0, 7.0)], true)
            .execute(&mut store)
            .unwrap();
        let face = MakeFace::new(outer, vec![inner]).execute(&mut store).unwrap();
        let mesh = TessellateFace::new(face, TessellationParams::default())
            .execute(&store)
            .unwrap();
        assert!((mesh.area() - 84.0).abs() < 1e-9);
    }

    #[test]
    fn winding_follows_face_normal() {
        let mut store = TopologyStore::new();
        let face = planar_face(&mut store, vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)]);
        let mesh = TessellateFace::new(face, TessellationParams::default())
            .execute(&store)
            .unwrap();
        for t in &mesh.indices {
            let a = mesh.vertices[t[0] as usize];
            let b = mesh.vertices[t[1] as usize];
            let c = mesh.vertices[t[2] as usize];
            assert!((b - a).cross(&(c - a)).z > 0.0);
        }
    }

    #[test]
    fn cylinder_patch_area_matches() {
        let mut store = TopologyStore::new();
        let cyl = Cylinder::new(Point3::origin(), 2.0, Vector3::z(), Vector3::x()).unwrap();
        let solid = MakePatch::new(
            FaceSurface::Cylinder(cyl),
            SurfaceDomain::new(0.0, TAU, 0.0, 5.0),
        )
        .execute(&mut store)
        .unwrap();
        let mesh = TessellateFace::new(first_face(&store, solid), TessellationParams::default())
            .execute(&store)
            .unwrap();
        let expected = TAU * 2.0 * 5.0;
        assert!((mesh.area() - expected).abs() < expected * 0.01);
        for (v, n) in mesh.vertices.iter().zip(&mesh.normals) {
            let radial = Vector3::new(v.x, v.y, 0.0);
            assert!(n.dot(&radial) > 0.0);
        }
    }

    #[test]
    fn full_sphere_patch_tessellates() {
        let mut store = TopologyStore::new();
        let sph = Sphere::new(Point3::origin(), 3.0, Vector3::z(), Vector3::x()).unwrap();
        let solid = MakePatch::new(
            FaceSurface::Sphere(sph),
            SurfaceDomain::new(0.0, TAU, -FRAC_PI_2, FRAC_PI_2),
        )
        .execute(&mut store)
        .unwrap();
        let mesh = TessellateFace::new(first_face(&store, solid), TessellationParams::default())
            .execute(&store)
            .unwrap();
        let expected = 4.0 * std::f64::consts::PI * 9.0;
        assert!((mesh.area() - expected).abs() < expected * 0.02);
        assert_eq!(mesh.vertices.len(), mesh.normals.len());
    }
}
