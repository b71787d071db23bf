mod extrude;
mod loft;
mod sweep;

pub use extrude::Extrude;
pub use loft::Loft;
pub use sweep::{Sweep, SweepProfile};

use crate::error::Result;
use crate::math::polygon_3d::max_plane_deviation;
use crate::math::Point3;
use crate::operations::creation::{MakeFace, MakeWire};
use crate::topology::{FaceId, TopologyStore};

/// Out-of-plane tolerance above which a side quad is split in two.
const QUAD_PLANARITY: f64 = 1e-9;

/// Creates a planar face from a closed loop of points.
fn make_planar_face(store: &mut TopologyStore, points: &[Point3]) -> Result<FaceId> {
    let wire = MakeWire::new(points.to_vec(), true).execute(store)?;
    MakeFace::new(wire, vec![]).execute(store)
}

/// Adds the faces bridging `a[i]..a[j]` to `b[i]..b[j]`.
///
/// Warped quads become two triangles so every face stays planar.
fn push_side_faces(
    store: &mut TopologyStore,
    faces: &mut Vec<FaceId>,
    quad: [Point3; 4],
) -> Result<()> {
    if max_plane_deviation(&quad)? <= QUAD_PLANARITY {
        faces.push(make_planar_face(store, &quad)?);
    } else {
        faces.push(make_planar_face(store, &[quad[0], quad[1], quad[2]])?);
        faces.push(make_planar_face(store, &[quad[0], quad[2], quad[3]])?);
    }
    Ok(())
}
