use tracing::debug;

use crate::operations::query::FaceArea;
use crate::topology::{FaceId, Geometry, TopologyStore};

/// Picks the face a lattice is laid out on.
///
/// For a solid this is the face of largest area across all its shells; the
/// first of equally large faces wins. A face whose area cannot be computed
/// counts as zero. A surface is its own face; curves have none.
#[must_use]
pub fn largest_face(store: &TopologyStore, geometry: Geometry) -> Option<FaceId> {
    match geometry {
        Geometry::Surface(face) => Some(face),
        Geometry::Curve(_) => None,
        Geometry::Solid(solid) => {
            let faces = match store.solid_faces(solid) {
                Ok(faces) => faces,
                Err(err) => {
                    debug!(%err, "solid has no readable faces");
                    return None;
                }
            };
            let mut best: Option<(FaceId, f64)> = None;
            for face in faces {
                let area = FaceArea::new(face).execute(store).unwrap_or_else(|err| {
                    debug!(%err, "face area unavailable; treated as zero");
                    0.0
                });
                match best {
                    Some((_, best_area)) if area <= best_area => {}
                    _ => best = Some((face, area)),
                }
            }
            best.map(|(face, _)| face)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::surface::{Cylinder, SurfaceDomain};
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::{MakeBox, MakePatch, MakeSolid, MakeWire};
    use crate::topology::{FaceSurface, ShellData};
    use std::f64::consts::PI;

    #[test]
    fn picks_the_largest_box_face() {
        let mut store = TopologyStore::new();
        // 4 x 2 x 1: the bottom and top faces are largest.
        let solid = MakeBox::new(Point3::origin(), Point3::new(4.0, 2.0, 1.0))
            .execute(&mut store)
            .unwrap();
        let faces = store.solid_faces(solid).unwrap();
        assert_eq!(largest_face(&store, Geometry::Solid(solid)), Some(faces[0]));
    }

    #[test]
    fn ties_go_to_the_first_face() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
            .execute(&mut store)
            .unwrap();
        let faces = store.solid_faces(solid).unwrap();
        assert_eq!(largest_face(&store, Geometry::Solid(solid)), Some(faces[0]));
    }

    #[test]
    fn faces_without_area_still_compete() {
        let mut store = TopologyStore::new();
        let cyl = Cylinder::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x()).unwrap();
        let mut faces = Vec::new();
        for _ in 0..2 {
            let sheet = MakePatch::new(FaceSurface::Cylinder(cyl.clone()), SurfaceDomain::new(0.0, PI, 0.0, 1.0))
                .execute(&mut store)
                .unwrap();
            let face = store.solid_faces(sheet).unwrap()[0];
            store.face_mut(face).unwrap().uv_bounds =
                Some(SurfaceDomain::new(0.0, PI, f64::NEG_INFINITY, f64::INFINITY));
            assert!(FaceArea::new(face).execute(&store).is_err());
            faces.push(face);
        }
        let shell = store.add_shell(ShellData::open(faces.clone()));
        let solid = MakeSolid::new(shell, vec![]).execute(&mut store).unwrap();
        assert_eq!(largest_face(&store, Geometry::Solid(solid)), Some(faces[0]));
    }

    #[test]
    fn surfaces_and_curves() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
            .execute(&mut store)
            .unwrap();
        let face = store.solid_faces(solid).unwrap()[3];
        assert_eq!(largest_face(&store, Geometry::Surface(face)), Some(face));

        let wire = MakeWire::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)], false)
            .execute(&mut store)
            .unwrap();
        assert_eq!(largest_face(&store, Geometry::Curve(wire)), None);
    }
}
