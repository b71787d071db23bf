use tracing::{debug, warn};

use crate::operations::query::BoundingBox;
use crate::operations::transform::{Duplicate, Scale};
use crate::topology::{Geometry, TopologyStore};

/// Scales copies of a batch about the center of its combined bounding box.
///
/// Originals are left untouched and the output keeps the input order. Items
/// whose box cannot be computed do not contribute to the pivot. When no item
/// has a box there is no pivot, and the copies are returned unscaled.
pub fn scale_about_centroid(store: &mut TopologyStore, items: &[Geometry], factor: f64) -> Vec<Geometry> {
    let bounds = items
        .iter()
        .filter_map(|&item| match BoundingBox::new(item).execute(store) {
            Ok(aabb) => Some(aabb),
            Err(err) => {
                debug!(?item, %err, "no bounding box; excluded from pivot");
                None
            }
        })
        .reduce(|a, b| a.union(&b));
    let pivot = bounds.map(|b| b.center());
    if pivot.is_none() && !items.is_empty() {
        warn!(count = items.len(), "no bounding box in batch; copies left unscaled");
    }

    items
        .iter()
        .map(|&item| {
            let copy = match Duplicate::new(item).execute(store) {
                Ok(copy) => copy,
                Err(err) => {
                    warn!(?item, %err, "duplicate failed; scaling the original");
                    item
                }
            };
            if let Some(pivot) = pivot {
                if let Err(err) = Scale::new(copy, pivot, factor).execute(store) {
                    warn!(?item, %err, "scale failed; keeping item unscaled");
                }
            }
            copy
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::geometry::surface::{Cylinder, SurfaceDomain};
    use crate::operations::creation::{MakeBox, MakePatch, MakeWire};
    use crate::operations::query::Aabb;
    use crate::topology::{FaceId, FaceSurface};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn unit_box(store: &mut TopologyStore, min: Point3) -> Geometry {
        let max = min + Vector3::new(1.0, 1.0, 1.0);
        Geometry::Solid(MakeBox::new(min, max).execute(store).unwrap())
    }

    fn bounds(store: &TopologyStore, g: Geometry) -> Aabb {
        BoundingBox::new(g).execute(store).unwrap()
    }

    #[test]
    fn scales_about_batch_center() {
        let mut store = TopologyStore::new();
        let a = unit_box(&mut store, Point3::origin());
        let b = unit_box(&mut store, Point3::new(3.0, 0.0, 0.0));
        let scaled = scale_about_centroid(&mut store, &[a, b], 2.0);
        assert_eq!(scaled.len(), 2);

        // Batch spans x in [0, 4]; pivot at x = 2.
        let sa = bounds(&store, scaled[0]);
        assert_relative_eq!(sa.min.x, -2.0, epsilon = 1e-9);
        assert_relative_eq!(sa.max.x, 0.0, epsilon = 1e-9);
        let sb = bounds(&store, scaled[1]);
        assert_relative_eq!(sb.max.x, 6.0, epsilon = 1e-9);

        let original = bounds(&store, a);
        assert_relative_eq!(original.max.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn unit_factor_is_identity() {
        let mut store = TopologyStore::new();
        let a = unit_box(&mut store, Point3::new(1.0, 2.0, 3.0));
        let scaled = scale_about_centroid(&mut store, &[a], 1.0);
        let before = bounds(&store, a);
        let after = bounds(&store, scaled[0]);
        assert_relative_eq!((after.min - before.min).norm(), 0.0, epsilon = 1e-9);
        assert_relative_eq!((after.max - before.max).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn consecutive_scales_compose() {
        let mut store = TopologyStore::new();
        let a = unit_box(&mut store, Point3::new(1.0, 0.0, 0.0));
        let twice = scale_about_centroid(&mut store, &[a], 2.0);
        let then = scale_about_centroid(&mut store, &twice, 3.0);
        let once = scale_about_centroid(&mut store, &[a], 6.0);
        let (x, y) = (bounds(&store, then[0]), bounds(&store, once[0]));
        assert_relative_eq!((x.min - y.min).norm(), 0.0, epsilon = 1e-9);
        assert_relative_eq!((x.max - y.max).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn curves_are_scaled_too() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(vec![Point3::origin(), Point3::new(2.0, 0.0, 0.0)], false)
            .execute(&mut store)
            .unwrap();
        let scaled = scale_about_centroid(&mut store, &[Geometry::Curve(wire)], 3.0);
        let b = bounds(&store, scaled[0]);
        assert_relative_eq!(b.min.x, -2.0, epsilon = 1e-9);
        assert_relative_eq!(b.max.x, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn batch_without_bounds_is_copied_unscaled() {
        let mut store = TopologyStore::new();
        let cyl = Cylinder::new(Point3::origin(), 2.0, Vector3::z(), Vector3::x()).unwrap();
        let sheet = MakePatch::new(FaceSurface::Cylinder(cyl), SurfaceDomain::new(0.0, PI, 0.0, 3.0))
            .execute(&mut store)
            .unwrap();
        let face = store.solid_faces(sheet).unwrap()[0];
        store.face_mut(face).unwrap().uv_bounds =
            Some(SurfaceDomain::new(0.0, PI, f64::NEG_INFINITY, f64::INFINITY));
        let item = Geometry::Surface(face);
        assert!(BoundingBox::new(item).execute(&store).is_err());

        let scaled = scale_about_centroid(&mut store, &[item], 2.0);
        assert_eq!(scaled.len(), 1);
        assert_ne!(scaled[0], item);
        let Geometry::Surface(copy) = scaled[0] else {
            panic!("a surface copies to a surface");
        };
        let radius = |id: FaceId| match &store.face(id).unwrap().surface {
            FaceSurface::Cylinder(c) => c.radius(),
            _ => panic!("cylinder patch"),
        };
        assert_relative_eq!(radius(copy), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_batch_is_empty() {
        let mut store = TopologyStore::new();
        assert!(scale_about_centroid(&mut store, &[], 2.0).is_empty());
    }
}
