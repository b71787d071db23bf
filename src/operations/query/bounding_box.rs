use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::tessellation::{wire_samples, TessellateFace, TessellationParams};
use crate::topology::{Geometry, TopologyStore};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// The tightest box around a set of points, or `None` if there are none.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |b, p| b.include(p)))
    }

    #[must_use]
    fn include(self, p: &Point3) -> Self {
        Self {
            min: self.min.inf(p),
            max: self.max.sup(p),
        }
    }

    /// The smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Aabb) -> Aabb {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// The box center.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Computes the axis-aligned bounding box of a geometry.
///
/// Solids and surfaces are boxed through their tessellation, curves through
/// their sampled wire.
pub struct BoundingBox {
    geometry: Geometry,
    params: TessellationParams,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            params: TessellationParams::default(),
        }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry cannot be sampled or has no points.
    pub fn execute(&self, store: &TopologyStore) -> Result<Aabb> {
        let points = match self.geometry {
            Geometry::Curve(wire) => wire_samples(store, wire, &self.params)?,
            other => {
                let mut points = Vec::new();
                for face in store.geometry_faces(other)? {
                    points.extend(TessellateFace::new(face, self.params).execute(store)?.vertices);
                }
                points
            }
        };
        Aabb::from_points(&points)
            .ok_or_else(|| OperationError::Failed("geometry has no points to bound".into()).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::{MakeBox, MakeWire};
    use approx::assert_relative_eq;

    #[test]
    fn box_bounds_are_its_corners() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::new(-1.0, 0.0, 2.0), Point3::new(1.0, 3.0, 5.0))
            .execute(&mut store)
            .unwrap();
        let aabb = BoundingBox::new(Geometry::Solid(solid)).execute(&store).unwrap();
        assert_relative_eq!(aabb.min, Point3::new(-1.0, 0.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(aabb.max, Point3::new(1.0, 3.0, 5.0), epsilon = 1e-12);
        assert_relative_eq!(aabb.center(), Point3::new(0.0, 1.5, 3.5), epsilon = 1e-12);
    }

    #[test]
    fn curve_bounds_and_union() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(vec![Point3::origin(), Point3::new(4.0, 2.0, 0.0)], false)
            .execute(&mut store)
            .unwrap();
        let curve_box = BoundingBox::new(Geometry::Curve(wire)).execute(&store).unwrap();
        let other = Aabb::from_points(&[Point3::new(-1.0, -1.0, -1.0)]).unwrap();
        let both = curve_box.union(&other);
        assert_relative_eq!(both.min, Point3::new(-1.0, -1.0, -1.0));
        assert_relative_eq!(both.max, Point3::new(4.0, 2.0, 0.0));
    }

    #[test]
    fn empty_point_set_has_no_box() {
        assert!(Aabb::from_points(&[]).is_none());
    }
}
