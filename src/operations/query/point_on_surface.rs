use crate::error::Result;
use crate::geometry::surface::Surface;
use crate::math::Point3;
use crate::topology::{FaceId, TopologyStore};

/// Evaluates the surface of a face at given parameters.
pub struct PointOnSurface {
    face: FaceId,
    u: f64,
    v: f64,
}

impl PointOnSurface {
    /// Creates a new `PointOnSurface` query.
    #[must_use]
    pub fn new(face: FaceId, u: f64, v: f64) -> Self {
        Self { face, u, v }
    }

    /// Executes the query, returning the 3D point.
    ///
    /// Parameters outside the face's trim are still evaluated on the
    /// underlying surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is missing or evaluation fails.
    pub fn execute(&self, store: &TopologyStore) -> Result<Point3> {
        store.face(self.face)?.surface.evaluate(self.u, self.v)
    }
}
