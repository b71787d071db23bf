use crate::error::{OperationError, Result};
use crate::math::polygon_3d::newell_normal;
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::operations::creation::MakeSolid;
use crate::topology::{FaceId, ShellData, SolidId, TopologyStore};

use super::make_planar_face;

/// Extrudes a planar face along a direction vector to create a prism.
pub struct Extrude {
    face: FaceId,
    direction: Vector3,
}

impl Extrude {
    /// Creates a new `Extrude` operation.
    #[must_use]
    pub fn new(face: FaceId, direction: Vector3) -> Self {
        Self { face, direction }
    }

    /// Executes the extrusion, creating the solid in the topology store.
    ///
    /// Faces are ordered bottom, top, then one side per boundary edge.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the direction is zero-length
    /// or the face has holes.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.direction.norm() < TOLERANCE {
            return Err(
                OperationError::InvalidInput("extrude direction must be non-zero".into()).into(),
            );
        }

        let face = store.face(self.face)?;
        if !face.inner_wires.is_empty() {
            return Err(OperationError::InvalidInput(
                "extrusion of faces with holes is not supported".into(),
            )
            .into());
        }
        let base_points = store.wire_points(face.outer_wire)?;

        // Orient the base so its normal follows the direction; the bottom cap
        // is then the reversed base and every side faces outward.
        let normal = newell_normal(&base_points)?;
        let base_points: Vec<Point3> = if normal.dot(&self.direction) > 0.0 {
            base_points
        } else {
            base_points.into_iter().rev().collect()
        };

        let bottom_points: Vec<Point3> = base_points.iter().rev().copied().collect();
        let top_points: Vec<Point3> = base_points.iter().map(|p| p + self.direction).collect();

        let n = base_points.len();
        let mut faces = Vec::with_capacity(n + 2);
        faces.push(make_planar_face(store, &bottom_points)?);
        faces.push(make_planar_face(store, &top_points)?);
        for i in 0..n {
            let j = (i + 1) % n;
            let quad = [base_points[i], base_points[j], top_points[j], top_points[i]];
            faces.push(make_planar_face(store, &quad)?);
        }

        let shell = store.add_shell(ShellData::closed(faces));
        MakeSolid::new(shell, vec![]).execute(store)
    }
}
