use crate::error::{OperationError, Result};
use crate::math::polygon_3d::{centroid, newell_vector};
use crate::math::Point3;
use crate::operations::creation::MakeSolid;
use crate::topology::{ShellData, SolidId, TopologyStore};

use super::{make_planar_face, push_side_faces};

/// Skins a solid through a sequence of closed polygonal sections.
///
/// Consecutive sections are bridged point-to-point, so every section must
/// have the same number of points.
pub struct Loft {
    sections: Vec<Vec<Point3>>,
    capped: bool,
}

impl Loft {
    /// Creates a new `Loft` operation.
    ///
    /// With `capped`, the first and last sections are closed by planar caps
    /// and the result is watertight.
    #[must_use]
    pub fn new(sections: Vec<Vec<Point3>>, capped: bool) -> Self {
        Self { sections, capped }
    }

    /// Executes the loft, creating the solid in the topology store.
    ///
    /// Faces are ordered start cap, end cap (when capped), then the sides
    /// section by section.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for fewer than two sections,
    /// sections with fewer than three points, or mismatched point counts.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.sections.len() < 2 {
            return Err(OperationError::InvalidInput(format!(
                "loft needs at least 2 sections, got {}",
                self.sections.len()
            ))
            .into());
        }
        let n = self.sections[0].len();
        if n < 3 {
            return Err(
                OperationError::InvalidInput("loft sections need at least 3 points".into()).into(),
            );
        }
        if self.sections.iter().any(|s| s.len() != n) {
            return Err(OperationError::InvalidInput(
                "loft sections must have equal point counts".into(),
            )
            .into());
        }

        let sections = self.oriented_sections()?;
        let mut faces = Vec::with_capacity(n * (sections.len() - 1) + 2);

        if self.capped {
            let (Some(first), Some(last)) = (sections.first(), sections.last()) else {
                return Err(OperationError::Failed("loft lost its sections".into()).into());
            };
            let start_cap: Vec<Point3> = first.iter().rev().copied().collect();
            faces.push(make_planar_face(store, &start_cap)?);
            faces.push(make_planar_face(store, last)?);
        }

        for pair in sections.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            for i in 0..n {
                let j = (i + 1) % n;
                push_side_faces(store, &mut faces, [a[i], a[j], b[j], b[i]])?;
            }
        }

        let shell = if self.capped {
            ShellData::closed(faces)
        } else {
            ShellData::open(faces)
        };
        let shell = store.add_shell(shell);
        MakeSolid::new(shell, vec![]).execute(store)
    }

    /// Sections wound so their normals point along the loft direction.
    fn oriented_sections(&self) -> Result<Vec<Vec<Point3>>> {
        let first = &self.sections[0];
        let last = &self.sections[self.sections.len() - 1];
        let (Some(start), Some(end)) = (centroid(first), centroid(last)) else {
            return Err(OperationError::InvalidInput("empty loft section".into()).into());
        };
        let forward = newell_vector(first).dot(&(end - start)) >= 0.0;
        Ok(if forward {
            self.sections.clone()
        } else {
            self.sections
                .iter()
                .map(|s| s.iter().rev().copied().collect())
                .collect()
        })
    }
}
