use crate::error::{OperationError, Result};
use crate::geometry::curve::Line;
use crate::math::Point3;
use crate::topology::{EdgeCurve, EdgeData, OrientedEdge, TopologyStore, VertexData, WireData, WireId};

/// Creates a polyline wire of straight edges through a sequence of points.
pub struct MakeWire {
    points: Vec<Point3>,
    close: bool,
}

impl MakeWire {
    /// Creates a new `MakeWire` operation.
    ///
    /// With `close`, an extra edge runs from the last point back to the first.
    #[must_use]
    pub fn new(points: Vec<Point3>, close: bool) -> Self {
        Self { points, close }
    }

    /// Executes the operation, creating the wire in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for fewer than two points (three
    /// when closing), and a geometry error if two consecutive points coincide.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<WireId> {
        let needed = if self.close { 3 } else { 2 };
        if self.points.len() < needed {
            return Err(OperationError::InvalidInput(format!(
                "wire needs at least {needed} points, got {}",
                self.points.len()
            ))
            .into());
        }

        // Validate every edge before touching the store.
        let n = self.points.len();
        let edge_count = if self.close { n } else { n - 1 };
        let mut lines = Vec::with_capacity(edge_count);
        for i in 0..edge_count {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let line = Line::new(a, b - a)?;
            lines.push((line, (b - a).norm()));
        }

        let vertices: Vec<_> = self
            .points
            .iter()
            .map(|&p| store.add_vertex(VertexData::new(p)))
            .collect();

        let edges = lines
            .into_iter()
            .enumerate()
            .map(|(i, (line, length))| {
                let edge = store.add_edge(EdgeData {
                    start: vertices[i],
                    end: vertices[(i + 1) % n],
                    curve: EdgeCurve::Line(line),
                    t_start: 0.0,
                    t_end: length,
                });
                OrientedEdge::new(edge, true)
            })
            .collect();

        Ok(store.add_wire(WireData {
            edges,
            is_closed: self.close,
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, LatticeError};

    #[test]
    fn closed_square_has_four_edges() {
        let mut store = TopologyStore::new();
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let wire = MakeWire::new(pts.clone(), true).execute(&mut store).unwrap();
        let data = store.wire(wire).unwrap();
        assert_eq!(data.edges.len(), 4);
        assert!(data.is_closed);
        assert_eq!(store.wire_points(wire).unwrap(), pts);
    }

    #[test]
    fn repeated_point_is_rejected() {
        let mut store = TopologyStore::new();
        let result = MakeWire::new(vec![Point3::origin(), Point3::origin()], false).execute(&mut store);
        assert!(matches!(result, Err(LatticeError::Geometry(GeometryError::ZeroVector))));
    }

    #[test]
    fn too_few_points() {
        let mut store = TopologyStore::new();
        let result = MakeWire::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)], true)
            .execute(&mut store);
        assert!(result.is_err());
    }
}
