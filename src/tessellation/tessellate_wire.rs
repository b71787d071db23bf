use crate::error::Result;
use crate::geometry::curve::Curve;
use crate::math::Point3;
use crate::topology::{EdgeCurve, TopologyStore, WireId};

use super::{Polyline, TessellationParams};

/// Tessellates a wire into a polyline.
///
/// Closed wires repeat their first point at the end.
pub struct TessellateWire {
    wire: WireId,
    params: TessellationParams,
}

impl TessellateWire {
    /// Creates a new `TessellateWire` operation.
    #[must_use]
    pub fn new(wire: WireId, params: TessellationParams) -> Self {
        Self { wire, params }
    }

    /// Executes the tessellation, returning a polyline.
    ///
    /// # Errors
    ///
    /// Returns an error if the wire or one of its edges cannot be evaluated.
    pub fn execute(&self, store: &TopologyStore) -> Result<Polyline> {
        let mut points = wire_samples(store, self.wire, &self.params)?;
        if store.wire(self.wire)?.is_closed {
            if let Some(&first) = points.first() {
                points.push(first);
            }
        }
        Ok(Polyline { points })
    }
}

/// Samples a wire in traversal order, refining arc edges.
///
/// Each edge contributes its start point plus interior samples. Open wires
/// also get their final end point; closed loops do not repeat the start.
pub(crate) fn wire_samples(
    store: &TopologyStore,
    wire_id: WireId,
    params: &TessellationParams,
) -> Result<Vec<Point3>> {
    let wire = store.wire(wire_id)?;
    let mut points = Vec::new();
    let mut tail = None;

    for oe in &wire.edges {
        let edge = store.edge(oe.edge)?;
        let (t_start, t_end) = if oe.forward {
            (edge.t_start, edge.t_end)
        } else {
            (edge.t_end, edge.t_start)
        };

        let curve: &dyn Curve = match &edge.curve {
            EdgeCurve::Line(line) => line,
            EdgeCurve::Arc(arc) => arc,
        };
        let n = match &edge.curve {
            EdgeCurve::Line(_) => 1,
            EdgeCurve::Arc(arc) => params.angular_segments(arc.radius(), t_end - t_start),
        };
        for i in 0..n {
            #[allow(clippy::cast_precision_loss)]
            let t = t_start + (t_end - t_start) * (i as f64 / n as f64);
            points.push(curve.evaluate(t)?);
        }
        tail = Some(curve.evaluate(t_end)?);
    }

    if !wire.is_closed {
        points.extend(tail);
    }
    Ok(points)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakeWire;

    #[test]
    fn open_wire_keeps_both_ends() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)],
            false,
        )
        .execute(&mut store)
        .unwrap();
        let line = TessellateWire::new(wire, TessellationParams::default())
            .execute(&store)
            .unwrap();
        assert_eq!(line.points.len(), 3);
        assert!((line.points[2] - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn closed_wire_repeats_start() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            true,
        )
        .execute(&mut store)
        .unwrap();
        let samples = wire_samples(&store, wire, &TessellationParams::default()).unwrap();
        assert_eq!(samples.len(), 3);
        let line = TessellateWire::new(wire, TessellationParams::default())
            .execute(&store)
            .unwrap();
        assert_eq!(line.points.len(), 4);
        assert_eq!(line.points[0], line.points[3]);
    }
}
