use tracing::debug;

use crate::config::Style;
use crate::tessellation::{TessellateFace, TessellateSolid, TessellationParams, TriangleMesh};
use crate::topology::{Geometry, TopologyStore};

/// The three output collections of a lattice run. `None` means empty.
///
/// Only kernel geometry can appear here. Inputs that do not normalize to a
/// solid, surface or curve are dropped with a warning rather than passed
/// through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatticeOutput {
    /// The collection matching the configured style.
    pub primary: Option<Vec<Geometry>>,
    /// Swept bars.
    pub bars: Option<Vec<Geometry>>,
    /// Panels, plus curves passed through.
    pub panels: Option<Vec<Geometry>>,
}

impl LatticeOutput {
    /// Bars followed by panels.
    #[must_use]
    pub fn all(&self) -> Vec<Geometry> {
        self.bars
            .iter()
            .chain(&self.panels)
            .flatten()
            .copied()
            .collect()
    }

    /// Returns `true` when nothing was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_none() && self.panels.is_none()
    }

    /// One combined mesh of every solid and surface, for preview.
    ///
    /// Curves contribute nothing; items that fail to tessellate are skipped.
    #[must_use]
    pub fn to_mesh(&self, store: &TopologyStore, params: TessellationParams) -> TriangleMesh {
        let mut mesh = TriangleMesh::default();
        for geometry in self.all() {
            let part = match geometry {
                Geometry::Solid(id) => TessellateSolid::new(id, params).execute(store),
                Geometry::Surface(id) => TessellateFace::new(id, params).execute(store),
                Geometry::Curve(_) => continue,
            };
            match part {
                Ok(part) => mesh.merge(&part),
                Err(err) => debug!(?geometry, %err, "preview mesh skipped item"),
            }
        }
        mesh
    }
}

/// Collects per-input results in input order.
#[derive(Debug)]
pub struct OutputAssembler {
    style: Style,
    bars: Vec<Geometry>,
    panels: Vec<Geometry>,
}

impl OutputAssembler {
    /// Creates an empty assembler for a run of the given style.
    #[must_use]
    pub fn new(style: Style) -> Self {
        Self {
            style,
            bars: Vec::new(),
            panels: Vec::new(),
        }
    }

    /// Appends bars built for one input.
    pub fn push_bars(&mut self, bars: impl IntoIterator<Item = Geometry>) {
        self.bars.extend(bars);
    }

    /// Appends panels built for one input.
    pub fn push_panels(&mut self, panels: impl IntoIterator<Item = Geometry>) {
        self.panels.extend(panels);
    }

    /// Passes an input through unchanged, alongside the panels.
    pub fn push_passthrough(&mut self, geometry: Geometry) {
        self.panels.push(geometry);
    }

    /// Finishes the run.
    #[must_use]
    pub fn finish(self) -> LatticeOutput {
        let non_empty = |items: Vec<Geometry>| (!items.is_empty()).then_some(items);
        let bars = non_empty(self.bars);
        let panels = non_empty(self.panels);
        let primary = match self.style {
            Style::Bar => bars.clone(),
            Style::Panel => panels.clone(),
        };
        LatticeOutput {
            primary,
            bars,
            panels,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::{MakeBox, MakeWire};

    #[test]
    fn empty_run_is_all_none() {
        let output = OutputAssembler::new(Style::Bar).finish();
        assert_eq!(output, LatticeOutput::default());
        assert!(output.is_empty());
        assert!(output.all().is_empty());
    }

    #[test]
    fn primary_follows_style() {
        let mut store = TopologyStore::new();
        let solid = Geometry::Solid(
            MakeBox::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
                .execute(&mut store)
                .unwrap(),
        );
        let wire = Geometry::Curve(
            MakeWire::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)], false)
                .execute(&mut store)
                .unwrap(),
        );

        let mut bar_run = OutputAssembler::new(Style::Bar);
        bar_run.push_bars([solid]);
        bar_run.push_passthrough(wire);
        let output = bar_run.finish();
        assert_eq!(output.primary, Some(vec![solid]));
        assert_eq!(output.all(), vec![solid, wire]);

        let mut panel_run = OutputAssembler::new(Style::Panel);
        panel_run.push_passthrough(wire);
        let output = panel_run.finish();
        assert_eq!(output.primary, Some(vec![wire]));
        assert!(output.bars.is_none());

        let mesh = output.to_mesh(&store, TessellationParams::default());
        assert!(mesh.is_empty());
    }

    #[test]
    fn preview_mesh_covers_solids() {
        let mut store = TopologyStore::new();
        let solid = Geometry::Solid(
            MakeBox::new(Point3::origin(), Point3::new(1.0, 2.0, 3.0))
                .execute(&mut store)
                .unwrap(),
        );
        let mut run = OutputAssembler::new(Style::Bar);
        run.push_bars([solid]);
        let mesh = run.finish().to_mesh(&store, TessellationParams::default());
        assert!((mesh.area() - 22.0).abs() < 1e-9);
    }
}
