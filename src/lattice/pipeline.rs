use tracing::{info, warn};

use crate::config::{LatticeConfig, Style};
use crate::error::{OperationError, Result};
use crate::host::GeometryResolver;
use crate::topology::{Geometry, TopologyStore};

use super::assemble::{LatticeOutput, OutputAssembler};
use super::bars::BarBuilder;
use super::face_select::largest_face;
use super::grid::SurfaceGrid;
use super::normalize::{normalize, HostGeometry, Normalized};
use super::panels::PanelBuilder;
use super::scale::scale_about_centroid;

/// Runs the full lattice generation for a batch of host inputs.
///
/// Each input is normalized, the batch is scaled about its centroid, and
/// every scaled item is turned into bars or panels on its largest face.
/// Curves pass through. A failure on one item is logged and skips only
/// that item.
#[derive(Debug, Clone)]
pub struct LatticePipeline {
    config: LatticeConfig,
}

impl LatticePipeline {
    /// Creates a pipeline; out-of-range settings are floored or clamped.
    #[must_use]
    pub fn new(config: LatticeConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    /// The effective configuration.
    #[must_use]
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// Generates the lattice for `inputs`, inserting results into `store`.
    ///
    /// Inputs are never modified.
    pub fn run(
        &self,
        store: &mut TopologyStore,
        inputs: &[HostGeometry],
        resolver: &dyn GeometryResolver,
    ) -> LatticeOutput {
        let geometries: Vec<Geometry> = inputs
            .iter()
            .filter_map(|input| match normalize(input, resolver) {
                Normalized::Geometry(geometry) => Some(geometry),
                Normalized::Unrecognized(value) => {
                    warn!(?value, "input dropped: not geometry");
                    None
                }
            })
            .collect();
        if geometries.is_empty() {
            return LatticeOutput::default();
        }

        let scaled = scale_about_centroid(store, &geometries, self.config.scale);
        let mut assembler = OutputAssembler::new(self.config.style);
        let mut skipped = 0;
        for (index, &geometry) in scaled.iter().enumerate() {
            if let Err(err) = self.process(store, geometry, &mut assembler) {
                warn!(index, %err, "input skipped");
                skipped += 1;
            }
        }

        let output = assembler.finish();
        info!(
            inputs = inputs.len(),
            processed = scaled.len() - skipped,
            skipped,
            bars = output.bars.as_ref().map_or(0, Vec::len),
            panels = output.panels.as_ref().map_or(0, Vec::len),
            "lattice run finished"
        );
        output
    }

    fn process(&self, store: &mut TopologyStore, geometry: Geometry, assembler: &mut OutputAssembler) -> Result<()> {
        if let Geometry::Curve(_) = geometry {
            assembler.push_passthrough(geometry);
            return Ok(());
        }
        let face = largest_face(store, geometry)
            .ok_or_else(|| OperationError::InvalidInput("geometry has no faces".into()))?;
        let grid = SurfaceGrid::sample(store, face, self.config.u_divisions, self.config.v_divisions)?;
        match self.config.style {
            Style::Bar => assembler.push_bars(BarBuilder::from_config(&self.config).build(store, &grid)),
            Style::Panel => {
                assembler.push_panels(PanelBuilder::from_config(&self.config).build(store, &grid.lattice));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::host::NoResolver;
    use crate::math::Point3;
    use crate::operations::creation::MakeBox;

    #[test]
    fn unrecognized_inputs_are_dropped() {
        let mut store = TopologyStore::new();
        let pipeline = LatticePipeline::new(LatticeConfig::default());
        let output = pipeline.run(&mut store, &[HostGeometry::Reference("nothing".into())], &NoResolver);
        assert!(output.is_empty());
        assert_eq!(store.solid_count(), 0);
    }

    #[test]
    fn box_becomes_panels() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::origin(), Point3::new(4.0, 2.0, 1.0))
            .execute(&mut store)
            .unwrap();
        let config = LatticeConfig::default()
            .with_style(Style::Panel)
            .with_divisions(4, 3)
            .with_scale(1.0);
        let output = LatticePipeline::new(config).run(&mut store, &[HostGeometry::Solid(solid)], &NoResolver);
        assert_eq!(output.panels.as_ref().map(Vec::len), Some(12));
        assert_eq!(output.primary, output.panels);
        assert!(output.bars.is_none());
    }

    #[test]
    fn config_is_sanitized() {
        let pipeline = LatticePipeline::new(LatticeConfig::default().with_divisions(0, 1).with_inset(3.0));
        assert_eq!(pipeline.config().u_divisions, 2);
        assert_eq!(pipeline.config().v_divisions, 2);
        assert!((pipeline.config().inset - 0.45).abs() < f64::EPSILON);
    }
}
