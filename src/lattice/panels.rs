use tracing::{debug, info};

use crate::config::{LatticeConfig, MAX_INSET};
use crate::error::{OperationError, Result};
use crate::math::polygon_3d::{inset_toward_centroid, max_plane_deviation, polygon_area};
use crate::math::{Point3, TOLERANCE};
use crate::operations::creation::{MakeFace, MakeSolid, MakeWire};
use crate::topology::{Geometry, ShellData, TopologyStore};

use super::grid::Lattice;

/// Which diagonal a triangulated cell is split along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDiagonal {
    /// `p00`–`p11`.
    Main,
    /// `p10`–`p01`.
    Anti,
}

impl SplitDiagonal {
    /// Checkerboard rule: even `i + j` splits along the main diagonal.
    #[must_use]
    pub fn for_cell(i: usize, j: usize) -> Self {
        if (i + j) % 2 == 0 {
            Self::Main
        } else {
            Self::Anti
        }
    }

    /// The two triangles of a cell given as `[p00, p10, p11, p01]`.
    #[must_use]
    pub fn triangles(self, [p00, p10, p11, p01]: [Point3; 4]) -> [[Point3; 3]; 2] {
        match self {
            Self::Main => [[p00, p10, p11], [p00, p11, p01]],
            Self::Anti => [[p00, p10, p01], [p10, p11, p01]],
        }
    }
}

/// Tiles a lattice with flat panels, one per cell or two when triangulated.
#[derive(Debug, Clone)]
pub struct PanelBuilder {
    inset: f64,
    triangulate: bool,
    tolerance: f64,
}

impl PanelBuilder {
    /// Default maximum out-of-plane deviation.
    pub const DEFAULT_TOLERANCE: f64 = 1e-3;

    /// Creates a builder. `inset` is clamped to `[0, 0.45]`.
    #[must_use]
    pub fn new(inset: f64, triangulate: bool) -> Self {
        Self {
            inset: if inset.is_finite() { inset.clamp(0.0, MAX_INSET) } else { 0.0 },
            triangulate,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }

    /// Creates a builder from the run configuration.
    #[must_use]
    pub fn from_config(config: &LatticeConfig) -> Self {
        Self::new(config.inset, config.triangulate).with_tolerance(config.tolerance)
    }

    /// Sets the planarity tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Panel outlines in row-major cell order, after inset.
    #[must_use]
    pub fn outlines(&self, lattice: &Lattice) -> Vec<Vec<Point3>> {
        let mut outlines = Vec::new();
        for i in 0..lattice.u_count().saturating_sub(1) {
            for j in 0..lattice.v_count().saturating_sub(1) {
                let Some(corners) = lattice.cell(i, j) else {
                    continue;
                };
                let inset = inset_toward_centroid(&corners, self.inset);
                let Ok(corners) = <[Point3; 4]>::try_from(inset) else {
                    continue;
                };
                if self.triangulate {
                    outlines.extend(SplitDiagonal::for_cell(i, j).triangles(corners).map(Vec::from));
                } else {
                    outlines.push(corners.to_vec());
                }
            }
        }
        outlines
    }

    /// Builds every planar outline as a single-face panel.
    pub fn build(&self, store: &mut TopologyStore, lattice: &Lattice) -> Vec<Geometry> {
        let outlines = self.outlines(lattice);
        let mut panels = Vec::with_capacity(outlines.len());
        for (index, outline) in outlines.iter().enumerate() {
            match self.panel(store, outline) {
                Ok(panel) => panels.push(panel),
                Err(err) => debug!(index, %err, "panel skipped"),
            }
        }
        info!(
            built = panels.len(),
            skipped = outlines.len() - panels.len(),
            "panels built"
        );
        panels
    }

    fn panel(&self, store: &mut TopologyStore, outline: &[Point3]) -> Result<Geometry> {
        if polygon_area(outline) < TOLERANCE {
            return Err(OperationError::Failed("panel has no area".into()).into());
        }
        let deviation = max_plane_deviation(outline)?;
        if deviation > self.tolerance {
            return Err(OperationError::Failed(format!(
                "panel deviates {deviation:.3e} from its plane"
            ))
            .into());
        }
        let wire = MakeWire::new(outline.to_vec(), true).execute(store)?;
        let face = MakeFace::new(wire, vec![]).execute(store)?;
        let shell = store.add_shell(ShellData::open(vec![face]));
        Ok(Geometry::Solid(MakeSolid::new(shell, vec![]).execute(store)?))
    }
}
