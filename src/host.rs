//! Seams implemented by the authoring host.
//!
//! The crate never talks to a document directly. A host supplies a
//! [`GeometryResolver`] to coerce opaque references into geometry and a
//! [`BakeTarget`] to persist results.

use tracing::{debug, info, warn};

use crate::config::LatticeConfig;
use crate::error::Result;
use crate::lattice::{HostGeometry, LatticeOutput};
use crate::topology::Geometry;

/// Best-effort coercion of host references into geometry.
pub trait GeometryResolver {
    /// Resolves a reference, or returns `None` when it names nothing usable.
    ///
    /// The result may itself be another reference or wrapper; the caller
    /// keeps unwrapping up to a fixed depth.
    fn resolve(&self, reference: &str) -> Option<HostGeometry>;
}

/// A resolver that recognizes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl GeometryResolver for NoResolver {
    fn resolve(&self, _reference: &str) -> Option<HostGeometry> {
        None
    }
}

/// Handle to a layer in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u32);

/// A host document that generated geometry can be written to.
pub trait BakeTarget {
    /// Returns the layer named `name`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Layer`](crate::error::HostError::Layer) if the
    /// layer cannot be created.
    fn ensure_layer(&mut self, name: &str) -> Result<LayerId>;

    /// Adds one geometry to the document on `layer`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Write`](crate::error::HostError::Write) if the
    /// document rejects the object.
    fn place(&mut self, geometry: &Geometry, layer: LayerId) -> Result<()>;
}

/// Outcome of a bake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BakeReport {
    /// Objects written to the document.
    pub placed: usize,
    /// Objects the document refused.
    pub failed: usize,
}

/// Writes every generated object to the configured layer.
///
/// Does nothing unless `config.bake` is set. A failed placement is logged
/// and counted; the remaining objects are still placed.
pub fn bake(output: &LatticeOutput, target: &mut dyn BakeTarget, config: &LatticeConfig) -> BakeReport {
    if !config.bake {
        return BakeReport::default();
    }
    let items = output.all();
    let layer = match target.ensure_layer(&config.layer) {
        Ok(layer) => layer,
        Err(err) => {
            warn!(layer = %config.layer, %err, "bake skipped: layer unavailable");
            return BakeReport {
                placed: 0,
                failed: items.len(),
            };
        }
    };

    let mut report = BakeReport::default();
    for (index, geometry) in items.iter().enumerate() {
        match target.place(geometry, layer) {
            Ok(()) => report.placed += 1,
            Err(err) => {
                debug!(index, %err, "bake placement failed");
                report.failed += 1;
            }
        }
    }
    info!(
        layer = %config.layer,
        placed = report.placed,
        failed = report.failed,
        "bake finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use crate::topology::TopologyStore;
    use crate::operations::creation::MakeWire;
    use crate::math::Point3;

    #[derive(Default)]
    struct Document {
        refuse_layer: bool,
        refuse_every: Option<usize>,
        attempts: usize,
        placed: Vec<(Geometry, LayerId)>,
    }

    impl BakeTarget for Document {
        fn ensure_layer(&mut self, name: &str) -> Result<LayerId> {
            if self.refuse_layer {
                return Err(HostError::Layer(name.into()).into());
            }
            Ok(LayerId(7))
        }

        fn place(&mut self, geometry: &Geometry, layer: LayerId) -> Result<()> {
            self.attempts += 1;
            if self.refuse_every.is_some_and(|n| self.attempts % n == 0) {
                return Err(HostError::Write("locked".into()).into());
            }
            self.placed.push((*geometry, layer));
            Ok(())
        }
    }

    fn output(count: usize) -> LatticeOutput {
        let mut store = TopologyStore::new();
        let curves = (0..count)
            .filter_map(|k| {
                #[allow(clippy::cast_precision_loss)]
                let x = k as f64;
                MakeWire::new(vec![Point3::new(x, 0.0, 0.0), Point3::new(x, 1.0, 0.0)], false)
                    .execute(&mut store)
                    .ok()
                    .map(Geometry::Curve)
            })
            .collect::<Vec<_>>();
        LatticeOutput {
            primary: Some(curves.clone()),
            bars: None,
            panels: Some(curves),
        }
    }

    #[test]
    fn bake_is_gated_by_flag() {
        let mut doc = Document::default();
        let report = bake(&output(3), &mut doc, &LatticeConfig::default());
        assert_eq!(report, BakeReport::default());
        assert!(doc.placed.is_empty());
    }

    #[test]
    fn placement_failures_do_not_stop_the_rest() {
        let mut doc = Document {
            refuse_every: Some(2),
            ..Document::default()
        };
        let config = LatticeConfig::default().with_bake("fab");
        let report = bake(&output(5), &mut doc, &config);
        assert_eq!(report, BakeReport { placed: 3, failed: 2 });
        assert!(doc.placed.iter().all(|(_, layer)| *layer == LayerId(7)));
    }

    #[test]
    fn missing_layer_fails_everything() {
        let mut doc = Document {
            refuse_layer: true,
            ..Document::default()
        };
        let config = LatticeConfig::default().with_bake("fab");
        let report = bake(&output(4), &mut doc, &config);
        assert_eq!(report, BakeReport { placed: 0, failed: 4 });
        assert_eq!(doc.attempts, 0);
    }

    #[test]
    fn no_resolver_resolves_nothing() {
        assert!(NoResolver.resolve("anything").is_none());
    }
}
