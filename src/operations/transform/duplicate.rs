use std::collections::HashMap;

use crate::error::Result;
use crate::topology::{
    EdgeId, FaceData, FaceId, Geometry, OrientedEdge, ShellData, ShellId, SolidData,
    TopologyStore, VertexId, WireData, WireId,
};

/// Deep-copies a geometry, returning a handle to the independent copy.
///
/// Sharing inside the source (a vertex used by several edges, an edge used
/// by two faces) is preserved in the copy.
pub struct Duplicate {
    geometry: Geometry,
}

impl Duplicate {
    /// Creates a new `Duplicate` operation.
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }

    /// Executes the copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry or one of its children is missing.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<Geometry> {
        let mut copier = Copier::default();
        Ok(match self.geometry {
            Geometry::Solid(id) => {
                let solid = store.solid(id)?.clone();
                let outer = copier.shell(store, solid.outer_shell)?;
                let mut data = SolidData::new(outer);
                for inner in solid.inner_shells {
                    data.inner_shells.push(copier.shell(store, inner)?);
                }
                Geometry::Solid(store.add_solid(data))
            }
            Geometry::Surface(id) => Geometry::Surface(copier.face(store, id)?),
            Geometry::Curve(id) => Geometry::Curve(copier.wire(store, id)?),
        })
    }
}

/// Old-to-new id maps for one copy.
#[derive(Default)]
struct Copier {
    vertices: HashMap<VertexId, VertexId>,
    edges: HashMap<EdgeId, EdgeId>,
    wires: HashMap<WireId, WireId>,
}

impl Copier {
    fn shell(&mut self, store: &mut TopologyStore, id: ShellId) -> Result<ShellId> {
        let shell = store.shell(id)?.clone();
        let mut faces = Vec::with_capacity(shell.faces.len());
        for face in shell.faces {
            faces.push(self.face(store, face)?);
        }
        Ok(store.add_shell(ShellData {
            faces,
            is_closed: shell.is_closed,
        }))
    }

    fn face(&mut self, store: &mut TopologyStore, id: FaceId) -> Result<FaceId> {
        let face = store.face(id)?.clone();
        let outer_wire = self.wire(store, face.outer_wire)?;
        let mut inner_wires = Vec::with_capacity(face.inner_wires.len());
        for wire in &face.inner_wires {
            inner_wires.push(self.wire(store, *wire)?);
        }
        Ok(store.add_face(FaceData {
            outer_wire,
            inner_wires,
            ..face
        }))
    }

    fn wire(&mut self, store: &mut TopologyStore, id: WireId) -> Result<WireId> {
        if let Some(&copy) = self.wires.get(&id) {
            return Ok(copy);
        }
        let wire = store.wire(id)?.clone();
        let mut edges = Vec::with_capacity(wire.edges.len());
        for oe in &wire.edges {
            edges.push(OrientedEdge::new(self.edge(store, oe.edge)?, oe.forward));
        }
        let copy = store.add_wire(WireData {
            edges,
            is_closed: wire.is_closed,
        });
        self.wires.insert(id, copy);
        Ok(copy)
    }

    fn edge(&mut self, store: &mut TopologyStore, id: EdgeId) -> Result<EdgeId> {
        if let Some(&copy) = self.edges.get(&id) {
            return Ok(copy);
        }
        let mut edge = store.edge(id)?.clone();
        edge.start = self.vertex(store, edge.start)?;
        edge.end = self.vertex(store, edge.end)?;
        let copy = store.add_edge(edge);
        self.edges.insert(id, copy);
        Ok(copy)
    }

    fn vertex(&mut self, store: &mut TopologyStore, id: VertexId) -> Result<VertexId> {
        if let Some(&copy) = self.vertices.get(&id) {
            return Ok(copy);
        }
        let data = store.vertex(id)?.clone();
        let copy = store.add_vertex(data);
        self.vertices.insert(id, copy);
        Ok(copy)
    }
}
