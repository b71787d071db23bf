pub mod edge;
pub mod face;
pub mod shell;
pub mod solid;
pub mod vertex;
pub mod wire;

pub use edge::{EdgeCurve, EdgeData, EdgeId};
pub use face::{FaceData, FaceId, FaceSurface};
pub use shell::{ShellData, ShellId};
pub use solid::{SolidData, SolidId};
pub use vertex::{VertexData, VertexId};
pub use wire::{OrientedEdge, WireData, WireId};

use crate::error::TopologyError;
use crate::math::Point3;
use slotmap::SlotMap;

/// A handle to a top-level piece of geometry held in a [`TopologyStore`].
///
/// This is the closed set of shapes the lattice pipeline accepts and emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// A boundary representation (possibly a single open face).
    Solid(SolidId),
    /// A standalone face.
    Surface(FaceId),
    /// A standalone wire.
    Curve(WireId),
}

/// Central arena that owns all topological entities.
///
/// Entities reference each other via typed IDs (generational indices),
/// avoiding self-referential structures and enabling safe mutation.
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    wires: SlotMap<WireId, WireData>,
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
    solids: SlotMap<SolidId, SolidData>,
}

/// Generates insert / get / `get_mut` accessors for one arena.
macro_rules! arena_accessors {
    ($field:ident, $add:ident, $get:ident, $get_mut:ident, $id:ty, $data:ty, $label:literal) => {
        #[doc = concat!("Inserts a ", $label, " and returns its ID.")]
        pub fn $add(&mut self, data: $data) -> $id {
            self.$field.insert(data)
        }

        #[doc = concat!("Returns a reference to the ", $label, " data.")]
        ///
        /// # Errors
        ///
        /// Returns an error if the entity is not found in the store.
        pub fn $get(&self, id: $id) -> Result<&$data, TopologyError> {
            self.$field
                .get(id)
                .ok_or_else(|| TopologyError::EntityNotFound($label.into()))
        }

        #[doc = concat!("Returns a mutable reference to the ", $label, " data.")]
        ///
        /// # Errors
        ///
        /// Returns an error if the entity is not found in the store.
        pub fn $get_mut(&mut self, id: $id) -> Result<&mut $data, TopologyError> {
            self.$field
                .get_mut(id)
                .ok_or_else(|| TopologyError::EntityNotFound($label.into()))
        }
    };
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    arena_accessors!(vertices, add_vertex, vertex, vertex_mut, VertexId, VertexData, "vertex");
    arena_accessors!(edges, add_edge, edge, edge_mut, EdgeId, EdgeData, "edge");
    arena_accessors!(wires, add_wire, wire, wire_mut, WireId, WireData, "wire");
    arena_accessors!(faces, add_face, face, face_mut, FaceId, FaceData, "face");
    arena_accessors!(shells, add_shell, shell, shell_mut, ShellId, ShellData, "shell");
    arena_accessors!(solids, add_solid, solid, solid_mut, SolidId, SolidData, "solid");

    /// Number of solids currently held.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    /// All faces of a solid: outer shell first, then void shells, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or one of its shells is missing.
    pub fn solid_faces(&self, id: SolidId) -> Result<Vec<FaceId>, TopologyError> {
        let solid = self.solid(id)?;
        let mut faces = self.shell(solid.outer_shell)?.faces.clone();
        for &inner in &solid.inner_shells {
            faces.extend_from_slice(&self.shell(inner)?.faces);
        }
        Ok(faces)
    }

    /// The outer and inner wires of a face, outer first.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is missing.
    pub fn face_wires(&self, id: FaceId) -> Result<Vec<WireId>, TopologyError> {
        let face = self.face(id)?;
        let mut wires = Vec::with_capacity(1 + face.inner_wires.len());
        wires.push(face.outer_wire);
        wires.extend_from_slice(&face.inner_wires);
        Ok(wires)
    }

    /// Vertex positions of a wire in traversal order (one per edge).
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced entity is missing.
    pub fn wire_points(&self, id: WireId) -> Result<Vec<Point3>, TopologyError> {
        let wire = self.wire(id)?;
        let mut points = Vec::with_capacity(wire.edges.len() + 1);
        for oe in &wire.edges {
            let edge = self.edge(oe.edge)?;
            let start = if oe.forward { edge.start } else { edge.end };
            points.push(self.vertex(start)?.point);
        }
        if !wire.is_closed {
            if let Some(last) = wire.edges.last() {
                let edge = self.edge(last.edge)?;
                let end = if last.forward { edge.end } else { edge.start };
                points.push(self.vertex(end)?.point);
            }
        }
        Ok(points)
    }

    /// All faces reachable from a geometry handle.
    ///
    /// A curve has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle or its children are missing.
    pub fn geometry_faces(&self, geometry: Geometry) -> Result<Vec<FaceId>, TopologyError> {
        match geometry {
            Geometry::Solid(id) => self.solid_faces(id),
            Geometry::Surface(id) => {
                self.face(id)?;
                Ok(vec![id])
            }
            Geometry::Curve(id) => {
                self.wire(id)?;
                Ok(Vec::new())
            }
        }
    }
}
