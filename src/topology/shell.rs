use super::face::FaceId;

slotmap::new_key_type! {
    /// Unique identifier for a shell in the topology store.
    pub struct ShellId;
}

/// A connected set of faces.
///
/// Closed shells bound a volume; a lattice panel is a one-face open shell.
#[derive(Debug, Clone)]
pub struct ShellData {
    /// The faces that make up this shell.
    pub faces: Vec<FaceId>,
    /// Whether this shell is closed (watertight).
    pub is_closed: bool,
}

impl ShellData {
    /// A watertight shell.
    #[must_use]
    pub fn closed(faces: Vec<FaceId>) -> Self {
        Self {
            faces,
            is_closed: true,
        }
    }

    /// A shell with free boundary edges.
    #[must_use]
    pub fn open(faces: Vec<FaceId>) -> Self {
        Self {
            faces,
            is_closed: false,
        }
    }
}
