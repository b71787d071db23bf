use super::shell::ShellId;

slotmap::new_key_type! {
    /// Unique identifier for a solid in the topology store.
    pub struct SolidId;
}

/// Data associated with a topological solid.
///
/// The first shell is the outer boundary; additional shells are voids.
/// An open outer shell makes this a sheet body rather than a volume.
#[derive(Debug, Clone)]
pub struct SolidData {
    /// The outer shell of the solid.
    pub outer_shell: ShellId,
    /// Inner shells representing voids within the solid.
    pub inner_shells: Vec<ShellId>,
}

impl SolidData {
    /// A solid with no voids.
    #[must_use]
    pub fn new(outer_shell: ShellId) -> Self {
        Self {
            outer_shell,
            inner_shells: Vec::new(),
        }
    }
}
