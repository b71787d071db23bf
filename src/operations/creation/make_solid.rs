use crate::error::Result;
use crate::topology::{ShellId, SolidData, SolidId, TopologyStore};

/// Creates a solid from an outer shell and optional void shells.
pub struct MakeSolid {
    outer_shell: ShellId,
    inner_shells: Vec<ShellId>,
}

impl MakeSolid {
    /// Creates a new `MakeSolid` operation.
    #[must_use]
    pub fn new(outer_shell: ShellId, inner_shells: Vec<ShellId>) -> Self {
        Self {
            outer_shell,
            inner_shells,
        }
    }

    /// Executes the operation, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the shells is missing from the store.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        store.shell(self.outer_shell)?;
        for &shell in &self.inner_shells {
            store.shell(shell)?;
        }
        let mut data = SolidData::new(self.outer_shell);
        data.inner_shells.clone_from(&self.inner_shells);
        Ok(store.add_solid(data))
    }
}
