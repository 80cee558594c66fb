use crate::editing::commands::apply_command;
use crate::editing::{Cmd, Key, Patch, Value};

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("No leaf block with key {0} in the document")]
    UnknownKey(Key),
}

/// Owns the current [`Value`] and is the only thing that mutates it.
///
/// Each [`Cmd`] is applied atomically: the value is edited, the document is
/// normalized, the selection repaired and the version bumped. A command that
/// fails leaves the previous value in place.
#[derive(Debug, Clone)]
pub struct Editor {
    value: Value,
    version: u64,
}

impl Editor {
    pub fn new(value: Value) -> Self {
        Self { value, version: 0 }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let mut next = self.value.clone();
        apply_command(&mut next, &cmd)?;
        next.document.normalize();
        next.repair_selection();

        log::trace!("applied {cmd:?}");
        self.value = next;
        self.version += 1;
        Ok(self.patch())
    }

    /// Apply a sequence in order, stopping at the first failure
    pub fn apply_all(&mut self, cmds: impl IntoIterator<Item = Cmd>) -> Result<Patch, EditError> {
        for cmd in cmds {
            self.apply(cmd)?;
        }
        Ok(self.patch())
    }

    /// Swap in a whole new value (load, cancel)
    pub fn replace(&mut self, value: Value) -> Patch {
        self.value = value;
        self.version += 1;
        self.patch()
    }

    fn patch(&self) -> Patch {
        Patch {
            version: self.version,
            block_count: self.value.block_count(),
        }
    }
}
