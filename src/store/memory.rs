use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{StorageError, StoragePort};

/// In-memory storage backend with shared-handle semantics: clones observe
/// the same slots, mirroring how two readers see one browser-local store.
/// Single-threaded by design — the editor has exactly one mutator.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
    read_only: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write or remove fail, simulating an exhausted
    /// storage quota. Reads keep working.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    /// Raw slot contents, for inspection in tests.
    pub fn raw(&self, slot: &str) -> Option<String> {
        self.slots.borrow().get(slot).cloned()
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(slot).cloned())
    }

    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only.get() {
            return Err(StorageError("storage quota exceeded".into()));
        }
        self.slots
            .borrow_mut()
            .insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> Result<(), StorageError> {
        if self.read_only.get() {
            return Err(StorageError("storage quota exceeded".into()));
        }
        self.slots.borrow_mut().remove(slot);
        Ok(())
    }
}
