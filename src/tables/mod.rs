//! Symbol tables and their entries

use crate::error::{DxfError, Result};
use crate::types::Handle;
use indexmap::IndexMap;

pub mod block_record;
pub mod linetype;
pub mod textstyle;

pub use block_record::BlockRecord;
pub use linetype::LineType;
pub use textstyle::TextStyle;

/// Base trait for all table entries
pub trait TableEntry {
    /// Get the entry's unique handle
    fn handle(&self) -> Handle;

    /// Set the entry's handle
    fn set_handle(&mut self, handle: Handle);

    /// Get the entry's name
    fn name(&self) -> &str;

    /// Set the entry's name
    fn set_name(&mut self, name: String);
}

/// Generic table for storing named entries
///
/// Lookup is case-insensitive; iteration preserves insertion order.
#[derive(Debug, Clone)]
pub struct Table<T: TableEntry> {
    /// Entries stored by uppercased name
    entries: IndexMap<String, T>,
    /// Table handle
    handle: Handle,
}

impl<T: TableEntry> Table<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
            handle: Handle::NULL,
        }
    }

    /// Get the table's handle
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Set the table's handle
    pub fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    /// Add an entry to the table
    pub fn add(&mut self, entry: T) -> Result<()> {
        let key = entry.name().to_uppercase();
        if self.entries.contains_key(&key) {
            return Err(DxfError::AlreadyExists(entry.name().to_string()));
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Get an entry by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&name.to_uppercase())
    }

    /// Get a mutable entry by name (case-insensitive)
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(&name.to_uppercase())
    }

    /// Find an entry by its handle
    pub fn get_by_handle(&self, handle: Handle) -> Option<&T> {
        self.entries.values().find(|e| e.handle() == handle)
    }

    /// Find a mutable entry by its handle
    pub fn get_by_handle_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.entries.values_mut().find(|e| e.handle() == handle)
    }

    /// Remove an entry by name (case-insensitive)
    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.entries.shift_remove(&name.to_uppercase())
    }

    /// Rename an entry, keeping its handle stable
    ///
    /// Fails when `old_name` does not exist or `new_name` is already taken
    /// by a different entry.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        let old_key = old_name.to_uppercase();
        let new_key = new_name.to_uppercase();
        if !self.entries.contains_key(&old_key) {
            return Err(DxfError::NotFound(old_name.to_string()));
        }
        if new_key != old_key && self.entries.contains_key(&new_key) {
            return Err(DxfError::AlreadyExists(new_name.to_string()));
        }
        // shift_remove keeps the relative order of the remaining entries
        let mut entry = self
            .entries
            .shift_remove(&old_key)
            .ok_or_else(|| DxfError::NotFound(old_name.to_string()))?;
        entry.set_name(new_name.to_string());
        self.entries.insert(new_key, entry);
        Ok(())
    }

    /// Check if an entry exists (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Iterate over all entries mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }

    /// Get all entry names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name())
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
