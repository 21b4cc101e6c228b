//! Container: the capability set shared by every backend.
//!
//! The interpreter talks to containers only through this trait. Operations
//! a backend has no meaning for return `ContainerError::Unsupported`
//! instead of being left out.

use crate::entry::Entry;
use crate::error::ContainerError;

/// Uniform interface over the three backends.
///
/// All read-only methods take `&self`; none of them may change what
/// `get_data_simple` reports.
pub trait Container {
    /// Human-readable structure name, e.g. `"hash-table"`.
    fn get_struct_type(&self) -> &'static str;

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Some entry with `key`, or `None` if no such entry is stored.
    fn find(&self, key: i32) -> Option<Entry>;

    /// Store a new entry. Duplicates are always accepted.
    fn add(&mut self, key: i32, value: i32);

    /// Remove one entry and return it.
    ///
    /// Key-addressed for the tree and hash table, index-addressed for the
    /// sorted array. On failure nothing is mutated.
    fn delete(&mut self, key_or_index: i32) -> Result<Entry, ContainerError>;

    fn get_min(&self) -> Result<Entry, ContainerError>;

    fn get_max(&self) -> Result<Entry, ContainerError>;

    /// Positional access; only meaningful for index-ordered storage.
    fn get_at(&self, _index: i32) -> Result<Entry, ContainerError> {
        Err(self.unsupported("get_at"))
    }

    /// Full textual rendering.
    fn get_data(&self) -> String;

    /// Compact rendering used for diagnostics and equality checks.
    fn get_data_simple(&self) -> String;

    /// Summary of sizing parameters.
    fn get_state(&self) -> Result<String, ContainerError>;

    /// Type, state (when supported) and simplified data in one block.
    fn print(&self) -> String {
        let mut out = format!("STRUCTURE TYPE:\n{}\n", self.get_struct_type());
        if let Ok(state) = self.get_state() {
            out.push_str("STATE:\n");
            out.push_str(&state);
            out.push('\n');
        }
        out.push_str("DATA:\n");
        out.push_str(&self.get_data_simple());
        out
    }

    /// Build the `Unsupported` outcome for `operation` on this backend.
    fn unsupported(&self, operation: &'static str) -> ContainerError {
        ContainerError::Unsupported {
            operation,
            structure: self.get_struct_type(),
        }
    }
}
