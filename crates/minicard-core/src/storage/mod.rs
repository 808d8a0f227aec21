//! Key-value persistence backends
//!
//! The state store writes one serialized snapshot under a single key. A
//! backend only has to move opaque strings in and out of named slots.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// Abstract interface for string slots addressed by key.
pub trait KeyValueStore {
    /// Read a slot. Returns `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a slot. MUST replace the previous value in a single step.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Drop every slot managed by this store.
    fn clear(&mut self) -> Result<()>;
}
