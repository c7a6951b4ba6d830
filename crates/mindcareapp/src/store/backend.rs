use crate::error::Result;

/// Abstract interface for raw slot I/O.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`Store`](super::Store) handles the "what" (JSON encoding, fallbacks,
/// capped lists). Slots hold text exactly as written; backends never parse.
pub trait StorageBackend {
    /// Read the raw text of a slot. `Ok(None)` when the slot is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the slot with `value`.
    /// MUST be atomic: readers see either the old or the new text.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the slot. Removing an absent slot is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
