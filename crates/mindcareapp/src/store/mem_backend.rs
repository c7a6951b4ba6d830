use super::backend::StorageBackend;
use crate::error::{MindcareError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the data layer is
/// single-threaded, so the trait can take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    slots: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Number of slots currently present.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl StorageBackend for MemBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(MindcareError::Store("Simulated write error".to_string()));
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(MindcareError::Store("Simulated write error".to_string()));
        }
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let backend = MemBackend::new();
        assert_eq!(backend.get_item("posts").unwrap(), None);

        backend.set_item("posts", "[]").unwrap();
        assert_eq!(backend.get_item("posts").unwrap(), Some("[]".to_string()));

        backend.remove_item("posts").unwrap();
        assert_eq!(backend.get_item("posts").unwrap(), None);
        // Removing twice is fine
        backend.remove_item("posts").unwrap();
    }

    #[test]
    fn test_simulated_write_error() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        assert!(backend.set_item("points", "1").is_err());
        assert!(backend.is_empty());

        backend.set_simulate_write_error(false);
        backend.set_item("points", "1").unwrap();
        assert_eq!(backend.len(), 1);
    }
}
