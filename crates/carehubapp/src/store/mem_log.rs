use super::{AppendLog, LogKey};
use crate::error::{CareError, Result};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory lead log for testing.
///
/// Uses `RefCell` for interior mutability so the trait can take `&self`.
#[derive(Default)]
pub struct MemLog {
    entries: RefCell<HashMap<LogKey, Vec<Value>>>,
    revisions: RefCell<HashMap<LogKey, u64>>,
    simulate_write_error: RefCell<bool>,
}

impl MemLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl AppendLog for MemLog {
    fn append(&self, key: LogKey, entry: Value) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(CareError::Store("Simulated write error".to_string()));
        }
        self.entries
            .borrow_mut()
            .entry(key)
            .or_default()
            .insert(0, entry);
        *self.revisions.borrow_mut().entry(key).or_default() += 1;
        Ok(())
    }

    fn list(&self, key: LogKey) -> Result<Vec<Value>> {
        Ok(self
            .entries
            .borrow()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    fn revision(&self, key: LogKey) -> Result<u64> {
        Ok(self
            .revisions
            .borrow()
            .get(&key)
            .copied()
            .unwrap_or_default())
    }
}
