//! ## Results cache
//!
//! Append-only store of the results resolved for intercepted calls.
//!
//! Lookups scan the entries from the most recent to the oldest so that a later entry
//! shadows an earlier one without ever removing or changing a stored entry.

use std::sync::{Arc, PoisonError, RwLock};

use crate::call::Call;
use crate::entities::CallResultData;
use crate::specification::CallSpecification;

struct CacheEntry {
    specification: Box<dyn CallSpecification>,
    result: Arc<CallResultData>,
}

/// Ordered, append-only cache of call results, safe to share between threads.
pub struct CallResultCache {
    entries: RwLock<Vec<CacheEntry>>,
}

impl CallResultCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Append a result, returned to every call satisfying the given specification.
    pub fn add_result(
        &self,
        specification: Box<dyn CallSpecification>,
        result: Arc<CallResultData>,
    ) {
        // A panicking writer can't leave a partial entry: the push either happened or not.
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.push(CacheEntry {
            specification,
            result,
        });
    }

    /// Get the result of the most recent entry satisfied by the given call.
    pub fn try_get_result(&self, call: &dyn Call) -> Option<Arc<CallResultData>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .rev()
            .find(|entry| entry.specification.is_satisfied_by(call))
            .map(|entry| entry.result.clone())
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if nothing was stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CallResultCache {
    fn default() -> Self {
        Self::new()
    }
}
