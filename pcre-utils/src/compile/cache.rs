use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::compile::escape;

/// The number of entries an `EscapeCache` holds before it is reset.
pub const CACHE_CAPACITY: usize = 10_000;

/// A bounded map from raw pattern bodies to their escaped form.
///
/// When the cache is full the next miss clears every entry before the new one is stored.
#[derive(Debug)]
pub struct EscapeCache {
    entries: Mutex<HashMap<String, Arc<str>>>,
    capacity: usize,
}

impl Default for EscapeCache {
    fn default() -> Self {
        EscapeCache::new(CACHE_CAPACITY)
    }
}

impl EscapeCache {
    /// Create an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        EscapeCache {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// The maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns `true` if the raw pattern has a cached escaped form.
    pub fn contains(&self, pattern: &str) -> bool {
        self.entries.lock().contains_key(pattern)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().clear()
    }

    /// Return the cached value for `pattern`, computing and storing it on a miss.
    pub fn get_or_compute<F>(&self, pattern: &str, compute: F) -> Arc<str>
    where
        F: FnOnce(&str) -> String,
    {
        let mut entries = self.entries.lock();

        if let Some(value) = entries.get(pattern) {
            return value.clone();
        }

        if entries.len() >= self.capacity {
            debug!("escape cache reached {} entries, reset", entries.len());

            entries.clear();
        }

        let value: Arc<str> = compute(pattern).into();

        trace!("escape cache miss, `{}` => `{}`", pattern, value);

        entries.insert(pattern.to_owned(), value.clone());

        value
    }

    /// The escaped form of a raw pattern body.
    pub fn escape(&self, pattern: &str) -> Arc<str> {
        self.get_or_compute(pattern, escape)
    }
}
