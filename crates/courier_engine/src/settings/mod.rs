//! Key/value settings storage
//!
//! An opaque string store with optional expiry measured in whole days, the
//! contract persistent preference storage is expected to honour.

use std::collections::HashMap;
use std::time::{Duration, SystemTime};

/// Seconds in one expiry day
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// String key/value storage with optional expiry
pub trait KeyValueStore {
    /// Value for `key`, or `None` when absent or expired
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value`; `expires_in_days = None` keeps it indefinitely
    fn set(&mut self, key: &str, value: &str, expires_in_days: Option<u32>);

    /// Remove `key`; removing an absent key does nothing
    fn delete(&mut self, key: &str);
}

#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    expires_at: Option<SystemTime>,
}

/// In-memory [`KeyValueStore`]
pub struct MemoryStore {
    values: HashMap<String, StoredValue>,
    clock: Box<dyn Fn() -> SystemTime>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Store reading the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemTime::now)
    }

    /// Store reading time from `clock`
    pub fn with_clock(clock: impl Fn() -> SystemTime + 'static) -> Self {
        Self {
            values: HashMap::new(),
            clock: Box::new(clock),
        }
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&mut self) -> usize {
        let now = (self.clock)();
        let before = self.values.len();
        self.values.retain(|_, stored| !is_expired(stored, now));
        before - self.values.len()
    }

    /// Number of stored entries, expired ones included until purged
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let now = (self.clock)();
        self.values
            .get(key)
            .filter(|stored| !is_expired(stored, now))
            .map(|stored| stored.value.clone())
    }

    fn set(&mut self, key: &str, value: &str, expires_in_days: Option<u32>) {
        let expires_at = expires_in_days
            .map(|days| (self.clock)() + Duration::from_secs(u64::from(days) * SECONDS_PER_DAY));
        self.values.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                expires_at,
            },
        );
    }

    fn delete(&mut self, key: &str) {
        self.values.remove(key);
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

fn is_expired(stored: &StoredValue, now: SystemTime) -> bool {
    stored.expires_at.is_some_and(|at| now >= at)
}
