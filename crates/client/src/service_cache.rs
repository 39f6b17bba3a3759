use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

pub const SERVICE_NAME_TTL: Duration = Duration::from_secs(300);

struct CachedNames {
    names: Vec<String>,
    fetched_at: Instant,
}

/// Last successfully fetched service-name list, valid for a fixed TTL.
///
/// Written only on a successful fetch and never cleared explicitly, so a
/// failed refresh leaves a still-valid list in place.
pub struct ServiceNameCache {
    ttl: Duration,
    slot: Mutex<Option<CachedNames>>,
}

impl ServiceNameCache {
    pub fn new() -> Self {
        Self::with_ttl(SERVICE_NAME_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Cached names if younger than the TTL.
    pub fn get(&self) -> Option<Vec<String>> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.names.clone())
    }

    pub fn store(&self, names: Vec<String>) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(CachedNames {
            names,
            fetched_at: Instant::now(),
        });
    }
}

impl Default for ServiceNameCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Requested name -> resolved service name. Unbounded; entries never expire.
#[derive(Default)]
pub struct MatchCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, requested: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(requested)
            .cloned()
    }

    pub fn insert(&self, requested: &str, resolved: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(requested.to_string(), resolved.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
