//! Access replay for the demo driver

use linklru::{ListLru, SharedListLru, StatsSnapshot};
use serde::Serialize;
use tracing::{debug, warn};

/// Observable state after one access
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// 1-based position in the replay
    pub step: usize,
    /// Accessed value
    pub access: String,
    /// Whether the value was already cached
    pub hit: bool,
    /// Value evicted to make room, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evicted: Option<String>,
    /// Order after the access, most recently used first
    pub order: Vec<String>,
    /// Number of cached values after the access
    pub len: usize,
}

impl Step {
    /// `access(<v>) -> <order>`
    pub fn to_text(&self) -> String {
        format!("access({}) -> {}", self.access, self.order.join(" -> "))
    }
}

/// Final counters and order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Accesses that found the value cached
    pub hits: u64,
    /// Accesses that inserted a new value
    pub misses: u64,
    /// Tail values dropped to make room
    pub evictions: u64,
    /// Hits over all accesses
    pub hit_ratio: f64,
    /// Final order, most recently used first
    pub order: Vec<String>,
}

impl Summary {
    /// Counters on one line
    pub fn to_text(&self) -> String {
        format!(
            "hits: {}, misses: {}, evictions: {}, hit ratio: {:.2}",
            self.hits, self.misses, self.evictions, self.hit_ratio
        )
    }
}

/// Applies accesses one at a time to a shared cache
pub struct Replayer {
    /// Cache being driven
    cache: SharedListLru<String>,
    /// Accesses applied so far
    steps: usize,
}

impl Replayer {
    /// Drive `cache`, starting the step count at zero
    pub fn new(cache: SharedListLru<String>) -> Self {
        Self { cache, steps: 0 }
    }

    /// Access `value` and capture the resulting order
    pub fn access(&mut self, value: String) -> Step {
        let (outcome, order) = self.cache.access_then(value.clone(), ListLru::to_vec);
        self.steps += 1;

        let hit = outcome.is_hit();
        let evicted = outcome.evicted().cloned();
        if let Some(old) = &evicted {
            warn!(step = self.steps, evicted = %old, "Evicted least recently used value");
        }
        debug!(step = self.steps, value = %value, hit, len = order.len(), "Access");

        Step {
            step: self.steps,
            access: value,
            hit,
            evicted,
            len: order.len(),
            order,
        }
    }

    /// Counters and final order
    pub fn summary(&self) -> Summary {
        let StatsSnapshot {
            hits,
            misses,
            evictions,
        } = self.cache.stats().snapshot();

        Summary {
            hits,
            misses,
            evictions,
            hit_ratio: self.cache.stats().hit_ratio(),
            order: self.cache.snapshot(),
        }
    }
}
