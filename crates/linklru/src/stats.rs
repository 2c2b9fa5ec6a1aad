//! Access counters for the shared cache

use std::sync::atomic::{AtomicU64, Ordering};

use crate::lru::Access;

/// Hit/miss/eviction counters, updated on every access
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

/// Point-in-time copy of [`CacheStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Accesses that found the value already cached
    pub hits: u64,
    /// Accesses that inserted a new value
    pub misses: u64,
    /// Tail entries dropped to make room
    pub evictions: u64,
}

impl StatsSnapshot {
    /// Total number of accesses
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit ratio (0.0 to 1.0), 0.0 before the first access
    pub fn hit_ratio(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl CacheStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record<T>(&self, access: &Access<T>) {
        match access {
            Access::Hit => {
                self.hits.fetch_add(1, Ordering::Relaxed);
            }
            Access::Inserted => {
                self.misses.fetch_add(1, Ordering::Relaxed);
            }
            Access::Evicted(_) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Get total hits
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Get total misses
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Get total evictions
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        self.snapshot().hit_ratio()
    }

    /// Copy the current counters
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits(),
            misses: self.misses(),
            evictions: self.evictions(),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_record() {
        let stats = CacheStats::new();

        stats.record(&Access::<u32>::Hit);
        stats.record(&Access::<u32>::Hit);
        stats.record(&Access::<u32>::Inserted);
        stats.record(&Access::Evicted(7u32));

        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 2);
        assert_eq!(stats.evictions(), 1);
        assert_eq!(stats.hit_ratio(), 0.5);
    }

    #[test]
    fn test_stats_snapshot() {
        let stats = CacheStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
        assert_eq!(stats.hit_ratio(), 0.0);

        stats.record(&Access::<u32>::Inserted);
        let snap = stats.snapshot();
        assert_eq!(snap.accesses(), 1);
        assert_eq!(snap.hit_ratio(), 0.0);
    }

    #[test]
    fn test_stats_reset() {
        let stats = CacheStats::new();

        stats.record(&Access::<u32>::Hit);
        stats.record(&Access::Evicted(1u32));
        stats.reset();

        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }
}
