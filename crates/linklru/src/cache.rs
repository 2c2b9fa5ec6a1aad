//! SharedListLru: lock-guarded handle around ListLru

use std::fmt;
use std::sync::Arc;
use parking_lot::Mutex;

use crate::error::Result;
use crate::lru::{Access, ListLru};
use crate::stats::CacheStats;

/// Cloneable, thread-safe LRU handle
///
/// Every call takes one exclusive lock for its whole duration, so concurrent
/// callers see accesses applied one at a time.
pub struct SharedListLru<T> {
    /// Recency list
    list: Arc<Mutex<ListLru<T>>>,

    /// Access statistics
    stats: Arc<CacheStats>,

    /// Cache capacity
    capacity: usize,
}

impl<T: PartialEq> SharedListLru<T> {
    /// Create a shared cache holding `initial`
    ///
    /// # Arguments
    /// * `initial` - First cached value
    /// * `capacity` - Maximum number of cached values
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(initial: T, capacity: usize) -> Self {
        Self::from_list(ListLru::new(initial, capacity))
    }

    /// Create a shared cache holding `initial`, rejecting a zero capacity
    ///
    /// # Arguments
    /// * `initial` - First cached value
    /// * `capacity` - Maximum number of cached values
    ///
    /// # Returns
    /// * `Result<SharedListLru<T>>` - Cache handle, or `Error::ZeroCapacity`
    pub fn try_new(initial: T, capacity: usize) -> Result<Self> {
        Ok(Self::from_list(ListLru::try_new(initial, capacity)?))
    }

    /// Wrap an existing list
    ///
    /// # Arguments
    /// * `list` - List to share; its order and capacity are kept
    ///
    /// # Returns
    /// * `SharedListLru<T>` - Handle with zeroed counters
    pub fn from_list(list: ListLru<T>) -> Self {
        let capacity = list.capacity();
        Self {
            list: Arc::new(Mutex::new(list)),
            stats: Arc::new(CacheStats::new()),
            capacity,
        }
    }

    /// Access a value, making it the most recently used
    ///
    /// # Arguments
    /// * `value` - Value to move to (or insert at) the head
    pub fn access(&self, value: T) {
        self.access_outcome(value);
    }

    /// Access a value and report whether it was already cached
    ///
    /// # Returns
    /// * `bool` - `true` on a hit
    pub fn access_hit(&self, value: T) -> bool {
        self.access_outcome(value).is_hit()
    }

    /// Access a value and report what happened to the list
    ///
    /// # Arguments
    /// * `value` - Value to move to (or insert at) the head
    ///
    /// # Returns
    /// * `Access<T>` - Hit, plain insert, or insert that evicted the old tail
    pub fn access_outcome(&self, value: T) -> Access<T> {
        self.access_then(value, |_| ()).0
    }

    /// Access a value, then inspect the list under the same lock
    ///
    /// # Arguments
    /// * `value` - Value to move to (or insert at) the head
    /// * `inspect` - Called with the list right after the access
    ///
    /// # Returns
    /// * `(Access<T>, R)` - Access outcome and the result of `inspect`
    pub fn access_then<R, F>(&self, value: T, inspect: F) -> (Access<T>, R)
    where
        F: FnOnce(&ListLru<T>) -> R,
    {
        let mut list = self.list.lock();
        let outcome = list.record_access(value);
        self.stats.record(&outcome);
        let seen = inspect(&*list);
        (outcome, seen)
    }

    /// Check if a value is cached without touching the order
    pub fn contains(&self, value: &T) -> bool {
        self.list.lock().contains(value)
    }
}

impl<T> SharedListLru<T> {
    /// Render the order head to tail with a custom formatter
    pub fn render_with<F>(&self, format: F) -> String
    where
        F: FnMut(&T) -> String,
    {
        self.list.lock().render_with(format)
    }

    /// Get access statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reset access statistics (cached values remain)
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Get current number of cached values
    pub fn len(&self) -> usize {
        self.list.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.list.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> SharedListLru<T> {
    /// Copy values out, most recently used first
    pub fn snapshot(&self) -> Vec<T> {
        self.list.lock().to_vec()
    }
}

impl<T: fmt::Display> SharedListLru<T> {
    /// Render the order head to tail, e.g. `3 -> 2 -> 1`
    pub fn render(&self) -> String {
        self.list.lock().render()
    }
}

impl<T> Clone for SharedListLru<T> {
    fn clone(&self) -> Self {
        Self {
            list: Arc::clone(&self.list),
            stats: Arc::clone(&self.stats),
            capacity: self.capacity,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedListLru<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedListLru")
            .field("list", &*self.list.lock())
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::thread;

    #[test]
    fn test_shared_scenario() {
        let cache = SharedListLru::new(1, 3);

        cache.access(2);
        cache.access(3);
        cache.access(4);
        cache.access(2);

        assert_eq!(cache.render(), "2 -> 4 -> 3");
        assert_eq!(cache.snapshot(), vec![2, 4, 3]);
        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().misses(), 3);
        assert_eq!(cache.stats().evictions(), 1);
    }

    #[test]
    fn test_shared_access_hit() {
        let cache = SharedListLru::new("a", 2);

        assert!(cache.access_hit("a"));
        assert!(!cache.access_hit("b"));
        assert!(!cache.access_hit("c")); // Evicts "a"
        assert!(!cache.contains(&"a"));
        assert_eq!(cache.stats().hit_ratio(), 1.0 / 3.0);
    }

    #[test]
    fn test_shared_access_outcome() {
        let cache = SharedListLru::new(1, 2);

        assert_eq!(cache.access_outcome(1), Access::Hit);
        assert_eq!(cache.access_outcome(2), Access::Inserted);
        assert_eq!(cache.access_outcome(3), Access::Evicted(1));
        assert_eq!(cache.stats().evictions(), 1);
    }

    #[test]
    fn test_shared_access_then_sees_new_order() {
        let cache = SharedListLru::new(1, 2);
        cache.access(2);

        let (outcome, order) = cache.access_then(3, ListLru::to_vec);

        assert_eq!(outcome.evicted(), Some(&1));
        assert_eq!(order, vec![3, 2]);
    }

    #[test]
    fn test_shared_huge_capacity() {
        let cache = SharedListLru::try_new(1u64, usize::MAX).unwrap();
        cache.access(2);

        assert_eq!(cache.snapshot(), vec![2, 1]);
        assert_eq!(cache.capacity(), usize::MAX);
    }

    #[test]
    fn test_shared_try_new() {
        assert_eq!(SharedListLru::try_new(1, 0).err(), Some(Error::ZeroCapacity));
        assert_eq!(SharedListLru::try_new(1, 4).unwrap().capacity(), 4);
    }

    #[test]
    fn test_shared_reset_stats() {
        let cache = SharedListLru::new(1, 3);
        cache.access(1);
        cache.access(2);

        cache.reset_stats();

        assert_eq!(cache.stats().hits(), 0);
        assert_eq!(cache.stats().misses(), 0);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_shared_clone_shares_state() {
        let cache = SharedListLru::new(1, 3);
        let other = cache.clone();

        other.access(2);

        assert_eq!(cache.snapshot(), vec![2, 1]);
        assert_eq!(cache.stats().misses(), 1);
    }

    #[test]
    fn test_shared_concurrent_access() {
        let cache = SharedListLru::new(0u32, 8);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..500u32 {
                        cache.access((i * 7 + t) % 20);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 8);
        assert_eq!(cache.stats().snapshot().accesses(), 2000);
        cache.list.lock().debug_validate_invariants();
    }

    #[test]
    fn test_shared_render_with() {
        let cache = SharedListLru::new(vec![1u8], 2);
        cache.access(vec![2, 3]);

        assert_eq!(cache.render_with(|v| format!("{:?}", v)), "[2, 3] -> [1]");
    }
}
