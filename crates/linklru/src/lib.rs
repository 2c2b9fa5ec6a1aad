//! # linklru
//!
//! Bounded LRU cache kept in a singly linked recency list.
//!
//! ## Architecture
//! - **Recency list**: singly linked entries in a slot arena, head = most
//!   recently used, tail = least recently used
//! - **Lookup**: linear scan from the head (O(n)), no hash index
//! - **Shared handle**: one exclusive lock per cache plus hit/miss counters
//!
//! ```
//! use linklru::ListLru;
//!
//! let mut cache = ListLru::new(1, 3);
//! cache.access(2);
//! cache.access(3);
//! cache.access(4); // evicts 1
//! cache.access(2); // moves 2 to the head
//!
//! assert_eq!(cache.render(), "2 -> 4 -> 3");
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod lru;
mod stats;

pub use cache::SharedListLru;
pub use error::{Error, Result};
pub use lru::{Access, EntryRef, Iter, ListLru, Select, DEFAULT_CAPACITY};
pub use stats::{CacheStats, StatsSnapshot};
