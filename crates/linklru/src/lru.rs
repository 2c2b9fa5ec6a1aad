//! LRU (Least Recently Used) list implementation
//!
//! Entries live in a slot arena and link to their successor by index. The
//! head is the most recently used entry and the tail the least recently used
//! one. There is no hash index: every lookup walks the chain from the head,
//! so an access costs O(n) in the number of cached values.

use std::fmt;
use std::iter::FusedIterator;

use crate::error::{Error, Result};

/// Capacity used by [`ListLru::with_default_capacity`]
pub const DEFAULT_CAPACITY: usize = 10;

/// Upper bound on slots reserved at construction; the arena grows past it
const INITIAL_SLOTS: usize = 64;

/// Entry in the singly linked recency chain
struct Entry<T> {
    value: T,
    next: Option<usize>,
}

/// Lookup criterion for [`ListLru::find`] and [`ListLru::find_predecessor`]
///
/// Exactly one selector is supplied per lookup: either a value compared with
/// `==`, or a predicate applied to each stored value.
pub enum Select<'a, T> {
    /// Match entries equal to this value
    Value(&'a T),
    /// Match entries for which the predicate returns `true`
    Matcher(&'a dyn Fn(&T) -> bool),
}

impl<'a, T> Select<'a, T> {
    /// Select by value equality
    pub fn value(value: &'a T) -> Self {
        Select::Value(value)
    }

    /// Select by predicate
    pub fn matching(matcher: &'a dyn Fn(&T) -> bool) -> Self {
        Select::Matcher(matcher)
    }
}

impl<T: PartialEq> Select<'_, T> {
    fn matches(&self, candidate: &T) -> bool {
        match self {
            Select::Value(value) => *value == candidate,
            Select::Matcher(matcher) => matcher(candidate),
        }
    }
}

impl<T> Clone for Select<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Select<'_, T> {}

/// What a single access did to the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access<T> {
    /// Value was present and moved to the head
    Hit,
    /// Value was absent and inserted without eviction
    Inserted,
    /// Value was absent; the tail was evicted to make room
    Evicted(T),
}

impl<T> Access<T> {
    /// Check if the value was already cached
    pub fn is_hit(&self) -> bool {
        matches!(self, Access::Hit)
    }

    /// Value dropped from the tail, if any
    pub fn evicted(&self) -> Option<&T> {
        match self {
            Access::Evicted(old) => Some(old),
            _ => None,
        }
    }
}

/// Bounded LRU cache kept as a singly linked list ordered by recency
pub struct ListLru<T> {
    entries: Vec<Option<Entry<T>>>,
    free_list: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    capacity: usize,
    len: usize,
}

impl<T> ListLru<T> {
    /// Create a list holding `initial` with the given capacity
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(initial: T, capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");
        Self::build(initial, capacity)
    }

    /// Create a list holding `initial`, rejecting a zero capacity
    pub fn try_new(initial: T, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(Self::build(initial, capacity))
    }

    /// Create a list holding `initial` with [`DEFAULT_CAPACITY`]
    pub fn with_default_capacity(initial: T) -> Self {
        Self::build(initial, DEFAULT_CAPACITY)
    }

    fn build(initial: T, capacity: usize) -> Self {
        let mut list = Self {
            entries: Vec::with_capacity(capacity.min(INITIAL_SLOTS)),
            free_list: Vec::new(),
            head: None,
            tail: None,
            capacity,
            len: 0,
        };
        list.prepend(initial);
        list
    }

    /// Number of cached values
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list holds no values
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of cached values
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if the next miss will evict the tail
    pub fn is_full(&self) -> bool {
        self.len >= self.capacity
    }

    /// Most recently used entry
    pub fn head(&self) -> Option<EntryRef<'_, T>> {
        self.head.and_then(|idx| self.entry_ref(idx))
    }

    /// Least recently used entry, the next one to be evicted
    pub fn tail(&self) -> Option<EntryRef<'_, T>> {
        self.tail.and_then(|idx| self.entry_ref(idx))
    }

    /// Iterate values from most to least recently used
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Render the order head to tail with a custom formatter
    pub fn render_with<F>(&self, format: F) -> String
    where
        F: FnMut(&T) -> String,
    {
        self.iter().map(format).collect::<Vec<_>>().join(" -> ")
    }

    /// Insert `value` as the new head. The only insertion path.
    fn prepend(&mut self, value: T) {
        let idx = self.alloc(Entry {
            value,
            next: self.head,
        });

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
        self.len += 1;
    }

    /// Detach the entry at `idx`, whose predecessor is `prev`
    fn unlink(&mut self, idx: usize, prev: Option<usize>) -> Option<T> {
        let entry = self.entries.get_mut(idx)?.take()?;

        if self.head == Some(idx) {
            self.head = entry.next;
        }
        if self.tail == Some(idx) {
            // None once the last entry is gone
            self.tail = prev;
        }
        if let Some(prev_idx) = prev {
            if let Some(prev_entry) = &mut self.entries[prev_idx] {
                prev_entry.next = entry.next;
            }
        }

        self.len -= 1;
        self.free_list.push(idx);
        Some(entry.value)
    }

    fn alloc(&mut self, entry: Entry<T>) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.entries[idx] = Some(entry);
            idx
        } else {
            self.entries.push(Some(entry));
            self.entries.len() - 1
        }
    }

    fn entry(&self, idx: usize) -> Option<&Entry<T>> {
        self.entries.get(idx)?.as_ref()
    }

    fn entry_ref(&self, idx: usize) -> Option<EntryRef<'_, T>> {
        let entry = self.entry(idx)?;
        Some(EntryRef {
            list: self,
            idx,
            entry,
        })
    }
}

impl<T: Clone> ListLru<T> {
    /// Copy values out, most recently used first
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> ListLru<T> {
    /// Access a value, making it the most recently used
    ///
    /// A present value is moved to the head. An absent value is inserted at
    /// the head, evicting the tail first when the list is full.
    pub fn access(&mut self, value: T) {
        self.record_access(value);
    }

    pub(crate) fn record_access(&mut self, value: T) -> Access<T> {
        if self.find_index(Select::Value(&value)).is_some() {
            self.remove(&value);
            self.prepend(value);
            return Access::Hit;
        }

        let evicted = if self.is_full() { self.evict() } else { None };
        self.prepend(value);

        match evicted {
            Some(old) => Access::Evicted(old),
            None => Access::Inserted,
        }
    }

    /// Check if a value is cached without touching the order
    pub fn contains(&self, value: &T) -> bool {
        self.find_index(Select::Value(value)).is_some()
    }

    /// Find the first entry matching `select`, scanning from the head
    pub fn find(&self, select: Select<'_, T>) -> Option<EntryRef<'_, T>> {
        self.find_index(select).and_then(|idx| self.entry_ref(idx))
    }

    /// Find the entry immediately before the first entry matching `select`
    ///
    /// Returns `None` when nothing matches, when the list is empty, and when
    /// the match is the head (the head has no predecessor). Use
    /// [`EntryRef::is_head`] on the result of [`find`](Self::find) to tell the
    /// head case apart.
    pub fn find_predecessor(&self, select: Select<'_, T>) -> Option<EntryRef<'_, T>> {
        self.find_predecessor_index(select)
            .and_then(|idx| self.entry_ref(idx))
    }

    /// Remove the entry equal to `value`. Absent values are a no-op.
    fn remove(&mut self, value: &T) -> Option<T> {
        let idx = self.find_index(Select::Value(value))?;
        let prev = self.find_predecessor_index(Select::Value(value));
        self.unlink(idx, prev)
    }

    /// Remove the tail, by value like any other removal
    fn evict(&mut self) -> Option<T> {
        let tail = self.tail?;
        let prev = self.find_predecessor_index(Select::Value(&self.entry(tail)?.value));
        self.unlink(tail, prev)
    }

    fn find_index(&self, select: Select<'_, T>) -> Option<usize> {
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let entry = self.entry(idx)?;
            if select.matches(&entry.value) {
                return Some(idx);
            }
            cursor = entry.next;
        }
        None
    }

    fn find_predecessor_index(&self, select: Select<'_, T>) -> Option<usize> {
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let next_idx = self.entry(idx)?.next?;
            if select.matches(&self.entry(next_idx)?.value) {
                return Some(idx);
            }
            cursor = Some(next_idx);
        }
        None
    }

    /// Validate internal invariants (debug/test only)
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.capacity > 0);
        assert!(self.len <= self.capacity, "length exceeds capacity");

        let mut count = 0;
        let mut last = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let entry = self.entries[idx]
                .as_ref()
                .expect("linked slot must be occupied");
            count += 1;
            assert!(count <= self.len, "chain longer than length");
            last = Some(idx);
            cursor = entry.next;
        }
        assert_eq!(count, self.len, "chain shorter than length");
        assert_eq!(last, self.tail, "tail is not the end of the chain");

        let live = self.entries.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(live, self.len, "unlinked entry still occupies a slot");

        let values: Vec<&T> = self.iter().collect();
        for (i, value) in values.iter().enumerate() {
            assert!(
                values[i + 1..].iter().all(|other| value != other),
                "duplicate value at position {}",
                i
            );
        }
    }
}

impl<T: fmt::Display> ListLru<T> {
    /// Render the order head to tail, e.g. `3 -> 2 -> 1`
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl<T: fmt::Display> fmt::Display for ListLru<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for ListLru<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListLru")
            .field("capacity", &self.capacity)
            .field("entries", &DebugEntries(self))
            .finish()
    }
}

struct DebugEntries<'a, T>(&'a ListLru<T>);

impl<T: fmt::Debug> fmt::Debug for DebugEntries<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Read-only view of a live entry
pub struct EntryRef<'a, T> {
    list: &'a ListLru<T>,
    idx: usize,
    entry: &'a Entry<T>,
}

impl<'a, T> EntryRef<'a, T> {
    /// Stored value
    pub fn value(&self) -> &'a T {
        &self.entry.value
    }

    /// Next (less recently used) entry
    pub fn next(&self) -> Option<EntryRef<'a, T>> {
        self.entry.next.and_then(|idx| self.list.entry_ref(idx))
    }

    /// Check if this is the most recently used entry
    pub fn is_head(&self) -> bool {
        self.list.head == Some(self.idx)
    }

    /// Check if this is the least recently used entry
    pub fn is_tail(&self) -> bool {
        self.list.tail == Some(self.idx)
    }
}

impl<T> Clone for EntryRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntryRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for EntryRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryRef")
            .field("value", self.value())
            .field("head", &self.is_head())
            .field("tail", &self.is_tail())
            .finish()
    }
}

/// Iterator over values from head to tail
pub struct Iter<'a, T> {
    list: &'a ListLru<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let entry = self.list.entry(self.cursor?)?;
        self.cursor = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&entry.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            list: self.list,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> IntoIterator for &'a ListLru<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
