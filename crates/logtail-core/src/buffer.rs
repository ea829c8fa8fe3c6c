//! Bounded, ordered working set of displayed log entries.

use std::collections::VecDeque;

use crate::types::LogEntry;

/// Default number of entries kept for display
pub const DEFAULT_CAPACITY: usize = 1000;

/// Fixed-capacity ordered sequence of [`LogEntry`] values in display order.
///
/// Index 0 is the top of the view. Two insertion modes exist:
/// - [`insert_history`](Self::insert_history) replaces everything and appends
///   in the given order (the source already orders history newest-first);
/// - [`insert_live`](Self::insert_live) prepends one entry and evicts from the
///   tail on overflow.
///
/// Length never exceeds `capacity`. Evicted entries are dropped for good.
#[derive(Debug, Clone)]
pub struct BoundedLogBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    /// Bumped on every mutation; adapters compare it to detect changes.
    revision: u64,
    /// Bumped when the contents are replaced wholesale (clear or history).
    generation: u64,
}

impl Default for BoundedLogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl BoundedLogBuffer {
    /// Create an empty buffer. A capacity of 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
            revision: 0,
            generation: 0,
        }
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.revision += 1;
        self.generation += 1;
    }

    /// Replace the contents with `entries`, kept in the given order.
    ///
    /// Anything beyond `capacity` is cut from the tail.
    pub fn insert_history<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = LogEntry>,
    {
        self.entries.clear();
        self.entries.extend(entries.into_iter().take(self.capacity));
        self.revision += 1;
        self.generation += 1;
    }

    /// Insert one live entry at the head.
    ///
    /// Returns the entry evicted from the tail, if the buffer overflowed.
    pub fn insert_live(&mut self, entry: LogEntry) -> Option<LogEntry> {
        self.entries.push_front(entry);
        self.revision += 1;
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Mutation counter, starts at 0
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replacement counter. Unchanged across live inserts, so between two
    /// equal generations every revision step is exactly one prepended entry.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Entry at display position `index` (0 = top)
    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    /// Iterate in display order (top to bottom)
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a BoundedLogBuffer {
    type Item = &'a LogEntry;
    type IntoIter = std::collections::vec_deque::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
