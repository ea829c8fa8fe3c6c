//! Keyed debouncer.
//!
//! Coalesces rapid-fire triggers into a single delayed action. Each key owns
//! one pending timer: triggering a key aborts its pending action (if any) and
//! schedules the new one after the full delay. Only the last trigger within
//! the window fires.
//!
//! ```text
//! trigger(k) ─┐  trigger(k) ─┐  trigger(k) ─┐
//!             └─ aborted      └─ aborted     └─ [delay] → action
//! ```
//!
//! Aborting a timer cannot recall a message it already queued, so every
//! firing carries a [`DebounceTicket`] checked against the [`TicketBook`].

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use tokio::task::JoinHandle;

use logtail_core::FilterField;

/// Identifies one debounced action of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebounceKey {
    /// Propagation of a single filter input
    Field(FilterField),
    /// Propagation of all text inputs through one shared timer
    Filters,
}

impl DebounceKey {
    /// Key used for an edit of `field`
    pub fn for_field(field: FilterField, coalesce: bool) -> Self {
        if coalesce {
            DebounceKey::Filters
        } else {
            DebounceKey::Field(field)
        }
    }
}

/// One scheduled firing of a debounced action.
///
/// A timer that already fired may have its message queued behind a newer
/// edit. The ticket lets the receiver tell that message apart from the one
/// the newer edit will produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
    pub key: DebounceKey,
    pub generation: u64,
}

/// Latest ticket generation issued per key
#[derive(Debug, Default)]
pub struct TicketBook {
    generations: HashMap<DebounceKey, u64>,
}

impl TicketBook {
    /// Issue a ticket for `key`, superseding every earlier one
    pub fn issue(&mut self, key: DebounceKey) -> DebounceTicket {
        let generation = self.generations.entry(key).or_insert(0);
        *generation += 1;
        DebounceTicket {
            key,
            generation: *generation,
        }
    }

    /// `true` if no newer ticket was issued and nothing revoked this one
    pub fn is_current(&self, ticket: &DebounceTicket) -> bool {
        self.generations.get(&ticket.key) == Some(&ticket.generation)
    }

    /// Invalidate every outstanding ticket
    pub fn revoke_all(&mut self) {
        for generation in self.generations.values_mut() {
            *generation += 1;
        }
    }
}

/// Timer map keyed by debounced action.
///
/// Must be used from within a tokio runtime.
pub struct Debouncer<K> {
    delay: Duration,
    pending: HashMap<K, JoinHandle<()>>,
}

impl<K> std::fmt::Debug for Debouncer<K>
where
    K: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.pending.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<K> Debouncer<K>
where
    K: Eq + Hash,
{
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    /// Schedule `action` to run after the delay, superseding any pending
    /// action for the same key.
    pub fn trigger<F>(&mut self, key: K, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });

        if let Some(previous) = self.pending.insert(key, handle) {
            previous.abort();
        }
    }

    /// Cancel every pending action
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}
