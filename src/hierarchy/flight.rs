//! Single-flight memo map: at most one in-flight resolution per key.
//!
//! ```text
//!             claim(key)
//!                 │
//!     ┌───────────┴────────────┐
//!  no slot                  slot exists
//!     │                        │
//!  insert Resolving        wait on slot ──▶ Resolved(v) / Failed(e): share it
//!  run resolver                 │
//!     │                     Abandoned: claim again
//!  Ok  → Resolved(v)  (kept)
//!  Err → Failed(e)    (slot removed, next caller retries)
//!  panic → Abandoned  (slot removed, waiters retry)
//! ```
//!
//! The map lock is only held to find or insert a slot, never while a resolver
//! runs, so different keys never wait on each other.

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use rustc_hash::FxHashMap;

/// Observable state of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Unresolved,
    Resolving,
    Resolved,
}

enum SlotState<V, E> {
    Resolving,
    Resolved(V),
    Failed(E),
    Abandoned,
}

struct Slot<V, E> {
    state: Mutex<SlotState<V, E>>,
    settled: Condvar,
}

impl<V: Clone, E: Clone> Slot<V, E> {
    fn resolving() -> Self {
        Self {
            state: Mutex::new(SlotState::Resolving),
            settled: Condvar::new(),
        }
    }

    /// Block until the slot settles. `None` means the resolver was abandoned.
    fn wait(&self) -> Option<Result<V, E>> {
        let mut state = self.state.lock();
        while matches!(*state, SlotState::Resolving) {
            self.settled.wait(&mut state);
        }
        match &*state {
            SlotState::Resolved(value) => Some(Ok(value.clone())),
            SlotState::Failed(err) => Some(Err(err.clone())),
            SlotState::Resolving | SlotState::Abandoned => None,
        }
    }

    fn settle(&self, state: SlotState<V, E>) {
        *self.state.lock() = state;
        self.settled.notify_all();
    }
}

enum Claim<V, E> {
    Leader(Arc<Slot<V, E>>),
    Follower(Arc<Slot<V, E>>),
}

/// Memoizing map whose values are computed at most once per key at a time.
///
/// Successful values stay until [`FlightMap::clear`] or
/// [`FlightMap::remove`]; failures are handed to everyone who waited on that
/// attempt and then forgotten.
pub struct FlightMap<K, V, E> {
    slots: Mutex<FxHashMap<K, Arc<Slot<V, E>>>>,
}

impl<K, V, E> Default for FlightMap<K, V, E> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(FxHashMap::default()),
        }
    }
}

impl<K, V, E> FlightMap<K, V, E>
where
    K: Eq + Hash + Clone,
    V: Clone,
    E: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value for `key`, running `resolve` only if no value exists
    /// and no other caller is already resolving it. Callers that find a
    /// resolution in flight block and share its outcome.
    pub fn get_or_resolve<F>(&self, key: &K, resolve: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        loop {
            match self.claim(key) {
                Claim::Leader(slot) => return self.lead(key, &slot, resolve),
                Claim::Follower(slot) => {
                    if let Some(outcome) = slot.wait() {
                        return outcome;
                    }
                }
            }
        }
    }

    fn claim(&self, key: &K) -> Claim<V, E> {
        let mut slots = self.slots.lock();
        if let Some(slot) = slots.get(key) {
            return Claim::Follower(Arc::clone(slot));
        }
        let slot = Arc::new(Slot::resolving());
        slots.insert(key.clone(), Arc::clone(&slot));
        Claim::Leader(slot)
    }

    fn lead<F>(&self, key: &K, slot: &Arc<Slot<V, E>>, resolve: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let mut guard = AbandonOnUnwind {
            map: self,
            key,
            slot,
            armed: true,
        };
        let outcome = resolve();
        guard.armed = false;

        match &outcome {
            Ok(value) => slot.settle(SlotState::Resolved(value.clone())),
            Err(err) => {
                self.remove_if_current(key, slot);
                slot.settle(SlotState::Failed(err.clone()));
            }
        }
        outcome
    }

    fn remove_if_current(&self, key: &K, slot: &Arc<Slot<V, E>>) {
        let mut slots = self.slots.lock();
        if slots
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
        {
            slots.remove(key);
        }
    }

    /// The resolved value for `key`, without resolving or waiting.
    pub fn get(&self, key: &K) -> Option<V> {
        let slot = self.slots.lock().get(key).cloned()?;
        let state = slot.state.lock();
        match &*state {
            SlotState::Resolved(value) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn state(&self, key: &K) -> EntryState {
        let Some(slot) = self.slots.lock().get(key).cloned() else {
            return EntryState::Unresolved;
        };
        let state = slot.state.lock();
        match &*state {
            SlotState::Resolving => EntryState::Resolving,
            SlotState::Resolved(_) => EntryState::Resolved,
            SlotState::Failed(_) | SlotState::Abandoned => EntryState::Unresolved,
        }
    }

    /// Forget `key`. A resolution already in flight still completes for its
    /// current waiters but is not published.
    pub fn remove(&self, key: &K) {
        self.slots.lock().remove(key);
    }

    /// Forget every key. Same in-flight semantics as [`FlightMap::remove`].
    pub fn clear(&self) {
        self.slots.lock().clear();
    }

    /// Number of keys with a resolved value.
    pub fn resolved_len(&self) -> usize {
        let slots: Vec<_> = self.slots.lock().values().cloned().collect();
        slots
            .iter()
            .filter(|slot| matches!(*slot.state.lock(), SlotState::Resolved(_)))
            .count()
    }
}

/// Settles a slot as abandoned if its resolver unwinds.
struct AbandonOnUnwind<'a, K, V, E>
where
    K: Eq + Hash + Clone,
    V: Clone,
    E: Clone,
{
    map: &'a FlightMap<K, V, E>,
    key: &'a K,
    slot: &'a Arc<Slot<V, E>>,
    armed: bool,
}

impl<K, V, E> Drop for AbandonOnUnwind<'_, K, V, E>
where
    K: Eq + Hash + Clone,
    V: Clone,
    E: Clone,
{
    fn drop(&mut self) {
        if self.armed {
            self.map.remove_if_current(self.key, self.slot);
            self.slot.settle(SlotState::Abandoned);
        }
    }
}
