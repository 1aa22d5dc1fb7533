//! In-memory pairing session store.
//!
//! One entry per user, mutated through the map's per-key entry lock and
//! guarded against interleaved requests (two browser tabs) by optimistic
//! versioning: every write stamps a fresh version from a global counter,
//! and compare-and-swap callers pass the version they snapshotted. A
//! mismatched version is a lost race, never a lost update.
//!
//! Entries expire a configurable TTL after their last touch; expired
//! entries read as absent and are reaped lazily plus by a periodic sweep.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use tracing::debug;

use homestash_core::error::AppError;
use homestash_core::result::AppResult;
use homestash_core::types::id::UserId;
use homestash_entity::pairing::PairingState;

#[derive(Debug, Clone)]
struct Entry {
    state: PairingState,
    version: u64,
    expires_at: Instant,
}

/// Versioned, TTL-bound store of pairing sessions.
#[derive(Debug)]
pub struct PairingStore {
    entries: DashMap<UserId, Entry>,
    next_version: AtomicU64,
    ttl: Duration,
}

impl PairingStore {
    /// Create a store whose entries live `ttl` past their last touch.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            next_version: AtomicU64::new(1),
            ttl,
        }
    }

    fn stamp(&self) -> u64 {
        self.next_version.fetch_add(1, Ordering::Relaxed)
    }

    fn is_live(entry: &Entry, now: Instant) -> bool {
        entry.expires_at > now
    }

    /// Read the current state and its version, reaping an expired entry.
    pub fn snapshot(&self, user_id: UserId) -> Option<(PairingState, u64)> {
        let now = Instant::now();
        let live = self
            .entries
            .get(&user_id)
            .filter(|e| Self::is_live(e, now))
            .map(|e| (e.state.clone(), e.version));
        if live.is_none() {
            self.entries
                .remove_if(&user_id, |_, e| !Self::is_live(e, now));
        }
        live
    }

    /// Write a new state if the entry still carries `expected` (or does
    /// not exist, for `None`). Returns the stored version, or a
    /// stale-session error when the snapshot lost a race.
    pub fn store(
        &self,
        user_id: UserId,
        expected: Option<u64>,
        state: PairingState,
    ) -> AppResult<u64> {
        let now = Instant::now();
        let version = self.stamp();
        let fresh = Entry {
            state,
            version,
            expires_at: now + self.ttl,
        };

        match self.entries.entry(user_id) {
            MapEntry::Occupied(mut occupied) => {
                let current = Some(occupied.get())
                    .filter(|e| Self::is_live(e, now))
                    .map(|e| e.version);
                if current != expected {
                    return Err(stale());
                }
                occupied.insert(fresh);
                Ok(version)
            }
            MapEntry::Vacant(vacant) => {
                if expected.is_some() {
                    return Err(stale());
                }
                vacant.insert(fresh);
                Ok(version)
            }
        }
    }

    /// Atomically remove the entry if it still carries `expected`.
    ///
    /// Completion claims the session this way before touching the
    /// database, so two racing completions commit at most once.
    pub fn claim(&self, user_id: UserId, expected: u64) -> bool {
        let now = Instant::now();
        self.entries
            .remove_if(&user_id, |_, e| {
                e.version == expected && Self::is_live(e, now)
            })
            .is_some()
    }

    /// Put a claimed state back (used when the association write fails
    /// after the claim, so the user's scans are not silently lost).
    pub fn restore(&self, user_id: UserId, state: PairingState) {
        let entry = Entry {
            state,
            version: self.stamp(),
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.insert(user_id, entry);
    }

    /// Remove the entry unconditionally. Idempotent.
    pub fn clear(&self, user_id: UserId) {
        self.entries.remove(&user_id);
    }

    /// Drop every expired entry; returns how many were reaped.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| Self::is_live(e, now));
        let reaped = before - self.entries.len();
        if reaped > 0 {
            debug!(reaped, "Swept expired pairing sessions");
        }
        reaped
    }

    /// Number of live or not-yet-reaped entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn stale() -> AppError {
    AppError::stale_session("Pairing session changed underneath this scan; restart pairing")
}

#[cfg(test)]
mod tests {
    use homestash_core::error::ErrorKind;
    use homestash_entity::pairing::PendingTag;

    use super::*;

    fn has_item(code: &str) -> PairingState {
        PairingState::HasItem(PendingTag {
            code: code.to_string(),
            name: "x".to_string(),
        })
    }

    fn store() -> PairingStore {
        PairingStore::new(Duration::from_secs(600))
    }

    #[test]
    fn store_and_snapshot() {
        let store = store();
        let user = UserId::new();
        let v = store.store(user, None, has_item("a")).unwrap();
        let (state, version) = store.snapshot(user).unwrap();
        assert_eq!(state, has_item("a"));
        assert_eq!(version, v);
    }

    #[test]
    fn cas_replaces_with_matching_version() {
        let store = store();
        let user = UserId::new();
        let v1 = store.store(user, None, has_item("a")).unwrap();
        let v2 = store.store(user, Some(v1), has_item("b")).unwrap();
        assert_ne!(v1, v2);
        assert_eq!(store.snapshot(user).unwrap().0, has_item("b"));
    }

    #[test]
    fn cas_rejects_stale_version() {
        let store = store();
        let user = UserId::new();
        let v1 = store.store(user, None, has_item("a")).unwrap();
        let _v2 = store.store(user, Some(v1), has_item("b")).unwrap();

        // A second tab still holding v1 loses.
        let err = store.store(user, Some(v1), has_item("c")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::StaleSession);
    }

    #[test]
    fn cas_rejects_create_over_existing() {
        let store = store();
        let user = UserId::new();
        store.store(user, None, has_item("a")).unwrap();
        let err = store.store(user, None, has_item("b")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::StaleSession);
    }

    #[test]
    fn claim_is_versioned() {
        let store = store();
        let user = UserId::new();
        let v1 = store.store(user, None, has_item("a")).unwrap();
        assert!(store.claim(user, v1));
        // Already claimed.
        assert!(!store.claim(user, v1));
        assert!(store.snapshot(user).is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = store();
        let user = UserId::new();
        store.store(user, None, has_item("a")).unwrap();
        store.clear(user);
        store.clear(user);
        assert!(store.snapshot(user).is_none());
    }

    #[test]
    fn expired_entries_read_as_absent() {
        let store = PairingStore::new(Duration::ZERO);
        let user = UserId::new();
        store.store(user, None, has_item("a")).unwrap();
        assert!(store.snapshot(user).is_none());
        // And the expired entry no longer blocks a fresh session.
        store.store(user, None, has_item("b")).unwrap();
    }

    #[test]
    fn sweep_reaps_expired_entries() {
        let store = PairingStore::new(Duration::ZERO);
        store.store(UserId::new(), None, has_item("a")).unwrap();
        store.store(UserId::new(), None, has_item("b")).unwrap();
        assert_eq!(store.sweep(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn restore_brings_state_back() {
        let store = store();
        let user = UserId::new();
        let v = store.store(user, None, has_item("a")).unwrap();
        assert!(store.claim(user, v));
        store.restore(user, has_item("a"));
        assert_eq!(store.snapshot(user).unwrap().0, has_item("a"));
    }
}
