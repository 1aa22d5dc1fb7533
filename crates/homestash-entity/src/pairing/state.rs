//! The pairing state machine, as data.
//!
//! A pairing session accumulates one item scan and one storage scan, in
//! either order, and completes exactly once when both are present. The
//! state is a tagged variant so "both sides absent yet in progress" is
//! unrepresentable; the transition function is pure and the service layer
//! applies its effects (the association write, the session clear).

use serde::{Deserialize, Serialize};

use homestash_core::types::category::TagCategory;

/// One scanned side of a pairing: the code plus the name shown while
/// waiting for the other side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTag {
    /// The scanned code.
    pub code: String,
    /// Display name of the scanned entity.
    pub name: String,
}

/// Current state of a user's pairing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PairingState {
    /// Nothing scanned since the last completion or cancel.
    #[default]
    Empty,
    /// An item has been scanned; waiting for a storage scan.
    HasItem(PendingTag),
    /// A storage cell has been scanned; waiting for an item scan.
    HasStorage(PendingTag),
}

/// Result of feeding one scan into the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTransition {
    /// Store the new state and keep waiting for the other side.
    Wait(PairingState),
    /// Both sides are present: commit the association and clear.
    Complete {
        /// The pending item side.
        item: PendingTag,
        /// The pending storage side.
        storage: PendingTag,
    },
}

impl PairingState {
    /// Feed one scan into the machine.
    ///
    /// Scanning the same category twice replaces the earlier pending tag
    /// (replace, don't stack); scanning the opposite category completes.
    pub fn apply(self, category: TagCategory, tag: PendingTag) -> ScanTransition {
        match (self, category) {
            (Self::Empty, TagCategory::Item) => ScanTransition::Wait(Self::HasItem(tag)),
            (Self::Empty, TagCategory::Storage) => ScanTransition::Wait(Self::HasStorage(tag)),
            (Self::HasItem(_), TagCategory::Item) => ScanTransition::Wait(Self::HasItem(tag)),
            (Self::HasStorage(_), TagCategory::Storage) => {
                ScanTransition::Wait(Self::HasStorage(tag))
            }
            (Self::HasItem(item), TagCategory::Storage) => ScanTransition::Complete {
                item,
                storage: tag,
            },
            (Self::HasStorage(storage), TagCategory::Item) => ScanTransition::Complete {
                item: tag,
                storage,
            },
        }
    }

    /// The pending tag for a category, if that side has been scanned.
    pub fn pending(&self, category: TagCategory) -> Option<&PendingTag> {
        match (self, category) {
            (Self::HasItem(tag), TagCategory::Item) => Some(tag),
            (Self::HasStorage(tag), TagCategory::Storage) => Some(tag),
            _ => None,
        }
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Project the state into the session wire shape (one optional slot
    /// per side; both absent when empty).
    pub fn snapshot(&self) -> PairingSnapshot {
        PairingSnapshot {
            item: self.pending(TagCategory::Item).cloned(),
            storage: self.pending(TagCategory::Storage).cloned(),
        }
    }
}

/// The session state as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PairingSnapshot {
    /// Pending item scan, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<PendingTag>,
    /// Pending storage scan, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<PendingTag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(code: &str) -> PendingTag {
        PendingTag {
            code: code.to_string(),
            name: format!("name of {code}"),
        }
    }

    #[test]
    fn item_first_waits() {
        let t = PairingState::Empty.apply(TagCategory::Item, tag("ITEM-20240520-10086"));
        match t {
            ScanTransition::Wait(PairingState::HasItem(p)) => {
                assert_eq!(p.code, "ITEM-20240520-10086");
            }
            other => panic!("unexpected transition: {other:?}"),
        }
    }

    #[test]
    fn storage_first_waits() {
        let t = PairingState::Empty.apply(TagCategory::Storage, tag("A3001"));
        assert!(matches!(
            t,
            ScanTransition::Wait(PairingState::HasStorage(_))
        ));
    }

    #[test]
    fn item_then_storage_completes() {
        let state = match PairingState::Empty.apply(TagCategory::Item, tag("ITEM-20240520-10086"))
        {
            ScanTransition::Wait(s) => s,
            other => panic!("unexpected transition: {other:?}"),
        };
        match state.apply(TagCategory::Storage, tag("A3001")) {
            ScanTransition::Complete { item, storage } => {
                assert_eq!(item.code, "ITEM-20240520-10086");
                assert_eq!(storage.code, "A3001");
            }
            other => panic!("unexpected transition: {other:?}"),
        }
    }

    #[test]
    fn storage_then_item_completes_identically() {
        let state = match PairingState::Empty.apply(TagCategory::Storage, tag("A3001")) {
            ScanTransition::Wait(s) => s,
            other => panic!("unexpected transition: {other:?}"),
        };
        match state.apply(TagCategory::Item, tag("ITEM-20240520-10086")) {
            ScanTransition::Complete { item, storage } => {
                assert_eq!(item.code, "ITEM-20240520-10086");
                assert_eq!(storage.code, "A3001");
            }
            other => panic!("unexpected transition: {other:?}"),
        }
    }

    #[test]
    fn same_side_replaces_not_stacks() {
        let state = match PairingState::Empty.apply(TagCategory::Item, tag("ITEM-20240520-10086"))
        {
            ScanTransition::Wait(s) => s,
            other => panic!("unexpected transition: {other:?}"),
        };
        match state.apply(TagCategory::Item, tag("ITEM-20240521-20001")) {
            ScanTransition::Wait(PairingState::HasItem(p)) => {
                assert_eq!(p.code, "ITEM-20240521-20001");
            }
            other => panic!("unexpected transition: {other:?}"),
        }
    }

    #[test]
    fn snapshot_shape() {
        let empty = PairingState::Empty.snapshot();
        assert!(empty.item.is_none() && empty.storage.is_none());

        let waiting = PairingState::HasStorage(tag("A3001")).snapshot();
        assert!(waiting.item.is_none());
        assert_eq!(waiting.storage.unwrap().code, "A3001");
    }
}
