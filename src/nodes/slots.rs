//! Slot store backing a pack list declaration
//!
//! Each slot remembers whether its socket carries a single base value or a
//! list of base values, plus an identity token generated once on creation.
//! The identity is what keeps a socket's identifier, and thus its links,
//! stable across rebuilds.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PackListError, Result};

/// Whether a slot's socket carries the base type or a list of it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlotKind {
    #[default]
    Base,
    List,
}

/// One user-configured input position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub kind: SlotKind,
    pub identity: String,
}

impl Slot {
    /// Creates a slot with a fresh identity
    pub fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            identity: Uuid::new_v4().to_string(),
        }
    }

    /// Socket identifier of this slot under a declaration suffix
    pub fn identifier(&self, suffix: &str) -> String {
        format!("{}{}", self.identity, suffix)
    }
}

/// Ordered slot sequence. Insertion always appends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Slot>", into = "Vec<Slot>")]
pub struct SlotStore {
    slots: Vec<Slot>,
}

impl SlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted slots, rejecting empty or repeated identities
    pub fn from_slots(slots: Vec<Slot>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(slots.len());
        for (position, slot) in slots.iter().enumerate() {
            if slot.identity.is_empty() {
                return Err(PackListError::EmptyIdentity(position));
            }
            if !seen.insert(slot.identity.as_str()) {
                return Err(PackListError::DuplicateIdentity(slot.identity.clone()));
            }
        }
        Ok(Self { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn last(&self) -> Option<&Slot> {
        self.slots.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    pub fn as_slice(&self) -> &[Slot] {
        &self.slots
    }

    /// Append a fresh slot and return it
    pub fn push(&mut self, kind: SlotKind) -> &Slot {
        self.slots.push(Slot::new(kind));
        &self.slots[self.slots.len() - 1]
    }

    /// Remove the slot at `index`; the remaining slots keep their identities
    pub fn remove(&mut self, index: usize) -> Result<Slot> {
        if index >= self.slots.len() {
            return Err(PackListError::IndexOutOfRange {
                index,
                len: self.slots.len(),
            });
        }
        Ok(self.slots.remove(index))
    }
}

impl TryFrom<Vec<Slot>> for SlotStore {
    type Error = PackListError;

    fn try_from(slots: Vec<Slot>) -> Result<Self> {
        Self::from_slots(slots)
    }
}

impl From<SlotStore> for Vec<Slot> {
    fn from(store: SlotStore) -> Self {
        store.slots
    }
}

impl<'a> IntoIterator for &'a SlotStore {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_generates_unique_identities() {
        let mut store = SlotStore::new();
        let first = store.push(SlotKind::Base).identity.clone();
        let second = store.push(SlotKind::List).identity.clone();
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).map(|slot| slot.kind), Some(SlotKind::List));
    }

    #[test]
    fn test_remove_keeps_other_identities() {
        let mut store = SlotStore::new();
        for _ in 0..3 {
            store.push(SlotKind::Base);
        }
        let before: Vec<String> = store.iter().map(|slot| slot.identity.clone()).collect();

        let removed = store.remove(1).unwrap();
        assert_eq!(removed.identity, before[1]);

        let after: Vec<String> = store.iter().map(|slot| slot.identity.clone()).collect();
        assert_eq!(after, vec![before[0].clone(), before[2].clone()]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = SlotStore::new();
        store.push(SlotKind::Base);
        let err = store.remove(1).unwrap_err();
        assert!(matches!(err, PackListError::IndexOutOfRange { index: 1, len: 1 }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_persisted_layout() {
        let store = SlotStore::from_slots(vec![
            Slot { kind: SlotKind::Base, identity: "a".to_string() },
            Slot { kind: SlotKind::List, identity: "b".to_string() },
        ])
        .unwrap();

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "kind": "BASE", "identity": "a" },
                { "kind": "LIST", "identity": "b" }
            ])
        );

        let loaded: SlotStore = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_malformed_persisted_slots_are_rejected() {
        let duplicate = serde_json::json!([
            { "kind": "BASE", "identity": "a" },
            { "kind": "LIST", "identity": "a" }
        ]);
        assert!(serde_json::from_value::<SlotStore>(duplicate).is_err());

        let empty = serde_json::json!([{ "kind": "BASE", "identity": "" }]);
        assert!(serde_json::from_value::<SlotStore>(empty).is_err());

        let unknown_kind = serde_json::json!([{ "kind": "MAP", "identity": "a" }]);
        assert!(serde_json::from_value::<SlotStore>(unknown_kind).is_err());
    }
}
