// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed enter/update/exit matching.
//!
//! This is the selection-join algorithm on its own: given the keys of the previously bound
//! sequence and a new data sequence, decide which new items reuse a previous slot, which are
//! new, and which previous slots are stale. It knows nothing about marks or backends.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

/// A new item without a previous match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entered<K> {
    /// Index in the new data.
    pub index: usize,
    /// Key of the item.
    pub key: K,
}

/// A new item matched to a previous slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Updated<K> {
    /// Index in the new data.
    pub index: usize,
    /// Index in the previous key sequence.
    pub previous_index: usize,
    /// Shared key.
    pub key: K,
}

/// A previous slot with no match in the new data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exited<K> {
    /// Index in the previous key sequence.
    pub previous_index: usize,
    /// Key of the stale slot.
    pub key: K,
}

/// The result of [`reconcile`].
///
/// `entered` and `updated` are in new-data order; `exited` is in previous order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconciliation<K> {
    /// Items that need a new mark.
    pub entered: Vec<Entered<K>>,
    /// Items that re-bind an existing mark.
    pub updated: Vec<Updated<K>>,
    /// Previous slots whose marks must be removed.
    pub exited: Vec<Exited<K>>,
}

impl<K> Reconciliation<K> {
    /// Number of items bound after the join (`entered + updated`).
    pub fn bound_len(&self) -> usize {
        self.entered.len() + self.updated.len()
    }

    /// Returns `true` if nothing entered or exited.
    pub fn is_stable(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

/// Match `data` against the `previous` key sequence.
///
/// Each previous key can be claimed by at most one new item: the first new item with that key
/// updates the earliest unclaimed previous slot holding it, later duplicates enter. Unclaimed
/// previous slots (including duplicate keys in `previous`) exit.
///
/// Positional joins use the item index as the key, so reordering data re-assigns marks instead
/// of tracking identity.
pub fn reconcile<K, T>(
    previous: &[K],
    data: &[T],
    mut key_fn: impl FnMut(usize, &T) -> K,
) -> Reconciliation<K>
where
    K: Copy + Eq + Hash,
{
    let mut slots: HashMap<K, usize> = HashMap::with_capacity(previous.len());
    for (i, key) in previous.iter().enumerate() {
        slots.entry(*key).or_insert(i);
    }

    let mut claimed = alloc::vec![false; previous.len()];
    let mut entered = Vec::new();
    let mut updated = Vec::new();

    for (index, item) in data.iter().enumerate() {
        let key = key_fn(index, item);
        match slots.remove(&key) {
            Some(previous_index) => {
                claimed[previous_index] = true;
                updated.push(Updated {
                    index,
                    previous_index,
                    key,
                });
            }
            None => entered.push(Entered { index, key }),
        }
    }

    let exited = previous
        .iter()
        .enumerate()
        .filter(|(i, _)| !claimed[*i])
        .map(|(previous_index, key)| Exited {
            previous_index,
            key: *key,
        })
        .collect();

    Reconciliation {
        entered,
        updated,
        exited,
    }
}
