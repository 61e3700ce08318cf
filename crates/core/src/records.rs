//! Insertion-ordered, id-indexed entity collection
//!
//! Stores keep their entities here so that point lookups stay O(1) while
//! listings and the on-disk snapshot follow creation order.

use std::collections::HashMap;

/// An entity that can be looked up by its identifier
pub(crate) trait Keyed {
    fn key(&self) -> &str;
}

#[derive(Debug, Clone)]
pub(crate) struct Records<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed> Records<T> {
    /// Build from a loaded snapshot. Later entries with an already seen id
    /// are dropped, so the first occurrence wins.
    pub fn from_vec(items: Vec<T>) -> (Self, usize) {
        let mut records = Self::default();
        let mut dropped = 0;
        for item in items {
            if records.contains(item.key()) {
                dropped += 1;
            } else {
                records.push(item);
            }
        }
        (records, dropped)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).and_then(|&pos| self.items.get(pos))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        let pos = *self.index.get(key)?;
        self.items.get_mut(pos)
    }

    /// Append an entity. The caller guarantees its key is not present yet.
    pub fn push(&mut self, item: T) {
        debug_assert!(!self.contains(item.key()));
        self.index.insert(item.key().to_string(), self.items.len());
        self.items.push(item);
    }

    /// Remove an entity, keeping the relative order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let pos = self.index.remove(key)?;
        let removed = self.items.remove(pos);
        for (offset, item) in self.items[pos..].iter().enumerate() {
            self.index.insert(item.key().to_string(), pos + offset);
        }
        Some(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
