use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

/// One row of a [`FrequencyTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K> {
    pub key: K,
    pub count: usize,
}
// Templates only care about the display label, not the key's own shape.
impl<K: Display> Serialize for Entry<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("Entry", 2)?;
        row.serialize_field("label", &self.key.to_string())?;
        row.serialize_field("count", &self.count)?;
        row.end()
    }
}

/// Occurrence counts, highest first.
///
/// Keys with equal counts keep the order in which they were first seen, so a
/// table built from the same input is always identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent, bound(serialize = "K: Display"))]
pub struct FrequencyTable<K> {
    entries: Vec<Entry<K>>,
}
impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}
impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut entries: Vec<Entry<K>> = Vec::new();
        for key in keys {
            match index.get(&key) {
                Some(&i) => entries[i].count += 1,
                None => {
                    index.insert(key.clone(), entries.len());
                    entries.push(Entry { key, count: 1 });
                },
            }
        }
        // `sort_by` is stable: ties stay in first-seen order.
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Self { entries }
    }
}
impl<K> FrequencyTable<K> {
    pub fn entries(&self) -> &[Entry<K>] {
        &self.entries
    }

    /// The first `n` rows (fewer if the table is shorter).
    pub fn top(&self, n: usize) -> &[Entry<K>] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// The highest count, or zero for an empty table. Used to scale bars.
    pub fn max(&self) -> usize {
        self.entries.first().map_or(0, |e| e.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<usize>
    where
        K: PartialEq,
    {
        self.entries.iter().find(|e| &e.key == key).map(|e| e.count)
    }
}
