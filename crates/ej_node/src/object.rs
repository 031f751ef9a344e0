use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;

use foldhash::fast::FixedState;
use hashbrown::HashMap;

use crate::JsonNode;
use crate::node::NULL;

/// Fixed seed, so that key lookups hash the same across runs.
const KEY_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

// -----------------------------------------------------------------------------
// JsonObject

/// An insertion-ordered mapping from unique string keys to [`JsonNode`]s.
///
/// Entries are stored in a vector in insertion order, with a hash index from
/// key to position. Inserting an existing key replaces its value in place,
/// so the key keeps its original position.
///
/// Equality ignores order: two objects are equal if they have the same keys
/// and each key maps to an equal value.
///
/// # Examples
///
/// ```
/// use ej_node::JsonObject;
///
/// let mut obj = JsonObject::new();
/// obj.insert("b", 1);
/// obj.insert("a", 2);
/// obj.insert("b", 3);
///
/// let keys: Vec<&str> = obj.keys().collect();
/// assert_eq!(keys, ["b", "a"]);
/// assert_eq!(obj["b"].as_u64(), Some(3));
/// ```
#[derive(Clone)]
pub struct JsonObject {
    entries: Vec<(String, JsonNode)>,
    indices: HashMap<String, usize, FixedState>,
}

impl JsonObject {
    /// Creates an empty object.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            indices: HashMap::with_hasher(KEY_HASH_STATE),
        }
    }

    /// Creates an empty object with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity_and_hasher(capacity, KEY_HASH_STATE),
        }
    }

    /// Sets `key` to `value`, returning the previous value of `key`.
    ///
    /// A new key is appended at the end; an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonNode>) -> Option<JsonNode> {
        let key: String = key.into();
        let value: JsonNode = value.into();
        if let Some(&index) = self.indices.get(&key) {
            Some(core::mem::replace(&mut self.entries[index].1, value))
        } else {
            self.indices.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
            None
        }
    }

    /// Removes `key`, returning its value.
    ///
    /// Entries after it keep their relative order.
    pub fn remove(&mut self, key: &str) -> Option<JsonNode> {
        let index = self.indices.remove(key)?;
        let (_, value) = self.entries.remove(index);
        for (key, _) in &self.entries[index..] {
            if let Some(position) = self.indices.get_mut(key.as_str()) {
                *position -= 1;
            }
        }
        Some(value)
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&JsonNode> {
        let index = *self.indices.get(key)?;
        Some(&self.entries[index].1)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut JsonNode> {
        let index = *self.indices.get(key)?;
        Some(&mut self.entries[index].1)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.indices.contains_key(key)
    }

    /// Returns the position of `key` in insertion order.
    #[inline]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.indices.get(key).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in insertion order.
    #[inline]
    pub fn iter(&self) -> ObjectIter<'_> {
        ObjectIter {
            inner: self.entries.iter(),
        }
    }

    /// Iterates over entries in insertion order, with mutable values.
    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut JsonNode)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[inline]
    pub fn values(&self) -> impl Iterator<Item = &JsonNode> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl Default for JsonObject {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for JsonObject {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl<K: Into<String>, V: Into<JsonNode>> FromIterator<(K, V)> for JsonObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = JsonObject::new();
        object.extend(iter);
        object
    }
}

impl<K: Into<String>, V: Into<JsonNode>> Extend<(K, V)> for JsonObject {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for JsonObject {
    type Item = (String, JsonNode);
    type IntoIter = alloc::vec::IntoIter<(String, JsonNode)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonObject {
    type Item = (&'a str, &'a JsonNode);
    type IntoIter = ObjectIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Missing keys index to [`JsonNode::Null`].
impl Index<&str> for JsonObject {
    type Output = JsonNode;

    #[inline]
    fn index(&self, key: &str) -> &JsonNode {
        self.get(key).unwrap_or(&NULL)
    }
}

impl fmt::Debug for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// ObjectIter

/// Borrowing iterator over the entries of a [`JsonObject`], in insertion order.
#[derive(Clone)]
pub struct ObjectIter<'a> {
    inner: core::slice::Iter<'a, (String, JsonNode)>,
}

impl<'a> Iterator for ObjectIter<'a> {
    type Item = (&'a str, &'a JsonNode);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ObjectIter<'_> {}

impl DoubleEndedIterator for ObjectIter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::JsonObject;
    use crate::JsonNode;
    use alloc::vec::Vec;

    fn sample() -> JsonObject {
        [("a", 1), ("b", 2), ("c", 3), ("d", 4)].into_iter().collect()
    }

    #[test]
    fn last_write_wins_and_keeps_position() {
        let mut obj = sample();
        assert_eq!(obj.insert("b", 20), Some(JsonNode::from(2)));
        assert_eq!(obj.keys().collect::<Vec<_>>(), ["a", "b", "c", "d"]);
        assert_eq!(obj["b"].as_u64(), Some(20));
    }

    #[test]
    fn remove_reindexes_later_keys() {
        let mut obj = sample();
        assert_eq!(obj.remove("b"), Some(JsonNode::from(2)));
        assert_eq!(obj.remove("b"), None);
        assert_eq!(obj.keys().collect::<Vec<_>>(), ["a", "c", "d"]);
        assert_eq!(obj.index_of("c"), Some(1));
        assert_eq!(obj.index_of("d"), Some(2));
        assert_eq!(obj.get("d"), Some(&JsonNode::from(4)));

        obj.insert("e", 5);
        assert_eq!(obj.index_of("e"), Some(3));
    }

    #[test]
    fn equality_ignores_order() {
        let a: JsonObject = [("x", 1), ("y", 2)].into_iter().collect();
        let b: JsonObject = [("y", 2), ("x", 1)].into_iter().collect();
        let c: JsonObject = [("y", 2), ("x", 3)].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, JsonObject::new());
    }

    #[test]
    fn missing_key_indexes_to_null() {
        assert!(sample()["zzz"].is_null());
    }
}
