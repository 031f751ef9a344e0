use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};
use core::slice;

use crate::JsonNode;

// -----------------------------------------------------------------------------
// JsonArray

/// An ordered sequence of [`JsonNode`]s.
///
/// # Examples
///
/// ```
/// use ej_node::{JsonArray, JsonNode};
///
/// let mut array = JsonArray::new();
/// array.push(1);
/// array.push("two");
/// array.push(JsonNode::Null);
///
/// assert_eq!(array.len(), 3);
/// assert_eq!(array[1].as_str(), Some("two"));
/// assert!(array.get(3).is_none());
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct JsonArray {
    items: Vec<JsonNode>,
}

impl JsonArray {
    /// Creates an empty array.
    #[inline]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty array with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Appends a value to the end of the array.
    #[inline]
    pub fn push(&mut self, value: impl Into<JsonNode>) {
        self.items.push(value.into());
    }

    /// Removes and returns the element at `index`, shifting later elements.
    ///
    /// Returns `None` if `index` is out of bounds.
    #[inline]
    pub fn remove(&mut self, index: usize) -> Option<JsonNode> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&JsonNode> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut JsonNode> {
        self.items.get_mut(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, JsonNode> {
        self.items.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, JsonNode> {
        self.items.iter_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[JsonNode] {
        &self.items
    }

    /// Consumes the array, returning the underlying vector.
    #[inline]
    pub fn into_vec(self) -> Vec<JsonNode> {
        self.items
    }
}

impl From<Vec<JsonNode>> for JsonArray {
    #[inline]
    fn from(items: Vec<JsonNode>) -> Self {
        Self { items }
    }
}

impl<T: Into<JsonNode>> FromIterator<T> for JsonArray {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T: Into<JsonNode>> Extend<T> for JsonArray {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for JsonArray {
    type Item = JsonNode;
    type IntoIter = alloc::vec::IntoIter<JsonNode>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonArray {
    type Item = &'a JsonNode;
    type IntoIter = slice::Iter<'a, JsonNode>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a mut JsonArray {
    type Item = &'a mut JsonNode;
    type IntoIter = slice::IterMut<'a, JsonNode>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

impl Index<usize> for JsonArray {
    type Output = JsonNode;

    #[inline]
    fn index(&self, index: usize) -> &JsonNode {
        &self.items[index]
    }
}

impl IndexMut<usize> for JsonArray {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut JsonNode {
        &mut self.items[index]
    }
}

impl fmt::Debug for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::JsonArray;
    use crate::JsonNode;

    #[test]
    fn keeps_insertion_order() {
        let mut array = JsonArray::new();
        array.extend([3, 1, 2]);
        let values = array.iter().filter_map(JsonNode::as_u64);
        assert!(values.eq([3, 1, 2]));
    }

    #[test]
    fn remove_out_of_bounds() {
        let mut array: JsonArray = [true, false].into_iter().collect();
        assert_eq!(array.remove(5), None);
        assert_eq!(array.remove(0), Some(JsonNode::from(true)));
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn positional_equality() {
        let a: JsonArray = [1, 2].into_iter().collect();
        let b: JsonArray = [2, 1].into_iter().collect();
        assert_ne!(a, b);
    }
}
