use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;

use crate::{JsonArray, JsonNumber, JsonObject, JsonPrimitive};

/// Shared target for indexing misses.
pub(crate) static NULL: JsonNode = JsonNode::Null;

// -----------------------------------------------------------------------------
// JsonNode

/// A JSON value as an owned tree.
///
/// Every node owns its children, so a tree can never share a subtree with
/// another tree; embedding a node moves it or clones it.
///
/// # Examples
///
/// ```
/// use ej_node::{JsonNode, NodeKind};
///
/// let node: JsonNode = vec![JsonNode::from(1), JsonNode::from("x")].into();
/// assert_eq!(node.kind(), NodeKind::Array);
/// assert_eq!(node[0].as_i64(), Some(1));
/// assert!(node[5].is_null());
/// assert!(node["key"].is_null());
/// ```
#[derive(Clone, Default, PartialEq)]
pub enum JsonNode {
    #[default]
    Null,
    Primitive(JsonPrimitive),
    Array(JsonArray),
    Object(JsonObject),
}

/// The shape of a [`JsonNode`], used in error messages and dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl NodeKind {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "boolean",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        }
    }
}

impl fmt::Display for NodeKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JsonNode {
    /// Shorthand for a string primitive.
    #[inline]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Primitive(JsonPrimitive::String(value.into()))
    }

    #[inline]
    pub const fn kind(&self) -> NodeKind {
        match self {
            JsonNode::Null => NodeKind::Null,
            JsonNode::Primitive(JsonPrimitive::Bool(_)) => NodeKind::Bool,
            JsonNode::Primitive(JsonPrimitive::Number(_)) => NodeKind::Number,
            JsonNode::Primitive(JsonPrimitive::String(_)) => NodeKind::String,
            JsonNode::Array(_) => NodeKind::Array,
            JsonNode::Object(_) => NodeKind::Object,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, JsonNode::Null)
    }

    #[inline]
    pub const fn as_primitive(&self) -> Option<&JsonPrimitive> {
        match self {
            JsonNode::Primitive(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            JsonNode::Primitive(JsonPrimitive::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_number(&self) -> Option<&JsonNumber> {
        match self {
            JsonNode::Primitive(JsonPrimitive::Number(n)) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(JsonNumber::as_i64)
    }

    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        self.as_number().and_then(JsonNumber::as_u64)
    }

    /// Returns any number as `f64`, see [`JsonNumber::as_f64`].
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(JsonNumber::as_f64)
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonNode::Primitive(JsonPrimitive::String(s)) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_array(&self) -> Option<&JsonArray> {
        match self {
            JsonNode::Array(array) => Some(array),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_array_mut(&mut self) -> Option<&mut JsonArray> {
        match self {
            JsonNode::Array(array) => Some(array),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonNode::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object_mut(&mut self) -> Option<&mut JsonObject> {
        match self {
            JsonNode::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Replaces the node with `Null`, returning the previous value.
    #[inline]
    pub fn take(&mut self) -> JsonNode {
        core::mem::take(self)
    }
}

impl fmt::Debug for JsonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNode::Null => f.write_str("Null"),
            JsonNode::Primitive(JsonPrimitive::Bool(v)) => write!(f, "Bool({v})"),
            JsonNode::Primitive(JsonPrimitive::Number(n)) => fmt::Debug::fmt(n, f),
            JsonNode::Primitive(JsonPrimitive::String(s)) => write!(f, "String({s:?})"),
            JsonNode::Array(array) => {
                f.write_str("Array ")?;
                fmt::Debug::fmt(array, f)
            }
            JsonNode::Object(object) => {
                f.write_str("Object ")?;
                fmt::Debug::fmt(object, f)
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<JsonPrimitive> for JsonNode {
    #[inline]
    fn from(value: JsonPrimitive) -> Self {
        JsonNode::Primitive(value)
    }
}

impl From<JsonNumber> for JsonNode {
    #[inline]
    fn from(value: JsonNumber) -> Self {
        JsonNode::Primitive(JsonPrimitive::Number(value))
    }
}

impl From<JsonArray> for JsonNode {
    #[inline]
    fn from(value: JsonArray) -> Self {
        JsonNode::Array(value)
    }
}

impl From<JsonObject> for JsonNode {
    #[inline]
    fn from(value: JsonObject) -> Self {
        JsonNode::Object(value)
    }
}

impl From<bool> for JsonNode {
    #[inline]
    fn from(value: bool) -> Self {
        JsonNode::Primitive(JsonPrimitive::Bool(value))
    }
}

impl From<String> for JsonNode {
    #[inline]
    fn from(value: String) -> Self {
        JsonNode::Primitive(JsonPrimitive::String(value))
    }
}

impl From<&str> for JsonNode {
    #[inline]
    fn from(value: &str) -> Self {
        JsonNode::Primitive(JsonPrimitive::String(String::from(value)))
    }
}

impl From<char> for JsonNode {
    #[inline]
    fn from(value: char) -> Self {
        let mut buf = [0_u8; 4];
        JsonNode::from(&*value.encode_utf8(&mut buf))
    }
}

/// Non-finite floats have no JSON representation and become `Null`.
impl From<f64> for JsonNode {
    #[inline]
    fn from(value: f64) -> Self {
        match JsonNumber::from_f64(value) {
            Some(n) => JsonNode::from(n),
            None => JsonNode::Null,
        }
    }
}

impl From<f32> for JsonNode {
    #[inline]
    fn from(value: f32) -> Self {
        JsonNode::from(value as f64)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {$(
        impl From<$ty> for JsonNode {
            #[inline]
            fn from(value: $ty) -> Self {
                JsonNode::from(JsonNumber::from(value))
            }
        }
    )*};
}

impl_from_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl<T: Into<JsonNode>> From<Option<T>> for JsonNode {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => JsonNode::Null,
        }
    }
}

impl From<Vec<JsonNode>> for JsonNode {
    #[inline]
    fn from(value: Vec<JsonNode>) -> Self {
        JsonNode::Array(JsonArray::from(value))
    }
}

impl<T: Into<JsonNode>> FromIterator<T> for JsonNode {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        JsonNode::Array(iter.into_iter().collect())
    }
}

// -----------------------------------------------------------------------------
// Indexing

/// Out-of-bounds indices, and indexing a non-array, give `Null`.
impl Index<usize> for JsonNode {
    type Output = JsonNode;

    #[inline]
    fn index(&self, index: usize) -> &JsonNode {
        match self {
            JsonNode::Array(array) => array.get(index).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

/// Missing keys, and indexing a non-object, give `Null`.
impl Index<&str> for JsonNode {
    type Output = JsonNode;

    #[inline]
    fn index(&self, key: &str) -> &JsonNode {
        match self {
            JsonNode::Object(object) => object.get(key).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonNode, NodeKind};
    use crate::{JsonObject, JsonPrimitive};

    #[test]
    fn structural_equality() {
        let a: JsonNode = JsonObject::from_iter([("k", JsonNode::from_iter([1, 2]))]).into();
        let b: JsonNode = JsonObject::from_iter([("k", JsonNode::from_iter([1, 2]))]).into();
        let c: JsonNode = JsonObject::from_iter([("k", JsonNode::from_iter([2, 1]))]).into();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn kinds() {
        assert_eq!(JsonNode::Null.kind(), NodeKind::Null);
        assert_eq!(JsonNode::from(false).kind(), NodeKind::Bool);
        assert_eq!(JsonNode::from(-1).kind(), NodeKind::Number);
        assert_eq!(JsonNode::from('c').kind(), NodeKind::String);
        assert_eq!(JsonNode::from_iter([0; 0]).kind(), NodeKind::Array);
        assert_eq!(JsonNode::from(JsonObject::new()).kind(), NodeKind::Object);
    }

    #[test]
    fn non_finite_float_is_null() {
        assert!(JsonNode::from(f64::INFINITY).is_null());
        assert_eq!(
            JsonNode::from(0.5_f32),
            JsonNode::Primitive(JsonPrimitive::Number(crate::JsonNumber::from_f64(0.5).unwrap()))
        );
    }

    #[test]
    fn option_maps_to_null() {
        assert!(JsonNode::from(None::<i32>).is_null());
        assert_eq!(JsonNode::from(Some("x")).as_str(), Some("x"));
    }
}
