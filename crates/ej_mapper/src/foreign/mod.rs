//! Bridging [`JsonNode`] trees and the trees of other JSON libraries.
//!
//! A [`ForeignAdapter`] describes one foreign value type. The walk in either
//! direction is purely structural: no exclusion rules and no type hints are
//! involved. Values the adapter can only show as JSON text are parsed with its
//! [`TextParser`].

// -----------------------------------------------------------------------------
// Modules

mod text;

#[cfg(feature = "serde_json")]
mod json_value;

// -----------------------------------------------------------------------------
// Exports

pub use text::{ParseError, TextParser};

#[cfg(feature = "serde_json")]
pub use json_value::SerdeJsonAdapter;
#[cfg(feature = "serde_json")]
pub use text::JsonTextParser;

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;

use ej_node::{JsonArray, JsonNode, JsonObject, JsonPrimitive};

use crate::{ForeignError, Result};

// -----------------------------------------------------------------------------
// ForeignAdapter

/// The shape of a foreign value.
pub enum ForeignRef<'a, V> {
    Null,
    Primitive(JsonPrimitive),
    Array(Box<dyn Iterator<Item = &'a V> + 'a>),
    Object(Box<dyn Iterator<Item = (&'a str, &'a V)> + 'a>),
    /// The value is only available as JSON text.
    Text(Cow<'a, str>),
}

/// Reads and builds the values of one foreign JSON model.
///
/// # Examples
///
/// See `SerdeJsonAdapter` for a complete adapter.
pub trait ForeignAdapter {
    type Value;
    /// An array under construction.
    type Array;
    /// An object under construction.
    type Object;

    fn classify<'a>(&self, value: &'a Self::Value) -> ForeignRef<'a, Self::Value>;

    fn null(&self) -> Self::Value;

    fn primitive(&self, value: &JsonPrimitive) -> Self::Value;

    fn array(&self, capacity: usize) -> Self::Array;

    fn push(&self, array: &mut Self::Array, item: Self::Value);

    fn finish_array(&self, array: Self::Array) -> Self::Value;

    fn object(&self, capacity: usize) -> Self::Object;

    fn insert(&self, object: &mut Self::Object, key: String, value: Self::Value);

    fn finish_object(&self, object: Self::Object) -> Self::Value;

    /// The parser for [`ForeignRef::Text`] values.
    ///
    /// Defaults to [`JsonTextParser`] when the `serde_json` feature is enabled.
    #[inline]
    fn text_parser(&self) -> Option<&dyn TextParser> {
        text::default_parser()
    }
}

// -----------------------------------------------------------------------------
// Walks

/// Builds the foreign equivalent of `node`.
pub fn to_foreign<A: ForeignAdapter + ?Sized>(node: &JsonNode, adapter: &A) -> A::Value {
    match node {
        JsonNode::Null => adapter.null(),
        JsonNode::Primitive(primitive) => adapter.primitive(primitive),
        JsonNode::Array(items) => {
            let mut array = adapter.array(items.len());
            for item in items {
                let value = to_foreign(item, adapter);
                adapter.push(&mut array, value);
            }
            adapter.finish_array(array)
        }
        JsonNode::Object(entries) => {
            let mut object = adapter.object(entries.len());
            for (key, value) in entries {
                let value = to_foreign(value, adapter);
                adapter.insert(&mut object, String::from(key), value);
            }
            adapter.finish_object(object)
        }
    }
}

/// Builds the [`JsonNode`] equivalent of a foreign value.
///
/// Duplicate object keys keep the last value.
pub fn from_foreign<A: ForeignAdapter + ?Sized>(value: &A::Value, adapter: &A) -> Result<JsonNode> {
    match adapter.classify(value) {
        ForeignRef::Null => Ok(JsonNode::Null),
        ForeignRef::Primitive(primitive) => Ok(JsonNode::Primitive(primitive)),
        ForeignRef::Array(items) => {
            let mut array = JsonArray::new();
            for item in items {
                array.push(from_foreign(item, adapter)?);
            }
            Ok(array.into())
        }
        ForeignRef::Object(entries) => {
            let mut object = JsonObject::new();
            for (key, value) in entries {
                object.insert(key, from_foreign(value, adapter)?);
            }
            Ok(object.into())
        }
        ForeignRef::Text(text) => {
            let parser = adapter.text_parser().ok_or(ForeignError::NoTextParser)?;
            log::debug!("reading foreign value through its JSON text ({} bytes)", text.len());
            Ok(parser.parse(&text)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;
    use alloc::string::String;
    use alloc::vec::Vec;

    use ej_node::{JsonNode, JsonPrimitive};

    use super::{ForeignAdapter, ForeignRef, TextParser, from_foreign, to_foreign};
    use crate::{Error, ForeignError};

    /// A foreign model where only lists are structured.
    #[derive(Debug, PartialEq)]
    enum Opaque {
        List(Vec<Opaque>),
        Raw(String),
    }

    struct OpaqueAdapter {
        parser: bool,
    }

    impl ForeignAdapter for OpaqueAdapter {
        type Value = Opaque;
        type Array = Vec<Opaque>;
        type Object = Vec<Opaque>;

        fn classify<'a>(&self, value: &'a Opaque) -> ForeignRef<'a, Opaque> {
            match value {
                Opaque::List(items) => ForeignRef::Array(alloc::boxed::Box::new(items.iter())),
                Opaque::Raw(text) => ForeignRef::Text(Cow::Borrowed(text.as_str())),
            }
        }

        fn null(&self) -> Opaque {
            Opaque::Raw(String::from("null"))
        }

        fn primitive(&self, value: &JsonPrimitive) -> Opaque {
            Opaque::Raw(alloc::format!("{}", JsonNode::from(value.clone())))
        }

        fn array(&self, capacity: usize) -> Vec<Opaque> {
            Vec::with_capacity(capacity)
        }

        fn push(&self, array: &mut Vec<Opaque>, item: Opaque) {
            array.push(item);
        }

        fn finish_array(&self, array: Vec<Opaque>) -> Opaque {
            Opaque::List(array)
        }

        fn object(&self, capacity: usize) -> Vec<Opaque> {
            Vec::with_capacity(capacity)
        }

        fn insert(&self, object: &mut Vec<Opaque>, _key: String, value: Opaque) {
            object.push(value);
        }

        fn finish_object(&self, object: Vec<Opaque>) -> Opaque {
            Opaque::List(object)
        }

        fn text_parser(&self) -> Option<&dyn TextParser> {
            if self.parser { super::text::default_parser() } else { None }
        }
    }

    #[test]
    fn structural_round_trip() {
        let adapter = OpaqueAdapter { parser: true };
        let node = JsonNode::from_iter([JsonNode::from(1), JsonNode::Null, JsonNode::from("s")]);
        let foreign = to_foreign(&node, &adapter);
        assert_eq!(
            foreign,
            Opaque::List(alloc::vec![
                Opaque::Raw("1".into()),
                Opaque::Raw("null".into()),
                Opaque::Raw(r#""s""#.into()),
            ])
        );

        if cfg!(feature = "serde_json") {
            assert_eq!(from_foreign(&foreign, &adapter).unwrap(), node);
        }
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn text_fallback_parses_objects() {
        let adapter = OpaqueAdapter { parser: true };
        let value = Opaque::Raw(String::from(r#"{"a":[1,2],"b":true}"#));
        let node = from_foreign(&value, &adapter).unwrap();
        assert_eq!(node["a"][1].as_u64(), Some(2));
        assert_eq!(node["b"].as_bool(), Some(true));

        let err = from_foreign(&Opaque::Raw(String::from("{oops")), &adapter).unwrap_err();
        assert!(matches!(err, Error::Foreign(ForeignError::Parse(_))));
    }

    #[test]
    fn text_without_parser_fails() {
        let adapter = OpaqueAdapter { parser: false };
        let err = from_foreign(&Opaque::Raw(String::from("1")), &adapter).unwrap_err();
        assert_eq!(err, Error::Foreign(ForeignError::NoTextParser));
    }
}
