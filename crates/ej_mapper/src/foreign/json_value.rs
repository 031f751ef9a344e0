use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use ej_node::{JsonNumber, JsonPrimitive};
use serde_json::{Map, Number, Value};

use super::{ForeignAdapter, ForeignRef};

/// Adapter for [`serde_json::Value`] trees.
///
/// # Examples
///
/// ```
/// use ej_mapper::foreign::{self, SerdeJsonAdapter};
///
/// let value = serde_json::json!({"a": [1, 2, 3], "b": null});
/// let node = foreign::from_foreign(&value, &SerdeJsonAdapter).unwrap();
/// assert_eq!(node.to_string(), r#"{"a":[1,2,3],"b":null}"#);
/// assert_eq!(foreign::to_foreign(&node, &SerdeJsonAdapter), value);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SerdeJsonAdapter;

impl ForeignAdapter for SerdeJsonAdapter {
    type Value = Value;
    type Array = Vec<Value>;
    type Object = Map<String, Value>;

    fn classify<'a>(&self, value: &'a Value) -> ForeignRef<'a, Value> {
        match value {
            Value::Null => ForeignRef::Null,
            Value::Bool(b) => ForeignRef::Primitive(JsonPrimitive::Bool(*b)),
            Value::Number(n) => match number(n) {
                Some(n) => ForeignRef::Primitive(JsonPrimitive::Number(n)),
                None => ForeignRef::Null,
            },
            Value::String(s) => ForeignRef::Primitive(JsonPrimitive::String(s.clone())),
            Value::Array(items) => ForeignRef::Array(Box::new(items.iter())),
            Value::Object(entries) => {
                ForeignRef::Object(Box::new(entries.iter().map(|(k, v)| (k.as_str(), v))))
            }
        }
    }

    #[inline]
    fn null(&self) -> Value {
        Value::Null
    }

    fn primitive(&self, value: &JsonPrimitive) -> Value {
        match value {
            JsonPrimitive::Bool(b) => Value::Bool(*b),
            JsonPrimitive::String(s) => Value::String(s.clone()),
            JsonPrimitive::Number(n) => {
                if let Some(v) = n.as_u64() {
                    Value::Number(v.into())
                } else if let Some(v) = n.as_i64() {
                    Value::Number(v.into())
                } else {
                    Number::from_f64(n.as_f64()).map_or(Value::Null, Value::Number)
                }
            }
        }
    }

    #[inline]
    fn array(&self, capacity: usize) -> Vec<Value> {
        Vec::with_capacity(capacity)
    }

    #[inline]
    fn push(&self, array: &mut Vec<Value>, item: Value) {
        array.push(item);
    }

    #[inline]
    fn finish_array(&self, array: Vec<Value>) -> Value {
        Value::Array(array)
    }

    #[inline]
    fn object(&self, capacity: usize) -> Map<String, Value> {
        Map::with_capacity(capacity)
    }

    #[inline]
    fn insert(&self, object: &mut Map<String, Value>, key: String, value: Value) {
        object.insert(key, value);
    }

    #[inline]
    fn finish_object(&self, object: Map<String, Value>) -> Value {
        Value::Object(object)
    }
}

fn number(n: &Number) -> Option<JsonNumber> {
    if let Some(v) = n.as_u64() {
        Some(JsonNumber::from(v))
    } else if let Some(v) = n.as_i64() {
        Some(JsonNumber::from(v))
    } else {
        n.as_f64().and_then(JsonNumber::from_f64)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use ej_node::{JsonNode, JsonObject};
    use serde_json::json;

    use super::SerdeJsonAdapter;
    use crate::foreign::{from_foreign, to_foreign};

    #[test]
    fn value_round_trip() {
        let value = json!({"a": [1, 2, 3], "b": null});
        let node = from_foreign(&value, &SerdeJsonAdapter).unwrap();
        assert_eq!(node["a"].as_array().map(|a| a.len()), Some(3));
        assert!(node["b"].is_null());
        assert!(node.as_object().unwrap().contains_key("b"));
        assert_eq!(to_foreign(&node, &SerdeJsonAdapter), value);
    }

    #[test]
    fn numbers_keep_representation() {
        let value = json!([u64::MAX, -5, 2.5, 1.0]);
        let node = from_foreign(&value, &SerdeJsonAdapter).unwrap();
        assert_eq!(node[0].as_u64(), Some(u64::MAX));
        assert_eq!(node[1].as_i64(), Some(-5));
        assert!(node[3].as_number().unwrap().is_f64());
        assert_eq!(to_foreign(&node, &SerdeJsonAdapter), value);
    }

    #[test]
    fn empty_containers_stay_containers() {
        let value = json!({"list": [], "map": {}});
        let node = from_foreign(&value, &SerdeJsonAdapter).unwrap();
        assert_eq!(node.to_string(), r#"{"list":[],"map":{}}"#);
    }

    #[test]
    fn object_keys_keep_insertion_order() {
        let node: JsonNode = JsonObject::from_iter([("b", 1), ("a", 2)]).into();

        let value = to_foreign(&node, &SerdeJsonAdapter);
        assert_eq!(value.to_string(), r#"{"b":1,"a":2}"#);
        let keys: Vec<_> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);

        let back = from_foreign(&value, &SerdeJsonAdapter).unwrap();
        let keys: Vec<_> = back.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(back, node);
    }
}
