//! `serde` support: any self-describing format can produce or consume a
//! [`JsonNode`]. Numbers keep their representation through `visit_u64`,
//! `visit_i64` and `visit_f64`.

use alloc::string::String;
use core::fmt;

use serde_core::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{JsonArray, JsonNode, JsonNumber, JsonObject, JsonPrimitive};

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for JsonNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonNode::Null => serializer.serialize_unit(),
            JsonNode::Primitive(primitive) => primitive.serialize(serializer),
            JsonNode::Array(array) => array.serialize(serializer),
            JsonNode::Object(object) => object.serialize(serializer),
        }
    }
}

impl Serialize for JsonPrimitive {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonPrimitive::Bool(v) => serializer.serialize_bool(*v),
            JsonPrimitive::Number(n) => n.serialize(serializer),
            JsonPrimitive::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for JsonNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(v) = self.as_u64() {
            serializer.serialize_u64(v)
        } else if let Some(v) = self.as_i64() {
            serializer.serialize_i64(v)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

impl Serialize for JsonArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl Serialize for JsonObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// -----------------------------------------------------------------------------
// Deserialize

impl<'de> Deserialize<'de> for JsonNode {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = JsonNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    #[inline]
    fn visit_bool<E>(self, v: bool) -> Result<JsonNode, E> {
        Ok(JsonNode::from(v))
    }

    #[inline]
    fn visit_i64<E>(self, v: i64) -> Result<JsonNode, E> {
        Ok(JsonNode::from(v))
    }

    #[inline]
    fn visit_u64<E>(self, v: u64) -> Result<JsonNode, E> {
        Ok(JsonNode::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<JsonNode, E> {
        match JsonNumber::from_f64(v) {
            Some(n) => Ok(JsonNode::from(n)),
            None => Err(E::custom("non-finite float is not a JSON number")),
        }
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<JsonNode, E> {
        Ok(JsonNode::from(v))
    }

    #[inline]
    fn visit_string<E>(self, v: String) -> Result<JsonNode, E> {
        Ok(JsonNode::from(v))
    }

    #[inline]
    fn visit_none<E>(self) -> Result<JsonNode, E> {
        Ok(JsonNode::Null)
    }

    #[inline]
    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<JsonNode, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    #[inline]
    fn visit_unit<E>(self) -> Result<JsonNode, E> {
        Ok(JsonNode::Null)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<JsonNode, A::Error> {
        let mut array = JsonArray::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<JsonNode>()? {
            array.push(item);
        }
        Ok(JsonNode::Array(array))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<JsonNode, A::Error> {
        let mut object = JsonObject::with_capacity(map.size_hint().unwrap_or(0));
        // Duplicate keys: the last one wins.
        while let Some((key, value)) = map.next_entry::<String, JsonNode>()? {
            object.insert(key, value);
        }
        Ok(JsonNode::Object(object))
    }
}

#[cfg(test)]
mod tests {
    use crate::{JsonNode, JsonNumber};

    #[test]
    fn parse_keeps_number_representation() {
        let node: JsonNode = serde_json::from_str(r#"[1, -1, 1.0, 18446744073709551615]"#).unwrap();
        assert_eq!(node[0].as_number(), Some(&JsonNumber::from(1_u8)));
        assert_eq!(node[1].as_i64(), Some(-1));
        assert!(node[2].as_number().unwrap().is_f64());
        assert_eq!(node[3].as_u64(), Some(u64::MAX));
    }

    #[test]
    fn duplicate_keys_keep_last() {
        let node: JsonNode = serde_json::from_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        assert_eq!(node["a"].as_u64(), Some(3));
        assert_eq!(node.as_object().unwrap().keys().next(), Some("a"));
    }

    #[test]
    fn text_round_trip() {
        let text = r#"{"a":[1,2,3],"b":null,"c":{"d":"e"},"f":-0.5}"#;
        let node: JsonNode = serde_json::from_str(text).unwrap();
        assert_eq!(serde_json::to_string(&node).unwrap(), text);
        assert_eq!(alloc::string::ToString::to_string(&node), text);
    }

    #[test]
    fn embedded_in_serde_types() {
        #[derive(::serde::Serialize, ::serde::Deserialize)]
        struct Envelope {
            kind: alloc::string::String,
            payload: JsonNode,
        }

        let text = r#"{"kind":"event","payload":{"id":7,"tags":["x"]}}"#;
        let envelope: Envelope = serde_json::from_str(text).unwrap();
        assert_eq!(envelope.kind, "event");
        assert_eq!(envelope.payload["id"].as_u64(), Some(7));
        assert_eq!(serde_json::to_string(&envelope).unwrap(), text);
    }
}
