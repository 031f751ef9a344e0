use ej_exclusion::ExclusionConfiguration;
use ej_node::{JsonArray, JsonNode, JsonNumber, JsonObject};

use crate::path::JsonPath;
use crate::{Mappable, MappingError, RecordMut, Result};

// -----------------------------------------------------------------------------
// FromTreeContext

/// State shared by every [`Mappable::from_tree`] call of one conversion.
///
/// It carries the configuration deciding which fields are read and the path
/// of the node being converted, which ends up in every error.
pub struct FromTreeContext<'a> {
    config: &'a ExclusionConfiguration,
    path: JsonPath,
}

impl<'a> FromTreeContext<'a> {
    #[inline]
    pub fn new(config: &'a ExclusionConfiguration) -> Self {
        Self {
            config,
            path: JsonPath::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &'a ExclusionConfiguration {
        self.config
    }

    #[inline]
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// A [`MappingError::Mismatch`] for `node` at the current path.
    pub fn mismatch(&self, expected: &'static str, node: &JsonNode) -> MappingError {
        MappingError::Mismatch {
            expected,
            found: node.kind(),
            path: self.path.render(),
        }
    }

    /// A [`MappingError::NumberOutOfRange`] for `value` at the current path.
    pub fn out_of_range(&self, value: JsonNumber, target: &'static str) -> MappingError {
        MappingError::NumberOutOfRange {
            value,
            target,
            path: self.path.render(),
        }
    }

    /// Runs `func` with `key` appended to the path.
    pub fn in_key<R>(&mut self, key: &str, func: impl FnOnce(&mut Self) -> R) -> R {
        self.path.push_key(key);
        let result = func(self);
        self.path.pop();
        result
    }

    /// Runs `func` with `index` appended to the path.
    pub fn in_index<R>(&mut self, index: usize, func: impl FnOnce(&mut Self) -> R) -> R {
        self.path.push_index(index);
        let result = func(self);
        self.path.pop();
        result
    }

    pub fn expect_array<'n>(&self, node: &'n JsonNode) -> Result<&'n JsonArray> {
        node.as_array().ok_or_else(|| self.mismatch("array", node).into())
    }

    pub fn expect_object<'n>(&self, node: &'n JsonNode) -> Result<&'n JsonObject> {
        node.as_object().ok_or_else(|| self.mismatch("object", node).into())
    }

    /// Converts every element of an array node, in order.
    pub fn read_elements<T: Mappable>(
        &mut self,
        node: &JsonNode,
        mut push: impl FnMut(T),
    ) -> Result<()> {
        let array = self.expect_array(node)?;
        for (index, item) in array.iter().enumerate() {
            let value = self.in_index(index, |cx| T::from_tree(item, cx))?;
            push(value);
        }
        Ok(())
    }

    /// Converts every entry of an object node, in insertion order.
    pub fn read_entries<K: Mappable, V: Mappable>(
        &mut self,
        node: &JsonNode,
        mut insert: impl FnMut(K, V),
    ) -> Result<()> {
        let object = self.expect_object(node)?;
        for (key, value) in object {
            let (key, value) = self.in_key(key, |cx| {
                let k = cx.read_key::<K>(key)?;
                let v = V::from_tree(value, cx)?;
                Ok::<_, crate::Error>((k, v))
            })?;
            insert(key, value);
        }
        Ok(())
    }

    /// Decodes a map key from its string form.
    ///
    /// Keys of non-textual types are retried as a number or boolean literal,
    /// so `"42"` becomes a valid `u32` key.
    pub fn read_key<K: Mappable>(&mut self, key: &str) -> Result<K> {
        let text = JsonNode::from(key);
        match K::from_tree(&text, self) {
            Ok(value) => Ok(value),
            Err(err) => match parse_literal(key) {
                Some(literal) => K::from_tree(&literal, self),
                None => Err(err),
            },
        }
    }

    /// Builds a record from an object node, applying deserialization
    /// exclusion.
    ///
    /// Fields start from `T::default()`. Excluded fields and fields without a
    /// key in `node` keep their default value.
    pub fn read_record<T>(&mut self, node: &JsonNode) -> Result<T>
    where
        T: RecordMut + Default,
    {
        let object = self.expect_object(node)?;
        let mut value = T::default();

        for (index, field) in value.fields().iter().enumerate() {
            if self.config.is_member_excluded(field, false) {
                log::trace!(
                    "skipping field `{}` of `{}` at `{}`",
                    field.name(),
                    field.declaring_type(),
                    self.path
                );
                continue;
            }

            let Some(child) = object.get(field.name()) else {
                continue;
            };

            self.in_key(field.name(), |cx| value.write_field(index, child, cx))?;
        }

        Ok(value)
    }
}

/// Reads `text` as a JSON number or boolean literal.
fn parse_literal(text: &str) -> Option<JsonNode> {
    match text {
        "true" => return Some(JsonNode::from(true)),
        "false" => return Some(JsonNode::from(false)),
        _ => {}
    }
    if let Ok(v) = text.parse::<u64>() {
        return Some(JsonNode::from(v));
    }
    if let Ok(v) = text.parse::<i64>() {
        return Some(JsonNode::from(v));
    }
    let v = text.parse::<f64>().ok()?;
    JsonNumber::from_f64(v).map(JsonNode::from)
}
