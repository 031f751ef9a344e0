use alloc::string::{String, ToString};
use core::any::TypeId;

use ej_exclusion::ExclusionConfiguration;
use ej_node::{JsonArray, JsonNode, JsonObject, JsonPrimitive};
use foldhash::fast::FixedState;
use hashbrown::HashSet;

use crate::path::JsonPath;
use crate::{CycleDetectedError, KeyProjectionError, Mappable, MappableRef, Result, ScalarRef};
use crate::{Mapping, Record, Sequence};

/// Same seed as the object key index in `ej_node`.
const VISITING_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// Walks a host value and builds the tree, applying serialization exclusion.
pub(crate) struct TreeWriter<'a> {
    config: &'a ExclusionConfiguration,
    path: JsonPath,
    /// Containers on the current path, by address and concrete type.
    visiting: HashSet<(usize, TypeId), FixedState>,
}

impl<'a> TreeWriter<'a> {
    pub fn new(config: &'a ExclusionConfiguration) -> Self {
        Self {
            config,
            path: JsonPath::new(),
            visiting: HashSet::with_hasher(VISITING_HASH_STATE),
        }
    }

    pub fn write(&mut self, value: &dyn Mappable) -> Result<JsonNode> {
        match value.classify() {
            MappableRef::Null => Ok(JsonNode::Null),
            MappableRef::Scalar(scalar) => Ok(scalar_node(scalar)),
            MappableRef::Tree(node) => Ok(node.clone()),
            MappableRef::Sequence(sequence) => {
                self.guarded(value, |this| this.write_sequence(sequence))
            }
            MappableRef::Mapping(mapping) => {
                self.guarded(value, |this| this.write_mapping(mapping))
            }
            MappableRef::Record(record) => {
                let class = record.class();
                if self.config.is_class_excluded(&class, true) {
                    log::trace!("skipping excluded type `{class}` at `{}`", self.path);
                    return Ok(JsonNode::Null);
                }
                self.guarded(value, |this| this.write_record(record))
            }
        }
    }

    /// Runs `func` with `value` marked as being visited.
    fn guarded(
        &mut self,
        value: &dyn Mappable,
        func: impl FnOnce(&mut Self) -> Result<JsonNode>,
    ) -> Result<JsonNode> {
        let key = (
            core::ptr::from_ref(value).cast::<()>() as usize,
            value.host_type_id(),
        );

        if !self.visiting.insert(key) {
            log::warn!("cycle detected through `{}` at `{}`", value.type_path(), self.path);
            return Err(CycleDetectedError {
                type_path: value.type_path(),
                path: self.path.render(),
            }
            .into());
        }

        let result = func(self);
        self.visiting.remove(&key);
        result
    }

    fn write_sequence(&mut self, sequence: &dyn Sequence) -> Result<JsonNode> {
        let mut array = JsonArray::with_capacity(sequence.len());
        for (index, item) in sequence.items().enumerate() {
            self.path.push_index(index);
            let node = self.write(item);
            self.path.pop();
            array.push(node?);
        }
        Ok(array.into())
    }

    fn write_mapping(&mut self, mapping: &dyn Mapping) -> Result<JsonNode> {
        let mut object = JsonObject::with_capacity(mapping.len());
        for (key, value) in mapping.entries() {
            let key = self.project_key(key)?;
            self.path.push_key(key.as_str());
            let node = self.write(value);
            self.path.pop();
            object.insert(key, node?);
        }
        Ok(object.into())
    }

    fn write_record(&mut self, record: &dyn Record) -> Result<JsonNode> {
        let fields = record.fields();
        let mut object = JsonObject::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            if self.config.is_member_excluded(field, true) {
                log::trace!(
                    "skipping field `{}` of `{}` at `{}`",
                    field.name(),
                    field.declaring_type(),
                    self.path
                );
                continue;
            }

            self.path.push_key(field.name());
            let node = match record.field(index) {
                Some(value) => self.write(value),
                None => Ok(JsonNode::Null),
            };
            self.path.pop();
            object.insert(field.name(), node?);
        }
        Ok(object.into())
    }

    /// Object keys come from scalars only.
    fn project_key(&self, key: &dyn Mappable) -> Result<String> {
        match key.classify() {
            MappableRef::Scalar(ScalarRef::Str(s)) => Ok(String::from(s)),
            MappableRef::Scalar(ScalarRef::Char(c)) => Ok(c.to_string()),
            MappableRef::Scalar(ScalarRef::Bool(b)) => Ok(b.to_string()),
            MappableRef::Scalar(ScalarRef::Number(n)) => Ok(n.to_string()),
            MappableRef::Tree(JsonNode::Primitive(primitive)) => Ok(match primitive {
                JsonPrimitive::String(s) => s.clone(),
                JsonPrimitive::Bool(b) => b.to_string(),
                JsonPrimitive::Number(n) => n.to_string(),
            }),
            other => Err(KeyProjectionError {
                kind: other.kind_name(),
                path: self.path.render(),
            }
            .into()),
        }
    }
}

fn scalar_node(scalar: ScalarRef<'_>) -> JsonNode {
    match scalar {
        ScalarRef::Bool(b) => JsonNode::from(b),
        ScalarRef::Number(n) => JsonNode::from(n),
        ScalarRef::Str(s) => JsonNode::from(s),
        ScalarRef::Char(c) => JsonNode::from(c),
    }
}
