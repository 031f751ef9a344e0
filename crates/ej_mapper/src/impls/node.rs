use ej_node::JsonNode;

use crate::{FromTreeContext, Mappable, MappableRef, Result};

/// Untyped subtrees are copied through unchanged in both directions.
impl Mappable for JsonNode {
    #[inline]
    fn classify(&self) -> MappableRef<'_> {
        MappableRef::Tree(self)
    }

    #[inline]
    fn from_tree(node: &JsonNode, _cx: &mut FromTreeContext<'_>) -> Result<Self> {
        Ok(node.clone())
    }
}
