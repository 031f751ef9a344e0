use alloc::boxed::Box;

use ej_exclusion::ClassDescriptor;
use ej_node::JsonNode;

use crate::{FromTreeContext, Mappable, MappableRef, Result};

/// `None` is `null`; `null` reads back as `None`.
///
/// Exclusion rules see the descriptor of `T`.
impl<T: Mappable> Mappable for Option<T> {
    #[inline]
    fn classify(&self) -> MappableRef<'_> {
        match self {
            Some(value) => value.classify(),
            None => MappableRef::Null,
        }
    }

    fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self> {
        if node.is_null() {
            Ok(None)
        } else {
            T::from_tree(node, cx).map(Some)
        }
    }

    #[inline]
    fn class_descriptor() -> ClassDescriptor {
        T::class_descriptor()
    }
}

impl<T: Mappable> Mappable for Box<T> {
    #[inline]
    fn classify(&self) -> MappableRef<'_> {
        (**self).classify()
    }

    #[inline]
    fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self> {
        T::from_tree(node, cx).map(Box::new)
    }

    #[inline]
    fn class_descriptor() -> ClassDescriptor {
        T::class_descriptor()
    }
}
