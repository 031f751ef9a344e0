use ej_exclusion::ExclusionConfiguration;
use ej_node::JsonNode;

use crate::foreign::{self, ForeignAdapter};
use crate::from_tree::FromTreeContext;
use crate::to_tree::TreeWriter;
use crate::{Mappable, Result};

// -----------------------------------------------------------------------------
// Mapper

/// Converts between host values, [`JsonNode`] trees and foreign trees under
/// one [`ExclusionConfiguration`].
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use ej_exclusion::ExclusionConfiguration;
/// use ej_mapper::Mapper;
///
/// let config = ExclusionConfiguration::new();
/// let mapper = Mapper::new(&config);
///
/// let scores = BTreeMap::from([("ann".to_string(), vec![3, 5])]);
/// let tree = mapper.to_tree(&scores).unwrap();
/// assert_eq!(tree.to_string(), r#"{"ann":[3,5]}"#);
///
/// let back: BTreeMap<String, Vec<u8>> = mapper.from_tree(&tree).unwrap();
/// assert_eq!(back["ann"], [3, 5]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Mapper<'a> {
    config: &'a ExclusionConfiguration,
}

impl<'a> Mapper<'a> {
    #[inline]
    pub const fn new(config: &'a ExclusionConfiguration) -> Self {
        Self { config }
    }

    #[inline]
    pub const fn config(&self) -> &'a ExclusionConfiguration {
        self.config
    }

    /// Builds the tree of `value`, skipping everything excluded for
    /// serialization.
    ///
    /// Fails on a cycle, or on a map key that is not a scalar. No partial tree
    /// is returned.
    pub fn to_tree<T: Mappable>(&self, value: &T) -> Result<JsonNode> {
        self.to_tree_dyn(value)
    }

    /// [`to_tree`](Self::to_tree) for a type-erased value.
    pub fn to_tree_dyn(&self, value: &dyn Mappable) -> Result<JsonNode> {
        TreeWriter::new(self.config).write(value)
    }

    /// Builds a `T` from `node`, skipping everything excluded for
    /// deserialization.
    pub fn from_tree<T: Mappable>(&self, node: &JsonNode) -> Result<T> {
        T::from_tree(node, &mut FromTreeContext::new(self.config))
    }

    /// Builds the foreign equivalent of `node`.
    #[inline]
    pub fn to_foreign<A: ForeignAdapter + ?Sized>(&self, node: &JsonNode, adapter: &A) -> A::Value {
        foreign::to_foreign(node, adapter)
    }

    /// Builds a tree from a foreign value.
    #[inline]
    pub fn from_foreign<A: ForeignAdapter + ?Sized>(
        &self,
        value: &A::Value,
        adapter: &A,
    ) -> Result<JsonNode> {
        foreign::from_foreign(value, adapter)
    }
}

// -----------------------------------------------------------------------------
// Free functions

/// Shorthand for [`Mapper::to_tree`].
#[inline]
pub fn to_tree<T: Mappable>(value: &T, config: &ExclusionConfiguration) -> Result<JsonNode> {
    Mapper::new(config).to_tree(value)
}

/// Shorthand for [`Mapper::from_tree`].
#[inline]
pub fn from_tree<T: Mappable>(node: &JsonNode, config: &ExclusionConfiguration) -> Result<T> {
    Mapper::new(config).from_tree(node)
}
