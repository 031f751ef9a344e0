use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::vec::Vec;

use ej_node::JsonNode;

use crate::{Entries, FromTreeContext, Items, Mappable, MappableRef, Mapping, Result, Sequence};

#[inline]
fn erase<T: Mappable>(value: &T) -> &dyn Mappable {
    value
}

// -----------------------------------------------------------------------------
// Sequences

macro_rules! impl_sequence {
    ($ty:ident<T $(: $bound:path)?>, $insert:ident) => {
        impl<T: Mappable $(+ $bound)?> Sequence for $ty<T> {
            #[inline]
            fn len(&self) -> usize {
                $ty::len(self)
            }

            fn items(&self) -> Items<'_> {
                Box::new(self.iter().map(erase))
            }
        }

        impl<T: Mappable $(+ $bound)?> Mappable for $ty<T> {
            #[inline]
            fn classify(&self) -> MappableRef<'_> {
                MappableRef::Sequence(self)
            }

            fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self> {
                let mut out = $ty::new();
                cx.read_elements(node, |item| {
                    out.$insert(item);
                })?;
                Ok(out)
            }
        }
    };
}

impl_sequence!(Vec<T>, push);
impl_sequence!(VecDeque<T>, push_back);
impl_sequence!(BTreeSet<T: Ord>, insert);

// -----------------------------------------------------------------------------
// Mappings

impl<K: Mappable + Ord, V: Mappable> Mapping for BTreeMap<K, V> {
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entries(&self) -> Entries<'_> {
        Box::new(self.iter().map(|(k, v)| (erase(k), erase(v))))
    }
}

impl<K: Mappable + Ord, V: Mappable> Mappable for BTreeMap<K, V> {
    #[inline]
    fn classify(&self) -> MappableRef<'_> {
        MappableRef::Mapping(self)
    }

    fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self> {
        let mut out = BTreeMap::new();
        cx.read_entries(node, |k, v| {
            out.insert(k, v);
        })?;
        Ok(out)
    }
}

#[cfg(feature = "std")]
mod hash {
    use alloc::boxed::Box;
    use core::hash::{BuildHasher, Hash};
    use std::collections::{HashMap, HashSet};

    use ej_node::JsonNode;

    use super::erase;
    use crate::{Entries, FromTreeContext, Items, Mappable, MappableRef, Mapping, Result, Sequence};

    impl<T, S> Sequence for HashSet<T, S>
    where
        T: Mappable + Eq + Hash,
        S: BuildHasher + Default + 'static,
    {
        #[inline]
        fn len(&self) -> usize {
            HashSet::len(self)
        }

        fn items(&self) -> Items<'_> {
            Box::new(self.iter().map(erase))
        }
    }

    impl<T, S> Mappable for HashSet<T, S>
    where
        T: Mappable + Eq + Hash,
        S: BuildHasher + Default + 'static,
    {
        #[inline]
        fn classify(&self) -> MappableRef<'_> {
            MappableRef::Sequence(self)
        }

        fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self> {
            let mut out = HashSet::default();
            cx.read_elements(node, |item| {
                out.insert(item);
            })?;
            Ok(out)
        }
    }

    impl<K, V, S> Mapping for HashMap<K, V, S>
    where
        K: Mappable + Eq + Hash,
        V: Mappable,
        S: BuildHasher + Default + 'static,
    {
        #[inline]
        fn len(&self) -> usize {
            HashMap::len(self)
        }

        fn entries(&self) -> Entries<'_> {
            Box::new(self.iter().map(|(k, v)| (erase(k), erase(v))))
        }
    }

    impl<K, V, S> Mappable for HashMap<K, V, S>
    where
        K: Mappable + Eq + Hash,
        V: Mappable,
        S: BuildHasher + Default + 'static,
    {
        #[inline]
        fn classify(&self) -> MappableRef<'_> {
            MappableRef::Mapping(self)
        }

        fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self> {
            let mut out = HashMap::default();
            cx.read_entries(node, |k, v| {
                out.insert(k, v);
            })?;
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    use ej_exclusion::ExclusionConfiguration;
    use ej_node::{JsonNode, JsonObject};

    use crate::{Error, KeyProjectionError, MappingError, from_tree, to_tree};

    #[test]
    fn empty_sequence_is_an_empty_array() {
        let config = ExclusionConfiguration::new();
        let node = to_tree(&Vec::<i32>::new(), &config).unwrap();
        assert_eq!(node.as_array().map(|a| a.len()), Some(0));
        assert_eq!(node.to_string(), "[]");

        let node = to_tree(&BTreeMap::<String, i32>::new(), &config).unwrap();
        assert_eq!(node.to_string(), "{}");
    }

    #[test]
    fn sequences_keep_order() {
        let config = ExclusionConfiguration::new();
        let node = to_tree(&VecDeque::from([3, 1, 2]), &config).unwrap();
        assert_eq!(node.to_string(), "[3,1,2]");
        let set: BTreeSet<u8> = from_tree(&node, &config).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn numeric_keys_are_projected_and_decoded() {
        let config = ExclusionConfiguration::new();
        let map = BTreeMap::from([(1_u32, "a".to_string()), (20, "b".to_string())]);
        let node = to_tree(&map, &config).unwrap();
        assert_eq!(node.to_string(), r#"{"1":"a","20":"b"}"#);

        let back: BTreeMap<u32, String> = from_tree(&node, &config).unwrap();
        assert_eq!(back, map);

        let flags: BTreeMap<bool, i8> = from_tree(
            &JsonObject::from_iter([("true", JsonNode::from(1))]).into(),
            &config,
        )
        .unwrap();
        assert_eq!(flags.get(&true), Some(&1));
    }

    #[test]
    fn non_scalar_keys_fail() {
        let config = ExclusionConfiguration::new();
        let map = BTreeMap::from([(vec![1], 1)]);
        let err = to_tree(&map, &config).unwrap_err();
        assert_eq!(
            err,
            Error::KeyProjection(KeyProjectionError {
                kind: "sequence",
                path: "$".into(),
            })
        );
    }

    #[test]
    fn element_errors_carry_the_index() {
        let config = ExclusionConfiguration::new();
        let node: JsonNode = JsonObject::from_iter([(
            "a",
            JsonNode::from_iter([JsonNode::from(1), JsonNode::from("x")]),
        )])
        .into();
        let err = from_tree::<BTreeMap<String, Vec<i32>>>(&node, &config).unwrap_err();
        assert_eq!(
            err,
            Error::Mapping(MappingError::Mismatch {
                expected: "integer",
                found: ej_node::NodeKind::String,
                path: "$.a[1]".into(),
            })
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn hash_collections() {
        use std::collections::{HashMap, HashSet};

        let config = ExclusionConfiguration::new();
        let map = HashMap::from([('k', 1.5_f64)]);
        let node = to_tree(&map, &config).unwrap();
        assert_eq!(node.to_string(), r#"{"k":1.5}"#);
        assert_eq!(from_tree::<HashMap<char, f64>>(&node, &config).unwrap(), map);

        let set: HashSet<i64> = from_tree(&JsonNode::from_iter([1, 1, 2]), &config).unwrap();
        assert_eq!(set.len(), 2);
    }
}
