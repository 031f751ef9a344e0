use alloc::boxed::Box;
use core::any::TypeId;

use ej_exclusion::{ClassDescriptor, FieldDescriptor};
use ej_node::{JsonNode, JsonNumber};

use crate::{FromTreeContext, Result};

// -----------------------------------------------------------------------------
// Mappable

/// A host type that can be converted to and from a [`JsonNode`].
///
/// Implemented for the scalar types, the standard containers and [`JsonNode`]
/// itself. Records (structs with named fields) usually get it from
/// `#[derive(Mappable)]`, which also implements [`Record`] and [`RecordMut`].
///
/// # Examples
///
/// A newtype mapped as its inner string:
///
/// ```
/// use ej_exclusion::ExclusionConfiguration;
/// use ej_mapper::{FromTreeContext, Mappable, MappableRef, Result, ScalarRef};
/// use ej_node::JsonNode;
///
/// #[derive(Debug, PartialEq)]
/// struct Email(String);
///
/// impl Mappable for Email {
///     fn classify(&self) -> MappableRef<'_> {
///         MappableRef::Scalar(ScalarRef::Str(&self.0))
///     }
///
///     fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self> {
///         String::from_tree(node, cx).map(Email)
///     }
/// }
///
/// let config = ExclusionConfiguration::new();
/// let tree = ej_mapper::to_tree(&Email("a@b.c".into()), &config).unwrap();
/// assert_eq!(tree.as_str(), Some("a@b.c"));
/// ```
pub trait Mappable: 'static {
    /// Exposes the shape of this value to the mapper.
    fn classify(&self) -> MappableRef<'_>;

    /// Builds a value from `node`.
    fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self>
    where
        Self: Sized;

    /// The descriptor exclusion rules see for this type.
    #[inline]
    fn class_descriptor() -> ClassDescriptor
    where
        Self: Sized,
    {
        ClassDescriptor::of::<Self>()
    }

    /// The concrete type name, also through `dyn Mappable`.
    #[inline]
    fn type_path(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// The concrete type id, also through `dyn Mappable`.
    ///
    /// Together with the address it identifies a value during traversal, so
    /// it must not be overridden.
    #[doc(hidden)]
    #[inline]
    fn host_type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

// -----------------------------------------------------------------------------
// MappableRef

/// A scalar as seen by the mapper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarRef<'a> {
    Bool(bool),
    Number(JsonNumber),
    Str(&'a str),
    Char(char),
}

/// The shape of a host value.
pub enum MappableRef<'a> {
    /// Absent value, becomes `null`.
    Null,
    Scalar(ScalarRef<'a>),
    /// An ordered collection, becomes an array.
    Sequence(&'a dyn Sequence),
    /// A key/value collection, becomes an object.
    Mapping(&'a dyn Mapping),
    /// A value with declared fields, becomes an object.
    Record(&'a dyn Record),
    /// An already built tree, copied as is.
    Tree(&'a JsonNode),
}

impl MappableRef<'_> {
    /// A short name of the shape, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            MappableRef::Null => "null",
            MappableRef::Scalar(_) => "scalar",
            MappableRef::Sequence(_) => "sequence",
            MappableRef::Mapping(_) => "mapping",
            MappableRef::Record(_) => "record",
            MappableRef::Tree(_) => "tree",
        }
    }
}

// -----------------------------------------------------------------------------
// Containers

pub type Items<'a> = Box<dyn Iterator<Item = &'a dyn Mappable> + 'a>;
pub type Entries<'a> = Box<dyn Iterator<Item = (&'a dyn Mappable, &'a dyn Mappable)> + 'a>;

/// Read access to an ordered collection.
pub trait Sequence {
    fn len(&self) -> usize;

    /// The elements in order.
    fn items(&self) -> Items<'_>;
}

/// Read access to a key/value collection.
pub trait Mapping {
    fn len(&self) -> usize;

    /// The entries in the collection's own iteration order.
    fn entries(&self) -> Entries<'_>;
}

// -----------------------------------------------------------------------------
// Record

/// Read access to a value with declared fields.
///
/// Fields are addressed by their index in [`fields`](Record::fields).
pub trait Record {
    /// The descriptor of the record type itself.
    fn class(&self) -> ClassDescriptor;

    fn fields(&self) -> &'static [FieldDescriptor];

    /// The value of the field at `index`; `None` is written as `null`.
    fn field(&self, index: usize) -> Option<&dyn Mappable>;
}

/// Write access to a value with declared fields.
pub trait RecordMut: Record {
    /// Converts `node` into the type of the field at `index` and stores it.
    ///
    /// Unknown indices are ignored.
    fn write_field(&mut self, index: usize, node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<()>;
}
