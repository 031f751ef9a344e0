use core::fmt;

use crate::Modifiers;

// -----------------------------------------------------------------------------
// Nesting

/// Where a type is declared, relative to other types.
///
/// Exclusion rules only ever act on a known classification; [`Nesting::Unknown`]
/// never causes anything to be skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Nesting {
    /// Declared at module level.
    TopLevel,
    /// Declared inside another type, without access to an enclosing instance.
    Nested,
    /// Declared inside another type and bound to an enclosing instance.
    Inner,
    /// Has no name of its own.
    Anonymous,
    /// Declared inside a function body.
    Local,
    /// No classification is available.
    #[default]
    Unknown,
}

impl Nesting {
    /// `true` for non-static inner types.
    #[inline]
    pub const fn is_inner(self) -> bool {
        matches!(self, Nesting::Inner)
    }

    #[inline]
    pub const fn is_anonymous_or_local(self) -> bool {
        matches!(self, Nesting::Anonymous | Nesting::Local)
    }
}

// -----------------------------------------------------------------------------
// ClassDescriptor

/// The identity of a type as seen by exclusion rules.
///
/// # Examples
///
/// ```
/// use ej_exclusion::{ClassDescriptor, Nesting};
///
/// let desc = ClassDescriptor::of::<Vec<u8>>();
/// assert_eq!(desc.nesting(), Nesting::TopLevel);
/// assert!(desc.type_path().contains("Vec"));
///
/// let inner = ClassDescriptor::new("app::Outer::Inner").with_nesting(Nesting::Inner);
/// assert!(inner.nesting().is_inner());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClassDescriptor {
    type_path: &'static str,
    nesting: Nesting,
}

impl ClassDescriptor {
    /// Creates a descriptor for a top-level type.
    #[inline]
    pub const fn new(type_path: &'static str) -> Self {
        Self {
            type_path,
            nesting: Nesting::TopLevel,
        }
    }

    /// Creates a top-level descriptor for `T`, named by [`core::any::type_name`].
    #[inline]
    pub fn of<T: ?Sized>() -> Self {
        Self::new(core::any::type_name::<T>())
    }

    /// Creates a descriptor for `T` with an unknown classification.
    #[inline]
    pub fn unknown<T: ?Sized>() -> Self {
        Self {
            type_path: core::any::type_name::<T>(),
            nesting: Nesting::Unknown,
        }
    }

    #[inline]
    pub const fn with_nesting(mut self, nesting: Nesting) -> Self {
        self.nesting = nesting;
        self
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub const fn nesting(&self) -> Nesting {
        self.nesting
    }
}

impl fmt::Display for ClassDescriptor {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_path)
    }
}

// -----------------------------------------------------------------------------
// FieldDescriptor

/// Metadata of one declared field of a record type.
///
/// The declared type's [`ClassDescriptor`] is resolved on demand through a
/// function pointer, so descriptors can live in `static` slices.
///
/// # Examples
///
/// ```
/// use ej_exclusion::{ClassDescriptor, FieldDescriptor, Modifiers};
///
/// static FIELDS: [FieldDescriptor; 2] = [
///     FieldDescriptor::new("id", "app::User", ClassDescriptor::of::<u32>),
///     FieldDescriptor::new("cache", "app::User", ClassDescriptor::of::<String>)
///         .with_modifiers(Modifiers::TRANSIENT),
/// ];
///
/// assert_eq!(FIELDS[0].name(), "id");
/// assert!(FIELDS[1].modifiers().contains(Modifiers::TRANSIENT));
/// assert_eq!(FIELDS[1].declaring_type(), "app::User");
/// ```
#[derive(Clone, Copy)]
pub struct FieldDescriptor {
    name: &'static str,
    declaring_type: &'static str,
    modifiers: Modifiers,
    declared_type: fn() -> ClassDescriptor,
}

impl FieldDescriptor {
    /// Creates a descriptor for the field `name` declared in `declaring_type`,
    /// whose type is described by `declared_type`.
    #[inline]
    pub const fn new(
        name: &'static str,
        declaring_type: &'static str,
        declared_type: fn() -> ClassDescriptor,
    ) -> Self {
        Self {
            name,
            declaring_type,
            modifiers: Modifiers::empty(),
            declared_type,
        }
    }

    /// Adds modifier flags.
    #[inline]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }

    /// The key the field is written under.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The type path of the record declaring this field.
    #[inline]
    pub const fn declaring_type(&self) -> &'static str {
        self.declaring_type
    }

    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    #[inline]
    pub const fn is_synthetic(&self) -> bool {
        self.modifiers.contains(Modifiers::SYNTHETIC)
    }

    /// The descriptor of the field's declared type.
    #[inline]
    pub fn declared_type(&self) -> ClassDescriptor {
        (self.declared_type)()
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("declaring_type", &self.declaring_type)
            .field("modifiers", &self.modifiers)
            .field("declared_type", &self.declared_type())
            .finish()
    }
}
