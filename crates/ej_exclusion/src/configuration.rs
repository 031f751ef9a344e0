use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::{ClassDescriptor, ExclusionStrategy, FieldDescriptor, Modifiers};

type Strategies = Arc<[Arc<dyn ExclusionStrategy>]>;

// -----------------------------------------------------------------------------
// ExclusionConfiguration

/// An immutable set of rules deciding which fields and types are skipped.
///
/// Every `with_*` method leaves `self` untouched and returns a new
/// configuration, so one value can be shared freely between threads and
/// derived configurations never affect the one they came from.
///
/// Strategy lists are reference counted: deriving a configuration only copies
/// the list that actually changes.
///
/// # Defaults
///
/// - fields carrying [`Modifiers::TRANSIENT`] or [`Modifiers::STATIC`] are skipped;
/// - synthetic fields are always skipped;
/// - inner types are kept;
/// - anonymous and local types are always skipped;
/// - no strategies are registered.
///
/// # Examples
///
/// ```
/// use ej_exclusion::{ClassDescriptor, ExclusionConfiguration, FieldDescriptor, Modifiers};
///
/// let base = ExclusionConfiguration::new();
/// let volatile = base.with_modifiers(Modifiers::VOLATILE);
///
/// let field = FieldDescriptor::new("x", "app::Point", ClassDescriptor::of::<i32>)
///     .with_modifiers(Modifiers::VOLATILE);
///
/// assert!(!base.is_field_excluded(&field, true));
/// assert!(volatile.is_field_excluded(&field, true));
/// ```
#[derive(Clone)]
pub struct ExclusionConfiguration {
    modifiers: Modifiers,
    serialize_inner_classes: bool,
    serialization: Strategies,
    deserialization: Strategies,
}

impl ExclusionConfiguration {
    /// The modifier mask of a fresh configuration.
    pub const DEFAULT_MODIFIERS: Modifiers = Modifiers::TRANSIENT.union(Modifiers::STATIC);

    /// Creates the default configuration.
    pub fn new() -> Self {
        let empty: Strategies = Vec::new().into();
        Self {
            modifiers: Self::DEFAULT_MODIFIERS,
            serialize_inner_classes: true,
            serialization: empty.clone(),
            deserialization: empty,
        }
    }

    /// Returns a configuration whose mask also contains `modifiers`.
    ///
    /// Applying the same flags twice gives an equivalent configuration.
    #[must_use]
    pub fn with_modifiers(&self, modifiers: Modifiers) -> Self {
        Self {
            modifiers: self.modifiers | modifiers,
            ..self.clone()
        }
    }

    /// Returns a configuration whose mask is exactly `modifiers`.
    ///
    /// `with_exact_modifiers(Modifiers::empty())` keeps static and transient
    /// fields.
    #[must_use]
    pub fn with_exact_modifiers(&self, modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            ..self.clone()
        }
    }

    /// Returns a configuration that skips inner types and fields declaring them.
    #[must_use]
    pub fn disable_inner_class_serialization(&self) -> Self {
        Self {
            serialize_inner_classes: false,
            ..self.clone()
        }
    }

    /// Returns a configuration with `strategy` appended to the serialization
    /// list, the deserialization list, or both.
    ///
    /// With both flags `false` the result is equivalent to `self`.
    #[must_use]
    pub fn with_exclusion_strategy(
        &self,
        strategy: impl ExclusionStrategy,
        serialization: bool,
        deserialization: bool,
    ) -> Self {
        self.with_shared_strategy(Arc::new(strategy), serialization, deserialization)
    }

    /// Like [`with_exclusion_strategy`](Self::with_exclusion_strategy), for a
    /// strategy already shared with other configurations.
    #[must_use]
    pub fn with_shared_strategy(
        &self,
        strategy: Arc<dyn ExclusionStrategy>,
        serialization: bool,
        deserialization: bool,
    ) -> Self {
        let mut result = self.clone();
        if serialization {
            result.serialization = appended(&self.serialization, &strategy);
        }
        if deserialization {
            result.deserialization = appended(&self.deserialization, &strategy);
        }
        result
    }

    #[inline]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    #[inline]
    pub fn serialize_inner_classes(&self) -> bool {
        self.serialize_inner_classes
    }

    /// The strategies consulted in the given direction, in registration order.
    #[inline]
    pub fn strategies(&self, serialize: bool) -> &[Arc<dyn ExclusionStrategy>] {
        if serialize {
            &self.serialization
        } else {
            &self.deserialization
        }
    }

    /// Decides whether `field` is skipped when mapping in the given direction.
    ///
    /// Checks run in this order and the first hit wins: the modifier mask,
    /// the synthetic flag, inner-type suppression, anonymous or local declared
    /// types, then the direction's strategies.
    pub fn is_field_excluded(&self, field: &FieldDescriptor, serialize: bool) -> bool {
        if self.modifiers.intersects(field.modifiers()) {
            return true;
        }
        if field.is_synthetic() {
            return true;
        }

        let declared = field.declared_type();
        if !self.serialize_inner_classes && declared.nesting().is_inner() {
            return true;
        }
        if declared.nesting().is_anonymous_or_local() {
            return true;
        }

        self.strategies(serialize)
            .iter()
            .any(|strategy| strategy.should_skip_field(field))
    }

    /// Decides whether every value of `class` is skipped in the given direction.
    pub fn is_class_excluded(&self, class: &ClassDescriptor, serialize: bool) -> bool {
        if !self.serialize_inner_classes && class.nesting().is_inner() {
            return true;
        }
        if class.nesting().is_anonymous_or_local() {
            return true;
        }

        self.strategies(serialize)
            .iter()
            .any(|strategy| strategy.should_skip_class(class))
    }

    /// A field is dropped when either the field itself or its declared type
    /// is excluded.
    pub fn is_member_excluded(&self, field: &FieldDescriptor, serialize: bool) -> bool {
        self.is_field_excluded(field, serialize)
            || self.is_class_excluded(&field.declared_type(), serialize)
    }
}

fn appended(list: &Strategies, strategy: &Arc<dyn ExclusionStrategy>) -> Strategies {
    let mut next = Vec::with_capacity(list.len() + 1);
    next.extend(list.iter().cloned());
    next.push(strategy.clone());
    next.into()
}

impl Default for ExclusionConfiguration {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExclusionConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExclusionConfiguration")
            .field("modifiers", &self.modifiers)
            .field("serialize_inner_classes", &self.serialize_inner_classes)
            .field("serialization", &self.serialization.len())
            .field("deserialization", &self.deserialization.len())
            .finish()
    }
}
