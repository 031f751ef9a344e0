use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::{ClassDescriptor, FieldDescriptor};

// -----------------------------------------------------------------------------
// ExclusionStrategy

/// A pluggable skip rule.
///
/// Strategies are registered per direction on an
/// [`ExclusionConfiguration`](crate::ExclusionConfiguration) and evaluated in
/// registration order; the first one that reports a skip decides.
///
/// Both methods default to "keep", so a strategy only implements the side it
/// cares about.
///
/// # Examples
///
/// ```
/// use ej_exclusion::{ExclusionStrategy, FieldDescriptor};
///
/// /// Skips fields whose name starts with an underscore.
/// struct SkipPrivateNames;
///
/// impl ExclusionStrategy for SkipPrivateNames {
///     fn should_skip_field(&self, field: &FieldDescriptor) -> bool {
///         field.name().starts_with('_')
///     }
/// }
/// ```
pub trait ExclusionStrategy: Send + Sync + 'static {
    /// Returns `true` if `field` must be skipped.
    #[inline]
    fn should_skip_field(&self, field: &FieldDescriptor) -> bool {
        let _ = field;
        false
    }

    /// Returns `true` if every value of `class` must be skipped.
    #[inline]
    fn should_skip_class(&self, class: &ClassDescriptor) -> bool {
        let _ = class;
        false
    }
}

// -----------------------------------------------------------------------------
// SkipFieldNames

/// Skips fields by name, optionally only those declared in one type.
///
/// ```
/// use ej_exclusion::{ClassDescriptor, ExclusionStrategy, FieldDescriptor, SkipFieldNames};
///
/// let skip = SkipFieldNames::new(["token"]).declared_in("app::Session");
///
/// let session_token = FieldDescriptor::new("token", "app::Session", ClassDescriptor::of::<String>);
/// let login_token = FieldDescriptor::new("token", "app::Login", ClassDescriptor::of::<String>);
/// assert!(skip.should_skip_field(&session_token));
/// assert!(!skip.should_skip_field(&login_token));
/// ```
#[derive(Clone, Debug)]
pub struct SkipFieldNames {
    names: Vec<String>,
    declaring_type: Option<String>,
}

impl SkipFieldNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            declaring_type: None,
        }
    }

    /// Restricts the rule to fields declared in `type_path`.
    pub fn declared_in(mut self, type_path: impl Into<String>) -> Self {
        self.declaring_type = Some(type_path.into());
        self
    }
}

impl ExclusionStrategy for SkipFieldNames {
    fn should_skip_field(&self, field: &FieldDescriptor) -> bool {
        if let Some(declaring_type) = &self.declaring_type
            && declaring_type != field.declaring_type()
        {
            return false;
        }
        self.names.iter().any(|name| name == field.name())
    }
}

// -----------------------------------------------------------------------------
// SkipClasses

/// Skips types by type path.
#[derive(Clone, Debug)]
pub struct SkipClasses {
    type_paths: Vec<String>,
}

impl SkipClasses {
    pub fn new<I, S>(type_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_paths: type_paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl ExclusionStrategy for SkipClasses {
    fn should_skip_class(&self, class: &ClassDescriptor) -> bool {
        self.type_paths.iter().any(|path| path == class.type_path())
    }
}

// -----------------------------------------------------------------------------
// FnExclusion

type FieldPredicate = Box<dyn Fn(&FieldDescriptor) -> bool + Send + Sync>;
type ClassPredicate = Box<dyn Fn(&ClassDescriptor) -> bool + Send + Sync>;

/// A strategy built from closures.
///
/// ```
/// use ej_exclusion::{ClassDescriptor, ExclusionStrategy, FieldDescriptor, FnExclusion, Nesting};
///
/// let strategy = FnExclusion::new()
///     .on_field(|field| field.name().ends_with("_secret"))
///     .on_class(|class| class.nesting() == Nesting::Nested);
///
/// let field = FieldDescriptor::new("api_secret", "app::Config", ClassDescriptor::of::<String>);
/// assert!(strategy.should_skip_field(&field));
/// assert!(!strategy.should_skip_class(&ClassDescriptor::of::<String>()));
/// ```
#[derive(Default)]
pub struct FnExclusion {
    field: Option<FieldPredicate>,
    class: Option<ClassPredicate>,
}

impl FnExclusion {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_field<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&FieldDescriptor) -> bool + Send + Sync + 'static,
    {
        self.field = Some(Box::new(predicate));
        self
    }

    pub fn on_class<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ClassDescriptor) -> bool + Send + Sync + 'static,
    {
        self.class = Some(Box::new(predicate));
        self
    }
}

impl ExclusionStrategy for FnExclusion {
    #[inline]
    fn should_skip_field(&self, field: &FieldDescriptor) -> bool {
        self.field.as_ref().is_some_and(|f| f(field))
    }

    #[inline]
    fn should_skip_class(&self, class: &ClassDescriptor) -> bool {
        self.class.as_ref().is_some_and(|f| f(class))
    }
}

impl fmt::Debug for FnExclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnExclusion")
            .field("field", &self.field.is_some())
            .field("class", &self.class.is_some())
            .finish()
    }
}
