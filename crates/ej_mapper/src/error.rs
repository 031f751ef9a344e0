use alloc::string::String;

use ej_node::{JsonNumber, NodeKind};
use thiserror::Error;

use crate::foreign::ParseError;

// -----------------------------------------------------------------------------
// Error

/// A tree node does not have the shape the target type needs.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum MappingError {
    #[error("expected {expected} but found {found} at `{path}`")]
    Mismatch {
        expected: &'static str,
        found: NodeKind,
        path: String,
    },

    #[error("number {value} does not fit into `{target}` at `{path}`")]
    NumberOutOfRange {
        value: JsonNumber,
        target: &'static str,
        path: String,
    },
}

/// A map key is not a scalar and has no string form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("map key of kind {kind} cannot be used as an object key at `{path}`")]
pub struct KeyProjectionError {
    pub kind: &'static str,
    pub path: String,
}

/// A value was reached again while it was still being converted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cycle detected through `{type_path}` at `{path}`")]
pub struct CycleDetectedError {
    pub type_path: &'static str,
    pub path: String,
}

/// A foreign tree could not be read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ForeignError {
    #[error("text fallback failed: {0}")]
    Parse(ParseError),

    #[error("foreign value is only available as text and no text parser is set")]
    NoTextParser,
}

/// Every failure the mapper can report.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("mapping failed: {0}")]
    Mapping(MappingError),

    #[error("key projection failed: {0}")]
    KeyProjection(KeyProjectionError),

    #[error("{0}")]
    CycleDetected(CycleDetectedError),

    #[error("foreign conversion failed: {0}")]
    Foreign(ForeignError),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

macro_rules! impl_from {
    ($name:ident, $variant:ident) => {
        impl From<$name> for Error {
            #[inline]
            fn from(value: $name) -> Self {
                Error::$variant(value)
            }
        }

        impl $name {
            #[inline]
            pub fn promote(self) -> Error {
                Error::$variant(self)
            }
        }
    };
}

impl_from!(MappingError, Mapping);
impl_from!(KeyProjectionError, KeyProjection);
impl_from!(CycleDetectedError, CycleDetected);
impl_from!(ForeignError, Foreign);

impl From<ParseError> for ForeignError {
    #[inline]
    fn from(value: ParseError) -> Self {
        ForeignError::Parse(value)
    }
}

impl From<ParseError> for Error {
    #[inline]
    fn from(value: ParseError) -> Self {
        Error::Foreign(ForeignError::Parse(value))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use ej_node::NodeKind;

    use super::{Error, KeyProjectionError, MappingError};

    #[test]
    fn messages_carry_the_path() {
        let err: Error = MappingError::Mismatch {
            expected: "array",
            found: NodeKind::String,
            path: String::from("$.a[0]"),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "mapping failed: expected array but found string at `$.a[0]`"
        );

        let err = KeyProjectionError {
            kind: "record",
            path: String::from("$"),
        }
        .promote();
        assert!(matches!(err, Error::KeyProjection(_)));
    }
}
