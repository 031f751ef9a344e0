use alloc::string::String;

use crate::JsonNumber;

/// A scalar JSON value: boolean, number or string.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonPrimitive {
    Bool(bool),
    Number(JsonNumber),
    String(String),
}

impl JsonPrimitive {
    /// Returns the boolean, if this is one.
    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the number, if this is one.
    #[inline]
    pub const fn as_number(&self) -> Option<&JsonNumber> {
        match self {
            Self::Number(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for JsonPrimitive {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<JsonNumber> for JsonPrimitive {
    #[inline]
    fn from(value: JsonNumber) -> Self {
        Self::Number(value)
    }
}

impl From<String> for JsonPrimitive {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for JsonPrimitive {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(String::from(value))
    }
}
