use alloc::string::String;

use ej_node::{JsonNode, JsonNumber};

use crate::{FromTreeContext, Mappable, MappableRef, Result, ScalarRef};

// -----------------------------------------------------------------------------
// Boolean & text

impl Mappable for bool {
    #[inline]
    fn classify(&self) -> MappableRef<'_> {
        MappableRef::Scalar(ScalarRef::Bool(*self))
    }

    fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self> {
        node.as_bool().ok_or_else(|| cx.mismatch("boolean", node).into())
    }
}

impl Mappable for String {
    #[inline]
    fn classify(&self) -> MappableRef<'_> {
        MappableRef::Scalar(ScalarRef::Str(self))
    }

    fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self> {
        match node.as_str() {
            Some(s) => Ok(String::from(s)),
            None => Err(cx.mismatch("string", node).into()),
        }
    }
}

impl Mappable for char {
    #[inline]
    fn classify(&self) -> MappableRef<'_> {
        MappableRef::Scalar(ScalarRef::Char(*self))
    }

    fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self> {
        let Some(s) = node.as_str() else {
            return Err(cx.mismatch("string", node).into());
        };
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(cx.mismatch("single character string", node).into()),
        }
    }
}

// -----------------------------------------------------------------------------
// Integers

/// Integer targets reject float nodes, even integral ones such as `1.0`.
fn integer<'n>(node: &'n JsonNode, cx: &FromTreeContext<'_>) -> Result<&'n JsonNumber> {
    match node.as_number() {
        Some(n) if !n.is_f64() => Ok(n),
        _ => Err(cx.mismatch("integer", node).into()),
    }
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {$(
        impl Mappable for $ty {
            #[inline]
            fn classify(&self) -> MappableRef<'_> {
                MappableRef::Scalar(ScalarRef::Number(JsonNumber::from(*self)))
            }

            fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self> {
                let n = integer(node, cx)?;
                let value = match n.as_u64() {
                    Some(v) => <$ty>::try_from(v).ok(),
                    None => n.as_i64().and_then(|v| <$ty>::try_from(v).ok()),
                };
                value.ok_or_else(|| cx.out_of_range(*n, stringify!($ty)).into())
            }
        }
    )*};
}

impl_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

// -----------------------------------------------------------------------------
// Floats

/// Non-finite values have no JSON form and are written as `null`.
impl Mappable for f64 {
    #[inline]
    fn classify(&self) -> MappableRef<'_> {
        match JsonNumber::from_f64(*self) {
            Some(n) => MappableRef::Scalar(ScalarRef::Number(n)),
            None => MappableRef::Null,
        }
    }

    /// Integer nodes are accepted only when exactly representable.
    fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self> {
        let Some(n) = node.as_number() else {
            return Err(cx.mismatch("number", node).into());
        };
        if n.is_f64() {
            return Ok(n.as_f64());
        }
        n.as_f64_exact().ok_or_else(|| cx.out_of_range(*n, "f64").into())
    }
}

impl Mappable for f32 {
    #[inline]
    fn classify(&self) -> MappableRef<'_> {
        match JsonNumber::from_f64(f64::from(*self)) {
            Some(n) => MappableRef::Scalar(ScalarRef::Number(n)),
            None => MappableRef::Null,
        }
    }

    /// Floats may lose precision but must stay finite; integers must be exact.
    fn from_tree(node: &JsonNode, cx: &mut FromTreeContext<'_>) -> Result<Self> {
        let value = f64::from_tree(node, cx)?;
        let Some(&n) = node.as_number() else {
            return Err(cx.mismatch("number", node).into());
        };

        let narrowed = value as f32;
        let fits = if n.is_f64() {
            narrowed.is_finite()
        } else {
            f64::from(narrowed) == value
        };

        if fits {
            Ok(narrowed)
        } else {
            Err(cx.out_of_range(n, "f32").into())
        }
    }
}
