use core::fmt;

// -----------------------------------------------------------------------------
// JsonNumber

/// A JSON number that remembers how it was represented.
///
/// Non-negative integers are always stored as `u64` and negative integers as
/// `i64`, so two integers with the same value share one representation and
/// compare equal. Floats are a separate representation: `1` and `1.0` are
/// different numbers.
///
/// # Examples
///
/// ```
/// use ej_node::JsonNumber;
///
/// assert_eq!(JsonNumber::from(7_i32), JsonNumber::from(7_u8));
/// assert_ne!(JsonNumber::from(1_u32), JsonNumber::from_f64(1.0).unwrap());
/// assert!(JsonNumber::from_f64(f64::NAN).is_none());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct JsonNumber {
    n: N,
}

#[derive(Clone, Copy, PartialEq)]
enum N {
    PosInt(u64),
    /// Always less than zero.
    NegInt(i64),
    /// Always finite.
    Float(f64),
}

impl JsonNumber {
    /// Creates a float number, `None` if `value` is NaN or infinite.
    #[inline]
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_finite() {
            Some(Self { n: N::Float(value) })
        } else {
            None
        }
    }

    /// Returns `true` if the number is an integer in the range of `i64`.
    #[inline]
    pub const fn is_i64(&self) -> bool {
        match self.n {
            N::PosInt(v) => v <= i64::MAX as u64,
            N::NegInt(_) => true,
            N::Float(_) => false,
        }
    }

    /// Returns `true` if the number is a non-negative integer.
    #[inline]
    pub const fn is_u64(&self) -> bool {
        matches!(self.n, N::PosInt(_))
    }

    /// Returns `true` if the number was represented as a float.
    #[inline]
    pub const fn is_f64(&self) -> bool {
        matches!(self.n, N::Float(_))
    }

    /// Returns the value if it is an integer that fits in `i64`.
    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self.n {
            N::PosInt(v) if v <= i64::MAX as u64 => Some(v as i64),
            N::PosInt(_) => None,
            N::NegInt(v) => Some(v),
            N::Float(_) => None,
        }
    }

    /// Returns the value if it is a non-negative integer.
    #[inline]
    pub const fn as_u64(&self) -> Option<u64> {
        match self.n {
            N::PosInt(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as `f64`.
    ///
    /// Integers are converted with `as`, which may round above 2^53.
    /// Use [`as_f64_exact`](Self::as_f64_exact) when that matters.
    #[inline]
    pub const fn as_f64(&self) -> f64 {
        match self.n {
            N::PosInt(v) => v as f64,
            N::NegInt(v) => v as f64,
            N::Float(v) => v,
        }
    }

    /// Returns the value as `f64` only if no precision is lost.
    ///
    /// ```
    /// use ej_node::JsonNumber;
    ///
    /// assert_eq!(JsonNumber::from(3_u8).as_f64_exact(), Some(3.0));
    /// assert_eq!(JsonNumber::from(u64::MAX).as_f64_exact(), None);
    /// ```
    pub const fn as_f64_exact(&self) -> Option<f64> {
        const MAX_SAFE: u64 = 1 << f64::MANTISSA_DIGITS;
        match self.n {
            N::PosInt(v) if v <= MAX_SAFE => Some(v as f64),
            N::NegInt(v) if v.unsigned_abs() <= MAX_SAFE => Some(v as f64),
            N::Float(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {$(
        impl From<$ty> for JsonNumber {
            #[inline]
            fn from(value: $ty) -> Self {
                Self { n: N::PosInt(value as u64) }
            }
        }
    )*};
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {$(
        impl From<$ty> for JsonNumber {
            #[inline]
            fn from(value: $ty) -> Self {
                let n = if value < 0 {
                    N::NegInt(value as i64)
                } else {
                    N::PosInt(value as u64)
                };
                Self { n }
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32, u64, usize);
impl_from_signed!(i8, i16, i32, i64, isize);

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.n {
            N::PosInt(v) => fmt::Display::fmt(&v, f),
            N::NegInt(v) => fmt::Display::fmt(&v, f),
            // `Debug` always keeps a fraction or exponent, so the text
            // reads back as a float.
            N::Float(v) => fmt::Debug::fmt(&v, f),
        }
    }
}

impl fmt::Debug for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::JsonNumber;
    use alloc::string::ToString;

    #[test]
    fn integers_are_canonical() {
        assert_eq!(JsonNumber::from(0_i64), JsonNumber::from(0_u64));
        assert_eq!(JsonNumber::from(-3_i8).as_i64(), Some(-3));
        assert_eq!(JsonNumber::from(-3_i8).as_u64(), None);
        assert!(JsonNumber::from(u64::MAX).is_u64());
        assert!(!JsonNumber::from(u64::MAX).is_i64());
    }

    #[test]
    fn floats_stay_floats() {
        let one = JsonNumber::from_f64(1.0).unwrap();
        assert!(one.is_f64());
        assert_eq!(one.as_i64(), None);
        assert_eq!(one.to_string(), "1.0");
        assert_eq!(JsonNumber::from(1_u8).to_string(), "1");
    }

    #[test]
    fn exact_float_conversion() {
        assert_eq!(JsonNumber::from(-(1_i64 << 53)).as_f64_exact(), Some(-9007199254740992.0));
        assert_eq!(JsonNumber::from((1_u64 << 53) + 1).as_f64_exact(), None);
    }
}
