use bitflags::bitflags;

bitflags! {
    /// Modifier flags of a declared field.
    ///
    /// Bit values follow the JVM access flags, so descriptors produced from
    /// class files can be converted with [`Modifiers::from_java_bits`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const PUBLIC     = 0x0001;
        const PRIVATE    = 0x0002;
        const PROTECTED  = 0x0004;
        /// Belongs to the type rather than to an instance.
        const STATIC     = 0x0008;
        const FINAL      = 0x0010;
        const VOLATILE   = 0x0040;
        /// Not part of the persistent state of the value.
        const TRANSIENT  = 0x0080;
        /// Generated by a compiler or macro, not written by hand.
        const SYNTHETIC  = 0x1000;
    }
}

impl Modifiers {
    /// Converts a JVM modifier integer, dropping unknown bits.
    #[inline]
    pub const fn from_java_bits(bits: i32) -> Self {
        Self::from_bits_truncate(bits as u32)
    }
}

impl Default for Modifiers {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Modifiers;

    #[test]
    fn java_bits() {
        // `private static final transient`
        let m = Modifiers::from_java_bits(0x0002 | 0x0008 | 0x0010 | 0x0080 | 0x0800);
        assert_eq!(
            m,
            Modifiers::PRIVATE | Modifiers::STATIC | Modifiers::FINAL | Modifiers::TRANSIENT
        );
    }
}
