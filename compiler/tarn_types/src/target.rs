//! Target machine description.
//!
//! The layout rules and the equality lowerer only consume a handful of
//! target facts, collected here so callers pass one value instead of a
//! bag of integers.

/// Target facts that affect layout and comparison lowering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Target {
    /// Pointer width in bytes. Strings and dynamic-dispatch values are
    /// two words; lists are three.
    pub ptr_size: u64,
    /// Maximum alignment any type requires on this target.
    pub max_align: u64,
    /// Minimum guaranteed access alignment. On strict-alignment targets
    /// this is > 1 and bounds how wide a merged memory comparison may be;
    /// targets with unaligned loads set it to 1.
    pub min_access_alignment: u64,
}

impl Target {
    /// A typical 64-bit target with unrestricted unaligned access.
    pub const fn default64() -> Self {
        Self {
            ptr_size: 8,
            max_align: 8,
            min_access_alignment: 1,
        }
    }

    /// A 64-bit target that enforces natural access alignment.
    pub const fn strict64() -> Self {
        Self {
            ptr_size: 8,
            max_align: 8,
            min_access_alignment: 8,
        }
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::default64()
    }
}
