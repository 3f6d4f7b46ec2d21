//! Unified type index handle.
//!
//! `Idx` is THE canonical type representation. All types are stored in a
//! unified pool and referenced by their 32-bit index.
//!
//! # Design (from Zig's `InternPool`)
//!
//! - 32-bit indices allow 4+ billion unique types
//! - Primitive types have fixed indices for O(1) lookup
//! - Type equality is O(1) index comparison
//! - Copy, lightweight passing

use std::fmt;

/// A 32-bit index into the type pool.
///
/// Types are compared by index equality (O(1)), not structural comparison.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types ===
    // Pre-interned at pool creation for O(1) access.

    /// The `int` type (64-bit signed integer).
    pub const INT: Self = Self(0);
    /// The `float` type (64-bit floating point).
    pub const FLOAT: Self = Self(1);
    /// The `bool` type.
    pub const BOOL: Self = Self(2);
    /// The `str` type (UTF-8 string: pointer + length).
    pub const STR: Self = Self(3);
    /// The `char` type (Unicode scalar value).
    pub const CHAR: Self = Self(4);
    /// The `byte` type (8-bit unsigned integer).
    pub const BYTE: Self = Self(5);
    /// The unit type `()`.
    pub const UNIT: Self = Self(6);
    /// The `any` type (dynamic dispatch with an empty capability set).
    pub const ANY: Self = Self(7);
    /// The `int16` type (16-bit signed integer).
    pub const INT16: Self = Self(8);
    /// The `int32` type (32-bit signed integer).
    pub const INT32: Self = Self(9);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 10;

    // === Reserved Range (10-31) ===
    // Reserved for future primitive types.

    /// First index for dynamically allocated types.
    pub const FIRST_DYNAMIC: u32 = 32;

    /// Sentinel value indicating no type / invalid index.
    pub const NONE: Self = Self(u32::MAX);

    /// Create an index from a raw u32 value.
    ///
    /// The caller must ensure the index is valid in the pool.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a primitive type (pre-interned).
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::INT => write!(f, "Idx::INT"),
            Self::FLOAT => write!(f, "Idx::FLOAT"),
            Self::BOOL => write!(f, "Idx::BOOL"),
            Self::STR => write!(f, "Idx::STR"),
            Self::CHAR => write!(f, "Idx::CHAR"),
            Self::BYTE => write!(f, "Idx::BYTE"),
            Self::UNIT => write!(f, "Idx::UNIT"),
            Self::ANY => write!(f, "Idx::ANY"),
            Self::INT16 => write!(f, "Idx::INT16"),
            Self::INT32 => write!(f, "Idx::INT32"),
            Self::NONE => write!(f, "Idx::NONE"),
            Self(raw) => write!(f, "Idx({raw})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_are_primitive() {
        assert!(Idx::INT.is_primitive());
        assert!(Idx::INT32.is_primitive());
        assert!(!Idx::from_raw(Idx::FIRST_DYNAMIC).is_primitive());
    }

    #[test]
    fn none_sentinel() {
        assert!(Idx::NONE.is_none());
        assert!(!Idx::UNIT.is_none());
    }
}
