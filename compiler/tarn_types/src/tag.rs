//! Type kind tag for tag-driven dispatch.
//!
//! Each type in the pool has a `Tag` that identifies its kind. The tag
//! determines how to interpret the associated `data` field.
//!
//! # Tag Categories
//!
//! Tags are organized into semantic ranges:
//! - 0-15: Primitives (data unused)
//! - 16-31: Simple containers (data = child Idx)
//! - 32-47: Two-value containers (data = extra index)
//! - 48-79: Complex types (data = extra index with length prefix)
//! - 80-95: Capability types (data = capability-set id)

use std::fmt;

/// Type kind discriminant.
///
/// Determines how to interpret the `data` field in a pool item.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Tag {
    // === Primitives (0-15) ===
    // data: unused (0)
    /// 64-bit signed integer.
    Int = 0,
    /// 64-bit floating point.
    Float = 1,
    /// Boolean.
    Bool = 2,
    /// UTF-8 string (pointer + length, variable-length payload).
    Str = 3,
    /// Unicode scalar value.
    Char = 4,
    /// 8-bit unsigned integer.
    Byte = 5,
    /// Unit type `()`.
    Unit = 6,
    /// Dynamic-dispatch value with an empty capability set
    /// (type descriptor + payload pointer).
    Any = 7,
    /// 16-bit signed integer.
    Int16 = 8,
    /// 32-bit signed integer.
    Int32 = 9,

    // Reserved: 10-15 for future primitives

    // === Simple Containers (16-31) ===
    // data: child Idx.raw()
    /// List type `[T]` (pointer + length + capacity).
    List = 16,

    // === Two-Value Containers (32-47) ===
    // data: index into extra[] with two consecutive values
    /// Fixed-length array `[N x T]`. Extra layout: `[elem_idx, len]`.
    Array = 32,
    /// Map type `{K: V}`. Extra layout: `[key_idx, value_idx]`.
    Map = 33,

    // === Complex Types (48-79) ===
    // data: index into extra[] with length prefix
    /// Function type `(P1, P2, ...) -> R`.
    /// Extra layout: `[param_count, p0, ..., ret]`.
    Func = 48,
    /// Struct type with named fields.
    /// Extra layout: `[field_count, (name, ty)*]`.
    Struct = 49,

    // === Capability Types (80-95) ===
    // data: capability-set id
    /// Dynamic-dispatch value with a non-empty capability set
    /// (method table + payload pointer).
    Iface = 80,
}

impl Tag {
    /// Returns `true` for dynamic-dispatch kinds (`any` and capability
    /// interfaces), whose values carry a runtime descriptor.
    #[inline]
    pub const fn is_dynamic(self) -> bool {
        matches!(self, Self::Any | Self::Iface)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Bool => "Bool",
            Self::Str => "Str",
            Self::Char => "Char",
            Self::Byte => "Byte",
            Self::Unit => "Unit",
            Self::Any => "Any",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::List => "List",
            Self::Array => "Array",
            Self::Map => "Map",
            Self::Func => "Func",
            Self::Struct => "Struct",
            Self::Iface => "Iface",
        };
        f.write_str(name)
    }
}
