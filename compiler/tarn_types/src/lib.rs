//! Type system primitives for the Tarn compiler.
//!
//! This crate provides:
//!
//! - **Type handles** ([`Idx`]) — 32-bit indices into a unified [`Pool`],
//!   with primitives pre-interned at fixed indices. Type identity is
//!   index equality.
//! - **Kind tags** ([`Tag`]) — the per-type discriminant that drives
//!   dispatch in the back end.
//! - **Field names** ([`Name`], [`Names`]) — interned symbols with the
//!   blank name `_` pre-interned.
//! - **Layout** ([`StructLayout`], [`layout_of`]) — byte offsets, sizes,
//!   padding flags, and alignment for struct fields, plus the [`Target`]
//!   description those rules depend on.
//!
//! Layout data is computed once per type and treated as immutable by
//! every consumer; the equality lowerer in `tarn_cmp` reads it but never
//! writes it.

mod idx;
mod layout;
mod names;
mod pool;
mod tag;
mod target;

pub use idx::Idx;
pub use layout::{layout_of, size_align_of, FieldSlot, StructLayout};
pub use names::{Name, Names};
pub use pool::Pool;
pub use tag::Tag;
pub use target::Target;
