//! Shared test utilities for the equality lowering tests.
//!
//! Consolidates factory functions used across the classifier, run
//! merger, and synthesis tests. Only compiled in test builds.

use tarn_types::{layout_of, Idx, Name, Names, Pool, StructLayout, Target};

use crate::classify::CmpClassifier;
use crate::ops::{CmpMode, CmpOp, ValueId};
use crate::synth::synthesize_struct_eq;

/// Shorthand for `ValueId::new(n)`.
pub(crate) fn v(n: u32) -> ValueId {
    ValueId::new(n)
}

/// Build a struct type from `(name, type)` pairs, interning the names.
/// A `"_"` name produces a blank field.
pub(crate) fn struct_of(pool: &mut Pool, names: &mut Names, fields: &[(&str, Idx)]) -> Idx {
    let fields: Vec<(Name, Idx)> = fields
        .iter()
        .map(|&(name, ty)| (names.intern(name), ty))
        .collect();
    pool.struct_type(&fields)
}

/// Layout of a struct type for the given target.
pub(crate) fn layout_for(pool: &Pool, ty: Idx, target: &Target) -> StructLayout {
    layout_of(pool, ty, target)
}

/// Synthesize equality for `ty` with fresh operand handles `v(0)`/`v(1)`.
pub(crate) fn synth(pool: &Pool, ty: Idx, target: &Target, mode: CmpMode) -> Vec<CmpOp> {
    let cls = CmpClassifier::new(pool);
    synthesize_struct_eq(&cls, ty, target, mode, v(0), v(1))
}
