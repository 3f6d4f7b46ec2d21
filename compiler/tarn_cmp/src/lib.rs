//! Structural-equality lowering for the Tarn compiler back end.
//!
//! Given a struct type's field layout, this crate synthesizes the most
//! efficient correct sequence of low-level operations deciding whether
//! two values of that type are equal:
//!
//! - **Classification** ([`CmpClassifier`]) — decides per type whether
//!   equality reduces to a raw byte comparison, and whether evaluating
//!   equality can panic at runtime (dynamic-dispatch values dispatch
//!   through the stored concrete type's equality, which can fail).
//! - **Run merging** ([`mem_run`]) — finds maximal contiguous spans of
//!   memory-comparable fields that one bulk comparison can cover,
//!   honoring padding boundaries and the target's access alignment.
//! - **Synthesis** ([`synthesize_struct_eq`]) — walks the fields once,
//!   combining single-field, bulk-memory, length-then-bytes, and
//!   table-then-data comparisons into ordered groups, then stably
//!   schedules runtime calls after inline checks within each group.
//!
//! # Design
//!
//! The output is an ordered sequence of [`CmpOp`]s for the code
//! generator. Grouping ([`CondGroups`]) is the ordering invariant:
//! comparisons that can panic are fenced into their own group so the
//! panic surfaces exactly where evaluation order dictates, while
//! everything else stays freely schedulable for cost.
//!
//! Synthesis is a pure, deterministic computation over immutable layout
//! data; there is no shared state, and contract violations (requesting
//! equality for a non-comparable type, mismatched dynamic-dispatch
//! operands) fail fast rather than producing silently-wrong code.
//!
//! # Crate Dependencies
//!
//! `tarn_cmp` depends only on `tarn_types` (for `Pool`/`Idx`/`Tag` and
//! struct layout). No code-generation dependency — the produced
//! operation sequence is backend-independent.

mod classify;
mod ops;
mod runs;
mod runtime;
mod synth;

#[cfg(test)]
mod test_helpers;

pub use classify::CmpClassifier;
pub use ops::{CmpMode, CmpOp, CondGroups, TabKind, ValueId};
pub use runs::{mem_run, MemRun};
pub use runtime::{bulk_eq_routine, iface_eq_routine, seq_eq_routine, RuntimeRoutine};
pub use synth::{eq_iface, eq_seq, synthesize_struct_eq};
