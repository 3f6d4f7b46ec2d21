//! Struct equality synthesis.
//!
//! Walks a struct's field layout once and produces the ordered program
//! of comparison operations that decides `==` / `!=` for two values of
//! that type. Runs of memory-comparable fields are merged into bulk
//! comparisons; variable-length and dynamic-dispatch fields expand into
//! their short-circuiting operation pairs; fields whose comparison can
//! panic are fenced off behind ordering barriers so the panic surfaces
//! at its evaluation-order point.

use tracing::trace;

use tarn_types::{layout_of, Idx, Pool, Tag, Target};

use crate::classify::CmpClassifier;
use crate::ops::{CmpMode, CmpOp, CondGroups, TabKind, ValueId};
use crate::runs::mem_run;
use crate::runtime::{bulk_eq_routine, iface_eq_routine, seq_eq_routine};

/// Synthesize the comparison program for a struct type.
///
/// `lhs` and `rhs` are opaque handles to the two operand values. The
/// result is the flattened operation sequence: group order is enforced,
/// and within each group runtime calls were stably moved after inline
/// comparisons.
///
/// A struct with no non-blank fields synthesizes to an empty sequence,
/// which the caller must treat as trivially equal.
///
/// # Panics
///
/// Panics if `ty` is not a comparable struct type. Callers must
/// pre-validate comparability through the type system; proceeding would
/// synthesize silently-wrong comparison code.
pub fn synthesize_struct_eq(
    cls: &CmpClassifier<'_>,
    ty: Idx,
    target: &Target,
    mode: CmpMode,
    lhs: ValueId,
    rhs: ValueId,
) -> Vec<CmpOp> {
    let pool = cls.pool();
    assert_eq!(pool.tag(ty), Tag::Struct, "equality synthesis on {:?}", pool.tag(ty));
    assert!(
        cls.is_comparable(ty),
        "equality synthesis on non-comparable type {ty:?}"
    );

    let layout = layout_of(pool, ty, target);
    let fields = &layout.fields;

    // Build a list of conditions to satisfy, as ordered groups of
    // reorderable operations. Walk the fields using bulk comparison for
    // memory runs and specific operation pairs for the others.
    let mut conds = CondGroups::new();
    let mut i = 0;
    while i < fields.len() {
        let f = &fields[i];

        // Skip blank fields.
        if f.name.is_blank() {
            i += 1;
            continue;
        }

        // Compare non-memory fields with field-specific operations.
        if !cls.is_memory_comparable(f.ty) {
            let panics = cls.eq_can_panic(f.ty);
            if panics {
                // Enforce ordering by starting a new group of
                // reorderable conditions.
                conds.barrier();
            }
            match pool.tag(f.ty) {
                Tag::Str => {
                    let (len, bytes) = eq_seq(i, mode, lhs, rhs);
                    conds.push(len);
                    conds.push(bytes);
                }
                Tag::Any | Tag::Iface => {
                    let (tab, data) = eq_iface(pool, f.ty, f.ty, i, mode, lhs, rhs);
                    conds.push(tab);
                    conds.push(data);
                }
                _ => conds.push(eq_field(i, mode, lhs, rhs)),
            }
            if panics {
                // Also enforce ordering after something that can panic.
                conds.barrier();
            }
            i += 1;
            continue;
        }

        // Find the maximal run of memory-only fields.
        let run = mem_run(&layout, cls, target, i);
        if run.next - i <= 2 {
            // Two or fewer fields: call overhead outweighs batching,
            // use plain field equality.
            for j in i..run.next {
                conds.push(eq_field(j, mode, lhs, rhs));
            }
        } else {
            // More than two fields: one bulk comparison.
            trace!(start = i, next = run.next, size = run.size, "merged field run");
            conds.push(eq_mem(i, run.size, mode, lhs, rhs));
        }
        i = run.next;
    }

    conds.flatten()
}

/// Build the operation pair for a variable-length sequence field:
/// a length-equality check and a byte-equality check over the
/// confirmed-equal length.
///
/// The caller must execute the pair in order with short-circuiting: the
/// byte scan takes the common length as its size argument, so running it
/// first would be unsafe when the lengths differ. In `!=` mode the
/// length check carries the mode and the byte scan's result is negated.
pub fn eq_seq(field: usize, mode: CmpMode, lhs: ValueId, rhs: ValueId) -> (CmpOp, CmpOp) {
    let len = CmpOp::SeqLen {
        lhs,
        rhs,
        field,
        mode,
    };
    let bytes = CmpOp::SeqBytes {
        lhs,
        rhs,
        field,
        routine: seq_eq_routine(),
        negated: mode == CmpMode::Ne,
    };
    (len, bytes)
}

/// Build the operation pair for a dynamic-dispatch field: a descriptor
/// identity check and the dispatched payload comparison.
///
/// The caller must execute the pair in order with short-circuiting. The
/// payload comparison dispatches through the stored concrete type's
/// equality and is the operation that can panic at runtime.
///
/// # Panics
///
/// Panics if the operand static types differ; that is a synthesis-time
/// contract failure, not a runtime one.
pub fn eq_iface(
    pool: &Pool,
    lhs_ty: Idx,
    rhs_ty: Idx,
    field: usize,
    mode: CmpMode,
    lhs: ValueId,
    rhs: ValueId,
) -> (CmpOp, CmpOp) {
    assert_eq!(
        lhs_ty, rhs_ty,
        "dynamic-dispatch equality on mismatched operand types"
    );
    let empty_capability = match pool.tag(lhs_ty) {
        Tag::Any => true,
        Tag::Iface => false,
        other => panic!("dynamic-dispatch equality on {other:?}"),
    };
    let tab = CmpOp::IfaceTab {
        lhs,
        rhs,
        field,
        tab: if empty_capability {
            TabKind::TypeDescriptor
        } else {
            TabKind::MethodTable
        },
        mode,
    };
    let data = CmpOp::IfaceData {
        lhs,
        rhs,
        field,
        routine: iface_eq_routine(empty_capability),
        negated: mode == CmpMode::Ne,
    };
    (tab, data)
}

/// Plain single-field comparison: `lhs.field == rhs.field` (or `!=`).
fn eq_field(field: usize, mode: CmpMode, lhs: ValueId, rhs: ValueId) -> CmpOp {
    CmpOp::Field {
        lhs,
        rhs,
        field,
        mode,
    }
}

/// Bulk comparison over `size` bytes starting at `field`, using the
/// fixed-width routine when one exists for this width.
fn eq_mem(field: usize, size: u64, mode: CmpMode, lhs: ValueId, rhs: ValueId) -> CmpOp {
    CmpOp::BulkMem {
        lhs,
        rhs,
        field,
        size,
        routine: bulk_eq_routine(size),
        negated: mode == CmpMode::Ne,
    }
}
