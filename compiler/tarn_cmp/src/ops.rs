//! The comparison-operation IR handed to the code generator.
//!
//! A synthesized equality is an ordered sequence of [`CmpOp`]s. During
//! synthesis the operations live in [`CondGroups`]: an ordered list of
//! groups where operations within one group may be reordered freely but
//! groups must execute strictly in order. Flattening performs the
//! cost-based reordering (runtime calls last) within each group and
//! never across a group boundary.

use smallvec::{smallvec, SmallVec};

use crate::runtime::RuntimeRoutine;

/// Requested comparison mode: `==` or `!=`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CmpMode {
    /// Equality (`==`).
    Eq,
    /// Inequality (`!=`).
    Ne,
}

/// Opaque handle to an operand value in the surrounding expression
/// representation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ValueId(u32);

impl ValueId {
    /// Create a handle from a raw u32 value.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Which runtime descriptor a dynamic-dispatch table check compares.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TabKind {
    /// Empty capability set: compare the stored concrete-type descriptor.
    TypeDescriptor,
    /// Non-empty capability set: compare the method-table descriptor.
    MethodTable,
}

/// One comparison operation.
///
/// `field` is the index of the originating field in the struct layout;
/// for a bulk comparison it is the first field of the merged run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CmpOp {
    /// Plain single-field comparison: `lhs.field == rhs.field` (or `!=`).
    Field {
        lhs: ValueId,
        rhs: ValueId,
        field: usize,
        mode: CmpMode,
    },
    /// Bulk memory comparison over a merged field run.
    BulkMem {
        lhs: ValueId,
        rhs: ValueId,
        field: usize,
        /// Byte length of the merged span.
        size: u64,
        routine: RuntimeRoutine,
        /// Negate the call result (`!=` mode).
        negated: bool,
    },
    /// Length equality of two variable-length sequences. Must execute
    /// before its paired [`CmpOp::SeqBytes`], short-circuiting.
    SeqLen {
        lhs: ValueId,
        rhs: ValueId,
        field: usize,
        mode: CmpMode,
    },
    /// Byte equality of two sequences over the confirmed-equal length.
    /// Only valid once the paired [`CmpOp::SeqLen`] held.
    SeqBytes {
        lhs: ValueId,
        rhs: ValueId,
        field: usize,
        routine: RuntimeRoutine,
        negated: bool,
    },
    /// Descriptor identity of two dynamic-dispatch values. Must execute
    /// before its paired [`CmpOp::IfaceData`], short-circuiting.
    IfaceTab {
        lhs: ValueId,
        rhs: ValueId,
        field: usize,
        tab: TabKind,
        mode: CmpMode,
    },
    /// Dispatched payload equality of two dynamic-dispatch values.
    /// This is the operation that can panic at runtime.
    IfaceData {
        lhs: ValueId,
        rhs: ValueId,
        field: usize,
        routine: RuntimeRoutine,
        negated: bool,
    },
}

impl CmpOp {
    /// Whether this operation lowers to a runtime call.
    ///
    /// Calls are scheduled after inline comparisons within a group.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(
            self,
            Self::BulkMem { .. } | Self::SeqBytes { .. } | Self::IfaceData { .. }
        )
    }

    /// Index of the field this operation originates from.
    pub fn field_index(&self) -> usize {
        match *self {
            Self::Field { field, .. }
            | Self::BulkMem { field, .. }
            | Self::SeqLen { field, .. }
            | Self::SeqBytes { field, .. }
            | Self::IfaceTab { field, .. }
            | Self::IfaceData { field, .. } => field,
        }
    }
}

type Group = SmallVec<[CmpOp; 4]>;

/// Ordered groups of reorderable comparison operations.
///
/// Operations pushed between two [`barrier`](Self::barrier) calls may be
/// reordered among themselves; operations in different groups may not.
/// This is deliberately not a flat list with ordering flags: the group
/// structure is the invariant.
pub struct CondGroups {
    groups: SmallVec<[Group; 4]>,
}

impl Default for CondGroups {
    fn default() -> Self {
        Self::new()
    }
}

impl CondGroups {
    /// Create with one empty open group.
    pub fn new() -> Self {
        Self {
            groups: smallvec![SmallVec::new()],
        }
    }

    /// Append an operation to the current group.
    pub fn push(&mut self, op: CmpOp) {
        let last = self.groups.len() - 1;
        self.groups[last].push(op);
    }

    /// Close the current group and open a new one. Everything pushed
    /// before the barrier executes strictly before everything after it.
    pub fn barrier(&mut self) {
        self.groups.push(SmallVec::new());
    }

    /// Flatten to the final operation sequence.
    ///
    /// Within each group, runtime calls are moved after inline
    /// comparisons; the sort is stable, so relative order within the
    /// call and non-call classes is preserved. Group order is preserved
    /// unconditionally.
    pub fn flatten(self) -> Vec<CmpOp> {
        let mut flat = Vec::new();
        for mut group in self.groups {
            group.sort_by_key(CmpOp::is_call);
            flat.extend(group);
        }
        flat
    }
}
