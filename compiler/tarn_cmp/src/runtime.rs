//! Runtime-routine registry for comparison lowering.
//!
//! Bulk equality routines follow a naming convention keyed on byte
//! width: widths 1, 2, 4, 8, and 16 have dedicated fixed-width routines
//! (named by bit width, matching the rest of the `tarn_*` runtime
//! symbols); every other width uses the generic routine taking an
//! explicit length argument. The width table lives here, next to its
//! only consumers, so width-support changes stay in one place.

/// A named runtime routine plus its calling-convention detail.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RuntimeRoutine {
    /// Runtime symbol name.
    pub name: &'static str,
    /// Whether the call takes an explicit byte-length argument.
    pub needs_len: bool,
}

const fn fixed(name: &'static str) -> RuntimeRoutine {
    RuntimeRoutine {
        name,
        needs_len: false,
    }
}

/// Generic byte-equality routine: `tarn_memequal(p, q, len)`.
const MEMEQUAL: RuntimeRoutine = RuntimeRoutine {
    name: "tarn_memequal",
    needs_len: true,
};

/// Select the bulk byte-equality routine for a merged span of `size`
/// bytes.
pub fn bulk_eq_routine(size: u64) -> RuntimeRoutine {
    match size {
        1 => fixed("tarn_memequal8"),
        2 => fixed("tarn_memequal16"),
        4 => fixed("tarn_memequal32"),
        8 => fixed("tarn_memequal64"),
        16 => fixed("tarn_memequal128"),
        _ => MEMEQUAL,
    }
}

/// Routine for the byte scan of a variable-length sequence comparison.
/// Always length-parameterized: the length is only known at runtime,
/// after the paired length check held.
pub fn seq_eq_routine() -> RuntimeRoutine {
    MEMEQUAL
}

/// Routine for dispatched dynamic-dispatch payload equality.
///
/// `tarn_efaceeq(typ, x, y)` for values with an empty capability set,
/// `tarn_ifaceeq(tab, x, y)` otherwise. Both can panic at runtime when
/// the stored concrete type does not support equality.
pub fn iface_eq_routine(empty_capability: bool) -> RuntimeRoutine {
    if empty_capability {
        fixed("tarn_efaceeq")
    } else {
        fixed("tarn_ifaceeq")
    }
}
