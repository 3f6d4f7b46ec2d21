//! Memory-run merging.
//!
//! Finds runs of struct fields that can be compared with one bulk memory
//! comparison: maximal contiguous spans of memory-comparable, non-blank
//! fields with no interior padding, bounded by what the target's access
//! alignment allows.

use tarn_types::{StructLayout, Target};

use crate::classify::CmpClassifier;

/// A merged span of struct fields, as returned by [`mem_run`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MemRun {
    /// Length in bytes of the memory included in the run.
    pub size: u64,
    /// Field index just past the end of the run.
    pub next: usize,
}

/// Find the run of memory-comparable fields starting at field `start`.
///
/// The run is extended field by field and stops when:
/// - the field list is exhausted;
/// - the previous field is followed by padding (padding bytes are not
///   meaningful and must not be included in a comparison);
/// - the next field is blank or not memory-comparable;
/// - on a strict-alignment target, the merged span would require a wider
///   access than the run's start offset guarantees. The effective bound
///   is the struct's alignment, downgraded to the largest power of two
///   dividing the start offset when that offset is itself under-aligned.
///   A merged load wider than the safely accessible alignment can fault
///   on targets that enforce alignment.
pub fn mem_run(
    layout: &StructLayout,
    cls: &CmpClassifier<'_>,
    target: &Target,
    start: usize,
) -> MemRun {
    let fields = &layout.fields;
    let mut next = start;
    loop {
        next += 1;
        if next == fields.len() {
            break;
        }
        // Stop run after a padded field.
        if fields[next - 1].padded {
            break;
        }
        // Also, stop before a blank or non-memory field.
        let f = &fields[next];
        if f.name.is_blank() || !cls.is_memory_comparable(f.ty) {
            break;
        }
        // Don't combine fields if the resulting load would require a
        // larger alignment than the component fields provide.
        if target.min_access_alignment > 1 {
            let mut align = layout.align;
            let off = fields[start].offset;
            if off & (align - 1) != 0 {
                // Offset is less aligned than the containing type.
                // Use offset to determine alignment.
                align = 1 << off.trailing_zeros();
            }
            let size = fields[next].end() - fields[start].offset;
            if size > align {
                break;
            }
        }
    }
    MemRun {
        size: fields[next - 1].end() - fields[start].offset,
        next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{layout_for, struct_of};
    use pretty_assertions::assert_eq;
    use tarn_types::{Idx, Name, Names, Pool};

    #[test]
    fn run_covers_adjacent_scalars() {
        let mut pool = Pool::new();
        let mut names = Names::new();
        let st = struct_of(
            &mut pool,
            &mut names,
            &[("a", Idx::INT), ("b", Idx::INT), ("c", Idx::INT)],
        );
        let target = Target::default64();
        let layout = layout_for(&pool, st, &target);
        let cls = CmpClassifier::new(&pool);

        let run = mem_run(&layout, &cls, &target, 0);
        assert_eq!(run, MemRun { size: 24, next: 3 });
    }

    #[test]
    fn run_stops_after_padded_field() {
        let mut pool = Pool::new();
        let mut names = Names::new();
        // a is followed by 7 bytes of padding before b.
        let st = struct_of(
            &mut pool,
            &mut names,
            &[("a", Idx::BOOL), ("b", Idx::INT), ("c", Idx::INT)],
        );
        let target = Target::default64();
        let layout = layout_for(&pool, st, &target);
        let cls = CmpClassifier::new(&pool);

        let run = mem_run(&layout, &cls, &target, 0);
        assert_eq!(run, MemRun { size: 1, next: 1 });

        let run = mem_run(&layout, &cls, &target, 1);
        assert_eq!(run, MemRun { size: 16, next: 3 });
    }

    #[test]
    fn run_stops_before_non_memory_field() {
        let mut pool = Pool::new();
        let mut names = Names::new();
        let st = struct_of(
            &mut pool,
            &mut names,
            &[("a", Idx::INT), ("b", Idx::INT), ("s", Idx::STR), ("c", Idx::INT)],
        );
        let target = Target::default64();
        let layout = layout_for(&pool, st, &target);
        let cls = CmpClassifier::new(&pool);

        let run = mem_run(&layout, &cls, &target, 0);
        assert_eq!(run, MemRun { size: 16, next: 2 });
    }

    #[test]
    fn run_stops_before_blank_field() {
        let mut pool = Pool::new();
        let mut names = Names::new();
        let a = names.intern("a");
        let c = names.intern("c");
        let st = pool.struct_type(&[(a, Idx::INT), (Name::BLANK, Idx::INT), (c, Idx::INT)]);
        let target = Target::default64();
        let layout = layout_for(&pool, st, &target);
        let cls = CmpClassifier::new(&pool);

        let run = mem_run(&layout, &cls, &target, 0);
        assert_eq!(run, MemRun { size: 8, next: 1 });
    }

    #[test]
    fn strict_target_bounds_run_by_struct_alignment() {
        let mut pool = Pool::new();
        let mut names = Names::new();
        let st = struct_of(
            &mut pool,
            &mut names,
            &[("a", Idx::INT32), ("b", Idx::INT32), ("c", Idx::INT32), ("d", Idx::INT32)],
        );
        let cls = CmpClassifier::new(&pool);

        // Unrestricted access: one 16-byte run.
        let lax = Target::default64();
        let layout = layout_for(&pool, st, &lax);
        assert_eq!(mem_run(&layout, &cls, &lax, 0), MemRun { size: 16, next: 4 });

        // Strict alignment: the struct is only 4-aligned, so an 8-byte
        // merged load is not safe.
        let strict = Target::strict64();
        let layout = layout_for(&pool, st, &strict);
        assert_eq!(mem_run(&layout, &cls, &strict, 0), MemRun { size: 4, next: 1 });
    }

    #[test]
    fn strict_target_downgrades_underaligned_start_offset() {
        let mut pool = Pool::new();
        let mut names = Names::new();
        // e forces 8-byte struct alignment; b..d sit at offsets 4, 8, 12.
        let st = struct_of(
            &mut pool,
            &mut names,
            &[
                ("a", Idx::INT32),
                ("b", Idx::INT32),
                ("c", Idx::INT32),
                ("d", Idx::INT32),
                ("e", Idx::INT),
            ],
        );
        let strict = Target::strict64();
        let layout = layout_for(&pool, st, &strict);
        let cls = CmpClassifier::new(&pool);

        // Start offset 4 is under-aligned relative to the struct's
        // 8-byte alignment, so the bound drops to 4 bytes.
        let run = mem_run(&layout, &cls, &strict, 1);
        assert_eq!(run, MemRun { size: 4, next: 2 });

        // Start offset 8 is fully aligned; the 8-byte bound allows c+d.
        let run = mem_run(&layout, &cls, &strict, 2);
        assert_eq!(run, MemRun { size: 8, next: 4 });
    }
}
