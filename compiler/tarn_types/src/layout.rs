//! Struct field layout.
//!
//! Computes byte offsets, sizes, padding flags, and alignment for struct
//! fields. The results are consumed read-only by the back end; once a
//! layout is published for a type it never changes.

use tracing::trace;

use crate::{Idx, Name, Pool, Tag, Target};

/// One field of a laid-out struct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSlot {
    /// Field name; [`Name::BLANK`] for blank fields.
    pub name: Name,
    /// Field type.
    pub ty: Idx,
    /// Byte offset within the struct.
    pub offset: u64,
    /// Byte size of the field.
    pub size: u64,
    /// Whether padding bytes follow this field (before the next field's
    /// offset, or before the struct's rounded-up end).
    pub padded: bool,
}

impl FieldSlot {
    /// Offset of the first byte past this field.
    #[inline]
    pub fn end(&self) -> u64 {
        self.offset + self.size
    }
}

/// Complete layout of one struct type.
///
/// Invariant: field offsets are monotonically non-decreasing and follow
/// declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructLayout {
    /// Fields in declaration order.
    pub fields: Vec<FieldSlot>,
    /// Total size in bytes, rounded up to `align`.
    pub size: u64,
    /// Alignment requirement in bytes.
    pub align: u64,
}

/// Size and alignment of any type, in bytes.
pub fn size_align_of(pool: &Pool, ty: Idx, target: &Target) -> (u64, u64) {
    let (size, align) = match pool.tag(ty) {
        Tag::Int | Tag::Float => (8, 8),
        Tag::Int32 | Tag::Char => (4, 4),
        Tag::Int16 => (2, 2),
        Tag::Bool | Tag::Byte => (1, 1),
        Tag::Unit => (0, 1),
        // Two words: pointer + length, or descriptor + payload.
        Tag::Str | Tag::Any | Tag::Iface => (2 * target.ptr_size, target.ptr_size),
        // Three words: pointer + length + capacity.
        Tag::List => (3 * target.ptr_size, target.ptr_size),
        Tag::Map | Tag::Func => (target.ptr_size, target.ptr_size),
        Tag::Array => {
            let (elem_size, elem_align) = size_align_of(pool, pool.array_elem(ty), target);
            (elem_size * u64::from(pool.array_len(ty)), elem_align)
        }
        Tag::Struct => {
            let layout = layout_of(pool, ty, target);
            (layout.size, layout.align)
        }
    };
    (size, align.min(target.max_align))
}

/// Compute the layout of a struct type.
///
/// Offsets are rounded up to each field's alignment; the total size is
/// rounded up to the struct's alignment. Panics if `ty` is not a struct.
pub fn layout_of(pool: &Pool, ty: Idx, target: &Target) -> StructLayout {
    assert_eq!(pool.tag(ty), Tag::Struct, "layout_of on {:?}", pool.tag(ty));

    let mut fields = Vec::new();
    let mut offset = 0u64;
    let mut align = 1u64;

    for (name, field_ty) in pool.struct_fields(ty) {
        let (size, field_align) = size_align_of(pool, field_ty, target);
        let field_align = field_align.max(1);
        offset = align_up(offset, field_align);
        align = align.max(field_align);
        fields.push(FieldSlot {
            name,
            ty: field_ty,
            offset,
            size,
            padded: false,
        });
        offset += size;
    }

    let size = align_up(offset, align);

    // A field is padded when a gap separates its end from the next
    // field's offset (or from the rounded-up struct end).
    let count = fields.len();
    for i in 0..count {
        let next_start = if i + 1 < count {
            fields[i + 1].offset
        } else {
            size
        };
        fields[i].padded = next_start > fields[i].end();
    }

    trace!(ty = ?ty, size, align, fields = count, "computed struct layout");
    StructLayout {
        fields,
        size,
        align,
    }
}

#[inline]
fn align_up(offset: u64, align: u64) -> u64 {
    debug_assert!(align.is_power_of_two());
    (offset + align - 1) & !(align - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Names;
    use pretty_assertions::assert_eq;

    fn fields_of(_pool: &mut Pool, tys: &[Idx]) -> Vec<(Name, Idx)> {
        let mut names = Names::new();
        tys.iter()
            .enumerate()
            .map(|(i, &ty)| (names.intern(&format!("f{i}")), ty))
            .collect()
    }

    #[test]
    fn two_int64_fields_pack_tightly() {
        let mut pool = Pool::new();
        let fields = fields_of(&mut pool, &[Idx::INT, Idx::INT]);
        let st = pool.struct_type(&fields);
        let layout = layout_of(&pool, st, &Target::default64());

        assert_eq!(layout.size, 16);
        assert_eq!(layout.align, 8);
        assert_eq!(layout.fields[0].offset, 0);
        assert_eq!(layout.fields[1].offset, 8);
        assert!(!layout.fields[0].padded);
        assert!(!layout.fields[1].padded);
    }

    #[test]
    fn padding_before_wider_field_is_flagged() {
        let mut pool = Pool::new();
        let fields = fields_of(&mut pool, &[Idx::BOOL, Idx::INT]);
        let st = pool.struct_type(&fields);
        let layout = layout_of(&pool, st, &Target::default64());

        assert_eq!(layout.fields[0].offset, 0);
        assert!(layout.fields[0].padded);
        assert_eq!(layout.fields[1].offset, 8);
        assert_eq!(layout.size, 16);
    }

    #[test]
    fn trailing_padding_is_flagged() {
        let mut pool = Pool::new();
        let fields = fields_of(&mut pool, &[Idx::INT, Idx::BOOL]);
        let st = pool.struct_type(&fields);
        let layout = layout_of(&pool, st, &Target::default64());

        assert_eq!(layout.fields[1].offset, 8);
        assert_eq!(layout.size, 16);
        assert!(layout.fields[1].padded);
    }

    #[test]
    fn array_size_is_elem_times_len() {
        let mut pool = Pool::new();
        let arr = pool.array(Idx::INT32, 3);
        let (size, align) = size_align_of(&pool, arr, &Target::default64());
        assert_eq!((size, align), (12, 4));
    }

    #[test]
    fn nested_struct_contributes_its_own_alignment() {
        let mut pool = Pool::new();
        let inner_fields = fields_of(&mut pool, &[Idx::INT]);
        let inner = pool.struct_type(&inner_fields);
        let fields = fields_of(&mut pool, &[Idx::BYTE, inner]);
        let st = pool.struct_type(&fields);
        let layout = layout_of(&pool, st, &Target::default64());

        assert_eq!(layout.fields[1].offset, 8);
        assert_eq!(layout.align, 8);
    }

    #[test]
    fn offsets_are_monotonic() {
        let mut pool = Pool::new();
        let fields = fields_of(
            &mut pool,
            &[Idx::BYTE, Idx::INT16, Idx::INT32, Idx::INT, Idx::BOOL],
        );
        let st = pool.struct_type(&fields);
        let layout = layout_of(&pool, st, &Target::default64());

        let mut prev = 0;
        for f in &layout.fields {
            assert!(f.offset >= prev);
            prev = f.offset;
        }
    }
}
