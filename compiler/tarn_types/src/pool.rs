//! The unified type pool.
//!
//! All types live in one arena and are referenced by [`Idx`]. Compound
//! types store their children in a flat `extra` region, so a pool item is
//! always one `(tag, data)` pair. Interning deduplicates structurally
//! identical types, which makes type identity an index comparison.

use rustc_hash::FxHashMap;

use crate::{Idx, Name, Tag};

/// One pool entry: a kind tag plus kind-specific payload.
#[derive(Copy, Clone)]
struct Item {
    tag: Tag,
    data: u32,
}

/// The type pool.
///
/// Primitives are pre-interned at fixed indices (see [`Idx`]); everything
/// else is added through the constructor methods and deduplicated.
pub struct Pool {
    items: Vec<Item>,
    extra: Vec<u32>,
    dedup_simple: FxHashMap<(Tag, u32), Idx>,
    dedup_complex: FxHashMap<(Tag, Vec<u32>), Idx>,
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl Pool {
    /// Create a pool with all primitives pre-interned.
    pub fn new() -> Self {
        const PRIMITIVES: [Tag; Idx::PRIMITIVE_COUNT as usize] = [
            Tag::Int,
            Tag::Float,
            Tag::Bool,
            Tag::Str,
            Tag::Char,
            Tag::Byte,
            Tag::Unit,
            Tag::Any,
            Tag::Int16,
            Tag::Int32,
        ];

        let mut items = Vec::with_capacity(Idx::FIRST_DYNAMIC as usize);
        for tag in PRIMITIVES {
            items.push(Item { tag, data: 0 });
        }
        // Reserved slots between the primitives and the dynamic range.
        // Never handed out as indices.
        items.resize(
            Idx::FIRST_DYNAMIC as usize,
            Item {
                tag: Tag::Unit,
                data: 0,
            },
        );

        Self {
            items,
            extra: Vec::new(),
            dedup_simple: FxHashMap::default(),
            dedup_complex: FxHashMap::default(),
        }
    }

    /// Kind tag of a type.
    #[inline]
    pub fn tag(&self, idx: Idx) -> Tag {
        self.items[idx.raw() as usize].tag
    }

    // === Constructors ===

    /// Create a list type `[elem]`.
    pub fn list(&mut self, elem: Idx) -> Idx {
        self.intern(Tag::List, elem.raw())
    }

    /// Create a fixed-length array type `[len x elem]`.
    pub fn array(&mut self, elem: Idx, len: u32) -> Idx {
        self.intern_complex(Tag::Array, &[elem.raw(), len])
    }

    /// Create a map type `{key: value}`.
    pub fn map(&mut self, key: Idx, value: Idx) -> Idx {
        self.intern_complex(Tag::Map, &[key.raw(), value.raw()])
    }

    /// Create a function type `(params...) -> ret`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn func(&mut self, params: &[Idx], ret: Idx) -> Idx {
        // Layout: [param_count, param0, ..., return_type]
        let mut extra = Vec::with_capacity(params.len() + 2);
        extra.push(params.len() as u32);
        for &p in params {
            extra.push(p.raw());
        }
        extra.push(ret.raw());
        self.intern_complex(Tag::Func, &extra)
    }

    /// Create a struct type from ordered `(name, type)` fields.
    ///
    /// Field order is semantically significant: declaration order is
    /// memory order is evaluation order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn struct_type(&mut self, fields: &[(Name, Idx)]) -> Idx {
        // Layout: [field_count, (name, ty)*]
        let mut extra = Vec::with_capacity(fields.len() * 2 + 1);
        extra.push(fields.len() as u32);
        for &(name, ty) in fields {
            extra.push(name.raw());
            extra.push(ty.raw());
        }
        self.intern_complex(Tag::Struct, &extra)
    }

    /// Create a capability-interface type identified by its capability-set id.
    pub fn iface(&mut self, capability_set: u32) -> Idx {
        self.intern(Tag::Iface, capability_set)
    }

    // === Accessors ===

    /// Element type of an array.
    pub fn array_elem(&self, idx: Idx) -> Idx {
        let base = self.complex_base(idx, Tag::Array);
        Idx::from_raw(self.extra[base])
    }

    /// Element count of an array.
    pub fn array_len(&self, idx: Idx) -> u32 {
        let base = self.complex_base(idx, Tag::Array);
        self.extra[base + 1]
    }

    /// Ordered `(name, type)` fields of a struct.
    pub fn struct_fields(&self, idx: Idx) -> Vec<(Name, Idx)> {
        let base = self.complex_base(idx, Tag::Struct);
        let count = self.extra[base] as usize;
        (0..count)
            .map(|i| {
                let name = Name::from_raw(self.extra[base + 1 + i * 2]);
                let ty = Idx::from_raw(self.extra[base + 2 + i * 2]);
                (name, ty)
            })
            .collect()
    }

    /// Capability-set id of an interface type.
    pub fn iface_capability_set(&self, idx: Idx) -> u32 {
        let item = self.items[idx.raw() as usize];
        assert_eq!(item.tag, Tag::Iface, "iface_capability_set on {:?}", item.tag);
        item.data
    }

    // === Interning ===

    #[allow(clippy::cast_possible_truncation)]
    fn intern(&mut self, tag: Tag, data: u32) -> Idx {
        if let Some(&idx) = self.dedup_simple.get(&(tag, data)) {
            return idx;
        }
        let idx = Idx::from_raw(self.items.len() as u32);
        self.items.push(Item { tag, data });
        self.dedup_simple.insert((tag, data), idx);
        idx
    }

    #[allow(clippy::cast_possible_truncation)]
    fn intern_complex(&mut self, tag: Tag, words: &[u32]) -> Idx {
        if let Some(&idx) = self.dedup_complex.get(&(tag, words.to_vec())) {
            return idx;
        }
        let data = self.extra.len() as u32;
        self.extra.extend_from_slice(words);
        let idx = Idx::from_raw(self.items.len() as u32);
        self.items.push(Item { tag, data });
        self.dedup_complex.insert((tag, words.to_vec()), idx);
        idx
    }

    fn complex_base(&self, idx: Idx, expected: Tag) -> usize {
        let item = self.items[idx.raw() as usize];
        assert_eq!(item.tag, expected, "wrong tag for {idx:?}");
        item.data as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn primitives_have_fixed_tags() {
        let pool = Pool::new();
        assert_eq!(pool.tag(Idx::INT), Tag::Int);
        assert_eq!(pool.tag(Idx::STR), Tag::Str);
        assert_eq!(pool.tag(Idx::ANY), Tag::Any);
        assert_eq!(pool.tag(Idx::INT32), Tag::Int32);
    }

    #[test]
    fn interning_deduplicates() {
        let mut pool = Pool::new();
        let a = pool.array(Idx::INT, 4);
        let b = pool.array(Idx::INT, 4);
        let c = pool.array(Idx::INT, 5);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(pool.array_elem(a), Idx::INT);
        assert_eq!(pool.array_len(c), 5);
    }

    #[test]
    fn struct_fields_round_trip() {
        let mut pool = Pool::new();
        let mut names = crate::Names::new();
        let x = names.intern("x");
        let y = names.intern("y");
        let st = pool.struct_type(&[(x, Idx::INT), (y, Idx::BOOL)]);
        assert_eq!(pool.tag(st), Tag::Struct);
        assert_eq!(pool.struct_fields(st), vec![(x, Idx::INT), (y, Idx::BOOL)]);
    }

    #[test]
    fn iface_identity_is_capability_set() {
        let mut pool = Pool::new();
        let a = pool.iface(3);
        let b = pool.iface(3);
        let c = pool.iface(4);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(pool.iface_capability_set(c), 4);
        assert!(pool.tag(a).is_dynamic());
    }
}
