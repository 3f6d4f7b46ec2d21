//! Equality classification of types.
//!
//! Walks the type pool to decide, per type, whether equality reduces to a
//! raw byte comparison, whether equality is defined at all, and whether
//! evaluating equality can panic at runtime. Uses memoization so deeply
//! nested or widely reused types are only walked once.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use tarn_types::{Idx, Pool, Tag};

/// Cached classification facts for one type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct CmpInfo {
    /// Equality is defined for values of this type.
    comparable: bool,
    /// Equality is exactly "compare raw bytes".
    memory: bool,
    /// Evaluating equality can panic at runtime.
    can_panic: bool,
}

impl CmpInfo {
    const MEMORY: Self = Self {
        comparable: true,
        memory: true,
        can_panic: false,
    };
    /// Comparable, but not by raw bytes (floats, strings, the odd struct).
    const SPECIAL: Self = Self {
        comparable: true,
        memory: false,
        can_panic: false,
    };
    /// Dynamic dispatch: comparable, dispatches at runtime, can panic.
    const DYNAMIC: Self = Self {
        comparable: true,
        memory: false,
        can_panic: true,
    };
    const NOT_COMPARABLE: Self = Self {
        comparable: false,
        memory: false,
        can_panic: false,
    };
}

/// Equality classifier over a type pool.
///
/// Wraps a `Pool` reference with a classification cache.
///
/// # Interior Mutability
///
/// Uses `RefCell` for the cache because the query methods take `&self`;
/// one classifier instance is shared across a whole synthesis call.
pub struct CmpClassifier<'pool> {
    pool: &'pool Pool,
    cache: RefCell<FxHashMap<Idx, CmpInfo>>,
}

impl<'pool> CmpClassifier<'pool> {
    /// Create a new classifier for the given type pool.
    pub fn new(pool: &'pool Pool) -> Self {
        Self {
            pool,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &'pool Pool {
        self.pool
    }

    /// Whether equality on this type is correctly and completely decided
    /// by comparing raw bytes.
    ///
    /// This verdict must agree with the type system's own equality
    /// algorithm selection; a bulk byte comparison is semantically wrong
    /// for any type with custom equality.
    pub fn is_memory_comparable(&self, idx: Idx) -> bool {
        self.info(idx).memory
    }

    /// Whether equality is defined for values of this type at all.
    pub fn is_comparable(&self, idx: Idx) -> bool {
        self.info(idx).comparable
    }

    /// Whether `==` on this type could panic at runtime (has a
    /// dynamic-dispatch value somewhere). The type must be comparable.
    ///
    /// Comparing two dynamic-dispatch values dispatches through the
    /// stored concrete type's own equality, which fails at runtime when
    /// that concrete type is not comparable. The panic must surface at
    /// this field's evaluation point, so the synthesizer isolates such
    /// comparisons behind ordering barriers.
    pub fn eq_can_panic(&self, idx: Idx) -> bool {
        let info = self.info(idx);
        debug_assert!(info.comparable, "eq_can_panic on non-comparable {idx:?}");
        info.can_panic
    }

    /// Core classification with caching.
    fn info(&self, idx: Idx) -> CmpInfo {
        // Fast path: pre-interned primitives can be classified by raw
        // index without any hash map lookup.
        if idx.is_primitive() {
            return Self::primitive_info(idx);
        }

        if let Some(&cached) = self.cache.borrow().get(&idx) {
            return cached;
        }

        let result = self.info_by_tag(idx);
        self.cache.borrow_mut().insert(idx, result);
        result
    }

    /// Fast path for pre-interned primitives.
    #[inline]
    fn primitive_info(idx: Idx) -> CmpInfo {
        match idx {
            Idx::INT | Idx::INT16 | Idx::INT32 | Idx::BOOL | Idx::CHAR | Idx::BYTE
            | Idx::UNIT => CmpInfo::MEMORY,

            // NaN != NaN, so float equality is not a byte comparison.
            Idx::FLOAT => CmpInfo::SPECIAL,

            // Variable-length: length check before byte scan.
            Idx::STR => CmpInfo::SPECIAL,

            Idx::ANY => CmpInfo::DYNAMIC,

            // Unreachable for valid primitives, but be conservative.
            _ => CmpInfo::NOT_COMPARABLE,
        }
    }

    /// Classify a non-primitive type by its pool tag.
    fn info_by_tag(&self, idx: Idx) -> CmpInfo {
        match self.pool.tag(idx) {
            // Caught by the fast path, but handle gracefully.
            Tag::Int | Tag::Int16 | Tag::Int32 | Tag::Bool | Tag::Char | Tag::Byte
            | Tag::Unit => CmpInfo::MEMORY,
            Tag::Float | Tag::Str => CmpInfo::SPECIAL,
            Tag::Any | Tag::Iface => CmpInfo::DYNAMIC,

            // Equality is not defined for these.
            Tag::List | Tag::Map | Tag::Func => CmpInfo::NOT_COMPARABLE,

            // An array compares as its element does, element by element.
            Tag::Array => self.info(self.pool.array_elem(idx)),

            Tag::Struct => {
                let mut info = CmpInfo::MEMORY;
                for (name, field_ty) in self.pool.struct_fields(idx) {
                    let field = self.info(field_ty);
                    // All field types must be comparable, blank or not.
                    info.comparable &= field.comparable;
                    // A blank field excludes bulk byte comparison: its
                    // bytes are skipped, not compared.
                    info.memory &= field.memory && !name.is_blank();
                    // Blank fields are never evaluated, so they cannot
                    // contribute a panic.
                    info.can_panic |= !name.is_blank() && field.can_panic;
                }
                info
            }
        }
    }
}
