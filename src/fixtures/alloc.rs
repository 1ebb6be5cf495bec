//! Allocation fixtures - raw system allocations, boxed objects, arena batches
//!
//! Every case allocates and frees, so numbers roughly correspond to one
//! allocation plus one deallocation. These are best-case figures: no thread
//! contends for the heap and the allocator stays hot in cache.

use rand::Rng;
use std::collections::HashMap;
use typed_arena::Arena;

/// Allocate `size` bytes from the system allocator and free them again.
///
/// Returns whether the allocation succeeded. Goes straight to `malloc`/`free`
/// on unix so the global Rust allocator is bypassed.
#[cfg(unix)]
#[inline(never)]
pub fn system_alloc_free(size: usize) -> bool {
    // SAFETY: the pointer comes from malloc and is freed exactly once
    unsafe {
        let ptr = libc::malloc(size);
        let ok = !ptr.is_null();
        core::hint::black_box(ptr);
        libc::free(ptr);
        ok
    }
}

#[cfg(not(unix))]
#[inline(never)]
pub fn system_alloc_free(size: usize) -> bool {
    use std::alloc::{alloc, dealloc, Layout};

    let Ok(layout) = Layout::from_size_align(size.max(1), 16) else {
        return false;
    };
    // SAFETY: layout has non-zero size; the pointer is freed with the same layout
    unsafe {
        let ptr = alloc(layout);
        let ok = !ptr.is_null();
        core::hint::black_box(ptr);
        if ok {
            dealloc(ptr, layout);
        }
        ok
    }
}

/// `n` sizes of `2^k`, `k` uniform in `1..=max_exp`.
///
/// Mean sits around the middle of the table; small allocations are not
/// favoured even though real programs make far more of them.
pub fn random_sizes(n: usize, max_exp: u32, rng: &mut impl Rng) -> Vec<usize> {
    let max_exp = max_exp.max(1);
    (0..n).map(|_| 1usize << rng.random_range(1..=max_exp)).collect()
}

/// Plain two-field object, the cheap end of the boxed-object cases
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub a: f64,
    pub b: f64,
}

/// Object that owns further heap state, the expensive end
#[derive(Debug, Default)]
pub struct Widget {
    pub name: String,
    pub children: Vec<Box<Widget>>,
    pub properties: HashMap<String, String>,
    pub geometry: [i32; 4],
}

impl Widget {
    pub fn new() -> Self {
        Self {
            name: String::from("widget"),
            children: Vec::new(),
            properties: HashMap::new(),
            geometry: [0, 0, 640, 480],
        }
    }
}

/// Allocate and drop one boxed `T`
#[inline(never)]
pub fn box_roundtrip<T, F: FnOnce() -> T>(make: F) {
    let boxed = Box::new(make());
    core::hint::black_box(&boxed);
    drop(boxed);
}

/// Arena batch: `n` objects allocated individually, freed all at once on drop
pub struct ArenaBatch<T> {
    arena: Arena<T>,
}

impl<T> ArenaBatch<T> {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            arena: Arena::with_capacity(n),
        }
    }

    #[inline]
    pub fn alloc(&self, value: T) -> &mut T {
        self.arena.alloc(value)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Allocate `n` values from a fresh arena and release them together
#[inline(never)]
pub fn arena_roundtrip<T, F: FnMut() -> T>(n: usize, mut make: F) -> usize {
    let batch = ArenaBatch::with_capacity(n);
    for _ in 0..n {
        core::hint::black_box(batch.alloc(make()));
    }
    batch.len()
}
