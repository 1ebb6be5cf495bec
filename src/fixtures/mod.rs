//! Benchmark fixtures - the inputs and operations the suites measure
//!
//! Each submodule mirrors one benchmark suite under `benches/`. The functions
//! here are what gets timed; the benches only add criterion plumbing.

pub mod alloc;
pub mod clock;
pub mod containers;
pub mod dir;
pub mod locks;
pub mod strings;

pub use alloc::{arena_roundtrip, box_roundtrip, random_sizes, system_alloc_free, ArenaBatch, Point, Widget};
pub use clock::ClockSource;
pub use containers::{PodRecord, Record, StringHolder};
pub use dir::{scan, DirSummary, ListingStrategy};
pub use locks::{LockFlavor, LockSet};
