//! Container fixtures - element types, prepopulated maps, shuffled keys
//!
//! Sequences are deliberately not reserved up front in the append cases;
//! growth cost is part of what gets measured.

use dashmap::DashMap;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashMap};

/// Element that owns heap data, so every copy is a real clone
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub label: String,
    pub value: f64,
}

impl Record {
    pub fn sample() -> Self {
        Self {
            label: String::from("foo bar asdf"),
            value: 42.0,
        }
    }
}

/// Trivially copyable element; appends are plain memcpy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PodRecord {
    pub label: &'static str,
    pub value: f64,
}

impl PodRecord {
    pub fn sample() -> Self {
        Self {
            label: "foo bar asdf",
            value: 42.0,
        }
    }
}

/// Owner of a string list with a by-value and a by-reference getter
#[derive(Debug, Default, Clone)]
pub struct StringHolder {
    strings: Vec<String>,
}

impl StringHolder {
    /// Holder with the decimal strings `0..n`
    pub fn numbered(n: usize) -> Self {
        Self {
            strings: (0..n).map(|i| i.to_string()).collect(),
        }
    }

    /// Copy of the whole list
    pub fn strings(&self) -> Vec<String> {
        self.strings.clone()
    }

    pub fn strings_ref(&self) -> &[String] {
        &self.strings
    }
}

/// Value stored for `key`; zero is reserved as "absent"
#[inline]
pub const fn value_for(key: usize) -> usize {
    key + 1
}

pub fn populate_hash(n: usize) -> HashMap<usize, usize> {
    let _perf = crate::logging::perf::track("populate_hash");
    let mut map = HashMap::with_capacity(n);
    map.extend((0..n).map(|k| (k, value_for(k))));
    map
}

pub fn populate_btree(n: usize) -> BTreeMap<usize, usize> {
    let _perf = crate::logging::perf::track("populate_btree");
    (0..n).map(|k| (k, value_for(k))).collect()
}

pub fn populate_dash(n: usize) -> DashMap<usize, usize> {
    let _perf = crate::logging::perf::track("populate_dash");
    let map = DashMap::with_capacity(n);
    for k in 0..n {
        map.insert(k, value_for(k));
    }
    map
}

/// All keys `0..n` in random order
pub fn shuffled_keys(n: usize, rng: &mut impl Rng) -> Vec<usize> {
    let mut keys: Vec<usize> = (0..n).collect();
    keys.shuffle(rng);
    keys
}

/// Lookup via `contains_key` followed by indexing
#[inline]
pub fn lookup_contains_then_index(map: &HashMap<usize, usize>, key: usize) -> usize {
    if map.contains_key(&key) {
        map[&key]
    } else {
        0
    }
}

/// Single lookup with a default
#[inline]
pub fn lookup_with_default(map: &HashMap<usize, usize>, key: usize) -> usize {
    map.get(&key).copied().unwrap_or(0)
}
