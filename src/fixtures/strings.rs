//! String fixtures - UTF-16 comparisons, positional templates, substrings

use smallvec::SmallVec;

use crate::logging::log_missing_argument;

// ============================================================================
// Comparing UTF-16 text against narrow literals
// ============================================================================

/// Compare by first decoding `units` into an owned `String`
pub fn eq_decoded(units: &[u16], s: &str) -> bool {
    match String::from_utf16(units) {
        Ok(decoded) => decoded == s,
        Err(_) => false,
    }
}

/// Compare against a Latin-1 literal unit by unit, no allocation
#[inline]
pub fn eq_latin1(units: &[u16], latin1: &[u8]) -> bool {
    units.len() == latin1.len() && units.iter().zip(latin1).all(|(&u, &b)| u == b as u16)
}

/// Compare against UTF-8 by decoding lazily, no allocation
#[inline]
pub fn eq_utf8(units: &[u16], s: &str) -> bool {
    let mut expected = s.chars();
    for decoded in char::decode_utf16(units.iter().copied()) {
        match (decoded, expected.next()) {
            (Ok(a), Some(b)) if a == b => {}
            _ => return false,
        }
    }
    expected.next().is_none()
}

// ============================================================================
// Positional templates: "%1".."%99"
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placeholder {
    start: usize,
    end: usize,
    number: u8,
}

/// `%` followed by one or two digits, numbered 1..=99
fn placeholders(template: &str) -> impl Iterator<Item = Placeholder> + '_ {
    let bytes = template.as_bytes();
    let mut i = 0;

    std::iter::from_fn(move || {
        while i < bytes.len() {
            if bytes[i] == b'%' {
                let start = i;
                let mut end = i + 1;
                let mut number = 0u8;
                while end < bytes.len() && end - start <= 2 && bytes[end].is_ascii_digit() {
                    number = number * 10 + (bytes[end] - b'0');
                    end += 1;
                }
                if number > 0 {
                    i = end;
                    return Some(Placeholder { start, end, number });
                }
            }
            i += 1;
        }
        None
    })
}

/// Replace every occurrence of the lowest-numbered placeholder with `value`.
///
/// Chaining calls re-scans text inserted by earlier calls, so a value that
/// itself contains `%N` can be substituted again.
pub fn arg(template: &str, value: &str) -> String {
    let Some(lowest) = placeholders(template).map(|p| p.number).min() else {
        log_missing_argument(template);
        return template.to_owned();
    };

    let mut out = String::with_capacity(template.len() + value.len());
    let mut last = 0;
    for p in placeholders(template).filter(|p| p.number == lowest) {
        out.push_str(&template[last..p.start]);
        out.push_str(value);
        last = p.end;
    }
    out.push_str(&template[last..]);
    out
}

/// Substitute all values in one pass: the i-th lowest distinct placeholder
/// number takes `values[i]`. Placeholders beyond `values` stay as written.
pub fn args(template: &str, values: &[&str]) -> String {
    let mut numbers: SmallVec<[u8; 8]> = placeholders(template).map(|p| p.number).collect();
    numbers.sort_unstable();
    numbers.dedup();

    if numbers.len() < values.len() {
        log_missing_argument(template);
    }

    let extra: usize = values.iter().map(|v| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut last = 0;
    for p in placeholders(template) {
        let Ok(index) = numbers.binary_search(&p.number) else {
            continue;
        };
        if let Some(value) = values.get(index) {
            out.push_str(&template[last..p.start]);
            out.push_str(value);
            last = p.end;
        }
    }
    out.push_str(&template[last..]);
    out
}

// ============================================================================
// Substrings
// ============================================================================

/// Up to `len` bytes of `s` starting at `pos`, borrowed.
///
/// Out-of-range positions clamp to the end; a range that does not fall on
/// char boundaries yields the empty string.
#[inline]
pub fn mid(s: &str, pos: usize, len: usize) -> &str {
    let start = pos.min(s.len());
    let end = start.saturating_add(len).min(s.len());
    s.get(start..end).unwrap_or("")
}

/// Owned variant of [`mid`]
#[inline]
pub fn mid_owned(s: &str, pos: usize, len: usize) -> String {
    mid(s, pos, len).to_owned()
}
