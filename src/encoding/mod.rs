//! Bounded UTF-16 to UTF-8 conversion into a reusable fixed-size buffer
//!
//! Design: the converter owns a `[u8; N]` buffer and hands out a view
//! borrowed from it, so the view cannot outlive the next `convert` call.
//! Three codecs implement the same output contract:
//! 1. `StdCodec`: `char::decode_utf16` / `char::encode_utf8`
//! 2. `LibraryCodec`: `encoding_rs` behind a process-wide handle
//! 3. `ManualCodec`: hand-rolled surrogate decoding and byte emission
//!
//! Contract shared by all codecs:
//! - Characters are written whole or not at all. The first character that
//!   does not fit in the `N - 1` data bytes ends the output (silent truncation).
//! - An unpaired surrogate is written as `?` and conversion continues.
//! - A U+0000 code unit ends the text, so the output has no interior NUL.
//! - The byte after the output is always `0x00`.

mod library;
mod manual;
mod std_codec;


pub use library::{handle as library_handle, init as init_library_codec, LibraryCodec};
pub use manual::ManualCodec;
pub use std_codec::StdCodec;

use core::ffi::{c_char, CStr};
use core::fmt;

use crate::logging::log_codec_failure;

/// Byte written in place of an unpaired surrogate
pub const PLACEHOLDER: u8 = b'?';

/// Buffer capacity used by the benchmark call sites, and the default `N`
pub const DEFAULT_CAPACITY: usize = 64;

/// A UTF-16 to UTF-8 transcoding strategy
///
/// Implementations write at most `dst.len()` bytes, never a partial
/// multi-byte sequence, substitute `PLACEHOLDER` for unpaired surrogates and
/// return the number of bytes written. `src` never contains U+0000.
pub trait Transcoder {
    /// Short name used in logs and benchmark ids
    const NAME: &'static str;

    fn transcode(&self, src: &[u16], dst: &mut [u8]) -> Result<usize, CodecError>;
}

/// Codec failures. Never returned from `convert`; logged instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// `LibraryCodec` used before `init_library_codec` succeeded
    Uninitialized,
    /// No encoding answers to this label
    UnknownLabel(String),
    /// The label resolves to an encoding that does not encode to UTF-8
    NotUtf8 { label: String, encoding: &'static str },
}

impl CodecError {
    /// Stable numeric code for diagnostics
    pub fn code(&self) -> u32 {
        match self {
            Self::Uninitialized => 1,
            Self::UnknownLabel(_) => 2,
            Self::NotUtf8 { .. } => 3,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "library codec used before initialization"),
            Self::UnknownLabel(label) => write!(f, "unknown encoding label '{}'", label),
            Self::NotUtf8 { label, encoding } => {
                write!(f, "label '{}' resolves to {}, which does not encode to UTF-8", label, encoding)
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Converter with an owned output buffer of `N` bytes (terminator included)
pub struct BoundedUtf16ToUtf8<C: Transcoder, const N: usize = 64> {
    buf: [u8; N],
    len: usize,
    codec: C,
}

pub type StdConverter<const N: usize> = BoundedUtf16ToUtf8<StdCodec, N>;
pub type LibraryConverter<const N: usize> = BoundedUtf16ToUtf8<LibraryCodec, N>;
pub type ManualConverter<const N: usize> = BoundedUtf16ToUtf8<ManualCodec, N>;

impl<C: Transcoder, const N: usize> BoundedUtf16ToUtf8<C, N> {
    const NONZERO_CAPACITY: () = assert!(N > 0, "converter capacity must be positive");

    pub fn with_codec(codec: C) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO_CAPACITY;

        Self {
            buf: [0; N],
            len: 0,
            codec,
        }
    }

    /// Convert `units`, replacing the previous contents of the buffer.
    ///
    /// Never fails: a codec error is logged and leaves the output empty.
    pub fn convert(&mut self, units: &[u16]) -> Utf8Output<'_> {
        let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());

        self.len = match self.codec.transcode(&units[..end], &mut self.buf[..N - 1]) {
            Ok(written) => written,
            Err(e) => {
                log_codec_failure(C::NAME, e.code(), &e);
                0
            }
        };
        debug_assert!(self.len < N);
        self.buf[self.len] = 0;

        self.output()
    }

    /// View of the most recent conversion
    pub fn output(&self) -> Utf8Output<'_> {
        Utf8Output {
            bytes: &self.buf[..=self.len],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        N
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }
}

impl<C: Transcoder + Default, const N: usize> BoundedUtf16ToUtf8<C, N> {
    pub fn new() -> Self {
        Self::with_codec(C::default())
    }
}

impl<C: Transcoder + Default, const N: usize> Default for BoundedUtf16ToUtf8<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Transcoder, const N: usize> fmt::Debug for BoundedUtf16ToUtf8<C, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedUtf16ToUtf8")
            .field("codec", &C::NAME)
            .field("capacity", &N)
            .field("output", &self.output().as_str())
            .finish()
    }
}

/// Borrowed, NUL-terminated UTF-8 view into a converter's buffer
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Utf8Output<'a> {
    /// Data bytes followed by exactly one NUL
    bytes: &'a [u8],
}

impl<'a> Utf8Output<'a> {
    /// Data bytes without the terminator
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.bytes[..self.bytes.len() - 1]
    }

    #[inline]
    pub fn as_bytes_with_nul(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn as_str(&self) -> &'a str {
        let data = self.as_bytes();
        debug_assert!(core::str::from_utf8(data).is_ok());
        // SAFETY: codecs only ever write complete UTF-8 sequences (or ASCII
        // placeholders), so the data bytes are valid UTF-8.
        unsafe { core::str::from_utf8_unchecked(data) }
    }

    #[inline]
    pub fn as_c_str(&self) -> &'a CStr {
        // SAFETY: the last byte is the terminator and U+0000 ends conversion,
        // so no interior NUL is ever written.
        unsafe { CStr::from_bytes_with_nul_unchecked(self.bytes) }
    }

    /// Pointer to the terminated bytes, valid while the view is
    #[inline]
    pub fn as_ptr(&self) -> *const c_char {
        self.bytes.as_ptr().cast()
    }

    /// Data length in bytes, terminator excluded
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Utf8Output<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Utf8Output<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UTF-8 width of a scalar value
#[inline(always)]
pub(crate) const fn utf8_width(cp: u32) -> usize {
    match cp {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        _ => 4,
    }
}
