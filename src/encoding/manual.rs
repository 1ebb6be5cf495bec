//! Hand-rolled codec - surrogate decoding and UTF-8 emission by bit twiddling
//!
//! Fast path copies runs of ASCII units directly; everything else goes
//! through a single decode step and a width-dispatched emit.

use super::{utf8_width, CodecError, Transcoder, PLACEHOLDER};

const SURROGATE_MASK: u16 = 0xF800;
const SURROGATE_BITS: u16 = 0xD800;
const HIGH_SURROGATE_END: u16 = 0xDBFF;

#[derive(Debug, Default, Clone, Copy)]
pub struct ManualCodec;

impl Transcoder for ManualCodec {
    const NAME: &'static str = "manual";

    fn transcode(&self, src: &[u16], dst: &mut [u8]) -> Result<usize, CodecError> {
        let mut read = 0;
        let mut written = 0;

        while read < src.len() {
            let unit = src[read];

            if unit < 0x80 {
                if written == dst.len() {
                    break;
                }
                dst[written] = unit as u8;
                written += 1;
                read += 1;
                continue;
            }

            let (cp, consumed) = decode(unit, src.get(read + 1).copied());
            let width = utf8_width(cp);
            if width > dst.len() - written {
                break;
            }
            emit(cp, width, &mut dst[written..written + width]);
            written += width;
            read += consumed;
        }

        Ok(written)
    }
}

/// Decode one scalar starting at `unit`; unpaired surrogates become the
/// placeholder. Returns the scalar and the number of units consumed.
#[inline(always)]
fn decode(unit: u16, next: Option<u16>) -> (u32, usize) {
    if unit & SURROGATE_MASK != SURROGATE_BITS {
        return (unit as u32, 1);
    }

    match next {
        Some(low) if unit <= HIGH_SURROGATE_END && is_low_surrogate(low) => {
            let high = (unit as u32 - 0xD800) << 10;
            (0x10000 + high + (low as u32 - 0xDC00), 2)
        }
        _ => (PLACEHOLDER as u32, 1),
    }
}

#[inline(always)]
fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Write `cp` as exactly `out.len()` (== `width`) UTF-8 bytes
#[inline(always)]
fn emit(cp: u32, width: usize, out: &mut [u8]) {
    match width {
        1 => out[0] = cp as u8,
        2 => {
            out[0] = 0xC0 | (cp >> 6) as u8;
            out[1] = 0x80 | (cp & 0x3F) as u8;
        }
        3 => {
            out[0] = 0xE0 | (cp >> 12) as u8;
            out[1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            out[2] = 0x80 | (cp & 0x3F) as u8;
        }
        _ => {
            out[0] = 0xF0 | (cp >> 18) as u8;
            out[1] = 0x80 | ((cp >> 12) & 0x3F) as u8;
            out[2] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            out[3] = 0x80 | (cp & 0x3F) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_pairs_and_lone_halves() {
        assert_eq!(decode(0x41, None), (0x41, 1));
        assert_eq!(decode(0xD83D, Some(0xDE00)), (0x1F600, 2));
        assert_eq!(decode(0xD83D, Some(0x41)), (b'?' as u32, 1));
        assert_eq!(decode(0xD83D, None), (b'?' as u32, 1));
        assert_eq!(decode(0xDE00, Some(0xDE00)), (b'?' as u32, 1));
        assert_eq!(decode(0xFFFF, None), (0xFFFF, 1));
    }

    #[test]
    fn test_emit_matches_std() {
        for ch in ['a', 'é', '€', '😀', '\u{7FF}', '\u{800}', '\u{10FFFF}'] {
            let cp = ch as u32;
            let width = utf8_width(cp);
            let mut ours = [0u8; 4];
            emit(cp, width, &mut ours[..width]);

            let mut theirs = [0u8; 4];
            let expected = ch.encode_utf8(&mut theirs);
            assert_eq!(&ours[..width], expected.as_bytes(), "mismatch for {:?}", ch);
        }
    }
}
