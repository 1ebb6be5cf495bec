//! Library-backed codec - `encoding_rs` through a process-wide handle
//!
//! The handle is resolved once from a WHATWG label by `init` and never torn
//! down. Valid UTF-16 runs go to the library encoder; the unpaired surrogates
//! between them are replaced here, since the library would otherwise
//! substitute U+FFFD on its own.

use encoding_rs::{mem, EncoderResult, Encoding, UTF_8};
use once_cell::sync::OnceCell;

use super::{CodecError, Transcoder, PLACEHOLDER};
use crate::logging::{log_codec_init, log_codec_init_failure};

static HANDLE: OnceCell<&'static Encoding> = OnceCell::new();

/// Resolve the process-wide encoder handle.
///
/// The first successful call fixes the handle; later calls return it without
/// looking at their label. A failed call leaves the handle unset, is logged,
/// and may be retried.
pub fn init(label: &str) -> Result<&'static Encoding, CodecError> {
    HANDLE
        .get_or_try_init(|| resolve(label))
        .copied()
        .map_err(|e| {
            log_codec_init_failure(label, e.code(), &e);
            e
        })
}

/// The handle, if `init` has succeeded
pub fn handle() -> Option<&'static Encoding> {
    HANDLE.get().copied()
}

fn resolve(label: &str) -> Result<&'static Encoding, CodecError> {
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| CodecError::UnknownLabel(label.to_string()))?;

    // UTF-16 labels encode to UTF-8 as well, which is fine here
    let output = encoding.output_encoding();
    if output != UTF_8 {
        return Err(CodecError::NotUtf8 {
            label: label.to_string(),
            encoding: encoding.name(),
        });
    }

    log_codec_init(label, output.name());
    Ok(output)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LibraryCodec;

impl Transcoder for LibraryCodec {
    const NAME: &'static str = "encoding_rs";

    fn transcode(&self, src: &[u16], dst: &mut [u8]) -> Result<usize, CodecError> {
        let encoding = handle().ok_or(CodecError::Uninitialized)?;
        let mut read = 0;
        let mut written = 0;

        while read < src.len() {
            let valid = mem::utf16_valid_up_to(&src[read..]);

            if valid > 0 {
                let mut encoder = encoding.new_encoder();
                let (result, r, w) = encoder.encode_from_utf16_without_replacement(
                    &src[read..read + valid],
                    &mut dst[written..],
                    true,
                );
                read += r;
                written += w;

                match result {
                    EncoderResult::InputEmpty => continue,
                    EncoderResult::OutputFull => break,
                    // UTF-8 maps everything; treat it like a bad unit anyway
                    EncoderResult::Unmappable(_) => {}
                }
            } else {
                // Unpaired surrogate at `read`
                read += 1;
            }

            if written == dst.len() {
                break;
            }
            dst[written] = PLACEHOLDER;
            written += 1;
        }

        Ok(written)
    }
}
