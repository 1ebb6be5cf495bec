//! Standard-library codec: `char::decode_utf16` feeding `char::encode_utf8`

use super::{CodecError, Transcoder, PLACEHOLDER};

#[derive(Debug, Default, Clone, Copy)]
pub struct StdCodec;

impl Transcoder for StdCodec {
    const NAME: &'static str = "std";

    fn transcode(&self, src: &[u16], dst: &mut [u8]) -> Result<usize, CodecError> {
        let mut written = 0;

        for decoded in char::decode_utf16(src.iter().copied()) {
            let ch = decoded.unwrap_or(PLACEHOLDER as char);
            let width = ch.len_utf8();
            if width > dst.len() - written {
                break;
            }
            ch.encode_utf8(&mut dst[written..]);
            written += width;
        }

        Ok(written)
    }
}
