//! The library codec's process-wide handle, exercised in a process of its
//! own so no other test has initialized it first.

use rtbench::encoding::{init_library_codec, library_handle, CodecError, LibraryConverter};

fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

#[test]
fn test_handle_lifecycle() {
    // Used before init: empty output, no panic
    let mut conv = LibraryConverter::<16>::new();
    assert!(library_handle().is_none());
    assert_eq!(conv.convert(&utf16("foobar")).as_bytes_with_nul(), b"\0");

    // Failed inits leave the handle unset
    let err = init_library_codec("no-such-encoding").unwrap_err();
    assert_eq!(err, CodecError::UnknownLabel("no-such-encoding".into()));
    assert_eq!(err.code(), 2);

    let err = init_library_codec("latin1").unwrap_err();
    assert!(matches!(err, CodecError::NotUtf8 { encoding: "windows-1252", .. }));
    assert!(library_handle().is_none());
    assert!(conv.convert(&utf16("foobar")).is_empty());

    // UTF-16 labels encode to UTF-8, so they are accepted
    let encoding = init_library_codec("utf-16le").unwrap();
    assert_eq!(encoding, encoding_rs::UTF_8);
    assert_eq!(library_handle(), Some(encoding_rs::UTF_8));

    assert_eq!(conv.convert(&utf16("foobar")).as_str(), "foobar");
    assert_eq!(conv.convert(&[0xD800, 'a' as u16]).as_str(), "?a");
}
