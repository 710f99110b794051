#![no_main]

use fast_uint::{FastUIntBuf, FastUIntBufMut, MAX_VALUE};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut dst = vec![];
    for chunk in data.chunks_exact(8) {
        let mut buf = [0; 8];
        buf.copy_from_slice(chunk);
        let n = u64::from_le_bytes(buf);
        assert_eq!(dst.put_fast_uint(n).is_ok(), n <= MAX_VALUE);
    }

    let mut src = &dst[..];
    for chunk in data.chunks_exact(8) {
        let mut buf = [0; 8];
        buf.copy_from_slice(chunk);
        let n = u64::from_le_bytes(buf);
        if n <= MAX_VALUE {
            assert_eq!(src.get_fast_uint::<u64>().unwrap(), n);
        }
    }
    assert!(src.is_empty());
});
