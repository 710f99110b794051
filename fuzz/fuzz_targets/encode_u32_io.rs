#![no_main]

use fast_uint::{read_fast_uint, write_fast_uint};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut dst = vec![];
    for chunk in data.chunks_exact(4) {
        let u32 = u32::from_le_bytes(chunk.try_into().unwrap());
        write_fast_uint(u32, &mut dst).unwrap();
    }

    let mut src = &dst[..];
    for chunk in data.chunks_exact(4) {
        let u32 = u32::from_le_bytes(chunk.try_into().unwrap());
        assert_eq!(read_fast_uint::<u32>(&mut src).unwrap(), u32);
    }
});
