#![no_main]

use fast_uint::{BufferedReader, Reader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // arbitrary input must decode identically through both readers and never panic
    let mut direct_pos = 0;
    let direct = Reader::new(data, &mut direct_pos).collect::<Vec<_>>();

    let mut buffered_pos = 0;
    let buffered: BufferedReader<'_, 16> = BufferedReader::with_window(data, &mut buffered_pos);
    let buffered = buffered.collect::<Vec<_>>();

    assert_eq!(direct, buffered);
    assert_eq!(direct_pos, buffered_pos);
});
