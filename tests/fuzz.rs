use fast_uint::{decode_at, BufferedReader, DecodeError, FastUIntBuf, Reader};

#[test]
fn does_not_read_out_of_bounds() {
    // Run with RUSTFLAGS=-Zsanitizer=address cargo +nightly test -Zbuild-std --target x86_64-unknown-linux-gnu --test fuzz
    let decode_data = [0x2fu8, 0x3b, 0x2b, 0x81];
    let mut buf = decode_data.as_slice();
    let v = buf.get_fast_uint::<u32>().unwrap();
    assert_eq!(v, 0x2f | 0x3b << 7 | 0x2b << 14 | 1 << 21);

    let mut pos = 0;
    assert_eq!(decode_at(&decode_data, &mut pos), Ok(u64::from(v)));
    let mut pos = 0;
    assert_eq!(BufferedReader::new(&decode_data, &mut pos).read(), Ok(u64::from(v)));
}

#[test]
fn returns_error_for_small_data() {
    let decode_data = [0x2bu8];
    let mut buf = decode_data.as_slice();
    assert!(buf.get_fast_uint::<u32>().is_err());
}

#[test]
fn unterminated_tail_shorter_than_a_word() {
    // Every prefix of an unterminated run must fail cleanly at the end of the slice.
    let data = [0x81u8, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
    for end in 2..data.len() {
        let src = &data[..end];
        let mut pos = 0;
        let direct = Reader::new(src, &mut pos).collect::<Vec<_>>();
        let mut pos = 0;
        let buffered = BufferedReader::new(src, &mut pos).collect::<Vec<_>>();
        assert_eq!(direct, buffered, "{}", end);
        assert_eq!(direct[0], Ok(1));
        assert!(matches!(
            direct[1],
            Err(DecodeError::UnexpectedEob) | Err(DecodeError::MalformedEncoding)
        ));
    }
}
