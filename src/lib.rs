//! This module implements `FastUInt`, a terminator-bit variable length integer coding scheme.
//!
//! Each encoded byte carries 7 bits of payload in its low bits, least significant group first.
//! Instead of a continuation bit on every byte but the last (as in [LEB128](https://en.wikipedia.org/wiki/LEB128)),
//! the *last* byte of a value has its high bit set. Decoding loads 8 bytes as one little endian
//! word, finds the terminator with a single bit scan over the isolated high bits and gathers all
//! payload bits at once with a bit extract, so no per-byte loop or data dependent branch is
//! evaluated on the hot path.
//!
//! Values in `[0, MAX_VALUE]` (42 bits) encode to 1 to 6 bytes. By convention a stream is a run
//! of values terminated by the encoding of zero, the sentinel.
//!
//! `FastUInt` includes methods to code values directly to/from byte slices. Cursor based readers
//! are provided for bulk sequential decoding, including a `BufferedReader` that decodes out of a
//! small prefetched window, and traits extend `bytes::{Buf,BufMut}` and `std::io::{Write,Read}`.
//!
//! ```
//! use fast_uint::{write_sequence, BufferedReader, FastUInt};
//!
//! let mut value_buf = [0u8; fast_uint::WORD_LEN];
//! assert_eq!(167894u64.encode_fast_uint(&mut value_buf), Ok(3));
//! assert_eq!((167894u64, 3), u64::decode_fast_uint(&value_buf).unwrap());
//!
//! let encoded = write_sequence((1..100u64).step_by(3)).unwrap();
//! let mut cursor = 0;
//! for v in BufferedReader::new(&encoded, &mut cursor) {
//!     assert_eq!(v.unwrap() % 3, 1);
//! }
//! assert_eq!(cursor, encoded.len());
//! ```
mod bytes;
pub(crate) mod core;
mod io;
pub mod raw;
mod reader;
mod writer;

pub use crate::bytes::{FastUIntBuf, FastUIntBufMut, FastUIntIter};
pub use crate::core::{DecodeError, EncodeError, EncodedFastUInt, FastUInt};
pub use crate::io::{read_fast_uint, read_fast_uint_buf, write_fast_uint};
pub use crate::reader::{decode_at, skip_at, BufferedReader, Reader, DEFAULT_WINDOW_LEN};
pub use crate::writer::{write_sequence, SequenceWriter};

/// Maximum number of bytes a single encoded value will occupy.
pub const MAX_LEN: usize = 6;

/// Number of bytes loaded by a single word decode. Fast paths require this many readable bytes
/// at the cursor even though at most `MAX_LEN` of them belong to the value.
pub const WORD_LEN: usize = 8;

/// Largest value that can be encoded.
pub const MAX_VALUE: u64 = MAX_VALUE_FOR_LEN[MAX_LEN];

/// Value used to mark the end of a sequence.
pub const SENTINEL: u64 = 0;

/// Max value for an n-byte length.
const MAX_VALUE_FOR_LEN: [u64; MAX_LEN + 1] = [
    0x0, // placeholder
    0x7f,
    0x3fff,
    0x1fffff,
    0xfffffff,
    0x7ffffffff,
    0x3ffffffffff,
];

/// Payload extraction mask for an n-byte length, indexed by `n - 1`.
const EXTRACT_MASK: [u64; MAX_LEN] = [
    0x7f,
    0x7f7f,
    0x7f7f7f,
    0x7f7f7f7f,
    0x7f7f7f7f7f,
    0x7f7f7f7f7f7f,
];

/// Bit 7 of each of the first `MAX_LEN` bytes of a little endian word.
const HIGH_BITS: u64 = 0x808080808080;

/// Bits 0..=6 of each of the first `MAX_LEN` bytes of a little endian word.
const PAYLOAD_BITS: u64 = EXTRACT_MASK[MAX_LEN - 1];

/// High bit marking the last byte of an encoded value.
pub(crate) const TERMINATOR: u8 = 0x80;
pub(crate) const PAYLOAD_MASK: u8 = 0x7f;
pub(crate) const MAX_1BYTE_VALUE: u64 = MAX_VALUE_FOR_LEN[1];
pub(crate) const SENTINEL_BYTE: u8 = TERMINATOR;
