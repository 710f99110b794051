//! Extensions to `std::io` traits to support reading/writing `FastUInt` values.
use std::io::{BufRead, Error, ErrorKind, Read, Result, Write};

use crate::core::decode_raw;
use crate::{DecodeError, EncodeError, FastUInt, MAX_LEN, PAYLOAD_MASK, TERMINATOR, WORD_LEN};

impl From<DecodeError> for Error {
    fn from(value: DecodeError) -> Self {
        let kind = match value {
            DecodeError::UnexpectedEob => ErrorKind::UnexpectedEof,
            DecodeError::MalformedEncoding | DecodeError::Overflow => ErrorKind::InvalidData,
        };
        Error::new(kind, value)
    }
}

impl From<EncodeError> for Error {
    fn from(value: EncodeError) -> Self {
        Error::new(ErrorKind::InvalidInput, value)
    }
}

/// Encode a value and write it to `w`. Returns the number of bytes written.
#[inline]
pub fn write_fast_uint<FU: FastUInt>(v: FU, w: &mut impl Write) -> Result<usize> {
    let v = v.to_fast_uint_bytes()?;
    w.write_all(v.as_slice())?;
    Ok(v.len())
}

/// Read and decode a value from `r`.
///
/// The length of a value is only known once its terminator has been seen, so this reads one byte
/// at a time. Prefer `read_fast_uint_buf()` wherever possible as it should be more efficient.
#[inline]
pub fn read_fast_uint<FU: FastUInt>(r: &mut impl Read) -> Result<FU> {
    let mut raw = 0u64;
    let mut b = [0u8; 1];
    for i in 0..MAX_LEN {
        r.read_exact(&mut b)?;
        raw |= u64::from(b[0] & PAYLOAD_MASK) << (7 * i);
        if b[0] & TERMINATOR != 0 {
            return FU::from_fast_uint_raw(raw).ok_or_else(|| DecodeError::Overflow.into());
        }
    }
    Err(DecodeError::MalformedEncoding.into())
}

/// Read and decode a value from `r`.
#[inline]
pub fn read_fast_uint_buf<FU: FastUInt>(r: &mut impl BufRead) -> Result<FU> {
    let buf = r.fill_buf()?;
    if buf.len() >= WORD_LEN {
        let (raw, len) = decode_raw(buf)?;
        r.consume(len);
        FU::from_fast_uint_raw(raw).ok_or_else(|| DecodeError::Overflow.into())
    } else {
        read_fast_uint(r)
    }
}
