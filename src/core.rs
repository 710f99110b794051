use crate::{raw, MAX_LEN, MAX_VALUE, WORD_LEN};

/// Errors that may occur when decoding a `FastUInt`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// Reached end-of-buffer unexpectedly.
    ///
    /// This may happen if you attempt to decode an empty buffer or if the buffer ends before the
    /// terminator byte of the value.
    UnexpectedEob,
    /// None of the first `MAX_LEN` bytes at the cursor has its terminator bit set.
    MalformedEncoding,
    /// The value read is larger than the destination type.
    Overflow,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for DecodeError {}

/// Errors that may occur when encoding a `FastUInt`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EncodeError {
    /// The value is larger than `MAX_VALUE`.
    ValueOutOfRange(u64),
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::ValueOutOfRange(v) => {
                write!(f, "value {} exceeds maximum {}", v, MAX_VALUE)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Base integer trait for `FastUInt`. Provides internal APIs to facilitate the transforms in the
/// `FastUInt` trait.
pub trait Int: Sized + Copy {
    fn to_fast_uint_raw(self) -> u64;
    fn from_fast_uint_raw(r: u64) -> Option<Self>;
}

impl Int for u64 {
    #[inline(always)]
    fn to_fast_uint_raw(self) -> u64 {
        self
    }
    #[inline(always)]
    fn from_fast_uint_raw(raw: u64) -> Option<Self> {
        Some(raw)
    }
}

macro_rules! impl_int {
    ($int:ty) => {
        impl Int for $int {
            #[inline(always)]
            fn to_fast_uint_raw(self) -> u64 {
                u64::from(self)
            }
            #[inline(always)]
            fn from_fast_uint_raw(raw: u64) -> Option<Self> {
                raw.try_into().ok()
            }
        }
    };
}
impl_int!(u16);
impl_int!(u32);

/// Checks that `raw` is inside the encodable range.
#[inline(always)]
pub(crate) fn check_range(raw: u64) -> Result<u64, EncodeError> {
    if raw <= MAX_VALUE {
        Ok(raw)
    } else {
        Err(EncodeError::ValueOutOfRange(raw))
    }
}

/// A single encoded value produced by `FastUInt.to_fast_uint_bytes()`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EncodedFastUInt {
    buf: [u8; WORD_LEN],
    len: u8,
}

#[allow(clippy::len_without_is_empty)]
impl EncodedFastUInt {
    fn new(v: u64) -> Self {
        let (word, len) = raw::encode_word(v);
        Self {
            buf: word.to_le_bytes(),
            len: len as u8,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len()]
    }

    /// Returns the number of bytes used to encode the value.
    pub fn len(&self) -> usize {
        self.len as usize
    }
}

impl AsRef<[u8]> for EncodedFastUInt {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

/// Loads up to `WORD_LEN` bytes of `buf` into a word, zero filling the rest. Zero bytes never
/// carry a terminator so padding cannot change the outcome of a decode.
#[inline]
pub(crate) fn padded_word(buf: &[u8]) -> u64 {
    let mut word = [0u8; WORD_LEN];
    let n = buf.len().min(WORD_LEN);
    word[..n].copy_from_slice(&buf[..n]);
    u64::from_le_bytes(word)
}

/// Error for a word decode that found no terminator when `available` bytes were really present.
#[inline]
pub(crate) fn missing_terminator(available: usize) -> DecodeError {
    if available < MAX_LEN {
        DecodeError::UnexpectedEob
    } else {
        DecodeError::MalformedEncoding
    }
}

#[inline(always)]
pub(crate) fn decode_raw(buf: &[u8]) -> Result<(u64, usize), DecodeError> {
    if buf.len() >= WORD_LEN {
        // SAFETY: we checked that WORD_LEN bytes are readable.
        return unsafe { raw::decode(buf.as_ptr()) }.ok_or(DecodeError::MalformedEncoding);
    }
    if buf.is_empty() {
        return Err(DecodeError::UnexpectedEob);
    }
    raw::decode_word(padded_word(buf)).ok_or_else(|| missing_terminator(buf.len()))
}

#[inline(always)]
pub(crate) fn skip_raw(buf: &[u8]) -> Result<usize, DecodeError> {
    if buf.len() >= WORD_LEN {
        // SAFETY: we checked that WORD_LEN bytes are readable.
        return unsafe { raw::skip(buf.as_ptr()) }.ok_or(DecodeError::MalformedEncoding);
    }
    if buf.is_empty() {
        return Err(DecodeError::UnexpectedEob);
    }
    raw::skip_word(padded_word(buf)).ok_or_else(|| missing_terminator(buf.len()))
}

/// Trait for integer types that can be `FastUInt` coded.
pub trait FastUInt: Sized + Copy + Int {
    /// Returns the number of bytes required to encode `self`.
    /// This value will be in `[1, MAX_LEN]` for any value that can be encoded.
    #[inline]
    fn fast_uint_len(self) -> usize {
        raw::len(self.to_fast_uint_raw())
    }

    /// Encode `self` to buf and return the number of bytes that belong to the value.
    ///
    /// When `buf` holds at least `WORD_LEN` bytes a full word is stored, so bytes of `buf` past
    /// the returned length may be overwritten as well.
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` if `self` is larger than `MAX_VALUE`.
    ///
    /// # Panics
    ///
    /// If `self.fast_uint_len() > buf.len()`.
    #[inline]
    fn encode_fast_uint(self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let raw = check_range(self.to_fast_uint_raw())?;
        if buf.len() >= WORD_LEN {
            // SAFETY: we checked that WORD_LEN bytes are writable and that raw is in range.
            Ok(unsafe { raw::encode(raw, buf.as_mut_ptr()) })
        } else {
            let enc = EncodedFastUInt::new(raw);
            let ebytes = enc.as_slice();
            buf[..ebytes.len()].copy_from_slice(ebytes);
            Ok(ebytes.len())
        }
    }

    /// Decode an integer from the bytes in `buf` and return the value and number of bytes consumed.
    #[inline]
    fn decode_fast_uint(buf: &[u8]) -> Result<(Self, usize), DecodeError> {
        let (raw, len) = decode_raw(buf)?;
        Ok((
            Self::from_fast_uint_raw(raw).ok_or(DecodeError::Overflow)?,
            len,
        ))
    }

    /// Encode `self` to an owned buffer and return it.
    /// Use `as_slice()` to access the encoded bytes.
    #[inline]
    fn to_fast_uint_bytes(self) -> Result<EncodedFastUInt, EncodeError> {
        check_range(self.to_fast_uint_raw()).map(EncodedFastUInt::new)
    }
}

impl FastUInt for u16 {}
impl FastUInt for u32 {}
impl FastUInt for u64 {}
