//! Traits that allow writing/reading `FastUInt` types on `bytes::{BufMut,Buf}`.

use crate::core::check_range;
use crate::{
    raw, DecodeError, EncodeError, FastUInt, MAX_1BYTE_VALUE, MAX_LEN, PAYLOAD_MASK, TERMINATOR,
    WORD_LEN,
};

use bytes::{Buf, BufMut};

/// Extension for `buf::BufMut` to write any `FastUInt` type.
pub trait FastUIntBufMut {
    /// Writes a `FastUInt` value to the buffer and returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns a `ValueOutOfRange` error if the value is larger than `MAX_VALUE`. Nothing is
    /// written in that case.
    fn put_fast_uint<FU: FastUInt>(&mut self, v: FU) -> Result<usize, EncodeError>;
}

impl<Inner: BufMut> FastUIntBufMut for Inner {
    #[inline]
    fn put_fast_uint<FU: FastUInt>(&mut self, v: FU) -> Result<usize, EncodeError> {
        let raw = check_range(v.to_fast_uint_raw())?;
        if raw <= MAX_1BYTE_VALUE {
            self.put_u8(raw as u8 | TERMINATOR);
            Ok(1)
        } else if self.chunk_mut().len() >= WORD_LEN {
            unsafe {
                // SAFETY: the chunk has room for a full word and raw is in range. Only len
                // bytes are committed; the rest stays uninitialized spare capacity.
                let len = raw::encode(raw, self.chunk_mut().as_mut_ptr());
                self.advance_mut(len);
                Ok(len)
            }
        } else {
            let (word, len) = raw::encode_word(raw);
            self.put_uint_le(word, len);
            Ok(len)
        }
    }
}

fn get_fast_uint_slow<B: Buf>(buf: &mut B) -> Result<u64, DecodeError> {
    let mut raw = 0u64;
    for i in 0..MAX_LEN {
        if !buf.has_remaining() {
            return Err(DecodeError::UnexpectedEob);
        }
        let b = buf.get_u8();
        raw |= u64::from(b & PAYLOAD_MASK) << (7 * i);
        if b & TERMINATOR != 0 {
            return Ok(raw);
        }
    }
    Err(DecodeError::MalformedEncoding)
}

/// Extension for `buf::Buf` to read any `FastUInt` type.
pub trait FastUIntBuf {
    /// Reads a `FastUInt` from the buffer. After a successful read, the buffer will be advanced
    /// by the number of bytes read.
    ///
    /// # Examples
    ///
    /// ```
    /// use fast_uint::{FastUIntBufMut, FastUIntBuf};
    ///
    /// let to_encode = [1u16, 2, 400];
    /// let mut buf = vec![];
    /// for v in &to_encode {
    ///    buf.put_fast_uint(*v).unwrap();
    /// }
    ///
    /// let mut buf = &buf[..];
    /// for v in &to_encode {
    ///   let decoded = buf.get_fast_uint::<u16>().unwrap();
    ///   assert_eq!(decoded, *v);
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an `UnexpectedEob` error if the buffer is empty or if it ends before the
    /// terminator byte of the value.
    ///
    /// Returns a `MalformedEncoding` error if none of the next `MAX_LEN` bytes is a terminator.
    ///
    /// Returns an `Overflow` error if the encoded value is larger than the maximum value that can
    /// be represented by the `FastUInt` type.
    fn get_fast_uint<FU: FastUInt>(&mut self) -> Result<FU, DecodeError>;

    /// Advances the buffer past one encoded value without decoding it, returning the number of
    /// bytes skipped.
    fn skip_fast_uint(&mut self) -> Result<usize, DecodeError>;

    /// Returns an iterator over `FastUInt` values in the buffer.
    ///
    /// The iterator runs until the buffer is exhausted; sentinel values are yielded like any
    /// other. Use `Reader` to stop at the sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use fast_uint::{FastUIntBufMut, FastUIntBuf};
    ///
    /// let to_encode = [1u32, 0, 30, 24_000];
    /// let mut buf = vec![];
    /// for n in to_encode.iter() {
    ///     buf.put_fast_uint(*n).unwrap();
    /// }
    /// let mut decode_data = buf.as_slice();
    /// let result = decode_data
    ///     .iter_fast_uint::<u32>()
    ///     .collect::<Result<Vec<_>, _>>()
    ///     .unwrap();
    /// assert_eq!(to_encode, result.as_slice());
    /// ```
    fn iter_fast_uint<FU: FastUInt>(&mut self) -> FastUIntIter<'_, Self, FU>
    where
        Self: Sized,
    {
        FastUIntIter::new(self)
    }
}

impl<Inner: Buf> FastUIntBuf for Inner {
    #[inline]
    fn get_fast_uint<FU: FastUInt>(&mut self) -> Result<FU, DecodeError> {
        if self.remaining() == 0 {
            return Err(DecodeError::UnexpectedEob);
        }

        let raw = if self.chunk().len() >= WORD_LEN {
            // SAFETY: we checked that the chunk is at least WORD_LEN bytes long.
            let (raw, len) = unsafe { raw::decode(self.chunk().as_ptr()) }
                .ok_or(DecodeError::MalformedEncoding)?;
            self.advance(len);
            raw
        } else {
            get_fast_uint_slow(self)?
        };
        FU::from_fast_uint_raw(raw).ok_or(DecodeError::Overflow)
    }

    #[inline]
    fn skip_fast_uint(&mut self) -> Result<usize, DecodeError> {
        if self.remaining() == 0 {
            return Err(DecodeError::UnexpectedEob);
        }

        if self.chunk().len() >= WORD_LEN {
            // SAFETY: we checked that the chunk is at least WORD_LEN bytes long.
            let len =
                unsafe { raw::skip(self.chunk().as_ptr()) }.ok_or(DecodeError::MalformedEncoding)?;
            self.advance(len);
            return Ok(len);
        }

        for len in 1..=MAX_LEN {
            if !self.has_remaining() {
                return Err(DecodeError::UnexpectedEob);
            }
            if self.get_u8() & TERMINATOR != 0 {
                return Ok(len);
            }
        }
        Err(DecodeError::MalformedEncoding)
    }
}

/// An iterator over `FastUInt` values in a `Buf`.
///
/// Iteration ends when the buffer is exhausted or after the first error.
pub struct FastUIntIter<'a, B, FU> {
    buf: &'a mut B,
    failed: bool,
    _marker: std::marker::PhantomData<FU>,
}

impl<'a, B, FU> FastUIntIter<'a, B, FU> {
    /// Creates a new `FastUIntIter`.
    pub fn new(buf: &'a mut B) -> Self {
        Self {
            buf,
            failed: false,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<'a, B, FU> Iterator for FastUIntIter<'a, B, FU>
where
    B: Buf,
    FU: FastUInt,
{
    type Item = Result<FU, DecodeError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.buf.has_remaining() {
            return None;
        }
        let r = self.buf.get_fast_uint();
        self.failed = r.is_err();
        Some(r)
    }
}
