//! Sequential readers that decode a run of values from a byte buffer through a caller owned
//! cursor.
//!
//! Both readers stop iterating at the sentinel (an encoded zero), at the end of the buffer, or
//! after the first error. The cursor is left just past the last byte consumed, so after a clean
//! run it points one byte beyond the sentinel.

use log::trace;

use crate::core::{decode_raw, missing_terminator, padded_word, skip_raw};
use crate::{raw, DecodeError, SENTINEL, WORD_LEN};

/// Window size used by `BufferedReader::new()`.
pub const DEFAULT_WINDOW_LEN: usize = 256;

/// Decodes the value at `*pos` in `buf` and advances `pos` past it.
///
/// ```
/// let buf = [0x01, 0x81, 0xc8, 0x80];
/// let mut pos = 0;
/// assert_eq!(fast_uint::decode_at(&buf, &mut pos), Ok(129));
/// assert_eq!(pos, 2);
/// ```
#[inline]
pub fn decode_at(buf: &[u8], pos: &mut usize) -> Result<u64, DecodeError> {
    let (v, len) = decode_raw(buf.get(*pos..).unwrap_or_default())?;
    *pos += len;
    Ok(v)
}

/// Advances `pos` past the value at `*pos` in `buf` without decoding it. Returns the number of
/// bytes skipped.
#[inline]
pub fn skip_at(buf: &[u8], pos: &mut usize) -> Result<usize, DecodeError> {
    let len = skip_raw(buf.get(*pos..).unwrap_or_default())?;
    *pos += len;
    Ok(len)
}

/// Hint that `p` is about to be read.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn prefetch_read(p: *const u8) {
    // SAFETY: prefetch is advisory and never faults, even on an invalid address.
    unsafe {
        std::arch::x86_64::_mm_prefetch(p as *const i8, std::arch::x86_64::_MM_HINT_T2);
    }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline(always)]
fn prefetch_read(_p: *const u8) {}

/// Reads values directly out of the source buffer.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: &'a mut usize,
    done: bool,
}

impl<'a> Reader<'a> {
    /// Creates a reader that starts decoding at `*pos`.
    pub fn new(buf: &'a [u8], pos: &'a mut usize) -> Self {
        Self {
            buf,
            pos,
            done: false,
        }
    }

    /// Current offset of the cursor in the source buffer.
    pub fn position(&self) -> usize {
        *self.pos
    }

    /// Decodes the next value and advances the cursor past it.
    #[inline]
    pub fn read(&mut self) -> Result<u64, DecodeError> {
        decode_at(self.buf, self.pos)
    }

    /// Advances the cursor past the next value, returning the number of bytes skipped.
    #[inline]
    pub fn skip_value(&mut self) -> Result<usize, DecodeError> {
        skip_at(self.buf, self.pos)
    }
}

impl<'a> Iterator for Reader<'a> {
    type Item = Result<u64, DecodeError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.done || *self.pos >= self.buf.len() {
            return None;
        }
        match self.read() {
            Ok(SENTINEL) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
            v => Some(v),
        }
    }
}

/// Reads values out of a fixed size copy of the upcoming part of the source buffer.
///
/// The window holds `source[window_start..window_end]` and is refilled from the cursor whenever
/// fewer than `WORD_LEN` bytes remain in it, so every decode is a single word load from local
/// memory. Near the end of the source only the remaining bytes are copied and the window is zero
/// padded; decoding never reads past the end of the source.
///
/// Results are identical to `Reader` for any window size `N >= 2 * WORD_LEN`.
pub struct BufferedReader<'a, const N: usize = DEFAULT_WINDOW_LEN> {
    buf: &'a [u8],
    pos: &'a mut usize,
    window: [u8; N],
    window_start: usize,
    window_end: usize,
    done: bool,
}

impl<'a> BufferedReader<'a> {
    /// Creates a reader with a `DEFAULT_WINDOW_LEN` byte window that starts decoding at `*pos`.
    pub fn new(buf: &'a [u8], pos: &'a mut usize) -> Self {
        Self::with_window(buf, pos)
    }
}

impl<'a, const N: usize> BufferedReader<'a, N> {
    const WINDOW_HOLDS_TWO_WORDS: () = assert!(N >= 2 * WORD_LEN, "window is too small");

    /// Creates a reader with an `N` byte window that starts decoding at `*pos`.
    ///
    /// ```
    /// use fast_uint::BufferedReader;
    ///
    /// let buf = fast_uint::write_sequence([5u64, 6]).unwrap();
    /// let mut pos = 0;
    /// let reader: BufferedReader<'_, 16> = BufferedReader::with_window(&buf, &mut pos);
    /// assert_eq!(reader.map(Result::unwrap).collect::<Vec<_>>(), vec![5, 6]);
    /// ```
    pub fn with_window(buf: &'a [u8], pos: &'a mut usize) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::WINDOW_HOLDS_TWO_WORDS;
        let start = *pos;
        let mut reader = Self {
            buf,
            pos,
            window: [0u8; N],
            window_start: start,
            window_end: start,
            done: false,
        };
        reader.refill();
        reader
    }

    /// Current offset of the cursor in the source buffer.
    pub fn position(&self) -> usize {
        *self.pos
    }

    fn refill(&mut self) {
        let start = (*self.pos).min(self.buf.len());
        let src = &self.buf[start..];
        let n = src.len().min(N);
        self.window[..n].copy_from_slice(&src[..n]);
        // Bytes left over from the previous window must not read as a terminator.
        let pad_end = (n + WORD_LEN).min(N);
        self.window[n..pad_end].fill(0);
        self.window_start = start;
        self.window_end = start + n;
        if self.window_end < self.buf.len() {
            prefetch_read(self.buf[self.window_end..].as_ptr());
        }
        trace!(
            "refilled window with source[{}..{}]",
            self.window_start,
            self.window_end
        );
    }

    /// Loads the word at the cursor, returning it along with the number of source bytes it
    /// really covers.
    #[inline(always)]
    fn load(&mut self) -> Result<(u64, usize), DecodeError> {
        let pos = *self.pos;
        if pos >= self.buf.len() {
            return Err(DecodeError::UnexpectedEob);
        }
        if self.window_end - pos < WORD_LEN {
            self.refill();
        }
        let offset = pos - self.window_start;
        let word = &self.window[offset..offset + WORD_LEN];
        prefetch_read(word.as_ptr());
        Ok((padded_word(word), self.window_end - pos))
    }

    /// Decodes the next value and advances the cursor past it.
    #[inline]
    pub fn read(&mut self) -> Result<u64, DecodeError> {
        let (word, available) = self.load()?;
        let (v, len) = raw::decode_word(word).ok_or_else(|| missing_terminator(available))?;
        *self.pos += len;
        Ok(v)
    }

    /// Advances the cursor past the next value, returning the number of bytes skipped.
    #[inline]
    pub fn skip_value(&mut self) -> Result<usize, DecodeError> {
        let (word, available) = self.load()?;
        let len = raw::skip_word(word).ok_or_else(|| missing_terminator(available))?;
        *self.pos += len;
        Ok(len)
    }
}

impl<'a, const N: usize> Iterator for BufferedReader<'a, N> {
    type Item = Result<u64, DecodeError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.done || *self.pos >= self.buf.len() {
            return None;
        }
        match self.read() {
            Ok(SENTINEL) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
            v => Some(v),
        }
    }
}
