//! Routines for working with raw (u64) `FastUInt` values and 8-byte words.
//!
//! Word routines operate on 8 bytes loaded little endian, so byte `i` of the stream occupies bits
//! `8 * i..8 * i + 8`. Only the first `MAX_LEN` bytes of a word are ever inspected; the last two
//! are padding that makes a full word load possible.
//!
//! Other types should be shuffled to/from raw values using the `core::Int` trait.

use crate::{EXTRACT_MASK, HIGH_BITS, MAX_VALUE, PAYLOAD_BITS, TERMINATOR};

const fn len_slow(v: u64) -> usize {
    // Dividing by 7 triggers an optimization that yield a multiply instruction plus multiple
    // shifts and masks, so this only runs to build the table.
    (70 - (v | 1).leading_zeros() as usize) / 7
}

const fn compute_len_table() -> [u8; 64] {
    let mut tbl = [0u8; 64];
    let mut i = 0;
    while i < tbl.len() {
        let v = 1u64 << i;
        tbl[v.leading_zeros() as usize] = len_slow(v) as u8;
        i += 1;
    }
    tbl
}

const LEN_TABLE: [u8; 64] = compute_len_table();

/// Return the number of bytes required to encode `v`.
///
/// This is in `[1, MAX_LEN]` for any `v <= MAX_VALUE`; larger values yield lengths that cannot be
/// encoded.
#[inline]
pub const fn len(v: u64) -> usize {
    LEN_TABLE[(v | 1).leading_zeros() as usize] as usize
}

/// Gather the bits of `x` selected by `mask` into the low bits of the result.
///
/// `mask` must be a subset of `PAYLOAD_BITS`.
#[inline(always)]
fn extract(x: u64, mask: u64) -> u64 {
    #[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
    {
        // SAFETY: bmi2 is statically enabled for this target.
        unsafe { std::arch::x86_64::_pext_u64(x, mask) }
    }
    #[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
    {
        // Each byte contributes 7 bits, so byte i moves down by i bits. The loop has a constant
        // trip count and unrolls into independent shift/and/or chains.
        let y = x & mask;
        let mut v = 0;
        for i in 0..crate::MAX_LEN {
            v |= (y >> i) & (0x7f << (7 * i));
        }
        v
    }
}

/// Scatter the low 42 bits of `v` into the payload bits of each byte. Inverse of `extract()` over
/// `PAYLOAD_BITS`.
#[inline(always)]
fn deposit(v: u64) -> u64 {
    #[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
    {
        // SAFETY: bmi2 is statically enabled for this target.
        unsafe { std::arch::x86_64::_pdep_u64(v, PAYLOAD_BITS) }
    }
    #[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
    {
        let mut x = 0;
        for i in 0..crate::MAX_LEN {
            x |= (v << i) & (0x7f << (8 * i));
        }
        x
    }
}

/// Encodes `v` into the low bytes of a little endian word, returning the word and the number of
/// bytes that belong to the value.
///
/// `v` must be no larger than `MAX_VALUE`.
#[inline]
pub fn encode_word(v: u64) -> (u64, usize) {
    debug_assert!(v <= MAX_VALUE, "value {} exceeds MAX_VALUE", v);
    let len = len(v);
    let terminator = u64::from(TERMINATOR) << ((len - 1) * 8);
    (deposit(v) | terminator, len)
}

/// Encodes a raw value to `p`, returning the number of bytes that belong to the value.
///
/// All `WORD_LEN` bytes are written; the bytes past the returned length are garbage that the next
/// value will overwrite.
///
/// # Safety
///
/// This assumes that bytes `p..(p + WORD_LEN)` may be written to and that `v <= MAX_VALUE`.
#[inline]
pub unsafe fn encode(v: u64, p: *mut u8) -> usize {
    let (word, len) = encode_word(v);
    std::ptr::write_unaligned(p as *mut u64, word.to_le());
    len
}

/// Decodes the value at the start of `x` by masking every payload bit at or below the lowest
/// terminator bit. Returns the value and the number of bytes consumed, or `None` if none of the
/// first `MAX_LEN` bytes is a terminator.
#[inline(always)]
pub fn decode_word(x: u64) -> Option<(u64, usize)> {
    let high = x & HIGH_BITS;
    if high == 0 {
        return None;
    }
    let len = (high.trailing_zeros() as usize >> 3) + 1;
    // Equivalent to blsmsk: all bits up to and including the lowest set bit.
    let mask = PAYLOAD_BITS & (high ^ (high - 1));
    Some((extract(x, mask), len))
}

/// Same contract as `decode_word()`, but builds the extraction mask from a table indexed by the
/// consumed length.
#[inline(always)]
pub fn decode_word_table(x: u64) -> Option<(u64, usize)> {
    let len = skip_word(x)?;
    Some((extract(x, EXTRACT_MASK[len - 1]), len))
}

/// Returns the number of bytes occupied by the value at the start of `x` without decoding it.
#[inline(always)]
pub fn skip_word(x: u64) -> Option<usize> {
    let high = x & HIGH_BITS;
    if high == 0 {
        None
    } else {
        Some((high.trailing_zeros() as usize >> 3) + 1)
    }
}

#[inline(always)]
unsafe fn load(p: *const u8) -> u64 {
    u64::from_le(std::ptr::read_unaligned(p as *const u64))
}

/// Decode a value from `p`, returning the raw value and number of bytes consumed.
///
/// # Safety
///
/// This assumes that bytes `p..(p + WORD_LEN)` may be read from.
#[inline]
pub unsafe fn decode(p: *const u8) -> Option<(u64, usize)> {
    decode_word(load(p))
}

/// Returns the number of bytes occupied by the value at `p`.
///
/// # Safety
///
/// This assumes that bytes `p..(p + WORD_LEN)` may be read from.
#[inline]
pub unsafe fn skip(p: *const u8) -> Option<usize> {
    skip_word(load(p))
}
