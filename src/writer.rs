//! Serialization of sentinel terminated sequences.

use bytes::BufMut;
use log::debug;

use crate::{EncodeError, FastUInt, FastUIntBufMut, SENTINEL_BYTE};

/// Appends values to a `BufMut` and terminates the sequence with the sentinel on `finish()`.
///
/// Readers stop at the first zero they see, so a zero pushed into the middle of a sequence ends
/// it early for them.
pub struct SequenceWriter<B> {
    buf: B,
    count: usize,
    len: usize,
}

impl<B: BufMut> SequenceWriter<B> {
    pub fn new(buf: B) -> Self {
        Self {
            buf,
            count: 0,
            len: 0,
        }
    }

    /// Appends `v`, returning the number of bytes written.
    #[inline]
    pub fn push<FU: FastUInt>(&mut self, v: FU) -> Result<usize, EncodeError> {
        let n = self.buf.put_fast_uint(v)?;
        self.count += 1;
        self.len += n;
        Ok(n)
    }

    /// Appends every value produced by `values`, stopping at the first value that cannot be
    /// encoded.
    pub fn extend<FU, I>(&mut self, values: I) -> Result<(), EncodeError>
    where
        FU: FastUInt,
        I: IntoIterator<Item = FU>,
    {
        for v in values {
            self.push(v)?;
        }
        Ok(())
    }

    /// Number of values pushed so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Writes the sentinel and returns the underlying buffer.
    pub fn finish(mut self) -> B {
        self.buf.put_u8(SENTINEL_BYTE);
        debug!(
            "finished sequence of {} values in {} bytes",
            self.count,
            self.len + 1
        );
        self.buf
    }
}

/// Encodes `values` followed by the sentinel into a new buffer.
///
/// Either every value is written or an error is returned and no buffer is produced.
///
/// ```
/// let buf = fast_uint::write_sequence([1u64, 200]).unwrap();
/// assert_eq!(buf, [0x81, 0x48, 0x81, 0x80]);
/// ```
pub fn write_sequence<FU, I>(values: I) -> Result<Vec<u8>, EncodeError>
where
    FU: FastUInt,
    I: IntoIterator<Item = FU>,
{
    let values = values.into_iter();
    let mut writer = SequenceWriter::new(Vec::with_capacity(values.size_hint().0 + 1));
    writer.extend(values)?;
    Ok(writer.finish())
}
