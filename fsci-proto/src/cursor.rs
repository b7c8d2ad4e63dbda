//! Length-checked byte cursors for the little-endian FSCI and MAC encodings.

/// Error returned by [`ByteWriter`] and [`ByteReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CursorError {
    /// The output buffer has no room for the write.
    BufferTooSmall,
    /// The input ended before the requested field.
    UnexpectedEnd,
}

impl core::fmt::Display for CursorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::UnexpectedEnd => write!(f, "unexpected end of input"),
        }
    }
}

/// Sequential writer over a mutable byte slice.
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of bytes written so far.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes still available in the buffer.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn write_slice(&mut self, bytes: &[u8]) -> Result<(), CursorError> {
        let end = self.pos + bytes.len();
        let dst = self
            .buf
            .get_mut(self.pos..end)
            .ok_or(CursorError::BufferTooSmall)?;
        dst.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) -> Result<(), CursorError> {
        self.write_slice(&[value])
    }

    #[inline]
    pub fn write_u16_le(&mut self, value: u16) -> Result<(), CursorError> {
        self.write_slice(&value.to_le_bytes())
    }

    #[inline]
    pub fn write_u32_le(&mut self, value: u32) -> Result<(), CursorError> {
        self.write_slice(&value.to_le_bytes())
    }

    #[inline]
    pub fn write_u64_le(&mut self, value: u64) -> Result<(), CursorError> {
        self.write_slice(&value.to_le_bytes())
    }
}

/// Sequential reader over a byte slice.
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of bytes consumed so far.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unread tail of the input.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], CursorError> {
        let end = self.pos + len;
        let src = self
            .buf
            .get(self.pos..end)
            .ok_or(CursorError::UnexpectedEnd)?;
        self.pos = end;
        Ok(src)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CursorError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, CursorError> {
        Ok(self.read_array::<1>()?[0])
    }

    #[inline]
    pub fn read_u16_le(&mut self) -> Result<u16, CursorError> {
        self.read_array().map(u16::from_le_bytes)
    }

    #[inline]
    pub fn read_u32_le(&mut self) -> Result<u32, CursorError> {
        self.read_array().map(u32::from_le_bytes)
    }

    #[inline]
    pub fn read_u64_le(&mut self) -> Result<u64, CursorError> {
        self.read_array().map(u64::from_le_bytes)
    }
}
