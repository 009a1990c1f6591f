use super::error::{DecodeError, DecodeResult};
use super::records::{Decode, OptionalRecord};
use super::WireLayout;

/// Cursor over an in-memory record buffer.
///
/// All multi-byte integers are big-endian. Every read checks the remaining
/// length first and fails with [`DecodeError::UnexpectedEof`] instead of
/// returning a short value.
pub struct RecordReader<'a> {
    data: &'a [u8],
    pos: usize,
    layout: WireLayout,
}

impl<'a> RecordReader<'a> {
    pub fn new(data: &'a [u8], layout: WireLayout) -> Self {
        Self {
            data,
            pos: 0,
            layout,
        }
    }

    pub fn layout(&self) -> WireLayout {
        self.layout
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail unless every byte has been consumed.
    pub fn expect_end(&self) -> DecodeResult<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(DecodeError::TrailingBytes(n)),
        }
    }

    pub fn read_slice(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(DecodeError::UnexpectedEof {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> DecodeResult<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    pub fn read_bool(&mut self) -> DecodeResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::InvalidBool(other)),
        }
    }

    /// u16 byte length, then that many UTF-8 bytes.
    pub fn read_string(&mut self) -> DecodeResult<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.read_slice(len)?;
        Ok(std::str::from_utf8(bytes)?.to_owned())
    }

    pub fn read<T: Decode>(&mut self) -> DecodeResult<T> {
        T::decode(self)
    }

    /// u16 count, then that many records.
    pub fn read_list<T: Decode>(&mut self) -> DecodeResult<Vec<T>> {
        let count = self.read_u16()? as usize;
        // Cap the pre-allocation: the count is untrusted until the items are read.
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(T::decode(self)?);
        }
        Ok(items)
    }

    /// u16 count, then that many strings.
    pub fn read_string_list(&mut self) -> DecodeResult<Vec<String>> {
        let count = self.read_u16()? as usize;
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(self.read_string()?);
        }
        Ok(items)
    }

    /// Read an optional nested record according to the reader's layout.
    ///
    /// - `Legacy`: the record is always present; a sentinel decodes as `None`.
    /// - `Tagged`: a presence byte, then the record only if the byte is 1.
    pub fn read_optional<T: OptionalRecord>(&mut self) -> DecodeResult<Option<T>> {
        match self.layout {
            WireLayout::Legacy => {
                let value = T::decode(self)?;
                Ok((!value.is_sentinel()).then_some(value))
            }
            WireLayout::Tagged => match self.read_u8()? {
                0 => Ok(None),
                1 => Ok(Some(T::decode(self)?)),
                other => Err(DecodeError::InvalidPresenceTag(other)),
            },
        }
    }
}
