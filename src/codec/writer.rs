use crate::base::constants::MAX_STRING_BYTES;

use super::error::{EncodeError, EncodeResult};
use super::records::{Encode, OptionalRecord};
use super::WireLayout;

/// Growable output buffer for records. Big-endian, no padding.
#[derive(Debug, Clone)]
pub struct RecordWriter {
    buf: Vec<u8>,
    layout: WireLayout,
}

impl RecordWriter {
    pub fn new(layout: WireLayout) -> Self {
        Self {
            buf: Vec::new(),
            layout,
        }
    }

    pub fn layout(&self) -> WireLayout {
        self.layout
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// u16 byte length, then the UTF-8 bytes.
    pub fn write_string(&mut self, value: &str) -> EncodeResult<()> {
        let len = value.len();
        if len > MAX_STRING_BYTES {
            return Err(EncodeError::StringTooLong { len });
        }
        self.write_u16(len as u16);
        self.write_bytes(value.as_bytes());
        Ok(())
    }

    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) -> EncodeResult<()> {
        value.encode(self)
    }

    fn write_count(&mut self, len: usize) -> EncodeResult<()> {
        let count = u16::try_from(len).map_err(|_| EncodeError::TooManyItems { len })?;
        self.write_u16(count);
        Ok(())
    }

    /// u16 count, then each record.
    pub fn write_list<T: Encode>(&mut self, items: &[T]) -> EncodeResult<()> {
        self.write_count(items.len())?;
        items.iter().try_for_each(|item| item.encode(self))
    }

    /// u16 count, then each string.
    pub fn write_string_list(&mut self, items: &[String]) -> EncodeResult<()> {
        self.write_count(items.len())?;
        items.iter().try_for_each(|item| self.write_string(item))
    }

    /// Write an optional nested record according to the writer's layout.
    ///
    /// `Legacy` writes the sentinel for `None` and refuses a present sentinel;
    /// `Tagged` writes a presence byte.
    pub fn write_optional<T: OptionalRecord>(&mut self, value: Option<&T>) -> EncodeResult<()> {
        match (self.layout, value) {
            (WireLayout::Legacy, Some(value)) if value.is_sentinel() => {
                Err(EncodeError::AmbiguousSentinel {
                    record: T::RECORD_NAME,
                })
            }
            (WireLayout::Legacy, Some(value)) => value.encode(self),
            (WireLayout::Legacy, None) => T::sentinel().encode(self),
            (WireLayout::Tagged, Some(value)) => {
                self.write_u8(1);
                value.encode(self)
            }
            (WireLayout::Tagged, None) => {
                self.write_u8(0);
                Ok(())
            }
        }
    }
}
