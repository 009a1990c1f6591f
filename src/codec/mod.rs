//! Record codec: compact binary encoding of the record model.
//!
//! Records are composed bottom-up (`Location` → `LibraryOrigin` →
//! `ClassDescriptor` → `MethodDescriptor`) and written field by field in a
//! fixed order with no padding:
//!
//! - strings: u16 big-endian byte length, then UTF-8 bytes (max 65535 bytes)
//! - `line`: i32 big-endian
//! - enums: one byte holding the ordinal
//! - optional nested records: see [`WireLayout`]
//!
//! ## Layouts
//!
//! The legacy format writes optional records unconditionally and relies on a
//! sentinel value to mean "absent". New data uses a one-byte presence tag
//! instead. The two layouts are not self-describing, so a stream is always
//! read with the layout it was written with; the contract store records it in
//! its header.

mod error;
mod reader;
mod records;
mod store;
mod writer;

pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use reader::RecordReader;
pub use records::{Decode, Encode, OptionalRecord};
pub use store::ContractStore;
pub use writer::RecordWriter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::base::constants::{STORE_VERSION_LEGACY, STORE_VERSION_TAGGED};

/// How optional nested records are laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WireLayout {
    /// Always-present nested record; absence is a sentinel value, so a
    /// present sentinel fails to encode.
    Legacy,
    /// Presence byte (0 or 1), then the record only when present.
    #[default]
    Tagged,
}

impl WireLayout {
    /// Store format version byte for this layout.
    pub fn store_version(self) -> u8 {
        match self {
            Self::Legacy => STORE_VERSION_LEGACY,
            Self::Tagged => STORE_VERSION_TAGGED,
        }
    }

    pub fn from_store_version(version: u8) -> Option<Self> {
        match version {
            STORE_VERSION_LEGACY => Some(Self::Legacy),
            STORE_VERSION_TAGGED => Some(Self::Tagged),
            _ => None,
        }
    }
}

/// Encode a single record into a fresh buffer.
pub fn encode_to_vec<T: Encode + ?Sized>(value: &T, layout: WireLayout) -> EncodeResult<Vec<u8>> {
    let mut writer = RecordWriter::new(layout);
    value.encode(&mut writer)?;
    Ok(writer.into_bytes())
}

/// Decode exactly one record from `bytes`; leftover bytes are an error.
pub fn decode_exact<T: Decode>(bytes: &[u8], layout: WireLayout) -> DecodeResult<T> {
    let mut reader = RecordReader::new(bytes, layout);
    let value = T::decode(&mut reader)?;
    reader.expect_end()?;
    Ok(value)
}

#[cfg(test)]
mod tests;
