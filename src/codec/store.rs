//! Contract store: a framed file of method descriptors.
//!
//! ```text
//! magic  "TTCS"       4 bytes
//! version u8          1 = legacy layout, 2 = tagged layout
//! count   u32         number of records
//! records ...         `count` MethodDescriptors in the version's layout
//! ```

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::base::constants::STORE_MAGIC;
use crate::model::MethodDescriptor;

use super::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use super::reader::RecordReader;
use super::records::{Decode, Encode};
use super::writer::RecordWriter;
use super::WireLayout;

/// An in-memory set of observed methods plus the layout it is stored with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContractStore {
    layout: WireLayout,
    methods: Vec<MethodDescriptor>,
}

impl ContractStore {
    pub fn new(layout: WireLayout) -> Self {
        Self {
            layout,
            methods: Vec::new(),
        }
    }

    pub fn with_methods(layout: WireLayout, methods: Vec<MethodDescriptor>) -> Self {
        Self { layout, methods }
    }

    pub fn layout(&self) -> WireLayout {
        self.layout
    }

    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    pub fn into_methods(self) -> Vec<MethodDescriptor> {
        self.methods
    }

    pub fn push(&mut self, method: MethodDescriptor) {
        self.methods.push(method);
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Serialize header and records into one buffer.
    pub fn to_bytes(&self) -> EncodeResult<Vec<u8>> {
        let count = u32::try_from(self.methods.len()).map_err(|_| EncodeError::TooManyItems {
            len: self.methods.len(),
        })?;

        let mut writer = RecordWriter::new(self.layout);
        writer.write_bytes(&STORE_MAGIC);
        writer.write_u8(self.layout.store_version());
        writer.write_u32(count);
        for method in &self.methods {
            method.encode(&mut writer)?;
        }
        Ok(writer.into_bytes())
    }

    /// Parse a complete store buffer. The layout comes from the header.
    pub fn from_bytes(bytes: &[u8]) -> DecodeResult<Self> {
        // The header is layout-independent; read it with any layout.
        let mut header = RecordReader::new(bytes, WireLayout::default());
        if header.read_slice(STORE_MAGIC.len())? != &STORE_MAGIC[..] {
            return Err(DecodeError::BadMagic);
        }
        let version = header.read_u8()?;
        let layout =
            WireLayout::from_store_version(version).ok_or(DecodeError::UnsupportedVersion(version))?;
        let count = header.read_u32()? as usize;

        let mut reader = RecordReader::new(&bytes[header.position()..], layout);
        let mut methods = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            methods.push(MethodDescriptor::decode(&mut reader)?);
        }
        reader.expect_end()?;

        tracing::trace!(records = methods.len(), ?layout, "decoded contract store");
        Ok(Self { layout, methods })
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> EncodeResult<()> {
        out.write_all(&self.to_bytes()?)?;
        out.flush()?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut input: R) -> DecodeResult<Self> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn save(&self, path: &Path) -> EncodeResult<()> {
        fs::write(path, self.to_bytes()?)?;
        tracing::debug!(path = %path.display(), records = self.len(), "saved contract store");
        Ok(())
    }

    pub fn load(path: &Path) -> DecodeResult<Self> {
        Self::from_bytes(&fs::read(path)?)
    }
}
