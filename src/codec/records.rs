//! Per-record wire formats.
//!
//! Field order is part of the format:
//!
//! ```text
//! Location          path:str  line:i32
//! LibraryOrigin     name:str  version:str
//! ClassDescriptor   fqn:str   origin:opt<LibraryOrigin>
//! MethodDescriptor  class:ClassDescriptor  name:str  visibility:u8  location:opt<Location>
//! ParameterInfo     name:str  kind:u8
//! CallSignature     method:str  receiver:str  visibility:u8  params:list<ParameterInfo>
//!                   arg_types:list<str>  origin:LibraryOrigin  return_type:str  is_local:bool
//! AncestorRecord    module:str  ancestors:list<str>
//! ```

use crate::model::{
    AncestorRecord, CallSignature, ClassDescriptor, LibraryOrigin, Location, MethodDescriptor,
    ParameterInfo, ParameterKind, Visibility,
};

use super::error::{DecodeError, DecodeResult, EncodeResult};
use super::reader::RecordReader;
use super::writer::RecordWriter;

/// A record that can be written to a [`RecordWriter`].
pub trait Encode {
    fn encode(&self, writer: &mut RecordWriter) -> EncodeResult<()>;
}

/// A record that can be read from a [`RecordReader`].
pub trait Decode: Sized {
    fn decode(reader: &mut RecordReader<'_>) -> DecodeResult<Self>;
}

/// A nested record that may be absent from its parent.
///
/// The legacy layout has no presence marker, so absence is written as a
/// sentinel value and a decoded sentinel reads back as `None`. A present
/// record equal to the sentinel cannot be written in that layout.
pub trait OptionalRecord: Encode + Decode {
    /// Name used in encode errors.
    const RECORD_NAME: &'static str;

    fn sentinel() -> Self;
    fn is_sentinel(&self) -> bool;
}

// ============================================================================
// LEAF RECORDS
// ============================================================================

impl Encode for Location {
    fn encode(&self, writer: &mut RecordWriter) -> EncodeResult<()> {
        writer.write_string(&self.path)?;
        writer.write_i32(self.line);
        Ok(())
    }
}

impl Decode for Location {
    fn decode(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let path = reader.read_string()?;
        let line = reader.read_i32()?;
        Ok(Location { path, line })
    }
}

impl OptionalRecord for Location {
    const RECORD_NAME: &'static str = "Location";

    fn sentinel() -> Self {
        Location::sentinel()
    }

    fn is_sentinel(&self) -> bool {
        Location::is_sentinel(self)
    }
}

impl Encode for LibraryOrigin {
    fn encode(&self, writer: &mut RecordWriter) -> EncodeResult<()> {
        writer.write_string(&self.name)?;
        writer.write_string(&self.version)
    }
}

impl Decode for LibraryOrigin {
    fn decode(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let name = reader.read_string()?;
        let version = reader.read_string()?;
        Ok(LibraryOrigin { name, version })
    }
}

impl OptionalRecord for LibraryOrigin {
    const RECORD_NAME: &'static str = "LibraryOrigin";

    fn sentinel() -> Self {
        LibraryOrigin::sentinel()
    }

    fn is_sentinel(&self) -> bool {
        LibraryOrigin::is_sentinel(self)
    }
}

impl Encode for Visibility {
    fn encode(&self, writer: &mut RecordWriter) -> EncodeResult<()> {
        writer.write_u8(self.ordinal());
        Ok(())
    }
}

impl Decode for Visibility {
    fn decode(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let ordinal = reader.read_u8()?;
        Visibility::from_ordinal(ordinal).ok_or(DecodeError::InvalidVisibility(ordinal))
    }
}

impl Encode for ParameterKind {
    fn encode(&self, writer: &mut RecordWriter) -> EncodeResult<()> {
        writer.write_u8(self.ordinal());
        Ok(())
    }
}

impl Decode for ParameterKind {
    fn decode(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let ordinal = reader.read_u8()?;
        ParameterKind::from_ordinal(ordinal).ok_or(DecodeError::InvalidParameterKind(ordinal))
    }
}

// ============================================================================
// COMPOSITE RECORDS
// ============================================================================

impl Encode for ClassDescriptor {
    fn encode(&self, writer: &mut RecordWriter) -> EncodeResult<()> {
        writer.write_string(&self.fully_qualified_name)?;
        writer.write_optional(self.origin.as_ref())
    }
}

impl Decode for ClassDescriptor {
    fn decode(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let fully_qualified_name = reader.read_string()?;
        let origin = reader.read_optional()?;
        Ok(ClassDescriptor {
            fully_qualified_name,
            origin,
        })
    }
}

impl Encode for MethodDescriptor {
    fn encode(&self, writer: &mut RecordWriter) -> EncodeResult<()> {
        self.owning_class.encode(writer)?;
        writer.write_string(&self.name)?;
        self.visibility.encode(writer)?;
        writer.write_optional(self.location.as_ref())
    }
}

impl Decode for MethodDescriptor {
    fn decode(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let owning_class = ClassDescriptor::decode(reader)?;
        let name = reader.read_string()?;
        let visibility = Visibility::decode(reader)?;
        let location = reader.read_optional()?;
        Ok(MethodDescriptor {
            owning_class,
            name,
            visibility,
            location,
        })
    }
}

impl Encode for ParameterInfo {
    fn encode(&self, writer: &mut RecordWriter) -> EncodeResult<()> {
        writer.write_string(&self.name)?;
        self.kind.encode(writer)
    }
}

impl Decode for ParameterInfo {
    fn decode(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let name = reader.read_string()?;
        let kind = ParameterKind::decode(reader)?;
        Ok(ParameterInfo { name, kind })
    }
}

impl Encode for CallSignature {
    fn encode(&self, writer: &mut RecordWriter) -> EncodeResult<()> {
        writer.write_string(&self.method_name)?;
        writer.write_string(&self.receiver_name)?;
        self.visibility.encode(writer)?;
        writer.write_list(&self.parameters)?;
        writer.write_string_list(&self.argument_types)?;
        self.origin.encode(writer)?;
        writer.write_string(&self.return_type)?;
        writer.write_bool(self.is_local);
        Ok(())
    }
}

impl Decode for CallSignature {
    fn decode(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let method_name = reader.read_string()?;
        let receiver_name = reader.read_string()?;
        let visibility = Visibility::decode(reader)?;
        let parameters = reader.read_list()?;
        let argument_types = reader.read_string_list()?;
        let origin = LibraryOrigin::decode(reader)?;
        let return_type = reader.read_string()?;
        let is_local = reader.read_bool()?;
        Ok(CallSignature {
            method_name,
            receiver_name,
            visibility,
            parameters,
            argument_types,
            origin,
            return_type,
            is_local,
        })
    }
}

impl Encode for AncestorRecord {
    fn encode(&self, writer: &mut RecordWriter) -> EncodeResult<()> {
        writer.write_string(&self.module_name)?;
        writer.write_string_list(&self.ancestors)
    }
}

impl Decode for AncestorRecord {
    fn decode(reader: &mut RecordReader<'_>) -> DecodeResult<Self> {
        let module_name = reader.read_string()?;
        let ancestors = reader.read_string_list()?;
        Ok(AncestorRecord {
            module_name,
            ancestors,
        })
    }
}
