//! Record model: the value types every other layer exchanges.
//!
//! ## Ownership
//!
//! ```text
//! MethodDescriptor
//!   ├── ClassDescriptor
//!   │     └── LibraryOrigin?   (None for project-local classes)
//!   └── Location?
//! ```
//!
//! Everything here is an immutable value: build it, clone it, compare it.
//! [`AncestorRecord`] is the unit produced by ancestor extraction, and
//! [`CallSignature`] is the unit stored by the signature registry.

mod records;
mod signature;

pub use records::{
    AncestorRecord, ClassDescriptor, LibraryOrigin, Location, MethodDescriptor, Visibility,
};
pub use signature::{CallSignature, ParameterInfo, ParameterKind};
