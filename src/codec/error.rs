//! Error types for the record codec.

use thiserror::Error;

/// Errors raised while reading records back from bytes.
///
/// Every variant is fatal to the decode call that produced it. The codec has
/// no partial-skip mechanism: a caller that wants to skip a bad record must
/// know where the next one starts.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stream ended before a fixed-width field or a declared length.
    #[error("unexpected end of record stream: needed {needed} byte(s), {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    /// Visibility ordinal outside `0..=2`.
    #[error("invalid visibility ordinal {0}")]
    InvalidVisibility(u8),

    /// Parameter kind ordinal outside the known kinds.
    #[error("invalid parameter kind ordinal {0}")]
    InvalidParameterKind(u8),

    /// Presence byte of a tagged optional field was neither 0 nor 1.
    #[error("invalid presence tag {0} for optional field")]
    InvalidPresenceTag(u8),

    /// Boolean byte was neither 0 nor 1.
    #[error("invalid boolean byte {0}")]
    InvalidBool(u8),

    /// String bytes were not valid UTF-8.
    #[error("invalid UTF-8 in string field: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Bytes were left over after the last expected record.
    #[error("{0} trailing byte(s) after record")]
    TrailingBytes(usize),

    /// Contract store does not start with the expected magic.
    #[error("not a contract store (bad magic)")]
    BadMagic,

    /// Contract store written by an unknown format version.
    #[error("unsupported contract store version {0}")]
    UnsupportedVersion(u8),

    /// IO error while reading a store.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while writing records.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// String longer than the u16 length prefix can describe.
    #[error("string of {len} bytes exceeds the 65535 byte limit")]
    StringTooLong { len: usize },

    /// Collection longer than its count prefix can describe.
    #[error("collection of {len} items exceeds its count prefix")]
    TooManyItems { len: usize },

    /// A present record equal to the legacy sentinel; it would read back as
    /// absent.
    #[error("present {record} equals the legacy absence sentinel")]
    AmbiguousSentinel { record: &'static str },

    /// IO error while writing a store.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DecodeResult<T> = Result<T, DecodeError>;
pub type EncodeResult<T> = Result<T, EncodeError>;
