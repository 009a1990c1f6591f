//! Domain constants shared across the crate.

/// Magic bytes at the start of every contract store file.
pub const STORE_MAGIC: [u8; 4] = *b"TTCS";

/// Store format version for streams written with the legacy (sentinel) layout.
pub const STORE_VERSION_LEGACY: u8 = 1;

/// Store format version for streams written with the tagged-optional layout.
pub const STORE_VERSION_TAGGED: u8 = 2;

/// Largest string the codec can write (u16 length prefix).
pub const MAX_STRING_BYTES: usize = u16::MAX as usize;

/// Default directory holding per-project contract stores.
pub const DEFAULT_CONTRACTS_DIR: &str = ".type-tracker/contracts";

/// Number of progress checkpoints in an ancestors export.
pub const ANCESTORS_PROGRESS_FRACTIONS: u32 = 5;

/// Ancestor names that start with this prefix are anonymous runtime modules.
pub const ANONYMOUS_MODULE_PREFIX: &str = "#<";

/// Implicit superclass of every class declared without one.
pub const ROOT_CLASS: &str = "Object";
