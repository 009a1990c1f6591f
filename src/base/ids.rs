use std::fmt;
use std::sync::Arc;

/// Identifies a compilation module (one project module with its own SDK and
/// dependency set). Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(Arc<str>);

impl ModuleId {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Marker for the symbol tree a hierarchy query is answered in.
///
/// The symbol-resolution layer hands one of these to every query; the cache
/// treats it as part of the key and stamps it onto the returned symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RootScope(pub u32);

impl RootScope {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}
