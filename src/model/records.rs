use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// LOCATION / ORIGIN
// ============================================================================

/// A source position: file path plus 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    pub path: String,
    pub line: i32,
}

impl Location {
    pub fn new(path: impl Into<String>, line: i32) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }

    /// The record the legacy layout writes in place of an absent location.
    pub fn sentinel() -> Self {
        Self::default()
    }

    pub fn is_sentinel(&self) -> bool {
        self.path.is_empty() && self.line == 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

/// The distributable library (gem) a class comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LibraryOrigin {
    pub name: String,
    pub version: String,
}

impl LibraryOrigin {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// The record the legacy layout writes in place of an absent origin.
    pub fn sentinel() -> Self {
        Self::default()
    }

    pub fn is_sentinel(&self) -> bool {
        self.name.is_empty() && self.version.is_empty()
    }
}

impl fmt::Display for LibraryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}

// ============================================================================
// CLASS / METHOD
// ============================================================================

/// A class named by its fully qualified name (`Foo::Bar`) within a library.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassDescriptor {
    pub fully_qualified_name: String,
    /// `None` for project-local classes.
    pub origin: Option<LibraryOrigin>,
}

impl ClassDescriptor {
    pub fn new(fully_qualified_name: impl Into<String>, origin: Option<LibraryOrigin>) -> Self {
        Self {
            fully_qualified_name: fully_qualified_name.into(),
            origin,
        }
    }

    /// A class defined in the project itself.
    pub fn local(fully_qualified_name: impl Into<String>) -> Self {
        Self::new(fully_qualified_name, None)
    }
}

/// Method visibility. The declaration order is the wire ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Self::Public, Self::Private, Self::Protected];

    pub fn ordinal(self) -> u8 {
        match self {
            Self::Public => 0,
            Self::Private => 1,
            Self::Protected => 2,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Protected => "PROTECTED",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed or declared method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MethodDescriptor {
    pub owning_class: ClassDescriptor,
    pub name: String,
    pub visibility: Visibility,
    pub location: Option<Location>,
}

impl MethodDescriptor {
    pub fn new(
        owning_class: ClassDescriptor,
        name: impl Into<String>,
        visibility: Visibility,
        location: Option<Location>,
    ) -> Self {
        Self {
            owning_class,
            name: name.into(),
            visibility,
            location,
        }
    }

    /// Fully qualified name of the class this method is declared on.
    pub fn owner_name(&self) -> &str {
        &self.owning_class.fully_qualified_name
    }
}

// ============================================================================
// ANCESTORS
// ============================================================================

/// One class's linear ancestor chain, nearest first.
///
/// For Ruby this is what `Foo.ancestors` reports: usually the class itself,
/// then prepended/included modules and superclasses in method-resolution order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AncestorRecord {
    pub module_name: String,
    pub ancestors: Vec<String>,
}

impl AncestorRecord {
    pub fn new<I, S>(module_name: impl Into<String>, ancestors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            module_name: module_name.into(),
            ancestors: ancestors.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty()
    }
}
