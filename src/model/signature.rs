//! Observed call signatures, as recorded by the type tracker at runtime.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{LibraryOrigin, Visibility};

/// How a parameter is declared.
///
/// ```text
/// def m(a1, a2,          # req
///       b1 = 1,          # opt
///       *c,              # rest
///       d1,              # post
///       e1:, e2: 2,      # keyreq, key
///       **f,             # keyrest
///       &g)              # block
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParameterKind {
    Req,
    Opt,
    Post,
    Rest,
    KeyReq,
    Key,
    KeyRest,
    Block,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 8] = [
        Self::Req,
        Self::Opt,
        Self::Post,
        Self::Rest,
        Self::KeyReq,
        Self::Key,
        Self::KeyRest,
        Self::Block,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Spelling used by `Method#parameters` in the runtime.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Req => "req",
            Self::Opt => "opt",
            Self::Post => "post",
            Self::Rest => "rest",
            Self::KeyReq => "keyreq",
            Self::Key => "key",
            Self::KeyRest => "keyrest",
            Self::Block => "block",
        }
    }

    /// Keyword parameters are passed by name.
    pub fn is_named(self) -> bool {
        matches!(self, Self::KeyReq | Self::Key | Self::KeyRest)
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown parameter kind: {s}"))
    }
}

/// A declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterInfo {
    pub name: String,
    pub kind: ParameterKind,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn is_named(&self) -> bool {
        self.kind.is_named()
    }
}

/// One observed call shape and the type it returned.
///
/// Equality and hashing cover the call shape only; `return_type` and
/// `is_local` are payload.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CallSignature {
    pub method_name: String,
    pub receiver_name: String,
    pub visibility: Visibility,
    pub parameters: Vec<ParameterInfo>,
    pub argument_types: Vec<String>,
    pub origin: LibraryOrigin,
    pub return_type: String,
    pub is_local: bool,
}

impl CallSignature {
    pub fn new(
        method_name: impl Into<String>,
        receiver_name: impl Into<String>,
        visibility: Visibility,
        origin: LibraryOrigin,
    ) -> Self {
        Self {
            method_name: method_name.into(),
            receiver_name: receiver_name.into(),
            visibility,
            parameters: Vec::new(),
            argument_types: Vec::new(),
            origin,
            return_type: String::new(),
            is_local: false,
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<ParameterInfo>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_argument_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argument_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    pub fn local(mut self, is_local: bool) -> Self {
        self.is_local = is_local;
        self
    }
}

impl PartialEq for CallSignature {
    fn eq(&self, other: &Self) -> bool {
        self.method_name == other.method_name
            && self.receiver_name == other.receiver_name
            && self.visibility == other.visibility
            && self.parameters == other.parameters
            && self.argument_types == other.argument_types
            && self.origin == other.origin
    }
}

impl Eq for CallSignature {}

impl Hash for CallSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.method_name.hash(state);
        self.receiver_name.hash(state);
        self.visibility.hash(state);
        self.parameters.hash(state);
        self.argument_types.hash(state);
        self.origin.hash(state);
    }
}
