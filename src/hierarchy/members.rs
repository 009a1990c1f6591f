//! Members a class declares itself, and the symbols the cache hands out.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::RootScope;
use crate::codec::ContractStore;
use crate::model::{Location, MethodDescriptor, Visibility};

/// A member visible through a class's ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: SmolStr,
    /// The ancestor that declares the member.
    pub owner: SmolStr,
    pub visibility: Visibility,
    pub location: Option<Location>,
    /// The resolution root this symbol was produced for.
    pub root: RootScope,
}

impl Symbol {
    pub fn from_method(method: &MethodDescriptor, root: RootScope) -> Self {
        Self {
            name: SmolStr::new(&method.name),
            owner: SmolStr::new(method.owner_name()),
            visibility: method.visibility,
            location: method.location.clone(),
            root,
        }
    }
}

/// Source of the members a single class or module declares directly.
pub trait MemberProvider: Send + Sync {
    /// Members declared by `class_fqn` itself, in declaration order.
    fn members_of(&self, class_fqn: &str) -> Vec<MethodDescriptor>;
}

/// In-memory [`MemberProvider`] grouping methods by owning class.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    by_owner: FxHashMap<String, Vec<MethodDescriptor>>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_methods(methods: impl IntoIterator<Item = MethodDescriptor>) -> Self {
        let mut table = Self::new();
        for method in methods {
            table.insert(method);
        }
        table
    }

    pub fn from_store(store: &ContractStore) -> Self {
        Self::from_methods(store.methods().iter().cloned())
    }

    pub fn insert(&mut self, method: MethodDescriptor) {
        self.by_owner
            .entry(method.owner_name().to_owned())
            .or_default()
            .push(method);
    }

    /// Number of methods across all classes.
    pub fn len(&self) -> usize {
        self.by_owner.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_owner.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.by_owner.keys().map(String::as_str)
    }
}

impl MemberProvider for MethodTable {
    fn members_of(&self, class_fqn: &str) -> Vec<MethodDescriptor> {
        self.by_owner.get(class_fqn).cloned().unwrap_or_default()
    }
}
