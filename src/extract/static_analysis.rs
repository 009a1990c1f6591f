//! Static-reasoning strategy: linearize declared hierarchies ourselves.
//!
//! The console only dumps declarations, one per line:
//!
//! ```text
//! class Name [Superclass]
//! module Name
//! include Name Mod [Mod ...]
//! prepend Name Mod [Mod ...]
//! ```
//!
//! Each line lists modules in call order, so `include Foo A B` is
//! `include A, B` inside `Foo`. The ancestor chain of a class is
//!
//! ```text
//! prepends (latest call first) ++ [self] ++ includes (latest call first) ++ chain(superclass)
//! ```
//!
//! with every included or prepended module expanded to its own chain and
//! duplicates collapsed onto their farthest occurrence, the same way the
//! runtime skips a module that a superclass already includes.
//!
//! Declared names arrive fully qualified (`Admin::User`). Referenced names
//! are looked up from the referencing scope outward, so `include Helpers`
//! inside `Admin::User` finds `Admin::Helpers` when that is declared.

use std::sync::Arc;

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::constants::ROOT_CLASS;
use crate::model::AncestorRecord;

use super::prelude::CORE_PRELUDE;
use super::{
    AncestorsExtractor, ExtractionFailure, ExtractionListener, ExtractorKind, ProjectContext,
    RuntimeConsole, RuntimeHandle, run_console,
};

/// Scans source roots for declarations without loading any project code.
///
/// Nesting is tracked per file by indentation: a `class`/`module` line opens
/// a scope that the next `end` at the same indentation closes. Declared names
/// are emitted fully qualified; referenced names are emitted as written.
const DECLARATIONS_SCRIPT: &str = r##"
require 'find'
ROOTS = [__ROOTS__]
ROOTS.each do |root|
  next unless File.directory?(root)
  Find.find(root) do |path|
    next unless path.end_with?('.rb')
    scopes = []
    File.foreach(path) do |line|
      case line
      when /^(\s*)(class|module)\s+(?:::)?([A-Z][\w:]*)(?:\s*<\s*(?:::)?([A-Z][\w:]*))?/
        indent, keyword, name, superclass = $1.size, $2, $3, $4
        name = "#{scopes.last[1]}::#{name}" unless scopes.empty?
        superclass = nil if keyword == 'module'
        puts [keyword, name, superclass].compact.join(' ')
        scopes.push([indent, name]) unless line =~ /\bend\s*(#.*)?$/
      when /^\s*(include|prepend)\s+((?:::)?[A-Z][\w:]*(?:\s*,\s*(?:::)?[A-Z][\w:]*)*)/
        directive, list = $1, $2
        next if scopes.empty?
        modules = list.split(/\s*,\s*/).map { |m| m.delete_prefix('::') }
        puts "#{directive} #{scopes.last[1]} #{modules.join(' ')}"
      when /^(\s*)end\b/
        scopes.pop if !scopes.empty? && scopes.last[0] == $1.size
      end
    end
  end
end
"##;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclKind {
    Class,
    Module,
}

#[derive(Debug, Clone)]
struct Declaration {
    kind: DeclKind,
    /// Explicit superclass, if any line named one.
    superclass: Option<String>,
    /// The hierarchy root; never gets the implicit superclass.
    is_root: bool,
    /// One entry per `include` call, in call order.
    includes: Vec<Vec<String>>,
    /// One entry per `prepend` call, in call order.
    prepends: Vec<Vec<String>>,
}

impl Declaration {
    fn new(kind: DeclKind, superclass: Option<String>) -> Self {
        Self {
            kind,
            superclass,
            is_root: false,
            includes: Vec::new(),
            prepends: Vec::new(),
        }
    }

    /// The declared superclass, or [`ROOT_CLASS`] for a class that never
    /// named one.
    fn implicit_superclass(&self) -> Option<&str> {
        match (&self.superclass, self.kind) {
            (Some(superclass), _) => Some(superclass.as_str()),
            (None, DeclKind::Class) if !self.is_root => Some(ROOT_CLASS),
            (None, _) => None,
        }
    }
}

/// Declarations known to the linearizer: the core prelude plus everything
/// the project declared, and the order the project declared things in.
#[derive(Debug, Clone)]
struct DeclarationTable {
    decls: FxHashMap<String, Declaration>,
    declared: IndexSet<String>,
}

impl DeclarationTable {
    fn with_prelude() -> Self {
        let mut decls = FxHashMap::default();
        for &(name, is_class, superclass, includes) in CORE_PRELUDE {
            let kind = if is_class {
                DeclKind::Class
            } else {
                DeclKind::Module
            };
            let mut decl = Declaration::new(kind, superclass.map(str::to_owned));
            decl.is_root = is_class && superclass.is_none();
            if !includes.is_empty() {
                decl.includes
                    .push(includes.iter().map(|m| (*m).to_owned()).collect());
            }
            decls.insert(name.to_owned(), decl);
        }
        Self {
            decls,
            declared: IndexSet::new(),
        }
    }

    /// Look `reference` up lexically from `scope` outward: `A::B::Ref`, then
    /// `A::Ref`, then `Ref` as written.
    fn resolve(&self, scope: Option<&str>, reference: &str) -> String {
        let mut scope = scope;
        while let Some(current) = scope {
            let candidate = format!("{current}::{reference}");
            if self.decls.contains_key(&candidate) {
                return candidate;
            }
            scope = current.rsplit_once("::").map(|(outer, _)| outer);
        }
        reference.to_owned()
    }

    fn parse(output: &str) -> Result<Self, ExtractionFailure> {
        let mut table = Self::with_prelude();

        for (index, raw) in output.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let malformed = || ExtractionFailure::malformed(index + 1, line);

            let mut words = line.split_whitespace();
            let directive = words.next().ok_or_else(malformed)?;
            let name = words.next().ok_or_else(malformed)?;
            let rest: Vec<&str> = words.collect();

            match directive {
                "class" => {
                    if rest.len() > 1 {
                        return Err(malformed());
                    }
                    table
                        .declare_class(name, rest.first().copied())
                        .map_err(|()| malformed())?;
                }
                "module" => {
                    if !rest.is_empty() {
                        return Err(malformed());
                    }
                    table.declare_module(name).map_err(|()| malformed())?;
                }
                "include" | "prepend" => {
                    if rest.is_empty() {
                        return Err(malformed());
                    }
                    let modules = rest.iter().map(|m| (*m).to_owned()).collect();
                    let decl = table.decls.get_mut(name).ok_or_else(malformed)?;
                    if directive == "include" {
                        decl.includes.push(modules);
                    } else {
                        decl.prepends.push(modules);
                    }
                }
                _ => return Err(malformed()),
            }
        }

        Ok(table)
    }

    /// Declare or reopen a class. Two different explicit superclasses, or
    /// reopening a module as a class, is an error.
    ///
    /// A reopening without a superclass never conflicts; the first explicit
    /// superclass is kept whichever line declared it.
    fn declare_class(&mut self, name: &str, superclass: Option<&str>) -> Result<(), ()> {
        self.declared.insert(name.to_owned());
        match self.decls.get_mut(name) {
            Some(existing) if existing.kind != DeclKind::Class => Err(()),
            Some(existing) => match superclass {
                None => Ok(()),
                Some(sup) => match existing.superclass.as_deref() {
                    Some(known) if known == sup => Ok(()),
                    Some(_) => Err(()),
                    None if existing.is_root => Err(()),
                    None => {
                        existing.superclass = Some(sup.to_owned());
                        Ok(())
                    }
                },
            },
            None => {
                let superclass = superclass.map(str::to_owned);
                self.decls
                    .insert(name.to_owned(), Declaration::new(DeclKind::Class, superclass));
                Ok(())
            }
        }
    }

    fn declare_module(&mut self, name: &str) -> Result<(), ()> {
        self.declared.insert(name.to_owned());
        match self.decls.get(name) {
            Some(existing) if existing.kind != DeclKind::Module => Err(()),
            Some(_) => Ok(()),
            None => {
                self.decls
                    .insert(name.to_owned(), Declaration::new(DeclKind::Module, None));
                Ok(())
            }
        }
    }
}

/// Memoized, cycle-checked linearization over a [`DeclarationTable`].
struct Linearizer<'a> {
    table: &'a DeclarationTable,
    memo: FxHashMap<String, Vec<String>>,
    visiting: FxHashSet<String>,
}

impl<'a> Linearizer<'a> {
    fn new(table: &'a DeclarationTable) -> Self {
        Self {
            table,
            memo: FxHashMap::default(),
            visiting: FxHashSet::default(),
        }
    }

    fn chain(&mut self, name: &str) -> Result<Vec<String>, ExtractionFailure> {
        if let Some(done) = self.memo.get(name) {
            return Ok(done.clone());
        }
        let table = self.table;
        let Some(decl) = table.decls.get(name) else {
            // Defined somewhere the scan did not reach; all we know is its name.
            tracing::debug!(name, "unknown ancestor, treating as opaque");
            return Ok(vec![name.to_owned()]);
        };
        if !self.visiting.insert(name.to_owned()) {
            return Err(ExtractionFailure::InheritanceCycle(name.to_owned()));
        }

        let mut raw = Vec::new();
        for call in decl.prepends.iter().rev() {
            for module in call {
                let module = table.resolve(Some(name), module);
                raw.extend(self.chain(&module)?);
            }
        }
        raw.push(name.to_owned());
        for call in decl.includes.iter().rev() {
            for module in call {
                let module = table.resolve(Some(name), module);
                raw.extend(self.chain(&module)?);
            }
        }
        if let Some(superclass) = decl.implicit_superclass() {
            let outer = name.rsplit_once("::").map(|(outer, _)| outer);
            // `class Admin::Report < Report` names the outer `Report`.
            let resolved = table.resolve(outer, superclass);
            let superclass = if resolved == name {
                superclass.to_owned()
            } else {
                resolved
            };
            raw.extend(self.chain(&superclass)?);
        }

        self.visiting.remove(name);
        let linear = collapse_to_farthest(raw);
        self.memo.insert(name.to_owned(), linear.clone());
        Ok(linear)
    }
}

/// Drop repeated names, keeping each at its farthest position.
fn collapse_to_farthest(raw: Vec<String>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut kept: Vec<String> = raw
        .into_iter()
        .rev()
        .filter(|name| seen.insert(name.clone()))
        .collect();
    kept.reverse();
    kept
}

/// Static-reasoning strategy over a declaration dump.
#[derive(Clone)]
pub struct StaticExtractor {
    console: Arc<dyn RuntimeConsole>,
}

impl StaticExtractor {
    pub fn new(console: Arc<dyn RuntimeConsole>) -> Self {
        Self { console }
    }

    /// The declaration-dump script for `project`'s source roots.
    pub fn script(project: &ProjectContext) -> String {
        let roots = project
            .source_roots()
            .map(|root| format!("{:?}", root.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(", ");
        DECLARATIONS_SCRIPT.replace("__ROOTS__", &roots)
    }

    /// Linearize every declared class and module, in declaration order.
    pub fn linearize(output: &str) -> Result<Vec<AncestorRecord>, ExtractionFailure> {
        let table = DeclarationTable::parse(output)?;
        let mut linearizer = Linearizer::new(&table);

        table
            .declared
            .iter()
            .map(|name| Ok(AncestorRecord::new(name.as_str(), linearizer.chain(name)?)))
            .collect()
    }
}

impl AncestorsExtractor for StaticExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Static
    }

    fn extract_ancestors(
        &self,
        project: &ProjectContext,
        runtime: &RuntimeHandle,
        listener: &dyn ExtractionListener,
    ) -> Result<Vec<AncestorRecord>, ExtractionFailure> {
        let script = Self::script(project);
        let output = run_console(self.console.as_ref(), project, runtime, &script, listener)?;
        let records = Self::linearize(&output)?;
        tracing::debug!(modules = records.len(), "static extraction finished");
        Ok(records)
    }
}
