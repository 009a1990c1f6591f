use std::collections::BTreeMap;
use std::sync::Arc;

use crate::base::constants::ANONYMOUS_MODULE_PREFIX;
use crate::model::AncestorRecord;

use super::{
    AncestorsExtractor, ExtractionFailure, ExtractionListener, ExtractorKind, ProjectContext,
    RuntimeConsole, RuntimeHandle, run_console,
};

/// Prints `Name: Ancestor Ancestor ...` for every named module in the heap.
const OBJECT_SPACE_SCRIPT: &str = r##"
Rails.application.eager_load! if defined?(Rails) && Rails.respond_to?(:application)
ObjectSpace.each_object(Module) do |mod|
  name = mod.name
  next if name.nil?
  puts "#{name}: #{mod.ancestors.map(&:to_s).join(' ')}"
end
"##;

/// Live-introspection strategy: reads `ancestors` from every loaded module.
#[derive(Clone)]
pub struct ObjectSpaceExtractor {
    console: Arc<dyn RuntimeConsole>,
}

impl ObjectSpaceExtractor {
    pub fn new(console: Arc<dyn RuntimeConsole>) -> Self {
        Self { console }
    }

    pub fn script() -> &'static str {
        OBJECT_SPACE_SCRIPT
    }

    /// Parse console output into records sorted by module name.
    ///
    /// Anonymous ancestors (`#<Module:0x...>`) are dropped. When a name is
    /// reported twice (reloaded constants) the later line wins.
    pub fn parse_output(output: &str) -> Result<Vec<AncestorRecord>, ExtractionFailure> {
        let mut by_name: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (index, raw) in output.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let (name, ancestors) = match line.split_once(": ") {
                Some((name, rest)) => (name.trim(), rest),
                None => match line.strip_suffix(':') {
                    Some(name) => (name.trim(), ""),
                    None => return Err(ExtractionFailure::malformed(index + 1, line)),
                },
            };
            if name.is_empty() {
                return Err(ExtractionFailure::malformed(index + 1, line));
            }
            if name.starts_with(ANONYMOUS_MODULE_PREFIX) {
                continue;
            }

            let ancestors = ancestors
                .split_whitespace()
                .filter(|ancestor| !ancestor.starts_with(ANONYMOUS_MODULE_PREFIX))
                .map(str::to_owned)
                .collect();
            by_name.insert(name.to_owned(), ancestors);
        }

        Ok(by_name
            .into_iter()
            .map(|(module_name, ancestors)| AncestorRecord {
                module_name,
                ancestors,
            })
            .collect())
    }
}

impl AncestorsExtractor for ObjectSpaceExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::ObjectSpace
    }

    fn extract_ancestors(
        &self,
        project: &ProjectContext,
        runtime: &RuntimeHandle,
        listener: &dyn ExtractionListener,
    ) -> Result<Vec<AncestorRecord>, ExtractionFailure> {
        let output = run_console(
            self.console.as_ref(),
            project,
            runtime,
            OBJECT_SPACE_SCRIPT,
            listener,
        )?;
        let records = Self::parse_output(&output)?;
        tracing::debug!(modules = records.len(), "object-space extraction finished");
        Ok(records)
    }
}
