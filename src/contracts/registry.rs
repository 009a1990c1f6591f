use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::model::{CallSignature, ParameterInfo};

use super::version::nearest_version;

/// Call shape: which method, on what, with which argument types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ShapeKey {
    method_name: String,
    receiver_name: String,
    argument_types: Vec<String>,
}

impl ShapeKey {
    fn of(signature: &CallSignature) -> Self {
        Self {
            method_name: signature.method_name.clone(),
            receiver_name: signature.receiver_name.clone(),
            argument_types: signature.argument_types.clone(),
        }
    }
}

/// Observed call contracts, one per call shape and library version.
#[derive(Debug, Default)]
pub struct SignatureRegistry {
    shapes: RwLock<IndexMap<ShapeKey, Vec<CallSignature>>>,
}

impl SignatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `signature`, replacing the contract previously recorded for the
    /// same call shape and library origin.
    pub fn record_signature(&self, signature: CallSignature) {
        trace!(
            method = %signature.method_name,
            receiver = %signature.receiver_name,
            origin = %signature.origin,
            "recording signature"
        );
        let mut shapes = self.shapes.write();
        let versions = shapes.entry(ShapeKey::of(&signature)).or_default();
        match versions.iter_mut().find(|s| s.origin == signature.origin) {
            Some(existing) => *existing = signature,
            None => versions.push(signature),
        }
    }

    /// Return type recorded for this call shape under the library version
    /// nearest to `installed_version`. Without an installed version the
    /// lowest recorded version is used.
    pub fn find_return_type(
        &self,
        method_name: &str,
        receiver_name: &str,
        argument_types: &[String],
        installed_version: Option<&str>,
    ) -> Option<String> {
        let key = ShapeKey {
            method_name: method_name.to_owned(),
            receiver_name: receiver_name.to_owned(),
            argument_types: argument_types.to_vec(),
        };
        let shapes = self.shapes.read();
        let versions = shapes.get(&key)?;
        let candidates: Vec<(String, &str)> = versions
            .iter()
            .map(|s| (s.origin.version.clone(), s.return_type.as_str()))
            .collect();
        nearest_version(installed_version.unwrap_or_default(), &candidates).map(|t| (*t).to_owned())
    }

    /// Parameters of the first recorded contract for `method_name` on
    /// `receiver_name`, whatever its argument types.
    pub fn method_parameters(&self, method_name: &str, receiver_name: &str) -> Vec<ParameterInfo> {
        self.shapes
            .read()
            .iter()
            .find(|(key, _)| key.method_name == method_name && key.receiver_name == receiver_name)
            .and_then(|(_, versions)| versions.first())
            .map(|signature| signature.parameters.clone())
            .unwrap_or_default()
    }

    /// One contract per call shape recorded on `receiver_name`.
    pub fn receiver_signatures(&self, receiver_name: &str) -> Vec<CallSignature> {
        self.shapes
            .read()
            .iter()
            .filter(|(key, _)| key.receiver_name == receiver_name)
            .filter_map(|(_, versions)| versions.first().cloned())
            .collect()
    }

    pub fn clear(&self) {
        let mut shapes = self.shapes.write();
        debug!(shapes = shapes.len(), "clearing signature registry");
        shapes.clear();
    }

    /// Number of recorded `(call shape, library version)` contracts.
    pub fn len(&self) -> usize {
        self.shapes.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.read().is_empty()
    }
}
