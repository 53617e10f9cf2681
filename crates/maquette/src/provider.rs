//! The provider boundary: resolving qualified names to descriptors.
//!
//! Resolution is where external latency lives (classpath or filesystem
//! access, depending on the implementation); everything downstream of
//! the provider is a pure transformation. Implementations vary per
//! target: build-time code generation, a language's reflection facility,
//! or an explicit schema. This module ships the schema-backed provider
//! and a memoizing adapter.

use std::{cell::RefCell, collections::HashMap, fs, io::Read, path::Path, sync::Arc};

use log::{debug, trace};
use serde::Deserialize;

use crate::{descriptor::TypeDescriptor, error::MaquetteError};

/// Resolves fully-qualified type names to read-only descriptors.
pub trait TypeDescriptorProvider {
    /// Look up the descriptor for a qualified name.
    ///
    /// # Errors
    ///
    /// Returns [`MaquetteError::UnresolvedType`] if the name cannot be
    /// resolved.
    fn describe(&self, qualified_name: &str) -> Result<Arc<TypeDescriptor>, MaquetteError>;
}

/// A memoizing adapter over any provider.
///
/// Lookups hitting the cache never reach the inner provider. Failed
/// lookups are not cached, so a provider that becomes able to resolve a
/// name later is consulted again. Single-threaded by design, like the
/// rest of the build pipeline.
pub struct MemoProvider<P> {
    inner: P,
    cache: RefCell<HashMap<String, Arc<TypeDescriptor>>>,
}

impl<P> MemoProvider<P> {
    /// Wrap a provider with a memo cache.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }
}

impl<P: TypeDescriptorProvider> TypeDescriptorProvider for MemoProvider<P> {
    fn describe(&self, qualified_name: &str) -> Result<Arc<TypeDescriptor>, MaquetteError> {
        if let Some(hit) = self.cache.borrow().get(qualified_name) {
            trace!(name = qualified_name; "Descriptor cache hit");
            return Ok(Arc::clone(hit));
        }
        let descriptor = self.inner.describe(qualified_name)?;
        self.cache
            .borrow_mut()
            .insert(qualified_name.to_string(), Arc::clone(&descriptor));
        Ok(descriptor)
    }
}

#[derive(Debug, Deserialize)]
struct Schema {
    #[serde(default)]
    types: Vec<TypeDescriptor>,
}

/// A provider backed by an explicit JSON schema of descriptors.
///
/// The schema is a document of the form
/// `{"types": [{"kind": "class", "name": "org.mql.shop.Order", ...}]}`;
/// see [`TypeDescriptor`](crate::descriptor::TypeDescriptor) for the
/// entry shape. Declaration order is preserved and exposed through
/// [`names`](SchemaProvider::names) as the discovery order.
pub struct SchemaProvider {
    order: Vec<String>,
    types: HashMap<String, Arc<TypeDescriptor>>,
}

impl SchemaProvider {
    /// Load a schema from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, MaquetteError> {
        let schema: Schema = serde_json::from_str(json).map_err(|err| MaquetteError::Schema {
            message: err.to_string(),
        })?;
        Ok(Self::from_schema(schema))
    }

    /// Load a schema from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, MaquetteError> {
        let schema: Schema =
            serde_json::from_reader(reader).map_err(|err| MaquetteError::Schema {
                message: err.to_string(),
            })?;
        Ok(Self::from_schema(schema))
    }

    /// Load a schema file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MaquetteError> {
        let path = path.as_ref();
        debug!(path = path.display().to_string(); "Loading descriptor schema");
        let file = fs::File::open(path)?;
        Self::from_reader(file)
    }

    fn from_schema(schema: Schema) -> Self {
        let mut order = Vec::with_capacity(schema.types.len());
        let mut types = HashMap::with_capacity(schema.types.len());
        for descriptor in schema.types {
            order.push(descriptor.name().to_string());
            types.insert(descriptor.name().to_string(), Arc::new(descriptor));
        }
        Self { order, types }
    }

    /// The qualified names in the schema, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl TypeDescriptorProvider for SchemaProvider {
    fn describe(&self, qualified_name: &str) -> Result<Arc<TypeDescriptor>, MaquetteError> {
        self.types
            .get(qualified_name)
            .map(Arc::clone)
            .ok_or_else(|| MaquetteError::unresolved(qualified_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"{
        "types": [
            {"kind": "class", "name": "a.B"},
            {"kind": "enum", "name": "a.C", "constants": ["X"]}
        ]
    }"#;

    #[test]
    fn schema_provider_resolves_declared_names_in_order() {
        let provider = SchemaProvider::from_json(SCHEMA).expect("schema should parse");
        assert_eq!(provider.names().collect::<Vec<_>>(), ["a.B", "a.C"]);
        assert!(provider.describe("a.B").is_ok());
        assert!(matches!(
            provider.describe("a.Missing"),
            Err(MaquetteError::UnresolvedType { .. })
        ));
    }

    #[test]
    fn invalid_schema_reports_schema_error() {
        assert!(matches!(
            SchemaProvider::from_json("{\"types\": [{\"name\": \"x\"}]}"),
            Err(MaquetteError::Schema { .. })
        ));
    }

    #[test]
    fn memo_provider_consults_inner_once_per_name() {
        struct Counting {
            inner: SchemaProvider,
            calls: RefCell<usize>,
        }
        impl TypeDescriptorProvider for Counting {
            fn describe(&self, name: &str) -> Result<Arc<TypeDescriptor>, MaquetteError> {
                *self.calls.borrow_mut() += 1;
                self.inner.describe(name)
            }
        }

        let counting = Counting {
            inner: SchemaProvider::from_json(SCHEMA).expect("schema should parse"),
            calls: RefCell::new(0),
        };
        let memo = MemoProvider::new(counting);
        memo.describe("a.B").expect("first lookup");
        memo.describe("a.B").expect("cached lookup");
        assert_eq!(*memo.inner.calls.borrow(), 1);
    }
}
