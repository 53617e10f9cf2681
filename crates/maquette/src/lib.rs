//! Maquette - a structural type-introspection engine.
//!
//! Resolving, classification, and document round-tripping for structural
//! type models. Type descriptors are resolved through a provider, built
//! into class, interface, enum, and annotation nodes with classified
//! associations, grouped into a package tree, and serialized to a
//! hierarchical XML document.

pub mod config;
pub mod descriptor;
pub mod policy;
pub mod provider;

mod builder;
mod classify;
mod error;

pub use maquette_core::{association, member, model, package};
pub use maquette_xml;

pub use builder::ModelBuilder;
pub use error::MaquetteError;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use maquette_core::package::{PackageNode, PackageTreeBuilder};

use config::AppConfig;
use provider::TypeDescriptorProvider;

/// Facade for building, encoding, and decoding type models.
///
/// This provides an API for processing types through the resolution,
/// classification, and serialization stages.
///
/// # Examples
///
/// ```rust,no_run
/// use maquette::{Maquette, config::AppConfig, provider::SchemaProvider};
///
/// let schema = r#"{"types": [{"kind": "class", "name": "org.mql.shop.Order"}]}"#;
/// let provider = SchemaProvider::from_json(schema).expect("Failed to parse schema");
///
/// // With custom config
/// let config = AppConfig::default();
/// let engine = Maquette::new(config);
///
/// // Build the package tree for a set of types
/// let roots = engine.build_model(&provider, ["org.mql.shop.Order"])
///     .expect("Failed to build");
///
/// // Serialize each root package to a document
/// for root in &roots {
///     let xml = engine.encode_xml(root);
/// }
///
/// // Or use default config
/// let engine = Maquette::default();
/// ```
#[derive(Default)]
pub struct Maquette {
    config: AppConfig,
}

impl Maquette {
    /// Create a new engine with the given configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use maquette::{Maquette, config::AppConfig};
    ///
    /// let config = AppConfig::default();
    /// let engine = Maquette::new(config);
    /// ```
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Build the package tree covering the given qualified type names.
    ///
    /// Each name is resolved through the provider, built into a type-model
    /// node, and placed into the package matching its namespace. Names
    /// the provider cannot resolve are skipped with a warning so one
    /// missing type does not sink the batch. Names are processed in
    /// iteration order, which fixes both package-tree order and the
    /// order of types within a package.
    ///
    /// Returns one root node per top-level namespace encountered.
    ///
    /// # Errors
    ///
    /// Returns `MaquetteError` when every requested name failed to
    /// resolve, since an empty model is never what the caller wanted.
    pub fn build_model<I, S>(
        &self,
        provider: &dyn TypeDescriptorProvider,
        names: I,
    ) -> Result<Vec<PackageNode>, MaquetteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        info!("Building type model");

        let builder = ModelBuilder::new(self.config.policy());
        let mut tree = PackageTreeBuilder::new();
        let mut requested = 0usize;
        let mut built = 0usize;

        for name in names {
            let name = name.as_ref();
            requested += 1;
            match builder.build(provider, name) {
                Ok(model) => {
                    let namespace = maquette_core::namespace_of(name).to_string();
                    tree.add_type(&namespace, model);
                    built += 1;
                }
                Err(MaquetteError::UnresolvedType { .. }) => {
                    warn!(name; "Skipping unresolvable type");
                }
                Err(err) => return Err(err),
            }
        }

        if built == 0 && requested > 0 {
            return Err(MaquetteError::unresolved("all requested types"));
        }

        debug!(requested, built; "Type model built");
        Ok(tree.finish())
    }

    /// Serialize one root package to an XML document string.
    pub fn encode_xml(&self, root: &PackageNode) -> String {
        maquette_xml::encode(root)
    }

    /// Serialize one root package to a file under `out_dir`.
    ///
    /// The artifact is named after the root namespace, so the tree rooted
    /// at `org.mql.shop` lands in `<out_dir>/org.mql.shop.xml`. The
    /// directory is created
    /// when missing. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns `MaquetteError` when the directory or file cannot be
    /// written.
    pub fn write_xml(&self, root: &PackageNode, out_dir: &Path) -> Result<PathBuf, MaquetteError> {
        fs::create_dir_all(out_dir)?;
        let path = out_dir.join(format!("{}.xml", root.name()));
        let mut file = fs::File::create(&path)?;
        maquette_xml::encode_to_writer(root, &mut file)?;
        info!(path:?; "Wrote model document");
        Ok(path)
    }

    /// Parse an XML document string back into a root package.
    ///
    /// The decoded tree carries what the document carries; see the codec
    /// crate for what the format does not preserve.
    ///
    /// # Errors
    ///
    /// Returns `MaquetteError` for malformed documents or unknown
    /// elements.
    pub fn decode_xml(&self, input: &str) -> Result<PackageNode, MaquetteError> {
        Ok(maquette_xml::decode(input)?)
    }

    /// Read and parse an XML document file back into a root package.
    ///
    /// # Errors
    ///
    /// Returns `MaquetteError` when the file cannot be read or does not
    /// parse.
    pub fn read_xml(&self, path: &Path) -> Result<PackageNode, MaquetteError> {
        let input = fs::read_to_string(path)?;
        self.decode_xml(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use provider::SchemaProvider;

    #[test]
    fn build_model_skips_unresolvable_names() {
        let provider = SchemaProvider::from_json(
            r#"{"types": [{"kind": "class", "name": "a.b.Widget"}]}"#,
        )
        .expect("schema should parse");
        let engine = Maquette::default();

        let roots = engine
            .build_model(&provider, ["a.b.Widget", "a.b.Missing"])
            .expect("one resolvable type is enough");
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name(), "a.b");
    }

    #[test]
    fn build_model_with_no_resolvable_names_is_an_error() {
        let provider =
            SchemaProvider::from_json(r#"{"types": []}"#).expect("schema should parse");
        let engine = Maquette::default();

        assert!(engine.build_model(&provider, ["a.Ghost"]).is_err());
    }
}
