//! The package tree: namespaces, their types, and the canonical traversal.
//!
//! [`PackageNode`] names are always fully qualified and dotted
//! (`org.mql.shop`); child nodes extend their parent's name by one
//! segment. The tree is mutated only through [`PackageTreeBuilder`] (or
//! the node's own `add_*` methods) during assembly and decoding, by a
//! single writer, and is read-only afterwards.

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::model::{ClassModel, TypeModel};

/// One namespace in the package tree.
///
/// Child packages and contained types keep insertion order, which is the
/// discovery order of the original scan. Renderers rely on that order for
/// stable diagram grouping.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PackageNode {
    name: String,
    children: Vec<PackageNode>,
    classes: Vec<ClassModel>,
    interfaces: Vec<crate::model::InterfaceModel>,
    enums: Vec<crate::model::EnumModel>,
    annotations: Vec<crate::model::AnnotationModel>,
}

impl PackageNode {
    /// Create an empty package with a qualified dotted name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Get the qualified package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the child packages in insertion order.
    pub fn children(&self) -> &[PackageNode] {
        &self.children
    }

    /// Get the classes declared directly in this package.
    pub fn classes(&self) -> &[ClassModel] {
        &self.classes
    }

    /// Get the interfaces declared directly in this package.
    pub fn interfaces(&self) -> &[crate::model::InterfaceModel] {
        &self.interfaces
    }

    /// Get the enums declared directly in this package.
    pub fn enums(&self) -> &[crate::model::EnumModel] {
        &self.enums
    }

    /// Get the annotations declared directly in this package.
    pub fn annotations(&self) -> &[crate::model::AnnotationModel] {
        &self.annotations
    }

    /// Whether `namespace` names this package or one nested under it.
    pub fn covers(&self, namespace: &str) -> bool {
        namespace == self.name
            || (!self.name.is_empty()
                && namespace.len() > self.name.len()
                && namespace.starts_with(&self.name)
                && namespace.as_bytes()[self.name.len()] == b'.')
    }

    /// Find or create the package named `namespace`, which must be this
    /// package or nested under it, creating intermediate packages one
    /// segment at a time.
    pub fn add_child_package(&mut self, namespace: &str) -> &mut PackageNode {
        if namespace == self.name {
            return self;
        }
        if !self.covers(namespace) {
            warn!(namespace, package = self.name; "namespace is not under this package");
            return self;
        }
        // Skip the parent name and the separating dot.
        let rest = &namespace[self.name.len() + 1..];
        let segment = rest.split('.').next().unwrap_or(rest);
        let child_name = format!("{}.{}", self.name, segment);
        let idx = match self.children.iter().position(|c| c.name == child_name) {
            Some(idx) => idx,
            None => {
                self.children.push(PackageNode::new(child_name));
                self.children.len() - 1
            }
        };
        self.children[idx].add_child_package(namespace)
    }

    /// Add a built type node under the package named `namespace`.
    ///
    /// The tagged union routes each kind into its own bucket, in
    /// insertion order.
    pub fn add_type(&mut self, namespace: &str, model: TypeModel) {
        let package = self.add_child_package(namespace);
        match model {
            TypeModel::Class(class) => package.classes.push(class),
            TypeModel::Interface(interface) => package.interfaces.push(interface),
            TypeModel::Enum(r#enum) => package.enums.push(r#enum),
            TypeModel::Annotation(annotation) => package.annotations.push(annotation),
        }
    }

    /// Depth-first pre-order traversal over this package and everything
    /// nested under it. The iterator is lazy and restartable: each call
    /// returns a fresh traversal.
    pub fn all_packages(&self) -> Packages<'_> {
        Packages { stack: vec![self] }
    }

    /// Map every namespace to the ordered list of classes declared
    /// directly in it, in traversal order. This is the renderer's
    /// consumption contract: one diagram per namespace.
    pub fn types_grouped_by_namespace(&self) -> IndexMap<String, Vec<&ClassModel>> {
        self.all_packages()
            .map(|package| (package.name.clone(), package.classes.iter().collect()))
            .collect()
    }
}

/// Depth-first pre-order iterator over a package tree.
#[derive(Debug)]
pub struct Packages<'a> {
    stack: Vec<&'a PackageNode>,
}

impl<'a> Iterator for Packages<'a> {
    type Item = &'a PackageNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reverse so the first child is visited first.
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Assembles package trees from `(namespace, type)` pairs in discovery
/// order.
///
/// The builder is passed by reference through a discovery pass instead of
/// accumulating into ambient state. A namespace that no existing root
/// covers starts a new root, so one builder can produce one tree per root
/// namespace.
#[derive(Debug, Default)]
pub struct PackageTreeBuilder {
    roots: Vec<PackageNode>,
}

impl PackageTreeBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a package exists for `namespace`, creating a new root if no
    /// existing root covers it, and return it mutably.
    pub fn add_package(&mut self, namespace: &str) -> &mut PackageNode {
        let idx = match self.roots.iter().position(|root| root.covers(namespace)) {
            Some(idx) => idx,
            None => {
                self.roots.push(PackageNode::new(namespace));
                self.roots.len() - 1
            }
        };
        self.roots[idx].add_child_package(namespace)
    }

    /// Add a built type node under `namespace`.
    pub fn add_type(&mut self, namespace: &str, model: TypeModel) {
        self.add_package(namespace);
        // The package now exists, so exactly one root covers it.
        if let Some(root) = self.roots.iter_mut().find(|root| root.covers(namespace)) {
            root.add_type(namespace, model);
        }
    }

    /// Finish assembly and hand over one tree per root namespace, in
    /// discovery order.
    pub fn finish(self) -> Vec<PackageNode> {
        self.roots
    }
}
