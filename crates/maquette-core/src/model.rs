//! Built type-model nodes: the tagged union over class, interface, enum,
//! and annotation shapes.
//!
//! A node is populated once, either by the model builder (from a resolved
//! descriptor) or by the decoder (from a document), and read-only after
//! that. The union is closed so every consumption site handles all four
//! kinds exhaustively.

use serde::{Deserialize, Serialize};

use crate::{
    association::{Association, AssociationKind},
    member::{Field, Method},
    simple_name,
};

/// The kind of a type node, also the element name used in documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl TypeKind {
    /// The element name for this kind (`class`, `interface`, `enum`,
    /// `annotation`).
    pub fn element_name(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Annotation => "annotation",
        }
    }
}

/// A fully populated class node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClassModel {
    simple_name: String,
    qualified_name: String,
    modifiers: String,
    superclass: Option<String>,
    fields: Vec<Field>,
    methods: Vec<Method>,
    interfaces: Vec<InterfaceModel>,
    associations: Vec<Association>,
}

impl ClassModel {
    /// Create a class node from its members and classified associations.
    pub fn new(
        qualified_name: impl Into<String>,
        modifiers: impl Into<String>,
        superclass: Option<String>,
        fields: Vec<Field>,
        methods: Vec<Method>,
        interfaces: Vec<InterfaceModel>,
        associations: Vec<Association>,
    ) -> Self {
        let qualified_name = qualified_name.into();
        let simple_name = simple_name(&qualified_name).to_string();
        Self {
            simple_name,
            qualified_name,
            modifiers: modifiers.into(),
            superclass,
            fields,
            methods,
            interfaces,
            associations,
        }
    }

    /// Get the simple class name.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// Get the qualified class name.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Get the modifier string (`public abstract`, ...).
    pub fn modifiers(&self) -> &str {
        &self.modifiers
    }

    /// Get the qualified superclass name, if the class extends one other
    /// than the universal root type.
    pub fn superclass(&self) -> Option<&str> {
        self.superclass.as_deref()
    }

    /// Get the declared fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Get the declared methods in declaration order.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Get the directly implemented interfaces.
    ///
    /// After a round trip through the document format these are
    /// name-only placeholders; member lists are not re-derived.
    pub fn interfaces(&self) -> &[InterfaceModel] {
        &self.interfaces
    }

    /// Get all associations in classification order.
    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    /// Iterate the associations of one kind, preserving order.
    pub fn associations_of(
        &self,
        kind: AssociationKind,
    ) -> impl Iterator<Item = &Association> {
        self.associations.iter().filter(move |a| a.kind() == kind)
    }
}

/// A fully populated interface node.
///
/// Interfaces extending another interface record it as `extends`; the
/// placeholder form (name only) is what interface entries on a class
/// degrade to when the interface itself cannot be resolved, and what the
/// decoder reconstructs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InterfaceModel {
    simple_name: String,
    qualified_name: String,
    modifiers: String,
    extends: Option<String>,
    fields: Vec<Field>,
    methods: Vec<Method>,
}

impl InterfaceModel {
    /// Create an interface node from its members.
    pub fn new(
        qualified_name: impl Into<String>,
        modifiers: impl Into<String>,
        extends: Option<String>,
        fields: Vec<Field>,
        methods: Vec<Method>,
    ) -> Self {
        let qualified_name = qualified_name.into();
        let simple_name = simple_name(&qualified_name).to_string();
        Self {
            simple_name,
            qualified_name,
            modifiers: modifiers.into(),
            extends,
            fields,
            methods,
        }
    }

    /// Create a name-only placeholder with no members.
    pub fn named(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, "", None, Vec::new(), Vec::new())
    }

    /// Get the simple interface name.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// Get the qualified interface name.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Get the modifier string.
    pub fn modifiers(&self) -> &str {
        &self.modifiers
    }

    /// Get the extended interface's qualified name, if any.
    pub fn extends(&self) -> Option<&str> {
        self.extends.as_deref()
    }

    /// Get the declared fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Get the declared methods in declaration order.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }
}

/// An enumeration node: its name and ordered constant names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnumModel {
    simple_name: String,
    qualified_name: String,
    constants: Vec<String>,
}

impl EnumModel {
    /// Create an enum node from its constant names.
    pub fn new(qualified_name: impl Into<String>, constants: Vec<String>) -> Self {
        let qualified_name = qualified_name.into();
        let simple_name = simple_name(&qualified_name).to_string();
        Self {
            simple_name,
            qualified_name,
            constants,
        }
    }

    /// Get the simple enum name.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// Get the qualified enum name.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Get the constant names in declaration order.
    pub fn constants(&self) -> &[String] {
        &self.constants
    }
}

/// A declared member of an annotation: its name and return type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnnotationMember {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

impl AnnotationMember {
    /// Create an annotation member.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Get the member name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the member's type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// An annotation node: retention policy, inheritance flag, and declared
/// members.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnnotationModel {
    simple_name: String,
    qualified_name: String,
    retention: String,
    inherited: bool,
    members: Vec<AnnotationMember>,
}

impl AnnotationModel {
    /// Create an annotation node.
    pub fn new(
        qualified_name: impl Into<String>,
        retention: impl Into<String>,
        inherited: bool,
        members: Vec<AnnotationMember>,
    ) -> Self {
        let qualified_name = qualified_name.into();
        let simple_name = simple_name(&qualified_name).to_string();
        Self {
            simple_name,
            qualified_name,
            retention: retention.into(),
            inherited,
            members,
        }
    }

    /// Get the simple annotation name.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// Get the qualified annotation name.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Get the retention policy string.
    pub fn retention(&self) -> &str {
        &self.retention
    }

    /// Whether the annotation is inherited by subclasses.
    pub fn inherited(&self) -> bool {
        self.inherited
    }

    /// Get the declared members in declaration order.
    pub fn members(&self) -> &[AnnotationMember] {
        &self.members
    }
}

/// A built type-model node of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum TypeModel {
    Class(ClassModel),
    Interface(InterfaceModel),
    Enum(EnumModel),
    Annotation(AnnotationModel),
}

impl TypeModel {
    /// Get the kind tag of this node.
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeModel::Class(_) => TypeKind::Class,
            TypeModel::Interface(_) => TypeKind::Interface,
            TypeModel::Enum(_) => TypeKind::Enum,
            TypeModel::Annotation(_) => TypeKind::Annotation,
        }
    }

    /// Get the qualified name of this node.
    pub fn qualified_name(&self) -> &str {
        match self {
            TypeModel::Class(c) => c.qualified_name(),
            TypeModel::Interface(i) => i.qualified_name(),
            TypeModel::Enum(e) => e.qualified_name(),
            TypeModel::Annotation(a) => a.qualified_name(),
        }
    }

    /// Get the simple name of this node.
    pub fn simple_name(&self) -> &str {
        match self {
            TypeModel::Class(c) => c.simple_name(),
            TypeModel::Interface(i) => i.simple_name(),
            TypeModel::Enum(e) => e.simple_name(),
            TypeModel::Annotation(a) => a.simple_name(),
        }
    }
}
