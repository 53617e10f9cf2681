//! Read-only type descriptors, the input shape of the model builder.
//!
//! A descriptor is the structural summary a [`TypeDescriptorProvider`]
//! returns for one resolved name: the members and direct supertype
//! references of a class, interface, enum, or annotation. Descriptors are
//! created once per resolved name and never mutated.
//!
//! The serde shapes here double as the JSON schema format read by
//! [`SchemaProvider`].
//!
//! [`TypeDescriptorProvider`]: crate::provider::TypeDescriptorProvider
//! [`SchemaProvider`]: crate::provider::SchemaProvider

use serde::{Deserialize, Serialize};

use maquette_core::{Visibility, model::AnnotationMember, model::TypeKind, namespace_of, simple_name};

/// A declared field as the provider reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldDescriptor {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    /// The contained type for container-typed fields; absent means the
    /// declared type itself.
    #[serde(default)]
    element_type: Option<String>,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default)]
    container: bool,
    #[serde(default, rename = "final")]
    is_final: bool,
}

impl FieldDescriptor {
    /// Create a plain field descriptor.
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            element_type: None,
            visibility,
            container: false,
            is_final: false,
        }
    }

    /// Mark the field as container-typed with the given element type.
    pub fn with_element_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self.container = true;
        self
    }

    /// Mark the field's storage as non-reassignable.
    pub fn with_final_storage(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Get the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Get the element type: the contained type for containers, the
    /// declared type otherwise.
    pub fn element_type(&self) -> &str {
        self.element_type.as_deref().unwrap_or(&self.type_name)
    }

    /// Get the field's visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the declared type is a container. A field with a
    /// distinct element type is container-typed by definition.
    pub fn is_container(&self) -> bool {
        self.container || self.element_type.is_some()
    }

    /// Whether the storage is non-reassignable.
    pub fn is_final(&self) -> bool {
        self.is_final
    }
}

/// A declared method as the provider reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MethodDescriptor {
    name: String,
    #[serde(default = "void_type")]
    return_type: String,
    #[serde(default)]
    parameters: Vec<String>,
    #[serde(default)]
    visibility: Visibility,
}

fn void_type() -> String {
    "void".to_string()
}

impl MethodDescriptor {
    /// Create a method descriptor.
    pub fn new(
        name: impl Into<String>,
        return_type: impl Into<String>,
        parameters: Vec<String>,
        visibility: Visibility,
    ) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameters,
            visibility,
        }
    }

    /// Get the method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the return type name.
    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    /// Get the ordered parameter type names.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Get the method's visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

/// The read-only structural summary of one resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypeDescriptor {
    kind: TypeKind,
    name: String,
    #[serde(default)]
    modifiers: String,
    #[serde(default)]
    superclass: Option<String>,
    #[serde(default)]
    fields: Vec<FieldDescriptor>,
    #[serde(default)]
    methods: Vec<MethodDescriptor>,
    #[serde(default)]
    interfaces: Vec<String>,
    #[serde(default)]
    constants: Vec<String>,
    #[serde(default)]
    members: Vec<AnnotationMember>,
    #[serde(default = "class_retention")]
    retention: String,
    #[serde(default)]
    inherited: bool,
}

fn class_retention() -> String {
    "CLASS".to_string()
}

impl TypeDescriptor {
    /// Create a descriptor with no members; populate it with the
    /// `with_*` methods.
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: String::new(),
            superclass: None,
            fields: Vec::new(),
            methods: Vec::new(),
            interfaces: Vec::new(),
            constants: Vec::new(),
            members: Vec::new(),
            retention: class_retention(),
            inherited: false,
        }
    }

    /// Set the modifier string.
    pub fn with_modifiers(mut self, modifiers: impl Into<String>) -> Self {
        self.modifiers = modifiers.into();
        self
    }

    /// Set the direct superclass.
    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Append a field.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a method.
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Append a directly implemented (or extended) interface.
    pub fn with_interface(mut self, name: impl Into<String>) -> Self {
        self.interfaces.push(name.into());
        self
    }

    /// Set the enum constant names.
    pub fn with_constants(mut self, constants: Vec<String>) -> Self {
        self.constants = constants;
        self
    }

    /// Append an annotation member.
    pub fn with_member(mut self, member: AnnotationMember) -> Self {
        self.members.push(member);
        self
    }

    /// Get the kind of the described type.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Get the qualified name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the simple name.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// Get the namespace the type is declared in.
    pub fn namespace(&self) -> &str {
        namespace_of(&self.name)
    }

    /// Get the modifier string.
    pub fn modifiers(&self) -> &str {
        &self.modifiers
    }

    /// Get the direct superclass, if the provider reported one.
    pub fn superclass(&self) -> Option<&str> {
        self.superclass.as_deref()
    }

    /// Get the declared fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Get the declared methods in declaration order.
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Get the directly implemented interface names in declaration
    /// order.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Get the enum constant names.
    pub fn constants(&self) -> &[String] {
        &self.constants
    }

    /// Get the declared annotation members.
    pub fn members(&self) -> &[AnnotationMember] {
        &self.members
    }

    /// Get the annotation retention policy.
    pub fn retention(&self) -> &str {
        &self.retention
    }

    /// Whether the annotation is inherited by subclasses.
    pub fn inherited(&self) -> bool {
        self.inherited
    }
}
