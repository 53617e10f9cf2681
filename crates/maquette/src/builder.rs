//! The model builder: descriptors in, populated type-model nodes out.

use log::{debug, trace};

use maquette_core::{
    Field, Method, TypeModel,
    model::{AnnotationModel, ClassModel, EnumModel, InterfaceModel, TypeKind},
};

use crate::{
    classify::classify,
    descriptor::{FieldDescriptor, MethodDescriptor, TypeDescriptor},
    error::MaquetteError,
    policy::TypePolicy,
    provider::TypeDescriptorProvider,
};

/// Builds one type-model node from one descriptor.
///
/// Building is deterministic and side-effect-free except for provider
/// lookups of supertypes and interfaces, which are named but never
/// recursively built. A member whose type cannot be classified is
/// treated as non-user-defined; only a missing root descriptor fails.
pub struct ModelBuilder<'a> {
    policy: &'a TypePolicy,
}

impl<'a> ModelBuilder<'a> {
    /// Create a builder using the given classification policy.
    pub fn new(policy: &'a TypePolicy) -> Self {
        Self { policy }
    }

    /// Resolve `qualified_name` through the provider and build its node.
    ///
    /// # Errors
    ///
    /// Propagates [`MaquetteError::UnresolvedType`] when the provider
    /// cannot resolve the name itself.
    pub fn build(
        &self,
        provider: &dyn TypeDescriptorProvider,
        qualified_name: &str,
    ) -> Result<TypeModel, MaquetteError> {
        let descriptor = provider.describe(qualified_name)?;
        Ok(self.build_descriptor(provider, &descriptor))
    }

    /// Build the node for an already-resolved descriptor.
    pub fn build_descriptor(
        &self,
        provider: &dyn TypeDescriptorProvider,
        descriptor: &TypeDescriptor,
    ) -> TypeModel {
        trace!(name = descriptor.name(), kind:? = descriptor.kind(); "Building type model");
        match descriptor.kind() {
            TypeKind::Class => TypeModel::Class(self.build_class(provider, descriptor)),
            TypeKind::Interface => TypeModel::Interface(self.build_interface(descriptor)),
            TypeKind::Enum => TypeModel::Enum(EnumModel::new(
                descriptor.name(),
                descriptor.constants().to_vec(),
            )),
            TypeKind::Annotation => TypeModel::Annotation(AnnotationModel::new(
                descriptor.name(),
                descriptor.retention(),
                descriptor.inherited(),
                descriptor.members().to_vec(),
            )),
        }
    }

    fn build_class(
        &self,
        provider: &dyn TypeDescriptorProvider,
        descriptor: &TypeDescriptor,
    ) -> ClassModel {
        let fields: Vec<Field> = descriptor.fields().iter().map(|f| self.build_field(f)).collect();
        let methods: Vec<Method> = descriptor.methods().iter().map(build_method).collect();

        // Interface entries are fully populated when the provider can
        // resolve them and degrade to name-only placeholders when it
        // cannot.
        let interfaces = descriptor
            .interfaces()
            .iter()
            .map(|name| match provider.describe(name) {
                Ok(iface) if iface.kind() == TypeKind::Interface => self.build_interface(&iface),
                _ => {
                    debug!(interface = name.as_str(), class = descriptor.name();
                        "Interface not resolvable, keeping name only");
                    InterfaceModel::named(name)
                }
            })
            .collect();

        let associations = classify(descriptor, &fields, self.policy);
        let superclass = descriptor
            .superclass()
            .filter(|name| !self.policy.is_root(name))
            .map(str::to_string);

        ClassModel::new(
            descriptor.name(),
            descriptor.modifiers(),
            superclass,
            fields,
            methods,
            interfaces,
            associations,
        )
    }

    fn build_interface(&self, descriptor: &TypeDescriptor) -> InterfaceModel {
        let extends = descriptor
            .superclass()
            .filter(|name| !self.policy.is_root(name))
            .map(str::to_string);
        InterfaceModel::new(
            descriptor.name(),
            descriptor.modifiers(),
            extends,
            descriptor.fields().iter().map(|f| self.build_field(f)).collect(),
            descriptor.methods().iter().map(build_method).collect(),
        )
    }

    fn build_field(&self, descriptor: &FieldDescriptor) -> Field {
        Field::new(
            descriptor.name(),
            descriptor.element_type(),
            descriptor.visibility(),
            descriptor.is_container(),
            self.policy.is_user_defined(descriptor.element_type()),
            descriptor.is_final(),
        )
    }
}

fn build_method(descriptor: &MethodDescriptor) -> Method {
    Method::new(
        descriptor.name(),
        descriptor.return_type(),
        descriptor.parameters().to_vec(),
        descriptor.visibility(),
    )
}
