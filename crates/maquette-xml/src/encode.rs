//! Encoding of package trees into model documents.
//!
//! The encoder walks the tree depth-first, emitting each package's direct
//! members (classes, interfaces, enums, annotations, in that order)
//! before its child packages. Building the document string never fails;
//! only writing to an external sink can, with [`XmlError::Io`].

use std::io::Write;

use log::debug;

use maquette_core::{
    AssociationKind, ClassModel, PackageNode,
    model::{AnnotationModel, EnumModel, InterfaceModel},
};

use crate::{element::XmlElement, error::XmlError};

/// Serialize a package tree to an XML document string.
pub fn encode(root: &PackageNode) -> String {
    debug!(package = root.name(); "Encoding package tree");
    let mut project = XmlElement::new("project");
    project.push_child(package_element(root));
    project.to_xml()
}

/// Serialize a package tree into an arbitrary sink.
///
/// Fails only if the sink write fails.
pub fn encode_to_writer<W: Write>(root: &PackageNode, writer: &mut W) -> Result<(), XmlError> {
    writer.write_all(encode(root).as_bytes())?;
    Ok(())
}

fn package_element(package: &PackageNode) -> XmlElement {
    let mut element = XmlElement::new("package");
    element.push_attr("name", package.name());
    for class in package.classes() {
        element.push_child(class_element(class));
    }
    for interface in package.interfaces() {
        element.push_child(interface_element(interface));
    }
    for r#enum in package.enums() {
        element.push_child(enum_element(r#enum));
    }
    for annotation in package.annotations() {
        element.push_child(annotation_element(annotation));
    }
    for child in package.children() {
        element.push_child(package_element(child));
    }
    element
}

fn class_element(class: &ClassModel) -> XmlElement {
    let mut element = XmlElement::new("class");
    element.push_child(XmlElement::text_element("name", class.simple_name()));
    element.push_child(relationships_element(class));
    if !class.interfaces().is_empty() {
        element.push_child(implemented_interfaces_element(class));
    }
    element.push_child(fields_element(class.fields()));
    element.push_child(methods_element(class.methods()));
    element
}

fn relationships_element(class: &ClassModel) -> XmlElement {
    let mut element = XmlElement::new("relationships");
    if let Some(parent) = class.superclass() {
        element.push_child(XmlElement::text_element("parent", parent));
    }
    for assoc in class.associations_of(AssociationKind::Use) {
        let mut uses = XmlElement::new("uses");
        uses.push_attr("sourceClass", assoc.source_simple());
        uses.push_attr("targetClass", assoc.target_simple());
        element.push_child(uses);
    }
    for kind in [AssociationKind::Composition, AssociationKind::Aggregation] {
        for assoc in class.associations_of(kind) {
            let mut edge = XmlElement::new(match kind {
                AssociationKind::Composition => "composition",
                _ => "aggregation",
            });
            edge.push_attr("sourceClass", assoc.source_simple());
            edge.push_attr("targetClass", assoc.target_simple());
            if let Some(multiplicity) = assoc.multiplicity() {
                edge.push_attr("upperBound", multiplicity.as_str());
            }
            element.push_child(edge);
        }
    }
    element
}

fn implemented_interfaces_element(class: &ClassModel) -> XmlElement {
    let mut element = XmlElement::new("implementedInterfaces");
    for interface in class.interfaces() {
        let mut entry = XmlElement::new("interface");
        entry.push_attr("name", interface.simple_name());
        element.push_child(entry);
    }
    element
}

fn fields_element(fields: &[maquette_core::Field]) -> XmlElement {
    let mut element = XmlElement::new("fields");
    for field in fields {
        let mut entry = XmlElement::new("field");
        entry.push_child(XmlElement::text_element("name", field.name()));
        entry.push_child(XmlElement::text_element("type", field.type_name()));
        entry.push_child(XmlElement::text_element(
            "modifier",
            field.visibility().marker().to_string(),
        ));
        element.push_child(entry);
    }
    element
}

fn methods_element(methods: &[maquette_core::Method]) -> XmlElement {
    let mut element = XmlElement::new("methods");
    for method in methods {
        let mut entry = XmlElement::new("method");
        entry.push_child(XmlElement::text_element("name", method.name()));
        entry.push_child(XmlElement::text_element("returnType", method.return_type()));
        entry.push_child(XmlElement::text_element(
            "modifier",
            method.visibility().marker().to_string(),
        ));
        element.push_child(entry);
    }
    element
}

fn interface_element(interface: &InterfaceModel) -> XmlElement {
    let mut element = XmlElement::new("interface");
    element.push_child(XmlElement::text_element(
        "simpleName",
        interface.simple_name(),
    ));
    element.push_child(XmlElement::text_element("name", interface.qualified_name()));
    element.push_child(XmlElement::text_element("modifiers", interface.modifiers()));
    if let Some(extends) = interface.extends() {
        element.push_child(XmlElement::text_element("extendedClass", extends));
    }
    element.push_child(fields_element(interface.fields()));
    element.push_child(methods_element(interface.methods()));
    element
}

fn enum_element(r#enum: &EnumModel) -> XmlElement {
    let mut element = XmlElement::new("enum");
    element.push_child(XmlElement::text_element("name", r#enum.simple_name()));
    let mut constants = XmlElement::new("constants");
    for constant in r#enum.constants() {
        constants.push_child(XmlElement::text_element("constant", constant));
    }
    element.push_child(constants);
    element
}

fn annotation_element(annotation: &AnnotationModel) -> XmlElement {
    let mut element = XmlElement::new("annotation");
    element.push_child(XmlElement::text_element("name", annotation.simple_name()));
    element.push_child(XmlElement::text_element(
        "retentionPolicy",
        annotation.retention(),
    ));
    element.push_child(XmlElement::text_element(
        "inherited",
        annotation.inherited().to_string(),
    ));
    let mut members = XmlElement::new("members");
    for member in annotation.members() {
        let mut entry = XmlElement::new("member");
        entry.push_child(XmlElement::text_element("name", member.name()));
        entry.push_child(XmlElement::text_element("type", member.type_name()));
        members.push_child(entry);
    }
    element.push_child(members);
    element
}
