//! Decoding of model documents back into package trees.
//!
//! Decoding is recursive descent over `package` elements. It builds into
//! a fresh [`PackageTreeBuilder`] and hands the tree to the caller only
//! when the whole document decoded, so a failure never leaves a partially
//! mutated tree behind.
//!
//! The format is lossy by design, and decoding does not pretend
//! otherwise: implemented interfaces come back as name-only placeholders,
//! decoded fields lose their finality/user-defined flags, methods lose
//! their parameter lists, and edge endpoints are the simple names written
//! in the document. Associations are reassembled from the
//! `relationships` element, never re-derived from members.

use std::collections::HashMap;

use log::debug;

use maquette_core::{
    Association, AssociationKind, ClassModel, Field, Method, Multiplicity, PackageNode,
    PackageTreeBuilder, TypeModel, Visibility,
    model::{AnnotationMember, AnnotationModel, EnumModel, InterfaceModel},
};

use crate::{element::XmlElement, error::XmlError, reader};

/// Parse a document into the package tree it describes.
///
/// The root element must be `project` with exactly one root namespace
/// below it.
pub fn decode(input: &str) -> Result<PackageNode, XmlError> {
    let root = reader::parse_document(input)?;
    if root.name() != "project" {
        return Err(XmlError::unknown_element(root.name(), "document"));
    }

    let mut builder = PackageTreeBuilder::new();
    for (path, child) in indexed_children(&root, "project") {
        if child.name() != "package" {
            return Err(XmlError::unknown_element(child.name(), "project"));
        }
        decode_package(child, &path, &mut builder)?;
    }

    let mut roots = builder.finish();
    match roots.len() {
        1 => {
            let root = roots.remove(0);
            debug!(package = root.name(); "Decoded package tree");
            Ok(root)
        }
        0 => Err(XmlError::malformed(
            "project",
            "document contains no package element",
        )),
        count => Err(XmlError::malformed(
            "project",
            format!("expected one root namespace, found {count}"),
        )),
    }
}

/// Pair each child element with its path, indexing siblings per tag name.
fn indexed_children<'a>(
    element: &'a XmlElement,
    path: &str,
) -> Vec<(String, &'a XmlElement)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    element
        .children()
        .iter()
        .map(|child| {
            let index = counts.entry(child.name()).or_default();
            let child_path = format!("{path}/{}[{index}]", child.name());
            *index += 1;
            (child_path, child)
        })
        .collect()
}

fn decode_package(
    element: &XmlElement,
    path: &str,
    builder: &mut PackageTreeBuilder,
) -> Result<(), XmlError> {
    let namespace = element
        .attr("name")
        .ok_or_else(|| XmlError::malformed(path, "missing `name` attribute"))?
        .to_string();
    builder.add_package(&namespace);

    for (child_path, child) in indexed_children(element, path) {
        match child.name() {
            "class" => {
                let class = decode_class(child, &namespace, &child_path)?;
                builder.add_type(&namespace, TypeModel::Class(class));
            }
            "interface" => {
                let interface = decode_interface(child, &child_path)?;
                builder.add_type(&namespace, TypeModel::Interface(interface));
            }
            "enum" => {
                let decoded = decode_enum(child, &namespace, &child_path)?;
                builder.add_type(&namespace, TypeModel::Enum(decoded));
            }
            "annotation" => {
                let annotation = decode_annotation(child, &namespace, &child_path)?;
                builder.add_type(&namespace, TypeModel::Annotation(annotation));
            }
            "package" => decode_package(child, &child_path, builder)?,
            tag => return Err(XmlError::unknown_element(tag, path)),
        }
    }
    Ok(())
}

/// Reject children outside the schema for this element.
fn reject_unknown(
    element: &XmlElement,
    allowed: &[&str],
    path: &str,
) -> Result<(), XmlError> {
    for child in element.children() {
        if !allowed.contains(&child.name()) {
            return Err(XmlError::unknown_element(child.name(), path));
        }
    }
    Ok(())
}

fn decode_class(
    element: &XmlElement,
    namespace: &str,
    path: &str,
) -> Result<ClassModel, XmlError> {
    reject_unknown(
        element,
        &[
            "name",
            "relationships",
            "implementedInterfaces",
            "fields",
            "methods",
        ],
        path,
    )?;
    let simple = required_text(element, "name", path)?;
    let qualified = qualify(namespace, &simple);

    let mut superclass = None;
    let mut uses = Vec::new();
    let mut compositions = Vec::new();
    let mut aggregations = Vec::new();
    if let Some(relationships) = element.child("relationships") {
        let rel_path = format!("{path}/relationships");
        for (edge_path, edge) in indexed_children(relationships, &rel_path) {
            match edge.name() {
                "parent" => superclass = Some(edge.text().to_string()),
                "uses" => uses.push(decode_edge(edge, AssociationKind::Use, &edge_path)?),
                "composition" => compositions.push(decode_edge(
                    edge,
                    AssociationKind::Composition,
                    &edge_path,
                )?),
                "aggregation" => aggregations.push(decode_edge(
                    edge,
                    AssociationKind::Aggregation,
                    &edge_path,
                )?),
                tag => return Err(XmlError::unknown_element(tag, &rel_path)),
            }
        }
    }

    let mut interfaces = Vec::new();
    if let Some(implemented) = element.child("implementedInterfaces") {
        let impl_path = format!("{path}/implementedInterfaces");
        for (entry_path, entry) in indexed_children(implemented, &impl_path) {
            if entry.name() != "interface" {
                return Err(XmlError::unknown_element(entry.name(), &impl_path));
            }
            let name = entry
                .attr("name")
                .ok_or_else(|| XmlError::malformed(&entry_path, "missing `name` attribute"))?;
            interfaces.push(InterfaceModel::named(name));
        }
    }

    // Reassemble associations in classification order.
    let mut associations = Vec::new();
    if let Some(parent) = &superclass {
        associations.push(Association::new(
            AssociationKind::Inheritance,
            qualified.clone(),
            parent.clone(),
        ));
    }
    for interface in &interfaces {
        associations.push(Association::new(
            AssociationKind::Implementation,
            qualified.clone(),
            interface.qualified_name(),
        ));
    }
    associations.extend(compositions);
    associations.extend(aggregations);
    associations.extend(uses);

    let fields = decode_fields(element, path)?;
    let methods = decode_methods(element, path)?;
    Ok(ClassModel::new(
        qualified,
        "",
        superclass,
        fields,
        methods,
        interfaces,
        associations,
    ))
}

fn decode_edge(
    element: &XmlElement,
    kind: AssociationKind,
    path: &str,
) -> Result<Association, XmlError> {
    let source = required_attr(element, "sourceClass", path)?;
    let target = required_attr(element, "targetClass", path)?;
    let mut assoc = Association::new(kind, source, target);
    if matches!(
        kind,
        AssociationKind::Composition | AssociationKind::Aggregation
    ) {
        let bound = required_attr(element, "upperBound", path)?;
        let multiplicity: Multiplicity = bound.parse().map_err(|_| {
            XmlError::malformed(path, format!("invalid upper bound `{bound}`"))
        })?;
        assoc = assoc.with_multiplicity(multiplicity);
    }
    Ok(assoc)
}

fn decode_fields(element: &XmlElement, path: &str) -> Result<Vec<Field>, XmlError> {
    let Some(container) = element.child("fields") else {
        return Ok(Vec::new());
    };
    let container_path = format!("{path}/fields");
    let mut fields = Vec::new();
    for (entry_path, entry) in indexed_children(container, &container_path) {
        if entry.name() != "field" {
            return Err(XmlError::unknown_element(entry.name(), &container_path));
        }
        let name = required_text(entry, "name", &entry_path)?;
        let type_name = required_text(entry, "type", &entry_path)?;
        let visibility = decode_visibility(entry, &entry_path)?;
        // Finality, container-ness, and user-defined-ness are not in the
        // schema; decoded fields carry the safe defaults.
        fields.push(Field::new(name, type_name, visibility, false, false, false));
    }
    Ok(fields)
}

fn decode_methods(element: &XmlElement, path: &str) -> Result<Vec<Method>, XmlError> {
    let Some(container) = element.child("methods") else {
        return Ok(Vec::new());
    };
    let container_path = format!("{path}/methods");
    let mut methods = Vec::new();
    for (entry_path, entry) in indexed_children(container, &container_path) {
        if entry.name() != "method" {
            return Err(XmlError::unknown_element(entry.name(), &container_path));
        }
        let name = required_text(entry, "name", &entry_path)?;
        let return_type = required_text(entry, "returnType", &entry_path)?;
        let visibility = decode_visibility(entry, &entry_path)?;
        methods.push(Method::new(name, return_type, Vec::new(), visibility));
    }
    Ok(methods)
}

fn decode_interface(element: &XmlElement, path: &str) -> Result<InterfaceModel, XmlError> {
    reject_unknown(
        element,
        &[
            "simpleName",
            "name",
            "modifiers",
            "extendedClass",
            "fields",
            "methods",
        ],
        path,
    )?;
    let qualified = required_text(element, "name", path)?;
    let modifiers = optional_text(element, "modifiers").unwrap_or_default();
    let extends = optional_text(element, "extendedClass");
    let fields = decode_fields(element, path)?;
    let methods = decode_methods(element, path)?;
    Ok(InterfaceModel::new(
        qualified, modifiers, extends, fields, methods,
    ))
}

fn decode_enum(
    element: &XmlElement,
    namespace: &str,
    path: &str,
) -> Result<EnumModel, XmlError> {
    reject_unknown(element, &["name", "constants"], path)?;
    let simple = required_text(element, "name", path)?;
    let mut constants = Vec::new();
    if let Some(container) = element.child("constants") {
        let container_path = format!("{path}/constants");
        for (_, entry) in indexed_children(container, &container_path) {
            if entry.name() != "constant" {
                return Err(XmlError::unknown_element(entry.name(), &container_path));
            }
            constants.push(entry.text().to_string());
        }
    }
    Ok(EnumModel::new(qualify(namespace, &simple), constants))
}

fn decode_annotation(
    element: &XmlElement,
    namespace: &str,
    path: &str,
) -> Result<AnnotationModel, XmlError> {
    reject_unknown(
        element,
        &["name", "retentionPolicy", "inherited", "members"],
        path,
    )?;
    let simple = required_text(element, "name", path)?;
    let retention =
        optional_text(element, "retentionPolicy").unwrap_or_else(|| "CLASS".to_string());
    let inherited = optional_text(element, "inherited")
        .map(|text| text == "true")
        .unwrap_or(false);

    let mut members = Vec::new();
    if let Some(container) = element.child("members") {
        let container_path = format!("{path}/members");
        for (entry_path, entry) in indexed_children(container, &container_path) {
            if entry.name() != "member" {
                return Err(XmlError::unknown_element(entry.name(), &container_path));
            }
            let name = required_text(entry, "name", &entry_path)?;
            let type_name = required_text(entry, "type", &entry_path)?;
            members.push(AnnotationMember::new(name, type_name));
        }
    }
    Ok(AnnotationModel::new(
        qualify(namespace, &simple),
        retention,
        inherited,
        members,
    ))
}

fn decode_visibility(element: &XmlElement, path: &str) -> Result<Visibility, XmlError> {
    let marker = required_text(element, "modifier", path)?;
    marker
        .chars()
        .next()
        .and_then(Visibility::from_marker)
        .ok_or_else(|| XmlError::malformed(path, format!("invalid visibility marker `{marker}`")))
}

fn qualify(namespace: &str, simple: &str) -> String {
    if namespace.is_empty() {
        simple.to_string()
    } else {
        format!("{namespace}.{simple}")
    }
}

fn required_text(element: &XmlElement, child: &str, path: &str) -> Result<String, XmlError> {
    let text = element
        .child(child)
        .map(|node| node.text().to_string())
        .ok_or_else(|| XmlError::malformed(path, format!("missing required `{child}` element")))?;
    if text.is_empty() {
        return Err(XmlError::malformed(
            format!("{path}/{child}"),
            "element has no text content",
        ));
    }
    Ok(text)
}

fn optional_text(element: &XmlElement, child: &str) -> Option<String> {
    element.child(child).map(|node| node.text().to_string())
}

fn required_attr(element: &XmlElement, name: &str, path: &str) -> Result<String, XmlError> {
    element
        .attr(name)
        .map(str::to_string)
        .ok_or_else(|| XmlError::malformed(path, format!("missing `{name}` attribute")))
}
