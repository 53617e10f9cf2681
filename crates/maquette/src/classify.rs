//! Relationship classification.
//!
//! A single pure pass over one built type, emitting associations in a
//! fixed sequence so repeated runs produce identical documents:
//! inheritance, implementation, composition/aggregation (field order),
//! then use-dependencies (method order, deduplicated by target).
//! Classification never fails; members that cannot be classified simply
//! produce no edge.

use std::collections::HashSet;

use maquette_core::{Association, AssociationKind, Field, Multiplicity};

use crate::{descriptor::TypeDescriptor, policy::TypePolicy};

/// Classify the associations of one type from its descriptor and its
/// already-built field list.
pub(crate) fn classify(
    descriptor: &TypeDescriptor,
    fields: &[Field],
    policy: &TypePolicy,
) -> Vec<Association> {
    let source = descriptor.name();
    let mut associations = Vec::new();

    if let Some(superclass) = descriptor.superclass() {
        if !policy.is_root(superclass) {
            associations.push(Association::new(
                AssociationKind::Inheritance,
                source,
                superclass,
            ));
        }
    }

    for interface in descriptor.interfaces() {
        associations.push(Association::new(
            AssociationKind::Implementation,
            source,
            interface,
        ));
    }

    for field in fields.iter().filter(|field| field.is_user_defined()) {
        let kind = if field.is_final() {
            AssociationKind::Composition
        } else {
            AssociationKind::Aggregation
        };
        let multiplicity = if field.is_container() {
            Multiplicity::Many
        } else {
            Multiplicity::One
        };
        associations.push(
            Association::new(kind, source, field.type_name()).with_multiplicity(multiplicity),
        );
    }

    // A type referenced by a field already has a structural edge; only
    // signature-only references become use-dependencies.
    let field_types: HashSet<&str> = fields.iter().map(Field::type_name).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    for method in descriptor.methods() {
        let types = method
            .parameters()
            .iter()
            .map(String::as_str)
            .chain([method.return_type()]);
        for target in types {
            if policy.is_user_defined(target)
                && !field_types.contains(target)
                && seen.insert(target)
            {
                associations.push(Association::new(AssociationKind::Use, source, target));
            }
        }
    }

    associations
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_core::Visibility;

    use crate::descriptor::MethodDescriptor;
    use maquette_core::model::TypeKind;

    fn built_field(name: &str, element: &str, container: bool, is_final: bool) -> Field {
        let policy = TypePolicy::default();
        Field::new(
            name,
            element,
            Visibility::Private,
            container,
            policy.is_user_defined(element),
            is_final,
        )
    }

    fn kinds(associations: &[Association]) -> Vec<(AssociationKind, &str)> {
        associations
            .iter()
            .map(|a| (a.kind(), a.target_simple()))
            .collect()
    }

    #[test]
    fn order_scenario_classifies_fields_without_spurious_uses() {
        // Order { final items: List<LineItem>; customer: Customer;
        //         addLine(LineItem): void }
        let descriptor = TypeDescriptor::new(TypeKind::Class, "org.mql.shop.Order").with_method(
            MethodDescriptor::new(
                "addLine",
                "void",
                vec!["org.mql.shop.LineItem".to_string()],
                Visibility::Public,
            ),
        );
        let fields = [
            built_field("items", "org.mql.shop.LineItem", true, true),
            built_field("customer", "org.mql.shop.Customer", false, false),
        ];

        let associations = classify(&descriptor, &fields, &TypePolicy::default());
        assert_eq!(
            kinds(&associations),
            [
                (AssociationKind::Composition, "LineItem"),
                (AssociationKind::Aggregation, "Customer"),
            ]
        );
        assert_eq!(associations[0].multiplicity(), Some(Multiplicity::Many));
        assert_eq!(associations[1].multiplicity(), Some(Multiplicity::One));
    }

    #[test]
    fn signature_only_references_become_uses() {
        // process(Report): Summary with no fields at all.
        let descriptor = TypeDescriptor::new(TypeKind::Class, "org.mql.shop.Clerk").with_method(
            MethodDescriptor::new(
                "process",
                "org.mql.shop.Summary",
                vec!["org.mql.shop.Report".to_string()],
                Visibility::Public,
            ),
        );

        let associations = classify(&descriptor, &[], &TypePolicy::default());
        assert_eq!(
            kinds(&associations),
            [
                (AssociationKind::Use, "Report"),
                (AssociationKind::Use, "Summary"),
            ]
        );
    }

    #[test]
    fn uses_are_deduplicated_by_target() {
        let descriptor = TypeDescriptor::new(TypeKind::Class, "a.Router")
            .with_method(MethodDescriptor::new(
                "send",
                "void",
                vec!["a.Packet".to_string()],
                Visibility::Public,
            ))
            .with_method(MethodDescriptor::new(
                "receive",
                "a.Packet",
                vec![],
                Visibility::Public,
            ));

        let associations = classify(&descriptor, &[], &TypePolicy::default());
        assert_eq!(kinds(&associations), [(AssociationKind::Use, "Packet")]);
    }

    #[test]
    fn root_superclass_emits_no_inheritance() {
        let rooted = TypeDescriptor::new(TypeKind::Class, "a.B").with_superclass("java.lang.Object");
        assert!(classify(&rooted, &[], &TypePolicy::default()).is_empty());

        let derived = TypeDescriptor::new(TypeKind::Class, "a.B").with_superclass("a.Base");
        let associations = classify(&derived, &[], &TypePolicy::default());
        assert_eq!(kinds(&associations), [(AssociationKind::Inheritance, "Base")]);
    }

    #[test]
    fn implementations_follow_declaration_order() {
        let descriptor = TypeDescriptor::new(TypeKind::Class, "a.B")
            .with_interface("a.Second")
            .with_interface("a.First");
        let associations = classify(&descriptor, &[], &TypePolicy::default());
        assert_eq!(
            kinds(&associations),
            [
                (AssociationKind::Implementation, "Second"),
                (AssociationKind::Implementation, "First"),
            ]
        );
    }

    #[test]
    fn primitive_and_stdlib_members_produce_no_edges() {
        let descriptor = TypeDescriptor::new(TypeKind::Class, "a.B").with_method(
            MethodDescriptor::new(
                "format",
                "java.lang.String",
                vec!["int".to_string(), "java.util.List".to_string()],
                Visibility::Public,
            ),
        );
        let fields = [built_field("count", "long", false, true)];
        assert!(classify(&descriptor, &fields, &TypePolicy::default()).is_empty());
    }

    #[test]
    fn field_types_are_excluded_from_uses() {
        let descriptor = TypeDescriptor::new(TypeKind::Class, "a.Order").with_method(
            MethodDescriptor::new(
                "add",
                "void",
                vec!["a.LineItem".to_string()],
                Visibility::Public,
            ),
        );
        let fields = [built_field("items", "a.LineItem", true, true)];
        let associations = classify(&descriptor, &fields, &TypePolicy::default());
        assert_eq!(kinds(&associations), [(AssociationKind::Composition, "LineItem")]);
    }
}
