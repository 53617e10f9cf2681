use maquette_core::{
    Association, AssociationKind, ClassModel, Field, Method, Multiplicity, PackageNode,
    PackageTreeBuilder, TypeModel, Visibility,
    model::{AnnotationMember, AnnotationModel, EnumModel, InterfaceModel},
};
use maquette_xml::{XmlError, decode, encode};
use proptest::prelude::*;

/// A package tree resembling the output of a small discovery pass:
/// a class with every relationship kind, an interface, an enum, an
/// annotation, and a nested namespace.
fn sample_tree() -> PackageNode {
    let order = ClassModel::new(
        "org.mql.shop.Order",
        "public",
        Some("org.mql.shop.Document".to_string()),
        vec![
            Field::new(
                "items",
                "org.mql.shop.LineItem",
                Visibility::Private,
                true,
                true,
                true,
            ),
            Field::new(
                "customer",
                "org.mql.shop.Customer",
                Visibility::Private,
                false,
                true,
                false,
            ),
        ],
        vec![Method::new(
            "summarize",
            "org.mql.shop.Report",
            vec!["org.mql.shop.LineItem".to_string()],
            Visibility::Public,
        )],
        vec![InterfaceModel::named("org.mql.shop.Sellable")],
        vec![
            Association::new(
                AssociationKind::Inheritance,
                "org.mql.shop.Order",
                "org.mql.shop.Document",
            ),
            Association::new(
                AssociationKind::Implementation,
                "org.mql.shop.Order",
                "org.mql.shop.Sellable",
            ),
            Association::new(
                AssociationKind::Composition,
                "org.mql.shop.Order",
                "org.mql.shop.LineItem",
            )
            .with_multiplicity(Multiplicity::Many),
            Association::new(
                AssociationKind::Aggregation,
                "org.mql.shop.Order",
                "org.mql.shop.Customer",
            )
            .with_multiplicity(Multiplicity::One),
            Association::new(
                AssociationKind::Use,
                "org.mql.shop.Order",
                "org.mql.shop.Report",
            ),
        ],
    );

    let mut builder = PackageTreeBuilder::new();
    builder.add_type("org.mql.shop", TypeModel::Class(order));
    builder.add_type(
        "org.mql.shop",
        TypeModel::Interface(InterfaceModel::new(
            "org.mql.shop.Sellable",
            "public abstract",
            Some("org.mql.shop.Tradable".to_string()),
            vec![],
            vec![Method::new("price", "long", vec![], Visibility::Public)],
        )),
    );
    builder.add_type(
        "org.mql.shop.billing",
        TypeModel::Enum(EnumModel::new(
            "org.mql.shop.billing.Status",
            vec!["OPEN".to_string(), "PAID".to_string()],
        )),
    );
    builder.add_type(
        "org.mql.shop.billing",
        TypeModel::Annotation(AnnotationModel::new(
            "org.mql.shop.billing.Audited",
            "RUNTIME",
            true,
            vec![AnnotationMember::new("level", "String")],
        )),
    );
    builder.finish().remove(0)
}

fn targets_of(class: &ClassModel, kind: AssociationKind) -> Vec<(String, Option<Multiplicity>)> {
    class
        .associations_of(kind)
        .map(|a| (a.target_simple().to_string(), a.multiplicity()))
        .collect()
}

#[test]
fn round_trip_preserves_everything_the_schema_carries() {
    let tree = sample_tree();
    let decoded = decode(&encode(&tree)).expect("document should decode");

    assert_eq!(decoded.name(), "org.mql.shop");
    let class = &decoded.classes()[0];
    let original = &tree.classes()[0];

    // Members: names, types, visibility markers survive.
    assert_eq!(class.simple_name(), "Order");
    assert_eq!(class.qualified_name(), "org.mql.shop.Order");
    assert_eq!(class.superclass(), Some("org.mql.shop.Document"));
    let fields: Vec<_> = class
        .fields()
        .iter()
        .map(|f| (f.name(), f.type_name(), f.visibility()))
        .collect();
    let original_fields: Vec<_> = original
        .fields()
        .iter()
        .map(|f| (f.name(), f.type_name(), f.visibility()))
        .collect();
    assert_eq!(fields, original_fields);
    let methods: Vec<_> = class
        .methods()
        .iter()
        .map(|m| (m.name(), m.return_type(), m.visibility()))
        .collect();
    assert_eq!(methods, [("summarize", "org.mql.shop.Report", Visibility::Public)]);

    // Associations: target sets and cardinalities per kind.
    for kind in [
        AssociationKind::Composition,
        AssociationKind::Aggregation,
        AssociationKind::Use,
    ] {
        assert_eq!(targets_of(class, kind), targets_of(original, kind), "{kind}");
    }
    assert_eq!(
        class
            .associations_of(AssociationKind::Inheritance)
            .map(|a| a.target().to_string())
            .collect::<Vec<_>>(),
        ["org.mql.shop.Document"]
    );

    // Documented loss: implemented interfaces come back name-only.
    assert_eq!(class.interfaces().len(), 1);
    assert_eq!(class.interfaces()[0].simple_name(), "Sellable");
    assert!(class.interfaces()[0].fields().is_empty());

    // Other kinds in the same package tree.
    let interface = &decoded.interfaces()[0];
    assert_eq!(interface.qualified_name(), "org.mql.shop.Sellable");
    assert_eq!(interface.modifiers(), "public abstract");
    assert_eq!(interface.extends(), Some("org.mql.shop.Tradable"));
    assert_eq!(interface.methods()[0].name(), "price");

    let nested = &decoded.children()[0];
    assert_eq!(nested.name(), "org.mql.shop.billing");
    assert_eq!(nested.enums()[0].constants(), ["OPEN", "PAID"]);
    let annotation = &nested.annotations()[0];
    assert_eq!(annotation.retention(), "RUNTIME");
    assert!(annotation.inherited());
    assert_eq!(annotation.members()[0].name(), "level");
}

#[test]
fn second_round_trip_is_stable() {
    // Once the lossy projection has happened, encode/decode is a fixpoint.
    let once = decode(&encode(&sample_tree())).expect("first decode");
    let twice = decode(&encode(&once)).expect("second decode");
    assert_eq!(once, twice);
}

#[test]
fn class_without_name_reports_its_element_path() {
    let doc = r#"<project>
      <package name="org.mql.shop">
        <class>
          <name>Order</name>
          <fields/>
          <methods/>
        </class>
        <class>
          <fields/>
          <methods/>
        </class>
      </package>
    </project>"#;

    let err = decode(doc).expect_err("missing name must fail");
    match err {
        XmlError::Malformed { path, message } => {
            assert_eq!(path, "project/package[0]/class[1]");
            assert!(message.contains("`name`"), "{message}");
        }
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn unknown_tag_in_package_is_rejected_with_its_kind() {
    let doc = r#"<project>
      <package name="org.mql.shop">
        <widget/>
      </package>
    </project>"#;

    let err = decode(doc).expect_err("unknown tag must fail");
    match err {
        XmlError::UnknownElement { tag, path } => {
            assert_eq!(tag, "widget");
            assert_eq!(path, "project/package[0]");
        }
        other => panic!("expected UnknownElement, got {other:?}"),
    }
}

#[test]
fn invalid_upper_bound_is_malformed() {
    let doc = r#"<project>
      <package name="p">
        <class>
          <name>A</name>
          <relationships>
            <composition sourceClass="A" targetClass="B" upperBound="2"/>
          </relationships>
          <fields/>
          <methods/>
        </class>
      </package>
    </project>"#;

    let err = decode(doc).expect_err("invalid bound must fail");
    assert!(matches!(err, XmlError::Malformed { .. }), "{err:?}");
}

#[test]
fn document_without_packages_is_malformed() {
    assert!(matches!(
        decode("<project/>"),
        Err(XmlError::Malformed { .. })
    ));
}

proptest! {
    // Field type names with markup-hostile characters survive the
    // escape/parse cycle.
    #[test]
    fn field_types_round_trip_through_escaping(
        type_name in "[A-Za-z0-9&<>\"'_.]{1,40}",
    ) {
        let class = ClassModel::new(
            "p.Holder",
            "public",
            None,
            vec![Field::new("value", type_name.clone(), Visibility::Private, false, false, false)],
            vec![],
            vec![],
            vec![],
        );
        let mut builder = PackageTreeBuilder::new();
        builder.add_type("p", TypeModel::Class(class));
        let tree = builder.finish().remove(0);

        let decoded = decode(&encode(&tree)).expect("round trip");
        prop_assert_eq!(decoded.classes()[0].fields()[0].type_name(), type_name.as_str());
    }
}
