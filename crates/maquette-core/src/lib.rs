//! Maquette core model types.
//!
//! This crate defines the structural model that the rest of Maquette is
//! built around:
//! - [`member`] - fields and methods with UML visibility markers
//! - [`association`] - directed, kinded edges between types
//! - [`model`] - the [`model::TypeModel`] tagged union over class,
//!   interface, enum, and annotation shapes
//! - [`package`] - the [`package::PackageNode`] tree grouping types by
//!   namespace, and the builder used during assembly and decoding
//!
//! The model is append-only by design: nodes are populated once at build
//! time (or decode time) and read-only afterwards.

pub mod association;
pub mod member;
pub mod model;
pub mod package;

pub use association::{Association, AssociationKind, Multiplicity};
pub use member::{Field, Method, Visibility};
pub use model::{AnnotationModel, ClassModel, EnumModel, InterfaceModel, TypeModel};
pub use package::{PackageNode, PackageTreeBuilder};

/// Returns the last dot-separated segment of a qualified name.
///
/// Used wherever the model derives a simple name from a qualified one,
/// e.g. `"org.mql.shop.Order"` yields `"Order"`. A name without dots is
/// returned unchanged.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Returns the namespace portion of a qualified name, or `""` for an
/// unqualified name.
pub fn namespace_of(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(idx) => &qualified[..idx],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_takes_last_segment() {
        assert_eq!(simple_name("org.mql.shop.Order"), "Order");
        assert_eq!(simple_name("Order"), "Order");
    }

    #[test]
    fn namespace_of_strips_last_segment() {
        assert_eq!(namespace_of("org.mql.shop.Order"), "org.mql.shop");
        assert_eq!(namespace_of("Order"), "");
    }
}
