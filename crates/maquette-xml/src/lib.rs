//! # Maquette XML codec
//!
//! Serializes a [`maquette_core::PackageNode`] tree to a hierarchical XML
//! document and parses such a document back into a tree.
//!
//! ## Document shape
//!
//! ```text
//! project
//!   package(name)                      -- qualified dotted namespace
//!     class > name, relationships, implementedInterfaces, fields, methods
//!     interface / enum / annotation    -- analogous, narrower shapes
//!     package(name)*                   -- nested namespaces
//! ```
//!
//! Edge elements under `relationships` use the canonical attribute set
//! `sourceClass`/`targetClass` (plus `upperBound` for composition and
//! aggregation).
//!
//! ## Usage
//!
//! ```
//! use maquette_core::{PackageTreeBuilder, TypeModel, model::EnumModel};
//!
//! let mut builder = PackageTreeBuilder::new();
//! builder.add_type(
//!     "org.mql.shop",
//!     TypeModel::Enum(EnumModel::new("org.mql.shop.Status", vec!["OPEN".into()])),
//! );
//! let tree = builder.finish().remove(0);
//!
//! let document = maquette_xml::encode(&tree);
//! let decoded = maquette_xml::decode(&document).expect("round trip");
//! assert_eq!(decoded.name(), "org.mql.shop");
//! ```
//!
//! The format is lossy in documented, bounded ways (see [`decode`]);
//! everything the schema carries round-trips exactly.

mod decode;
mod element;
mod encode;
mod error;
mod reader;

pub use decode::decode;
pub use element::XmlElement;
pub use encode::{encode, encode_to_writer};
pub use error::XmlError;
