//! Directed, kinded edges between types in the model.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::simple_name;

/// The closed set of association kinds the classifier emits.
///
/// Renderers dispatch on this tag to pick a line style, so the set is a
/// tagged union rather than free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum AssociationKind {
    /// `extends` edge to a non-root superclass.
    Inheritance,
    /// `implements` edge to a directly implemented interface.
    Implementation,
    /// Ownership edge derived from a final user-defined field.
    Composition,
    /// Weaker ownership edge derived from a non-final user-defined field.
    Aggregation,
    /// Dependency edge derived from a method signature only.
    Use,
}

impl AssociationKind {
    /// The canonical tag name, as consumed by renderers.
    pub fn as_str(self) -> &'static str {
        match self {
            AssociationKind::Inheritance => "Inheritance",
            AssociationKind::Implementation => "Implementation",
            AssociationKind::Composition => "Composition",
            AssociationKind::Aggregation => "Aggregation",
            AssociationKind::Use => "Use",
        }
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string is not one of the five association
/// kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported association kind `{0}`")]
pub struct ParseAssociationKindError(String);

impl FromStr for AssociationKind {
    type Err = ParseAssociationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Inheritance" => Ok(AssociationKind::Inheritance),
            "Implementation" => Ok(AssociationKind::Implementation),
            "Composition" => Ok(AssociationKind::Composition),
            "Aggregation" => Ok(AssociationKind::Aggregation),
            "Use" => Ok(AssociationKind::Use),
            _ => Err(ParseAssociationKindError(s.to_string())),
        }
    }
}

/// Upper-bound cardinality of a composition or aggregation edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Multiplicity {
    /// Exactly one element (`"1"`).
    One,
    /// A container of elements (`"*"`).
    Many,
}

impl Multiplicity {
    /// The upper-bound string written to the document.
    pub fn as_str(self) -> &'static str {
        match self {
            Multiplicity::One => "1",
            Multiplicity::Many => "*",
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string is not a recognized upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported multiplicity `{0}`, expected `1` or `*`")]
pub struct ParseMultiplicityError(String);

impl FromStr for Multiplicity {
    type Err = ParseMultiplicityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Multiplicity::One),
            "*" => Ok(Multiplicity::Many),
            _ => Err(ParseMultiplicityError(s.to_string())),
        }
    }
}

/// A directed association between two types.
///
/// Source and target are qualified names; the simple names are derived at
/// construction and exposed for renderers, which label edges with simple
/// names only. `multiplicity` is meaningful only for composition and
/// aggregation edges.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Association {
    kind: AssociationKind,
    source: String,
    target: String,
    source_simple: String,
    target_simple: String,
    multiplicity: Option<Multiplicity>,
}

impl Association {
    /// Create an association between two qualified names.
    pub fn new(
        kind: AssociationKind,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        let source_simple = simple_name(&source).to_string();
        let target_simple = simple_name(&target).to_string();
        Self {
            kind,
            source,
            target,
            source_simple,
            target_simple,
            multiplicity: None,
        }
    }

    /// Attach an upper-bound cardinality to this association.
    pub fn with_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = Some(multiplicity);
        self
    }

    /// Get the association kind.
    pub fn kind(&self) -> AssociationKind {
        self.kind
    }

    /// Get the qualified source name.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the qualified target name.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get the derived simple source name.
    pub fn source_simple(&self) -> &str {
        &self.source_simple
    }

    /// Get the derived simple target name.
    pub fn target_simple(&self) -> &str {
        &self.target_simple
    }

    /// Get the upper-bound cardinality, if any.
    pub fn multiplicity(&self) -> Option<Multiplicity> {
        self.multiplicity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_names_are_derived_from_qualified_names() {
        let assoc = Association::new(
            AssociationKind::Use,
            "org.mql.shop.Order",
            "org.mql.shop.Report",
        );
        assert_eq!(assoc.source_simple(), "Order");
        assert_eq!(assoc.target_simple(), "Report");
        assert_eq!(assoc.multiplicity(), None);
    }

    #[test]
    fn kind_tags_round_trip_through_display() {
        for kind in [
            AssociationKind::Inheritance,
            AssociationKind::Implementation,
            AssociationKind::Composition,
            AssociationKind::Aggregation,
            AssociationKind::Use,
        ] {
            assert_eq!(kind.as_str().parse::<AssociationKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_and_bound_name_the_offending_input() {
        let err = "Dependency".parse::<AssociationKind>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported association kind `Dependency`");

        let err = "2".parse::<Multiplicity>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported multiplicity `2`, expected `1` or `*`");
    }
}
