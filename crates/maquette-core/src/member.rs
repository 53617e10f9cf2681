//! Structural members of a type: fields and methods.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::simple_name;

/// Error returned when a string is not a recognized visibility.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported visibility `{0}`, expected public/private/protected/package or a marker")]
pub struct ParseVisibilityError(String);

/// UML visibility of a member, rendered as the conventional one-character
/// marker: `+` public, `-` private, `#` protected, `~` package.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
    #[default]
    Package,
}

impl Visibility {
    /// The single-character UML marker for this visibility.
    pub fn marker(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
            Visibility::Package => '~',
        }
    }

    /// Parse a visibility from its UML marker character.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            '~' => Some(Visibility::Package),
            _ => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

impl FromStr for Visibility {
    type Err = ParseVisibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" | "+" => Ok(Visibility::Public),
            "private" | "-" => Ok(Visibility::Private),
            "protected" | "#" => Ok(Visibility::Protected),
            "package" | "~" => Ok(Visibility::Package),
            _ => Err(ParseVisibilityError(s.to_string())),
        }
    }
}

/// A declared field of a class or interface.
///
/// `type_name` is the field's *element* type: for a container field
/// (`items: List<LineItem>`) it is the contained type (`LineItem`), for a
/// plain field it equals the declared type. This is the name that
/// composition and aggregation edges point at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Field {
    name: String,
    type_name: String,
    simple_type_name: String,
    visibility: Visibility,
    is_container: bool,
    is_user_defined: bool,
    is_final: bool,
}

impl Field {
    /// Create a new field. The simple type name is derived from
    /// `type_name`.
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        visibility: Visibility,
        is_container: bool,
        is_user_defined: bool,
        is_final: bool,
    ) -> Self {
        let type_name = type_name.into();
        let simple_type_name = simple_name(&type_name).to_string();
        Self {
            name: name.into(),
            type_name,
            simple_type_name,
            visibility,
            is_container,
            is_user_defined,
            is_final,
        }
    }

    /// Get the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the qualified element type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Get the simple element type name.
    pub fn simple_type_name(&self) -> &str {
        &self.simple_type_name
    }

    /// Get the field's visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the declared type is a sequence/collection type.
    pub fn is_container(&self) -> bool {
        self.is_container
    }

    /// Whether the element type was classified as user-defined.
    pub fn is_user_defined(&self) -> bool {
        self.is_user_defined
    }

    /// Whether the field's storage is non-reassignable.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// The display signature used on diagram shapes,
    /// e.g. `- items : LineItem`.
    pub fn signature(&self) -> String {
        format!(
            "{} {} : {}",
            self.visibility.marker(),
            self.name,
            self.simple_type_name
        )
    }
}

/// A declared method of a class or interface.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Method {
    name: String,
    return_type: String,
    parameters: Vec<String>,
    visibility: Visibility,
}

impl Method {
    /// Create a new method with its return type and ordered parameter
    /// type names.
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

    /// Get the qualified return type name.
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

    /// The display signature used on diagram shapes,
    /// e.g. `+ addLine(LineItem) : void`.
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| simple_name(p))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} {}({}) : {}",
            self.visibility.marker(),
            self.name,
            params,
            simple_name(&self.return_type)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_markers_round_trip() {
        for vis in [
            Visibility::Public,
            Visibility::Private,
            Visibility::Protected,
            Visibility::Package,
        ] {
            assert_eq!(Visibility::from_marker(vis.marker()), Some(vis));
        }
        assert_eq!(Visibility::from_marker('?'), None);
    }

    #[test]
    fn unknown_visibility_names_the_offending_input() {
        assert_eq!("public".parse::<Visibility>(), Ok(Visibility::Public));
        let err = "friend".parse::<Visibility>().unwrap_err();
        assert!(err.to_string().contains("`friend`"), "{err}");
    }

    #[test]
    fn field_signature_uses_simple_type_name() {
        let field = Field::new(
            "items",
            "org.mql.shop.LineItem",
            Visibility::Private,
            true,
            true,
            true,
        );
        assert_eq!(field.signature(), "- items : LineItem");
    }

    #[test]
    fn method_signature_lists_simple_parameter_names() {
        let method = Method::new(
            "transfer",
            "void",
            vec!["org.mql.bank.Account".into(), "long".into()],
            Visibility::Public,
        );
        assert_eq!(method.signature(), "+ transfer(Account, long) : void");
    }
}
