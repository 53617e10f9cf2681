//! The user-defined-type policy.

use serde::{Deserialize, Serialize};

/// Decides which type names count as user-defined, per target language.
///
/// A type is *not* user-defined if its name is a language primitive or
/// falls under one of the configured standard-library namespace
/// prefixes. This is a deliberate approximation: it misclassifies
/// third-party libraries that shadow a standard prefix and knows nothing
/// about the types it has never seen, which is exactly why the
/// classifier treats unclassifiable members as non-user-defined instead
/// of failing.
///
/// The default policy targets Java: primitives plus the `java.` /
/// `javax.` namespaces, with `java.lang.Object` as the universal root
/// type that inheritance edges never point at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TypePolicy {
    stdlib_prefixes: Vec<String>,
    primitives: Vec<String>,
    root_type: String,
}

impl Default for TypePolicy {
    fn default() -> Self {
        Self {
            stdlib_prefixes: vec!["java.".to_string(), "javax.".to_string()],
            primitives: [
                "void", "boolean", "byte", "char", "short", "int", "long", "float", "double",
            ]
            .map(String::from)
            .to_vec(),
            root_type: "java.lang.Object".to_string(),
        }
    }
}

impl TypePolicy {
    /// Create a policy from explicit prefix, primitive, and root-type
    /// sets.
    pub fn new(
        stdlib_prefixes: Vec<String>,
        primitives: Vec<String>,
        root_type: impl Into<String>,
    ) -> Self {
        Self {
            stdlib_prefixes,
            primitives,
            root_type: root_type.into(),
        }
    }

    /// Whether `name` is a language primitive.
    pub fn is_primitive(&self, name: &str) -> bool {
        self.primitives.iter().any(|p| p == name)
    }

    /// Whether `name` falls under a standard-library namespace prefix.
    pub fn is_stdlib(&self, name: &str) -> bool {
        self.stdlib_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }

    /// Whether `name` counts as user-defined under this policy.
    pub fn is_user_defined(&self, name: &str) -> bool {
        !self.is_primitive(name) && !self.is_stdlib(name)
    }

    /// Whether `name` is the universal root type.
    pub fn is_root(&self, name: &str) -> bool {
        name == self.root_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_java_flavored() {
        let policy = TypePolicy::default();
        assert!(!policy.is_user_defined("int"));
        assert!(!policy.is_user_defined("void"));
        assert!(!policy.is_user_defined("java.lang.String"));
        assert!(!policy.is_user_defined("javax.swing.JPanel"));
        assert!(policy.is_user_defined("org.mql.shop.Order"));
        assert!(policy.is_root("java.lang.Object"));
        assert!(!policy.is_root("org.mql.shop.Order"));
    }

    #[test]
    fn custom_prefixes_reclassify() {
        let policy = TypePolicy::new(
            vec!["std.".to_string()],
            vec!["unit".to_string()],
            "std.Any",
        );
        assert!(!policy.is_user_defined("std.collections.Map"));
        assert!(policy.is_user_defined("java.lang.String"));
    }
}
