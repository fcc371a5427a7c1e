//! Qualified names and attribute paths.
//!
//! Every user type is identified by a [`QualifiedName`]: a dot-separated
//! namespace plus a simple type name, e.g. `com.acme.orders.Money`.
//! Attribute paths (`this.currency`, `source.amount`) navigate through
//! fields and parameters and are modelled separately by [`AttributePath`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace holding the built-in primitive types.
pub const TAXI_NAMESPACE: &str = "lang.taxi";

/// A namespace-qualified type name.
///
/// Names are compared, hashed and ordered by value, which makes them
/// suitable as keys for the registry index and for any derived caches.
///
/// # Examples
///
/// ```
/// # use taxi_core::foundation::QualifiedName;
/// let name = QualifiedName::parse("com.acme.Money");
/// assert_eq!(name.namespace(), "com.acme");
/// assert_eq!(name.name(), "Money");
/// assert_eq!(name.to_string(), "com.acme.Money");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    namespace: String,
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    parameters: Vec<QualifiedName>,
}

impl QualifiedName {
    /// Create a name from an explicit namespace and simple name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Split a dotted name at its last segment.
    ///
    /// A name without dots lives in the default (empty) namespace.
    pub fn parse(value: &str) -> Self {
        match value.rsplit_once('.') {
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::new("", value),
        }
    }

    /// Attach type parameters, e.g. the member type of an array.
    pub fn with_parameters(mut self, parameters: Vec<QualifiedName>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[QualifiedName] {
        &self.parameters
    }

    /// True when the name lives in the default namespace.
    pub fn is_unqualified(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Namespace and name joined with a dot, without type parameters.
    pub fn fully_qualified(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Fully qualified name including type parameters, e.g.
    /// `lang.taxi.Array<com.acme.Money>`.
    pub fn parameterized_name(&self) -> String {
        if self.parameters.is_empty() {
            return self.fully_qualified();
        }
        let params = self
            .parameters
            .iter()
            .map(QualifiedName::parameterized_name)
            .collect::<Vec<_>>()
            .join(",");
        format!("{}<{}>", self.fully_qualified(), params)
    }

    /// Shortest unambiguous spelling of this name from inside `namespace`.
    ///
    /// Names in the same namespace, and built-ins, render as their simple name.
    pub fn qualified_relative_to(&self, namespace: &str) -> String {
        if self.namespace == namespace || self.namespace == TAXI_NAMESPACE {
            self.name.clone()
        } else {
            self.fully_qualified()
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parameterized_name())
    }
}

impl From<&str> for QualifiedName {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for QualifiedName {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl PartialEq<&str> for QualifiedName {
    fn eq(&self, other: &&str) -> bool {
        self.parameters.is_empty() && self.fully_qualified() == *other
    }
}

/// A dot-separated path to an attribute, such as `this.currency` or
/// `request.amount.value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributePath {
    parts: Vec<String>,
}

impl AttributePath {
    pub fn new(parts: Vec<String>) -> Self {
        Self { parts }
    }

    /// Parse a dotted path.
    pub fn parse(value: &str) -> Self {
        Self {
            parts: value.split('.').map(String::from).collect(),
        }
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// First segment, typically a parameter or field name.
    pub fn head(&self) -> Option<&str> {
        self.parts.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The path with a leading `this` segment removed.
    pub fn without_this(&self) -> AttributePath {
        match self.parts.split_first() {
            Some((first, rest)) if first == "this" => Self::new(rest.to_vec()),
            _ => self.clone(),
        }
    }

    /// Segments joined with dots.
    pub fn path(&self) -> String {
        self.parts.join(".")
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl From<&str> for AttributePath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified() {
        let name = QualifiedName::parse("com.acme.orders.Money");
        assert_eq!(name.namespace(), "com.acme.orders");
        assert_eq!(name.name(), "Money");
        assert!(!name.is_unqualified());
    }

    #[test]
    fn test_parse_unqualified() {
        let name = QualifiedName::parse("Money");
        assert_eq!(name.namespace(), "");
        assert!(name.is_unqualified());
        assert_eq!(name.to_string(), "Money");
    }

    #[test]
    fn test_parameterized_name() {
        let array = QualifiedName::parse("lang.taxi.Array")
            .with_parameters(vec![QualifiedName::parse("com.acme.Money")]);
        assert_eq!(array.parameterized_name(), "lang.taxi.Array<com.acme.Money>");
        assert_eq!(array.fully_qualified(), "lang.taxi.Array");
    }

    #[test]
    fn test_qualified_relative_to() {
        let name = QualifiedName::parse("com.acme.Money");
        assert_eq!(name.qualified_relative_to("com.acme"), "Money");
        assert_eq!(name.qualified_relative_to("com.other"), "com.acme.Money");
        assert_eq!(
            QualifiedName::parse("lang.taxi.String").qualified_relative_to("com.acme"),
            "String"
        );
    }

    #[test]
    fn test_str_comparison() {
        assert_eq!(QualifiedName::parse("a.B"), "a.B");
    }

    #[test]
    fn test_attribute_path() {
        let path = AttributePath::parse("this.amount.value");
        assert_eq!(path.len(), 3);
        assert_eq!(path.without_this().path(), "amount.value");
        assert_eq!(path.head(), Some("this"));

        let bare = AttributePath::parse("currency");
        assert_eq!(bare.without_this(), bare);
    }
}
