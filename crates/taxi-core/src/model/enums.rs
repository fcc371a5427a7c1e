//! Enum types and member lookups.
//!
//! Lookups compare the textual form of names and values, so a value
//! declared as `1` matches a lookup for `"1"`. Lenient enums additionally
//! ignore case. When a member is flagged as the default, failed lookups
//! resolve to it instead of erroring.
//!
//! An enum may inherit from another enum. It then has no members of its
//! own; lookups go through its base enum, see
//! [`TypeRegistry::base_enum`](crate::registry::TypeRegistry::base_enum).

use std::fmt;

use indexmap::IndexSet;

use crate::error::EnumLookupError;
use crate::foundation::{QualifiedName, Span, Value};
use crate::model::object::Annotation;
use crate::model::types::{PrimitiveType, TypeRef};
use crate::model::user_type::{Declaration, UserType};

pub type EnumType = UserType<EnumDefinition, EnumExtension>;

/// A single enum member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub value: Value,
    pub qualified_name: QualifiedName,
    pub annotations: Vec<Annotation>,
    pub synonyms: Vec<QualifiedName>,
    pub type_doc: Option<String>,
    pub is_default: bool,
}

impl EnumValue {
    /// A member whose value is its own name.
    pub fn new(enum_name: &QualifiedName, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            value: Value::String(name.clone()),
            qualified_name: QualifiedName::new(enum_name.fully_qualified(), name.clone()),
            name,
            annotations: Vec::new(),
            synonyms: Vec::new(),
            type_doc: None,
            is_default: false,
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_synonym(mut self, synonym: QualifiedName) -> Self {
        self.synonyms.push(synonym);
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct EnumDefinition {
    pub values: Vec<EnumValue>,
    pub annotations: Vec<Annotation>,
    pub basic_type: PrimitiveType,
    pub is_lenient: bool,
    pub inherits_from: IndexSet<TypeRef>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl EnumDefinition {
    pub fn new(values: Vec<EnumValue>) -> Self {
        Self {
            values,
            annotations: Vec::new(),
            basic_type: PrimitiveType::String,
            is_lenient: false,
            inherits_from: IndexSet::new(),
            type_doc: None,
            location: Span::unknown(),
        }
    }

    pub fn inheriting(mut self, supertypes: impl IntoIterator<Item = TypeRef>) -> Self {
        self.inherits_from.extend(supertypes);
        self
    }

    pub fn with_basic_type(mut self, basic_type: PrimitiveType) -> Self {
        self.basic_type = basic_type;
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn lenient(mut self) -> Self {
        self.is_lenient = true;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.type_doc = Some(doc.into());
        self
    }

    pub fn at(mut self, location: Span) -> Self {
        self.location = location;
        self
    }
}

impl Declaration for EnumDefinition {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn type_doc(&self) -> Option<&str> {
        self.type_doc.as_deref()
    }
}

/// Additive declaration for an existing enum; may only touch known members.
#[derive(Debug, Clone, Default)]
pub struct EnumExtension {
    pub annotations: Vec<Annotation>,
    pub value_extensions: Vec<EnumValueExtension>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl EnumExtension {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_value(mut self, extension: EnumValueExtension) -> Self {
        self.value_extensions.push(extension);
        self
    }

    pub fn at(mut self, location: Span) -> Self {
        self.location = location;
        self
    }
}

impl Declaration for EnumExtension {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn type_doc(&self) -> Option<&str> {
        self.type_doc.as_deref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnumValueExtension {
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub synonyms: Vec<QualifiedName>,
    pub type_doc: Option<String>,
}

impl EnumValueExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_synonym(mut self, synonym: QualifiedName) -> Self {
        self.synonyms.push(synonym);
        self
    }
}

impl EnumType {
    pub fn is_lenient(&self) -> bool {
        self.definition().is_some_and(|def| def.is_lenient)
    }

    pub fn basic_type(&self) -> Option<PrimitiveType> {
        self.definition().map(|def| def.basic_type)
    }

    pub fn default_value(&self) -> Option<EnumValue> {
        self.values().into_iter().find(|v| v.is_default)
    }

    pub fn has_default(&self) -> bool {
        self.default_value().is_some()
    }

    /// Member with this name.
    pub fn of_name(&self, name: &str) -> Result<EnumValue, EnumLookupError> {
        self.lookup(|v| self.matches(&v.name, name))
            .ok_or_else(|| EnumLookupError::NoSuchName {
                enum_name: self.name().clone(),
                name: name.to_string(),
            })
    }

    /// Member whose underlying value has this textual form.
    pub fn of_value(&self, value: impl fmt::Display) -> Result<EnumValue, EnumLookupError> {
        let value = value.to_string();
        self.lookup(|v| self.matches(&v.value.to_string(), &value))
            .ok_or_else(|| EnumLookupError::NoSuchValue {
                enum_name: self.name().clone(),
                value,
            })
    }

    /// First member, in declaration order, whose value or name matches.
    pub fn of(&self, token: impl fmt::Display) -> Result<EnumValue, EnumLookupError> {
        let token = token.to_string();
        self.lookup(|v| self.matches(&v.value.to_string(), &token) || self.matches(&v.name, &token))
            .ok_or(EnumLookupError::NoSuchNameOrValue {
                enum_name: self.name().clone(),
                token,
            })
    }

    /// True when a lookup by name or value would succeed.
    pub fn has(&self, token: impl fmt::Display) -> bool {
        self.of(token).is_ok()
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.of_name(name).is_ok()
    }

    pub fn has_value(&self, value: impl fmt::Display) -> bool {
        self.of_value(value).is_ok()
    }

    /// True when a member explicitly carries this value, ignoring the default.
    pub fn has_explicit_value(&self, value: impl fmt::Display) -> bool {
        let value = value.to_string();
        self.values()
            .iter()
            .any(|v| self.matches(&v.value.to_string(), &value))
    }

    /// True when a lookup for this token only succeeds via the default member.
    pub fn resolves_to_default(&self, token: impl fmt::Display) -> bool {
        let token = token.to_string();
        let values = self.values();
        let explicit = values.iter().any(|v| {
            self.matches(&v.name, &token) || self.matches(&v.value.to_string(), &token)
        });
        !explicit && values.iter().any(|v| v.is_default)
    }

    fn lookup(&self, predicate: impl Fn(&EnumValue) -> bool) -> Option<EnumValue> {
        let values = self.values();
        values
            .iter()
            .find(|v| predicate(v))
            .or_else(|| values.iter().find(|v| v.is_default))
            .cloned()
    }

    fn matches(&self, candidate: &str, requested: &str) -> bool {
        if self.is_lenient() {
            candidate.to_lowercase() == requested.to_lowercase()
        } else {
            candidate == requested
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn currency() -> EnumType {
        let name = QualifiedName::parse("com.acme.Currency");
        let def = EnumDefinition::new(vec![
            EnumValue::new(&name, "USD").with_value("US Dollars"),
            EnumValue::new(&name, "EUR").with_value("Euro"),
        ]);
        EnumType::defined(name, def)
    }

    #[test]
    fn test_lookup_by_name_and_value() {
        let ccy = currency();
        assert_eq!(ccy.of_name("USD").unwrap().value, Value::from("US Dollars"));
        assert_eq!(ccy.of_value("Euro").unwrap().name, "EUR");
        assert_eq!(ccy.of("EUR").unwrap().name, "EUR");
        assert_eq!(ccy.of("US Dollars").unwrap().name, "USD");
    }

    #[test]
    fn test_lookup_failures_are_distinct() {
        let ccy = currency();
        assert!(matches!(ccy.of_name("GBP"), Err(EnumLookupError::NoSuchName { .. })));
        assert!(matches!(ccy.of_value("GBP"), Err(EnumLookupError::NoSuchValue { .. })));
        assert!(matches!(ccy.of("GBP"), Err(EnumLookupError::NoSuchNameOrValue { .. })));
    }

    #[test]
    fn test_value_compared_textually() {
        let name = QualifiedName::parse("Level");
        let levels = EnumType::defined(
            name.clone(),
            EnumDefinition::new(vec![EnumValue::new(&name, "One").with_value(1i64)])
                .with_basic_type(PrimitiveType::Int),
        );
        assert_eq!(levels.of_value("1").unwrap().name, "One");
        assert_eq!(levels.of_value(1).unwrap().name, "One");
        assert!(levels.has_explicit_value(1));
    }

    #[test]
    fn test_lenient_matching() {
        let name = QualifiedName::parse("Side");
        let side = EnumType::defined(
            name.clone(),
            EnumDefinition::new(vec![EnumValue::new(&name, "Buy"), EnumValue::new(&name, "Sell")])
                .lenient(),
        );
        assert_eq!(side.of_name("BUY").unwrap().name, "Buy");
        assert!(side.has_value("sell"));
        assert!(!currency().has_name("usd"));
    }

    #[test]
    fn test_default_member() {
        let name = QualifiedName::parse("Status");
        let status = EnumType::defined(
            name.clone(),
            EnumDefinition::new(vec![
                EnumValue::new(&name, "Active"),
                EnumValue::new(&name, "Unknown").as_default(),
            ]),
        );
        assert_eq!(status.of_name("Closed").unwrap().name, "Unknown");
        assert!(status.resolves_to_default("Closed"));
        assert!(!status.resolves_to_default("Active"));
        assert!(!status.has_explicit_value("Closed"));
        assert!(status.has("Closed"));
    }

    #[test]
    fn test_of_takes_first_member_in_order() {
        let name = QualifiedName::parse("Code");
        let codes = EnumType::defined(
            name.clone(),
            EnumDefinition::new(vec![
                EnumValue::new(&name, "A").with_value("B"),
                EnumValue::new(&name, "B").with_value("x"),
            ]),
        );
        assert_eq!(codes.of("B").unwrap().name, "A");
        assert_eq!(codes.of_name("B").unwrap().name, "B");
        assert_eq!(codes.of("x").unwrap().name, "B");
    }

    #[test]
    fn test_qualified_member_name() {
        let ccy = currency();
        assert_eq!(
            ccy.of_name("USD").unwrap().qualified_name.to_string(),
            "com.acme.Currency.USD"
        );
    }
}
