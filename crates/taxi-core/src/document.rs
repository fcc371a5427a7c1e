//! The compiled, read-only view of one Taxi document.

use indexmap::IndexMap;

use crate::error::DocumentError;
use crate::foundation::QualifiedName;
use crate::model::{
    AnnotationType, EnumType, EnumValue, Field, ObjectType, Operation, Service, TypeAlias, TypeId, TypeRef,
};
use crate::registry::{TypeBody, TypeRecord, TypeRegistry};

/// Every type and service produced by a successful compilation.
#[derive(Debug, Clone)]
pub struct TaxiDocument {
    registry: TypeRegistry,
    services: IndexMap<QualifiedName, Service>,
}

impl TaxiDocument {
    pub fn new(registry: TypeRegistry, services: IndexMap<QualifiedName, Service>) -> Self {
        Self { registry, services }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Defined types in registry slot order (first reference or declaration).
    pub fn type_list(&self) -> impl Iterator<Item = &TypeRecord> {
        self.registry.type_list().map(|(_, record)| record)
    }

    pub fn contains_type(&self, name: &QualifiedName) -> bool {
        self.lookup(name).is_ok()
    }

    pub fn type_ref(&self, name: &QualifiedName) -> Result<TypeRef, DocumentError> {
        self.lookup(name).map(|(id, _)| TypeRef::User(id))
    }

    pub fn object_type(&self, name: &QualifiedName) -> Result<&ObjectType, DocumentError> {
        match self.lookup(name)? {
            (_, TypeBody::Object(t)) => Ok(t),
            (_, other) => Err(wrong_kind(name, "object type", other)),
        }
    }

    pub fn enum_type(&self, name: &QualifiedName) -> Result<&EnumType, DocumentError> {
        match self.lookup(name)? {
            (_, TypeBody::Enum(t)) => Ok(t),
            (_, other) => Err(wrong_kind(name, "enum", other)),
        }
    }

    /// The enum whose members `name` exposes: itself, or the enum it inherits.
    pub fn base_enum(&self, name: &QualifiedName) -> Result<&EnumType, DocumentError> {
        let id = match self.lookup(name)? {
            (id, TypeBody::Enum(_)) => id,
            (_, other) => return Err(wrong_kind(name, "enum", other)),
        };
        self.registry
            .base_enum(id)
            .and_then(|base| self.registry.enum_type(base))
            .ok_or_else(|| DocumentError::MultipleEnumBases(name.clone()))
    }

    /// Members of an enum, taken from its base enum when it inherits one.
    pub fn enum_values(&self, name: &QualifiedName) -> Result<Vec<EnumValue>, DocumentError> {
        self.base_enum(name).map(|base| base.values())
    }

    pub fn type_alias(&self, name: &QualifiedName) -> Result<&TypeAlias, DocumentError> {
        match self.lookup(name)? {
            (_, TypeBody::Alias(t)) => Ok(t),
            (_, other) => Err(wrong_kind(name, "type alias", other)),
        }
    }

    pub fn annotation_type(&self, name: &QualifiedName) -> Result<&AnnotationType, DocumentError> {
        match self.lookup(name)? {
            (_, TypeBody::Annotation(t)) => Ok(t),
            (_, other) => Err(wrong_kind(name, "annotation type", other)),
        }
    }

    /// Inherited fields followed by the type's own, extensions merged.
    pub fn all_fields(&self, name: &QualifiedName) -> Result<Vec<Field>, DocumentError> {
        match self.lookup(name)? {
            (id, TypeBody::Object(_)) => Ok(self.registry.all_fields(id)),
            (_, other) => Err(wrong_kind(name, "object type", other)),
        }
    }

    /// A field declared on the type or inherited from a supertype.
    pub fn field(&self, name: &QualifiedName, field: &str) -> Result<Field, DocumentError> {
        match self.lookup(name)? {
            (id, TypeBody::Object(_)) => {
                self.registry
                    .field(id, field)
                    .ok_or_else(|| DocumentError::NoSuchField {
                        type_name: name.clone(),
                        field: field.to_string(),
                    })
            }
            (_, other) => Err(wrong_kind(name, "object type", other)),
        }
    }

    pub fn has_field(&self, name: &QualifiedName, field: &str) -> bool {
        self.field(name, field).is_ok()
    }

    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.services.values()
    }

    pub fn service(&self, name: &QualifiedName) -> Result<&Service, DocumentError> {
        self.services
            .get(name)
            .ok_or_else(|| DocumentError::ServiceNotFound(name.clone()))
    }

    pub fn contains_service(&self, name: &QualifiedName) -> bool {
        self.services.contains_key(name)
    }

    pub fn operation(&self, service: &QualifiedName, operation: &str) -> Option<&Operation> {
        self.services.get(service)?.operation(operation)
    }

    /// Display name of any type reference in this document.
    pub fn type_name(&self, type_ref: &TypeRef) -> QualifiedName {
        self.registry.type_name(type_ref)
    }

    fn lookup(&self, name: &QualifiedName) -> Result<(TypeId, &TypeBody), DocumentError> {
        self.registry
            .id_of(name)
            .and_then(|id| self.registry.get(id).map(|record| (id, &record.body)))
            .filter(|(_, body)| body.is_defined())
            .ok_or_else(|| DocumentError::NotFound(name.clone()))
    }
}

fn wrong_kind(name: &QualifiedName, expected: &'static str, actual: &TypeBody) -> DocumentError {
    DocumentError::WrongKind {
        name: name.clone(),
        expected,
        actual: actual.kind_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Span;
    use crate::model::{EnumDefinition, EnumValue, Field, ObjectTypeDefinition, PrimitiveType};
    use crate::registry::UserTypeDefinition;

    fn document() -> TaxiDocument {
        let mut registry = TypeRegistry::new();
        let currency = QualifiedName::parse("acme.Currency");
        registry
            .register(
                &currency,
                UserTypeDefinition::Enum(EnumDefinition::new(vec![EnumValue::new(&currency, "GBP")])),
            )
            .unwrap();
        registry
            .register(
                &QualifiedName::parse("acme.Money"),
                UserTypeDefinition::Object(ObjectTypeDefinition::new(vec![Field::new(
                    "amount",
                    PrimitiveType::Decimal.into(),
                )])),
            )
            .unwrap();
        let mut services = IndexMap::new();
        let name = QualifiedName::parse("acme.FxService");
        services.insert(name.clone(), Service::new(name));
        TaxiDocument::new(registry, services)
    }

    #[test]
    fn test_typed_lookups() {
        let doc = document();
        let money = QualifiedName::parse("acme.Money");
        assert!(doc.object_type(&money).is_ok());
        assert_eq!(doc.all_fields(&money).unwrap().len(), 1);
        assert!(doc.enum_type(&QualifiedName::parse("acme.Currency")).is_ok());
        assert_eq!(doc.type_list().count(), 2);
    }

    #[test]
    fn test_wrong_kind_and_missing() {
        let doc = document();
        let err = doc.enum_type(&QualifiedName::parse("acme.Money")).unwrap_err();
        assert!(matches!(err, DocumentError::WrongKind { expected: "enum", .. }));

        let missing = QualifiedName::parse("acme.Zorp");
        assert_eq!(doc.object_type(&missing).unwrap_err(), DocumentError::NotFound(missing.clone()));
        assert!(!doc.contains_type(&missing));
    }

    #[test]
    fn test_field_lookup_through_supertype() {
        let mut doc = document();
        let money = doc.type_ref(&QualifiedName::parse("acme.Money")).unwrap();
        let price = QualifiedName::parse("acme.Price");
        doc.registry
            .register(
                &price,
                UserTypeDefinition::Object(ObjectTypeDefinition::new(vec![]).inheriting([money])),
            )
            .unwrap();

        assert_eq!(doc.field(&price, "amount").unwrap().name, "amount");
        assert!(doc.has_field(&price, "amount"));
        assert!(matches!(
            doc.field(&price, "ccy"),
            Err(DocumentError::NoSuchField { .. })
        ));
        assert!(matches!(
            doc.field(&QualifiedName::parse("acme.Currency"), "amount"),
            Err(DocumentError::WrongKind { .. })
        ));
    }

    #[test]
    fn test_type_list_follows_first_reference() {
        let mut registry = TypeRegistry::new();
        registry.get_or_create(&QualifiedName::parse("Late"), Span::unknown());
        for name in ["Early", "Late"] {
            registry
                .register(
                    &QualifiedName::parse(name),
                    UserTypeDefinition::Object(ObjectTypeDefinition::new(vec![])),
                )
                .unwrap();
        }
        let doc = TaxiDocument::new(registry, IndexMap::new());
        let names: Vec<String> = doc.type_list().map(|r| r.name().to_string()).collect();
        assert_eq!(names, vec!["Late", "Early"]);
    }

    #[test]
    fn test_services() {
        let doc = document();
        assert!(doc.contains_service(&QualifiedName::parse("acme.FxService")));
        assert!(doc.operation(&QualifiedName::parse("acme.FxService"), "convert").is_none());
        assert!(matches!(
            doc.service(&QualifiedName::parse("acme.Other")),
            Err(DocumentError::ServiceNotFound(_))
        ));
    }
}
