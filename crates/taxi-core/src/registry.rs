//! Type registry: the arena every user type lives in.
//!
//! The registry maps qualified names to stable [`TypeId`]s. A type that is
//! referenced before its declaration has been seen gets an undefined
//! placeholder record; registering the declaration later fills that same
//! record in place, so every [`TypeRef::User`] handed out earlier now sees
//! the real definition.
//!
//! # Pipeline Position
//!
//! ```text
//! Declarations → Registry → Extensions → Resolution check → Validation
//!                  ^^^^^^
//!               YOU ARE HERE
//! ```
//!
//! # Examples
//!
//! ```
//! use taxi_core::foundation::{QualifiedName, Span};
//! use taxi_core::model::{ObjectTypeDefinition, TypeRef};
//! use taxi_core::registry::{TypeRegistry, UserTypeDefinition};
//!
//! let mut registry = TypeRegistry::new();
//! let money = QualifiedName::parse("com.acme.Money");
//!
//! // Referenced before it is declared
//! let early = registry.get_or_create(&money, Span::unknown());
//! let TypeRef::User(id) = early else { unreachable!() };
//! assert!(!registry.is_defined(id));
//!
//! registry
//!     .register(&money, UserTypeDefinition::Object(ObjectTypeDefinition::new(vec![])))
//!     .unwrap();
//! assert!(registry.is_defined(id));
//! ```

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::error::{CompileError, ErrorKind, RegistryError};
use crate::foundation::{QualifiedName, Span, TAXI_NAMESPACE};
use crate::model::{
    AnnotationType, AnnotationTypeDefinition, EnumDefinition, EnumExtension, EnumType,
    ObjectType, ObjectTypeDefinition, ObjectTypeExtension, PrimitiveType, TypeAlias,
    TypeAliasDefinition, TypeAliasExtension, TypeId, TypeRef,
};

const VOID_NAME: &str = "Void";
const ARRAY_NAME: &str = "Array";

/// Payload of a registry record.
#[derive(Debug, Clone)]
pub enum TypeBody {
    Object(ObjectType),
    Enum(EnumType),
    Alias(TypeAlias),
    Annotation(AnnotationType),
}

impl TypeBody {
    pub fn name(&self) -> &QualifiedName {
        match self {
            TypeBody::Object(t) => t.name(),
            TypeBody::Enum(t) => t.name(),
            TypeBody::Alias(t) => t.name(),
            TypeBody::Annotation(t) => t.name(),
        }
    }

    pub fn is_defined(&self) -> bool {
        match self {
            TypeBody::Object(t) => t.is_defined(),
            TypeBody::Enum(t) => t.is_defined(),
            TypeBody::Alias(t) => t.is_defined(),
            TypeBody::Annotation(t) => t.is_defined(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeBody::Object(_) => "object type",
            TypeBody::Enum(_) => "enum",
            TypeBody::Alias(_) => "type alias",
            TypeBody::Annotation(_) => "annotation type",
        }
    }
}

/// A registry slot.
#[derive(Debug, Clone)]
pub struct TypeRecord {
    pub body: TypeBody,
    /// Where the name was first seen, as a reference or a declaration
    pub origin: Span,
}

impl TypeRecord {
    pub fn name(&self) -> &QualifiedName {
        self.body.name()
    }

    pub fn is_defined(&self) -> bool {
        self.body.is_defined()
    }
}

/// A primary declaration to install in the registry.
#[derive(Debug, Clone)]
pub enum UserTypeDefinition {
    Object(ObjectTypeDefinition),
    Enum(EnumDefinition),
    Alias(TypeAliasDefinition),
    Annotation(AnnotationTypeDefinition),
}

impl UserTypeDefinition {
    pub fn location(&self) -> Span {
        match self {
            UserTypeDefinition::Object(d) => d.location,
            UserTypeDefinition::Enum(d) => d.location,
            UserTypeDefinition::Alias(d) => d.location,
            UserTypeDefinition::Annotation(d) => d.location,
        }
    }

    fn into_body(self, name: QualifiedName) -> TypeBody {
        match self {
            UserTypeDefinition::Object(d) => TypeBody::Object(ObjectType::defined(name, d)),
            UserTypeDefinition::Enum(d) => TypeBody::Enum(EnumType::defined(name, d)),
            UserTypeDefinition::Alias(d) => TypeBody::Alias(TypeAlias::defined(name, d)),
            UserTypeDefinition::Annotation(d) => {
                TypeBody::Annotation(AnnotationType::defined(name, d))
            }
        }
    }
}

/// An additive declaration for an already-named type.
#[derive(Debug, Clone)]
pub enum TypeExtension {
    Object(ObjectTypeExtension),
    Enum(EnumExtension),
    Alias(TypeAliasExtension),
}

impl TypeExtension {
    pub fn location(&self) -> Span {
        match self {
            TypeExtension::Object(e) => e.location,
            TypeExtension::Enum(e) => e.location,
            TypeExtension::Alias(e) => e.location,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeExtension::Object(_) => "object type",
            TypeExtension::Enum(_) => "enum",
            TypeExtension::Alias(_) => "type alias",
        }
    }
}

/// Registry of every type in one compilation.
///
/// Not shared between compilations; create one per compilation unit.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    records: Vec<TypeRecord>,
    index: IndexMap<QualifiedName, TypeId>,
    /// First reference to each type that was created as a placeholder
    first_references: IndexMap<TypeId, Span>,
    imports: IndexSet<QualifiedName>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a referenced name, creating an undefined placeholder if needed.
    ///
    /// Built-in primitives, `Void`, `Array<T>` and declared imports never
    /// create placeholders.
    pub fn get_or_create(&mut self, name: &QualifiedName, origin: Span) -> TypeRef {
        if let Some(primitive) = PrimitiveType::from_name(name) {
            return TypeRef::Primitive(primitive);
        }
        if is_builtin(name, VOID_NAME) {
            return TypeRef::Void;
        }
        if is_builtin(name, ARRAY_NAME) {
            if let [member] = name.parameters() {
                return TypeRef::array_of(self.get_or_create(member, origin));
            }
        }
        if let Some(id) = self.index.get(name) {
            return TypeRef::User(*id);
        }
        if self.imports.contains(name) {
            return TypeRef::UnresolvedImport(name.clone());
        }

        let id = self.push(TypeBody::Object(ObjectType::undefined(name.clone())), origin);
        self.first_references.insert(id, origin);
        debug!(type_name = %name, id = %id, "created placeholder");
        TypeRef::User(id)
    }

    /// Install a definition, filling a placeholder in place when one exists.
    ///
    /// A placeholder that has not been extended may change kind (an enum
    /// declared after a forward reference still keeps the same id).
    pub fn register(
        &mut self,
        name: &QualifiedName,
        definition: UserTypeDefinition,
    ) -> Result<TypeId, RegistryError> {
        let location = definition.location();
        let Some(&id) = self.index.get(name) else {
            let id = self.push(definition.into_body(name.clone()), location);
            debug!(type_name = %name, id = %id, "registered type");
            return Ok(id);
        };

        let Some(record) = self.records.get_mut(id.index()) else {
            return Err(RegistryError::Redefinition(name.clone()));
        };
        if record.is_defined() {
            return Err(RegistryError::Redefinition(name.clone()));
        }

        let replace_kind = match (&record.body, &definition) {
            (TypeBody::Object(_), UserTypeDefinition::Object(_))
            | (TypeBody::Enum(_), UserTypeDefinition::Enum(_))
            | (TypeBody::Alias(_), UserTypeDefinition::Alias(_))
            | (TypeBody::Annotation(_), UserTypeDefinition::Annotation(_)) => false,
            (TypeBody::Object(placeholder), _) if placeholder.extensions().is_empty() => true,
            (body, _) => {
                return Err(RegistryError::KindMismatch {
                    name: name.clone(),
                    existing: body.kind_name(),
                })
            }
        };

        if replace_kind {
            record.body = definition.into_body(name.clone());
        } else {
            let filled = match (&mut record.body, definition) {
                (TypeBody::Object(t), UserTypeDefinition::Object(d)) => t.define(d).is_ok(),
                (TypeBody::Enum(t), UserTypeDefinition::Enum(d)) => t.define(d).is_ok(),
                (TypeBody::Alias(t), UserTypeDefinition::Alias(d)) => t.define(d).is_ok(),
                (TypeBody::Annotation(t), UserTypeDefinition::Annotation(d)) => {
                    t.define(d).is_ok()
                }
                _ => false,
            };
            if !filled {
                return Err(RegistryError::Redefinition(name.clone()));
            }
        }
        debug!(type_name = %name, id = %id, "filled placeholder");
        Ok(id)
    }

    /// Append an extension to the named type.
    ///
    /// Returns the rejection as a diagnostic instead of mutating when the
    /// extension conflicts with earlier ones or does not fit the type.
    pub fn add_extension(
        &mut self,
        name: &QualifiedName,
        extension: TypeExtension,
    ) -> Option<CompileError> {
        let location = extension.location();
        let id = match (self.index.get(name).copied(), &extension) {
            (Some(id), _) => id,
            (None, TypeExtension::Object(_)) => match self.get_or_create(name, location) {
                TypeRef::User(id) => id,
                _ => {
                    return Some(CompileError::new(
                        ErrorKind::InvalidExtension,
                        location,
                        format!("Cannot extend built-in type {}", name),
                    ))
                }
            },
            (None, _) => {
                return Some(CompileError::new(
                    ErrorKind::InvalidExtension,
                    location,
                    format!("Cannot extend {} {} as it is not defined", extension.kind_name(), name),
                ))
            }
        };

        let Some(record) = self.records.get_mut(id.index()) else {
            return Some(CompileError::new(
                ErrorKind::Internal,
                location,
                format!("type {} has no registry record", name),
            ));
        };

        let outcome = match (&mut record.body, extension) {
            (TypeBody::Object(t), TypeExtension::Object(ext)) => {
                t.add_extension(ext).map_err(ExtensionRejection::Refinement)
            }
            (TypeBody::Enum(t), TypeExtension::Enum(ext)) => {
                t.add_extension(ext).map_err(ExtensionRejection::Invalid)
            }
            (TypeBody::Alias(t), TypeExtension::Alias(ext)) => {
                t.add_extension(ext);
                Ok(())
            }
            (TypeBody::Annotation(_), _) => Err(ExtensionRejection::Invalid(format!(
                "Annotation type {} does not support extensions",
                name
            ))),
            (body, ext) => Err(ExtensionRejection::Invalid(format!(
                "Cannot apply an {} extension to {} {}",
                ext.kind_name(),
                body.kind_name(),
                name
            ))),
        };

        match outcome {
            Ok(()) => {
                debug!(type_name = %name, "added extension");
                None
            }
            Err(ExtensionRejection::Refinement(conflict)) => Some(CompileError::new(
                ErrorKind::FieldRefinementConflict,
                location,
                format!(
                    "Cannot refine field {} to {} as it has already been refined to {}",
                    conflict.field_name,
                    self.type_name(&conflict.proposed),
                    self.type_name(&conflict.existing)
                ),
            )),
            Err(ExtensionRejection::Invalid(message)) => Some(CompileError::new(
                ErrorKind::InvalidExtension,
                location,
                message,
            )),
        }
    }

    /// Report every type that is still undefined.
    pub fn assert_all_resolved(&self) -> Result<(), Vec<CompileError>> {
        let errors: Vec<CompileError> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| !record.is_defined())
            .map(|(idx, record)| {
                let span = self
                    .first_references
                    .get(&TypeId(idx as u32))
                    .copied()
                    .unwrap_or(record.origin);
                CompileError::new(
                    ErrorKind::UnresolvedType,
                    span,
                    format!("{} is not defined", record.name()),
                )
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Defined types in slot order. A slot is allocated when a name is first
    /// referenced or declared, whichever comes first, so a type used before
    /// its declaration is listed ahead of types declared earlier.
    pub fn type_list(&self) -> impl Iterator<Item = (TypeId, &TypeRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.is_defined())
            .map(|(idx, record)| (TypeId(idx as u32), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeRecord> {
        self.records.get(id.index())
    }

    pub fn id_of(&self, name: &QualifiedName) -> Option<TypeId> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.index.contains_key(name)
    }

    pub fn is_defined(&self, id: TypeId) -> bool {
        self.get(id).is_some_and(TypeRecord::is_defined)
    }

    pub fn object_type(&self, id: TypeId) -> Option<&ObjectType> {
        match &self.get(id)?.body {
            TypeBody::Object(t) => Some(t),
            _ => None,
        }
    }

    pub fn enum_type(&self, id: TypeId) -> Option<&EnumType> {
        match &self.get(id)?.body {
            TypeBody::Enum(t) => Some(t),
            _ => None,
        }
    }

    pub fn type_alias(&self, id: TypeId) -> Option<&TypeAlias> {
        match &self.get(id)?.body {
            TypeBody::Alias(t) => Some(t),
            _ => None,
        }
    }

    pub fn annotation_type(&self, id: TypeId) -> Option<&AnnotationType> {
        match &self.get(id)?.body {
            TypeBody::Annotation(t) => Some(t),
            _ => None,
        }
    }

    /// Qualified name of any type reference.
    pub fn type_name(&self, type_ref: &TypeRef) -> QualifiedName {
        match type_ref {
            TypeRef::Primitive(p) => p.qualified_name(),
            TypeRef::Void => QualifiedName::new(TAXI_NAMESPACE, VOID_NAME),
            TypeRef::Array(member) => QualifiedName::new(TAXI_NAMESPACE, ARRAY_NAME)
                .with_parameters(vec![self.type_name(member)]),
            TypeRef::User(id) => self
                .get(*id)
                .map(|record| record.name().clone())
                .unwrap_or_else(|| QualifiedName::new("", id.to_string())),
            TypeRef::UnresolvedImport(name) => name.clone(),
        }
    }

    /// Declare a name as provided by another compilation.
    pub fn add_import(&mut self, name: QualifiedName) {
        self.imports.insert(name);
    }

    pub fn is_imported(&self, name: &QualifiedName) -> bool {
        self.imports.contains(name)
    }

    /// Qualify a name as written inside `namespace`.
    ///
    /// Dotted names are taken as already qualified. A bare name matching
    /// exactly one import resolves to it; several matches are ambiguous.
    pub fn qualify(&self, namespace: &str, name: &str) -> Result<QualifiedName, RegistryError> {
        if name.contains('.') {
            return Ok(QualifiedName::parse(name));
        }
        let bare = QualifiedName::parse(name);
        if let Some(primitive) = PrimitiveType::from_name(&bare) {
            return Ok(primitive.qualified_name());
        }
        if name == VOID_NAME {
            return Ok(QualifiedName::new(TAXI_NAMESPACE, VOID_NAME));
        }

        let candidates: Vec<&QualifiedName> =
            self.imports.iter().filter(|i| i.name() == name).collect();
        match candidates.as_slice() {
            [] => Ok(QualifiedName::new(namespace, name)),
            [single] => Ok((*single).clone()),
            many => Err(RegistryError::AmbiguousName {
                name: name.to_string(),
                candidates: many
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    fn push(&mut self, body: TypeBody, origin: Span) -> TypeId {
        let id = TypeId(self.records.len() as u32);
        self.index.insert(body.name().clone(), id);
        self.records.push(TypeRecord { body, origin });
        id
    }
}

/// Why an extension was refused, before names are rendered.
enum ExtensionRejection {
    Refinement(crate::resolve::extensions::RefinementConflict),
    Invalid(String),
}

impl RegistryError {
    /// Report this error as a diagnostic at `span`.
    pub fn into_diagnostic(self, span: Span) -> CompileError {
        let kind = match &self {
            RegistryError::Redefinition(_) | RegistryError::KindMismatch { .. } => {
                ErrorKind::DuplicateDefinition
            }
            RegistryError::AmbiguousName { .. } => ErrorKind::AmbiguousName,
        };
        CompileError::new(kind, span, self.to_string())
    }
}

fn is_builtin(name: &QualifiedName, simple: &str) -> bool {
    name.name() == simple && (name.is_unqualified() || name.namespace() == TAXI_NAMESPACE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumValue, Field, FieldExtension};

    fn object(fields: Vec<Field>) -> UserTypeDefinition {
        UserTypeDefinition::Object(ObjectTypeDefinition::new(fields))
    }

    #[test]
    fn test_primitives_do_not_create_placeholders() {
        let mut registry = TypeRegistry::new();
        let string = registry.get_or_create(&"String".into(), Span::unknown());
        let decimal = registry.get_or_create(&"lang.taxi.Decimal".into(), Span::unknown());
        let void = registry.get_or_create(&"Void".into(), Span::unknown());
        assert_eq!(string, TypeRef::Primitive(PrimitiveType::String));
        assert_eq!(decimal, TypeRef::Primitive(PrimitiveType::Decimal));
        assert_eq!(void, TypeRef::Void);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_array_of_placeholder() {
        let mut registry = TypeRegistry::new();
        let name = QualifiedName::parse("lang.taxi.Array")
            .with_parameters(vec![QualifiedName::parse("Trade")]);
        let array = registry.get_or_create(&name, Span::unknown());
        let TypeRef::Array(member) = &array else {
            panic!("expected array, got {array:?}");
        };
        assert!(member.user_id().is_some());
        assert_eq!(registry.type_name(&array).to_string(), "lang.taxi.Array<Trade>");
    }

    #[test]
    fn test_imports_do_not_create_placeholders() {
        let mut registry = TypeRegistry::new();
        let name = QualifiedName::parse("com.shared.Isin");
        registry.add_import(name.clone());
        assert_eq!(
            registry.get_or_create(&name, Span::unknown()),
            TypeRef::UnresolvedImport(name)
        );
        assert!(registry.assert_all_resolved().is_ok());
    }

    #[test]
    fn test_placeholder_same_id_across_references() {
        let mut registry = TypeRegistry::new();
        let name = QualifiedName::parse("Person");
        let a = registry.get_or_create(&name, Span::unknown());
        let b = registry.get_or_create(&name, Span::unknown());
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_fills_placeholder_in_place() {
        let mut registry = TypeRegistry::new();
        let name = QualifiedName::parse("Person");
        let early = registry.get_or_create(&name, Span::unknown());
        let id = registry
            .register(&name, object(vec![Field::new("name", PrimitiveType::String.into())]))
            .unwrap();
        assert_eq!(early, TypeRef::User(id));
        let person = registry.object_type(id).unwrap();
        assert!(person.is_defined());
        assert_eq!(person.fields().len(), 1);
    }

    #[test]
    fn test_redefinition_rejected() {
        let mut registry = TypeRegistry::new();
        let name = QualifiedName::parse("Person");
        registry.register(&name, object(vec![])).unwrap();
        let err = registry.register(&name, object(vec![])).unwrap_err();
        assert_eq!(err, RegistryError::Redefinition(name));
        assert_eq!(
            err.into_diagnostic(Span::unknown()).kind,
            ErrorKind::DuplicateDefinition
        );
    }

    #[test]
    fn test_placeholder_changes_kind() {
        let mut registry = TypeRegistry::new();
        let name = QualifiedName::parse("Currency");
        let early = registry.get_or_create(&name, Span::unknown());
        let def = EnumDefinition::new(vec![EnumValue::new(&name, "GBP")]);
        let id = registry.register(&name, UserTypeDefinition::Enum(def)).unwrap();
        assert_eq!(early, TypeRef::User(id));
        assert!(registry.enum_type(id).is_some());
        assert!(registry.object_type(id).is_none());
    }

    #[test]
    fn test_extended_placeholder_keeps_kind() {
        let mut registry = TypeRegistry::new();
        let name = QualifiedName::parse("Currency");
        assert!(registry
            .add_extension(&name, TypeExtension::Object(ObjectTypeExtension::new()))
            .is_none());
        let err = registry
            .register(&name, UserTypeDefinition::Enum(EnumDefinition::new(vec![])))
            .unwrap_err();
        assert!(matches!(err, RegistryError::KindMismatch { .. }));
    }

    #[test]
    fn test_assert_all_resolved_reports_every_placeholder() {
        let mut registry = TypeRegistry::new();
        registry.get_or_create(&"Zorp".into(), Span::new(0, 3, 7, 1));
        registry.get_or_create(&"Blip".into(), Span::unknown());
        let errors = registry.assert_all_resolved().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "Zorp is not defined");
        assert_eq!(errors[0].span, Span::new(0, 3, 7, 1));
        assert_eq!(errors[1].kind, ErrorKind::UnresolvedType);
    }

    #[test]
    fn test_type_list_skips_placeholders() {
        let mut registry = TypeRegistry::new();
        registry.get_or_create(&"Later".into(), Span::unknown());
        registry.register(&"Now".into(), object(vec![])).unwrap();
        let names: Vec<String> = registry
            .type_list()
            .map(|(_, record)| record.name().to_string())
            .collect();
        assert_eq!(names, vec!["Now"]);
    }

    #[test]
    fn test_refinement_conflict_message() {
        let mut registry = TypeRegistry::new();
        let name = QualifiedName::parse("Person");
        registry
            .register(&name, object(vec![Field::new("name", PrimitiveType::String.into())]))
            .unwrap();
        let first = registry.get_or_create(&"FirstName".into(), Span::unknown());
        let second = registry.get_or_create(&"LastName".into(), Span::unknown());

        let ext = |t: TypeRef| {
            TypeExtension::Object(
                ObjectTypeExtension::new().with_field(FieldExtension::new("name").refined_to(t)),
            )
        };
        assert!(registry.add_extension(&name, ext(first)).is_none());
        let err = registry.add_extension(&name, ext(second)).unwrap();
        assert_eq!(err.kind, ErrorKind::FieldRefinementConflict);
        assert_eq!(
            err.message,
            "Cannot refine field name to LastName as it has already been refined to FirstName"
        );
    }

    #[test]
    fn test_annotation_types_reject_extensions() {
        let mut registry = TypeRegistry::new();
        let name = QualifiedName::parse("Audited");
        registry
            .register(
                &name,
                UserTypeDefinition::Annotation(AnnotationTypeDefinition::new(vec![])),
            )
            .unwrap();
        let err = registry
            .add_extension(&name, TypeExtension::Object(ObjectTypeExtension::new()))
            .unwrap();
        assert_eq!(err.kind, ErrorKind::InvalidExtension);
    }

    #[test]
    fn test_extending_undefined_enum() {
        let mut registry = TypeRegistry::new();
        let err = registry
            .add_extension(&"Currency".into(), TypeExtension::Enum(EnumExtension::new()))
            .unwrap();
        assert_eq!(err.kind, ErrorKind::InvalidExtension);
        assert!(err.message.contains("Currency"));
    }

    #[test]
    fn test_qualify() {
        let mut registry = TypeRegistry::new();
        assert_eq!(
            registry.qualify("com.acme", "Money").unwrap(),
            QualifiedName::parse("com.acme.Money")
        );
        assert_eq!(
            registry.qualify("com.acme", "other.Thing").unwrap(),
            QualifiedName::parse("other.Thing")
        );
        assert_eq!(
            registry.qualify("com.acme", "String").unwrap(),
            QualifiedName::parse("lang.taxi.String")
        );

        registry.add_import("com.shared.Isin".into());
        assert_eq!(
            registry.qualify("com.acme", "Isin").unwrap(),
            QualifiedName::parse("com.shared.Isin")
        );

        registry.add_import("com.other.Isin".into());
        assert!(matches!(
            registry.qualify("com.acme", "Isin"),
            Err(RegistryError::AmbiguousName { .. })
        ));
    }
}
