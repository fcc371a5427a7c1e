//! Object types, their fields, and object-type extensions.

use indexmap::{IndexMap, IndexSet};

use crate::constraints::Constraint;
use crate::foundation::{QualifiedName, Span, Value};
use crate::model::types::TypeRef;
use crate::model::user_type::{Declaration, UserType};

/// An object type: definition plus extensions.
pub type ObjectType = UserType<ObjectTypeDefinition, ObjectTypeExtension>;

/// Type-level modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Usable as a request object for operations
    Parameter,
    /// Cannot be constructed by combining other values
    Closed,
}

impl Modifier {
    pub fn token(self) -> &'static str {
        match self {
            Modifier::Parameter => "parameter",
            Modifier::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldModifier {
    Closed,
}

/// An annotation application, e.g. `@Deprecated(reason = "use Price")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: QualifiedName,
    pub parameters: IndexMap<String, Value>,
}

impl Annotation {
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            parameters: IndexMap::new(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }
}

/// A field of an object type.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub type_ref: TypeRef,
    pub nullable: bool,
    pub modifiers: Vec<FieldModifier>,
    pub annotations: Vec<Annotation>,
    pub constraints: Vec<Constraint>,
    pub type_doc: Option<String>,
    pub default_value: Option<Value>,
    pub location: Span,
}

impl Field {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            nullable: false,
            modifiers: Vec::new(),
            annotations: Vec::new(),
            constraints: Vec::new(),
            type_doc: None,
            default_value: None,
            location: Span::unknown(),
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn at(mut self, location: Span) -> Self {
        self.location = location;
        self
    }

    pub fn is_closed(&self) -> bool {
        self.modifiers.contains(&FieldModifier::Closed)
    }

    pub fn has_annotation(&self, name: &QualifiedName) -> bool {
        self.annotations.iter().any(|a| &a.name == name)
    }
}

/// Structural equality, ignoring source location.
///
/// The referenced type is compared by id only, so a field whose type is
/// its own enclosing type compares without recursion.
impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_ref == other.type_ref
            && self.nullable == other.nullable
            && self.modifiers == other.modifiers
            && self.annotations == other.annotations
            && self.constraints == other.constraints
            && self.type_doc == other.type_doc
            && self.default_value == other.default_value
    }
}

/// Primary declaration of an object type.
#[derive(Debug, Clone)]
pub struct ObjectTypeDefinition {
    pub fields: Vec<Field>,
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<Modifier>,
    pub inherits_from: IndexSet<TypeRef>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl ObjectTypeDefinition {
    /// Build a definition; structurally identical fields collapse to one.
    pub fn new(fields: Vec<Field>) -> Self {
        let mut unique: Vec<Field> = Vec::with_capacity(fields.len());
        for field in fields {
            if !unique.contains(&field) {
                unique.push(field);
            }
        }
        Self {
            fields: unique,
            annotations: Vec::new(),
            modifiers: Vec::new(),
            inherits_from: IndexSet::new(),
            type_doc: None,
            location: Span::unknown(),
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn inheriting(mut self, supertypes: impl IntoIterator<Item = TypeRef>) -> Self {
        self.inherits_from.extend(supertypes);
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

impl Declaration for ObjectTypeDefinition {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn type_doc(&self) -> Option<&str> {
        self.type_doc.as_deref()
    }
}

/// Additive declaration for an existing object type.
#[derive(Debug, Clone, Default)]
pub struct ObjectTypeExtension {
    pub annotations: Vec<Annotation>,
    pub field_extensions: Vec<FieldExtension>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl ObjectTypeExtension {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_field(mut self, extension: FieldExtension) -> Self {
        self.field_extensions.push(extension);
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

    pub fn field_extension(&self, name: &str) -> Option<&FieldExtension> {
        self.field_extensions.iter().find(|ext| ext.name == name)
    }
}

impl Declaration for ObjectTypeExtension {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn type_doc(&self) -> Option<&str> {
        self.type_doc.as_deref()
    }
}

/// Per-field part of an object-type extension.
#[derive(Debug, Clone)]
pub struct FieldExtension {
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub refinement: Option<FieldRefinement>,
}

impl FieldExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            refinement: None,
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn refined_to(mut self, type_ref: TypeRef) -> Self {
        self.refinement = Some(FieldRefinement {
            type_ref,
            default_value: None,
        });
        self
    }

    pub fn refined_with_default(mut self, type_ref: TypeRef, default_value: Value) -> Self {
        self.refinement = Some(FieldRefinement {
            type_ref,
            default_value: Some(default_value),
        });
        self
    }
}

/// Narrowed type for a field, optionally with a default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRefinement {
    pub type_ref: TypeRef,
    pub default_value: Option<Value>,
}
