//! Declaration events emitted by the parser.
//!
//! Type references inside declarations are already [`TypeRef`]s: the parser
//! resolves names through [`DocumentBuilder::resolve_type`](super::DocumentBuilder::resolve_type),
//! which creates placeholders for names it has not seen yet. Constraints
//! arrive unbuilt, as [`ConstraintExpr`]s.

use crate::constraints::ConstraintExpr;
use crate::foundation::{QualifiedName, Span, Value};
use crate::model::{Annotation, FieldModifier, Modifier, PrimitiveType, TypeRef};

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    pub type_ref: TypeRef,
    pub nullable: bool,
    pub modifiers: Vec<FieldModifier>,
    pub annotations: Vec<Annotation>,
    pub constraints: Vec<ConstraintExpr>,
    pub type_doc: Option<String>,
    pub default_value: Option<Value>,
    pub location: Span,
}

impl FieldDecl {
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

    pub fn with_constraint(mut self, constraint: ConstraintExpr) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn at(mut self, location: Span) -> Self {
        self.location = location;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ObjectTypeDecl {
    pub name: QualifiedName,
    pub fields: Vec<FieldDecl>,
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<Modifier>,
    pub inherits: Vec<TypeRef>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl ObjectTypeDecl {
    pub fn new(name: impl Into<QualifiedName>, fields: Vec<FieldDecl>) -> Self {
        Self {
            name: name.into(),
            fields,
            annotations: Vec::new(),
            modifiers: Vec::new(),
            inherits: Vec::new(),
            type_doc: None,
            location: Span::unknown(),
        }
    }

    pub fn inheriting(mut self, supertypes: Vec<TypeRef>) -> Self {
        self.inherits = supertypes;
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
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

#[derive(Debug, Clone, Default)]
pub struct EnumValueDecl {
    pub name: String,
    /// Defaults to the member name
    pub value: Option<Value>,
    pub annotations: Vec<Annotation>,
    pub synonyms: Vec<QualifiedName>,
    pub type_doc: Option<String>,
    pub is_default: bool,
}

impl EnumValueDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
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
pub struct EnumTypeDecl {
    pub name: QualifiedName,
    pub values: Vec<EnumValueDecl>,
    pub annotations: Vec<Annotation>,
    pub basic_type: Option<PrimitiveType>,
    pub lenient: bool,
    pub inherits: Vec<TypeRef>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl EnumTypeDecl {
    pub fn new(name: impl Into<QualifiedName>, values: Vec<EnumValueDecl>) -> Self {
        Self {
            name: name.into(),
            values,
            annotations: Vec::new(),
            basic_type: None,
            lenient: false,
            inherits: Vec::new(),
            type_doc: None,
            location: Span::unknown(),
        }
    }

    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// `enum Name inherits Base`
    pub fn inheriting(mut self, supertypes: Vec<TypeRef>) -> Self {
        self.inherits = supertypes;
        self
    }

    pub fn at(mut self, location: Span) -> Self {
        self.location = location;
        self
    }
}

#[derive(Debug, Clone)]
pub struct TypeAliasDecl {
    pub name: QualifiedName,
    pub aliased: TypeRef,
    pub annotations: Vec<Annotation>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl TypeAliasDecl {
    pub fn new(name: impl Into<QualifiedName>, aliased: TypeRef) -> Self {
        Self {
            name: name.into(),
            aliased,
            annotations: Vec::new(),
            type_doc: None,
            location: Span::unknown(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnnotationTypeDecl {
    pub name: QualifiedName,
    pub fields: Vec<FieldDecl>,
    pub annotations: Vec<Annotation>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl AnnotationTypeDecl {
    pub fn new(name: impl Into<QualifiedName>, fields: Vec<FieldDecl>) -> Self {
        Self {
            name: name.into(),
            fields,
            annotations: Vec::new(),
            type_doc: None,
            location: Span::unknown(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParameterDecl {
    pub name: Option<String>,
    pub type_ref: TypeRef,
    pub annotations: Vec<Annotation>,
    pub constraints: Vec<ConstraintExpr>,
    pub nullable: bool,
    pub location: Span,
}

impl ParameterDecl {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: Some(name.into()),
            type_ref,
            annotations: Vec::new(),
            constraints: Vec::new(),
            nullable: false,
            location: Span::unknown(),
        }
    }

    pub fn unnamed(type_ref: TypeRef) -> Self {
        Self {
            name: None,
            ..Self::new("", type_ref)
        }
    }

    pub fn with_constraint(mut self, constraint: ConstraintExpr) -> Self {
        self.constraints.push(constraint);
        self
    }
}

#[derive(Debug, Clone)]
pub struct OperationDecl {
    pub name: String,
    pub scope: Option<String>,
    pub annotations: Vec<Annotation>,
    pub parameters: Vec<ParameterDecl>,
    pub return_type: TypeRef,
    /// Constraints on the returned value
    pub contract: Vec<ConstraintExpr>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl OperationDecl {
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterDecl>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            scope: None,
            annotations: Vec::new(),
            parameters,
            return_type,
            contract: Vec::new(),
            type_doc: None,
            location: Span::unknown(),
        }
    }

    pub fn with_contract(mut self, constraint: ConstraintExpr) -> Self {
        self.contract.push(constraint);
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct ServiceDecl {
    pub name: QualifiedName,
    pub operations: Vec<OperationDecl>,
    pub annotations: Vec<Annotation>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl ServiceDecl {
    pub fn new(name: impl Into<QualifiedName>, operations: Vec<OperationDecl>) -> Self {
        Self {
            name: name.into(),
            operations,
            annotations: Vec::new(),
            type_doc: None,
            location: Span::unknown(),
        }
    }
}
