//! Type aliases.

use crate::foundation::Span;
use crate::model::object::Annotation;
use crate::model::types::TypeRef;
use crate::model::user_type::{Declaration, UserType};

pub type TypeAlias = UserType<TypeAliasDefinition, TypeAliasExtension>;

#[derive(Debug, Clone)]
pub struct TypeAliasDefinition {
    pub aliased: TypeRef,
    pub annotations: Vec<Annotation>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl TypeAliasDefinition {
    pub fn new(aliased: TypeRef) -> Self {
        Self {
            aliased,
            annotations: Vec::new(),
            type_doc: None,
            location: Span::unknown(),
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
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

impl Declaration for TypeAliasDefinition {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn type_doc(&self) -> Option<&str> {
        self.type_doc.as_deref()
    }
}

/// Alias extensions only contribute annotations and docs.
#[derive(Debug, Clone, Default)]
pub struct TypeAliasExtension {
    pub annotations: Vec<Annotation>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl TypeAliasExtension {
    pub fn new(annotations: Vec<Annotation>) -> Self {
        Self {
            annotations,
            ..Self::default()
        }
    }
}

impl Declaration for TypeAliasExtension {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn type_doc(&self) -> Option<&str> {
        self.type_doc.as_deref()
    }
}

impl TypeAlias {
    /// Directly aliased type, `None` while undefined.
    pub fn aliased_type(&self) -> Option<&TypeRef> {
        self.definition().map(|def| &def.aliased)
    }
}
