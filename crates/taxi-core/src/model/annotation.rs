//! Annotation type declarations, e.g. `annotation Deprecated { reason : String }`.

use std::convert::Infallible;

use crate::foundation::Span;
use crate::model::object::{Annotation, Field};
use crate::model::user_type::{Declaration, UserType};

/// Annotation types never accept extensions.
pub type AnnotationType = UserType<AnnotationTypeDefinition, Infallible>;

#[derive(Debug, Clone)]
pub struct AnnotationTypeDefinition {
    pub fields: Vec<Field>,
    pub annotations: Vec<Annotation>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl AnnotationTypeDefinition {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            annotations: Vec::new(),
            type_doc: None,
            location: Span::unknown(),
        }
    }

    pub fn at(mut self, location: Span) -> Self {
        self.location = location;
        self
    }
}

impl Declaration for AnnotationTypeDefinition {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn type_doc(&self) -> Option<&str> {
        self.type_doc.as_deref()
    }
}

impl AnnotationType {
    pub fn fields(&self) -> &[Field] {
        self.definition()
            .map(|def| def.fields.as_slice())
            .unwrap_or_default()
    }
}
