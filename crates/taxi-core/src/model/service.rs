//! Services, operations, and the constraint targets they own.

use crate::constraints::Constraint;
use crate::foundation::{QualifiedName, Span};
use crate::model::object::Annotation;
use crate::model::types::TypeRef;

#[derive(Debug, Clone)]
pub struct Service {
    pub name: QualifiedName,
    pub operations: Vec<Operation>,
    pub annotations: Vec<Annotation>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl Service {
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            operations: Vec::new(),
            annotations: Vec::new(),
            type_doc: None,
            location: Span::unknown(),
        }
    }

    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.name == name)
    }

    pub fn contains_operation(&self, name: &str) -> bool {
        self.operation(name).is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Operation {
    pub name: String,
    /// e.g. `read` or `write`
    pub scope: Option<String>,
    pub annotations: Vec<Annotation>,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeRef,
    pub contract: Option<OperationContract>,
    pub type_doc: Option<String>,
    pub location: Span,
}

impl Operation {
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
    }
}

/// An operation parameter; parameters may be anonymous.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: Option<String>,
    pub type_ref: TypeRef,
    pub annotations: Vec<Annotation>,
    pub constraints: Vec<Constraint>,
    pub nullable: bool,
    pub location: Span,
}

/// Constraints on what an operation returns.
#[derive(Debug, Clone)]
pub struct OperationContract {
    pub return_type: TypeRef,
    pub constraints: Vec<Constraint>,
}
