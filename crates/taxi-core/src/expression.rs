//! Pre-type-checked expressions supplied by the expression compiler.
//!
//! This crate does not parse or evaluate expressions. It stores them on
//! constraints, renders them back to source, and inspects their shape when
//! converting a comparison into a property constraint.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::{AttributePath, Span, Value};
use crate::model::types::{PrimitiveType, TypeRef};
use crate::registry::TypeRegistry;

/// Comparison operators usable in constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThanOrEqual => "<=",
        }
    }

    /// Parse an operator token; both `=` and `==` mean equality.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "=" | "==" => Some(Operator::Equal),
            "!=" => Some(Operator::NotEqual),
            ">" => Some(Operator::GreaterThan),
            "<" => Some(Operator::LessThan),
            ">=" => Some(Operator::GreaterThanOrEqual),
            "<=" => Some(Operator::LessThanOrEqual),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionKind {
    Literal(Value),
    /// A bare type name, standing for "the value of that type"
    TypeExpression(TypeRef),
    FieldReference(AttributePath),
    Operator {
        lhs: Box<Expression>,
        operator: Operator,
        rhs: Box<Expression>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub return_type: TypeRef,
    pub location: Span,
}

impl Expression {
    pub fn literal(value: Value, return_type: TypeRef) -> Self {
        Self {
            kind: ExpressionKind::Literal(value),
            return_type,
            location: Span::unknown(),
        }
    }

    pub fn type_expression(type_ref: TypeRef) -> Self {
        Self {
            return_type: type_ref.clone(),
            kind: ExpressionKind::TypeExpression(type_ref),
            location: Span::unknown(),
        }
    }

    pub fn field_reference(path: AttributePath, return_type: TypeRef) -> Self {
        Self {
            kind: ExpressionKind::FieldReference(path),
            return_type,
            location: Span::unknown(),
        }
    }

    /// Binary comparison; comparisons always return `Boolean`.
    pub fn comparison(lhs: Expression, operator: Operator, rhs: Expression) -> Self {
        Self {
            location: lhs.location.merge(&rhs.location),
            kind: ExpressionKind::Operator {
                lhs: Box::new(lhs),
                operator,
                rhs: Box::new(rhs),
            },
            return_type: TypeRef::Primitive(PrimitiveType::Boolean),
        }
    }

    pub fn at(mut self, location: Span) -> Self {
        self.location = location;
        self
    }

    pub fn is_boolean(&self) -> bool {
        self.return_type == TypeRef::Primitive(PrimitiveType::Boolean)
    }

    pub fn as_taxi(&self, registry: &TypeRegistry) -> String {
        match &self.kind {
            ExpressionKind::Literal(value) => value.as_taxi(),
            ExpressionKind::TypeExpression(type_ref) => registry.type_name(type_ref).to_string(),
            ExpressionKind::FieldReference(path) => path.to_string(),
            ExpressionKind::Operator { lhs, operator, rhs } => format!(
                "{} {} {}",
                lhs.as_taxi(registry),
                operator,
                rhs.as_taxi(registry)
            ),
        }
    }
}
