//! Constraints on fields, operation parameters, and operation results.
//!
//! Constraints go through two passes that never interleave:
//!
//! 1. **Build** ([`build`]): as each declaration arrives, a parsed
//!    [`ConstraintExpr`] is turned into a typed [`Constraint`] by the first
//!    matching provider in a [`ConstraintProviders`] table.
//! 2. **Validate** ([`validate`]): once the whole document is linked,
//!    validating providers check each constraint against its target's
//!    fields, which may come from extensions declared after the constraint.
//!
//! # Pipeline Position
//!
//! ```text
//! Declarations → Registry → Extensions → Resolution check → Validation
//!      ^^^                                                     ^^^
//!   build pass                                            validate pass
//! ```

pub mod build;
pub mod providers;
pub mod validate;

use thiserror::Error;

use crate::error::{CompileError, ErrorKind};
use crate::expression::{Expression, ExpressionKind, Operator};
use crate::foundation::{AttributePath, QualifiedName, Span, Value};
use crate::model::{Field, OperationContract, Parameter, TypeId, TypeRef};
use crate::registry::TypeRegistry;

pub use build::build_constraints;
pub use providers::{
    ComparisonValue, ConstraintExpr, ConstraintProvider, ConstraintProviders, ConstraintShape,
    LegacySubject, PropertyRef, TypeNameResolver, ValidatingConstraintProvider,
};
pub use validate::{validate_constraints, ConstraintSite, ValidationContext};

/// How a constraint names the property it talks about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyIdentifier {
    /// `this.currency`
    ByName(AttributePath),
    /// `Currency`, meaning "the one field of that type"
    ByType(TypeRef),
}

/// Right-hand side of a property constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueExpression {
    Constant(Value),
    /// Path into the operation's parameters, e.g. `request.currency`
    Relative(AttributePath),
}

impl ValueExpression {
    pub fn as_taxi(&self) -> String {
        match self {
            ValueExpression::Constant(value) => value.as_taxi(),
            ValueExpression::Relative(path) => path.to_string(),
        }
    }
}

/// A typed constraint attached to a [`ConstraintTarget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Arbitrary boolean expression, already type-checked
    Expression { expression: Expression, location: Span },
    /// `<property> <op> <value>`
    PropertyToParameter {
        property: PropertyIdentifier,
        operator: Operator,
        expected_value: ValueExpression,
        location: Span,
    },
    /// The operation's result is derived from the input at `path`
    ReturnValueDerivedFromParameter { path: AttributePath, location: Span },
    /// Legacy `field = constant`
    NamedFieldConstantValue {
        field_name: String,
        expected_value: Value,
        location: Span,
    },
    /// Legacy `Type = constant`
    TypedFieldConstantValue {
        type_ref: TypeRef,
        expected_value: Value,
        location: Span,
    },
}

impl Constraint {
    pub fn location(&self) -> Span {
        match self {
            Constraint::Expression { location, .. }
            | Constraint::PropertyToParameter { location, .. }
            | Constraint::ReturnValueDerivedFromParameter { location, .. }
            | Constraint::NamedFieldConstantValue { location, .. }
            | Constraint::TypedFieldConstantValue { location, .. } => *location,
        }
    }

    /// Render back to Taxi source.
    pub fn as_taxi(&self, registry: &TypeRegistry) -> String {
        match self {
            Constraint::Expression { expression, .. } => expression.as_taxi(registry),
            Constraint::PropertyToParameter {
                property,
                operator,
                expected_value,
                ..
            } => format!(
                "{} {} {}",
                property.as_taxi(registry),
                operator,
                expected_value.as_taxi()
            ),
            Constraint::ReturnValueDerivedFromParameter { path, .. } => format!("from {}", path),
            Constraint::NamedFieldConstantValue {
                field_name,
                expected_value,
                ..
            } => format!("{} = {}", field_name, expected_value.as_taxi()),
            Constraint::TypedFieldConstantValue {
                type_ref,
                expected_value,
                ..
            } => format!("{} = {}", registry.type_name(type_ref), expected_value.as_taxi()),
        }
    }

    /// Rewrite `Type <op> literal` expressions as a property constraint.
    pub fn to_property_to_parameter(&self) -> Result<Constraint, CompileError> {
        let unsupported = || {
            CompileError::new(
                ErrorKind::MalformedConstraint,
                self.location(),
                "Only expressions of the form `Type <op> literal` can be converted to a property constraint"
                    .to_string(),
            )
        };
        let Constraint::Expression { expression, location } = self else {
            return Err(unsupported());
        };
        let ExpressionKind::Operator { lhs, operator, rhs } = &expression.kind else {
            return Err(unsupported());
        };
        match (&lhs.kind, &rhs.kind) {
            (ExpressionKind::TypeExpression(type_ref), ExpressionKind::Literal(value)) => {
                Ok(Constraint::PropertyToParameter {
                    property: PropertyIdentifier::ByType(type_ref.clone()),
                    operator: *operator,
                    expected_value: ValueExpression::Constant(value.clone()),
                    location: *location,
                })
            }
            _ => Err(unsupported()),
        }
    }
}

/// Why a property identifier did not resolve to exactly one field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropertyResolutionError {
    #[error("{type_name} is not an object type")]
    NotAnObject { type_name: QualifiedName },
    #[error("Type {type_name} does not contain a property {property}")]
    NoSuchField {
        type_name: QualifiedName,
        property: String,
    },
    #[error("Type {type_name} does not contain a property of type {field_type}")]
    NoFieldOfType {
        type_name: QualifiedName,
        field_type: QualifiedName,
    },
    #[error("Type {type_name} has multiple fields with type {field_type} ({candidates}), so the reference is ambiguous")]
    Ambiguous {
        type_name: QualifiedName,
        field_type: QualifiedName,
        candidates: String,
    },
}

impl PropertyIdentifier {
    /// Human-readable form used in diagnostics.
    pub fn description(&self, registry: &TypeRegistry) -> String {
        match self {
            PropertyIdentifier::ByName(path) => format!("field {}", path.without_this()),
            PropertyIdentifier::ByType(type_ref) => format!("type {}", registry.type_name(type_ref)),
        }
    }

    pub fn as_taxi(&self, registry: &TypeRegistry) -> String {
        match self {
            PropertyIdentifier::ByName(path) => format!("this.{}", path.without_this()),
            PropertyIdentifier::ByType(type_ref) => registry.type_name(type_ref).to_string(),
        }
    }

    /// Find the field of `object` this identifier points at.
    ///
    /// Names are followed through nested object fields. A type identifier
    /// matches fields whose type is, or inherits from, the identified type;
    /// with several matches, a single exact match still wins.
    pub fn resolve_against(
        &self,
        registry: &TypeRegistry,
        object: TypeId,
    ) -> Result<Field, PropertyResolutionError> {
        match self {
            PropertyIdentifier::ByName(path) => resolve_path(registry, object, &path.without_this()),
            PropertyIdentifier::ByType(field_type) => {
                let type_name = registry.type_name(&TypeRef::User(object));
                let mut candidates: Vec<Field> = registry
                    .all_fields(object)
                    .into_iter()
                    .filter(|f| registry.is_assignable_to(&f.type_ref, field_type))
                    .collect();
                if candidates.len() > 1 {
                    let mut exact: Vec<Field> = candidates
                        .iter()
                        .filter(|f| &f.type_ref == field_type)
                        .cloned()
                        .collect();
                    if exact.len() == 1 {
                        if let Some(field) = exact.pop() {
                            return Ok(field);
                        }
                    }
                    return Err(PropertyResolutionError::Ambiguous {
                        type_name,
                        field_type: registry.type_name(field_type),
                        candidates: candidates
                            .iter()
                            .map(|f| f.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    });
                }
                candidates
                    .pop()
                    .ok_or_else(|| PropertyResolutionError::NoFieldOfType {
                        type_name,
                        field_type: registry.type_name(field_type),
                    })
            }
        }
    }
}

pub(crate) fn resolve_path(
    registry: &TypeRegistry,
    object: TypeId,
    path: &AttributePath,
) -> Result<Field, PropertyResolutionError> {
    let mut current = object;
    let mut parts = path.parts().iter().peekable();
    while let Some(part) = parts.next() {
        let type_name = registry.type_name(&TypeRef::User(current));
        let field = registry
            .field(current, part)
            .ok_or_else(|| PropertyResolutionError::NoSuchField {
                type_name,
                property: part.clone(),
            })?;
        if parts.peek().is_none() {
            return Ok(field);
        }
        current = registry.unwrap_to_object(&field.type_ref).ok_or_else(|| {
            PropertyResolutionError::NotAnObject {
                type_name: registry.type_name(&field.type_ref),
            }
        })?;
    }
    Err(PropertyResolutionError::NoSuchField {
        type_name: registry.type_name(&TypeRef::User(object)),
        property: String::new(),
    })
}

/// Something that owns constraints.
pub trait ConstraintTarget {
    /// e.g. `param source`, `field currency`, `Operation returning Money`
    fn description(&self, registry: &TypeRegistry) -> String;
    fn constraints(&self) -> &[Constraint];
    /// The type the constraints are evaluated against
    fn target_type(&self) -> &TypeRef;
}

impl ConstraintTarget for Field {
    fn description(&self, _registry: &TypeRegistry) -> String {
        format!("field {}", self.name)
    }

    fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn target_type(&self) -> &TypeRef {
        &self.type_ref
    }
}

impl ConstraintTarget for Parameter {
    fn description(&self, _registry: &TypeRegistry) -> String {
        match &self.name {
            Some(name) => format!("param {}", name),
            None => "unnamed param".to_string(),
        }
    }

    fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn target_type(&self) -> &TypeRef {
        &self.type_ref
    }
}

impl ConstraintTarget for OperationContract {
    fn description(&self, registry: &TypeRegistry) -> String {
        format!("Operation returning {}", registry.type_name(&self.return_type))
    }

    fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn target_type(&self) -> &TypeRef {
        &self.return_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ObjectTypeDefinition, PrimitiveType};
    use crate::registry::UserTypeDefinition;

    fn money_registry() -> (TypeRegistry, TypeId) {
        let mut registry = TypeRegistry::new();
        let currency = registry.get_or_create(&"Currency".into(), Span::unknown());
        let money = registry
            .register(
                &"Money".into(),
                UserTypeDefinition::Object(ObjectTypeDefinition::new(vec![
                    Field::new("amount", PrimitiveType::Decimal.into()),
                    Field::new("currency", currency),
                ])),
            )
            .unwrap();
        (registry, money)
    }

    #[test]
    fn test_resolve_by_name() {
        let (registry, money) = money_registry();
        let field = PropertyIdentifier::ByName("this.currency".into())
            .resolve_against(&registry, money)
            .unwrap();
        assert_eq!(field.name, "currency");

        let err = PropertyIdentifier::ByName("this.ccy".into())
            .resolve_against(&registry, money)
            .unwrap_err();
        assert_eq!(err.to_string(), "Type Money does not contain a property ccy");
    }

    #[test]
    fn test_resolve_by_type() {
        let (registry, money) = money_registry();
        let currency = TypeRef::User(registry.id_of(&"Currency".into()).unwrap());
        let field = PropertyIdentifier::ByType(currency)
            .resolve_against(&registry, money)
            .unwrap();
        assert_eq!(field.name, "currency");

        let err = PropertyIdentifier::ByType(PrimitiveType::Int.into())
            .resolve_against(&registry, money)
            .unwrap_err();
        assert!(matches!(err, PropertyResolutionError::NoFieldOfType { .. }));
    }

    #[test]
    fn test_resolve_by_type_ambiguous() {
        let mut registry = TypeRegistry::new();
        let quote = registry
            .register(
                &"Quote".into(),
                UserTypeDefinition::Object(ObjectTypeDefinition::new(vec![
                    Field::new("bid", PrimitiveType::Decimal.into()),
                    Field::new("ask", PrimitiveType::Decimal.into()),
                ])),
            )
            .unwrap();
        let err = PropertyIdentifier::ByType(PrimitiveType::Decimal.into())
            .resolve_against(&registry, quote)
            .unwrap_err();
        assert!(err.to_string().contains("ambiguous"));
    }

    #[test]
    fn test_as_taxi() {
        let (registry, _) = money_registry();
        let constraint = Constraint::PropertyToParameter {
            property: PropertyIdentifier::ByName("currency".into()),
            operator: Operator::Equal,
            expected_value: ValueExpression::Constant("GBP".into()),
            location: Span::unknown(),
        };
        assert_eq!(constraint.as_taxi(&registry), "this.currency == \"GBP\"");

        let derived = Constraint::ReturnValueDerivedFromParameter {
            path: "request.amount".into(),
            location: Span::unknown(),
        };
        assert_eq!(derived.as_taxi(&registry), "from request.amount");
    }

    #[test]
    fn test_expression_downgrade() {
        let (registry, _) = money_registry();
        let currency = TypeRef::User(registry.id_of(&"Currency".into()).unwrap());
        let expression = Expression::comparison(
            Expression::type_expression(currency.clone()),
            Operator::Equal,
            Expression::literal("GBP".into(), PrimitiveType::String.into()),
        );
        let constraint = Constraint::Expression {
            expression,
            location: Span::unknown(),
        };
        let downgraded = constraint.to_property_to_parameter().unwrap();
        assert_eq!(
            downgraded,
            Constraint::PropertyToParameter {
                property: PropertyIdentifier::ByType(currency),
                operator: Operator::Equal,
                expected_value: ValueExpression::Constant("GBP".into()),
                location: Span::unknown(),
            }
        );

        let other = Constraint::ReturnValueDerivedFromParameter {
            path: "x".into(),
            location: Span::unknown(),
        };
        assert_eq!(
            other.to_property_to_parameter().unwrap_err().kind,
            ErrorKind::MalformedConstraint
        );
    }

    #[test]
    fn test_target_descriptions() {
        let (registry, money) = money_registry();
        let param = Parameter {
            name: Some("source".into()),
            type_ref: TypeRef::User(money),
            annotations: vec![],
            constraints: vec![],
            nullable: false,
            location: Span::unknown(),
        };
        assert_eq!(param.description(&registry), "param source");
        let contract = OperationContract {
            return_type: TypeRef::User(money),
            constraints: vec![],
        };
        assert_eq!(contract.description(&registry), "Operation returning Money");
    }
}
