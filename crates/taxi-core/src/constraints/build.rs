//! Build pass: parsed constraint expressions to typed constraints.

use tracing::trace;

use crate::constraints::providers::{ConstraintExpr, ConstraintProviders, TypeNameResolver};
use crate::constraints::Constraint;
use crate::error::{CompileError, ErrorKind};
use crate::model::TypeRef;

/// Build every expression attached to one declaration.
///
/// Failures are collected so that one bad constraint does not hide the
/// rest; the constraints that did build are returned alongside them.
pub fn build_constraints(
    exprs: &[ConstraintExpr],
    target_type: &TypeRef,
    providers: &ConstraintProviders,
    resolver: &mut dyn TypeNameResolver,
) -> (Vec<Constraint>, Vec<CompileError>) {
    let mut constraints = Vec::with_capacity(exprs.len());
    let mut errors = Vec::new();

    for expr in exprs {
        let Some(provider) = providers.select(expr) else {
            errors.push(CompileError::new(
                ErrorKind::ConstraintProviderNotFound,
                expr.location(),
                format!("No constraint provider found for {} constraint", expr.shape().name()),
            ));
            continue;
        };
        trace!(provider = provider.name(), shape = expr.shape().name(), "selected constraint provider");
        match provider.build(expr, target_type, resolver) {
            Ok(constraint) => constraints.push(constraint),
            Err(build_errors) => errors.extend(build_errors),
        }
    }

    (constraints, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::providers::{ComparisonValue, PropertyRef};
    use crate::expression::{Expression, Operator};
    use crate::foundation::{Span, Value};
    use crate::model::PrimitiveType;
    use crate::registry::TypeRegistry;

    #[test]
    fn test_errors_do_not_stop_later_constraints() {
        let mut registry = TypeRegistry::new();
        let exprs = vec![
            ConstraintExpr::Expression(Expression::literal(Value::Int(1), PrimitiveType::Int.into())),
            ConstraintExpr::PropertyComparison {
                property: PropertyRef::ThisField("this.currency".into()),
                operator: Operator::Equal,
                value: ComparisonValue::Literal("GBP".into()),
                location: Span::unknown(),
            },
        ];
        let (constraints, errors) = build_constraints(
            &exprs,
            &TypeRef::Void,
            &ConstraintProviders::standard(),
            &mut registry,
        );
        assert_eq!(constraints.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::ConstraintProviderNotFound);
    }

    #[test]
    fn test_empty_table_finds_nothing() {
        let mut registry = TypeRegistry::new();
        let exprs = vec![ConstraintExpr::DerivedFrom {
            path: "request.id".into(),
            location: Span::unknown(),
        }];
        let (constraints, errors) =
            build_constraints(&exprs, &TypeRef::Void, &ConstraintProviders::empty(), &mut registry);
        assert!(constraints.is_empty());
        assert!(errors[0].message.contains("derived value"));
    }
}
