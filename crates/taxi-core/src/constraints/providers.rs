//! Constraint providers.
//!
//! A provider turns one syntactic shape of [`ConstraintExpr`] into a typed
//! [`Constraint`]. Providers that can also check the constraint against the
//! linked model implement [`ValidatingConstraintProvider`].
//!
//! # Selection contract
//!
//! [`ConstraintProviders`] keeps one ordered list per [`ConstraintShape`].
//! For a given expression, only the list for its shape is consulted and the
//! first provider whose [`ConstraintProvider::applies`] returns `true` is
//! used. Registration order is priority order. When no provider applies,
//! the build pass reports `ConstraintProviderNotFound`.

use indexmap::IndexMap;

use crate::constraints::validate::ConstraintSite;
use crate::constraints::{
    resolve_path, Constraint, ConstraintTarget, PropertyIdentifier, ValueExpression,
};
use crate::error::{CompileError, ErrorKind};
use crate::expression::{Expression, Operator};
use crate::foundation::{AttributePath, QualifiedName, Span, Value};
use crate::model::{Operation, TypeRef};
use crate::registry::TypeRegistry;

/// Property side of a parsed comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyRef {
    /// `this.currency`
    ThisField(AttributePath),
    /// `Currency`
    TypeName(QualifiedName),
}

/// Value side of a parsed comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonValue {
    Literal(Value),
    /// `request.currency`
    Path(AttributePath),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacySubject {
    FieldName(String),
    TypeName(QualifiedName),
}

/// A constraint as handed over by the parser, before typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintExpr {
    /// `this.currency == 'GBP'`, `Currency == 'GBP'`, `this.currency == request.currency`
    PropertyComparison {
        property: PropertyRef,
        operator: Operator,
        value: ComparisonValue,
        location: Span,
    },
    /// Pre-expression syntax: `currency = 'GBP'`
    LegacyConstant {
        subject: LegacySubject,
        value: Value,
        location: Span,
    },
    /// `from request.amount`
    DerivedFrom { path: AttributePath, location: Span },
    /// Anything else the expression compiler produced
    Expression(Expression),
}

/// Discriminant of [`ConstraintExpr`], the key of the provider table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintShape {
    PropertyComparison,
    LegacyConstant,
    DerivedFrom,
    Expression,
}

impl ConstraintShape {
    pub fn name(self) -> &'static str {
        match self {
            ConstraintShape::PropertyComparison => "property comparison",
            ConstraintShape::LegacyConstant => "constant value",
            ConstraintShape::DerivedFrom => "derived value",
            ConstraintShape::Expression => "expression",
        }
    }
}

impl ConstraintExpr {
    pub fn shape(&self) -> ConstraintShape {
        match self {
            ConstraintExpr::PropertyComparison { .. } => ConstraintShape::PropertyComparison,
            ConstraintExpr::LegacyConstant { .. } => ConstraintShape::LegacyConstant,
            ConstraintExpr::DerivedFrom { .. } => ConstraintShape::DerivedFrom,
            ConstraintExpr::Expression(_) => ConstraintShape::Expression,
        }
    }

    pub fn location(&self) -> Span {
        match self {
            ConstraintExpr::PropertyComparison { location, .. }
            | ConstraintExpr::LegacyConstant { location, .. }
            | ConstraintExpr::DerivedFrom { location, .. } => *location,
            ConstraintExpr::Expression(expression) => expression.location,
        }
    }
}

/// Resolves type names appearing inside constraint expressions.
pub trait TypeNameResolver {
    fn resolve_type_name(&mut self, name: &QualifiedName, location: Span) -> TypeRef;
}

impl TypeNameResolver for TypeRegistry {
    fn resolve_type_name(&mut self, name: &QualifiedName, location: Span) -> TypeRef {
        self.get_or_create(name, location)
    }
}

/// Builds constraints from one expression shape.
pub trait ConstraintProvider {
    fn name(&self) -> &'static str;

    /// The shape bucket this provider is registered under.
    fn shape(&self) -> ConstraintShape;

    fn applies(&self, expr: &ConstraintExpr) -> bool;

    fn build(
        &self,
        expr: &ConstraintExpr,
        target_type: &TypeRef,
        resolver: &mut dyn TypeNameResolver,
    ) -> Result<Constraint, Vec<CompileError>>;

    /// The validating half of this provider, if it has one.
    fn as_validator(&self) -> Option<&dyn ValidatingConstraintProvider> {
        None
    }
}

/// Checks built constraints against the linked model.
pub trait ValidatingConstraintProvider: ConstraintProvider {
    fn applies_to(&self, constraint: &Constraint) -> bool;

    fn validate(
        &self,
        constraint: &Constraint,
        target: &dyn ConstraintTarget,
        site: &ConstraintSite<'_>,
        registry: &TypeRegistry,
    ) -> Vec<CompileError>;
}

/// Priority-ordered provider table keyed by expression shape.
pub struct ConstraintProviders {
    by_shape: IndexMap<ConstraintShape, Vec<Box<dyn ConstraintProvider>>>,
}

impl ConstraintProviders {
    /// An empty table; every expression fails selection.
    pub fn empty() -> Self {
        Self {
            by_shape: IndexMap::new(),
        }
    }

    /// The built-in providers in their standard order.
    pub fn standard() -> Self {
        let mut providers = Self::empty();
        providers.register(Box::new(PropertyToParameterConstraintProvider));
        providers.register(Box::new(ReturnValueDerivedFromParameterConstraintProvider));
        providers.register(Box::new(ConstantValueConstraintProvider));
        providers.register(Box::new(ExpressionConstraintProvider));
        providers
    }

    /// Append a provider after every provider already registered for its shape.
    pub fn register(&mut self, provider: Box<dyn ConstraintProvider>) {
        self.by_shape.entry(provider.shape()).or_default().push(provider);
    }

    /// First provider for the expression's shape that applies.
    pub fn select(&self, expr: &ConstraintExpr) -> Option<&dyn ConstraintProvider> {
        self.by_shape
            .get(&expr.shape())?
            .iter()
            .find(|provider| provider.applies(expr))
            .map(|provider| provider.as_ref())
    }

    /// Every validating provider, in table order.
    pub fn validators(&self) -> impl Iterator<Item = &dyn ValidatingConstraintProvider> {
        self.by_shape
            .values()
            .flatten()
            .filter_map(|provider| provider.as_validator())
    }
}

impl Default for ConstraintProviders {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ConstraintProviders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.by_shape.values().flatten().map(|p| p.name()).collect();
        f.debug_struct("ConstraintProviders").field("providers", &names).finish()
    }
}

/// Diagnostic for a constraint that does not fit its target.
pub(crate) fn malformed(
    registry: &TypeRegistry,
    constraint: &Constraint,
    target: &dyn ConstraintTarget,
    reason: impl std::fmt::Display,
) -> CompileError {
    CompileError::new(
        ErrorKind::MalformedConstraint,
        constraint.location(),
        format!(
            "Constraint `{}` on {} type {} is malformed: {}",
            constraint.as_taxi(registry),
            target.description(registry),
            registry.type_name(target.target_type()),
            reason
        ),
    )
}

/// Check that `path` starts at a parameter of `operation` and resolves through it.
fn check_parameter_path(
    registry: &TypeRegistry,
    operation: &Operation,
    path: &AttributePath,
) -> Result<(), String> {
    let Some(head) = path.head() else {
        return Err("the path is empty".to_string());
    };
    let Some(parameter) = operation.parameter(head) else {
        return Err(format!(
            "operation {} does not declare a parameter named {}",
            operation.name, head
        ));
    };
    let rest = &path.parts()[1..];
    if rest.is_empty() {
        return Ok(());
    }
    let Some(object) = registry.unwrap_to_object(&parameter.type_ref) else {
        return Err(format!(
            "parameter {} has type {}, which has no properties",
            head,
            registry.type_name(&parameter.type_ref)
        ));
    };
    resolve_path(registry, object, &AttributePath::new(rest.to_vec()))
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Whether constraints on this type can only be checked by another compilation.
fn is_external(registry: &TypeRegistry, type_ref: &TypeRef) -> bool {
    matches!(
        registry.underlying_type(type_ref.member_type()),
        TypeRef::UnresolvedImport(_)
    )
}

/// `this.currency == 'GBP'`, `Currency == 'GBP'`, `this.currency == request.currency`.
#[derive(Debug, Default)]
pub struct PropertyToParameterConstraintProvider;

impl ConstraintProvider for PropertyToParameterConstraintProvider {
    fn name(&self) -> &'static str {
        "property-to-parameter"
    }

    fn shape(&self) -> ConstraintShape {
        ConstraintShape::PropertyComparison
    }

    fn applies(&self, expr: &ConstraintExpr) -> bool {
        match expr {
            ConstraintExpr::PropertyComparison {
                property: PropertyRef::ThisField(path),
                ..
            } => !path.without_this().is_empty(),
            ConstraintExpr::PropertyComparison { .. } => true,
            _ => false,
        }
    }

    fn build(
        &self,
        expr: &ConstraintExpr,
        _target_type: &TypeRef,
        resolver: &mut dyn TypeNameResolver,
    ) -> Result<Constraint, Vec<CompileError>> {
        let ConstraintExpr::PropertyComparison {
            property,
            operator,
            value,
            location,
        } = expr
        else {
            return Err(vec![wrong_shape(self, expr)]);
        };
        let property = match property {
            PropertyRef::ThisField(path) => PropertyIdentifier::ByName(path.without_this()),
            PropertyRef::TypeName(name) => {
                PropertyIdentifier::ByType(resolver.resolve_type_name(name, *location))
            }
        };
        let expected_value = match value {
            ComparisonValue::Literal(value) => ValueExpression::Constant(value.clone()),
            ComparisonValue::Path(path) => ValueExpression::Relative(path.clone()),
        };
        Ok(Constraint::PropertyToParameter {
            property,
            operator: *operator,
            expected_value,
            location: *location,
        })
    }

    fn as_validator(&self) -> Option<&dyn ValidatingConstraintProvider> {
        Some(self)
    }
}

impl ValidatingConstraintProvider for PropertyToParameterConstraintProvider {
    fn applies_to(&self, constraint: &Constraint) -> bool {
        matches!(constraint, Constraint::PropertyToParameter { .. })
    }

    fn validate(
        &self,
        constraint: &Constraint,
        target: &dyn ConstraintTarget,
        site: &ConstraintSite<'_>,
        registry: &TypeRegistry,
    ) -> Vec<CompileError> {
        let Constraint::PropertyToParameter {
            property,
            expected_value,
            ..
        } = constraint
        else {
            return Vec::new();
        };
        if is_external(registry, target.target_type()) {
            return Vec::new();
        }

        let mut errors = Vec::new();
        match registry.unwrap_to_object(target.target_type()) {
            Some(object) => {
                if let Err(reason) = property.resolve_against(registry, object) {
                    errors.push(malformed(registry, constraint, target, reason));
                }
            }
            None => errors.push(malformed(
                registry,
                constraint,
                target,
                format!(
                    "{} cannot be checked, as constraints are only supported on object types",
                    property.description(registry)
                ),
            )),
        }

        if let ValueExpression::Relative(path) = expected_value {
            match site {
                ConstraintSite::ReturnContract { operation } => {
                    if let Err(reason) = check_parameter_path(registry, operation, path) {
                        errors.push(malformed(registry, constraint, target, reason));
                    }
                }
                _ => errors.push(malformed(
                    registry,
                    constraint,
                    target,
                    "relative values are only supported on an operation's return contract",
                )),
            }
        }
        errors
    }
}

/// `from request.amount`
#[derive(Debug, Default)]
pub struct ReturnValueDerivedFromParameterConstraintProvider;

impl ConstraintProvider for ReturnValueDerivedFromParameterConstraintProvider {
    fn name(&self) -> &'static str {
        "return-value-derived-from-parameter"
    }

    fn shape(&self) -> ConstraintShape {
        ConstraintShape::DerivedFrom
    }

    fn applies(&self, expr: &ConstraintExpr) -> bool {
        matches!(expr, ConstraintExpr::DerivedFrom { path, .. } if !path.is_empty())
    }

    fn build(
        &self,
        expr: &ConstraintExpr,
        _target_type: &TypeRef,
        _resolver: &mut dyn TypeNameResolver,
    ) -> Result<Constraint, Vec<CompileError>> {
        match expr {
            ConstraintExpr::DerivedFrom { path, location } => {
                Ok(Constraint::ReturnValueDerivedFromParameter {
                    path: path.clone(),
                    location: *location,
                })
            }
            _ => Err(vec![wrong_shape(self, expr)]),
        }
    }

    fn as_validator(&self) -> Option<&dyn ValidatingConstraintProvider> {
        Some(self)
    }
}

impl ValidatingConstraintProvider for ReturnValueDerivedFromParameterConstraintProvider {
    fn applies_to(&self, constraint: &Constraint) -> bool {
        matches!(constraint, Constraint::ReturnValueDerivedFromParameter { .. })
    }

    fn validate(
        &self,
        constraint: &Constraint,
        target: &dyn ConstraintTarget,
        site: &ConstraintSite<'_>,
        registry: &TypeRegistry,
    ) -> Vec<CompileError> {
        let Constraint::ReturnValueDerivedFromParameter { path, .. } = constraint else {
            return Vec::new();
        };
        let result = match site {
            ConstraintSite::ReturnContract { operation } => {
                check_parameter_path(registry, operation, path)
            }
            _ => Err("a derived value can only be declared on an operation's return contract".to_string()),
        };
        match result {
            Ok(()) => Vec::new(),
            Err(reason) => vec![malformed(registry, constraint, target, reason)],
        }
    }
}

/// Legacy `currency = 'GBP'` and `Currency = 'GBP'`.
#[derive(Debug, Default)]
pub struct ConstantValueConstraintProvider;

impl ConstraintProvider for ConstantValueConstraintProvider {
    fn name(&self) -> &'static str {
        "constant-value"
    }

    fn shape(&self) -> ConstraintShape {
        ConstraintShape::LegacyConstant
    }

    fn applies(&self, expr: &ConstraintExpr) -> bool {
        matches!(expr, ConstraintExpr::LegacyConstant { .. })
    }

    fn build(
        &self,
        expr: &ConstraintExpr,
        _target_type: &TypeRef,
        resolver: &mut dyn TypeNameResolver,
    ) -> Result<Constraint, Vec<CompileError>> {
        let ConstraintExpr::LegacyConstant {
            subject,
            value,
            location,
        } = expr
        else {
            return Err(vec![wrong_shape(self, expr)]);
        };
        Ok(match subject {
            LegacySubject::FieldName(field_name) => Constraint::NamedFieldConstantValue {
                field_name: field_name.clone(),
                expected_value: value.clone(),
                location: *location,
            },
            LegacySubject::TypeName(name) => Constraint::TypedFieldConstantValue {
                type_ref: resolver.resolve_type_name(name, *location),
                expected_value: value.clone(),
                location: *location,
            },
        })
    }

    fn as_validator(&self) -> Option<&dyn ValidatingConstraintProvider> {
        Some(self)
    }
}

impl ValidatingConstraintProvider for ConstantValueConstraintProvider {
    fn applies_to(&self, constraint: &Constraint) -> bool {
        matches!(
            constraint,
            Constraint::NamedFieldConstantValue { .. } | Constraint::TypedFieldConstantValue { .. }
        )
    }

    fn validate(
        &self,
        constraint: &Constraint,
        target: &dyn ConstraintTarget,
        _site: &ConstraintSite<'_>,
        registry: &TypeRegistry,
    ) -> Vec<CompileError> {
        let property = match constraint {
            Constraint::NamedFieldConstantValue { field_name, .. } => {
                PropertyIdentifier::ByName(AttributePath::new(vec![field_name.clone()]))
            }
            Constraint::TypedFieldConstantValue { type_ref, .. } => {
                PropertyIdentifier::ByType(type_ref.clone())
            }
            _ => return Vec::new(),
        };
        if is_external(registry, target.target_type()) {
            return Vec::new();
        }
        let Some(object) = registry.unwrap_to_object(target.target_type()) else {
            return vec![malformed(
                registry,
                constraint,
                target,
                "constraints are only supported on object types",
            )];
        };
        match property.resolve_against(registry, object) {
            Ok(_) => Vec::new(),
            Err(reason) => vec![malformed(registry, constraint, target, reason)],
        }
    }
}

/// Wraps boolean expressions. Expressions are type-checked upstream, so
/// there is nothing left to validate.
#[derive(Debug, Default)]
pub struct ExpressionConstraintProvider;

impl ConstraintProvider for ExpressionConstraintProvider {
    fn name(&self) -> &'static str {
        "expression"
    }

    fn shape(&self) -> ConstraintShape {
        ConstraintShape::Expression
    }

    fn applies(&self, expr: &ConstraintExpr) -> bool {
        matches!(expr, ConstraintExpr::Expression(expression) if expression.is_boolean())
    }

    fn build(
        &self,
        expr: &ConstraintExpr,
        _target_type: &TypeRef,
        _resolver: &mut dyn TypeNameResolver,
    ) -> Result<Constraint, Vec<CompileError>> {
        match expr {
            ConstraintExpr::Expression(expression) => Ok(Constraint::Expression {
                expression: expression.clone(),
                location: expression.location,
            }),
            _ => Err(vec![wrong_shape(self, expr)]),
        }
    }
}

fn wrong_shape(provider: &dyn ConstraintProvider, expr: &ConstraintExpr) -> CompileError {
    CompileError::new(
        ErrorKind::Internal,
        expr.location(),
        format!(
            "constraint provider {} cannot build a {} constraint",
            provider.name(),
            expr.shape().name()
        ),
    )
}
