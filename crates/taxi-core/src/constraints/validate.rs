//! Whole-document constraint validation.
//!
//! Runs once, after every declaration and extension has been applied and
//! the registry has no undefined types left. Each constraint is offered to
//! every validating provider whose `applies_to` matches it.

use tracing::debug;

use crate::constraints::providers::ConstraintProviders;
use crate::constraints::ConstraintTarget;
use crate::error::CompileError;
use crate::model::{Operation, Service, TypeId};
use crate::registry::TypeRegistry;

/// Where a constraint was declared.
#[derive(Debug, Clone, Copy)]
pub enum ConstraintSite<'a> {
    /// On a field of an object type
    Field { owner: TypeId },
    /// On an operation parameter
    Parameter { operation: &'a Operation },
    /// On an operation's return type
    ReturnContract { operation: &'a Operation },
}

/// Shared state for the validate pass.
pub struct ValidationContext<'a> {
    pub registry: &'a TypeRegistry,
    pub providers: &'a ConstraintProviders,
}

impl<'a> ValidationContext<'a> {
    pub fn new(registry: &'a TypeRegistry, providers: &'a ConstraintProviders) -> Self {
        Self {
            registry,
            providers,
        }
    }

    /// Validate every constraint owned by one target.
    pub fn validate_target(
        &self,
        target: &dyn ConstraintTarget,
        site: &ConstraintSite<'_>,
    ) -> Vec<CompileError> {
        let mut errors = Vec::new();
        for constraint in target.constraints() {
            for validator in self.providers.validators() {
                if validator.applies_to(constraint) {
                    errors.extend(validator.validate(constraint, target, site, self.registry));
                }
            }
        }
        errors
    }
}

/// Validate constraints on every object field and every operation.
///
/// Fields are visited once on the type that declares them; subtypes
/// inheriting a field do not re-report its constraints.
pub fn validate_constraints<'s>(
    ctx: &ValidationContext<'_>,
    services: impl IntoIterator<Item = &'s Service>,
) -> Vec<CompileError> {
    let mut errors = Vec::new();
    let mut checked = 0usize;

    for (id, record) in ctx.registry.type_list() {
        let Some(object) = ctx.registry.object_type(id) else {
            continue;
        };
        for field in object.fields() {
            checked += field.constraints.len();
            errors.extend(ctx.validate_target(&field, &ConstraintSite::Field { owner: id }));
        }
        debug!(type_name = %record.name(), "validated field constraints");
    }

    for service in services {
        for operation in &service.operations {
            if let Some(contract) = &operation.contract {
                checked += contract.constraints.len();
                errors.extend(
                    ctx.validate_target(contract, &ConstraintSite::ReturnContract { operation }),
                );
            }
            for parameter in &operation.parameters {
                checked += parameter.constraints.len();
                errors.extend(
                    ctx.validate_target(parameter, &ConstraintSite::Parameter { operation }),
                );
            }
        }
    }

    debug!(constraints = checked, errors = errors.len(), "validate pass complete");
    errors
}
