//! Whole-document checks run after extensions are applied.

use crate::config::CompilerConfig;
use crate::error::{CompileError, ErrorKind};
use crate::model::TypeRef;
use crate::registry::{TypeBody, TypeRegistry};

/// Cyclic inheritance, enums with several bases and, when enabled,
/// inherited-field shadowing.
pub(super) fn inheritance_diagnostics(
    registry: &TypeRegistry,
    config: &CompilerConfig,
) -> Vec<CompileError> {
    let mut diagnostics = Vec::new();

    for (id, record) in registry.type_list() {
        let location = match &record.body {
            TypeBody::Object(object) => object.definition().map(|d| d.location),
            TypeBody::Enum(enum_type) => enum_type.definition().map(|d| d.location),
            TypeBody::Alias(_) | TypeBody::Annotation(_) => continue,
        }
        .unwrap_or(record.origin);

        if registry.is_cyclic(&TypeRef::User(id)) {
            diagnostics.push(CompileError::with_severity(
                ErrorKind::CyclicInheritance,
                config.cyclic_inheritance,
                location,
                format!("Type {} inherits from itself", record.name()),
            ));
        }

        let enum_roots = registry.enum_roots(id);
        if enum_roots.len() > 1 {
            let names: Vec<String> = enum_roots
                .iter()
                .map(|root| registry.type_name(&TypeRef::User(*root)).to_string())
                .collect();
            diagnostics.push(CompileError::new(
                ErrorKind::MultipleEnumBases,
                location,
                format!(
                    "Enum {} inherits from multiple enums ({}), which is not supported",
                    record.name(),
                    names.join(", ")
                ),
            ));
        }

        if let Some(severity) = config.shadowed_inherited_fields {
            for field in registry.shadowed_fields(id) {
                diagnostics.push(CompileError::with_severity(
                    ErrorKind::ShadowedField,
                    severity,
                    field.location,
                    format!(
                        "Field {} on {} repeats the name of an inherited field",
                        field.name,
                        record.name()
                    ),
                ));
            }
        }
    }

    diagnostics
}

/// Cap the diagnostic list, keeping the most severe entries.
///
/// At least one entry survives a cap of zero, so a failing document never
/// reports an empty error list.
pub(super) fn truncate(diagnostics: &mut Vec<CompileError>, max: Option<usize>) {
    let Some(max) = max.map(|max| max.max(1)) else {
        return;
    };
    if diagnostics.len() <= max {
        return;
    }
    // stable: equal severities keep report order
    diagnostics.sort_by(|a, b| b.severity.cmp(&a.severity));
    let dropped = diagnostics.len() - max;
    diagnostics.truncate(max);
    if let Some(last) = diagnostics.last_mut() {
        last.notes
            .push(format!("{} further diagnostics were not shown", dropped));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Severity;
    use crate::foundation::Span;

    fn diag(severity: Severity, message: &str) -> CompileError {
        CompileError::with_severity(ErrorKind::Internal, severity, Span::unknown(), message.to_string())
    }

    #[test]
    fn test_truncate_keeps_errors_first() {
        let mut diagnostics = vec![
            diag(Severity::Warning, "w1"),
            diag(Severity::Error, "e1"),
            diag(Severity::Info, "i1"),
            diag(Severity::Error, "e2"),
        ];
        truncate(&mut diagnostics, Some(2));
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message, "e1");
        assert_eq!(diagnostics[1].message, "e2");
        assert_eq!(diagnostics[1].notes, vec!["2 further diagnostics were not shown".to_string()]);
    }

    #[test]
    fn test_truncate_under_limit_is_untouched() {
        let mut diagnostics = vec![diag(Severity::Warning, "w1"), diag(Severity::Error, "e1")];
        truncate(&mut diagnostics, Some(5));
        assert_eq!(diagnostics[0].message, "w1");
        truncate(&mut diagnostics, None);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_truncate_to_zero_keeps_most_severe() {
        let mut diagnostics = vec![diag(Severity::Warning, "w1"), diag(Severity::Error, "e1")];
        truncate(&mut diagnostics, Some(0));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "e1");
        assert_eq!(diagnostics[0].notes, vec!["1 further diagnostics were not shown".to_string()]);
    }
}
