//! Compiler configuration.

use serde::{Deserialize, Serialize};

use crate::error::Severity;

/// Knobs for the severity policy applied when a document is finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Treat warnings as build failures
    pub warnings_as_errors: bool,
    /// Severity reported for types that take part in an inheritance cycle
    pub cyclic_inheritance: Severity,
    /// Report own fields that repeat an inherited field's name
    pub shadowed_inherited_fields: Option<Severity>,
    /// Cap on the number of diagnostics returned; a cap of zero still keeps one
    pub max_diagnostics: Option<usize>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            warnings_as_errors: false,
            cyclic_inheritance: Severity::Warning,
            shadowed_inherited_fields: None,
            max_diagnostics: None,
        }
    }
}

impl CompilerConfig {
    /// Whether a diagnostic of this severity fails the build.
    pub fn is_fatal(&self, severity: Severity) -> bool {
        match severity {
            Severity::Error => true,
            Severity::Warning => self.warnings_as_errors,
            Severity::Info => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompilerConfig::default();
        assert!(!config.warnings_as_errors);
        assert_eq!(config.cyclic_inheritance, Severity::Warning);
        assert_eq!(config.shadowed_inherited_fields, None);
        assert!(config.is_fatal(Severity::Error));
        assert!(!config.is_fatal(Severity::Warning));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: CompilerConfig =
            serde_json::from_str(r#"{"warnings_as_errors": true, "cyclic_inheritance": "error"}"#)
                .unwrap();
        assert!(config.warnings_as_errors);
        assert_eq!(config.cyclic_inheritance, Severity::Error);
        assert_eq!(config.max_diagnostics, None);
        assert!(config.is_fatal(Severity::Warning));
        assert!(!config.is_fatal(Severity::Info));
    }
}
