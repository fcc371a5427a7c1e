//! Diagnostics and typed API errors.
//!
//! Two families of failure live here:
//!
//! - `CompileError`: a diagnostic about the schema being compiled, with a
//!   severity, a primary span, optional secondary labels and notes. Build
//!   and validate passes collect these rather than stopping at the first.
//! - `DocumentError`, `EnumLookupError`, `RegistryError`: typed errors
//!   returned by API calls on an already-compiled model.
//!
//! # Examples
//!
//! ```
//! # use taxi_core::error::*;
//! # use taxi_core::foundation::Span;
//! let error = CompileError::new(
//!     ErrorKind::UnresolvedType,
//!     Span::unknown(),
//!     "Zorp is not defined".to_string(),
//! );
//! assert_eq!(error.kind.code(), 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::{QualifiedName, SourceMap, Span};

/// Compilation diagnostic with source location and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub kind: ErrorKind,
    pub severity: Severity,
    /// Primary source location
    pub span: Span,
    pub message: String,
    /// Related locations, e.g. "first defined here"
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

/// Category of a diagnostic.
///
/// # Invariant
///
/// The discriminant values must match the `ERROR_KIND_NAMES` indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorKind {
    /// Internal error in the type model
    Internal = 0,
    /// A referenced type was never declared
    UnresolvedType = 1,
    /// Two extensions refined the same field
    FieldRefinementConflict = 2,
    /// No provider understands a constraint expression
    ConstraintProviderNotFound = 3,
    /// A constraint points at something its target does not have
    MalformedConstraint = 4,
    /// A type was declared twice
    DuplicateDefinition = 5,
    /// An extension is not allowed for the extended type
    InvalidExtension = 6,
    /// A type participates in an inheritance cycle
    CyclicInheritance = 7,
    /// A bare name matches more than one import
    AmbiguousName = 8,
    /// An own field repeats the name of an inherited field
    ShadowedField = 9,
    /// An enum reaches more than one base enum through inheritance
    MultipleEnumBases = 10,
}

const ERROR_KIND_NAMES: &[&str] = &[
    "internal error",               // 0: Internal
    "unresolved type",              // 1: UnresolvedType
    "field refinement conflict",    // 2: FieldRefinementConflict
    "constraint provider not found", // 3: ConstraintProviderNotFound
    "malformed constraint",         // 4: MalformedConstraint
    "duplicate definition",         // 5: DuplicateDefinition
    "invalid extension",            // 6: InvalidExtension
    "cyclic inheritance",           // 7: CyclicInheritance
    "ambiguous name",               // 8: AmbiguousName
    "shadowed field",               // 9: ShadowedField
    "multiple enum bases",          // 10: MultipleEnumBases
];

impl ErrorKind {
    pub fn name(self) -> &'static str {
        ERROR_KIND_NAMES[self as usize]
    }

    /// Stable numeric code reported to tooling.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Secondary labeled span in a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

impl CompileError {
    /// Error-severity diagnostic.
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self::with_severity(kind, Severity::Error, span, message)
    }

    /// Warning-severity diagnostic.
    pub fn warning(kind: ErrorKind, span: Span, message: String) -> Self {
        Self::with_severity(kind, Severity::Warning, span, message)
    }

    /// Info-severity diagnostic.
    pub fn info(kind: ErrorKind, span: Span, message: String) -> Self {
        Self::with_severity(kind, Severity::Info, span, message)
    }

    pub fn with_severity(kind: ErrorKind, severity: Severity, span: Span, message: String) -> Self {
        Self {
            kind,
            severity,
            span,
            message,
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_label(mut self, span: Span, message: String) -> Self {
        self.labels.push(Label { span, message });
        self
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.kind.name(), self.message)
    }
}

impl std::error::Error for CompileError {}

/// Result type for single-diagnostic operations.
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors from snapshot lookups on a compiled document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("type {0} is not present in this document")]
    NotFound(QualifiedName),
    #[error("type {name} is a {actual}, not a {expected}")]
    WrongKind {
        name: QualifiedName,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("service {0} is not present in this document")]
    ServiceNotFound(QualifiedName),
    #[error("enum {0} inherits from more than one base enum")]
    MultipleEnumBases(QualifiedName),
    #[error("type {type_name} has no field named {field}")]
    NoSuchField {
        type_name: QualifiedName,
        field: String,
    },
}

/// Errors from enum member lookups.
///
/// Each lookup flavour fails with its own variant so callers can tell
/// "no such name" apart from "no such value" and from the combined lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnumLookupError {
    #[error("Enum {enum_name} does not contain a member named {name}")]
    NoSuchName { enum_name: QualifiedName, name: String },
    #[error("Enum {enum_name} does not contain a member with a value of {value}")]
    NoSuchValue { enum_name: QualifiedName, value: String },
    #[error("Enum {enum_name} does not contain either a name nor a value of {token}")]
    NoSuchNameOrValue { enum_name: QualifiedName, token: String },
    #[error("Enum {0} is not defined")]
    Undefined(QualifiedName),
}

/// Errors from registry operations that are misuse rather than schema faults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Attempting to redefine type {0}")]
    Redefinition(QualifiedName),
    #[error("type {name} is already registered as a {existing}")]
    KindMismatch {
        name: QualifiedName,
        existing: &'static str,
    },
    #[error("Name {name} is ambiguous, could refer to any of {candidates}")]
    AmbiguousName { name: String, candidates: String },
}

/// Formats diagnostics with source code context.
///
/// # Examples
///
/// ```
/// # use taxi_core::error::*;
/// # use taxi_core::foundation::{SourceMap, Span};
/// let mut sources = SourceMap::new();
/// let file_id = sources.add_file("orders.taxi", "type Order { id : Zorp }".to_string());
/// let span = Span::new(file_id, 18, 22, 1);
///
/// let error = CompileError::new(
///     ErrorKind::UnresolvedType,
///     span,
///     "Zorp is not defined".to_string(),
/// );
/// let rendered = DiagnosticFormatter::new(&sources).format(&error);
/// assert!(rendered.contains("orders.taxi:1:19"));
/// assert!(rendered.contains("^^^^"));
/// ```
pub struct DiagnosticFormatter<'a> {
    sources: &'a SourceMap,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(sources: &'a SourceMap) -> Self {
        Self { sources }
    }

    /// Render one diagnostic, with a snippet when its span is known.
    pub fn format(&self, error: &CompileError) -> String {
        let mut output = format!(
            "{}[E{:04}]: {}: {}\n",
            error.severity,
            error.kind.code(),
            error.kind.name(),
            error.message
        );

        self.push_location(&mut output, &error.span, None);

        for label in &error.labels {
            self.push_location(&mut output, &label.span, Some(&label.message));
        }

        for note in &error.notes {
            output.push_str(&format!("   = note: {}\n", note));
        }

        output
    }

    /// Render several diagnostics separated by blank lines.
    pub fn format_all(&self, errors: &[CompileError]) -> String {
        errors
            .iter()
            .map(|e| self.format(e))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn push_location(&self, output: &mut String, span: &Span, label: Option<&str>) {
        let (Some(path), Some((line, col))) =
            (self.sources.file_path(span), self.sources.line_col(span))
        else {
            if let Some(label) = label {
                output.push_str(&format!("   = {}\n", label));
            }
            return;
        };

        output.push_str(&format!("  --> {}:{}:{}\n", path.display(), line, col));

        let Some(source_line) = self.sources.file(span).and_then(|f| f.line_text(line)) else {
            return;
        };
        output.push_str("   |\n");
        output.push_str(&format!("{:3} | {}\n", line, source_line));

        let available = source_line.len().saturating_sub(col as usize - 1);
        let width = (span.len() as usize).clamp(1, available.max(1));
        let padding = " ".repeat(col as usize - 1);
        let underline = if label.is_some() { "-" } else { "^" }.repeat(width);
        match label {
            Some(message) => output.push_str(&format!("    | {}{} {}\n", padding, underline, message)),
            None => output.push_str(&format!("    | {}{}\n", padding, underline)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_span() -> Span {
        Span::new(0, 0, 5, 1)
    }

    fn test_sources() -> SourceMap {
        let mut sources = SourceMap::new();
        sources.add_file(
            "test.taxi",
            "type Money {\n  ccy : Zorp\n}".to_string(),
        );
        sources
    }

    #[test]
    fn test_error_creation() {
        let err = CompileError::new(
            ErrorKind::DuplicateDefinition,
            dummy_span(),
            "Attempting to redefine type Money".to_string(),
        );

        assert_eq!(err.kind, ErrorKind::DuplicateDefinition);
        assert_eq!(err.severity, Severity::Error);
        assert!(err.is_error());
        assert!(err.labels.is_empty());
        assert!(err.notes.is_empty());
    }

    #[test]
    fn test_warning_and_info_creation() {
        let warn = CompileError::warning(ErrorKind::CyclicInheritance, dummy_span(), "w".into());
        let info = CompileError::info(ErrorKind::ShadowedField, dummy_span(), "i".into());
        assert_eq!(warn.severity, Severity::Warning);
        assert_eq!(info.severity, Severity::Info);
        assert!(!warn.is_error());
    }

    #[test]
    fn test_error_chaining() {
        let err = CompileError::new(ErrorKind::DuplicateDefinition, dummy_span(), "dup".into())
            .with_label(dummy_span(), "first defined here".into())
            .with_note("remove one of the declarations".into());

        assert_eq!(err.labels.len(), 1);
        assert_eq!(err.labels[0].message, "first defined here");
        assert_eq!(err.notes, vec!["remove one of the declarations".to_string()]);
    }

    #[test]
    fn test_error_kind_names() {
        assert_eq!(ErrorKind::UnresolvedType.name(), "unresolved type");
        assert_eq!(ErrorKind::MalformedConstraint.name(), "malformed constraint");
        assert_eq!(ErrorKind::ShadowedField.name(), "shadowed field");
        assert_eq!(ErrorKind::MultipleEnumBases.name(), "multiple enum bases");
        assert_eq!(ErrorKind::MultipleEnumBases.code(), 10);
        assert_eq!(ErrorKind::UnresolvedType.code(), 1);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn test_error_display() {
        let err = CompileError::new(ErrorKind::UnresolvedType, dummy_span(), "Zorp is not defined".into());
        assert_eq!(err.to_string(), "error: unresolved type: Zorp is not defined");
    }

    #[test]
    fn test_formatter_with_snippet() {
        let sources = test_sources();
        let err = CompileError::new(
            ErrorKind::UnresolvedType,
            Span::new(0, 21, 25, 2),
            "Zorp is not defined".into(),
        )
        .with_note("declare `type Zorp` or import it".into());

        let out = DiagnosticFormatter::new(&sources).format(&err);
        assert!(out.starts_with("error[E0001]: unresolved type: Zorp is not defined"));
        assert!(out.contains("  --> test.taxi:2:9"));
        assert!(out.contains("  2 |   ccy : Zorp"));
        assert!(out.contains("^^^^"));
        assert!(out.contains("= note: declare `type Zorp` or import it"));
    }

    #[test]
    fn test_formatter_unknown_span() {
        let sources = test_sources();
        let err = CompileError::new(ErrorKind::Internal, Span::unknown(), "boom".into());
        let out = DiagnosticFormatter::new(&sources).format(&err);
        assert_eq!(out, "error[E0000]: internal error: boom\n");
    }

    #[test]
    fn test_enum_lookup_messages_are_distinct() {
        let enum_name = QualifiedName::parse("Currency");
        let by_name = EnumLookupError::NoSuchName { enum_name: enum_name.clone(), name: "GBP".into() };
        let by_value = EnumLookupError::NoSuchValue { enum_name: enum_name.clone(), value: "GBP".into() };
        let either = EnumLookupError::NoSuchNameOrValue { enum_name, token: "GBP".into() };
        assert_ne!(by_name.to_string(), by_value.to_string());
        assert!(either.to_string().contains("either a name nor a value"));
    }
}
