//! # Taxi Core
//!
//! Semantic type model and constraint subsystem for the Taxi schema language.
//!
//! A parser hands declarations to a [`DocumentBuilder`]; the builder links
//! them in a [`TypeRegistry`], applies extensions, checks constraints, and
//! produces a read-only [`TaxiDocument`].
//!
//! ## Architecture
//!
//! ```text
//! foundation   names, spans, literal values
//!     ↓
//! model        object / enum / alias / annotation types, services
//!     ↓
//! registry     arena of types, late binding of forward references
//!     ↓
//! resolve      extension merging, inheritance walks
//!     ↓
//! constraints  build pass (providers) + validate pass
//!     ↓
//! compile      DocumentBuilder, severity policy
//!     ↓
//! document     TaxiDocument snapshot
//! ```
//!
//! ## Usage
//!
//! ```
//! use taxi_core::compile::{DocumentBuilder, FieldDecl, ObjectTypeDecl};
//! use taxi_core::foundation::{QualifiedName, Span};
//!
//! let mut builder = DocumentBuilder::new();
//! let currency = builder.resolve_type(&QualifiedName::parse("acme.Currency"), Span::unknown());
//! builder.declare_object_type(ObjectTypeDecl::new(
//!     "acme.Money",
//!     vec![FieldDecl::new("currency", currency)],
//! ));
//! builder.declare_object_type(ObjectTypeDecl::new("acme.Currency", vec![]));
//!
//! let compiled = builder.finish().expect("document compiles");
//! let fields = compiled
//!     .document
//!     .all_fields(&QualifiedName::parse("acme.Money"))
//!     .unwrap();
//! assert_eq!(fields[0].name, "currency");
//! ```

pub mod compile;
pub mod config;
pub mod constraints;
pub mod document;
pub mod error;
pub mod expression;
pub mod foundation;
pub mod model;
pub mod registry;
pub mod resolve;

pub use compile::{CompiledDocument, DocumentBuilder};
pub use config::CompilerConfig;
pub use document::TaxiDocument;
pub use error::{CompileError, DiagnosticFormatter, ErrorKind, Severity};
pub use registry::TypeRegistry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
