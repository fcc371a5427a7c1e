//! Foundation types shared by every other module.
//!
//! - [`name`]: qualified type names and attribute paths
//! - [`span`]: source locations
//! - [`value`]: literal values

pub mod name;
pub mod span;
pub mod value;

pub use name::{AttributePath, QualifiedName, TAXI_NAMESPACE};
pub use span::{SourceFile, SourceMap, Span};
pub use value::Value;
