//! Derived views over the registry.
//!
//! - [`extensions`]: merging definitions with their extensions
//! - [`inheritance`]: supertype graphs, inherited fields, alias unwrapping
//!
//! Both are recomputed on every call rather than memoized. A long-lived
//! consumer that recompiles on each edit should cache them keyed on the
//! type's definition and extension list.

pub mod extensions;
pub mod inheritance;

pub use extensions::RefinementConflict;
