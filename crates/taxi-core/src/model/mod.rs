//! Semantic type model.
//!
//! User types ([`ObjectType`], [`EnumType`], [`TypeAlias`],
//! [`AnnotationType`]) are all instances of [`UserType`]: an optional
//! definition plus an ordered list of extensions. Merge and inheritance
//! logic lives in [`crate::resolve`]; storage lives in [`crate::registry`].

pub mod alias;
pub mod annotation;
pub mod enums;
pub mod object;
pub mod service;
pub mod types;
pub mod user_type;

pub use alias::{TypeAlias, TypeAliasDefinition, TypeAliasExtension};
pub use annotation::{AnnotationType, AnnotationTypeDefinition};
pub use enums::{EnumDefinition, EnumExtension, EnumType, EnumValue, EnumValueExtension};
pub use object::{
    Annotation, Field, FieldExtension, FieldModifier, FieldRefinement, Modifier, ObjectType,
    ObjectTypeDefinition, ObjectTypeExtension,
};
pub use service::{Operation, OperationContract, Parameter, Service};
pub use types::{PrimitiveType, TypeId, TypeRef};
pub use user_type::{Declaration, UserType};
