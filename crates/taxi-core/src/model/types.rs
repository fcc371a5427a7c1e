//! Type handles and references.
//!
//! A [`TypeRef`] is what fields, parameters and aliases point at. User
//! types are referenced through a [`TypeId`] into the registry arena, never
//! by value, so a reference taken while the type is still a placeholder
//! sees the real definition once it is registered.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::{QualifiedName, TAXI_NAMESPACE};

/// Stable index of a user type in the registry arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Built-in primitive types of the `lang.taxi` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Boolean,
    String,
    Int,
    Decimal,
    Double,
    Date,
    Time,
    DateTime,
    Instant,
    Any,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 10] = [
        PrimitiveType::Boolean,
        PrimitiveType::String,
        PrimitiveType::Int,
        PrimitiveType::Decimal,
        PrimitiveType::Double,
        PrimitiveType::Date,
        PrimitiveType::Time,
        PrimitiveType::DateTime,
        PrimitiveType::Instant,
        PrimitiveType::Any,
    ];

    pub fn simple_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::String => "String",
            PrimitiveType::Int => "Int",
            PrimitiveType::Decimal => "Decimal",
            PrimitiveType::Double => "Double",
            PrimitiveType::Date => "Date",
            PrimitiveType::Time => "Time",
            PrimitiveType::DateTime => "DateTime",
            PrimitiveType::Instant => "Instant",
            PrimitiveType::Any => "Any",
        }
    }

    pub fn qualified_name(self) -> QualifiedName {
        QualifiedName::new(TAXI_NAMESPACE, self.simple_name())
    }

    /// Look up a primitive by bare or `lang.taxi`-qualified name.
    pub fn from_name(name: &QualifiedName) -> Option<Self> {
        if !name.is_unqualified() && name.namespace() != TAXI_NAMESPACE {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|primitive| primitive.simple_name() == name.name())
    }
}

/// Reference to any type: built-in, array, user-declared, or imported.
///
/// Equality compares user types by id, which stands in for their
/// qualified name, so comparing fields never walks the type graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(PrimitiveType),
    Void,
    Array(Box<TypeRef>),
    User(TypeId),
    /// Declared as an import, definition supplied by another compilation
    UnresolvedImport(QualifiedName),
}

impl TypeRef {
    pub fn array_of(member: TypeRef) -> Self {
        TypeRef::Array(Box::new(member))
    }

    pub fn user_id(&self) -> Option<TypeId> {
        match self {
            TypeRef::User(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array(_))
    }

    /// Member type for arrays, `self` otherwise.
    pub fn member_type(&self) -> &TypeRef {
        match self {
            TypeRef::Array(member) => member.member_type(),
            other => other,
        }
    }
}

impl From<PrimitiveType> for TypeRef {
    fn from(primitive: PrimitiveType) -> Self {
        TypeRef::Primitive(primitive)
    }
}

impl From<TypeId> for TypeRef {
    fn from(id: TypeId) -> Self {
        TypeRef::User(id)
    }
}
