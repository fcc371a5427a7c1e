//! Inheritance and alias resolution over the registry.
//!
//! Every walk here carries a visited set and stops expanding at a node it
//! has already seen, so cyclic graphs (`A inherits B`, `B inherits A`) and
//! self-referential aliases terminate. A cycle is not an error at this
//! level; [`TypeRegistry::is_cyclic`] lets the validate pass report it.

use indexmap::IndexSet;

use crate::model::{EnumValue, Field, TypeId, TypeRef};
use crate::registry::{TypeBody, TypeRegistry};

impl TypeRegistry {
    /// Types a type directly inherits from. Aliases inherit from their target.
    pub fn direct_supertypes(&self, type_ref: &TypeRef) -> Vec<TypeRef> {
        let Some(record) = type_ref.user_id().and_then(|id| self.get(id)) else {
            return Vec::new();
        };
        match &record.body {
            TypeBody::Object(object) => object
                .definition()
                .map(|def| def.inherits_from.iter().cloned().collect())
                .unwrap_or_default(),
            TypeBody::Enum(enum_type) => enum_type
                .definition()
                .map(|def| def.inherits_from.iter().cloned().collect())
                .unwrap_or_default(),
            TypeBody::Alias(alias) => alias.aliased_type().cloned().into_iter().collect(),
            TypeBody::Annotation(_) => Vec::new(),
        }
    }

    /// Transitive supertypes, excluding the type itself.
    ///
    /// A supertype already visited is not expanded again, so the result is
    /// finite for cyclic graphs.
    pub fn supertype_graph(&self, type_ref: &TypeRef) -> IndexSet<TypeRef> {
        let mut visited = IndexSet::new();
        visited.insert(type_ref.clone());
        let mut graph = IndexSet::new();
        self.expand_supertypes(type_ref, &mut visited, &mut graph);
        graph
    }

    fn expand_supertypes(
        &self,
        type_ref: &TypeRef,
        visited: &mut IndexSet<TypeRef>,
        graph: &mut IndexSet<TypeRef>,
    ) {
        for supertype in self.direct_supertypes(type_ref) {
            if !visited.insert(supertype.clone()) {
                continue;
            }
            graph.insert(supertype.clone());
            self.expand_supertypes(&supertype, visited, graph);
        }
    }

    /// Fields of every object type in the supertype graph.
    pub fn inherited_fields(&self, id: TypeId) -> Vec<Field> {
        self.supertype_graph(&TypeRef::User(id))
            .iter()
            .filter_map(|supertype| supertype.user_id())
            .filter_map(|super_id| self.object_type(super_id))
            .flat_map(|object| object.fields())
            .collect()
    }

    /// Inherited fields followed by own fields. Same-named fields are kept.
    pub fn all_fields(&self, id: TypeId) -> Vec<Field> {
        let mut fields = self.inherited_fields(id);
        if let Some(object) = self.object_type(id) {
            fields.extend(object.fields());
        }
        fields
    }

    /// First field with this name in [`all_fields`](Self::all_fields) order,
    /// so an inherited field is found ahead of an own field of the same name.
    pub fn field(&self, id: TypeId, name: &str) -> Option<Field> {
        self.all_fields(id).into_iter().find(|field| field.name == name)
    }

    pub fn has_field(&self, id: TypeId, name: &str) -> bool {
        self.field(id, name).is_some()
    }

    /// Enums in the inheritance graph of `id` (itself included) that do not
    /// inherit from another enum. Empty for non-enums and for enum cycles.
    pub fn enum_roots(&self, id: TypeId) -> Vec<TypeId> {
        if self.enum_type(id).is_none() {
            return Vec::new();
        }
        let this = TypeRef::User(id);
        std::iter::once(this.clone())
            .chain(self.supertype_graph(&this))
            .filter_map(|type_ref| type_ref.user_id())
            .filter(|candidate| self.enum_type(*candidate).is_some())
            .filter(|candidate| !self.inherits_enum(*candidate))
            .collect()
    }

    /// The enum whose members `id` exposes.
    ///
    /// An enum that inherits no enum is its own base. `None` when `id` is
    /// not an enum or reaches more than one root enum. On an enum cycle the
    /// enum is treated as its own base.
    pub fn base_enum(&self, id: TypeId) -> Option<TypeId> {
        match self.enum_roots(id).as_slice() {
            [root] => Some(*root),
            [] => self.enum_type(id).map(|_| id),
            _ => None,
        }
    }

    /// Members of the base enum, merged with its extensions.
    pub fn enum_values(&self, id: TypeId) -> Vec<EnumValue> {
        self.base_enum(id)
            .and_then(|base| self.enum_type(base))
            .map(|base| base.values())
            .unwrap_or_default()
    }

    fn inherits_enum(&self, id: TypeId) -> bool {
        self.direct_supertypes(&TypeRef::User(id)).iter().any(|supertype| {
            self.underlying_type(supertype)
                .user_id()
                .is_some_and(|super_id| self.enum_type(super_id).is_some())
        })
    }

    /// Whether the type can reach itself through its supertypes.
    pub fn is_cyclic(&self, type_ref: &TypeRef) -> bool {
        let mut visited = IndexSet::new();
        let mut pending = self.direct_supertypes(type_ref);
        while let Some(next) = pending.pop() {
            if &next == type_ref {
                return true;
            }
            if visited.insert(next.clone()) {
                pending.extend(self.direct_supertypes(&next));
            }
        }
        false
    }

    /// Whether `sub` is `sup` or has it somewhere in its supertype graph.
    pub fn is_assignable_to(&self, sub: &TypeRef, sup: &TypeRef) -> bool {
        sub == sup || self.supertype_graph(sub).contains(sup)
    }

    /// Follow alias chains to the first non-alias type.
    ///
    /// An alias cycle stops at the last alias before the revisit.
    pub fn underlying_type(&self, type_ref: &TypeRef) -> TypeRef {
        let mut visited = IndexSet::new();
        let mut current = type_ref.clone();
        while visited.insert(current.clone()) {
            let Some(aliased) = current
                .user_id()
                .and_then(|id| self.type_alias(id))
                .and_then(|alias| alias.aliased_type())
            else {
                break;
            };
            if visited.contains(aliased) {
                break;
            }
            current = aliased.clone();
        }
        current
    }

    /// Strip aliases and arrays, returning the object type underneath.
    pub fn unwrap_to_object(&self, type_ref: &TypeRef) -> Option<TypeId> {
        let mut visited = IndexSet::new();
        let mut current = type_ref.clone();
        while visited.insert(current.clone()) {
            current = self.underlying_type(current.member_type());
        }
        let id = current.user_id()?;
        self.object_type(id).map(|_| id)
    }

    /// User types a type points at through its fields and supertypes.
    pub fn referenced_types(&self, id: TypeId) -> IndexSet<TypeId> {
        let this = TypeRef::User(id);
        let from_fields = self
            .object_type(id)
            .map(|object| object.fields())
            .unwrap_or_default()
            .into_iter()
            .map(|field| field.type_ref.member_type().clone());
        let from_alias = self
            .type_alias(id)
            .and_then(|alias| alias.aliased_type())
            .map(|aliased| aliased.member_type().clone());

        self.direct_supertypes(&this)
            .into_iter()
            .chain(from_fields)
            .chain(from_alias)
            .filter_map(|type_ref| type_ref.user_id())
            .filter(|referenced| *referenced != id)
            .collect()
    }

    /// Own fields whose name repeats a field inherited from a supertype.
    pub fn shadowed_fields(&self, id: TypeId) -> Vec<Field> {
        let inherited: IndexSet<String> = self
            .inherited_fields(id)
            .into_iter()
            .map(|field| field.name)
            .collect();
        self.object_type(id)
            .map(|object| object.fields())
            .unwrap_or_default()
            .into_iter()
            .filter(|field| inherited.contains(&field.name))
            .collect()
    }
}
