//! Extension merging.
//!
//! Effective fields, enum members and annotations are recomputed from the
//! definition and its extensions on every read. Nothing here is cached.
//!
//! Merge order:
//!
//! - field annotations: every matching field extension in registration
//!   order, then the field's own annotations
//! - type annotations: extensions in registration order, then the
//!   definition's own (see [`UserType::annotations`](crate::model::UserType::annotations))
//! - enum member annotations and synonyms: the definition's own, then
//!   extensions in registration order

use crate::model::{
    EnumExtension, EnumType, EnumValue, Field, FieldExtension, FieldRefinement, ObjectType,
    ObjectTypeExtension, TypeAlias, TypeAliasExtension, TypeRef,
};

/// A second extension tried to refine a field that is already refined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefinementConflict {
    pub field_name: String,
    pub existing: TypeRef,
    pub proposed: TypeRef,
}

impl ObjectType {
    /// Append an extension unless it re-refines an already refined field.
    ///
    /// On conflict nothing is appended, including the extension's
    /// annotations.
    pub fn add_extension(&mut self, extension: ObjectTypeExtension) -> Result<(), RefinementConflict> {
        for (idx, field_ext) in extension.field_extensions.iter().enumerate() {
            let Some(proposed) = &field_ext.refinement else {
                continue;
            };
            let earlier_in_same = extension.field_extensions[..idx]
                .iter()
                .filter(|other| other.name == field_ext.name);
            let existing = self
                .field_extensions(&field_ext.name)
                .chain(earlier_in_same)
                .find_map(|other| other.refinement.as_ref());
            if let Some(existing) = existing {
                return Err(RefinementConflict {
                    field_name: field_ext.name.clone(),
                    existing: existing.type_ref.clone(),
                    proposed: proposed.type_ref.clone(),
                });
            }
        }
        self.push_extension(extension);
        Ok(())
    }

    /// Own fields with extension annotations and refinements applied.
    pub fn fields(&self) -> Vec<Field> {
        let Some(definition) = self.definition() else {
            return Vec::new();
        };
        definition
            .fields
            .iter()
            .map(|field| self.merge_field(field))
            .collect()
    }

    /// An own field by name, merged. Inherited fields are looked up through
    /// [`TypeRegistry::field`](crate::registry::TypeRegistry::field).
    pub fn own_field(&self, name: &str) -> Option<Field> {
        let definition = self.definition()?;
        definition
            .fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| self.merge_field(f))
    }

    pub fn has_own_field(&self, name: &str) -> bool {
        self.definition()
            .is_some_and(|def| def.fields.iter().any(|f| f.name == name))
    }

    /// The refinement applied to a field, if any extension supplied one.
    pub fn refinement<'a>(&'a self, field_name: &'a str) -> Option<&'a FieldRefinement> {
        self.field_extensions(field_name)
            .find_map(|ext| ext.refinement.as_ref())
    }

    fn field_extensions<'a>(&'a self, field_name: &'a str) -> impl Iterator<Item = &'a FieldExtension> + 'a {
        self.extensions()
            .iter()
            .flat_map(|ext| ext.field_extensions.iter())
            .filter(move |field_ext| field_ext.name == field_name)
    }

    fn merge_field(&self, field: &Field) -> Field {
        let mut merged = field.clone();
        merged.annotations = self
            .field_extensions(&field.name)
            .flat_map(|ext| ext.annotations.iter().cloned())
            .chain(field.annotations.iter().cloned())
            .collect();
        if let Some(refinement) = self.refinement(&field.name) {
            merged.type_ref = refinement.type_ref.clone();
            if refinement.default_value.is_some() {
                merged.default_value = refinement.default_value.clone();
            }
        }
        merged
    }
}

impl EnumType {
    /// Append an extension; extensions may only decorate existing members.
    pub fn add_extension(&mut self, extension: EnumExtension) -> Result<(), String> {
        let Some(definition) = self.definition() else {
            return Err(format!("Cannot extend enum {} as it is not defined", self.name()));
        };
        let added: Vec<&str> = extension
            .value_extensions
            .iter()
            .filter(|ext| !definition.values.iter().any(|v| v.name == ext.name))
            .map(|ext| ext.name.as_str())
            .collect();
        if !added.is_empty() {
            return Err(format!(
                "Cannot modify the members in an enum. An extension attempted to add new members {} to {}",
                added.join(", "),
                self.name()
            ));
        }
        self.push_extension(extension);
        Ok(())
    }

    /// Own members with extension annotations, synonyms and docs merged in.
    ///
    /// An enum that inherits another enum declares no members; read them
    /// through [`TypeRegistry::enum_values`](crate::registry::TypeRegistry::enum_values).
    pub fn values(&self) -> Vec<EnumValue> {
        let Some(definition) = self.definition() else {
            return Vec::new();
        };
        definition
            .values
            .iter()
            .map(|value| {
                let extensions: Vec<_> = self
                    .extensions()
                    .iter()
                    .flat_map(|ext| ext.value_extensions.iter())
                    .filter(|ext| ext.name == value.name)
                    .collect();
                let mut merged = value.clone();
                merged
                    .annotations
                    .extend(extensions.iter().flat_map(|ext| ext.annotations.iter().cloned()));
                merged
                    .synonyms
                    .extend(extensions.iter().flat_map(|ext| ext.synonyms.iter().cloned()));
                let docs: Vec<&str> = value
                    .type_doc
                    .as_deref()
                    .into_iter()
                    .chain(extensions.iter().filter_map(|ext| ext.type_doc.as_deref()))
                    .collect();
                merged.type_doc = (!docs.is_empty()).then(|| docs.join("\n"));
                merged
            })
            .collect()
    }

    pub fn value_names(&self) -> Vec<String> {
        self.values().into_iter().map(|v| v.name).collect()
    }
}

impl TypeAlias {
    pub fn add_extension(&mut self, extension: TypeAliasExtension) {
        self.push_extension(extension);
    }
}
