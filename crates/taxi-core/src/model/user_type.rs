//! Generic user-declared type: one optional definition plus extensions.

use std::convert::Infallible;

use crate::foundation::QualifiedName;
use crate::model::object::Annotation;

/// Access to the annotations and docs carried by a definition or extension.
pub trait Declaration {
    fn annotations(&self) -> &[Annotation];

    fn type_doc(&self) -> Option<&str> {
        None
    }
}

impl Declaration for Infallible {
    fn annotations(&self) -> &[Annotation] {
        match *self {}
    }
}

/// A named user type.
///
/// `definition` moves from `None` to `Some` at most once, when the type's
/// primary declaration is registered. Extensions accumulate in the order
/// they are added.
#[derive(Debug, Clone)]
pub struct UserType<D, E> {
    name: QualifiedName,
    definition: Option<D>,
    extensions: Vec<E>,
}

impl<D, E> UserType<D, E> {
    /// A placeholder awaiting its definition.
    pub fn undefined(name: QualifiedName) -> Self {
        Self {
            name,
            definition: None,
            extensions: Vec::new(),
        }
    }

    pub fn defined(name: QualifiedName, definition: D) -> Self {
        Self {
            name,
            definition: Some(definition),
            extensions: Vec::new(),
        }
    }

    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn is_defined(&self) -> bool {
        self.definition.is_some()
    }

    pub fn definition(&self) -> Option<&D> {
        self.definition.as_ref()
    }

    pub fn extensions(&self) -> &[E] {
        &self.extensions
    }

    /// Install the definition; hands it back if one is already present.
    pub(crate) fn define(&mut self, definition: D) -> Result<(), D> {
        if self.definition.is_some() {
            return Err(definition);
        }
        self.definition = Some(definition);
        Ok(())
    }

    pub(crate) fn push_extension(&mut self, extension: E) {
        self.extensions.push(extension);
    }
}

impl<D: Declaration, E: Declaration> UserType<D, E> {
    /// Extension annotations in registration order, then the definition's.
    pub fn annotations(&self) -> Vec<Annotation> {
        self.extensions
            .iter()
            .flat_map(|ext| ext.annotations().iter().cloned())
            .chain(
                self.definition
                    .iter()
                    .flat_map(|def| def.annotations().iter().cloned()),
            )
            .collect()
    }

    pub fn has_annotation(&self, name: &QualifiedName) -> bool {
        self.annotations().iter().any(|a| &a.name == name)
    }

    /// Definition doc followed by every extension doc, newline separated.
    pub fn type_doc(&self) -> Option<String> {
        let docs: Vec<&str> = self
            .definition
            .iter()
            .filter_map(|def| def.type_doc())
            .chain(self.extensions.iter().filter_map(|ext| ext.type_doc()))
            .filter(|doc| !doc.is_empty())
            .collect();
        if docs.is_empty() {
            None
        } else {
            Some(docs.join("\n"))
        }
    }
}
