//! Document assembly.
//!
//! The parser drives a [`DocumentBuilder`] with one declaration event per
//! top-level construct, in source order. Types may be referenced before
//! they are declared; extensions are queued and applied once every
//! declaration has been seen, so an extension may also precede the type
//! it extends.

mod checks;
mod declarations;


pub use declarations::{
    AnnotationTypeDecl, EnumTypeDecl, EnumValueDecl, FieldDecl, ObjectTypeDecl, OperationDecl,
    ParameterDecl, ServiceDecl, TypeAliasDecl,
};

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::config::CompilerConfig;
use crate::constraints::{
    build_constraints, validate_constraints, Constraint, ConstraintExpr, ConstraintProviders,
    ValidationContext,
};
use crate::document::TaxiDocument;
use crate::error::{CompileError, ErrorKind, Severity};
use crate::foundation::{QualifiedName, Span};
use crate::model::{
    AnnotationTypeDefinition, EnumDefinition, EnumValue, Field, ObjectTypeDefinition, Operation,
    OperationContract, Parameter, Service, TypeAliasDefinition, TypeId, TypeRef,
};
use crate::registry::{TypeExtension, TypeRegistry, UserTypeDefinition};

/// A finished document plus the diagnostics that did not fail the build.
#[derive(Debug)]
pub struct CompiledDocument {
    pub document: TaxiDocument,
    pub diagnostics: Vec<CompileError>,
}

/// Collects declarations for one compilation unit.
pub struct DocumentBuilder {
    config: CompilerConfig,
    providers: ConstraintProviders,
    registry: TypeRegistry,
    services: IndexMap<QualifiedName, Service>,
    pending_extensions: Vec<(QualifiedName, TypeExtension)>,
    diagnostics: Vec<CompileError>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::with_config(CompilerConfig::default())
    }

    pub fn with_config(config: CompilerConfig) -> Self {
        Self {
            config,
            providers: ConstraintProviders::standard(),
            registry: TypeRegistry::new(),
            services: IndexMap::new(),
            pending_extensions: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Replace the constraint provider table.
    pub fn with_providers(mut self, providers: ConstraintProviders) -> Self {
        self.providers = providers;
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    /// Diagnostics reported so far. Post-declaration checks run in [`finish`](Self::finish).
    pub fn diagnostics(&self) -> &[CompileError] {
        &self.diagnostics
    }

    /// Record a diagnostic produced outside the builder, e.g. by the parser.
    pub fn report(&mut self, diagnostic: CompileError) {
        self.diagnostics.push(diagnostic);
    }

    /// Resolve a type name as written at `location`.
    pub fn resolve_type(&mut self, name: &QualifiedName, location: Span) -> TypeRef {
        self.registry.get_or_create(name, location)
    }

    /// Mark a name as supplied by another document.
    pub fn add_import(&mut self, name: QualifiedName) {
        self.registry.add_import(name);
    }

    pub fn declare_object_type(&mut self, decl: ObjectTypeDecl) -> Option<TypeId> {
        let fields = decl
            .fields
            .into_iter()
            .map(|field| self.build_field(field))
            .collect();
        let mut definition = ObjectTypeDefinition::new(fields)
            .with_annotations(decl.annotations)
            .with_modifiers(decl.modifiers)
            .inheriting(decl.inherits)
            .at(decl.location);
        definition.type_doc = decl.type_doc;
        self.install(&decl.name, UserTypeDefinition::Object(definition))
    }

    pub fn declare_enum_type(&mut self, decl: EnumTypeDecl) -> Option<TypeId> {
        let values = decl
            .values
            .into_iter()
            .map(|v| {
                let mut value = EnumValue::new(&decl.name, v.name);
                if let Some(explicit) = v.value {
                    value = value.with_value(explicit);
                }
                value.annotations = v.annotations;
                value.synonyms = v.synonyms;
                value.type_doc = v.type_doc;
                value.is_default = v.is_default;
                value
            })
            .collect();
        let mut definition = EnumDefinition::new(values)
            .with_annotations(decl.annotations)
            .inheriting(decl.inherits)
            .at(decl.location);
        if let Some(basic_type) = decl.basic_type {
            definition = definition.with_basic_type(basic_type);
        }
        if decl.lenient {
            definition = definition.lenient();
        }
        definition.type_doc = decl.type_doc;
        self.install(&decl.name, UserTypeDefinition::Enum(definition))
    }

    pub fn declare_type_alias(&mut self, decl: TypeAliasDecl) -> Option<TypeId> {
        let mut definition = TypeAliasDefinition::new(decl.aliased)
            .with_annotations(decl.annotations)
            .at(decl.location);
        definition.type_doc = decl.type_doc;
        self.install(&decl.name, UserTypeDefinition::Alias(definition))
    }

    pub fn declare_annotation_type(&mut self, decl: AnnotationTypeDecl) -> Option<TypeId> {
        let fields = decl
            .fields
            .into_iter()
            .map(|field| self.build_field(field))
            .collect();
        let mut definition = AnnotationTypeDefinition::new(fields).at(decl.location);
        definition.annotations = decl.annotations;
        definition.type_doc = decl.type_doc;
        self.install(&decl.name, UserTypeDefinition::Annotation(definition))
    }

    /// Queue an extension; it is applied when the document is finished.
    pub fn extend_type(&mut self, name: QualifiedName, extension: TypeExtension) {
        self.pending_extensions.push((name, extension));
    }

    pub fn declare_service(&mut self, decl: ServiceDecl) {
        if self.services.contains_key(&decl.name) {
            self.diagnostics.push(CompileError::new(
                ErrorKind::DuplicateDefinition,
                decl.location,
                format!("Attempting to redefine service {}", decl.name),
            ));
            return;
        }
        let mut service = Service::new(decl.name.clone());
        service.annotations = decl.annotations;
        service.type_doc = decl.type_doc;
        service.location = decl.location;
        self.services.insert(decl.name.clone(), service);
        for operation in decl.operations {
            self.declare_operation(&decl.name, operation);
        }
    }

    /// Add an operation to a service declared earlier.
    pub fn declare_operation(&mut self, service_name: &QualifiedName, decl: OperationDecl) {
        let parameters: Vec<Parameter> = decl
            .parameters
            .into_iter()
            .map(|p| Parameter {
                constraints: self.build(&p.constraints, &p.type_ref),
                name: p.name,
                type_ref: p.type_ref,
                annotations: p.annotations,
                nullable: p.nullable,
                location: p.location,
            })
            .collect();
        let contract = if decl.contract.is_empty() {
            None
        } else {
            Some(OperationContract {
                constraints: self.build(&decl.contract, &decl.return_type),
                return_type: decl.return_type.clone(),
            })
        };
        let operation = Operation {
            name: decl.name,
            scope: decl.scope,
            annotations: decl.annotations,
            parameters,
            return_type: decl.return_type,
            contract,
            type_doc: decl.type_doc,
            location: decl.location,
        };

        let Some(service) = self.services.get_mut(service_name) else {
            self.diagnostics.push(CompileError::new(
                ErrorKind::UnresolvedType,
                operation.location,
                format!("Service {} is not defined", service_name),
            ));
            return;
        };
        if service.contains_operation(&operation.name) {
            self.diagnostics.push(CompileError::new(
                ErrorKind::DuplicateDefinition,
                operation.location,
                format!(
                    "Service {} already declares an operation {}",
                    service_name, operation.name
                ),
            ));
            return;
        }
        service.operations.push(operation);
    }

    /// Apply extensions, run whole-document checks, and apply the severity policy.
    ///
    /// # Errors
    /// Returns every diagnostic when any of them is fatal under the config.
    pub fn finish(mut self) -> Result<CompiledDocument, Vec<CompileError>> {
        debug!(
            types = self.registry.len(),
            services = self.services.len(),
            extensions = self.pending_extensions.len(),
            "finishing document"
        );

        // 1. Extensions, in declaration order
        for (name, extension) in std::mem::take(&mut self.pending_extensions) {
            if let Some(rejection) = self.registry.add_extension(&name, extension) {
                self.diagnostics.push(rejection);
            }
        }

        // 2. Every referenced type must now be defined
        match self.registry.assert_all_resolved() {
            Ok(()) => {
                // 3. Constraint validation and inheritance checks
                let ctx = ValidationContext::new(&self.registry, &self.providers);
                self.diagnostics
                    .extend(validate_constraints(&ctx, self.services.values()));
                self.diagnostics
                    .extend(checks::inheritance_diagnostics(&self.registry, &self.config));
            }
            // Validation over placeholders only produces noise
            Err(unresolved) => self.diagnostics.extend(unresolved),
        }

        // 4. Severity policy
        let config = self.config;
        let mut diagnostics = self.diagnostics;
        for diagnostic in diagnostics.iter().filter(|d| d.severity == Severity::Warning) {
            warn!(code = diagnostic.kind.code(), kind = diagnostic.kind.name(), "{}", diagnostic.message);
        }
        let fatal = diagnostics.iter().any(|d| config.is_fatal(d.severity));
        if config.warnings_as_errors {
            for diagnostic in &mut diagnostics {
                if diagnostic.severity == Severity::Warning {
                    diagnostic.severity = Severity::Error;
                }
            }
        }
        checks::truncate(&mut diagnostics, config.max_diagnostics);

        if fatal {
            debug!(diagnostics = diagnostics.len(), "document failed");
            return Err(diagnostics);
        }
        Ok(CompiledDocument {
            document: TaxiDocument::new(self.registry, self.services),
            diagnostics,
        })
    }

    fn build_field(&mut self, decl: FieldDecl) -> Field {
        let constraints = self.build(&decl.constraints, &decl.type_ref);
        Field {
            name: decl.name,
            type_ref: decl.type_ref,
            nullable: decl.nullable,
            modifiers: decl.modifiers,
            annotations: decl.annotations,
            constraints,
            type_doc: decl.type_doc,
            default_value: decl.default_value,
            location: decl.location,
        }
    }

    fn build(&mut self, exprs: &[ConstraintExpr], target_type: &TypeRef) -> Vec<Constraint> {
        let (constraints, errors) =
            build_constraints(exprs, target_type, &self.providers, &mut self.registry);
        self.diagnostics.extend(errors);
        constraints
    }

    fn install(&mut self, name: &QualifiedName, definition: UserTypeDefinition) -> Option<TypeId> {
        let location = definition.location();
        match self.registry.register(name, definition) {
            Ok(id) => Some(id),
            Err(err) => {
                self.diagnostics.push(err.into_diagnostic(location));
                None
            }
        }
    }
}
