//! The schema compiler
//!
//! A single synchronous pipeline over an immutable [`SchemaSet`]:
//! name registration, type graph compilation (content-model flattening,
//! inheritance resolution, primitive mapping), operation extraction,
//! marshalling metadata derivation, and finally the deterministic ordering
//! pass that freezes the [`Catalog`].
//!
//! The shared registry of compiled declarations lives in [`CatalogBuilder`],
//! an explicitly passed, pass-scoped builder that is frozen into the catalog
//! at the end of the pass. It performs no I/O and holds no global state.

pub mod content;
pub mod inheritance;
pub mod marshalling;
pub mod names;
pub mod operations;
pub mod primitives;
pub mod types;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::catalog::{
    Catalog, Diagnostic, MarshallingMetadata, Operation, ScalarAlias, ScalarKind, StructuralType,
    TypeRef,
};
use crate::config::{CompilerOptions, ReferencePolicy};
use crate::error::{ReferenceError, Result};
use crate::schema::{SchemaDocument, SchemaSet};

use names::{DeclKind, NameTable};

/// Compile a schema set into a catalog.
///
/// Compilation either fully succeeds - possibly with recorded unresolved
/// references under the lenient policy - or fully fails; a fatal condition
/// never yields a partially built catalog.
pub fn compile(set: &SchemaSet, options: CompilerOptions) -> Result<Catalog> {
    let mut builder = CatalogBuilder::new(options);

    debug!(documents = set.documents.len(), source = %set.source, "registering declarations");
    let (pending, bindings) = types::register(&mut builder, set)?;

    debug!(aliases = pending.simples.len(), "compiling scalar aliases");
    types::compile_aliases(&mut builder, set, &pending)?;

    debug!(types = pending.complexes.len(), "compiling structural types");
    types::compile_structural(&mut builder, set, &pending, &bindings)?;
    inheritance::enforce_disjointness(&mut builder);

    let operations = operations::extract(&mut builder, set, &bindings)?;
    debug!(operations = operations.len(), "extracted operations");

    let catalog = builder.freeze(set, operations).finish();
    let metadata = marshalling::build(&catalog);

    Ok(Catalog { metadata, ..catalog })
}

/// Pass-scoped registry of compiled declarations.
///
/// Written only during the compilation pass; the frozen catalog is the
/// read-only view everything downstream consumes.
pub(crate) struct CatalogBuilder {
    pub(crate) options: CompilerOptions,
    pub(crate) names: NameTable,
    pub(crate) aliases: IndexMap<String, ScalarAlias>,
    pub(crate) types: IndexMap<String, StructuralType>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl CatalogBuilder {
    fn new(options: CompilerOptions) -> Self {
        Self {
            options,
            names: NameTable::new(),
            aliases: IndexMap::new(),
            types: IndexMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Record a diagnostic
    pub(crate) fn diagnostic(
        &mut self,
        message: impl Into<String>,
        namespace: Option<&str>,
        context: Option<&str>,
    ) {
        let message = message.into();
        warn!(context, "{}", message);
        self.diagnostics.push(Diagnostic {
            message,
            namespace: namespace.map(String::from),
            context: context.map(String::from),
        });
    }

    /// Apply the unresolved-reference policy to a reference that matched no
    /// registered declaration
    pub(crate) fn record_unresolved(
        &mut self,
        reference: &str,
        namespace: Option<&str>,
        context: &str,
        location: &str,
    ) -> Result<TypeRef> {
        match self.options.reference_policy {
            ReferencePolicy::FailFast => {
                let mut err = ReferenceError::new(reference)
                    .with_context(context)
                    .with_location(location);
                if let Some(ns) = namespace {
                    err = err.with_namespace(ns);
                }
                Err(err.into())
            }
            ReferencePolicy::Lenient => {
                self.diagnostic(
                    format!("reference '{}' is unresolved, retained as unknown", reference),
                    namespace,
                    Some(context),
                );
                Ok(TypeRef::Unresolved(reference.to_string()))
            }
        }
    }

    /// Resolve a type reference as written in a document to its compiled
    /// representation
    pub(crate) fn resolve_type_ref(
        &mut self,
        raw: &str,
        doc: &SchemaDocument,
        context: &str,
    ) -> Result<TypeRef> {
        let qname = match doc
            .context
            .resolve_reference(raw, doc.target_namespace.as_deref())
        {
            Ok(qname) => qname,
            // Unbound prefix: an unresolved-reference condition, not a
            // fatal parse error
            Err(_) => return self.record_unresolved(raw, None, context, &doc.location),
        };

        if qname.in_namespace(crate::XSD_NAMESPACE) {
            return Ok(TypeRef::Scalar(primitives::builtin_kind(
                &qname.local_name,
                &self.options,
            )));
        }

        match self.names.lookup(&qname) {
            Some((canonical, DeclKind::Alias)) => Ok(TypeRef::Alias(canonical.to_string())),
            Some((canonical, DeclKind::Structural)) => {
                Ok(TypeRef::Structural(canonical.to_string()))
            }
            None => {
                let namespace = qname.namespace.clone();
                self.record_unresolved(raw, namespace.as_deref(), context, &doc.location)
            }
        }
    }

    /// Resolve an attribute's declared type to a scalar representation
    pub(crate) fn resolve_attribute_kind(
        &mut self,
        raw: Option<&str>,
        doc: &SchemaDocument,
        context: &str,
    ) -> Result<ScalarKind> {
        let Some(raw) = raw else {
            // No declared type means anySimpleType
            return Ok(ScalarKind::Text);
        };

        match self.resolve_type_ref(raw, doc, context)? {
            TypeRef::Scalar(kind) => Ok(kind),
            TypeRef::Alias(name) => Ok(self
                .aliases
                .get(&name)
                .map(|alias| alias.kind)
                .unwrap_or(ScalarKind::Text)),
            TypeRef::Structural(name) => {
                self.diagnostic(
                    format!("attribute type '{}' is not a simple type", name),
                    None,
                    Some(context),
                );
                Ok(ScalarKind::Text)
            }
            // Diagnostic already recorded; keep the lexical value readable
            TypeRef::Unresolved(_) => Ok(ScalarKind::Text),
        }
    }

    /// Freeze the builder into an (unsorted) catalog
    fn freeze(self, set: &SchemaSet, operations: Vec<Operation>) -> Catalog {
        let service_name = self
            .options
            .display_name
            .clone()
            .or_else(|| set.service.as_ref().map(|s| s.name.clone()))
            .unwrap_or_else(|| "Service".to_string());

        Catalog {
            service_name,
            source: set.source.clone(),
            options: self.options,
            aliases: self.aliases.into_values().collect(),
            types: self.types.into_values().collect(),
            operations,
            metadata: MarshallingMetadata::default(),
            diagnostics: self.diagnostics,
        }
    }
}
