//! Operation extraction
//!
//! Binds each declared operation's input and output wrapper elements to the
//! compiled types backing them. Doc/literal wrappers come in two shapes:
//! a top-level element with an inline type, registered under the element's
//! own canonical name, or a top-level element referencing a named type. A
//! wrapper reference that matches no top-level element falls under the
//! unresolved-reference policy.

use crate::catalog::Operation;
use crate::error::Result;
use crate::schema::SchemaSet;

use super::types::{find_binding, ElementBindings};
use super::CatalogBuilder;

/// Extract the declared operations, binding wrappers to compiled types
pub(crate) fn extract(
    builder: &mut CatalogBuilder,
    set: &SchemaSet,
    bindings: &ElementBindings,
) -> Result<Vec<Operation>> {
    let Some(service) = &set.service else {
        return Ok(Vec::new());
    };

    let mut operations = Vec::new();
    for decl in &service.operations {
        let input = match &decl.input_element {
            Some(raw) => resolve_wrapper(builder, set, bindings, raw, &decl.name)?,
            None => None,
        };
        let output = match &decl.output_element {
            Some(raw) => resolve_wrapper(builder, set, bindings, raw, &decl.name)?,
            None => None,
        };

        operations.push(Operation {
            name: decl.name.clone(),
            input,
            output,
            soap_action: decl.soap_action.clone(),
            security_hints: decl.policy_hints.clone(),
        });
    }

    Ok(operations)
}

/// Resolve a message part's element reference to the canonical name of the
/// type backing the wrapper
fn resolve_wrapper(
    builder: &mut CatalogBuilder,
    set: &SchemaSet,
    bindings: &ElementBindings,
    raw: &str,
    operation: &str,
) -> Result<Option<String>> {
    let binding = match find_binding(set, bindings, raw) {
        Some(binding) => binding,
        None => {
            // Lenient compilation records the miss and leaves the slot empty
            return builder
                .record_unresolved(raw, None, operation, &set.source)
                .map(|_| None);
        }
    };

    if let Some(canonical) = &binding.inline_type {
        return Ok(Some(canonical.clone()));
    }

    if let Some(type_ref) = &binding.type_ref {
        let doc = &set.documents[binding.doc];
        let resolved = builder.resolve_type_ref(type_ref, doc, operation)?;
        return Ok(resolved.name().map(String::from));
    }

    // An element with neither a type nor inline content carries no
    // marshallable shape
    Ok(None)
}
