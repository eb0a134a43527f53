//! Inheritance resolution
//!
//! Extension bases are recorded as references to the base type's canonical
//! name, never by copying base members into the derived type; consumers
//! materialize the full member set by walking the base chain root-first.
//! Simple-content extension contributes the reserved text-content slot
//! typed by the extension base.
//!
//! The disjointness pass runs after every type has compiled, since a base
//! may compile after its derivations. A local member that redeclares an
//! inherited name is dropped with a diagnostic, so the root-first
//! materialized member list never contains the same name twice.

use std::collections::HashSet;

use crate::catalog::Element;
use crate::error::Result;
use crate::schema::SchemaDocument;

use super::content;
use super::CatalogBuilder;

/// Build the text-content slot for a simple-content extension.
///
/// A named-type base stays a named reference: a single text slot whose
/// resolved representation is itself a named type is the shape by which
/// downstream emitters recognize value inheritance.
pub(crate) fn simple_content_element(
    builder: &mut CatalogBuilder,
    base: &str,
    doc: &SchemaDocument,
    owner: &str,
) -> Result<Element> {
    let repr = builder.resolve_type_ref(base, doc, owner)?;
    Ok(content::text_content_element(repr, base, true))
}

/// Drop local members that redeclare a name inherited from the base chain
pub(crate) fn enforce_disjointness(builder: &mut CatalogBuilder) {
    let names: Vec<String> = builder.types.keys().cloned().collect();

    for name in names {
        let mut inherited_elements = HashSet::new();
        let mut inherited_attributes = HashSet::new();

        let mut seen = HashSet::new();
        seen.insert(name.clone());
        let mut cursor = builder.types.get(&name).and_then(|ty| ty.base.clone());
        while let Some(base) = cursor {
            if !seen.insert(base.clone()) {
                builder.diagnostic(
                    format!("extension base cycle through '{}'", base),
                    None,
                    Some(&name),
                );
                break;
            }
            let Some(ancestor) = builder.types.get(&base) else {
                break;
            };
            for element in &ancestor.elements {
                inherited_elements.insert(element.name.clone());
            }
            for attribute in &ancestor.attributes {
                inherited_attributes.insert(attribute.name.clone());
            }
            cursor = ancestor.base.clone();
        }

        if inherited_elements.is_empty() && inherited_attributes.is_empty() {
            continue;
        }

        let mut dropped = Vec::new();
        let Some(ty) = builder.types.get_mut(&name) else {
            continue;
        };
        ty.elements.retain(|element| {
            let keep = !inherited_elements.contains(&element.name);
            if !keep {
                dropped.push(format!(
                    "element '{}' redeclares a member inherited by '{}', dropped",
                    element.name, name
                ));
            }
            keep
        });
        ty.attributes.retain(|attribute| {
            let keep = !inherited_attributes.contains(&attribute.name);
            if !keep {
                dropped.push(format!(
                    "attribute '{}' redeclares a member inherited by '{}', dropped",
                    attribute.name, name
                ));
            }
            keep
        });

        for message in dropped {
            builder.diagnostic(message, None, Some(&name));
        }
    }
}
