//! Marshalling metadata derivation
//!
//! Generated runtime code moves erased values across the wire boundary and
//! cannot see static declarations, so the catalog carries two lookup
//! tables: which property names of a type serialize as XML attributes
//! rather than child elements, and which canonical type governs recursion
//! into each child-element property. Both are derived from the full
//! inherited view, since wire shape includes inherited members.
//!
//! Runs over the frozen catalog, after the deterministic ordering pass, so
//! table iteration order matches catalog order.

use indexmap::IndexMap;

use crate::catalog::{Catalog, MarshallingMetadata};

/// Derive the marshalling lookup tables from a frozen catalog
pub(crate) fn build(catalog: &Catalog) -> MarshallingMetadata {
    let mut metadata = MarshallingMetadata::default();

    for ty in &catalog.types {
        let attributes: Vec<String> = catalog
            .full_attributes(&ty.name)
            .iter()
            .map(|attribute| attribute.name.clone())
            .collect();
        // Every type gets an entry, so membership tests need no fallback
        metadata.attributes.insert(ty.name.clone(), attributes);

        let mut children = IndexMap::new();
        for element in catalog.full_elements(&ty.name) {
            if let Some(name) = element.repr.name() {
                children.insert(element.name.clone(), name.to_string());
            }
        }
        metadata.children.insert(ty.name.clone(), children);
    }

    metadata
}
