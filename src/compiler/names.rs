//! Name resolution
//!
//! Maps namespace-qualified declaration names onto the canonical, flat
//! identifier space spanning all documents of a schema set. The same
//! qualified name always resolves to the same canonical identifier,
//! regardless of which document or prefix referenced it; two distinct
//! declarations claiming one canonical identifier is a fatal collision.

use std::collections::HashMap;

use crate::error::{CollisionError, Result};
use crate::namespaces::QName;

/// What kind of declaration a canonical name stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// A scalar alias (named simple type)
    Alias,
    /// A structural type (named complex type)
    Structural,
}

/// Registry of canonical identifiers for one compilation pass
#[derive(Debug, Default)]
pub struct NameTable {
    by_qname: HashMap<QName, String>,
    by_canonical: HashMap<String, (QName, DeclKind)>,
}

impl NameTable {
    /// Create an empty name table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration and return its canonical identifier.
    ///
    /// The canonical identifier is the declaration's local name; the flat
    /// space is what keeps the catalog's keys and the generated artifacts
    /// free of namespace noise. A second declaration claiming the same
    /// identifier would silently merge unrelated types, so it is fatal.
    pub fn register(&mut self, qname: QName, kind: DeclKind) -> Result<String> {
        let canonical = qname.local_name.clone();

        if let Some((existing, _)) = self.by_canonical.get(&canonical) {
            let mut err = CollisionError::new(&canonical);
            if let Some(ns) = &existing.namespace {
                err = err.with_first(ns);
            }
            if let Some(ns) = &qname.namespace {
                err = err.with_second(ns);
            }
            return Err(err.into());
        }

        self.by_qname.insert(qname.clone(), canonical.clone());
        self.by_canonical.insert(canonical.clone(), (qname, kind));
        Ok(canonical)
    }

    /// Resolve a qualified reference to its canonical identifier
    pub fn lookup(&self, qname: &QName) -> Option<(&str, DeclKind)> {
        let canonical = self.by_qname.get(qname)?;
        let (_, kind) = self.by_canonical.get(canonical)?;
        Some((canonical.as_str(), *kind))
    }

    /// Look up a canonical identifier directly
    pub fn lookup_canonical(&self, canonical: &str) -> Option<DeclKind> {
        self.by_canonical.get(canonical).map(|(_, kind)| *kind)
    }
}
