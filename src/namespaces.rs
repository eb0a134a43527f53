//! XML namespace handling
//!
//! This module provides qualified names (QNames) and the per-document
//! prefix-to-namespace scopes the name resolver works against.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Qualified name - combination of namespace URI and local name.
/// Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<String>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Check whether this name lives in the given namespace
    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.namespace.as_deref() == Some(namespace)
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// In-scope prefix bindings for one point of a document tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamespaceContext {
    /// Mapping from prefix to namespace URI
    prefixes: HashMap<String, String>,
    /// Default namespace (no prefix)
    default_namespace: Option<String>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace prefix binding
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Set the default namespace
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        self.default_namespace = Some(namespace.into());
    }

    /// Get the namespace bound to a prefix
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Get the default namespace
    pub fn get_default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Derive a nested scope: this context's bindings overlaid onto `self`.
    /// Used while walking a document tree, where xmlns declarations on an
    /// element shadow the ones inherited from its ancestors.
    pub fn child(&self, overrides: &NamespaceContext) -> Self {
        let mut scope = self.clone();
        for (prefix, ns) in &overrides.prefixes {
            scope.prefixes.insert(prefix.clone(), ns.clone());
        }
        if let Some(ns) = &overrides.default_namespace {
            scope.default_namespace = Some(ns.clone());
        }
        scope
    }

    /// Resolve a possibly-prefixed name against this scope.
    ///
    /// An unbound prefix is an error here; the compiler turns it into an
    /// unresolved-reference condition rather than aborting, per the
    /// configured reference policy.
    pub fn resolve(&self, prefixed_name: &str) -> Result<QName> {
        if let Some((prefix, local)) = prefixed_name.split_once(':') {
            let namespace = self
                .get_namespace(prefix)
                .ok_or_else(|| Error::Namespace(format!("unbound prefix: {}", prefix)))?;
            Ok(QName::namespaced(namespace, local))
        } else {
            Ok(QName::new(self.default_namespace.clone(), prefixed_name))
        }
    }

    /// Resolve a type reference: like [`resolve`](Self::resolve), but an
    /// unprefixed name falls back to the given target namespace instead of
    /// the default namespace. XSD type references without a prefix refer to
    /// the schema's own target namespace in the common elementFormDefault
    /// layouts this compiler targets.
    pub fn resolve_reference(&self, name: &str, target_namespace: Option<&str>) -> Result<QName> {
        if name.contains(':') {
            self.resolve(name)
        } else {
            let ns = self
                .default_namespace
                .as_deref()
                .or(target_namespace)
                .map(|s| s.to_string());
            Ok(QName::new(ns, name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qname_creation() {
        let qname = QName::namespaced("http://example.com", "Forecast");
        assert_eq!(qname.namespace, Some("http://example.com".to_string()));
        assert_eq!(qname.local_name, "Forecast");
    }

    #[test]
    fn test_qname_display() {
        let qname = QName::namespaced("http://example.com", "Forecast");
        assert_eq!(qname.to_string(), "{http://example.com}Forecast");

        let qname_local = QName::local("Forecast");
        assert_eq!(qname_local.to_string(), "Forecast");
    }

    #[test]
    fn test_namespace_context() {
        let mut ctx = NamespaceContext::new();
        ctx.add_prefix("xs", "http://www.w3.org/2001/XMLSchema");
        ctx.set_default_namespace("http://example.com");

        assert_eq!(
            ctx.get_namespace("xs"),
            Some("http://www.w3.org/2001/XMLSchema")
        );
        assert_eq!(ctx.get_default_namespace(), Some("http://example.com"));
    }

    #[test]
    fn test_resolve_prefixed_name() {
        let mut ctx = NamespaceContext::new();
        ctx.add_prefix("xs", "http://www.w3.org/2001/XMLSchema");

        let qname = ctx.resolve("xs:string").unwrap();
        assert_eq!(
            qname.namespace,
            Some("http://www.w3.org/2001/XMLSchema".to_string())
        );
        assert_eq!(qname.local_name, "string");
    }

    #[test]
    fn test_resolve_unbound_prefix() {
        let ctx = NamespaceContext::new();
        assert!(ctx.resolve("tns:Forecast").is_err());
    }

    #[test]
    fn test_child_scope_shadows_parent() {
        let mut parent = NamespaceContext::new();
        parent.add_prefix("tns", "http://example.com/old");
        parent.set_default_namespace("http://example.com/default");

        let mut overrides = NamespaceContext::new();
        overrides.add_prefix("tns", "http://example.com/new");

        let child = parent.child(&overrides);
        assert_eq!(child.get_namespace("tns"), Some("http://example.com/new"));
        assert_eq!(
            child.get_default_namespace(),
            Some("http://example.com/default")
        );
    }

    #[test]
    fn test_resolve_reference_target_namespace_fallback() {
        let ctx = NamespaceContext::new();
        let qname = ctx
            .resolve_reference("Forecast", Some("http://example.com/weather"))
            .unwrap();
        assert_eq!(
            qname.namespace,
            Some("http://example.com/weather".to_string())
        );
    }
}
