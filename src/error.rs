//! Error types for wsdl-compiler
//!
//! This module defines all error types used throughout the library.
//! The three fatal compilation conditions carry structured context so that
//! a failed compile always names the offending declaration, its namespace,
//! and the referencing context.

use std::fmt;
use thiserror::Error;

/// Result type alias using the wsdl-compiler Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for schema compilation
#[derive(Error, Debug)]
pub enum Error {
    /// A declared type or element name matched no registered declaration
    /// (raised only under the fail-fast reference policy)
    #[error("unresolved reference: {0}")]
    UnresolvedReference(#[from] ReferenceError),

    /// A particle tree violated basic structural expectations
    #[error("malformed content model: {0}")]
    MalformedContentModel(#[from] ContentModelError),

    /// Two distinct declarations resolved to the same canonical name
    #[error("name collision: {0}")]
    NameCollision(#[from] CollisionError),

    /// Namespace error (prefix handling outside the lenient resolution path)
    #[error("namespace error: {0}")]
    Namespace(String),

    /// Name error (invalid XML name in a declaration)
    #[error("name error: {0}")]
    Name(String),

    /// XML parsing error in a source document
    #[error("XML error: {0}")]
    Xml(String),

    /// Structural error in a WSDL/XSD document
    #[error("schema error: {0}")]
    Schema(String),
}

/// Unresolved type or element reference with referencing context
#[derive(Debug, Clone)]
pub struct ReferenceError {
    /// The reference as written in the source document
    pub reference: String,
    /// Namespace of the reference, when one was resolvable
    pub namespace: Option<String>,
    /// The type or operation that contained the reference
    pub context: Option<String>,
    /// Source document identifier
    pub location: Option<String>,
}

impl ReferenceError {
    /// Create a new reference error
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            namespace: None,
            context: None,
            location: None,
        }
    }

    /// Set the namespace of the reference
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the referencing type or operation
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set the source document identifier
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' does not match any declared type or element",
            self.reference
        )?;

        if let Some(ref ns) = self.namespace {
            write!(f, "\n\nNamespace: {}", ns)?;
        }

        if let Some(ref ctx) = self.context {
            write!(f, "\n\nReferenced from: {}", ctx)?;
        }

        if let Some(ref loc) = self.location {
            write!(f, "\n\nDocument: {}", loc)?;
        }

        write!(
            f,
            "\n\nSuggestion: declare the type in one of the schema documents, \
             or compile with the lenient reference policy to record it as unresolved"
        )
    }
}

impl std::error::Error for ReferenceError {}

/// Structural violation in a particle tree
#[derive(Debug, Clone)]
pub struct ContentModelError {
    /// Error message
    pub message: String,
    /// The declaration that owns the particle
    pub owner: Option<String>,
    /// Namespace of the owning declaration
    pub namespace: Option<String>,
}

impl ContentModelError {
    /// Create a new content model error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            owner: None,
            namespace: None,
        }
    }

    /// Set the owning declaration
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set the namespace of the owning declaration
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

impl fmt::Display for ContentModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref owner) = self.owner {
            write!(f, "\n\nOwner: {}", owner)?;
        }

        if let Some(ref ns) = self.namespace {
            write!(f, "\n\nNamespace: {}", ns)?;
        }

        write!(
            f,
            "\n\nSuggestion: fix the occurrence constraints in the source schema; \
             guessing a type shape here would silently corrupt the catalog"
        )
    }
}

impl std::error::Error for ContentModelError {}

/// Two distinct declarations claiming the same canonical name
#[derive(Debug, Clone)]
pub struct CollisionError {
    /// The contested canonical name
    pub name: String,
    /// Namespace of the first declaration
    pub first_namespace: Option<String>,
    /// Namespace of the second declaration
    pub second_namespace: Option<String>,
}

impl CollisionError {
    /// Create a new collision error
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            first_namespace: None,
            second_namespace: None,
        }
    }

    /// Set the namespace of the first declaration
    pub fn with_first(mut self, namespace: impl Into<String>) -> Self {
        self.first_namespace = Some(namespace.into());
        self
    }

    /// Set the namespace of the second declaration
    pub fn with_second(mut self, namespace: impl Into<String>) -> Self {
        self.second_namespace = Some(namespace.into());
        self
    }
}

impl fmt::Display for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "canonical name '{}' is claimed by two distinct declarations",
            self.name
        )?;

        if let Some(ref ns) = self.first_namespace {
            write!(f, "\n\nFirst declared in: {}", ns)?;
        }

        if let Some(ref ns) = self.second_namespace {
            write!(f, "\n\nAlso declared in: {}", ns)?;
        }

        write!(
            f,
            "\n\nSuggestion: rename one of the declarations; merging them \
             would silently conflate unrelated types in the catalog"
        )
    }
}

impl std::error::Error for CollisionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_error_display() {
        let err = ReferenceError::new("tns:MissingType")
            .with_namespace("http://example.com/weather")
            .with_context("WeatherReturn")
            .with_location("weather.wsdl");

        let msg = format!("{}", err);
        assert!(msg.contains("tns:MissingType"));
        assert!(msg.contains("Namespace:"));
        assert!(msg.contains("Referenced from: WeatherReturn"));
        assert!(msg.contains("Document: weather.wsdl"));
        assert!(msg.contains("Suggestion:"));
    }

    #[test]
    fn test_content_model_error_display() {
        let err = ContentModelError::new("maxOccurs (1) is less than minOccurs (2)")
            .with_owner("ForecastReturn")
            .with_namespace("http://example.com/weather");

        let msg = format!("{}", err);
        assert!(msg.contains("maxOccurs"));
        assert!(msg.contains("Owner: ForecastReturn"));
    }

    #[test]
    fn test_collision_error_display() {
        let err = CollisionError::new("Forecast")
            .with_first("http://example.com/a")
            .with_second("http://example.com/b");

        let msg = format!("{}", err);
        assert!(msg.contains("'Forecast'"));
        assert!(msg.contains("First declared in:"));
        assert!(msg.contains("Also declared in:"));
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ReferenceError::new("tns:Missing").into();
        assert!(matches!(err, Error::UnresolvedReference(_)));

        let err: Error = CollisionError::new("Dup").into();
        assert!(matches!(err, Error::NameCollision(_)));
    }
}
