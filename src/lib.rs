//! # wsdl-compiler
//!
//! A compiler from WSDL/XSD schema documents to a compiled type catalog.
//!
//! The catalog is a named, flat space of scalar aliases and structural
//! types with resolved inheritance, flattened content models, effective
//! cardinalities and the service's operations, plus the marshalling
//! metadata generated runtime code needs at the wire boundary. It is the
//! single input to downstream emitters (client stubs, OpenAPI components,
//! gateway routes).
//!
//! ## Features
//!
//! - WSDL 1.1 and standalone XSD front-ends (doc/literal style)
//! - Named type graph, safe for recursive and mutually recursive types
//! - Content-model flattening with occurrence folding and choice policies
//! - Extension inheritance by reference, with disjointness enforcement
//! - Configurable primitive strategies for precision-sensitive families
//! - Lenient or fail-fast unresolved-reference handling
//! - Deterministic, diff-friendly catalog ordering and JSON serialization
//!
//! ## Example
//!
//! ```rust,ignore
//! use wsdl_compiler::{compile, CompilerOptions, SchemaSet};
//!
//! let wsdl = std::fs::read_to_string("weather.wsdl")?;
//! let set = SchemaSet::from_wsdl("weather.wsdl", &wsdl)?;
//! let catalog = compile(&set, CompilerOptions::default())?;
//!
//! for operation in &catalog.operations {
//!     println!("{}", operation.name);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;

// Utilities
pub mod names;
pub mod namespaces;

// Document reading
pub mod documents;
pub mod schema;

// Compilation
pub mod catalog;
pub mod compiler;
pub mod config;

// Re-exports for convenience
pub use catalog::Catalog;
pub use compiler::compile;
pub use config::{ChoicePolicy, CompilerOptions, PrimitiveStrategy, ReferencePolicy};
pub use error::{Error, Result};
pub use schema::SchemaSet;

/// Version of the wsdl-compiler library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML Schema instance namespace
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// WSDL 1.1 namespace
pub const WSDL_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/";

/// WSDL SOAP 1.1 binding namespace
pub const SOAP_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
