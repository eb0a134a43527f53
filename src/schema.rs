//! Schema Set input model
//!
//! This module defines the immutable, already-materialized collection of
//! parsed schema documents that the compiler consumes, together with the
//! reader that builds it from WSDL/XSD text. The reader never performs I/O;
//! fetching documents and resolving include/import locations is the job of
//! an upstream collaborator that hands over plain text.
//!
//! The declaration model covers the XSD subset used by SOAP 1.1 service
//! contracts: named simple/complex types, sequence/choice/all groups,
//! simpleContent/complexContent extension, attributes, enumerations and
//! occurrence constraints.

use std::collections::HashMap;

use crate::documents::{Document, Element};
use crate::error::{ContentModelError, Error, Result};
use crate::names::{split_qname, validate_ncname};
use crate::namespaces::NamespaceContext;

/// Occurrence bounds for a particle (minOccurs, maxOccurs).
/// None for `max` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurs {
    /// Minimum number of occurrences (default 1)
    pub min: u32,
    /// Maximum number of occurrences (None = unbounded, default 1)
    pub max: Option<u32>,
}

impl Occurs {
    /// Create new occurrence bounds
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Default occurrence (1, 1)
    pub fn once() -> Self {
        Self { min: 1, max: Some(1) }
    }

    /// Optional occurrence (0, 1)
    pub fn optional() -> Self {
        Self { min: 0, max: Some(1) }
    }

    /// Zero or more (0, unbounded)
    pub fn zero_or_more() -> Self {
        Self { min: 0, max: None }
    }

    /// One or more (1, unbounded)
    pub fn one_or_more() -> Self {
        Self { min: 1, max: None }
    }

    /// Check if this particle can be absent (minOccurs == 0)
    pub fn is_emptiable(&self) -> bool {
        self.min == 0
    }

    /// Check if this particle can repeat (maxOccurs > 1 or unbounded)
    pub fn is_multiple(&self) -> bool {
        match self.max {
            Some(max) => max > 1,
            None => true,
        }
    }

    /// Fold an enclosing group's bounds into these bounds.
    ///
    /// A leaf nested inside a repeating group effectively repeats itself:
    /// both bounds multiply, with unbounded absorbing any nonzero factor.
    pub fn fold(&self, outer: Occurs) -> Occurs {
        let max = match (self.max, outer.max) {
            (Some(0), _) | (_, Some(0)) => Some(0),
            (None, _) | (_, None) => None,
            (Some(a), Some(b)) => Some(a.saturating_mul(b)),
        };
        Occurs {
            min: self.min.saturating_mul(outer.min),
            max,
        }
    }

    /// Parse minOccurs/maxOccurs attribute values.
    ///
    /// A maximum below the minimum is always fatal: silently guessing the
    /// intended bounds would produce an incorrect type shape.
    pub fn parse(min_occurs: Option<&str>, max_occurs: Option<&str>, owner: &str) -> Result<Self> {
        let mut occurs = Occurs::once();

        if let Some(min_str) = min_occurs {
            occurs.min = min_str.parse::<u32>().map_err(|_| {
                Error::from(
                    ContentModelError::new(format!(
                        "minOccurs '{}' is not a valid non-negative integer",
                        min_str
                    ))
                    .with_owner(owner),
                )
            })?;
        }

        if let Some(max_str) = max_occurs {
            if max_str == "unbounded" {
                occurs.max = None;
            } else {
                let max = max_str.parse::<u32>().map_err(|_| {
                    Error::from(
                        ContentModelError::new(format!(
                            "maxOccurs '{}' must be a non-negative integer or 'unbounded'",
                            max_str
                        ))
                        .with_owner(owner),
                    )
                })?;
                occurs.max = Some(max);
            }
        }

        if let Some(max) = occurs.max {
            if max < occurs.min {
                return Err(ContentModelError::new(format!(
                    "maxOccurs ({}) is less than minOccurs ({})",
                    max, occurs.min
                ))
                .with_owner(owner)
                .into());
            }
        }

        Ok(occurs)
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Self::once()
    }
}

/// Attribute requirement as declared in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeUse {
    /// use="optional" (the XSD default)
    #[default]
    Optional,
    /// use="required"
    Required,
    /// use="prohibited"
    Prohibited,
}

impl AttributeUse {
    /// Parse a use attribute value
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("required") => Self::Required,
            Some("prohibited") => Self::Prohibited,
            _ => Self::Optional,
        }
    }
}

/// Named simple-type declaration
#[derive(Debug, Clone)]
pub struct SimpleTypeDecl {
    /// Declared name
    pub name: String,
    /// Restriction base, as written (e.g. "xs:string")
    pub base: Option<String>,
    /// Literal values of the enumeration facet, in declaration order
    pub enumeration: Vec<String>,
    /// Free-form documentation from xs:annotation
    pub documentation: Option<String>,
}

/// Attribute declaration on a complex type
#[derive(Debug, Clone)]
pub struct AttributeDecl {
    /// Declared name
    pub name: String,
    /// Declared type, as written
    pub type_ref: Option<String>,
    /// Requirement
    pub use_: AttributeUse,
}

/// Element declaration: a particle leaf, or a top-level element
#[derive(Debug, Clone)]
pub struct ElementDecl {
    /// Declared name (for ref= elements, the local part of the reference)
    pub name: String,
    /// Declared type, as written; None when the type is inline
    pub type_ref: Option<String>,
    /// Reference to a top-level element, as written (ref=)
    pub reference: Option<String>,
    /// Anonymous inline complex type
    pub inline: Option<Box<ComplexTypeDecl>>,
    /// Occurrence bounds
    pub occurs: Occurs,
    /// nillable="true"
    pub nillable: bool,
}

/// Model group kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// xs:sequence
    Sequence,
    /// xs:choice
    Choice,
    /// xs:all
    All,
}

/// A node in a complex type's particle tree
#[derive(Debug, Clone)]
pub enum ParticleNode {
    /// A model group with its own occurrence bounds
    Group {
        /// sequence, choice or all
        kind: GroupKind,
        /// Occurrence bounds of the group itself
        occurs: Occurs,
        /// Nested particles in declaration order
        children: Vec<ParticleNode>,
    },
    /// A leaf element
    Element(ElementDecl),
}

/// Content of a complex type declaration
#[derive(Debug, Clone)]
pub enum ContentDecl {
    /// No content model (attributes only, or truly empty)
    Empty,
    /// A plain particle tree
    Particle(ParticleNode),
    /// complexContent derivation: base plus a local particle increment
    ComplexExtension {
        /// Base type, as written
        base: String,
        /// Local increment, if any
        particle: Option<ParticleNode>,
    },
    /// simpleContent extension: scalar base plus attributes
    SimpleExtension {
        /// Base type, as written
        base: String,
    },
}

/// Named complex-type declaration
#[derive(Debug, Clone)]
pub struct ComplexTypeDecl {
    /// Declared name; empty for anonymous inline types
    pub name: String,
    /// Content model
    pub content: ContentDecl,
    /// Attribute declarations, in declaration order
    pub attributes: Vec<AttributeDecl>,
    /// mixed="true": text content interleaved with children
    pub mixed: bool,
    /// Free-form documentation from xs:annotation
    pub documentation: Option<String>,
}

/// One parsed schema document with its namespace scope
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// The targetNamespace of the document
    pub target_namespace: Option<String>,
    /// In-scope prefix bindings at the schema element
    pub context: NamespaceContext,
    /// Named simple types, in declaration order
    pub simple_types: Vec<SimpleTypeDecl>,
    /// Named complex types, in declaration order
    pub complex_types: Vec<ComplexTypeDecl>,
    /// Top-level element declarations, in declaration order
    pub elements: Vec<ElementDecl>,
    /// Source document identifier
    pub location: String,
}

/// One RPC-style entry point, as declared
#[derive(Debug, Clone)]
pub struct OperationDecl {
    /// Operation name
    pub name: String,
    /// Wrapper element of the input message, as written
    pub input_element: Option<String>,
    /// Wrapper element of the output message, as written
    pub output_element: Option<String>,
    /// Transport action identifier (soapAction)
    pub soap_action: Option<String>,
    /// Attached security-policy hints, advisory only
    pub policy_hints: Vec<String>,
}

/// Declared service with its operations
#[derive(Debug, Clone)]
pub struct ServiceDecl {
    /// Declared service name
    pub name: String,
    /// Operations, in declaration order
    pub operations: Vec<OperationDecl>,
}

/// Immutable collection of parsed schema documents, plus the declared
/// service when the source was a WSDL
#[derive(Debug, Clone)]
pub struct SchemaSet {
    /// Source document identifier (provenance)
    pub source: String,
    /// Fully materialized schema documents
    pub documents: Vec<SchemaDocument>,
    /// The declared service, if any
    pub service: Option<ServiceDecl>,
}

impl SchemaSet {
    /// Create an empty schema set with the given source identifier
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            documents: Vec::new(),
            service: None,
        }
    }

    /// Build a schema set from the text of a WSDL document
    pub fn from_wsdl(source: impl Into<String>, xml: &str) -> Result<Self> {
        let source = source.into();
        let doc = Document::from_string(xml)?;
        let root = doc
            .root()
            .ok_or_else(|| Error::Schema("empty WSDL document".to_string()))?;

        if root.local_name() != "definitions" {
            return Err(Error::Schema(format!(
                "expected wsdl:definitions root element, got '{}'",
                root.local_name()
            )));
        }

        let scope = NamespaceContext::new().child(&root.namespaces);
        let mut set = SchemaSet::new(source.clone());

        // Schema documents embedded under wsdl:types
        for types in root.find_children("types") {
            let types_scope = scope.child(&types.namespaces);
            for schema in types.find_children("schema") {
                set.documents
                    .push(read_schema_document(&types_scope, schema, &source)?);
            }
        }

        set.service = Some(read_service(root)?);
        Ok(set)
    }

    /// Build a schema set from the text of a standalone XSD document
    pub fn from_schema(source: impl Into<String>, xml: &str) -> Result<Self> {
        let source = source.into();
        let mut set = SchemaSet::new(source.clone());
        set.add_schema(&source, xml)?;
        Ok(set)
    }

    /// Add another already-fetched schema document to the set
    pub fn add_schema(&mut self, location: &str, xml: &str) -> Result<()> {
        let doc = Document::from_string(xml)?;
        let root = doc
            .root()
            .ok_or_else(|| Error::Schema("empty schema document".to_string()))?;

        if root.local_name() != "schema" {
            return Err(Error::Schema(format!(
                "expected xs:schema root element, got '{}'",
                root.local_name()
            )));
        }

        let scope = NamespaceContext::new();
        self.documents
            .push(read_schema_document(&scope, root, location)?);
        Ok(())
    }
}

fn read_schema_document(
    parent_scope: &NamespaceContext,
    schema: &Element,
    location: &str,
) -> Result<SchemaDocument> {
    let scope = parent_scope.child(&schema.namespaces);
    let target_namespace = schema.get_attribute("targetNamespace").map(String::from);

    let mut doc = SchemaDocument {
        target_namespace,
        context: scope.clone(),
        simple_types: Vec::new(),
        complex_types: Vec::new(),
        elements: Vec::new(),
        location: location.to_string(),
    };

    for child in &schema.children {
        match child.local_name() {
            "simpleType" => {
                let name = required_name(child, "simpleType")?;
                doc.simple_types.push(read_simple_type(child, name)?);
            }
            "complexType" => {
                let name = required_name(child, "complexType")?;
                doc.complex_types.push(read_complex_type(child, name)?);
            }
            "element" => {
                doc.elements.push(read_element(child, true)?);
            }
            // include/import are resolved upstream; annotations carry no
            // declarations
            _ => {}
        }
    }

    Ok(doc)
}

fn required_name(elem: &Element, kind: &str) -> Result<String> {
    let name = elem
        .get_attribute("name")
        .ok_or_else(|| Error::Schema(format!("top-level {} without a name", kind)))?;
    validate_ncname(name)?;
    Ok(name.to_string())
}

fn read_documentation(elem: &Element) -> Option<String> {
    let annotation = elem.find_child("annotation")?;
    let documentation = annotation.find_child("documentation")?;
    documentation.text.as_ref().map(|t| t.trim().to_string())
}

fn read_simple_type(elem: &Element, name: String) -> Result<SimpleTypeDecl> {
    let documentation = read_documentation(elem);
    let mut base = None;
    let mut enumeration = Vec::new();

    if let Some(restriction) = elem.find_child("restriction") {
        base = restriction.get_attribute("base").map(String::from);
        for facet in restriction.find_children("enumeration") {
            if let Some(value) = facet.get_attribute("value") {
                enumeration.push(value.to_string());
            }
        }
    }

    Ok(SimpleTypeDecl {
        name,
        base,
        enumeration,
        documentation,
    })
}

fn read_complex_type(elem: &Element, name: String) -> Result<ComplexTypeDecl> {
    let documentation = read_documentation(elem);
    let mixed = matches!(elem.get_attribute("mixed"), Some("true") | Some("1"));
    let owner = if name.is_empty() { "<anonymous>" } else { &name };

    let mut content = ContentDecl::Empty;
    let mut attributes = Vec::new();

    for child in &elem.children {
        match child.local_name() {
            "sequence" | "choice" | "all" => {
                content = ContentDecl::Particle(read_group(child, owner)?);
            }
            "complexContent" => {
                // Both extension and restriction record the base; the
                // compiler treats the nested particle as the local increment
                let derivation = child
                    .find_child("extension")
                    .or_else(|| child.find_child("restriction"))
                    .ok_or_else(|| {
                        Error::Schema(format!(
                            "complexContent of '{}' has no extension or restriction",
                            owner
                        ))
                    })?;
                let base = derivation
                    .get_attribute("base")
                    .ok_or_else(|| {
                        Error::Schema(format!("complexContent of '{}' has no base", owner))
                    })?
                    .to_string();
                let mut particle = None;
                for nested in &derivation.children {
                    match nested.local_name() {
                        "sequence" | "choice" | "all" => {
                            particle = Some(read_group(nested, owner)?);
                        }
                        "attribute" => attributes.push(read_attribute(nested, owner)?),
                        _ => {}
                    }
                }
                content = ContentDecl::ComplexExtension { base, particle };
            }
            "simpleContent" => {
                let extension = child.find_child("extension").ok_or_else(|| {
                    Error::Schema(format!("simpleContent of '{}' has no extension", owner))
                })?;
                let base = extension
                    .get_attribute("base")
                    .ok_or_else(|| {
                        Error::Schema(format!("simpleContent of '{}' has no base", owner))
                    })?
                    .to_string();
                for nested in extension.find_children("attribute") {
                    attributes.push(read_attribute(nested, owner)?);
                }
                content = ContentDecl::SimpleExtension { base };
            }
            "attribute" => attributes.push(read_attribute(child, owner)?),
            _ => {}
        }
    }

    Ok(ComplexTypeDecl {
        name,
        content,
        attributes,
        mixed,
        documentation,
    })
}

fn read_group(elem: &Element, owner: &str) -> Result<ParticleNode> {
    let kind = match elem.local_name() {
        "sequence" => GroupKind::Sequence,
        "choice" => GroupKind::Choice,
        "all" => GroupKind::All,
        other => {
            return Err(Error::Schema(format!(
                "unexpected model group '{}' in '{}'",
                other, owner
            )))
        }
    };

    let occurs = Occurs::parse(
        elem.get_attribute("minOccurs"),
        elem.get_attribute("maxOccurs"),
        owner,
    )?;

    let mut children = Vec::new();
    for child in &elem.children {
        match child.local_name() {
            "element" => children.push(ParticleNode::Element(read_element(child, false)?)),
            "sequence" | "choice" | "all" => children.push(read_group(child, owner)?),
            // wildcards and group references are outside the targeted subset
            _ => {}
        }
    }

    Ok(ParticleNode::Group {
        kind,
        occurs,
        children,
    })
}

fn read_element(elem: &Element, top_level: bool) -> Result<ElementDecl> {
    let mut reference = None;
    let (name, mut type_ref) = if let Some(name) = elem.get_attribute("name") {
        validate_ncname(name)?;
        (name.to_string(), elem.get_attribute("type").map(String::from))
    } else if let Some(raw) = elem.get_attribute("ref") {
        // A reference takes the referenced element's local name; it resolves
        // against the registered top-level elements, not the type registry
        reference = Some(raw.to_string());
        (split_qname(raw).1.to_string(), None)
    } else {
        return Err(Error::Schema(
            "element declaration without name or ref".to_string(),
        ));
    };

    let occurs = if top_level {
        Occurs::once()
    } else {
        Occurs::parse(
            elem.get_attribute("minOccurs"),
            elem.get_attribute("maxOccurs"),
            &name,
        )?
    };

    let nillable = matches!(elem.get_attribute("nillable"), Some("true") | Some("1"));

    let mut inline = None;
    if type_ref.is_none() {
        if let Some(complex) = elem.find_child("complexType") {
            inline = Some(Box::new(read_complex_type(complex, String::new())?));
        } else if let Some(simple) = elem.find_child("simpleType") {
            // Inline simple types collapse to their restriction base
            if let Some(restriction) = simple.find_child("restriction") {
                type_ref = restriction.get_attribute("base").map(String::from);
            }
        }
    }

    Ok(ElementDecl {
        name,
        type_ref,
        reference,
        inline,
        occurs,
        nillable,
    })
}

fn read_attribute(elem: &Element, owner: &str) -> Result<AttributeDecl> {
    let name = elem
        .get_attribute("name")
        .ok_or_else(|| Error::Schema(format!("attribute without a name in '{}'", owner)))?;
    validate_ncname(name)?;

    Ok(AttributeDecl {
        name: name.to_string(),
        type_ref: elem.get_attribute("type").map(String::from),
        use_: AttributeUse::parse(elem.get_attribute("use")),
    })
}

fn read_service(definitions: &Element) -> Result<ServiceDecl> {
    // message name -> wrapper element reference (doc/literal style)
    let mut messages: HashMap<String, Option<String>> = HashMap::new();
    for message in definitions.find_children("message") {
        if let Some(name) = message.get_attribute("name") {
            let element = message
                .find_children("part")
                .iter()
                .find_map(|part| part.get_attribute("element"))
                .map(String::from);
            messages.insert(name.to_string(), element);
        }
    }

    // soapAction and policy hints per operation, from the bindings
    let mut actions: HashMap<String, Option<String>> = HashMap::new();
    let mut operation_hints: HashMap<String, Vec<String>> = HashMap::new();
    let mut binding_hints: Vec<String> = Vec::new();
    for binding in definitions.find_children("binding") {
        binding_hints.extend(collect_policy_hints(binding));
        for operation in binding.find_children("operation") {
            let Some(name) = operation.get_attribute("name") else {
                continue;
            };
            let action = operation
                .find_children("operation")
                .iter()
                .find_map(|soap_op| soap_op.get_attribute("soapAction"))
                .filter(|a| !a.is_empty())
                .map(String::from);
            actions.insert(name.to_string(), action);
            operation_hints.insert(name.to_string(), collect_policy_hints(operation));
        }
    }

    let mut operations = Vec::new();
    for port_type in definitions.find_children("portType") {
        for operation in port_type.find_children("operation") {
            let Some(name) = operation.get_attribute("name") else {
                continue;
            };

            let wrapper = |direction: &str| -> Option<String> {
                let io = operation.find_child(direction)?;
                let message = io.get_attribute("message")?;
                let local = split_qname(message).1;
                messages.get(local).cloned().flatten()
            };

            let mut policy_hints = binding_hints.clone();
            policy_hints.extend(operation_hints.get(name).cloned().unwrap_or_default());

            operations.push(OperationDecl {
                name: name.to_string(),
                input_element: wrapper("input"),
                output_element: wrapper("output"),
                soap_action: actions.get(name).cloned().flatten(),
                policy_hints,
            });
        }
    }

    let name = definitions
        .find_child("service")
        .and_then(|s| s.get_attribute("name"))
        .or_else(|| definitions.get_attribute("name"))
        .unwrap_or("Service")
        .to_string();

    Ok(ServiceDecl { name, operations })
}

/// Collect WS-Policy references attached below an element, as opaque strings
fn collect_policy_hints(elem: &Element) -> Vec<String> {
    let mut hints = Vec::new();
    for child in &elem.children {
        if child.local_name() == "PolicyReference" {
            if let Some(uri) = child.get_attribute("URI") {
                hints.push(uri.to_string());
            }
        }
    }
    hints
}
