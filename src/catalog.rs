//! Compiled catalog
//!
//! The catalog is the sole output of schema compilation and the only channel
//! through which downstream emitters (client stubs, OpenAPI components,
//! gateway routes) observe compiled results. It is built once per
//! compilation, frozen by [`Catalog::finish`], and thereafter immutable.
//!
//! Declarations are indexed by canonical name and reference each other only
//! by name, never by embedding, so self-referential and mutually-referential
//! type graphs stay finite.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::CompilerOptions;

/// Reserved element name for simple/mixed text content.
/// Always ordered last among the elements of its owner.
pub const TEXT_CONTENT_NAME: &str = "$value";

/// Resolved scalar representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    /// Character data, including everything mapped through a text strategy
    Text,
    /// Numeric value safely representable as a native number
    Number,
    /// Boolean value
    Boolean,
    /// Binary or otherwise uninterpreted value
    Opaque,
}

/// Resolved representation of a declared type reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeRef {
    /// A built-in scalar
    Scalar(ScalarKind),
    /// Reference to a [`ScalarAlias`] by canonical name
    Alias(String),
    /// Reference to a [`StructuralType`] by canonical name
    Structural(String),
    /// Reference retained as unknown under the lenient policy;
    /// carries the reference as written in the source
    Unresolved(String),
}

impl TypeRef {
    /// The canonical name this reference points at, if it is a named one
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Alias(name) | TypeRef::Structural(name) => Some(name),
            TypeRef::Scalar(_) | TypeRef::Unresolved(_) => None,
        }
    }

    /// Whether this reference was retained as unknown
    pub fn is_unresolved(&self) -> bool {
        matches!(self, TypeRef::Unresolved(_))
    }
}

/// Named simple type: a scalar representation, optionally restricted to an
/// enumerated value set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarAlias {
    /// Canonical name
    pub name: String,
    /// Resolved scalar representation
    pub kind: ScalarKind,
    /// Ordered literal value set when the source declares an enumeration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    /// Free-form documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

/// Attribute requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    /// use="required"
    Required,
    /// use="optional"
    Optional,
    /// use="prohibited"
    Prohibited,
}

impl Requirement {
    fn sort_rank(self) -> u8 {
        match self {
            Requirement::Required => 0,
            Requirement::Optional => 1,
            Requirement::Prohibited => 2,
        }
    }
}

/// Compiled XML attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name
    pub name: String,
    /// Declared source type, as written
    pub source_type: String,
    /// Requirement
    pub requirement: Requirement,
    /// Resolved scalar representation
    pub kind: ScalarKind,
}

/// Marks which choice group and branch a flattened element came from.
/// Present only under the union choice policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceBranch {
    /// Choice group index within the owning type
    pub group: u32,
    /// Branch index within the group, in declaration order
    pub branch: u32,
}

/// Compiled child element after content-model flattening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element name ([`TEXT_CONTENT_NAME`] for the text-content slot)
    pub name: String,
    /// Declared source type, as written
    pub source_type: String,
    /// Resolved representation
    pub repr: TypeRef,
    /// Effective minimum occurrence, group bounds folded in
    pub min_occurs: u32,
    /// Effective maximum occurrence (None = unbounded)
    pub max_occurs: Option<u32>,
    /// nillable="true" on the declaration
    pub nillable: bool,
    /// Branch tag under the union choice policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<ChoiceBranch>,
}

impl Element {
    /// Cardinality law: minOccurs = 0 means optional
    pub fn is_optional(&self) -> bool {
        self.min_occurs == 0
    }

    /// Cardinality law: maxOccurs > 1 or unbounded means array-valued
    pub fn is_array(&self) -> bool {
        match self.max_occurs {
            Some(max) => max > 1,
            None => true,
        }
    }

    /// Whether this is the reserved text-content slot
    pub fn is_text_content(&self) -> bool {
        self.name == TEXT_CONTENT_NAME
    }
}

/// Named complex type with flattened attribute and element lists.
///
/// When `base` is set, `attributes` and `elements` hold only the local
/// increment; the full inherited view is derived on demand via
/// [`Catalog::full_attributes`] and [`Catalog::full_elements`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralType {
    /// Canonical name
    pub name: String,
    /// Base type canonical name (complexContent extension)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Local attributes, flattened
    pub attributes: Vec<Attribute>,
    /// Local elements, flattened and ordered
    pub elements: Vec<Element>,
    /// Free-form documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl StructuralType {
    /// A pure array wrapper: no base, zero attributes, and exactly one
    /// element with unbounded maximum occurrence. The common SOAP idiom for
    /// representing lists.
    pub fn is_array_wrapper(&self) -> bool {
        self.base.is_none()
            && self.attributes.is_empty()
            && self.elements.len() == 1
            && self.elements[0].max_occurs.is_none()
    }

    /// Simple-content shape: exactly one element, the text-content slot
    pub fn is_simple_content(&self) -> bool {
        self.elements.len() == 1 && self.elements[0].is_text_content()
    }
}

/// One RPC-style entry point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation name
    pub name: String,
    /// Canonical type name of the input wrapper, when resolvable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Canonical type name of the output wrapper, when resolvable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Transport action identifier (soapAction)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soap_action: Option<String>,
    /// Security-policy hints, surfaced for documentation, never enforced
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub security_hints: Vec<String>,
}

/// Lookup tables for generated runtime code, which operates on erased data
/// at the wire boundary and cannot re-derive these facts from static
/// declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarshallingMetadata {
    /// Per structural type: which property names serialize as XML attributes
    pub attributes: IndexMap<String, Vec<String>>,
    /// Per structural type: child-element property name to the canonical
    /// type name governing recursion into that property's value
    pub children: IndexMap<String, IndexMap<String, String>>,
}

/// Diagnostic recorded under the lenient reference policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Human-readable message
    pub message: String,
    /// Namespace of the offending reference, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Referencing type or operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// The compiled catalog: root aggregate and sole compilation output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Declared service name, or the configured display-name override
    pub service_name: String,
    /// Source document identifier (provenance)
    pub source: String,
    /// The resolved compiler configuration
    pub options: CompilerOptions,
    /// Scalar aliases, canonically ordered
    pub aliases: Vec<ScalarAlias>,
    /// Structural types, canonically ordered
    pub types: Vec<StructuralType>,
    /// Operations, canonically ordered
    pub operations: Vec<Operation>,
    /// Marshalling lookup tables
    pub metadata: MarshallingMetadata,
    /// Diagnostics recorded during compilation
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl Catalog {
    /// Look up a scalar alias by canonical name
    pub fn alias(&self, name: &str) -> Option<&ScalarAlias> {
        self.aliases.iter().find(|a| a.name == name)
    }

    /// Look up a structural type by canonical name
    pub fn structural(&self, name: &str) -> Option<&StructuralType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Look up an operation by name
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|o| o.name == name)
    }

    /// Check whether a canonical name is declared in this catalog
    pub fn contains(&self, name: &str) -> bool {
        self.alias(name).is_some() || self.structural(name).is_some()
    }

    /// Resolve a structural type's base chain, root-most first.
    /// Stops on unknown bases and on cycles.
    pub fn base_chain<'a>(&'a self, name: &str) -> Vec<&'a StructuralType> {
        let mut chain = Vec::new();
        let mut current = self.structural(name);
        while let Some(ty) = current {
            if chain.iter().any(|seen: &&StructuralType| seen.name == ty.name) {
                break;
            }
            chain.push(ty);
            current = ty.base.as_deref().and_then(|base| self.structural(base));
        }
        chain.reverse();
        chain
    }

    /// Full attribute view of a type: inherited before local
    pub fn full_attributes(&self, name: &str) -> Vec<Attribute> {
        self.base_chain(name)
            .iter()
            .flat_map(|ty| ty.attributes.iter().cloned())
            .collect()
    }

    /// Full element view of a type: inherited before local, with the
    /// text-content slot kept last when present
    pub fn full_elements(&self, name: &str) -> Vec<Element> {
        let mut elements: Vec<Element> = self
            .base_chain(name)
            .iter()
            .flat_map(|ty| ty.elements.iter().cloned())
            .collect();
        let text_last = elements.iter().position(Element::is_text_content);
        if let Some(index) = text_last {
            let text = elements.remove(index);
            elements.push(text);
        }
        elements
    }

    /// Apply the deterministic secondary sort that keeps generated artifacts
    /// diff-friendly: aliases, types and operations alphabetical by name;
    /// attributes required-before-optional, alphabetical within each
    /// requirement; the text-content slot forced last among its owner's
    /// elements. Registration order never leaks into the serialized catalog.
    pub fn finish(mut self) -> Self {
        self.aliases.sort_by(|a, b| a.name.cmp(&b.name));
        self.types.sort_by(|a, b| a.name.cmp(&b.name));
        self.operations.sort_by(|a, b| a.name.cmp(&b.name));

        for ty in &mut self.types {
            ty.attributes.sort_by(|a, b| {
                a.requirement
                    .sort_rank()
                    .cmp(&b.requirement.sort_rank())
                    .then_with(|| a.name.cmp(&b.name))
            });
            if let Some(index) = ty.elements.iter().position(Element::is_text_content) {
                if index + 1 != ty.elements.len() {
                    let text = ty.elements.remove(index);
                    ty.elements.push(text);
                }
            }
        }

        self
    }

    /// Serialize the catalog losslessly to JSON for introspection and for
    /// cross-process handoff between compilation and emission
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a catalog previously written by [`Catalog::to_json`]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str, min: u32, max: Option<u32>) -> Element {
        Element {
            name: name.to_string(),
            source_type: "xs:string".to_string(),
            repr: TypeRef::Scalar(ScalarKind::Text),
            min_occurs: min,
            max_occurs: max,
            nillable: false,
            choice: None,
        }
    }

    fn attribute(name: &str, requirement: Requirement) -> Attribute {
        Attribute {
            name: name.to_string(),
            source_type: "xs:string".to_string(),
            requirement,
            kind: ScalarKind::Text,
        }
    }

    fn empty_catalog() -> Catalog {
        Catalog {
            service_name: "Test".to_string(),
            source: "test.wsdl".to_string(),
            options: CompilerOptions::default(),
            aliases: Vec::new(),
            types: Vec::new(),
            operations: Vec::new(),
            metadata: MarshallingMetadata::default(),
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_cardinality_law() {
        assert!(element("a", 0, Some(1)).is_optional());
        assert!(!element("a", 1, Some(1)).is_optional());
        assert!(element("a", 0, None).is_array());
        assert!(element("a", 1, Some(5)).is_array());
        assert!(!element("a", 1, Some(1)).is_array());
    }

    #[test]
    fn test_array_wrapper_detection() {
        let wrapper = StructuralType {
            name: "ArrayOfForecast".to_string(),
            base: None,
            attributes: Vec::new(),
            elements: vec![element("Forecast", 0, None)],
            documentation: None,
        };
        assert!(wrapper.is_array_wrapper());

        let mut with_attr = wrapper.clone();
        with_attr.attributes.push(attribute("id", Requirement::Optional));
        assert!(!with_attr.is_array_wrapper());

        let mut bounded = wrapper.clone();
        bounded.elements[0].max_occurs = Some(10);
        assert!(!bounded.is_array_wrapper());
    }

    #[test]
    fn test_full_view_inherited_before_local() {
        let mut catalog = empty_catalog();
        catalog.types.push(StructuralType {
            name: "Base".to_string(),
            base: None,
            attributes: vec![attribute("baseAttr", Requirement::Required)],
            elements: vec![element("BaseField", 1, Some(1))],
            documentation: None,
        });
        catalog.types.push(StructuralType {
            name: "Derived".to_string(),
            base: Some("Base".to_string()),
            attributes: vec![attribute("localAttr", Requirement::Optional)],
            elements: vec![element("LocalField", 0, Some(1))],
            documentation: None,
        });

        let attrs = catalog.full_attributes("Derived");
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].name, "baseAttr");
        assert_eq!(attrs[1].name, "localAttr");

        let elements = catalog.full_elements("Derived");
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].name, "BaseField");
        assert_eq!(elements[1].name, "LocalField");
    }

    #[test]
    fn test_full_view_survives_base_cycle() {
        let mut catalog = empty_catalog();
        catalog.types.push(StructuralType {
            name: "A".to_string(),
            base: Some("B".to_string()),
            attributes: Vec::new(),
            elements: vec![element("FromA", 1, Some(1))],
            documentation: None,
        });
        catalog.types.push(StructuralType {
            name: "B".to_string(),
            base: Some("A".to_string()),
            attributes: Vec::new(),
            elements: vec![element("FromB", 1, Some(1))],
            documentation: None,
        });

        // Must terminate; each type appears once
        let elements = catalog.full_elements("A");
        assert_eq!(elements.len(), 2);
    }

    #[test]
    fn test_finish_sorts_deterministically() {
        let mut catalog = empty_catalog();
        catalog.types.push(StructuralType {
            name: "Zebra".to_string(),
            base: None,
            attributes: vec![
                attribute("optional2", Requirement::Optional),
                attribute("optional1", Requirement::Optional),
                attribute("required2", Requirement::Required),
                attribute("required1", Requirement::Required),
            ],
            elements: vec![element(TEXT_CONTENT_NAME, 0, Some(1)), element("child", 1, Some(1))],
            documentation: None,
        });
        catalog.types.push(StructuralType {
            name: "Alpha".to_string(),
            base: None,
            attributes: Vec::new(),
            elements: Vec::new(),
            documentation: None,
        });

        let catalog = catalog.finish();
        assert_eq!(catalog.types[0].name, "Alpha");
        assert_eq!(catalog.types[1].name, "Zebra");

        // Required before optional, alphabetical within each bucket
        let zebra = &catalog.types[1];
        let order: Vec<_> = zebra.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(order, ["required1", "required2", "optional1", "optional2"]);
        assert_eq!(zebra.elements.last().unwrap().name, TEXT_CONTENT_NAME);
    }

    #[test]
    fn test_json_round_trip() {
        let mut catalog = empty_catalog();
        catalog.aliases.push(ScalarAlias {
            name: "TemperatureUnit".to_string(),
            kind: ScalarKind::Text,
            values: Some(vec!["celsius".to_string(), "fahrenheit".to_string()]),
            documentation: None,
        });
        catalog.metadata.attributes.insert("Forecast".to_string(), vec!["id".to_string()]);

        let json = catalog.to_json().unwrap();
        let back = Catalog::from_json(&json).unwrap();
        assert_eq!(back, catalog);
    }
}
