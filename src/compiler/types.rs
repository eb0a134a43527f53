//! Type graph compilation
//!
//! Visits every named simple and complex type declaration exactly once and
//! registers it as a scalar alias or structural type keyed by canonical
//! name - never as an inline value, which is what keeps self-referential
//! and mutually-referential type graphs representable without unbounded
//! expansion. An anonymous complex type inlined on a top-level element is
//! registered under the element's canonical name; inlined deeper in a
//! content model it is registered under the owning type's name joined with
//! the element name, so unrelated types can both declare an inline child
//! of the same name.
//!
//! Registration is order-independent; the deterministic ordering of the
//! emitted catalog is applied afterwards by [`Catalog::finish`](crate::catalog::Catalog::finish).

use std::collections::{HashMap, HashSet};

use crate::catalog::{Attribute, Element, Requirement, ScalarAlias, ScalarKind, StructuralType, TypeRef};
use crate::names::split_qname;
use crate::namespaces::QName;
use crate::error::Result;
use crate::schema::{
    AttributeUse, ComplexTypeDecl, ContentDecl, ParticleNode, SchemaDocument, SchemaSet,
    SimpleTypeDecl,
};

use super::content::{self, PendingElement};
use super::inheritance;
use super::names::DeclKind;
use super::CatalogBuilder;

/// A registered top-level element: where operations find wrapper types
#[derive(Debug, Clone)]
pub(crate) struct ElementBinding {
    /// The element's declared type, as written
    pub type_ref: Option<String>,
    /// Canonical name of the registered inline type, if any
    pub inline_type: Option<String>,
    /// Index of the owning document in the schema set
    pub doc: usize,
}

/// Top-level element declarations keyed by qualified name
pub(crate) type ElementBindings = HashMap<QName, ElementBinding>;

/// Declarations awaiting compilation, captured during registration
#[derive(Debug, Default)]
pub(crate) struct PendingTypes {
    /// (canonical name, document index, declaration)
    pub simples: Vec<(String, usize, SimpleTypeDecl)>,
    /// (canonical name, document index, declaration)
    pub complexes: Vec<(String, usize, ComplexTypeDecl)>,
}

/// Registration pass: claim a canonical name for every declaration,
/// including anonymous types inlined on elements
pub(crate) fn register(
    builder: &mut CatalogBuilder,
    set: &SchemaSet,
) -> Result<(PendingTypes, ElementBindings)> {
    let mut pending = PendingTypes::default();
    let mut bindings = ElementBindings::new();

    for (doc_idx, doc) in set.documents.iter().enumerate() {
        let tns = doc.target_namespace.clone();

        for simple in &doc.simple_types {
            let canonical = builder
                .names
                .register(QName::new(tns.clone(), &simple.name), DeclKind::Alias)?;
            pending.simples.push((canonical, doc_idx, simple.clone()));
        }

        for complex in &doc.complex_types {
            let canonical = builder
                .names
                .register(QName::new(tns.clone(), &complex.name), DeclKind::Structural)?;
            register_nested(builder, &mut pending, complex, doc_idx, &tns, &canonical)?;
            pending.complexes.push((canonical, doc_idx, complex.clone()));
        }

        for element in &doc.elements {
            let qname = QName::new(tns.clone(), &element.name);
            let mut binding = ElementBinding {
                type_ref: element.type_ref.clone(),
                inline_type: None,
                doc: doc_idx,
            };

            if let Some(inline) = &element.inline {
                let canonical = builder.names.register(qname.clone(), DeclKind::Structural)?;
                let mut decl = (**inline).clone();
                decl.name = canonical.clone();
                register_nested(builder, &mut pending, &decl, doc_idx, &tns, &canonical)?;
                pending.complexes.push((canonical.clone(), doc_idx, decl));
                binding.inline_type = Some(canonical);
            }

            bindings.insert(qname, binding);
        }
    }

    Ok((pending, bindings))
}

fn register_nested(
    builder: &mut CatalogBuilder,
    pending: &mut PendingTypes,
    decl: &ComplexTypeDecl,
    doc_idx: usize,
    tns: &Option<String>,
    owner: &str,
) -> Result<()> {
    let particle = match &decl.content {
        ContentDecl::Particle(particle) => Some(particle),
        ContentDecl::ComplexExtension { particle, .. } => particle.as_ref(),
        _ => None,
    };
    if let Some(particle) = particle {
        register_particle(builder, pending, particle, doc_idx, tns, owner)?;
    }
    Ok(())
}

fn register_particle(
    builder: &mut CatalogBuilder,
    pending: &mut PendingTypes,
    node: &ParticleNode,
    doc_idx: usize,
    tns: &Option<String>,
    owner: &str,
) -> Result<()> {
    match node {
        ParticleNode::Group { children, .. } => {
            for child in children {
                register_particle(builder, pending, child, doc_idx, tns, owner)?;
            }
        }
        ParticleNode::Element(element) => {
            if let Some(inline) = &element.inline {
                // Qualified with the owning type so that unrelated types
                // can both inline a child of the same name
                let local = nested_inline_name(owner, &element.name);
                let canonical = builder
                    .names
                    .register(QName::new(tns.clone(), local), DeclKind::Structural)?;
                let mut inner = (**inline).clone();
                inner.name = canonical.clone();
                register_nested(builder, pending, &inner, doc_idx, tns, &canonical)?;
                pending.complexes.push((canonical, doc_idx, inner));
            }
        }
    }
    Ok(())
}

fn nested_inline_name(owner: &str, element: &str) -> String {
    format!("{}{}", owner, element)
}

/// Locate the top-level element a reference names.
///
/// The reference may be written with prefixes from a document other than the
/// one holding the registered element, such as the WSDL definitions scope,
/// so each document's context is tried in turn and an unambiguous local-name
/// match serves as the fallback.
pub(crate) fn find_binding<'a>(
    set: &SchemaSet,
    bindings: &'a ElementBindings,
    raw: &str,
) -> Option<&'a ElementBinding> {
    for doc in &set.documents {
        if let Ok(qname) = doc
            .context
            .resolve_reference(raw, doc.target_namespace.as_deref())
        {
            if let Some(binding) = bindings.get(&qname) {
                return Some(binding);
            }
        }
    }

    let local = split_qname(raw).1;
    let mut matched = None;
    for (qname, binding) in bindings {
        if qname.local_name == local {
            if matched.is_some() {
                return None;
            }
            matched = Some(binding);
        }
    }
    matched
}

/// Resolve an element reference to the representation of the referenced
/// top-level element's type
fn resolve_element_ref(
    builder: &mut CatalogBuilder,
    set: &SchemaSet,
    bindings: &ElementBindings,
    raw: &str,
    doc: &SchemaDocument,
    owner: &str,
) -> Result<TypeRef> {
    let Some(binding) = find_binding(set, bindings, raw) else {
        return builder.record_unresolved(raw, None, owner, &doc.location);
    };

    if let Some(canonical) = &binding.inline_type {
        return Ok(TypeRef::Structural(canonical.clone()));
    }

    if let Some(type_ref) = &binding.type_ref {
        let target = &set.documents[binding.doc];
        return builder.resolve_type_ref(type_ref, target, owner);
    }

    // Referenced element carries neither a type nor inline content
    Ok(TypeRef::Scalar(ScalarKind::Opaque))
}

/// Compile every pending simple type into a scalar alias, following
/// restriction base chains through the registry
pub(crate) fn compile_aliases(
    builder: &mut CatalogBuilder,
    set: &SchemaSet,
    pending: &PendingTypes,
) -> Result<()> {
    let by_name: HashMap<&str, usize> = pending
        .simples
        .iter()
        .enumerate()
        .map(|(index, (canonical, _, _))| (canonical.as_str(), index))
        .collect();

    for (canonical, _, decl) in &pending.simples {
        let mut visited = HashSet::new();
        let kind = alias_kind(builder, set, pending, &by_name, by_name[canonical.as_str()], &mut visited)?;

        let values = if decl.enumeration.is_empty() {
            None
        } else {
            Some(decl.enumeration.clone())
        };

        builder.aliases.insert(
            canonical.clone(),
            ScalarAlias {
                name: canonical.clone(),
                kind,
                values,
                documentation: decl.documentation.clone(),
            },
        );
    }

    Ok(())
}

fn alias_kind(
    builder: &mut CatalogBuilder,
    set: &SchemaSet,
    pending: &PendingTypes,
    by_name: &HashMap<&str, usize>,
    index: usize,
    visited: &mut HashSet<String>,
) -> Result<ScalarKind> {
    let (canonical, doc_idx, decl) = &pending.simples[index];
    if !visited.insert(canonical.clone()) {
        builder.diagnostic(
            format!("restriction base cycle through '{}'", canonical),
            None,
            Some(canonical),
        );
        return Ok(ScalarKind::Text);
    }

    let Some(raw) = &decl.base else {
        return Ok(ScalarKind::Text);
    };

    let doc = &set.documents[*doc_idx];
    match builder.resolve_type_ref(raw, doc, canonical)? {
        TypeRef::Scalar(kind) => Ok(kind),
        TypeRef::Alias(base) => match by_name.get(base.as_str()) {
            Some(&base_index) => alias_kind(builder, set, pending, by_name, base_index, visited),
            None => Ok(ScalarKind::Text),
        },
        TypeRef::Structural(base) => {
            builder.diagnostic(
                format!("restriction base '{}' is not a simple type", base),
                None,
                Some(canonical),
            );
            Ok(ScalarKind::Text)
        }
        TypeRef::Unresolved(_) => Ok(ScalarKind::Text),
    }
}

/// Compile every pending complex type into a structural type
pub(crate) fn compile_structural(
    builder: &mut CatalogBuilder,
    set: &SchemaSet,
    pending: &PendingTypes,
    bindings: &ElementBindings,
) -> Result<()> {
    for (canonical, doc_idx, decl) in &pending.complexes {
        let doc = &set.documents[*doc_idx];
        let compiled = compile_type(builder, set, canonical, decl, doc, bindings)?;
        builder.types.insert(canonical.clone(), compiled);
    }
    Ok(())
}

fn compile_type(
    builder: &mut CatalogBuilder,
    set: &SchemaSet,
    canonical: &str,
    decl: &ComplexTypeDecl,
    doc: &SchemaDocument,
    bindings: &ElementBindings,
) -> Result<StructuralType> {
    let mut attributes = Vec::new();
    for attr in &decl.attributes {
        let kind = builder.resolve_attribute_kind(attr.type_ref.as_deref(), doc, canonical)?;
        attributes.push(Attribute {
            name: attr.name.clone(),
            source_type: attr
                .type_ref
                .clone()
                .unwrap_or_else(|| "xs:anySimpleType".to_string()),
            requirement: match attr.use_ {
                AttributeUse::Required => Requirement::Required,
                AttributeUse::Optional => Requirement::Optional,
                AttributeUse::Prohibited => Requirement::Prohibited,
            },
            kind,
        });
    }

    let mut base = None;
    let mut elements = Vec::new();
    let mut simple_content = false;

    match &decl.content {
        ContentDecl::Empty => {}
        ContentDecl::Particle(particle) => {
            elements = compile_elements(builder, set, particle, doc, canonical, bindings)?;
        }
        ContentDecl::ComplexExtension {
            base: raw,
            particle,
        } => {
            match builder.resolve_type_ref(raw, doc, canonical)? {
                TypeRef::Structural(name) => base = Some(name),
                // Diagnostic already recorded; the local increment still
                // compiles so the catalog stays complete
                TypeRef::Unresolved(_) => {}
                _ => {
                    builder.diagnostic(
                        format!("complexContent base '{}' is not a complex type", raw),
                        None,
                        Some(canonical),
                    );
                }
            }
            if let Some(particle) = particle {
                elements = compile_elements(builder, set, particle, doc, canonical, bindings)?;
            }
        }
        ContentDecl::SimpleExtension { base: raw } => {
            simple_content = true;
            elements.push(inheritance::simple_content_element(
                builder, raw, doc, canonical,
            )?);
        }
    }

    if decl.mixed && !simple_content {
        elements.push(content::text_content_element(
            TypeRef::Scalar(ScalarKind::Text),
            "xs:string",
            false,
        ));
    }

    Ok(StructuralType {
        name: canonical.to_string(),
        base,
        attributes,
        elements,
        documentation: decl.documentation.clone(),
    })
}

fn compile_elements(
    builder: &mut CatalogBuilder,
    set: &SchemaSet,
    particle: &ParticleNode,
    doc: &SchemaDocument,
    owner: &str,
    bindings: &ElementBindings,
) -> Result<Vec<Element>> {
    let mut out = Vec::new();
    for pending in content::flatten(particle, builder.options.choice_policy) {
        out.push(compile_element(builder, set, pending, doc, owner, bindings)?);
    }
    Ok(out)
}

fn compile_element(
    builder: &mut CatalogBuilder,
    set: &SchemaSet,
    pending: PendingElement,
    doc: &SchemaDocument,
    owner: &str,
    bindings: &ElementBindings,
) -> Result<Element> {
    let decl = pending.decl;

    let (repr, source_type) = if let Some(raw) = &decl.reference {
        let repr = resolve_element_ref(builder, set, bindings, raw, doc, owner)?;
        (repr, raw.clone())
    } else if decl.inline.is_some() {
        // Registered under the owner-qualified canonical name
        let local = nested_inline_name(owner, &decl.name);
        let qname = QName::new(doc.target_namespace.clone(), local);
        match builder.names.lookup(&qname) {
            Some((canonical, _)) => {
                let canonical = canonical.to_string();
                (TypeRef::Structural(canonical.clone()), canonical)
            }
            None => (TypeRef::Unresolved(decl.name.clone()), decl.name.clone()),
        }
    } else if let Some(raw) = &decl.type_ref {
        (builder.resolve_type_ref(raw, doc, owner)?, raw.clone())
    } else {
        // No type and no inline content means anyType
        (TypeRef::Scalar(ScalarKind::Opaque), "xs:anyType".to_string())
    };

    let mut min_occurs = pending.occurs.min;
    if builder.options.nillable_as_optional && decl.nillable {
        min_occurs = 0;
    }

    Ok(Element {
        name: decl.name,
        source_type,
        repr,
        min_occurs,
        max_occurs: pending.occurs.max,
        nillable: decl.nillable,
        choice: pending.choice,
    })
}

#[cfg(test)]
mod tests {
    use crate::catalog::{ScalarKind, TypeRef};
    use crate::compiler::compile;
    use crate::config::{CompilerOptions, ReferencePolicy};
    use crate::error::Error;
    use crate::schema::SchemaSet;

    fn compile_xsd(xml: &str) -> crate::catalog::Catalog {
        let set = SchemaSet::from_schema("test.xsd", xml).unwrap();
        compile(&set, CompilerOptions::default()).unwrap()
    }

    #[test]
    fn test_self_referential_type_compiles() {
        let catalog = compile_xsd(
            r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:tns="http://example.com/tree"
           targetNamespace="http://example.com/tree">
  <xs:complexType name="Node">
    <xs:sequence>
      <xs:element name="Label" type="xs:string"/>
      <xs:element name="Child" type="tns:Node" minOccurs="0" maxOccurs="unbounded"/>
    </xs:sequence>
  </xs:complexType>
</xs:schema>"#,
        );

        let node = catalog.structural("Node").unwrap();
        assert_eq!(node.elements.len(), 2);
        assert_eq!(
            node.elements[1].repr,
            TypeRef::Structural("Node".to_string())
        );
        assert!(catalog.diagnostics.is_empty());
    }

    #[test]
    fn test_mutually_referential_types_compile() {
        let catalog = compile_xsd(
            r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:tns="http://example.com/pair"
           targetNamespace="http://example.com/pair">
  <xs:complexType name="Ping">
    <xs:sequence><xs:element name="Other" type="tns:Pong" minOccurs="0"/></xs:sequence>
  </xs:complexType>
  <xs:complexType name="Pong">
    <xs:sequence><xs:element name="Other" type="tns:Ping" minOccurs="0"/></xs:sequence>
  </xs:complexType>
</xs:schema>"#,
        );

        assert_eq!(
            catalog.structural("Ping").unwrap().elements[0].repr,
            TypeRef::Structural("Pong".to_string())
        );
        assert_eq!(
            catalog.structural("Pong").unwrap().elements[0].repr,
            TypeRef::Structural("Ping".to_string())
        );
    }

    #[test]
    fn test_inline_type_registered_under_element_name() {
        let catalog = compile_xsd(
            r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           targetNamespace="http://example.com/weather">
  <xs:element name="GetForecast">
    <xs:complexType>
      <xs:sequence><xs:element name="ZIP" type="xs:string"/></xs:sequence>
    </xs:complexType>
  </xs:element>
</xs:schema>"#,
        );

        let wrapper = catalog.structural("GetForecast").unwrap();
        assert_eq!(wrapper.elements.len(), 1);
        assert_eq!(wrapper.elements[0].name, "ZIP");
    }

    #[test]
    fn test_nested_inline_types_with_same_element_name() {
        let catalog = compile_xsd(
            r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           targetNamespace="http://example.com/shop">
  <xs:complexType name="Order">
    <xs:sequence>
      <xs:element name="Item" maxOccurs="unbounded">
        <xs:complexType>
          <xs:sequence><xs:element name="SKU" type="xs:string"/></xs:sequence>
        </xs:complexType>
      </xs:element>
    </xs:sequence>
  </xs:complexType>
  <xs:complexType name="Cart">
    <xs:sequence>
      <xs:element name="Item" maxOccurs="unbounded">
        <xs:complexType>
          <xs:sequence><xs:element name="Quantity" type="xs:int"/></xs:sequence>
        </xs:complexType>
      </xs:element>
    </xs:sequence>
  </xs:complexType>
</xs:schema>"#,
        );

        // Each inline child gets its own owner-qualified type
        assert!(catalog.structural("OrderItem").is_some());
        assert!(catalog.structural("CartItem").is_some());

        let order = catalog.structural("Order").unwrap();
        assert_eq!(order.elements[0].name, "Item");
        assert_eq!(
            order.elements[0].repr,
            TypeRef::Structural("OrderItem".to_string())
        );
        let cart = catalog.structural("Cart").unwrap();
        assert_eq!(
            cart.elements[0].repr,
            TypeRef::Structural("CartItem".to_string())
        );
        assert!(catalog.diagnostics.is_empty());
    }

    #[test]
    fn test_element_reference_resolves_through_bindings() {
        let catalog = compile_xsd(
            r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:tns="http://example.com/weather"
           targetNamespace="http://example.com/weather">
  <xs:complexType name="ForecastType">
    <xs:sequence><xs:element name="City" type="xs:string"/></xs:sequence>
  </xs:complexType>
  <xs:element name="Forecast" type="tns:ForecastType"/>
  <xs:complexType name="Report">
    <xs:sequence>
      <xs:element ref="tns:Forecast" maxOccurs="unbounded"/>
    </xs:sequence>
  </xs:complexType>
</xs:schema>"#,
        );

        let report = catalog.structural("Report").unwrap();
        let member = &report.elements[0];
        // The member carries the referenced element's local name and routes
        // to the type backing the top-level element
        assert_eq!(member.name, "Forecast");
        assert_eq!(member.repr, TypeRef::Structural("ForecastType".to_string()));
        assert_eq!(member.source_type, "tns:Forecast");
        assert_eq!(member.max_occurs, None);
        assert!(catalog.diagnostics.is_empty());
    }

    #[test]
    fn test_element_reference_to_inline_wrapper() {
        let catalog = compile_xsd(
            r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:tns="http://example.com/weather"
           targetNamespace="http://example.com/weather">
  <xs:element name="Alert">
    <xs:complexType>
      <xs:sequence><xs:element name="Severity" type="xs:string"/></xs:sequence>
    </xs:complexType>
  </xs:element>
  <xs:complexType name="Bulletin">
    <xs:sequence><xs:element ref="tns:Alert" minOccurs="0"/></xs:sequence>
  </xs:complexType>
</xs:schema>"#,
        );

        let bulletin = catalog.structural("Bulletin").unwrap();
        assert_eq!(
            bulletin.elements[0].repr,
            TypeRef::Structural("Alert".to_string())
        );
        assert!(catalog.diagnostics.is_empty());
    }

    #[test]
    fn test_dangling_element_reference_lenient() {
        let catalog = compile_xsd(
            r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:tns="http://example.com/weather"
           targetNamespace="http://example.com/weather">
  <xs:complexType name="Report">
    <xs:sequence><xs:element ref="tns:Missing"/></xs:sequence>
  </xs:complexType>
</xs:schema>"#,
        );

        let report = catalog.structural("Report").unwrap();
        assert_eq!(
            report.elements[0].repr,
            TypeRef::Unresolved("tns:Missing".to_string())
        );
        assert!(catalog
            .diagnostics
            .iter()
            .any(|d| d.message.contains("tns:Missing")));
    }

    #[test]
    fn test_enumeration_alias() {
        let catalog = compile_xsd(
            r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           targetNamespace="http://example.com/weather">
  <xs:simpleType name="Sky">
    <xs:restriction base="xs:string">
      <xs:enumeration value="clear"/>
      <xs:enumeration value="cloudy"/>
      <xs:enumeration value="rain"/>
    </xs:restriction>
  </xs:simpleType>
</xs:schema>"#,
        );

        let sky = catalog.alias("Sky").unwrap();
        assert_eq!(sky.kind, ScalarKind::Text);
        assert_eq!(
            sky.values.as_deref().unwrap(),
            ["clear", "cloudy", "rain"]
        );
    }

    #[test]
    fn test_alias_chain_resolves_through_registry() {
        let catalog = compile_xsd(
            r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:tns="http://example.com/w"
           targetNamespace="http://example.com/w">
  <xs:simpleType name="Flag">
    <xs:restriction base="xs:boolean"/>
  </xs:simpleType>
  <xs:simpleType name="NarrowFlag">
    <xs:restriction base="tns:Flag"/>
  </xs:simpleType>
</xs:schema>"#,
        );

        assert_eq!(catalog.alias("Flag").unwrap().kind, ScalarKind::Boolean);
        assert_eq!(catalog.alias("NarrowFlag").unwrap().kind, ScalarKind::Boolean);
    }

    #[test]
    fn test_unresolved_reference_lenient() {
        let xml = r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:tns="http://example.com/w"
           targetNamespace="http://example.com/w">
  <xs:complexType name="Broken">
    <xs:sequence><xs:element name="X" type="tns:Missing"/></xs:sequence>
  </xs:complexType>
</xs:schema>"#;
        let set = SchemaSet::from_schema("test.xsd", xml).unwrap();
        let catalog = compile(&set, CompilerOptions::default()).unwrap();

        let broken = catalog.structural("Broken").unwrap();
        assert_eq!(
            broken.elements[0].repr,
            TypeRef::Unresolved("tns:Missing".to_string())
        );
        assert_eq!(catalog.diagnostics.len(), 1);
        assert!(catalog.diagnostics[0].message.contains("tns:Missing"));
    }

    #[test]
    fn test_unresolved_reference_fail_fast() {
        let xml = r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:tns="http://example.com/w"
           targetNamespace="http://example.com/w">
  <xs:complexType name="Broken">
    <xs:sequence><xs:element name="X" type="tns:Missing"/></xs:sequence>
  </xs:complexType>
</xs:schema>"#;
        let set = SchemaSet::from_schema("test.xsd", xml).unwrap();
        let options =
            CompilerOptions::default().with_reference_policy(ReferencePolicy::FailFast);

        let err = compile(&set, options).unwrap_err();
        match err {
            Error::UnresolvedReference(e) => {
                assert_eq!(e.reference, "tns:Missing");
                assert_eq!(e.context.as_deref(), Some("Broken"));
            }
            other => panic!("expected UnresolvedReference, got {:?}", other),
        }
    }

    #[test]
    fn test_name_collision_is_fatal() {
        let a = r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           targetNamespace="http://example.com/a">
  <xs:complexType name="Forecast"><xs:sequence/></xs:complexType>
</xs:schema>"#;
        let b = r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           targetNamespace="http://example.com/b">
  <xs:complexType name="Forecast"><xs:sequence/></xs:complexType>
</xs:schema>"#;

        let mut set = SchemaSet::from_schema("a.xsd", a).unwrap();
        set.add_schema("b.xsd", b).unwrap();

        let err = compile(&set, CompilerOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NameCollision(_)));
    }

    #[test]
    fn test_nillable_as_optional() {
        let xml = r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           targetNamespace="http://example.com/w">
  <xs:complexType name="Reading">
    <xs:sequence>
      <xs:element name="Value" type="xs:string" nillable="true"/>
    </xs:sequence>
  </xs:complexType>
</xs:schema>"#;
        let set = SchemaSet::from_schema("test.xsd", xml).unwrap();

        let plain = compile(&set, CompilerOptions::default()).unwrap();
        assert_eq!(plain.structural("Reading").unwrap().elements[0].min_occurs, 1);
        assert!(plain.structural("Reading").unwrap().elements[0].nillable);

        let optioned = compile(
            &set,
            CompilerOptions::default().with_nillable_as_optional(true),
        )
        .unwrap();
        assert_eq!(
            optioned.structural("Reading").unwrap().elements[0].min_occurs,
            0
        );
    }

    #[test]
    fn test_mixed_content_text_slot_last() {
        let catalog = compile_xsd(
            r#"
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           targetNamespace="http://example.com/w">
  <xs:complexType name="Remark" mixed="true">
    <xs:sequence><xs:element name="Ref" type="xs:string" minOccurs="0"/></xs:sequence>
    <xs:attribute name="lang" type="xs:string"/>
  </xs:complexType>
</xs:schema>"#,
        );

        let remark = catalog.structural("Remark").unwrap();
        let last = remark.elements.last().unwrap();
        assert!(last.is_text_content());
        assert_eq!(last.repr, TypeRef::Scalar(ScalarKind::Text));
    }
}
