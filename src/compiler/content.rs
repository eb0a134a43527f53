//! Content model flattening
//!
//! Decomposes a complex type's particle tree (arbitrarily nested
//! sequence/choice/all groups, each with its own occurrence constraints)
//! into one flat, ordered list of leaf elements. An enclosing group's
//! bounds are folded into each leaf's effective occurrence, so a leaf
//! nested inside an unbounded group becomes itself effectively unbounded.
//!
//! Choice groups follow the configured policy: under `AllOptional` every
//! branch member becomes optional with no encoded mutual-exclusivity;
//! under `Union` branch boundaries are preserved through branch tags so a
//! downstream consumer can rebuild a tagged representation.

use crate::catalog::{ChoiceBranch, Element, TypeRef, TEXT_CONTENT_NAME};
use crate::config::ChoicePolicy;
use crate::schema::{ElementDecl, GroupKind, Occurs, ParticleNode};

/// A flattened leaf element, before type-reference resolution
#[derive(Debug, Clone)]
pub struct PendingElement {
    /// The leaf's declaration
    pub decl: ElementDecl,
    /// Effective occurrence, group bounds folded in
    pub occurs: Occurs,
    /// Branch tag, present only under the union policy
    pub choice: Option<ChoiceBranch>,
}

/// Flatten a particle tree into its leaf elements, in document order
pub fn flatten(particle: &ParticleNode, policy: ChoicePolicy) -> Vec<PendingElement> {
    let mut out = Vec::new();
    let mut groups = 0u32;
    walk(particle, Occurs::once(), None, policy, &mut groups, &mut out);
    out
}

fn walk(
    node: &ParticleNode,
    outer: Occurs,
    choice: Option<ChoiceBranch>,
    policy: ChoicePolicy,
    groups: &mut u32,
    out: &mut Vec<PendingElement>,
) {
    match node {
        ParticleNode::Element(decl) => out.push(PendingElement {
            decl: decl.clone(),
            occurs: decl.occurs.fold(outer),
            choice,
        }),
        ParticleNode::Group {
            kind,
            occurs,
            children,
        } => {
            let folded = occurs.fold(outer);
            match kind {
                GroupKind::Sequence | GroupKind::All => {
                    for child in children {
                        walk(child, folded, choice, policy, groups, out);
                    }
                }
                GroupKind::Choice => match policy {
                    ChoicePolicy::AllOptional => {
                        let optional = Occurs::new(0, folded.max);
                        for child in children {
                            walk(child, optional, choice, policy, groups, out);
                        }
                    }
                    ChoicePolicy::Union => {
                        let group = *groups;
                        *groups += 1;
                        for (branch, child) in children.iter().enumerate() {
                            let tag = ChoiceBranch {
                                group,
                                branch: branch as u32,
                            };
                            walk(child, folded, Some(tag), policy, groups, out);
                        }
                    }
                },
            }
        }
    }
}

/// Build the reserved text-content slot carried by mixed and
/// simple-content types. Ordering to the end of the element list is
/// applied by the catalog's deterministic-ordering pass.
pub fn text_content_element(repr: TypeRef, source_type: &str, required: bool) -> Element {
    Element {
        name: TEXT_CONTENT_NAME.to_string(),
        source_type: source_type.to_string(),
        repr,
        min_occurs: if required { 1 } else { 0 },
        max_occurs: Some(1),
        nillable: false,
        choice: None,
    }
}
