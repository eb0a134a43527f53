//! Compiler configuration
//!
//! The recognized options of the input contract: primitive representation
//! strategies, choice-group policy, unresolved-reference policy, the
//! nillable toggle and the naming overrides surfaced to generated code.

use serde::{Deserialize, Serialize};

/// Representation strategy for a precision-sensitive primitive family.
///
/// Only `Text` is defined today: the value crosses the wire boundary as its
/// exact source lexical form. The enum is non-exhaustive so that native
/// strategies (64-bit integers, structured dates) can be added without
/// touching any other component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum PrimitiveStrategy {
    /// Represent as text, preserving exact source formatting
    #[default]
    Text,
}

/// How choice groups are flattened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChoicePolicy {
    /// Every branch member becomes an optional property; mutual exclusivity
    /// is not encoded and must be enforced by callers
    #[default]
    AllOptional,
    /// Branch boundaries are preserved via branch tags so that consumers can
    /// build a tagged representation
    Union,
}

/// How unresolved type and element references are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferencePolicy {
    /// Record the reference as unknown, emit a diagnostic, continue
    #[default]
    Lenient,
    /// Abort compilation with a contextual error
    FailFast,
}

/// Resolved compiler configuration, carried on the compiled catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerOptions {
    /// Strategy for xs:long / xs:unsignedLong
    pub long_strategy: PrimitiveStrategy,
    /// Strategy for the arbitrary-precision xs:integer family
    pub integer_strategy: PrimitiveStrategy,
    /// Strategy for xs:decimal
    pub decimal_strategy: PrimitiveStrategy,
    /// Strategy for date/time values (xs:date, xs:dateTime, xs:time, ...)
    pub datetime_strategy: PrimitiveStrategy,
    /// Choice-group flattening policy
    pub choice_policy: ChoicePolicy,
    /// Unresolved-reference policy
    pub reference_policy: ReferencePolicy,
    /// Treat nillable elements as optional
    pub nillable_as_optional: bool,
    /// Key under which generated runtime code stores XML attributes
    pub attribute_bag_key: String,
    /// Client/service display-name override
    pub display_name: Option<String>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            long_strategy: PrimitiveStrategy::Text,
            integer_strategy: PrimitiveStrategy::Text,
            decimal_strategy: PrimitiveStrategy::Text,
            datetime_strategy: PrimitiveStrategy::Text,
            choice_policy: ChoicePolicy::AllOptional,
            reference_policy: ReferencePolicy::Lenient,
            nillable_as_optional: false,
            attribute_bag_key: "$attributes".to_string(),
            display_name: None,
        }
    }
}

impl CompilerOptions {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the choice-group policy
    pub fn with_choice_policy(mut self, policy: ChoicePolicy) -> Self {
        self.choice_policy = policy;
        self
    }

    /// Set the unresolved-reference policy
    pub fn with_reference_policy(mut self, policy: ReferencePolicy) -> Self {
        self.reference_policy = policy;
        self
    }

    /// Treat nillable elements as optional
    pub fn with_nillable_as_optional(mut self, value: bool) -> Self {
        self.nillable_as_optional = value;
        self
    }

    /// Override the attribute-bag key used by generated runtime code
    pub fn with_attribute_bag_key(mut self, key: impl Into<String>) -> Self {
        self.attribute_bag_key = key.into();
        self
    }

    /// Override the client/service display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}
