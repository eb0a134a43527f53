//! Built-in scalar mapping
//!
//! Maps the XSD built-in types onto the catalog's scalar representations.
//! Four families are prone to precision or range loss when mapped naively
//! to native numbers - 64-bit integers, arbitrary-precision integers,
//! high-precision decimals and date/time values - so each is routed through
//! its own configurable strategy. The only strategy defined today is
//! "represent as text", which preserves the exact source lexical form.

use crate::catalog::ScalarKind;
use crate::config::{CompilerOptions, PrimitiveStrategy};

fn apply(strategy: PrimitiveStrategy) -> ScalarKind {
    match strategy {
        PrimitiveStrategy::Text => ScalarKind::Text,
    }
}

/// Map an XSD built-in type (by local name) to its scalar representation
pub fn builtin_kind(local_name: &str, options: &CompilerOptions) -> ScalarKind {
    match local_name {
        "boolean" => ScalarKind::Boolean,

        // Safely representable as native numbers
        "float" | "double" | "int" | "short" | "byte" | "unsignedInt" | "unsignedShort"
        | "unsignedByte" => ScalarKind::Number,

        // 64-bit integers overflow IEEE doubles
        "long" | "unsignedLong" => apply(options.long_strategy),

        // Arbitrary-precision integer family
        "integer" | "nonPositiveInteger" | "negativeInteger" | "nonNegativeInteger"
        | "positiveInteger" => apply(options.integer_strategy),

        // High-precision decimals
        "decimal" => apply(options.decimal_strategy),

        // Date/time values keep their lexical form
        "date" | "dateTime" | "time" | "duration" | "gYear" | "gYearMonth" | "gMonth"
        | "gMonthDay" | "gDay" => apply(options.datetime_strategy),

        // Binary and untyped content
        "base64Binary" | "hexBinary" | "anyType" | "anySimpleType" => ScalarKind::Opaque,

        // string, normalizedString, token, anyURI, QName, ID, IDREF, ... and
        // anything this subset does not single out
        _ => ScalarKind::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_kinds() {
        let options = CompilerOptions::default();
        assert_eq!(builtin_kind("string", &options), ScalarKind::Text);
        assert_eq!(builtin_kind("boolean", &options), ScalarKind::Boolean);
        assert_eq!(builtin_kind("int", &options), ScalarKind::Number);
        assert_eq!(builtin_kind("double", &options), ScalarKind::Number);
        assert_eq!(builtin_kind("base64Binary", &options), ScalarKind::Opaque);
        assert_eq!(builtin_kind("anyType", &options), ScalarKind::Opaque);
    }

    #[test]
    fn test_precision_sensitive_families_default_to_text() {
        let options = CompilerOptions::default();
        assert_eq!(builtin_kind("long", &options), ScalarKind::Text);
        assert_eq!(builtin_kind("unsignedLong", &options), ScalarKind::Text);
        assert_eq!(builtin_kind("integer", &options), ScalarKind::Text);
        assert_eq!(builtin_kind("positiveInteger", &options), ScalarKind::Text);
        assert_eq!(builtin_kind("decimal", &options), ScalarKind::Text);
        assert_eq!(builtin_kind("dateTime", &options), ScalarKind::Text);
        assert_eq!(builtin_kind("gYearMonth", &options), ScalarKind::Text);
    }

    #[test]
    fn test_unknown_builtin_falls_back_to_text() {
        let options = CompilerOptions::default();
        assert_eq!(builtin_kind("token", &options), ScalarKind::Text);
        assert_eq!(builtin_kind("NMTOKEN", &options), ScalarKind::Text);
    }
}
