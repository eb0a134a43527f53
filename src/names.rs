//! XML name validation
//!
//! Lexical checks for NCNames and QNames, applied when accepting
//! declarations from source documents.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static NCNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}][A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\-\.0-9]*$")
        .unwrap()
});

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Check if a string is a valid QName (qualified name)
pub fn is_valid_qname(name: &str) -> bool {
    if let Some((prefix, local)) = name.split_once(':') {
        is_valid_ncname(prefix) && is_valid_ncname(local)
    } else {
        is_valid_ncname(name)
    }
}

/// Validate an NCName and return an error if invalid
pub fn validate_ncname(name: &str) -> Result<()> {
    if is_valid_ncname(name) {
        Ok(())
    } else {
        Err(Error::Name(format!("invalid NCName: '{}'", name)))
    }
}

/// Split a QName into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some((prefix, local)) = qname.split_once(':') {
        (Some(prefix), local)
    } else {
        (None, qname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ncname() {
        assert!(is_valid_ncname("Forecast"));
        assert!(is_valid_ncname("_forecast"));
        assert!(is_valid_ncname("forecast-1.2"));

        assert!(!is_valid_ncname(""));
        assert!(!is_valid_ncname("123forecast"));
        assert!(!is_valid_ncname("tns:Forecast"));
        assert!(!is_valid_ncname("-forecast"));
    }

    #[test]
    fn test_is_valid_qname() {
        assert!(is_valid_qname("Forecast"));
        assert!(is_valid_qname("tns:Forecast"));
        assert!(is_valid_qname("xs:string"));

        assert!(!is_valid_qname(""));
        assert!(!is_valid_qname(":Forecast"));
        assert!(!is_valid_qname("tns:"));
    }

    #[test]
    fn test_validate_ncname() {
        assert!(validate_ncname("Forecast").is_ok());
        assert!(validate_ncname("123").is_err());
    }

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("Forecast"), (None, "Forecast"));
        assert_eq!(split_qname("tns:Forecast"), (Some("tns"), "Forecast"));
    }
}
