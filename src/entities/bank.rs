// 🏦 Bank entities - headquarters and their branches
//
// A SWIFT code is the identity of both kinds of record.
// Whether a code names a headquarter is decided by its suffix alone;
// no flag is stored next to it.

use serde::{Deserialize, Serialize};

/// Last three characters of every headquarter SWIFT code
pub const HEADQUARTER_SUFFIX: &str = "XXX";

/// Length of the institution + country + location prefix shared by a
/// headquarter and its branches
pub const INSTITUTION_PREFIX_LEN: usize = 8;

/// Syntactic headquarter predicate: a code names a headquarter iff it ends in `XXX`
pub fn is_headquarter(swift_code: &str) -> bool {
    swift_code.ends_with(HEADQUARTER_SUFFIX)
}

/// Headquarter code a branch is expected to belong to (first 8 chars + `XXX`).
///
/// Returns `None` when the code is too short to carry an institution prefix.
pub fn headquarter_code_for(branch_code: &str) -> Option<String> {
    branch_code
        .get(..INSTITUTION_PREFIX_LEN)
        .map(|prefix| format!("{}{}", prefix, HEADQUARTER_SUFFIX))
}

// ============================================================================
// BANK (HEADQUARTER)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    /// SWIFT code, ends with `XXX`
    pub swift_code: String,
    pub name: String,
    pub address: Option<String>,
    /// ISO2 code of the owning country
    pub country_iso2: String,
}

impl Bank {
    pub fn new(
        swift_code: impl Into<String>,
        name: impl Into<String>,
        address: Option<String>,
        country_iso2: impl Into<String>,
    ) -> Self {
        Bank {
            swift_code: swift_code.into(),
            name: name.into(),
            address,
            country_iso2: country_iso2.into(),
        }
    }

    pub fn is_headquarter(&self) -> bool {
        true
    }
}

// ============================================================================
// BANK BRANCH
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankBranch {
    /// SWIFT code, never ends with `XXX`
    pub swift_code: String,
    pub name: String,
    pub address: Option<String>,
    pub country_iso2: String,
    /// SWIFT code of the owning headquarter
    pub headquarter_swift_code: String,
}

impl BankBranch {
    pub fn new(
        swift_code: impl Into<String>,
        name: impl Into<String>,
        address: Option<String>,
        country_iso2: impl Into<String>,
        headquarter_swift_code: impl Into<String>,
    ) -> Self {
        BankBranch {
            swift_code: swift_code.into(),
            name: name.into(),
            address,
            country_iso2: country_iso2.into(),
            headquarter_swift_code: headquarter_swift_code.into(),
        }
    }

    pub fn is_headquarter(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_headquarter_checks_suffix_only() {
        assert!(is_headquarter("ABCD1234XXX"));
        assert!(is_headquarter("XXX"));
        assert!(!is_headquarter("ABCD1234X22"));
        assert!(!is_headquarter("ABCD1234XX"));
    }

    #[test]
    fn test_headquarter_code_for_branch() {
        assert_eq!(
            headquarter_code_for("ABCD1234X22"),
            Some("ABCD1234XXX".to_string())
        );
        assert_eq!(headquarter_code_for("SHORT"), None);
    }

    #[test]
    fn test_entity_kind_flags() {
        let bank = Bank::new("ABCD1234XXX", "Test bank", None, "AA");
        let branch = BankBranch::new("ABCD1234X22", "Test branch", None, "AA", "ABCD1234XXX");

        assert!(bank.is_headquarter());
        assert!(!branch.is_headquarter());
    }
}
