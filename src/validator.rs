// 📐 Code Validator - SWIFT and ISO2 syntax rules
//
// Each check fails fast with the specific error the caller surfaces, instead
// of collecting a list of problems.

use crate::db;
use crate::entities::{Country, HEADQUARTER_SUFFIX};
use crate::error::{DirectoryError, Result};
use rusqlite::Connection;

pub const SWIFT_CODE_LEN: usize = 11;
pub const ISO2_CODE_LEN: usize = 2;

/// Validate SWIFT code syntax against the caller's headquarter hint.
///
/// The two suffix messages read inverted relative to the condition they
/// guard. They are kept verbatim because clients match on them.
pub fn validate_swift_code(swift_code: &str, is_headquarter: bool) -> Result<()> {
    if swift_code.chars().count() != SWIFT_CODE_LEN {
        return Err(DirectoryError::invalid_swift_code(
            "Incorrect SWIFT code length",
        ));
    }

    if !swift_code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(DirectoryError::invalid_swift_code(
            "Incorrect SWIFT code format",
        ));
    }

    let has_suffix = swift_code.ends_with(HEADQUARTER_SUFFIX);

    if has_suffix && !is_headquarter {
        return Err(DirectoryError::invalid_swift_code(
            "Headquarter bank should end with XXX",
        ));
    }

    if !has_suffix && is_headquarter {
        return Err(DirectoryError::invalid_swift_code(
            "Branch bank should not end with XXX",
        ));
    }

    Ok(())
}

pub fn validate_iso2_code(iso2: &str) -> Result<()> {
    if iso2.chars().count() != ISO2_CODE_LEN {
        return Err(DirectoryError::invalid_iso2_code(
            "Incorrect ISO2 code length",
        ));
    }

    if !iso2.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(DirectoryError::invalid_iso2_code(
            "Incorrect ISO2 code format",
        ));
    }

    Ok(())
}

/// Resolve the country a record claims to belong to.
///
/// The stored name must equal `country_name` exactly (case included).
pub fn validate_country(conn: &Connection, iso2: &str, country_name: &str) -> Result<Country> {
    let country = db::get_country(conn, iso2)?
        .ok_or_else(|| DirectoryError::not_found("Country not found"))?;

    if country.name != country_name {
        return Err(DirectoryError::invalid_iso2_code(
            "Country name does not match the ISO2 code",
        ));
    }

    Ok(country)
}
