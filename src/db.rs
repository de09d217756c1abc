// 🗄️ Persistence Gateway - SQLite storage for countries, banks and branches
//
// Every function takes a plain `&Connection`, so callers can pass either a
// connection or an open `rusqlite::Transaction` (which derefs to one).

use crate::entities::{Bank, BankBranch, Country};
use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub fn setup_database(conn: &Connection) -> Result<()> {
    // WAL for crash recovery; in-memory databases silently keep "memory"
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    // ==========================================================================
    // Countries (pre-seeded by the bulk loader)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS countries (
            iso2_code TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            time_zone TEXT NOT NULL
        )",
        [],
    )?;

    // ==========================================================================
    // Banks (headquarters)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS banks (
            swift_code TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            address TEXT,
            country_iso2_code TEXT NOT NULL REFERENCES countries(iso2_code)
        )",
        [],
    )?;

    // ==========================================================================
    // Bank branches
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS bank_branches (
            swift_code TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            address TEXT,
            country_iso2_code TEXT NOT NULL REFERENCES countries(iso2_code),
            headquarters_swift_code TEXT NOT NULL REFERENCES banks(swift_code)
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_banks_country ON banks(country_iso2_code)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_branches_country ON bank_branches(country_iso2_code)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_branches_headquarter ON bank_branches(headquarters_swift_code)",
        [],
    )?;

    Ok(())
}

// ============================================================================
// ROW MAPPING
// ============================================================================

fn country_from_row(row: &Row<'_>) -> rusqlite::Result<Country> {
    Ok(Country {
        iso2: row.get(0)?,
        name: row.get(1)?,
        time_zone: row.get(2)?,
    })
}

fn bank_from_row(row: &Row<'_>) -> rusqlite::Result<Bank> {
    Ok(Bank {
        swift_code: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        country_iso2: row.get(3)?,
    })
}

fn branch_from_row(row: &Row<'_>) -> rusqlite::Result<BankBranch> {
    Ok(BankBranch {
        swift_code: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        country_iso2: row.get(3)?,
        headquarter_swift_code: row.get(4)?,
    })
}

const BANK_COLUMNS: &str = "swift_code, name, address, country_iso2_code";
const BRANCH_COLUMNS: &str =
    "swift_code, name, address, country_iso2_code, headquarters_swift_code";

// ============================================================================
// COUNTRIES
// ============================================================================

pub fn get_country(conn: &Connection, iso2: &str) -> Result<Option<Country>> {
    let country = conn
        .query_row(
            "SELECT iso2_code, name, time_zone FROM countries WHERE iso2_code = ?1",
            params![iso2],
            country_from_row,
        )
        .optional()?;

    Ok(country)
}

/// Insert or update a country
pub fn save_country(conn: &Connection, country: &Country) -> Result<()> {
    conn.execute(
        "INSERT INTO countries (iso2_code, name, time_zone) VALUES (?1, ?2, ?3)
         ON CONFLICT(iso2_code) DO UPDATE SET name = excluded.name, time_zone = excluded.time_zone",
        params![country.iso2, country.name, country.time_zone],
    )?;

    Ok(())
}

pub fn list_countries(conn: &Connection) -> Result<Vec<Country>> {
    let mut stmt =
        conn.prepare("SELECT iso2_code, name, time_zone FROM countries ORDER BY iso2_code")?;

    let countries = stmt
        .query_map([], country_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(countries)
}

// ============================================================================
// BANKS (HEADQUARTERS)
// ============================================================================

pub fn get_bank(conn: &Connection, swift_code: &str) -> Result<Option<Bank>> {
    let bank = conn
        .query_row(
            &format!("SELECT {} FROM banks WHERE swift_code = ?1", BANK_COLUMNS),
            params![swift_code],
            bank_from_row,
        )
        .optional()?;

    Ok(bank)
}

pub fn save_bank(conn: &Connection, bank: &Bank) -> Result<()> {
    conn.execute(
        "INSERT INTO banks (swift_code, name, address, country_iso2_code) VALUES (?1, ?2, ?3, ?4)",
        params![bank.swift_code, bank.name, bank.address, bank.country_iso2],
    )?;

    Ok(())
}

/// Delete a single bank row. Fails on the foreign key if branches still
/// reference it; use `delete_bank_cascade` to remove a headquarter.
pub fn delete_bank(conn: &Connection, swift_code: &str) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM banks WHERE swift_code = ?1", params![swift_code])?;
    Ok(deleted > 0)
}

/// Delete a headquarter together with every branch that points to it.
///
/// Returns the number of branches removed. Run it inside a transaction so
/// the two deletes commit together.
pub fn delete_bank_cascade(conn: &Connection, swift_code: &str) -> Result<usize> {
    let branches = conn.execute(
        "DELETE FROM bank_branches WHERE headquarters_swift_code = ?1",
        params![swift_code],
    )?;
    delete_bank(conn, swift_code)?;

    Ok(branches)
}

pub fn banks_in_country(conn: &Connection, iso2: &str) -> Result<Vec<Bank>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM banks WHERE country_iso2_code = ?1 ORDER BY rowid",
        BANK_COLUMNS
    ))?;

    let banks = stmt
        .query_map(params![iso2], bank_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(banks)
}

// ============================================================================
// BANK BRANCHES
// ============================================================================

pub fn get_branch(conn: &Connection, swift_code: &str) -> Result<Option<BankBranch>> {
    let branch = conn
        .query_row(
            &format!(
                "SELECT {} FROM bank_branches WHERE swift_code = ?1",
                BRANCH_COLUMNS
            ),
            params![swift_code],
            branch_from_row,
        )
        .optional()?;

    Ok(branch)
}

pub fn save_branch(conn: &Connection, branch: &BankBranch) -> Result<()> {
    conn.execute(
        "INSERT INTO bank_branches (
            swift_code, name, address, country_iso2_code, headquarters_swift_code
        ) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            branch.swift_code,
            branch.name,
            branch.address,
            branch.country_iso2,
            branch.headquarter_swift_code,
        ],
    )?;

    Ok(())
}

pub fn delete_branch(conn: &Connection, swift_code: &str) -> Result<bool> {
    let deleted = conn.execute(
        "DELETE FROM bank_branches WHERE swift_code = ?1",
        params![swift_code],
    )?;
    Ok(deleted > 0)
}

/// Branches whose headquarter reference is `headquarter_code`, in insertion order
pub fn branches_of_headquarter(
    conn: &Connection,
    headquarter_code: &str,
) -> Result<Vec<BankBranch>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM bank_branches WHERE headquarters_swift_code = ?1 ORDER BY rowid",
        BRANCH_COLUMNS
    ))?;

    let branches = stmt
        .query_map(params![headquarter_code], branch_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(branches)
}

pub fn branches_in_country(conn: &Connection, iso2: &str) -> Result<Vec<BankBranch>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM bank_branches WHERE country_iso2_code = ?1 ORDER BY rowid",
        BRANCH_COLUMNS
    ))?;

    let branches = stmt
        .query_map(params![iso2], branch_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(branches)
}
