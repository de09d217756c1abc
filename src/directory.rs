// 🏛️ Bank Directory Service
//
// Combines the validator and the gateway into the four use cases:
// lookup by code, lookup by country, register, delete.
// Each call runs inside exactly one SQLite transaction.

use crate::db;
use crate::dto::{BankRecord, BankSummary, BranchSummary, CountrySummary, SwiftCodeSummary};
use crate::entities::{headquarter_code_for, is_headquarter};
use crate::error::{DirectoryError, Result};
use crate::validator::{validate_country, validate_iso2_code, validate_swift_code};
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub struct BankDirectory {
    conn: Connection,
}

impl BankDirectory {
    /// Open (or create) the database file and make sure the schema exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Writers on other connections are waited for rather than failing
    /// with `SQLITE_BUSY`.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        db::setup_database(&conn)?;
        Ok(BankDirectory { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Mutable access for bulk operations such as seeding
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Everything known about a SWIFT code.
    ///
    /// Headquarter codes return the bank with its branches; branch codes
    /// return the branch alone.
    pub fn get_by_code(&mut self, swift_code: &str) -> Result<SwiftCodeSummary> {
        let headquarter = is_headquarter(swift_code);
        validate_swift_code(swift_code, headquarter)?;

        let tx = self.conn.transaction()?;

        let summary = if headquarter {
            let bank = db::get_bank(&tx, swift_code)?
                .ok_or_else(|| DirectoryError::not_found("Bank headquarter not found"))?;
            let country_name = country_name(&tx, &bank.country_iso2)?;
            let branches = db::branches_of_headquarter(&tx, swift_code)?;

            debug!(swift_code, branches = branches.len(), "Found bank headquarter");
            SwiftCodeSummary::Headquarter(BankSummary::new(&bank, &country_name, &branches))
        } else {
            let branch = db::get_branch(&tx, swift_code)?
                .ok_or_else(|| DirectoryError::not_found("Bank branch not found"))?;
            let country_name = country_name(&tx, &branch.country_iso2)?;

            debug!(swift_code, "Found bank branch");
            SwiftCodeSummary::Branch(BranchSummary::new(&branch, &country_name))
        };

        tx.commit()?;
        Ok(summary)
    }

    /// All headquarters and branches registered in a country
    pub fn get_by_country(&mut self, iso2: &str) -> Result<CountrySummary> {
        validate_iso2_code(iso2)?;

        let tx = self.conn.transaction()?;

        let country = db::get_country(&tx, iso2)?
            .ok_or_else(|| DirectoryError::not_found("Country not found"))?;
        let banks = db::banks_in_country(&tx, iso2)?;
        let branches = db::branches_in_country(&tx, iso2)?;

        tx.commit()?;

        debug!(
            iso2,
            banks = banks.len(),
            branches = branches.len(),
            "Listed country swift codes"
        );
        Ok(CountrySummary::new(&country, &banks, &branches))
    }

    // ========================================================================
    // COMMANDS
    // ========================================================================

    /// Register a new headquarter or branch.
    ///
    /// The existence checks and the insert share one IMMEDIATE transaction,
    /// so the write lock is held from the first check until commit.
    pub fn register(&mut self, record: &BankRecord) -> Result<String> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let country = validate_country(&tx, &record.country_iso2, &record.country_name)?;
        validate_swift_code(&record.swift_code, record.is_headquarter)?;

        let swift_code = record.swift_code.as_str();

        let message = if is_headquarter(swift_code) {
            if db::get_bank(&tx, swift_code)?.is_some() {
                return Err(DirectoryError::invalid_swift_code("Bank already exists"));
            }

            db::save_bank(&tx, &record.to_bank(&country))?;

            format!(
                "Bank headquarter with Swift code {} has been added to the system",
                swift_code
            )
        } else {
            let headquarter_code = headquarter_code_for(swift_code)
                .ok_or_else(|| DirectoryError::invalid_swift_code("Incorrect SWIFT code length"))?;
            let headquarter = db::get_bank(&tx, &headquarter_code)?
                .ok_or_else(|| DirectoryError::not_found("Headquarter bank not found"))?;

            if db::get_branch(&tx, swift_code)?.is_some() {
                return Err(DirectoryError::invalid_swift_code("Bank already exists"));
            }

            db::save_branch(&tx, &record.to_branch(&country, &headquarter))?;

            format!(
                "Bank branch with Swift code {} has been added to the system",
                swift_code
            )
        };

        tx.commit()?;

        info!(swift_code, country = %country.iso2, "Registered bank");
        Ok(message)
    }

    /// Remove a headquarter (with all of its branches) or a single branch
    pub fn delete(&mut self, swift_code: &str) -> Result<String> {
        let headquarter = is_headquarter(swift_code);
        validate_swift_code(swift_code, headquarter)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let message = if headquarter {
            if db::get_bank(&tx, swift_code)?.is_none() {
                return Err(DirectoryError::not_found("Bank headquarter not found"));
            }

            let branches = db::delete_bank_cascade(&tx, swift_code)?;
            info!(swift_code, branches, "Deleted bank headquarter");

            format!(
                "Bank headquarter with Swift code {} has been deleted from the system and it's branches",
                swift_code
            )
        } else {
            if db::get_branch(&tx, swift_code)?.is_none() {
                return Err(DirectoryError::not_found("Bank branch not found"));
            }

            db::delete_branch(&tx, swift_code)?;
            info!(swift_code, "Deleted bank branch");

            format!(
                "Bank branch with Swift code {} has been deleted from the system",
                swift_code
            )
        };

        tx.commit()?;
        Ok(message)
    }
}

/// Display name of a referenced country; the foreign key guarantees it exists
fn country_name(conn: &Connection, iso2: &str) -> Result<String> {
    db::get_country(conn, iso2)?
        .map(|country| country.name)
        .ok_or_else(|| DirectoryError::not_found("Country not found"))
}
