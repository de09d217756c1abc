// 🌱 Seeding - bulk load of countries, headquarters and branches from CSV
//
// Runs only when explicitly invoked (CLI `seed`, or the server with
// `seed.on_startup = true`). Never part of opening a directory.

use crate::db;
use crate::entities::{headquarter_code_for, is_headquarter, Bank, BankBranch, Country};
use crate::error::Result;
use rusqlite::Connection;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// One row of the SWIFT code spreadsheet export
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRow {
    #[serde(rename = "COUNTRY ISO2 CODE")]
    pub country_iso2: String,

    #[serde(rename = "SWIFT CODE")]
    pub swift_code: String,

    #[serde(rename = "CODE TYPE", default)]
    pub code_type: String,

    #[serde(rename = "NAME")]
    pub name: String,

    #[serde(rename = "ADDRESS", default)]
    pub address: Option<String>,

    #[serde(rename = "COUNTRY NAME")]
    pub country_name: String,

    #[serde(rename = "TIME ZONE", default)]
    pub time_zone: String,
}

impl SeedRow {
    fn address(&self) -> Option<String> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub rows: usize,
    pub countries: usize,
    pub headquarters: usize,
    pub branches: usize,
    /// Branch rows skipped because their headquarter is not in the data set
    pub orphans: usize,
}

pub fn load_rows<R: Read>(reader: R) -> Result<Vec<SeedRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: SeedRow = result?;
        rows.push(row);
    }

    Ok(rows)
}

pub fn seed_from_path<P: AsRef<Path>>(conn: &mut Connection, path: P) -> Result<SeedReport> {
    let file = std::fs::File::open(path.as_ref())?;
    info!(path = %path.as_ref().display(), "Seeding directory from CSV");
    seed_from_reader(conn, file)
}

pub fn seed_from_reader<R: Read>(conn: &mut Connection, reader: R) -> Result<SeedReport> {
    let rows = load_rows(reader)?;
    seed_rows(conn, &rows)
}

/// Insert rows that are not yet present, in one transaction.
///
/// Headquarters go first so every branch can be linked on the second pass.
pub fn seed_rows(conn: &mut Connection, rows: &[SeedRow]) -> Result<SeedReport> {
    let tx = conn.transaction()?;
    let mut report = SeedReport {
        rows: rows.len(),
        ..SeedReport::default()
    };

    // Pass 1: countries and headquarters
    for row in rows {
        if db::get_country(&tx, &row.country_iso2)?.is_none() {
            db::save_country(
                &tx,
                &Country::new(&row.country_iso2, &row.country_name, &row.time_zone),
            )?;
            report.countries += 1;
        }

        if is_headquarter(&row.swift_code) && db::get_bank(&tx, &row.swift_code)?.is_none() {
            db::save_bank(
                &tx,
                &Bank::new(&row.swift_code, &row.name, row.address(), &row.country_iso2),
            )?;
            report.headquarters += 1;
        }
    }

    // Pass 2: branches whose headquarter exists
    for row in rows.iter().filter(|row| !is_headquarter(&row.swift_code)) {
        let headquarter = match headquarter_code_for(&row.swift_code) {
            Some(code) if db::get_bank(&tx, &code)?.is_some() => code,
            _ => {
                warn!(swift_code = %row.swift_code, "No headquarter found for bank branch");
                report.orphans += 1;
                continue;
            }
        };

        if db::get_branch(&tx, &row.swift_code)?.is_none() {
            db::save_branch(
                &tx,
                &BankBranch::new(
                    &row.swift_code,
                    &row.name,
                    row.address(),
                    &row.country_iso2,
                    headquarter,
                ),
            )?;
            report.branches += 1;
        }
    }

    tx.commit()?;

    info!(
        rows = report.rows,
        countries = report.countries,
        headquarters = report.headquarters,
        branches = report.branches,
        orphans = report.orphans,
        "Seeding finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
COUNTRY ISO2 CODE,SWIFT CODE,CODE TYPE,NAME,ADDRESS,COUNTRY NAME,TIME ZONE
AL,AAISALTRXXX,BIC11,UNITED BANK OF ALBANIA SH.A,\"HYRJA 3 RR. DRITAN HOXHA ND. 11 TIRANA, TIRANA, 1023 \",ALBANIA,Europe/Tirane
BG,ABIEBGS1XXX,BIC11,ABV INVESTMENTS LTD,\"TSAR ASEN 20  VARNA, VARNA, 9002\",BULGARIA,Europe/Sofia
BG,ADCRBGS1XXX,BIC11,ADAMANT CAPITAL PARTNERS AD,,BULGARIA,Europe/Sofia
BG,ABIEBGS1A01,BIC11,ABV INVESTMENTS LTD - BRANCH,,BULGARIA,Europe/Sofia
UY,AFAAUYM1XXX,BIC11,AFINIDAD A.F.A.P.S.A.,PLAZA INDEPENDENCIA 743  MONTEVIDEO,URUGUAY,America/Montevideo
UY,NOHQUYM1A02,BIC11,ORPHAN BRANCH,,URUGUAY,America/Montevideo
";

    fn test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        db::setup_database(&conn).unwrap();
        conn
    }

    #[test]
    fn test_seed_sample() {
        let mut conn = test_connection();

        let report = seed_from_reader(&mut conn, SAMPLE.as_bytes()).unwrap();

        assert_eq!(
            report,
            SeedReport {
                rows: 6,
                countries: 3,
                headquarters: 4,
                branches: 1,
                orphans: 1,
            }
        );

        let branch = db::get_branch(&conn, "ABIEBGS1A01").unwrap().unwrap();
        assert_eq!(branch.headquarter_swift_code, "ABIEBGS1XXX");
        assert!(branch.address.is_none());

        let bulgaria = db::get_country(&conn, "BG").unwrap().unwrap();
        assert_eq!(bulgaria.name, "BULGARIA");
        assert_eq!(bulgaria.time_zone, "Europe/Sofia");

        assert!(db::get_branch(&conn, "NOHQUYM1A02").unwrap().is_none());
    }

    #[test]
    fn test_seed_twice_inserts_nothing_new() {
        let mut conn = test_connection();
        seed_from_reader(&mut conn, SAMPLE.as_bytes()).unwrap();

        let second = seed_from_reader(&mut conn, SAMPLE.as_bytes()).unwrap();

        assert_eq!(second.countries, 0);
        assert_eq!(second.headquarters, 0);
        assert_eq!(second.branches, 0);
        assert_eq!(db::banks_in_country(&conn, "BG").unwrap().len(), 2);
    }

    #[test]
    fn test_seed_branch_before_headquarter_row() {
        let csv = "\
COUNTRY ISO2 CODE,SWIFT CODE,CODE TYPE,NAME,ADDRESS,COUNTRY NAME,TIME ZONE
PL,BREXPLPWA01,BIC11,BRANCH FIRST,,POLAND,Europe/Warsaw
PL,BREXPLPWXXX,BIC11,HEADQUARTER SECOND,,POLAND,Europe/Warsaw
";
        let mut conn = test_connection();

        let report = seed_from_reader(&mut conn, csv.as_bytes()).unwrap();

        assert_eq!(report.branches, 1);
        assert_eq!(report.orphans, 0);
    }

    #[test]
    fn test_seed_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let mut conn = test_connection();

        let report = seed_from_path(&mut conn, file.path()).unwrap();

        assert_eq!(report.rows, 6);
    }

    #[test]
    fn test_seed_missing_file() {
        let mut conn = test_connection();

        assert!(seed_from_path(&mut conn, "/definitely/not/here.csv").is_err());
    }
}
