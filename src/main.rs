use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use swift_directory::{db, logger, seed_from_path, BankDirectory, Config};

/// Command-line access to the SWIFT code directory
#[derive(Debug, Parser)]
#[command(name = "swift-directory", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides the configuration)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the database schema
    Init,
    /// Bulk load countries, headquarters and branches from a CSV export
    Seed { csv: PathBuf },
    /// Show everything known about a SWIFT code
    Lookup { swift_code: String },
    /// List every SWIFT code registered in a country
    Country { iso2: String },
    /// Delete a bank (headquarters take their branches with them)
    Delete { swift_code: String },
    /// List the countries known to the directory
    Countries,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(database) = cli.database {
        config.database.path = database;
    }

    logger::init_logger(cli.verbose || config.logging.verbose, config.logging.json);

    let mut directory = BankDirectory::open(&config.database.path).with_context(|| {
        format!("Failed to open database {:?}", config.database.path)
    })?;

    match cli.command {
        Command::Init => {
            println!("✓ Database ready at {:?}", config.database.path);
        }
        Command::Seed { csv } => {
            let report = seed_from_path(directory.connection_mut(), &csv)
                .with_context(|| format!("Failed to seed from {:?}", csv))?;

            println!("✓ Rows read: {}", report.rows);
            println!("✓ Countries added: {}", report.countries);
            println!("✓ Headquarters added: {}", report.headquarters);
            println!("✓ Branches added: {}", report.branches);
            if report.orphans > 0 {
                println!("⚠ Branches without headquarter: {}", report.orphans);
            }
        }
        Command::Lookup { swift_code } => {
            let summary = directory.get_by_code(&swift_code)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Country { iso2 } => {
            let summary = directory.get_by_country(&iso2)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Delete { swift_code } => {
            println!("{}", directory.delete(&swift_code)?);
        }
        Command::Countries => {
            let countries = db::list_countries(directory.connection())?;
            for country in &countries {
                println!("{}  {}  {}", country.iso2, country.name, country.time_zone);
            }
            println!("✓ {} countries", countries.len());
        }
    }

    Ok(())
}
